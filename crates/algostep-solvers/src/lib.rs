//! Backtracking solvers with step-by-step trace emission.
//!
//! Two classic constraint problems share one shape here: a mutable square
//! [`Board`], a pure safety predicate, and a depth-first search that emits a
//! step record at every decision point — trying a placement, committing it,
//! rejecting it, or undoing it on backtrack. Each emitted step carries an
//! immutable snapshot of the board at that instant.
//!
//! - [`nqueens`]: place N queens so none attack each other. First solution
//!   via row-by-row, left-to-right search; exhaustive enumeration via
//!   [`nqueens::all_solutions`].
//! - [`sudoku`]: fill a 9×9 grid honouring row/column/box constraints, plus
//!   a puzzle generator (diagonal boxes first, then backtracking fill, then
//!   random cell removal — uniqueness deliberately not guaranteed).

pub mod board;
pub mod nqueens;
pub mod sudoku;

pub use board::{Board, Square};
