//! N-Queens backtracking solver with step emission.
//!
//! Queens are placed row by row from the top, trying columns left to right.
//! Because later rows are always empty while a row is being filled, the
//! safety check only looks at earlier rows — the column above and the two
//! upper diagonals. The search returns the first solution found; the
//! deterministic column-major tie-break makes the step sequence reproducible
//! for a given `n`.

use algostep_core::{Cancelled, Control, Error, Tracer};

use crate::board::{Board, Square};

/// Largest supported board size. Step traces grow quickly with `n`; the
/// practical use is animation, not bulk solving.
pub const MAX_N: usize = 16;

const QUEEN: u8 = 1;

/// What happened at one point of the search.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum QueensStepKind {
    /// About to test a square.
    Trying { at: Square },
    /// A queen was placed; `attacked` lists every square she now covers.
    Placed { at: Square, attacked: Vec<Square> },
    /// The queen at `at` was removed after the rows below failed.
    Backtrack { at: Square },
    /// The square conflicts with an earlier queen.
    Conflict { at: Square },
    /// All queens placed.
    Solution,
    /// The whole search space was exhausted.
    NoSolution,
}

/// One step of the N-Queens search, with a board snapshot taken at that
/// instant and a human-readable description.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueensStep {
    pub kind: QueensStepKind,
    pub board: Board,
    pub message: String,
}

impl QueensStep {
    fn new(kind: QueensStepKind, board: &Board, message: String) -> Self {
        Self {
            kind,
            board: board.clone(),
            message,
        }
    }
}

/// Whether a queen at (row, col) conflicts with any queen in an earlier row.
///
/// Only the column above and the two upper diagonals are checked: the solver
/// fills rows top-down, so rows at or below `row` hold no queens yet. This
/// asymmetry is intentional.
pub fn is_safe(board: &Board, row: usize, col: usize) -> bool {
    let n = board.size();
    for r in 0..row {
        if board.get(r, col) == QUEEN {
            return false;
        }
    }
    let (mut r, mut c) = (row, col);
    while r > 0 && c > 0 {
        r -= 1;
        c -= 1;
        if board.get(r, c) == QUEEN {
            return false;
        }
    }
    let (mut r, mut c) = (row, col);
    while r > 0 && c + 1 < n {
        r -= 1;
        c += 1;
        if board.get(r, c) == QUEEN {
            return false;
        }
    }
    true
}

/// Every square attacked by a queen at (row, col) on an `n` × `n` board:
/// the rest of her row and column, plus both full diagonals.
pub fn attacked_squares(row: usize, col: usize, n: usize) -> Vec<Square> {
    let mut attacked = Vec::new();
    for j in 0..n {
        if j != col {
            attacked.push(Square::new(row, j));
        }
    }
    for i in 0..n {
        if i != row {
            attacked.push(Square::new(i, col));
        }
    }
    for i in 0..n {
        for j in 0..n {
            if i != row && j != col && i.abs_diff(row) == j.abs_diff(col) {
                attacked.push(Square::new(i, j));
            }
        }
    }
    attacked
}

/// Solve the `n`-queens problem, emitting one step per decision point.
///
/// Returns the first solution found, `Ok(None)` when the search space is
/// exhausted (a final `NoSolution` step is emitted), or
/// `Err(Error::Cancelled)` when the sink stops the search.
pub fn solve(
    n: usize,
    sink: impl FnMut(QueensStep, usize) -> Control,
) -> Result<Option<Board>, Error> {
    validate(n)?;
    let mut board = Board::new(n);
    let mut tracer = Tracer::new(sink);
    if place_row(&mut board, 0, &mut tracer)? {
        Ok(Some(board))
    } else {
        tracer.emit(QueensStep::new(
            QueensStepKind::NoSolution,
            &board,
            format!("No solution exists for the {n}-queens problem"),
        ))?;
        Ok(None)
    }
}

fn place_row(
    board: &mut Board,
    row: usize,
    tracer: &mut Tracer<'_, QueensStep>,
) -> Result<bool, Cancelled> {
    let n = board.size();
    if row == n {
        tracer.emit(QueensStep::new(
            QueensStepKind::Solution,
            board,
            format!("Solution found: all {n} queens placed"),
        ))?;
        return Ok(true);
    }

    for col in 0..n {
        let at = Square::new(row, col);
        tracer.emit(QueensStep::new(
            QueensStepKind::Trying { at },
            board,
            format!("Trying to place queen at ({}, {})", row + 1, col + 1),
        ))?;

        if is_safe(board, row, col) {
            let prev = board.replace(row, col, QUEEN);
            let attacked = attacked_squares(row, col, n);
            tracer.emit(QueensStep::new(
                QueensStepKind::Placed { at, attacked },
                board,
                format!("Queen placed at ({}, {}), checking next row", row + 1, col + 1),
            ))?;

            if place_row(board, row + 1, tracer)? {
                return Ok(true);
            }

            board.replace(row, col, prev);
            tracer.emit(QueensStep::new(
                QueensStepKind::Backtrack { at },
                board,
                format!("Backtracking: removing queen from ({}, {})", row + 1, col + 1),
            ))?;
        } else {
            tracer.emit(QueensStep::new(
                QueensStepKind::Conflict { at },
                board,
                format!("Conflict at ({}, {}), trying next column", row + 1, col + 1),
            ))?;
        }
    }

    Ok(false)
}

/// Enumerate every solution, without step emission.
///
/// Uses the identical safety predicate as [`solve`], so the first board in
/// the result equals the board [`solve`] returns.
pub fn all_solutions(n: usize) -> Result<Vec<Board>, Error> {
    validate(n)?;
    let mut board = Board::new(n);
    let mut solutions = Vec::new();
    collect_row(&mut board, 0, &mut solutions);
    Ok(solutions)
}

fn collect_row(board: &mut Board, row: usize, solutions: &mut Vec<Board>) {
    let n = board.size();
    if row == n {
        solutions.push(board.clone());
        return;
    }
    for col in 0..n {
        if is_safe(board, row, col) {
            let prev = board.replace(row, col, QUEEN);
            collect_row(board, row + 1, solutions);
            board.replace(row, col, prev);
        }
    }
}

fn validate(n: usize) -> Result<(), Error> {
    if n < 1 || n > MAX_N {
        return Err(Error::SizeOutOfRange {
            size: n,
            min: 1,
            max: MAX_N,
        });
    }
    Ok(())
}
