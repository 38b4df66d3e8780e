//! Shortest-path search on 2D grids with step-by-step trace emission.
//!
//! - [`Grid`] — rectangular field of [`Cell::Empty`] / [`Cell::Wall`],
//!   4-connected, uniform edge cost 1, buildable from ASCII art.
//! - [`dijkstra`] / [`astar`] — priority-ordered search emitting a
//!   [`SearchStep`] per visit and per distance update; A* orders its
//!   frontier by distance plus the Manhattan heuristic (admissible on a
//!   uniform 4-connected grid, so the result is still optimal).
//! - [`Frontier`] — binary min-heap with FIFO tie-breaking; the searches
//!   depend only on its "lowest priority first, stable on ties" ordering.
//! - [`generate_maze`] — recursive-backtracking maze carving.

mod distance;
mod frontier;
mod grid;
mod maze;
mod search;

pub use distance::manhattan;
pub use frontier::Frontier;
pub use grid::{Cell, Grid};
pub use maze::generate_maze;
pub use search::{
    Algorithm, SearchReport, SearchStep, SearchStepKind, UNREACHABLE, astar, dijkstra,
};
