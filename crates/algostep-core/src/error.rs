//! The common error type for all engines.
//!
//! Malformed input is rejected before any search begins; it never surfaces
//! mid-recursion. Exhaustion (no solution, no path) is *not* an error — it
//! is a valid terminal outcome reported through the engines' return values.

use std::fmt;

use crate::geom::Point;
use crate::trace::Cancelled;

/// Why an engine refused to run, or stopped early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Board size outside the supported range.
    SizeOutOfRange { size: usize, min: usize, max: usize },
    /// Input rows do not form a square matrix.
    NotSquare { rows: usize, cols: usize },
    /// A cell holds a value the board cannot contain.
    InvalidDigit { row: usize, col: usize, value: u8 },
    /// Grid dimensions too small for the operation.
    GridTooSmall { width: i32, height: i32 },
    /// An ASCII grid line differs in width from the first line.
    Ragged { line: usize },
    /// An ASCII grid contains a character with no cell meaning.
    InvalidRune(char),
    /// A search endpoint lies outside the grid.
    OutOfBounds(Point),
    /// A search endpoint sits on a wall.
    Blocked(Point),
    /// The step sink requested a stop.
    Cancelled,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::SizeOutOfRange { size, min, max } => {
                write!(f, "size {size} outside supported range {min}..={max}")
            }
            Error::NotSquare { rows, cols } => {
                write!(f, "board is not square: {rows} rows, {cols} columns")
            }
            Error::InvalidDigit { row, col, value } => {
                write!(f, "invalid digit {value} at row {row}, column {col}")
            }
            Error::GridTooSmall { width, height } => {
                write!(f, "grid {width}x{height} is too small")
            }
            Error::Ragged { line } => {
                write!(f, "line {line} differs in width from the first line")
            }
            Error::InvalidRune(ch) => write!(f, "invalid map character {ch:?}"),
            Error::OutOfBounds(p) => write!(f, "point {p} is outside the grid"),
            Error::Blocked(p) => write!(f, "point {p} is a wall"),
            Error::Cancelled => Cancelled.fmt(f),
        }
    }
}

impl std::error::Error for Error {}

impl From<Cancelled> for Error {
    fn from(_: Cancelled) -> Self {
        Error::Cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_text() {
        let err = Error::SizeOutOfRange {
            size: 40,
            min: 1,
            max: 16,
        };
        assert_eq!(err.to_string(), "size 40 outside supported range 1..=16");
        assert_eq!(
            Error::Blocked(Point::new(2, 3)).to_string(),
            "point (2, 3) is a wall"
        );
        assert_eq!(Error::Cancelled.to_string(), "algorithm stopped by caller");
    }

    #[test]
    fn cancelled_converts() {
        fn inner() -> Result<(), Cancelled> {
            Err(Cancelled)
        }
        fn outer() -> Result<(), Error> {
            inner()?;
            Ok(())
        }
        assert_eq!(outer(), Err(Error::Cancelled));
    }
}
