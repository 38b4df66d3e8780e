//! Square digit boards for the backtracking solvers.

use std::fmt;

use algostep_core::Error;

/// A cell position on a [`Board`], as (row, column) from the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Square {
    pub row: usize,
    pub col: usize,
}

impl Square {
    /// Create a new square.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A square matrix of small integers; `0` means empty.
///
/// The solvers mutate a board in place during search and clone it for each
/// emitted step, so step history stays immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    size: usize,
    cells: Vec<u8>,
}

impl Board {
    /// Create an empty `size` × `size` board.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![0; size * size],
        }
    }

    /// Build a board from row vectors, rejecting ragged or non-square input.
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self, Error> {
        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);
        for row in rows {
            if row.len() != size {
                return Err(Error::NotSquare {
                    rows: size,
                    cols: row.len(),
                });
            }
            cells.extend_from_slice(row);
        }
        Ok(Self { size, cells })
    }

    /// Side length of the board.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Value at (row, col). Panics if out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        assert!(row < self.size && col < self.size);
        self.cells[row * self.size + col]
    }

    /// Set the value at (row, col). Panics if out of bounds.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: u8) {
        assert!(row < self.size && col < self.size);
        self.cells[row * self.size + col] = value;
    }

    /// Set the value at (row, col), returning the prior value.
    ///
    /// The solvers undo a tentative placement by replacing it with exactly
    /// the value returned here, never with an assumed empty sentinel.
    #[inline]
    pub fn replace(&mut self, row: usize, col: usize, value: u8) -> u8 {
        assert!(row < self.size && col < self.size);
        std::mem::replace(&mut self.cells[row * self.size + col], value)
    }

    /// The cells of row `row` as a slice.
    #[inline]
    pub fn row(&self, row: usize) -> &[u8] {
        &self.cells[row * self.size..(row + 1) * self.size]
    }

    /// Iterate over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.chunks(self.size.max(1))
    }

    /// Count cells holding `value`.
    pub fn count(&self, value: u8) -> usize {
        self.cells.iter().filter(|&&c| c == value).count()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for (i, &c) in row.iter().enumerate() {
                if i > 0 {
                    f.write_str(" ")?;
                }
                if c == 0 {
                    f.write_str(".")?;
                } else {
                    write!(f, "{c}")?;
                }
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_rejects_ragged() {
        let rows = vec![vec![0, 0], vec![0]];
        assert_eq!(
            Board::from_rows(&rows),
            Err(Error::NotSquare { rows: 2, cols: 1 })
        );
    }

    #[test]
    fn from_rows_rejects_non_square() {
        let rows = vec![vec![0, 0, 0], vec![0, 0, 0]];
        assert!(matches!(
            Board::from_rows(&rows),
            Err(Error::NotSquare { rows: 2, cols: 3 })
        ));
    }

    #[test]
    fn replace_returns_prior_value() {
        let mut b = Board::new(4);
        b.set(1, 2, 7);
        assert_eq!(b.replace(1, 2, 9), 7);
        assert_eq!(b.get(1, 2), 9);
        assert_eq!(b.replace(1, 2, 7), 9);
    }

    #[test]
    fn display_uses_dots_for_empty() {
        let mut b = Board::new(2);
        b.set(0, 1, 3);
        assert_eq!(b.to_string(), ". 3\n. .\n");
    }
}
