//! Rectangular wall/floor grids for the searches.

use std::fmt;

use algostep_core::{Error, Point};

/// One grid cell: walkable floor or blocking wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    #[default]
    Empty,
    Wall,
}

/// A rectangular field of [`Cell`] values, 4-connected for traversal.
///
/// Start and end positions are not part of the grid; callers track them
/// separately and pass them to the search functions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid of the given size, all cells empty.
    ///
    /// Panics if either dimension is not positive.
    pub fn new(width: i32, height: i32) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be positive");
        Self {
            width,
            height,
            cells: vec![Cell::Empty; (width * height) as usize],
        }
    }

    /// Parse a grid from ASCII art: `#` is a wall, `.` (or space) a floor.
    ///
    /// Lines must all have the same width; leading/trailing whitespace
    /// around the whole string is ignored.
    pub fn from_ascii(s: &str) -> Result<Self, Error> {
        let s = s.trim();
        let mut width: i32 = -1;
        let mut cells = Vec::new();
        let mut height = 0;
        for (lineno, line) in s.lines().enumerate() {
            let w = line.chars().count() as i32;
            if width < 0 {
                width = w;
            } else if w != width {
                return Err(Error::Ragged { line: lineno });
            }
            for ch in line.chars() {
                match ch {
                    '#' => cells.push(Cell::Wall),
                    '.' | ' ' => cells.push(Cell::Empty),
                    other => return Err(Error::InvalidRune(other)),
                }
            }
            height += 1;
        }
        if width <= 0 || height == 0 {
            return Err(Error::GridTooSmall { width: 0, height });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Grid width in cells.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Grid height in cells.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Whether `p` lies inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.x < self.width && p.y >= 0 && p.y < self.height
    }

    /// The cell at `p`, or `None` if out of bounds.
    pub fn at(&self, p: Point) -> Option<Cell> {
        if !self.contains(p) {
            return None;
        }
        Some(self.cells[self.idx(p)])
    }

    /// Set the cell at `p`. Does nothing if out of bounds.
    pub fn set(&mut self, p: Point, cell: Cell) {
        if self.contains(p) {
            let i = self.idx(p);
            self.cells[i] = cell;
        }
    }

    /// Fill every cell with `cell`.
    pub fn fill(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    /// Whether `p` is inside the grid and not a wall.
    #[inline]
    pub fn walkable(&self, p: Point) -> bool {
        self.at(p) == Some(Cell::Empty)
    }

    /// Append the walkable 4-way neighbours of `p` to `buf`, in
    /// up/down/left/right order. `buf` is cleared first.
    pub fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        buf.clear();
        for n in [
            p.shift(0, -1),
            p.shift(0, 1),
            p.shift(-1, 0),
            p.shift(1, 0),
        ] {
            if self.walkable(n) {
                buf.push(n);
            }
        }
    }

    /// Count cells equal to `cell`.
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Total number of cells.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.cells.len()
    }

    /// Flat index of an in-bounds point.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> usize {
        (p.y * self.width + p.x) as usize
    }

    /// Point for a flat index.
    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        Point::new(idx as i32 % self.width, idx as i32 / self.width)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                match self.cells[(y * self.width + x) as usize] {
                    Cell::Wall => f.write_str("#")?,
                    Cell::Empty => f.write_str(".")?,
                }
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}
