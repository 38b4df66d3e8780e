//! Sudoku backtracking solver and puzzle generator.
//!
//! The solver scans row-major for the first empty cell, tries digits 1–9 in
//! ascending order, and recurses; every attempt, placement, rejection and
//! backtrack is emitted as a step with a full board snapshot.
//!
//! Generation fills the three diagonal 3×3 boxes with independent random
//! permutations (they share no row, column or box, so they cannot
//! conflict), completes the grid with the same backtracking predicate, then
//! blanks a difficulty-dependent number of cells uniformly at random. The
//! resulting puzzle is solvable by construction but is *not* guaranteed to
//! have a unique solution.

use algostep_core::{Cancelled, Control, Error, Tracer};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::board::{Board, Square};

/// Side length of a Sudoku board.
pub const SIZE: usize = 9;
/// Side length of one box.
pub const BOX_SIZE: usize = 3;

/// What happened at one point of the search.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum SudokuStepKind {
    /// Moved to the next empty cell; `affected` lists the row, column and
    /// box cells that constrain it.
    TryingCell { at: Square, affected: Vec<Square> },
    /// About to test a digit in the current cell.
    TryingNumber { at: Square, num: u8 },
    /// The digit passed validation and was written.
    Placed { at: Square, num: u8 },
    /// The digit conflicts with the row, column or box.
    Invalid { at: Square, num: u8 },
    /// The digit was removed after deeper search failed.
    Backtrack { at: Square, num: u8 },
    /// No empty cell remains.
    Solution,
    /// Every digit combination was exhausted.
    NoSolution,
}

/// One step of the Sudoku search.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SudokuStep {
    pub kind: SudokuStepKind,
    pub board: Board,
    pub message: String,
}

impl SudokuStep {
    fn new(kind: SudokuStepKind, board: &Board, message: String) -> Self {
        Self {
            kind,
            board: board.clone(),
            message,
        }
    }
}

/// Whether writing `num` at (row, col) keeps the row, column and box free
/// of duplicates. The cell itself is assumed empty.
pub fn is_valid_move(board: &Board, row: usize, col: usize, num: u8) -> bool {
    for x in 0..SIZE {
        if board.get(row, x) == num || board.get(x, col) == num {
            return false;
        }
    }
    let box_row = row - row % BOX_SIZE;
    let box_col = col - col % BOX_SIZE;
    for i in 0..BOX_SIZE {
        for j in 0..BOX_SIZE {
            if board.get(box_row + i, box_col + j) == num {
                return false;
            }
        }
    }
    true
}

/// First empty cell in row-major order, if any.
pub fn find_empty(board: &Board) -> Option<Square> {
    for row in 0..SIZE {
        for col in 0..SIZE {
            if board.get(row, col) == 0 {
                return Some(Square::new(row, col));
            }
        }
    }
    None
}

/// Every cell sharing a row, column or box with (row, col).
pub fn affected_squares(row: usize, col: usize) -> Vec<Square> {
    let mut affected = Vec::new();
    for j in 0..SIZE {
        if j != col {
            affected.push(Square::new(row, j));
        }
    }
    for i in 0..SIZE {
        if i != row {
            affected.push(Square::new(i, col));
        }
    }
    let box_row = row - row % BOX_SIZE;
    let box_col = col - col % BOX_SIZE;
    for i in 0..BOX_SIZE {
        for j in 0..BOX_SIZE {
            let sq = Square::new(box_row + i, box_col + j);
            if sq.row != row && sq.col != col {
                affected.push(sq);
            }
        }
    }
    affected
}

/// Solve a Sudoku puzzle, emitting one step per decision point.
///
/// The given cells of `puzzle` are never altered; the returned board is a
/// superset of them. `Ok(None)` means the puzzle is unsolvable (a final
/// `NoSolution` step is emitted first).
pub fn solve(
    puzzle: &Board,
    sink: impl FnMut(SudokuStep, usize) -> Control,
) -> Result<Option<Board>, Error> {
    validate(puzzle)?;
    let mut board = puzzle.clone();
    let mut tracer = Tracer::new(sink);
    if fill_cell(&mut board, &mut tracer)? {
        Ok(Some(board))
    } else {
        tracer.emit(SudokuStep::new(
            SudokuStepKind::NoSolution,
            puzzle,
            "No solution exists for this Sudoku puzzle".to_string(),
        ))?;
        Ok(None)
    }
}

fn fill_cell(board: &mut Board, tracer: &mut Tracer<'_, SudokuStep>) -> Result<bool, Cancelled> {
    let Some(at) = find_empty(board) else {
        tracer.emit(SudokuStep::new(
            SudokuStepKind::Solution,
            board,
            "Sudoku solved".to_string(),
        ))?;
        return Ok(true);
    };

    let affected = affected_squares(at.row, at.col);
    tracer.emit(SudokuStep::new(
        SudokuStepKind::TryingCell { at, affected },
        board,
        format!("Trying to fill cell ({}, {})", at.row + 1, at.col + 1),
    ))?;

    for num in 1..=SIZE as u8 {
        tracer.emit(SudokuStep::new(
            SudokuStepKind::TryingNumber { at, num },
            board,
            format!("Trying {} at ({}, {})", num, at.row + 1, at.col + 1),
        ))?;

        if is_valid_move(board, at.row, at.col, num) {
            let prev = board.replace(at.row, at.col, num);
            tracer.emit(SudokuStep::new(
                SudokuStepKind::Placed { at, num },
                board,
                format!("Placed {} at ({}, {})", num, at.row + 1, at.col + 1),
            ))?;

            if fill_cell(board, tracer)? {
                return Ok(true);
            }

            board.replace(at.row, at.col, prev);
            tracer.emit(SudokuStep::new(
                SudokuStepKind::Backtrack { at, num },
                board,
                format!(
                    "Backtracking: removing {} from ({}, {})",
                    num,
                    at.row + 1,
                    at.col + 1
                ),
            ))?;
        } else {
            tracer.emit(SudokuStep::new(
                SudokuStepKind::Invalid { at, num },
                board,
                format!(
                    "{} conflicts at ({}, {}), trying next digit",
                    num,
                    at.row + 1,
                    at.col + 1
                ),
            ))?;
        }
    }

    Ok(false)
}

fn validate(board: &Board) -> Result<(), Error> {
    if board.size() != SIZE {
        return Err(Error::SizeOutOfRange {
            size: board.size(),
            min: SIZE,
            max: SIZE,
        });
    }
    for row in 0..SIZE {
        for col in 0..SIZE {
            let value = board.get(row, col);
            if value > SIZE as u8 {
                return Err(Error::InvalidDigit { row, col, value });
            }
        }
    }
    Ok(())
}

/// How many cells a generated puzzle leaves blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Number of cells removed from the completed grid.
    pub fn blanks(self) -> usize {
        match self {
            Difficulty::Easy => 40,
            Difficulty::Medium => 50,
            Difficulty::Hard => 60,
        }
    }
}

/// Generate a solvable Sudoku puzzle.
///
/// Solvability follows from construction (the blanks of a completed grid
/// can always be refilled); uniqueness of that solution is not checked.
pub fn generate(difficulty: Difficulty, rng: &mut impl Rng) -> Board {
    let mut board = Board::new(SIZE);
    for start in (0..SIZE).step_by(BOX_SIZE) {
        fill_box(&mut board, start, start, rng);
    }
    let filled = fill_remaining(&mut board);
    debug_assert!(filled, "diagonal seeding always admits a completion");
    log::debug!(
        "generated full grid, removing {} cells for {:?}",
        difficulty.blanks(),
        difficulty
    );
    remove_cells(&mut board, difficulty.blanks(), rng);
    board
}

/// Fill one box with a random permutation of 1..=9.
fn fill_box(board: &mut Board, row: usize, col: usize, rng: &mut impl Rng) {
    let mut digits: Vec<u8> = (1..=SIZE as u8).collect();
    digits.shuffle(rng);
    for (k, digit) in digits.into_iter().enumerate() {
        board.set(row + k / BOX_SIZE, col + k % BOX_SIZE, digit);
    }
}

/// Complete the grid with plain backtracking over the remaining cells,
/// digits ascending — the same strategy the solver animates.
fn fill_remaining(board: &mut Board) -> bool {
    let Some(at) = find_empty(board) else {
        return true;
    };
    for num in 1..=SIZE as u8 {
        if is_valid_move(board, at.row, at.col, num) {
            let prev = board.replace(at.row, at.col, num);
            if fill_remaining(board) {
                return true;
            }
            board.replace(at.row, at.col, prev);
        }
    }
    false
}

/// Blank `count` filled cells chosen uniformly at random, retrying picks
/// that already hit an empty cell.
fn remove_cells(board: &mut Board, mut count: usize, rng: &mut impl Rng) {
    while count > 0 {
        let row = rng.random_range(0..SIZE);
        let col = rng.random_range(0..SIZE);
        if board.get(row, col) != 0 {
            board.set(row, col, 0);
            count -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use algostep_core::{collector, ignore};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn sample_puzzle() -> Board {
        Board::from_rows(&[
            vec![5, 3, 0, 0, 7, 0, 0, 0, 0],
            vec![6, 0, 0, 1, 9, 5, 0, 0, 0],
            vec![0, 9, 8, 0, 0, 0, 0, 6, 0],
            vec![8, 0, 0, 0, 6, 0, 0, 0, 3],
            vec![4, 0, 0, 8, 0, 3, 0, 0, 1],
            vec![7, 0, 0, 0, 2, 0, 0, 0, 6],
            vec![0, 6, 0, 0, 0, 0, 2, 8, 0],
            vec![0, 0, 0, 4, 1, 9, 0, 0, 5],
            vec![0, 0, 0, 0, 8, 0, 0, 7, 9],
        ])
        .unwrap()
    }

    /// Each row, column and box holds 1..=9 exactly once.
    fn assert_valid_solution(board: &Board) {
        let full: u16 = 0b11_1111_1110;
        for i in 0..SIZE {
            let mut row_mask = 0u16;
            let mut col_mask = 0u16;
            for j in 0..SIZE {
                row_mask |= 1 << board.get(i, j);
                col_mask |= 1 << board.get(j, i);
            }
            assert_eq!(row_mask, full, "row {i}");
            assert_eq!(col_mask, full, "column {i}");
        }
        for br in (0..SIZE).step_by(BOX_SIZE) {
            for bc in (0..SIZE).step_by(BOX_SIZE) {
                let mut mask = 0u16;
                for i in 0..BOX_SIZE {
                    for j in 0..BOX_SIZE {
                        mask |= 1 << board.get(br + i, bc + j);
                    }
                }
                assert_eq!(mask, full, "box ({br}, {bc})");
            }
        }
    }

    #[test]
    fn solves_sample_and_preserves_givens() {
        let puzzle = sample_puzzle();
        let solved = solve(&puzzle, ignore()).unwrap().unwrap();
        assert_valid_solution(&solved);
        for row in 0..SIZE {
            for col in 0..SIZE {
                let given = puzzle.get(row, col);
                if given != 0 {
                    assert_eq!(solved.get(row, col), given);
                }
            }
        }
    }

    #[test]
    fn contradictory_cell_exhausts() {
        // A full valid grid, then clear (0,0) and plant its digit lower in
        // the same column: the only row-compatible digit for (0,0) now
        // conflicts, so the single empty cell admits nothing.
        let solved = solve(&sample_puzzle(), ignore()).unwrap().unwrap();
        let missing = solved.get(0, 0);
        let mut broken = solved.clone();
        broken.set(0, 0, 0);
        broken.set(5, 0, missing);
        let mut steps = Vec::new();
        let result = solve(&broken, collector(&mut steps)).unwrap();
        assert!(result.is_none());
        assert_eq!(steps.last().unwrap().kind, SudokuStepKind::NoSolution);
    }

    #[test]
    fn step_sequence_shape() {
        let mut steps = Vec::new();
        solve(&sample_puzzle(), collector(&mut steps)).unwrap().unwrap();
        assert!(matches!(steps[0].kind, SudokuStepKind::TryingCell { .. }));
        assert_eq!(steps.last().unwrap().kind, SudokuStepKind::Solution);
        // Placements snapshot the digit already written.
        let placed = steps
            .iter()
            .find(|s| matches!(s.kind, SudokuStepKind::Placed { .. }))
            .unwrap();
        if let SudokuStepKind::Placed { at, num } = &placed.kind {
            assert_eq!(placed.board.get(at.row, at.col), *num);
        }
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(matches!(
            solve(&Board::new(4), ignore()),
            Err(Error::SizeOutOfRange { size: 4, .. })
        ));
        let mut bad = Board::new(SIZE);
        bad.set(2, 3, 12);
        assert_eq!(
            solve(&bad, ignore()),
            Err(Error::InvalidDigit {
                row: 2,
                col: 3,
                value: 12
            })
        );
    }

    #[test]
    fn cancellation_stops_emission() {
        let mut seen = 0usize;
        let result = solve(&sample_puzzle(), |_, _| {
            seen += 1;
            if seen == 7 { Control::Stop } else { Control::Continue }
        });
        assert_eq!(result, Err(Error::Cancelled));
        assert_eq!(seen, 7);
    }

    #[test]
    fn generated_puzzles_are_solvable() {
        let mut rng = StdRng::seed_from_u64(7);
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let puzzle = generate(difficulty, &mut rng);
            assert_eq!(puzzle.count(0), difficulty.blanks());
            let solved = solve(&puzzle, ignore()).unwrap().unwrap();
            assert_valid_solution(&solved);
        }
    }

    #[test]
    fn affected_squares_cover_constraints() {
        let affected = affected_squares(4, 4);
        assert!(affected.contains(&Square::new(4, 0)));
        assert!(affected.contains(&Square::new(0, 4)));
        assert!(affected.contains(&Square::new(3, 3)));
        assert!(!affected.contains(&Square::new(4, 4)));
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn difficulty_round_trip() {
        let json = serde_json::to_string(&Difficulty::Hard).unwrap();
        let back: Difficulty = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Difficulty::Hard);
    }
}
