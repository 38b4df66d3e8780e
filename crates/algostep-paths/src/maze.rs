//! Maze generation by randomized depth-first backtracking.

use algostep_core::{Error, Point};
use rand::Rng;

use crate::grid::{Cell, Grid};

/// Carve a maze into an all-walls grid of the given size.
///
/// Works on a virtual grid at twice the logical resolution: carving always
/// jumps two cells, knocking out the wall in between, so walls one cell
/// thick survive between corridors. Starting from (1, 1), a random
/// unvisited cell two away is carved and pushed; when none remains the
/// walk backtracks. The result is a perfect maze on the logical
/// half-resolution grid — exactly one path between any two carved cells.
///
/// Odd dimensions give the usual fully-walled border; both must be at
/// least 3.
pub fn generate_maze(width: i32, height: i32, rng: &mut impl Rng) -> Result<Grid, Error> {
    if width < 3 || height < 3 {
        return Err(Error::GridTooSmall { width, height });
    }

    let mut grid = Grid::new(width, height);
    grid.fill(Cell::Wall);

    let start = Point::new(1, 1);
    let mut visited = vec![false; (width * height) as usize];
    let mut stack = vec![start];
    visited[grid.idx(start)] = true;
    grid.set(start, Cell::Empty);

    let mut candidates = Vec::with_capacity(4);
    while let Some(&current) = stack.last() {
        candidates.clear();
        for next in [
            current.shift(0, -2),
            current.shift(0, 2),
            current.shift(-2, 0),
            current.shift(2, 0),
        ] {
            let interior = next.x > 0 && next.x < width - 1 && next.y > 0 && next.y < height - 1;
            if interior && !visited[grid.idx(next)] {
                candidates.push(next);
            }
        }

        if candidates.is_empty() {
            stack.pop();
            continue;
        }

        let next = candidates[rng.random_range(0..candidates.len())];
        let wall = Point::new((current.x + next.x) / 2, (current.y + next.y) / 2);
        grid.set(wall, Cell::Empty);
        grid.set(next, Cell::Empty);
        visited[grid.idx(next)] = true;
        stack.push(next);
    }

    log::debug!(
        "carved {} floor cells in a {width}x{height} maze",
        grid.count(Cell::Empty)
    );
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// Flood-fill floor cells from (1, 1).
    fn reachable_floors(grid: &Grid) -> usize {
        let mut seen = vec![false; (grid.width() * grid.height()) as usize];
        let mut stack = vec![Point::new(1, 1)];
        seen[grid.idx(Point::new(1, 1))] = true;
        let mut count = 0;
        while let Some(p) = stack.pop() {
            count += 1;
            for n in p.neighbors_4() {
                if grid.walkable(n) && !seen[grid.idx(n)] {
                    seen[grid.idx(n)] = true;
                    stack.push(n);
                }
            }
        }
        count
    }

    #[test]
    fn maze_is_fully_connected() {
        let mut rng = StdRng::seed_from_u64(42);
        let grid = generate_maze(21, 21, &mut rng).unwrap();
        assert_eq!(reachable_floors(&grid), grid.count(Cell::Empty));
    }

    #[test]
    fn border_stays_walled() {
        let mut rng = StdRng::seed_from_u64(1);
        let grid = generate_maze(15, 11, &mut rng).unwrap();
        for x in 0..grid.width() {
            assert_eq!(grid.at(Point::new(x, 0)), Some(Cell::Wall));
            assert_eq!(grid.at(Point::new(x, grid.height() - 1)), Some(Cell::Wall));
        }
        for y in 0..grid.height() {
            assert_eq!(grid.at(Point::new(0, y)), Some(Cell::Wall));
            assert_eq!(grid.at(Point::new(grid.width() - 1, y)), Some(Cell::Wall));
        }
    }

    #[test]
    fn no_two_by_two_open_block() {
        // Two-cell carving never opens a full 2x2 area on odd dimensions.
        let mut rng = StdRng::seed_from_u64(7);
        let grid = generate_maze(21, 17, &mut rng).unwrap();
        for y in 0..grid.height() - 1 {
            for x in 0..grid.width() - 1 {
                let open = [
                    Point::new(x, y),
                    Point::new(x + 1, y),
                    Point::new(x, y + 1),
                    Point::new(x + 1, y + 1),
                ]
                .iter()
                .all(|&p| grid.walkable(p));
                assert!(!open, "2x2 open block at ({x}, {y})");
            }
        }
    }

    #[test]
    fn maze_is_solvable() {
        let mut rng = StdRng::seed_from_u64(3);
        let grid = generate_maze(19, 19, &mut rng).unwrap();
        let report = crate::dijkstra(
            &grid,
            Point::new(1, 1),
            Point::new(17, 17),
            algostep_core::ignore(),
        )
        .unwrap();
        assert!(report.success());
    }

    #[test]
    fn too_small_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            generate_maze(2, 9, &mut rng).unwrap_err(),
            Error::GridTooSmall {
                width: 2,
                height: 9
            }
        );
    }
}
