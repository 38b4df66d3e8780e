//! Dijkstra and A* over a [`Grid`], with step emission.
//!
//! Both searches share one engine: pop the lowest-priority unvisited cell,
//! mark it visited, and relax its 4-way neighbours at uniform cost 1. They
//! differ only in frontier priority — accumulated distance for Dijkstra,
//! distance plus the Manhattan heuristic for A*. The heuristic feeds the
//! priority only; stored distances are always plain g-scores, which is why
//! both report identical shortest-path lengths.

use algostep_core::{Control, Error, Point, Tracer};

use crate::distance::manhattan;
use crate::frontier::Frontier;
use crate::grid::Grid;

/// Sentinel distance meaning "not reached".
pub const UNREACHABLE: i32 = i32::MAX;

/// Which search produced a step or report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    Dijkstra,
    AStar,
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Algorithm::Dijkstra => f.write_str("Dijkstra"),
            Algorithm::AStar => f.write_str("A*"),
        }
    }
}

/// What happened at one point of the search.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum SearchStepKind {
    /// A cell was popped and marked visited. `priority` is the frontier key
    /// it was popped with (equals `distance` for Dijkstra).
    Visiting {
        at: Point,
        distance: i32,
        priority: i32,
    },
    /// A neighbour's best-known distance improved.
    Updating {
        from: Point,
        to: Point,
        distance: i32,
        priority: i32,
    },
    /// The goal was reached; `path` runs from start to goal inclusive.
    PathFound { path: Vec<Point>, distance: i32 },
    /// The frontier emptied without reaching the goal.
    NoPath,
}

/// One step of a grid search, with the visited set as of that instant.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStep {
    pub algorithm: Algorithm,
    pub kind: SearchStepKind,
    /// Visited cells in visitation order, snapshotted at emission.
    pub visited: Vec<Point>,
    pub message: String,
}

/// Summary of a finished (or exhausted) search.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchReport {
    pub algorithm: Algorithm,
    /// Start-to-goal path, or `None` when no path exists.
    pub path: Option<Vec<Point>>,
    /// Shortest distance to the goal, or [`UNREACHABLE`].
    pub distance: i32,
    /// Cells popped and visited.
    pub nodes_visited: usize,
    /// Steps emitted.
    pub steps: usize,
}

impl SearchReport {
    /// Whether a path was found.
    pub fn success(&self) -> bool {
        self.path.is_some()
    }
}

/// Dijkstra's algorithm: frontier ordered by accumulated distance.
pub fn dijkstra(
    grid: &Grid,
    start: Point,
    goal: Point,
    sink: impl FnMut(SearchStep, usize) -> Control,
) -> Result<SearchReport, Error> {
    search(grid, start, goal, Algorithm::Dijkstra, sink)
}

/// A* search: frontier ordered by distance plus Manhattan estimate.
pub fn astar(
    grid: &Grid,
    start: Point,
    goal: Point,
    sink: impl FnMut(SearchStep, usize) -> Control,
) -> Result<SearchReport, Error> {
    search(grid, start, goal, Algorithm::AStar, sink)
}

fn search(
    grid: &Grid,
    start: Point,
    goal: Point,
    algorithm: Algorithm,
    sink: impl FnMut(SearchStep, usize) -> Control,
) -> Result<SearchReport, Error> {
    for p in [start, goal] {
        if !grid.contains(p) {
            return Err(Error::OutOfBounds(p));
        }
        if !grid.walkable(p) {
            return Err(Error::Blocked(p));
        }
    }

    let estimate = |p: Point| match algorithm {
        Algorithm::Dijkstra => 0,
        Algorithm::AStar => manhattan(p, goal),
    };

    let len = grid.len();
    let mut dist = vec![UNREACHABLE; len];
    let mut parent = vec![usize::MAX; len];
    let mut visited = vec![false; len];
    let mut visit_order: Vec<Point> = Vec::new();
    let mut frontier = Frontier::new();
    let mut tracer = Tracer::new(sink);
    let mut nbuf = Vec::with_capacity(4);
    let mut nodes_visited = 0usize;

    dist[grid.idx(start)] = 0;
    frontier.push(start, estimate(start));

    while let Some((current, priority)) = frontier.pop() {
        let ci = grid.idx(current);
        if visited[ci] {
            continue;
        }
        visited[ci] = true;
        visit_order.push(current);
        nodes_visited += 1;
        let d = dist[ci];

        tracer.emit(SearchStep {
            algorithm,
            kind: SearchStepKind::Visiting {
                at: current,
                distance: d,
                priority,
            },
            visited: visit_order.clone(),
            message: match algorithm {
                Algorithm::Dijkstra => format!("Visiting {current} at distance {d}"),
                Algorithm::AStar => format!("Visiting {current} with f(n) = {priority}"),
            },
        })?;

        if current == goal {
            let path = reconstruct(grid, &parent, start, goal);
            tracer.emit(SearchStep {
                algorithm,
                kind: SearchStepKind::PathFound {
                    path: path.clone(),
                    distance: d,
                },
                visited: visit_order.clone(),
                message: format!(
                    "Path found: length {}, {} nodes visited",
                    path.len() - 1,
                    nodes_visited
                ),
            })?;
            log::debug!("{algorithm} reached {goal} at distance {d}, {nodes_visited} visited");
            return Ok(SearchReport {
                algorithm,
                path: Some(path),
                distance: d,
                nodes_visited,
                steps: tracer.emitted(),
            });
        }

        grid.neighbors(current, &mut nbuf);
        for i in 0..nbuf.len() {
            let next = nbuf[i];
            let ni = grid.idx(next);
            if visited[ni] {
                continue;
            }
            let nd = d + 1;
            if nd < dist[ni] {
                dist[ni] = nd;
                parent[ni] = ci;
                let np = nd + estimate(next);
                frontier.push(next, np);
                tracer.emit(SearchStep {
                    algorithm,
                    kind: SearchStepKind::Updating {
                        from: current,
                        to: next,
                        distance: nd,
                        priority: np,
                    },
                    visited: visit_order.clone(),
                    message: match algorithm {
                        Algorithm::Dijkstra => {
                            format!("Updated distance to {next}: {nd}")
                        }
                        Algorithm::AStar => format!("Updated f(n) for {next}: {np}"),
                    },
                })?;
            }
        }
    }

    tracer.emit(SearchStep {
        algorithm,
        kind: SearchStepKind::NoPath,
        visited: visit_order,
        message: "No path found to the destination".to_string(),
    })?;
    Ok(SearchReport {
        algorithm,
        path: None,
        distance: UNREACHABLE,
        nodes_visited,
        steps: tracer.emitted(),
    })
}

/// Walk parent pointers from goal back to start and reverse.
fn reconstruct(grid: &Grid, parent: &[usize], start: Point, goal: Point) -> Vec<Point> {
    let mut path = Vec::new();
    let mut ci = grid.idx(goal);
    let si = grid.idx(start);
    loop {
        path.push(grid.point(ci));
        if ci == si {
            break;
        }
        ci = parent[ci];
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use algostep_core::{collector, ignore};

    fn open_grid() -> Grid {
        Grid::from_ascii(
            "......\n\
             ......\n\
             ......\n\
             ......\n\
             ......",
        )
        .unwrap()
    }

    fn walled_grid() -> Grid {
        // A wall with a single gap forces a detour.
        Grid::from_ascii(
            "......\n\
             .####.\n\
             ......\n\
             .####.\n\
             ......",
        )
        .unwrap()
    }

    fn assert_path_contiguous(path: &[Point], start: Point, goal: Point, distance: i32) {
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&goal));
        assert_eq!(path.len() as i32, distance + 1);
        for pair in path.windows(2) {
            assert_eq!(manhattan(pair[0], pair[1]), 1);
        }
    }

    #[test]
    fn dijkstra_straight_line() {
        let grid = open_grid();
        let (start, goal) = (Point::new(0, 0), Point::new(5, 0));
        let report = dijkstra(&grid, start, goal, ignore()).unwrap();
        assert!(report.success());
        assert_eq!(report.distance, 5);
        assert_path_contiguous(report.path.as_ref().unwrap(), start, goal, 5);
    }

    #[test]
    fn both_algorithms_agree_on_distance() {
        let grid = walled_grid();
        let (start, goal) = (Point::new(0, 0), Point::new(5, 4));
        let d = dijkstra(&grid, start, goal, ignore()).unwrap();
        let a = astar(&grid, start, goal, ignore()).unwrap();
        assert!(d.success() && a.success());
        assert_eq!(d.distance, a.distance);
        assert_path_contiguous(d.path.as_ref().unwrap(), start, goal, d.distance);
        assert_path_contiguous(a.path.as_ref().unwrap(), start, goal, a.distance);
    }

    #[test]
    fn astar_visits_no_more_than_dijkstra() {
        let grid = walled_grid();
        let (start, goal) = (Point::new(0, 0), Point::new(5, 4));
        let d = dijkstra(&grid, start, goal, ignore()).unwrap();
        let a = astar(&grid, start, goal, ignore()).unwrap();
        assert!(a.nodes_visited <= d.nodes_visited);
    }

    #[test]
    fn no_path_reports_exhaustion() {
        let grid = Grid::from_ascii(
            ".#.\n\
             .#.\n\
             .#.",
        )
        .unwrap();
        let mut steps = Vec::new();
        let report = dijkstra(
            &grid,
            Point::new(0, 0),
            Point::new(2, 0),
            collector(&mut steps),
        )
        .unwrap();
        assert!(!report.success());
        assert_eq!(report.distance, UNREACHABLE);
        assert_eq!(steps.last().unwrap().kind, SearchStepKind::NoPath);
        assert_eq!(report.steps, steps.len());
    }

    #[test]
    fn endpoints_validated_before_search() {
        let grid = walled_grid();
        assert_eq!(
            dijkstra(&grid, Point::new(-1, 0), Point::new(1, 0), ignore()),
            Err(Error::OutOfBounds(Point::new(-1, 0)))
        );
        assert_eq!(
            astar(&grid, Point::new(0, 0), Point::new(1, 1), ignore()),
            Err(Error::Blocked(Point::new(1, 1)))
        );
    }

    #[test]
    fn step_sequence_shape() {
        let grid = open_grid();
        let mut steps = Vec::new();
        let report = dijkstra(
            &grid,
            Point::new(0, 0),
            Point::new(2, 0),
            collector(&mut steps),
        )
        .unwrap();
        assert!(matches!(
            steps[0].kind,
            SearchStepKind::Visiting { distance: 0, .. }
        ));
        assert!(matches!(
            steps.last().unwrap().kind,
            SearchStepKind::PathFound { .. }
        ));
        // The visited snapshot grows monotonically.
        for pair in steps.windows(2) {
            assert!(pair[0].visited.len() <= pair[1].visited.len());
        }
        assert_eq!(report.steps, steps.len());
    }

    #[test]
    fn cancellation_stops_emission() {
        let grid = open_grid();
        let mut seen = 0usize;
        let result = dijkstra(&grid, Point::new(0, 0), Point::new(5, 4), |_, _| {
            seen += 1;
            if seen == 4 { Control::Stop } else { Control::Continue }
        });
        assert_eq!(result, Err(Error::Cancelled));
        assert_eq!(seen, 4);
    }

    #[test]
    fn start_equals_goal() {
        let grid = open_grid();
        let p = Point::new(2, 2);
        let report = astar(&grid, p, p, ignore()).unwrap();
        assert_eq!(report.distance, 0);
        assert_eq!(report.path, Some(vec![p]));
        assert_eq!(report.nodes_visited, 1);
    }
}
