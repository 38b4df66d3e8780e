use algostep_core::Point;

/// Manhattan (L1) distance between two points.
///
/// Never overestimates the true path cost on a 4-connected grid with unit
/// edges, which makes it an admissible A* heuristic there.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_distance() {
        assert_eq!(manhattan(Point::new(0, 0), Point::new(3, 4)), 7);
        assert_eq!(manhattan(Point::new(2, 2), Point::new(2, 2)), 0);
        assert_eq!(manhattan(Point::new(-1, 0), Point::new(1, 0)), 2);
    }
}
