//! Euclidean cost model for points and tours.

use super::{Genome, Point, PointSet};

/// Straight-line distance between two points.
///
/// # Examples
/// ```
/// use tourga::{distance, Point};
/// let a = Point::new("a", 0.0, 0.0);
/// let b = Point::new("b", 3.0, 4.0);
/// assert_eq!(distance(&a, &b), 5.0);
/// ```
#[must_use]
pub fn distance(a: &Point, b: &Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Total cost of a closed tour.
///
/// Sums every edge between consecutive positions and then adds the edge from
/// the last position back to the first. With the anchor stored at both ends
/// that closing edge has zero length, so the result equals the length of the
/// cycle.
///
/// # Examples
/// ```
/// use tourga::{tour_cost, instances, Genome};
/// let points = instances::unit_square();
/// let tour = Genome::new(vec![0, 1, 2, 3, 0], points.len()).unwrap();
/// assert!((tour_cost(&tour, &points) - 4.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn tour_cost(genome: &Genome, points: &PointSet) -> f64 {
    route_cost(genome.indices(), points)
}

pub(crate) fn route_cost(route: &[usize], points: &PointSet) -> f64 {
    let (first, last) = match (route.first(), route.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return 0.0,
    };
    let open: f64 = route
        .windows(2)
        .map(|edge| distance(&points[edge[0]], &points[edge[1]]))
        .sum();
    open + distance(&points[last], &points[first])
}
