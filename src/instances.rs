//! This module provides point sets commonly used to exercise the engine.
//!
//! These make it easy to start using `tourga` without wiring up a data source:
//! ```
//! let points = tourga::instances::regular_polygon(12, 10.0);
//! assert_eq!(points.len(), 12);
//! ```

use crate::core::{Point, PointSet};
use rand::Rng;
use std::f64::consts::PI;

/// Four corners of the unit square: `A = (0, 0)` is the anchor, followed by
/// `B = (0, 1)`, `C = (1, 1)` and `D = (1, 0)`. The shortest tour costs 4.
#[must_use]
pub fn unit_square() -> PointSet {
    square(1.0)
}

fn square(side: f64) -> PointSet {
    from_parts(
        Point::new("A", 0.0, 0.0),
        vec![
            Point::new("B", 0.0, side),
            Point::new("C", side, side),
            Point::new("D", side, 0.0),
        ],
    )
}

/// `n` points evenly spaced on a circle of the given radius, anchor first.
///
/// The shortest tour follows the perimeter, see [`polygon_perimeter`].
///
/// # Panics
/// Panics when `n < 2`.
#[must_use]
pub fn regular_polygon(n: usize, radius: f64) -> PointSet {
    assert!(n >= 2, "a polygon needs at least two vertices");
    #[allow(clippy::cast_precision_loss)]
    let step = 2.0 * PI / n as f64;
    let vertex = |idx: usize| {
        #[allow(clippy::cast_precision_loss)]
        let angle = step * idx as f64;
        Point::new(format!("P{idx}"), radius * angle.cos(), radius * angle.sin())
    };
    from_parts(vertex(0), (1..n).map(vertex).collect())
}

/// Length of the optimal tour over [`regular_polygon`]`(n, radius)`.
#[must_use]
pub fn polygon_perimeter(n: usize, radius: f64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let n = n as f64;
    2.0 * n * radius * (PI / n).sin()
}

/// `n` points drawn uniformly from a `side x side` square, anchor first.
///
/// # Panics
/// Panics when `n < 2`.
pub fn random_uniform<R: Rng + ?Sized>(n: usize, side: f64, rng: &mut R) -> PointSet {
    assert!(n >= 2, "a tour needs at least two points");
    let mut draw = |idx: usize| {
        Point::new(
            format!("R{idx}"),
            rng.gen_range(0.0..=side),
            rng.gen_range(0.0..=side),
        )
    };
    let anchor = draw(0);
    let others = (1..n).map(draw).collect();
    from_parts(anchor, others)
}

fn from_parts(anchor: Point, others: Vec<Point>) -> PointSet {
    match PointSet::new(anchor, others) {
        Ok(points) => points,
        Err(err) => unreachable!("built-in instance is invalid: {err}"),
    }
}
