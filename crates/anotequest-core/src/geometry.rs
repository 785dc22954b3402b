//! Coordinate helpers shared by the drag logic and the connector renderer.

use kurbo::{Point, QuadBez};

/// Grid size for snapping committed positions.
pub const DEFAULT_GRID_SIZE: f64 = 10.0;

/// Fraction of the smaller axis span used to bow connector curves.
pub const DEFAULT_CURVATURE_FACTOR: f64 = 0.3;

/// Tolerance used when checking grid alignment.
const GRID_ALIGN_EPSILON: f64 = 1e-9;

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    (b - a).hypot()
}

/// Snap a point to the nearest grid intersection.
///
/// Halfway values round away from zero, so `(15, -15)` on a grid of 10
/// becomes `(20, -20)`.
pub fn snap_to_grid(point: Point, grid_size: f64) -> Point {
    Point::new(
        (point.x / grid_size).round() * grid_size,
        (point.y / grid_size).round() * grid_size,
    )
}

/// Check whether both coordinates sit on a grid line.
pub fn is_grid_aligned(point: Point, grid_size: f64) -> bool {
    let on_line = |v: f64| {
        let steps = v / grid_size;
        (steps - steps.round()).abs() < GRID_ALIGN_EPSILON
    };
    on_line(point.x) && on_line(point.y)
}

/// Control point for the quadratic curve joining two connected items.
///
/// The curve bows upwards by `min(|dx|, |dy|) * factor`, so purely
/// horizontal or vertical connections stay straight.
pub fn midpoint_with_curvature(a: Point, b: Point, factor: f64) -> Point {
    let mid = a.midpoint(b);
    let delta = b - a;
    let curvature = delta.x.abs().min(delta.y.abs()) * factor;
    Point::new(mid.x, mid.y - curvature)
}

/// Quadratic connector curve from `a` to `b`.
pub fn connector_curve(a: Point, b: Point, factor: f64) -> QuadBez {
    QuadBez::new(a, midpoint_with_curvature(a, b, factor), b)
}
