//! Two-dimensional vector helpers and intersection primitives.
//!
//! Points and directions are both represented as [`Vector2D`]. None of the functions in this module check their
//! input: a zero-length vector normalizes to `NaN` components and parallel or non-intersecting geometry is reported
//! as `None`.
use nalgebra::Vector2;

/// A point or direction in the plane.
pub type Vector2D = Vector2<f64>;

/// Returns the unit vector pointing along `v`.
///
/// A zero vector yields `NaN` components.
#[must_use]
pub fn normalize(v: &Vector2D) -> Vector2D {
    v / v.norm()
}

/// Returns `v` rotated by +90°.
#[must_use]
pub fn perpendicular(v: &Vector2D) -> Vector2D {
    Vector2D::new(-v.y, v.x)
}

/// Euclidean distance between two points.
#[must_use]
pub fn distance(a: &Vector2D, b: &Vector2D) -> f64 {
    (b - a).norm()
}

/// z-component of the 3D cross product of two plane vectors.
#[must_use]
pub fn cross(a: &Vector2D, b: &Vector2D) -> f64 {
    a.x.mul_add(b.y, -(a.y * b.x))
}

/// Returns `point + direction * t`.
#[must_use]
pub fn point_on_line(point: &Vector2D, direction: &Vector2D, t: f64) -> Vector2D {
    point + direction * t
}

/// Intersect the lines `p1 + t1*d1` and `p2 + t2*d2`.
///
/// Returns the line parameters `(t1, t2)` of the intersection point or `None` if the lines are parallel.
#[must_use]
pub fn line_line_intersection(
    p1: &Vector2D,
    d1: &Vector2D,
    p2: &Vector2D,
    d2: &Vector2D,
) -> Option<(f64, f64)> {
    let denominator = cross(d1, d2);
    if denominator.abs() <= f64::EPSILON * d1.norm() * d2.norm() {
        return None;
    }
    let delta = p2 - p1;
    Some((cross(&delta, d2) / denominator, cross(&delta, d1) / denominator))
}

/// Intersect the line `point + t*direction` with a circle.
///
/// Returns both line parameters `(t1, t2)` with `t1 <= t2` (identical for a tangent line) or `None` if the line misses
/// the circle. The parameters are in units of `|direction|`.
#[must_use]
pub fn line_circle_intersection(
    point: &Vector2D,
    direction: &Vector2D,
    centre: &Vector2D,
    radius: f64,
) -> Option<(f64, f64)> {
    // |point + t*direction - centre|^2 = radius^2
    let offset = point - centre;
    let a = direction.norm_squared();
    let b = 2.0 * direction.dot(&offset);
    let c = radius.mul_add(-radius, offset.norm_squared());
    let discriminant = b.mul_add(b, -4.0 * a * c);
    if discriminant < 0.0 || a == 0.0 {
        return None;
    }
    let root = discriminant.sqrt();
    let t1 = (-b - root) / (2.0 * a);
    let t2 = (-b + root) / (2.0 * a);
    Some((t1.min(t2), t1.max(t2)))
}
