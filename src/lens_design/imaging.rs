//! Imaging by a single ideal thin lens.
//!
//! The lens is described by its principal point, a unit normal pointing from the object side to the image side and
//! its focal length. Distances along the normal are signed: object points in front of the lens have a negative
//! distance.
use crate::utils::Vector2D;

/// Returns the image of `object` formed by an ideal thin lens.
///
/// The image lies on the line through `object` and the principal point (undeviated chief ray) at
/// `P + (X - P) * f / (f + (X - P)·n)`. Objects in the front focal plane are imaged to infinity (the result has
/// infinite or `NaN` components).
#[must_use]
pub fn image_point(
    principal_point: &Vector2D,
    normal: &Vector2D,
    focal_length: f64,
    object: &Vector2D,
) -> Vector2D {
    let offset = object - principal_point;
    let u = offset.dot(normal);
    principal_point + offset * (focal_length / (focal_length + u))
}

/// Returns the focal length an ideal thin lens needs to image `object` onto `image`.
///
/// Only the (signed) distances of both points from the lens plane, measured along `normal`, are used, such that
/// `1/f = 1/u' - 1/u`. If `object` and `image` are equally far from the lens plane the result is infinite or `NaN`.
#[must_use]
pub fn focal_length_for_imaging(
    principal_point: &Vector2D,
    normal: &Vector2D,
    object: &Vector2D,
    image: &Vector2D,
) -> f64 {
    let u = (object - principal_point).dot(normal);
    let u_image = (image - principal_point).dot(normal);
    u * u_image / (u - u_image)
}

/// Orient a lens normal such that `object` lies on the incident side of the lens.
///
/// Returns `normal` or `-normal` such that `(object - principal_point)·n <= 0`. Both imaging functions of this module
/// expect the normal pointing from the object side to the image side.
#[must_use]
pub fn normal_towards_image_side(
    principal_point: &Vector2D,
    normal: &Vector2D,
    object: &Vector2D,
) -> Vector2D {
    if (object - principal_point).dot(normal) > 0.0 {
        -normal
    } else {
        *normal
    }
}
