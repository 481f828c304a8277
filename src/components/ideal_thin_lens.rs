#![warn(missing_docs)]
//! An ideal thin lens in the plane
use log::debug;
use uuid::Uuid;

use super::{intersect_segment, OpticalComponent, RayComponentIntersection};
use crate::{
    point_ref::PointRef,
    ray::Ray,
    utils::{
        geom2d::{normalize, perpendicular},
        Vector2D,
    },
};

/// Ideal thin lens
///
/// The lens occupies the straight segment between its two end points. It images perfectly: a ray passing through the
/// principal point is not deviated and all rays of a parallel bundle cross in the same point of the focal line. A
/// positive `focal length` corresponds to a focussing lens while a negative `focal length` represents a defocussing
/// lens. An infinite focal length makes the lens transparent.
///
/// The principal point does not need to lie between the end points but should lie on the line through them.
///
/// End points and principal point are [`PointRef`]s and may therefore be shared with other lenses or a lens device.
#[derive(Debug, Clone)]
pub struct IdealThinLens {
    id: Uuid,
    name: String,
    end_point_1: PointRef,
    end_point_2: PointRef,
    principal_point: PointRef,
    focal_length: f64,
}
impl IdealThinLens {
    /// Creates a new [`IdealThinLens`].
    #[must_use]
    pub fn new(
        name: &str,
        end_point_1: PointRef,
        end_point_2: PointRef,
        principal_point: PointRef,
        focal_length: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            end_point_1,
            end_point_2,
            principal_point,
            focal_length,
        }
    }
    /// Creates a new [`IdealThinLens`] with its principal point in the middle of the given end points.
    #[must_use]
    pub fn centred(
        name: &str,
        end_point_1: Vector2D,
        end_point_2: Vector2D,
        focal_length: f64,
    ) -> Self {
        let centre = (end_point_1 + end_point_2) / 2.0;
        Self::new(
            name,
            end_point_1.into(),
            end_point_2.into(),
            centre.into(),
            focal_length,
        )
    }
    /// Returns the focal length of this [`IdealThinLens`].
    #[must_use]
    pub const fn focal_length(&self) -> f64 {
        self.focal_length
    }
    /// Sets the focal length of this [`IdealThinLens`].
    pub fn set_focal_length(&mut self, focal_length: f64) {
        self.focal_length = focal_length;
    }
    /// Returns the end points of this [`IdealThinLens`].
    #[must_use]
    pub const fn end_points(&self) -> (&PointRef, &PointRef) {
        (&self.end_point_1, &self.end_point_2)
    }
    /// Replaces the end points of this [`IdealThinLens`].
    pub fn set_end_points(&mut self, end_point_1: PointRef, end_point_2: PointRef) {
        self.end_point_1 = end_point_1;
        self.end_point_2 = end_point_2;
    }
    /// Returns the principal point of this [`IdealThinLens`].
    #[must_use]
    pub const fn principal_point(&self) -> &PointRef {
        &self.principal_point
    }
    /// Replaces the principal point of this [`IdealThinLens`].
    pub fn set_principal_point(&mut self, principal_point: PointRef) {
        self.principal_point = principal_point;
    }
    /// Returns a unit normal of the lens plane.
    ///
    /// The normal is rotated by +90° with respect to the direction from end point 1 to end point 2.
    #[must_use]
    pub fn normal(&self) -> Vector2D {
        normalize(&perpendicular(
            &(self.end_point_2.get() - self.end_point_1.get()),
        ))
    }
    /// Calculate the direction of a ray leaving the lens.
    ///
    /// `direction` is the incoming direction and `point` the intersection point on the lens. The returned vector is
    /// not normalized.
    #[must_use]
    pub fn refracted_direction(&self, direction: &Vector2D, point: &Vector2D) -> Vector2D {
        let d_n = direction.dot(&self.normal()).abs();
        // A ray from `point` with this direction crosses the focal line in the same point as the (undeviated) ray
        // through the principal point with the incoming direction.
        direction / d_n + (self.principal_point.get() - point) / self.focal_length
    }
}
impl OpticalComponent for IdealThinLens {
    fn id(&self) -> Uuid {
        self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn calculate_intersection(
        &self,
        ray: &Ray,
        forward_only: bool,
        last_hit: Option<Uuid>,
    ) -> Option<RayComponentIntersection<'_>> {
        if last_hit == Some(self.id) {
            return None;
        }
        intersect_segment(
            ray,
            &self.end_point_1.get(),
            &self.end_point_2.get(),
            forward_only,
        )
        .map(|point| RayComponentIntersection::new(self, point))
    }
    fn step_through(&self, ray: &mut Ray, intersection: &RayComponentIntersection<'_>) {
        let new_direction = self.refracted_direction(&ray.direction(), &intersection.point);
        debug!(
            "ray refracted at lens '{}' ({}, {})",
            self.name, intersection.point.x, intersection.point.y
        );
        ray.start_next_segment(intersection.point, new_direction);
    }
}
