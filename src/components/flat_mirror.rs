#![warn(missing_docs)]
//! A flat, perfectly reflecting mirror
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

/// A flat mirror occupying the straight segment between two end points.
///
/// Both sides of the mirror reflect.
#[derive(Debug, Clone)]
pub struct FlatMirror {
    id: Uuid,
    name: String,
    end_point_1: PointRef,
    end_point_2: PointRef,
}
impl FlatMirror {
    /// Creates a new [`FlatMirror`].
    #[must_use]
    pub fn new(name: &str, end_point_1: PointRef, end_point_2: PointRef) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            end_point_1,
            end_point_2,
        }
    }
    /// Returns the end points of this [`FlatMirror`].
    #[must_use]
    pub const fn end_points(&self) -> (&PointRef, &PointRef) {
        (&self.end_point_1, &self.end_point_2)
    }
    /// Returns the reflected direction for the given incoming direction.
    #[must_use]
    pub fn reflected_direction(&self, direction: &Vector2D) -> Vector2D {
        let normal = normalize(&perpendicular(
            &(self.end_point_2.get() - self.end_point_1.get()),
        ));
        direction - 2.0 * direction.dot(&normal) * normal
    }
}
impl OpticalComponent for FlatMirror {
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
        let new_direction = self.reflected_direction(&ray.direction());
        ray.start_next_segment(intersection.point, new_direction);
    }
}
