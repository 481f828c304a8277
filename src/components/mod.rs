#![warn(missing_docs)]
//! Optical components a [`Ray`] can interact with.
//!
//! All components implement the [`OpticalComponent`] trait. Simple components (such as an [`IdealThinLens`]) compute
//! their own intersection with a ray while a [`ComponentCollection`] searches its children for the nearest one.
use std::fmt::Debug;

use uuid::Uuid;

use crate::{
    ray::Ray,
    utils::{
        geom2d::{distance, line_line_intersection, point_on_line},
        Vector2D,
    },
};

mod component_collection;
mod flat_mirror;
mod ideal_thin_lens;

pub use component_collection::ComponentCollection;
pub use flat_mirror::FlatMirror;
pub use ideal_thin_lens::IdealThinLens;

/// The result of an intersection search: the component which was hit and the intersection point.
#[derive(Debug, Clone, Copy)]
pub struct RayComponentIntersection<'a> {
    /// the (simple) component hit by the ray
    pub component: &'a dyn OpticalComponent,
    /// the intersection point
    pub point: Vector2D,
}
impl<'a> RayComponentIntersection<'a> {
    /// Creates a new [`RayComponentIntersection`].
    #[must_use]
    pub fn new(component: &'a dyn OpticalComponent, point: Vector2D) -> Self {
        Self { component, point }
    }
    /// Returns the distance of the intersection point from the start point of the given [`Ray`].
    #[must_use]
    pub fn distance_from(&self, ray: &Ray) -> f64 {
        distance(&ray.start_point(), &self.point)
    }
}

/// Common interface of all optical components.
///
/// A component is identified by its [`Uuid`]. Identity, not geometric equality, is used to exclude the most recently
/// hit component from the next intersection search.
pub trait OpticalComponent: Debug {
    /// Returns the unique identifier of this component.
    fn id(&self) -> Uuid;
    /// Returns the name of this component.
    fn name(&self) -> &str;
    /// Find the intersection of the given [`Ray`] with this component.
    ///
    /// If `forward_only` is set, only intersections in front of the ray start point are considered. The component
    /// with the id `last_hit` (if any) must not be reported. The function returns `None` if there is no intersection.
    fn calculate_intersection(
        &self,
        ray: &Ray,
        forward_only: bool,
        last_hit: Option<Uuid>,
    ) -> Option<RayComponentIntersection<'_>>;
    /// Let the [`Ray`] interact with this component at the given intersection.
    ///
    /// Implementations start a new segment of the ray at the intersection point (see [`Ray::start_next_segment`]).
    fn step_through(&self, ray: &mut Ray, intersection: &RayComponentIntersection<'_>);
}

/// Find the intersection nearest to the start point of `ray` among the given components.
///
/// The component with the id `last_hit` is skipped and the exclusion is passed on to all components. The comparison
/// is strict: on equal distances the component scanned first wins.
pub fn nearest_intersection<'a>(
    components: impl IntoIterator<Item = &'a dyn OpticalComponent>,
    ray: &Ray,
    forward_only: bool,
    last_hit: Option<Uuid>,
) -> Option<RayComponentIntersection<'a>> {
    let mut closest: Option<(RayComponentIntersection<'a>, f64)> = None;
    for component in components {
        if last_hit == Some(component.id()) {
            continue;
        }
        if let Some(intersection) = component.calculate_intersection(ray, forward_only, last_hit) {
            let distance = intersection.distance_from(ray);
            if closest
                .as_ref()
                .map_or(true, |(_, min_distance)| distance < *min_distance)
            {
                closest = Some((intersection, distance));
            }
        }
    }
    closest.map(|(intersection, _)| intersection)
}

/// Intersect a [`Ray`] with the line segment between `end_point_1` and `end_point_2` (both inclusive).
///
/// Returns the intersection point or `None` if the ray misses the segment, runs parallel to it or, for
/// `forward_only`, the intersection lies behind the ray start point.
pub(crate) fn intersect_segment(
    ray: &Ray,
    end_point_1: &Vector2D,
    end_point_2: &Vector2D,
    forward_only: bool,
) -> Option<Vector2D> {
    let segment = end_point_2 - end_point_1;
    let (t_ray, t_segment) =
        line_line_intersection(&ray.start_point(), &ray.direction(), end_point_1, &segment)?;
    if !(0.0..=1.0).contains(&t_segment) {
        return None;
    }
    if forward_only && t_ray <= 0.0 {
        return None;
    }
    Some(point_on_line(&ray.start_point(), &ray.direction(), t_ray))
}
