#![warn(missing_docs)]
//! Module for handling bundles of rays
use log::info;
use serde::Serialize;

use crate::{
    components::OpticalComponent,
    error::{RayPlayError, RpResult},
    ray::Ray,
    tracer::{trace_through_components, TraceConfig, TraceOutcome},
    utils::Vector2D,
};

/// A bundle of [`Ray`]s.
#[derive(Debug, Default, Serialize, Clone, PartialEq)]
pub struct Rays {
    rays: Vec<Ray>,
}
impl Rays {
    /// Generate a fan of rays starting at a common point.
    ///
    /// The rays are distributed evenly over the full `opening_angle` (in radians) centred on `direction`. A single ray
    /// travels along `direction`.
    ///
    /// # Errors
    ///
    /// This function will return an error if
    ///   - `number_of_rays` is zero
    ///   - the opening angle is negative or not finite
    ///   - the direction has zero length
    pub fn new_fan(
        origin: Vector2D,
        direction: Vector2D,
        opening_angle: f64,
        number_of_rays: usize,
        trace_level: i32,
    ) -> RpResult<Self> {
        if number_of_rays == 0 {
            return Err(RayPlayError::Geometry("number of rays must be >0".into()));
        }
        if !opening_angle.is_finite() || opening_angle.is_sign_negative() {
            return Err(RayPlayError::Geometry("opening angle must be >=0.0 and finite".into()));
        }
        if direction.norm() == 0.0 {
            return Err(RayPlayError::Geometry("length of direction must be >0".into()));
        }
        let central_angle = direction.y.atan2(direction.x);
        let rays = (0..number_of_rays)
            .map(|i| {
                let angle = if number_of_rays == 1 {
                    central_angle
                } else {
                    #[allow(clippy::cast_precision_loss)]
                    let fraction = i as f64 / (number_of_rays - 1) as f64;
                    central_angle + opening_angle * (fraction - 0.5)
                };
                Ray::with_trace_level(
                    origin,
                    Vector2D::new(angle.cos(), angle.sin()),
                    trace_level,
                )
            })
            .collect();
        Ok(Self { rays })
    }
    /// Add a single [`Ray`] to this ray bundle.
    pub fn add_ray(&mut self, ray: Ray) {
        self.rays.push(ray);
    }
    /// Append the reverse twins (see [`Ray::reversed`]) of all rays currently in the bundle.
    pub fn add_reverse_twins(&mut self) {
        let twins: Vec<Ray> = self.rays.iter().map(Ray::reversed).collect();
        self.rays.extend(twins);
    }
    /// Returns the number of rays of this [`Rays`].
    #[must_use]
    pub fn nr_of_rays(&self) -> usize {
        self.rays.len()
    }
    /// Returns `true` if this bundle contains no rays.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rays.is_empty()
    }
    /// Returns an iterator over all rays.
    pub fn iter(&self) -> std::slice::Iter<'_, Ray> {
        self.rays.iter()
    }
    /// Returns the total geometric path length of all rays.
    #[must_use]
    pub fn total_path_length(&self) -> f64 {
        self.rays.iter().map(Ray::path_length).sum()
    }
    /// Trace all rays of this bundle through the given component.
    ///
    /// Returns the [`TraceOutcome`] of each ray in bundle order.
    ///
    /// # Errors
    ///
    /// This function will return an error if the [`TraceConfig`] is invalid. In this case no ray is modified.
    pub fn trace_through(
        &mut self,
        components: &dyn OpticalComponent,
        config: &TraceConfig,
    ) -> RpResult<Vec<TraceOutcome>> {
        config.validate()?;
        info!(
            "Tracing {} rays through '{}'",
            self.rays.len(),
            components.name()
        );
        self.rays
            .iter_mut()
            .map(|ray| trace_through_components(ray, components, config))
            .collect()
    }
}
impl From<Vec<Ray>> for Rays {
    fn from(rays: Vec<Ray>) -> Self {
        Self { rays }
    }
}
impl<'a> IntoIterator for &'a Rays {
    type Item = &'a Ray;
    type IntoIter = std::slice::Iter<'a, Ray>;

    fn into_iter(self) -> Self::IntoIter {
        self.rays.iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        components::{ComponentCollection, IdealThinLens},
        tracer::{Circle, EscapePolicy},
    };
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;
    use std::f64::consts::FRAC_PI_2;
    #[test]
    fn default() {
        let rays = Rays::default();
        assert!(rays.is_empty());
        assert_eq!(rays.nr_of_rays(), 0);
    }
    #[test]
    fn new_fan() {
        let rays = Rays::new_fan(Vector2D::zeros(), Vector2D::x(), FRAC_PI_2, 3, 10).unwrap();
        assert_eq!(rays.nr_of_rays(), 3);
        let directions: Vec<Vector2D> = rays.iter().map(Ray::direction).collect();
        let s = 0.5_f64.sqrt();
        assert_abs_diff_eq!(directions[0], Vector2D::new(s, -s), epsilon = 1e-12);
        assert_abs_diff_eq!(directions[1], Vector2D::x(), epsilon = 1e-12);
        assert_abs_diff_eq!(directions[2], Vector2D::new(s, s), epsilon = 1e-12);
        assert!(rays.iter().all(|r| r.trace_level() == 10));
    }
    #[test]
    fn new_fan_single_ray() {
        let rays = Rays::new_fan(Vector2D::zeros(), Vector2D::y(), 1.0, 1, 10).unwrap();
        assert_abs_diff_eq!(
            rays.iter().next().unwrap().direction(),
            Vector2D::y(),
            epsilon = 1e-12
        );
    }
    #[test]
    fn new_fan_wrong_params() {
        assert!(Rays::new_fan(Vector2D::zeros(), Vector2D::x(), 1.0, 0, 10).is_err());
        assert!(Rays::new_fan(Vector2D::zeros(), Vector2D::x(), -1.0, 3, 10).is_err());
        assert!(Rays::new_fan(Vector2D::zeros(), Vector2D::x(), f64::NAN, 3, 10).is_err());
        assert_matches!(
            Rays::new_fan(Vector2D::zeros(), Vector2D::zeros(), 1.0, 3, 10),
            Err(RayPlayError::Geometry(_))
        );
    }
    #[test]
    fn reverse_twins() {
        let mut rays = Rays::from(vec![Ray::new(Vector2D::zeros(), Vector2D::x())]);
        rays.add_reverse_twins();
        assert_eq!(rays.nr_of_rays(), 2);
        let twin = rays.iter().nth(1).unwrap();
        assert!(twin.is_reverse());
        assert_eq!(twin.direction(), Vector2D::new(-1.0, 0.0));
    }
    #[test]
    fn trace_through() {
        let mut c = ComponentCollection::default();
        c.add(IdealThinLens::centred(
            "L",
            Vector2D::new(0.0, -1.0),
            Vector2D::new(0.0, 1.0),
            0.5,
        ));
        let mut rays = Rays::default();
        rays.add_ray(Ray::new(Vector2D::new(-1.0, 0.5), Vector2D::x()));
        rays.add_ray(Ray::new(Vector2D::new(-1.0, 2.0), Vector2D::x()));
        let config = TraceConfig::with_boundary(&Circle::new(Vector2D::zeros(), 3.0));
        let outcomes = rays.trace_through(&c, &config).unwrap();
        assert_eq!(outcomes, vec![TraceOutcome::Escaped, TraceOutcome::Escaped]);
        let lengths: Vec<usize> = rays.iter().map(|r| r.trajectory().len()).collect();
        assert_eq!(lengths, vec![3, 2]);
        assert!(rays.total_path_length() > 0.0);
    }
    #[test]
    fn trace_through_invalid_config() {
        let mut rays = Rays::from(vec![Ray::new(Vector2D::zeros(), Vector2D::x())]);
        let mut config = TraceConfig::default();
        config.set_escape(EscapePolicy::FixedDistance(0.0));
        assert!(rays
            .trace_through(&ComponentCollection::default(), &config)
            .is_err());
        assert_eq!(rays.iter().next().unwrap().trajectory().len(), 1);
    }
}
