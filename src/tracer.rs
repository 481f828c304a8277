#![warn(missing_docs)]
//! Bounded tracing of a [`Ray`] through a network of optical components.
//!
//! The tracing loop repeatedly asks the (top-level) component for the nearest intersection, excluding the component
//! hit last, and lets the hit component step the ray. It stops as soon as the ray's trace level is used up or no
//! further intersection exists. In the latter case the ray escapes: it is advanced to an enclosing circle or, if no
//! such boundary is configured, by a fixed distance.
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    components::OpticalComponent,
    error::{RayPlayError, RpResult},
    ray::Ray,
    utils::{geom2d::line_circle_intersection, Vector2D},
};

/// Distance an escaping ray is advanced by if no enclosing circle is configured.
pub const DEFAULT_ESCAPE_DISTANCE: f64 = 100.0;

/// A circle in the plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    centre: Vector2D,
    radius: f64,
}
impl Circle {
    /// Creates a new [`Circle`].
    #[must_use]
    pub const fn new(centre: Vector2D, radius: f64) -> Self {
        Self { centre, radius }
    }
    /// Returns the centre of this [`Circle`].
    #[must_use]
    pub const fn centre(&self) -> Vector2D {
        self.centre
    }
    /// Returns the radius of this [`Circle`].
    #[must_use]
    pub const fn radius(&self) -> f64 {
        self.radius
    }
}

/// Source of the circle enclosing a scene.
///
/// Rays that do not hit any further component are terminated on this circle.
pub trait BoundaryProvider {
    /// Returns the circle enclosing all components of interest.
    fn enclosing_circle(&self) -> Circle;
}
impl BoundaryProvider for Circle {
    fn enclosing_circle(&self) -> Circle {
        *self
    }
}

/// What happens to a ray which does not hit any further component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EscapePolicy {
    /// Advance the ray up to the given circle (in forward direction only).
    EnclosingCircle(Circle),
    /// Advance the ray by a fixed distance.
    FixedDistance(f64),
}
impl Default for EscapePolicy {
    fn default() -> Self {
        Self::FixedDistance(DEFAULT_ESCAPE_DISTANCE)
    }
}
impl EscapePolicy {
    /// Create an [`EscapePolicy`] using the enclosing circle of the given [`BoundaryProvider`].
    #[must_use]
    pub fn from_provider(provider: &dyn BoundaryProvider) -> Self {
        Self::EnclosingCircle(provider.enclosing_circle())
    }
    /// Check the validity of this [`EscapePolicy`].
    ///
    /// # Errors
    ///
    /// This function will return an error if
    ///   - the circle radius is <= 0.0 or not finite.
    ///   - the circle centre is not finite.
    ///   - the fixed distance is <= 0.0 or not finite.
    pub fn validate(&self) -> RpResult<()> {
        match self {
            Self::EnclosingCircle(circle) => {
                if !circle.radius.is_finite() || circle.radius <= 0.0 {
                    return Err(RayPlayError::Trace(
                        "radius of enclosing circle must be >0.0 and finite".into(),
                    ));
                }
                if !circle.centre.x.is_finite() || !circle.centre.y.is_finite() {
                    return Err(RayPlayError::Trace(
                        "centre of enclosing circle must be finite".into(),
                    ));
                }
            }
            Self::FixedDistance(distance) => {
                if !distance.is_finite() || *distance <= 0.0 {
                    return Err(RayPlayError::Trace(
                        "escape distance must be >0.0 and finite".into(),
                    ));
                }
            }
        }
        Ok(())
    }
    /// Advance an escaping [`Ray`] according to this policy.
    ///
    /// For [`EscapePolicy::EnclosingCircle`] the ray is advanced to the farther intersection with the circle, but only
    /// if that lies in forward direction. Otherwise the ray is left unchanged.
    pub fn apply(&self, ray: &mut Ray) {
        match self {
            Self::EnclosingCircle(circle) => {
                if let Some((_, t)) = line_circle_intersection(
                    &ray.start_point(),
                    &ray.direction(),
                    &circle.centre,
                    circle.radius,
                ) {
                    if t >= 0.0 {
                        ray.advance(t);
                    }
                }
            }
            Self::FixedDistance(distance) => ray.advance(*distance),
        }
    }
}

/// Configuration data for tracing a ray.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraceConfig {
    #[serde(default = "default_forward_only")]
    forward_only: bool,
    #[serde(default)]
    escape: EscapePolicy,
}
const fn default_forward_only() -> bool {
    true
}
impl Default for TraceConfig {
    /// Create a default config with the following parameters:
    ///   - only forward intersections are considered
    ///   - escaping rays are advanced by [`DEFAULT_ESCAPE_DISTANCE`]
    fn default() -> Self {
        Self {
            forward_only: true,
            escape: EscapePolicy::default(),
        }
    }
}
impl TraceConfig {
    /// Creates a new [`TraceConfig`] terminating escaping rays on the enclosing circle of the given provider.
    #[must_use]
    pub fn with_boundary(provider: &dyn BoundaryProvider) -> Self {
        Self {
            escape: EscapePolicy::from_provider(provider),
            ..Self::default()
        }
    }
    /// Returns `true` if only intersections in front of a ray are considered.
    #[must_use]
    pub const fn forward_only(&self) -> bool {
        self.forward_only
    }
    /// Sets whether only intersections in front of a ray are considered.
    pub fn set_forward_only(&mut self, forward_only: bool) {
        self.forward_only = forward_only;
    }
    /// Returns the [`EscapePolicy`] of this [`TraceConfig`].
    #[must_use]
    pub const fn escape(&self) -> EscapePolicy {
        self.escape
    }
    /// Sets the [`EscapePolicy`] of this [`TraceConfig`].
    pub fn set_escape(&mut self, escape: EscapePolicy) {
        self.escape = escape;
    }
    /// Check the validity of this [`TraceConfig`].
    ///
    /// # Errors
    ///
    /// This function will return an error if the [`EscapePolicy`] is invalid.
    pub fn validate(&self) -> RpResult<()> {
        self.escape.validate()
    }
}

/// The way a trace terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TraceOutcome {
    /// No further component was hit. The ray was handed to the [`EscapePolicy`].
    Escaped,
    /// The trace level of the ray reached zero.
    Exhausted,
    /// A component did not start a new segment when stepping the ray. Tracing was stopped.
    Stalled,
}

/// Trace a [`Ray`] through the given (usually composite) component.
///
/// The loop runs while the trace level of the ray is positive. Each pass searches the nearest intersection, excluding
/// the component hit in the previous pass, and lets the hit component step the ray. If no intersection is found the
/// ray escapes according to the [`EscapePolicy`] of the given config and the trace ends. A ray with a trace level <= 0
/// is left untouched.
///
/// # Errors
///
/// This function will return an error if the given [`TraceConfig`] is invalid. The check is performed before the ray
/// is modified.
pub fn trace_through_components(
    ray: &mut Ray,
    components: &dyn OpticalComponent,
    config: &TraceConfig,
) -> RpResult<TraceOutcome> {
    config.validate()?;
    let mut last_hit: Option<Uuid> = None;
    while ray.trace_level() > 0 {
        let Some(intersection) =
            components.calculate_intersection(ray, config.forward_only(), last_hit)
        else {
            config.escape().apply(ray);
            debug!("ray escaped after {} segments", ray.nr_of_segments());
            return Ok(TraceOutcome::Escaped);
        };
        last_hit = Some(intersection.component.id());
        let trace_level = ray.trace_level();
        intersection.component.step_through(ray, &intersection);
        if ray.trace_level() >= trace_level {
            warn!(
                "component '{}' did not advance the ray. Stopping trace.",
                intersection.component.name()
            );
            return Ok(TraceOutcome::Stalled);
        }
    }
    debug!(
        "trace level exhausted after {} segments",
        ray.nr_of_segments()
    );
    Ok(TraceOutcome::Exhausted)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        components::{
            ComponentCollection, FlatMirror, IdealThinLens, RayComponentIntersection,
        },
        utils::test_helper::test_helper::check_warnings,
    };
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;

    fn unit_circle_config() -> TraceConfig {
        TraceConfig::with_boundary(&Circle::new(Vector2D::zeros(), 1.0))
    }
    #[test]
    fn config_default() {
        let config = TraceConfig::default();
        assert!(config.forward_only());
        assert_eq!(
            config.escape(),
            EscapePolicy::FixedDistance(DEFAULT_ESCAPE_DISTANCE)
        );
        assert!(config.validate().is_ok());
    }
    #[test]
    fn config_setters() {
        let mut config = TraceConfig::default();
        config.set_forward_only(false);
        config.set_escape(EscapePolicy::FixedDistance(2.0));
        assert!(!config.forward_only());
        assert_eq!(config.escape(), EscapePolicy::FixedDistance(2.0));
    }
    #[test]
    fn config_with_boundary() {
        let circle = Circle::new(Vector2D::new(1.0, 2.0), 3.0);
        let config = TraceConfig::with_boundary(&circle);
        assert_eq!(config.escape(), EscapePolicy::EnclosingCircle(circle));
    }
    #[test]
    fn policy_validate() {
        assert!(EscapePolicy::FixedDistance(1.0).validate().is_ok());
        assert!(EscapePolicy::FixedDistance(0.0).validate().is_err());
        assert!(EscapePolicy::FixedDistance(-1.0).validate().is_err());
        assert!(EscapePolicy::FixedDistance(f64::NAN).validate().is_err());
        assert!(EscapePolicy::FixedDistance(f64::INFINITY).validate().is_err());
        let circle =
            |x: f64, r: f64| EscapePolicy::EnclosingCircle(Circle::new(Vector2D::new(x, 0.0), r));
        assert!(circle(0.0, 1.0).validate().is_ok());
        assert!(circle(0.0, 0.0).validate().is_err());
        assert!(circle(0.0, f64::NAN).validate().is_err());
        assert!(circle(f64::INFINITY, 1.0).validate().is_err());
    }
    #[test]
    fn invalid_config_leaves_ray_untouched() {
        let mut ray = Ray::new(Vector2D::zeros(), Vector2D::x());
        let mut config = TraceConfig::default();
        config.set_escape(EscapePolicy::FixedDistance(-1.0));
        let result = trace_through_components(&mut ray, &ComponentCollection::default(), &config);
        assert_matches!(result, Err(RayPlayError::Trace(_)));
        assert_eq!(ray.trajectory().len(), 1);
    }
    #[test]
    fn empty_collection_escapes_to_circle() {
        let mut ray = Ray::new(Vector2D::new(-0.5, 0.0), Vector2D::x());
        let outcome = trace_through_components(
            &mut ray,
            &ComponentCollection::default(),
            &unit_circle_config(),
        )
        .unwrap();
        assert_eq!(outcome, TraceOutcome::Escaped);
        assert_eq!(ray.trajectory().len(), 2);
        assert_eq!(ray.trace_level(), 254);
        assert_abs_diff_eq!(ray.start_point(), Vector2D::new(1.0, 0.0));
        assert_abs_diff_eq!(ray.path_length(), 1.5);
    }
    #[test]
    fn empty_collection_fixed_distance() {
        let mut ray = Ray::new(Vector2D::new(-0.5, 0.0), Vector2D::x());
        let outcome = trace_through_components(
            &mut ray,
            &ComponentCollection::default(),
            &TraceConfig::default(),
        )
        .unwrap();
        assert_eq!(outcome, TraceOutcome::Escaped);
        assert_eq!(ray.trajectory().len(), 2);
        assert_eq!(ray.trace_level(), 254);
        assert_abs_diff_eq!(ray.path_length(), DEFAULT_ESCAPE_DISTANCE);
    }
    #[test]
    fn escape_outside_circle_pointing_away() {
        let mut ray = Ray::new(Vector2D::new(2.0, 0.0), Vector2D::x());
        let outcome = trace_through_components(
            &mut ray,
            &ComponentCollection::default(),
            &unit_circle_config(),
        )
        .unwrap();
        assert_eq!(outcome, TraceOutcome::Escaped);
        assert_eq!(ray.trajectory().len(), 1);
        assert_eq!(ray.path_length(), 0.0);
    }
    #[test]
    fn escape_missing_circle() {
        let mut ray = Ray::new(Vector2D::new(-2.0, 5.0), Vector2D::x());
        trace_through_components(
            &mut ray,
            &ComponentCollection::default(),
            &unit_circle_config(),
        )
        .unwrap();
        assert_eq!(ray.trajectory().len(), 1);
    }
    #[test]
    fn zero_trace_level() {
        let mut ray = Ray::with_trace_level(Vector2D::new(-0.5, 0.0), Vector2D::x(), 0);
        let mut c = ComponentCollection::default();
        c.add(IdealThinLens::centred(
            "L",
            Vector2D::new(0.0, -1.0),
            Vector2D::new(0.0, 1.0),
            1.0,
        ));
        let outcome = trace_through_components(&mut ray, &c, &unit_circle_config()).unwrap();
        assert_eq!(outcome, TraceOutcome::Exhausted);
        assert_eq!(ray.trajectory(), &[Vector2D::new(-0.5, 0.0)]);
        assert_eq!(ray.path_length(), 0.0);
        assert_eq!(ray.trace_level(), 0);
    }
    #[test]
    fn through_two_lenses_to_boundary() {
        // Kepler telescope: two lenses with f=0.25 at distance 0.5
        let mut c = ComponentCollection::new("telescope");
        c.add(IdealThinLens::centred(
            "L1",
            Vector2D::new(-0.25, -1.0),
            Vector2D::new(-0.25, 1.0),
            0.25,
        ));
        c.add(IdealThinLens::centred(
            "L2",
            Vector2D::new(0.25, -1.0),
            Vector2D::new(0.25, 1.0),
            0.25,
        ));
        let mut ray = Ray::new(Vector2D::new(-0.5, 0.1), Vector2D::x());
        let boundary = Circle::new(Vector2D::zeros(), 2.0);
        let outcome =
            trace_through_components(&mut ray, &c, &TraceConfig::with_boundary(&boundary)).unwrap();
        assert_eq!(outcome, TraceOutcome::Escaped);
        assert_eq!(ray.trajectory().len(), 4);
        assert_eq!(ray.trace_level(), 252);
        // inverted, collimated output
        assert_abs_diff_eq!(ray.direction(), Vector2D::x(), epsilon = 1e-12);
        assert_abs_diff_eq!(ray.trajectory()[2].y, -0.1, epsilon = 1e-12);
    }
    #[test]
    fn cavity_exhausts_budget() {
        let mut c = ComponentCollection::new("cavity");
        c.add(FlatMirror::new(
            "M1",
            Vector2D::new(-1.0, -1.0).into(),
            Vector2D::new(-1.0, 1.0).into(),
        ));
        c.add(FlatMirror::new(
            "M2",
            Vector2D::new(1.0, -1.0).into(),
            Vector2D::new(1.0, 1.0).into(),
        ));
        let mut ray = Ray::with_trace_level(Vector2D::zeros(), Vector2D::x(), 10);
        let outcome = trace_through_components(&mut ray, &c, &unit_circle_config()).unwrap();
        assert_eq!(outcome, TraceOutcome::Exhausted);
        assert_eq!(ray.trace_level(), 0);
        assert_eq!(ray.trajectory().len(), 11);
        assert_eq!(ray.trajectory()[0], Vector2D::zeros());
        assert_abs_diff_eq!(ray.path_length(), 19.0, epsilon = 1e-12);
    }
    #[test]
    fn trace_level_monotonic() {
        let mut c = ComponentCollection::new("cavity");
        c.add(FlatMirror::new(
            "M1",
            Vector2D::new(-1.0, -1.0).into(),
            Vector2D::new(-1.0, 1.0).into(),
        ));
        c.add(FlatMirror::new(
            "M2",
            Vector2D::new(1.0, -1.0).into(),
            Vector2D::new(1.0, 1.0).into(),
        ));
        let mut previous = 5;
        for budget in 1..=5 {
            let mut ray = Ray::with_trace_level(Vector2D::zeros(), Vector2D::x(), budget);
            trace_through_components(&mut ray, &c, &unit_circle_config()).unwrap();
            assert_eq!(ray.trace_level(), 0);
            assert_eq!(ray.trajectory().len(), 1 + usize::try_from(budget).unwrap());
            assert!(ray.trace_level() <= previous);
            previous = ray.trace_level();
        }
    }
    #[derive(Debug)]
    struct Sticky {
        id: Uuid,
    }
    impl OpticalComponent for Sticky {
        fn id(&self) -> Uuid {
            self.id
        }
        fn name(&self) -> &str {
            "sticky"
        }
        fn calculate_intersection(
            &self,
            ray: &Ray,
            _forward_only: bool,
            _last_hit: Option<Uuid>,
        ) -> Option<RayComponentIntersection<'_>> {
            Some(RayComponentIntersection::new(self, ray.start_point()))
        }
        fn step_through(&self, _ray: &mut Ray, _intersection: &RayComponentIntersection<'_>) {}
    }
    #[test]
    fn stalled_component() {
        testing_logger::setup();
        let sticky = Sticky { id: Uuid::new_v4() };
        let mut ray = Ray::new(Vector2D::zeros(), Vector2D::x());
        let outcome = trace_through_components(&mut ray, &sticky, &TraceConfig::default()).unwrap();
        assert_eq!(outcome, TraceOutcome::Stalled);
        check_warnings(vec!["component 'sticky' did not advance the ray. Stopping trace."]);
    }
}
