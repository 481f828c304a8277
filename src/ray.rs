#![warn(missing_docs)]
//! Module for handling a single light ray in the plane
use std::fmt::Display;

use itertools::Itertools;
use serde::Serialize;

use crate::utils::{
    geom2d::{distance, normalize, point_on_line},
    Vector2D,
};

/// Number of segments a [`Ray`] may start if no other trace level is given.
pub const DEFAULT_TRACE_LEVEL: i32 = 255;

/// The current state of a piecewise-linear light ray.
///
/// A [`Ray`] consists of straight segments. Only the current segment is described by its start point and direction.
/// All previous segment start points are kept in the trajectory which always begins with the true origin of the ray.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Ray {
    /// start point of the current segment
    start_point: Vector2D,
    /// normalized direction of the current segment
    direction: Vector2D,
    /// accumulated geometric length of all previous segments
    path_length: f64,
    /// all segment start points in emission order (including the current one)
    trajectory: Vec<Vector2D>,
    /// remaining number of segments this ray may start
    trace_level: i32,
    /// true if this ray is the reverse twin of another ray
    reverse: bool,
}
impl Ray {
    /// Creates a new [`Ray`] with the [`DEFAULT_TRACE_LEVEL`].
    ///
    /// The direction is normalized. A zero direction is not rejected but leads to a ray with `NaN` direction.
    #[must_use]
    pub fn new(start_point: Vector2D, direction: Vector2D) -> Self {
        Self::with_trace_level(start_point, direction, DEFAULT_TRACE_LEVEL)
    }
    /// Creates a new [`Ray`] which may start at most `trace_level` further segments.
    #[must_use]
    pub fn with_trace_level(start_point: Vector2D, direction: Vector2D, trace_level: i32) -> Self {
        Self {
            start_point,
            direction: normalize(&direction),
            path_length: 0.0,
            trajectory: vec![start_point],
            trace_level,
            reverse: false,
        }
    }
    /// Creates the reverse twin of this [`Ray`].
    ///
    /// The twin starts at the current start point, travels in the opposite direction and has a fresh trajectory. Its
    /// trace level equals the remaining trace level of this ray.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let mut ray = Self::with_trace_level(self.start_point, -self.direction, self.trace_level);
        ray.reverse = true;
        ray
    }
    /// Returns the start point of the current segment.
    #[must_use]
    pub const fn start_point(&self) -> Vector2D {
        self.start_point
    }
    /// Returns the (normalized) direction of the current segment.
    #[must_use]
    pub const fn direction(&self) -> Vector2D {
        self.direction
    }
    /// Sets the direction of the current segment. The given vector is normalized.
    pub fn set_direction(&mut self, direction: Vector2D) {
        self.direction = normalize(&direction);
    }
    /// Returns the geometric length of all completed segments.
    #[must_use]
    pub const fn path_length(&self) -> f64 {
        self.path_length
    }
    /// Returns the start points of all segments in emission order.
    #[must_use]
    pub fn trajectory(&self) -> &[Vector2D] {
        &self.trajectory
    }
    /// Returns the number of further segments this [`Ray`] may start.
    #[must_use]
    pub const fn trace_level(&self) -> i32 {
        self.trace_level
    }
    /// Returns `true` if this [`Ray`] is the reverse twin of another ray.
    #[must_use]
    pub const fn is_reverse(&self) -> bool {
        self.reverse
    }
    /// Marks this [`Ray`] as reverse twin (or not).
    pub fn set_reverse(&mut self, reverse: bool) {
        self.reverse = reverse;
    }
    /// Returns the number of completed segments.
    #[must_use]
    pub fn nr_of_segments(&self) -> usize {
        self.trajectory.len().saturating_sub(1)
    }
    /// Returns an iterator over all completed segments as pairs of (start, end) points.
    pub fn segments(&self) -> impl Iterator<Item = (Vector2D, Vector2D)> + '_ {
        self.trajectory.iter().copied().tuple_windows()
    }
    /// Start a new segment of this ray.
    ///
    /// The distance between the current start point and `new_start_point` is added to the path length,
    /// `new_start_point` is appended to the trajectory and becomes the new start point. The direction is replaced by
    /// the normalized `new_direction` and the trace level is decremented.
    ///
    /// This function does not check the trace level. It may therefore become negative if the caller does not stop.
    pub fn start_next_segment(&mut self, new_start_point: Vector2D, new_direction: Vector2D) {
        self.path_length += distance(&self.start_point, &new_start_point);
        self.trajectory.push(new_start_point);
        self.start_point = new_start_point;
        self.direction = normalize(&new_direction);
        self.trace_level -= 1;
    }
    /// Move the ray by the given distance along its current direction.
    ///
    /// This starts a new segment (see [`Ray::start_next_segment`]) with unchanged direction.
    pub fn advance(&mut self, distance: f64) {
        let new_start_point = point_on_line(&self.start_point, &self.direction, distance);
        self.start_next_segment(new_start_point, self.direction);
    }
}
impl Display for Ray {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "start point: ({}, {}), direction: ({:.6}, {:.6}), path length: {}, segments: {}, trace level: {}",
            self.start_point.x,
            self.start_point.y,
            self.direction.x,
            self.direction.y,
            self.path_length,
            self.nr_of_segments(),
            self.trace_level
        )
    }
}
