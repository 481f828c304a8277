//! This is the documentation for the **RayPlay** package, a two-dimensional ray tracer for ideal thin lenses and
//! composite lens devices.
//!
//! Rays ([`ray::Ray`]) are traced through optical components ([`components::OpticalComponent`]) by
//! [`tracer::trace_through_components`]. Components may be simple (e.g. [`components::IdealThinLens`]) or composite
//! ([`components::ComponentCollection`], [`lens_design::OmnidirectionalLens`], [`lens_design::WormholeLens`]).
//!
//! ```rust
//! use rayplay::{
//!     components::{ComponentCollection, IdealThinLens},
//!     ray::Ray,
//!     tracer::{trace_through_components, Circle, TraceConfig, TraceOutcome},
//!     utils::Vector2D,
//! };
//!
//! let mut system = ComponentCollection::new("system");
//! system.add(IdealThinLens::centred("L", Vector2D::new(0.0, -1.0), Vector2D::new(0.0, 1.0), 0.5));
//! let mut ray = Ray::new(Vector2D::new(-1.0, 0.2), Vector2D::x());
//! let config = TraceConfig::with_boundary(&Circle::new(Vector2D::zeros(), 2.0));
//! let outcome = trace_through_components(&mut ray, &system, &config).unwrap();
//! assert_eq!(outcome, TraceOutcome::Escaped);
//! assert_eq!(ray.trajectory().len(), 3);
//! ```
#![allow(clippy::module_name_repetitions)]

pub mod components;
pub mod console;
pub mod error;
pub mod lens_design;
pub mod point_ref;
pub mod ray;
pub mod rays;
pub mod scene;
pub mod tracer;
pub mod utils;

pub use scene::SceneDocument;

/// Return the version information of the currently built `rayplay` executable.
#[must_use]
pub fn get_version() -> String {
    format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
