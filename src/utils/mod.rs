//! Module for additional computational capabilities
pub mod geom2d;
pub mod test_helper;
pub use geom2d::Vector2D;
