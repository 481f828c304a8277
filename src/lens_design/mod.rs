#![warn(missing_docs)]
//! Design of composite devices built from ideal thin lenses.
//!
//! The focal lengths and geometry of all lenses of a device are derived from a small set of design parameters by
//! closed-form expressions. Invalid parameters are not rejected but lead to infinite or `NaN` focal lengths.
pub mod imaging;
mod omnidirectional_lens;
mod wormhole_lens;

pub use omnidirectional_lens::{
    DerivedFocalLengths, LensRole, OmnidirectionalLens, OmnidirectionalLensParameters, PointRole,
};
pub use wormhole_lens::{InsideLensRole, WormholeLens, WormholeLensParameters};
