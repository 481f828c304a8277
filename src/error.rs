#![warn(missing_docs)]
//! RayPlay specific error structures
use std::{error::Error, fmt::Display};

/// RayPlay specific Result type
pub type RpResult<T> = std::result::Result<T, RayPlayError>;

/// Errors that can be returned by various RayPlay functions.
///
/// Note that degenerate geometry (zero-length directions, coincident vertex heights, ...) is never reported through
/// this type. Such input silently produces `NaN` or infinite values. Errors are only raised for configuration
/// problems which can be detected before a calculation starts.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum RayPlayError {
    /// invalid input to a geometric primitive (e.g. non-finite coordinates)
    Geometry(String),
    /// configuration errors detected at the start of a ray trace (e.g. an invalid boundary circle)
    Trace(String),
    /// precondition violations of lens design parameters (only reported if explicitly validated)
    LensDesign(String),
    /// errors while reading or interpreting a scene document
    Scene(String),
    /// errors console io
    Console(String),
    /// errors not falling in one of the categories above
    Other(String),
}

impl Display for RayPlayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Geometry(m) => {
                write!(f, "Geometry:{m}")
            }
            Self::Trace(m) => {
                write!(f, "Trace:{m}")
            }
            Self::LensDesign(m) => {
                write!(f, "LensDesign:{m}")
            }
            Self::Scene(m) => {
                write!(f, "Scene:{m}")
            }
            Self::Console(m) => {
                write!(f, "Console:{m}")
            }
            Self::Other(m) => write!(f, "RayPlay Error:Other:{m}"),
        }
    }
}
impl Error for RayPlayError {}

impl std::convert::From<String> for RayPlayError {
    fn from(msg: String) -> Self {
        Self::Other(msg)
    }
}
