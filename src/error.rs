//! Error taxonomy for the gesture and projection cores.
//!
//! Application edges (config files, recordings, CLI) use `anyhow::Result`.
//! The cores return `GlobeError` so callers can match on the recoverable
//! cases, `NoIntersection` in particular.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GlobeError {
    /// Malformed landmark frame or landmark index map. The frame is rejected.
    #[error("structural input error: {0}")]
    StructuralInput(String),

    /// The ray through the screen point misses the globe.
    #[error("ray through screen point ({x:.4}, {y:.4}) misses the globe")]
    NoIntersection { x: f64, y: f64 },

    #[error("invalid camera: {0}")]
    InvalidCamera(String),

    #[error("invalid sphere radius {0}")]
    InvalidRadius(f64),

    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),
}

impl GlobeError {
    /// True for failures the caller is expected to absorb with a fallback.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, GlobeError::NoIntersection { .. })
    }
}
