//! Error type shared by the estimator and the dial renderer

use crate::types::SensorKind;

/// Result alias used throughout the crate
pub type Result<T> = core::result::Result<T, CompassError>;

/// Everything that can go wrong between a raw sensor sample and a drawn dial.
///
/// None of these are fatal. [`Compass`](crate::Compass) logs them and keeps
/// showing the last good bearing (or an unrotated dial).
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum CompassError {
    /// Sample did not carry exactly three finite components
    #[error("invalid {sensor:?} sample: expected 3 finite components, got {actual}")]
    InvalidSample { sensor: SensorKind, actual: usize },

    /// Gravity and magnetic field cannot span a rotation matrix
    /// (free fall, zero field, or the two vectors are collinear)
    #[error("gravity and magnetic field do not define an orientation")]
    DegenerateOrientation,

    /// A bearing was requested before this channel produced its first sample
    #[error("no {0:?} reading received yet")]
    AwaitingReading(SensorKind),

    /// Drawing surface has no usable radius
    #[error("surface side {side} is too small to draw a dial")]
    SurfaceTooSmall { side: f32 },
}
