#![cfg_attr(not(test), no_std)]

//! Compass dial - sensor fusion and dial layout for a compass widget
//!
//! This crate is the platform-independent core of a compass widget. It takes
//! raw accelerometer and magnetometer samples, fuses them into a bearing and
//! lays out a compass face rotated by that bearing. Sensor subscription,
//! resource loading and the actual canvas stay with the host.
//!
//! # Features
//!
//! - Rotation matrix and azimuth/pitch/roll decomposition from gravity and
//!   magnetic field, matching the construction mobile sensor frameworks use
//! - Last-value-wins sensor channels with silent degradation on bad input
//! - Explicit bearing updates with observer hooks for accessibility and redraw
//! - Dial layout with 24 ticks, cardinal labels and a north arrow, produced as
//!   a flat list of draw primitives
//! - Scoped transform stack, so rotations can never leak out of a frame
//! - `#![no_std]` compatible (needs `alloc`)
//!
//! # Quick Start
//!
//! ```rust
//! use compass_dial::{CardinalLabel, Compass, DialStyle, SensorSample};
//!
//! let mut compass = Compass::new(DialStyle::default());
//!
//! // Sensor readings, in m/s² and µT
//! compass.on_sensor_sample(SensorSample::accelerometer(&[0.0, 0.0, 9.81]));
//! compass.on_sensor_sample(SensorSample::magnetic_field(&[0.0, 22.0, -40.0]));
//!
//! // Device points north, so the dial is not rotated
//! assert!(compass.bearing().unwrap().abs() < 1e-3);
//!
//! // Lay out a frame for a 300×300 surface
//! let frame = compass.draw(300.0, 300.0);
//! let (north, _) = frame.label(CardinalLabel::North).unwrap();
//! assert!(north.y < 150.0);
//! ```

extern crate alloc;

pub mod compass;
pub mod dial;
mod error;
mod estimator;
mod math;
pub mod orientation;
mod transform;
mod types;

// Re-export all public types and functions
pub use compass::{BearingObserver, Compass, NoopObserver};
pub use dial::{
    Canvas, DialGeometry, DialPart, DialRenderer, DrawCommand, FontMetrics, Frame,
    MonospaceMetrics, TICK_COUNT, TICK_STEP_DEGREES,
};
pub use error::{CompassError, Result};
pub use estimator::OrientationEstimator;
pub use math::{DEG_TO_RAD, RAD_TO_DEG};
pub use orientation::{bearing_from_azimuth, orientation, rotation_matrix};
pub use transform::TransformStack;
pub use types::*;
