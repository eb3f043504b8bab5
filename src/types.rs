//! Core types and settings for the compass widget

use alloc::string::String;

/// Sensor channel a sample was delivered on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SensorKind {
    /// Accelerometer, read as the gravity vector
    Accelerometer,
    /// Magnetometer, read as the geomagnetic field vector
    MagneticField,
}

/// One raw sample as delivered by the host's sensor feed
///
/// The values are borrowed from the host's event buffer. They are validated
/// and copied by [`OrientationEstimator::ingest`](crate::OrientationEstimator::ingest).
///
/// # Example
/// ```
/// use compass_dial::{SensorKind, SensorSample};
///
/// let sample = SensorSample::accelerometer(&[0.0, 9.81, 0.0]);
/// assert_eq!(sample.sensor, SensorKind::Accelerometer);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorSample<'a> {
    pub sensor: SensorKind,
    pub values: &'a [f32],
}

impl<'a> SensorSample<'a> {
    pub fn new(sensor: SensorKind, values: &'a [f32]) -> Self {
        Self { sensor, values }
    }

    pub fn accelerometer(values: &'a [f32]) -> Self {
        Self::new(SensorKind::Accelerometer, values)
    }

    pub fn magnetic_field(values: &'a [f32]) -> Self {
        Self::new(SensorKind::MagneticField, values)
    }
}

/// Device orientation decomposed from a rotation matrix, in radians
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Orientation {
    /// Rotation about the vertical axis, 0 when the device Y axis points at
    /// magnetic north
    pub azimuth: f32,
    /// Rotation about the device X axis
    pub pitch: f32,
    /// Rotation about the device Y axis
    pub roll: f32,
}

/// Orientation estimator settings
///
/// Thresholds used to decide whether a gravity/magnetic pair can produce a
/// rotation matrix. The defaults assume accelerometer readings in m/s² and
/// magnetometer readings in µT.
///
/// # Example
/// ```
/// use compass_dial::EstimatorSettings;
///
/// // Accelerometer reports in g instead of m/s²
/// let settings = EstimatorSettings {
///     gravity: 1.0,
///     ..Default::default()
/// };
/// assert_eq!(settings.free_fall_threshold_squared(), 0.01);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EstimatorSettings {
    /// Standard gravity in the accelerometer's units
    pub gravity: f32,
    /// Fraction of gravity² below which the device is treated as free-falling
    pub free_fall_ratio: f32,
    /// Minimum magnitude of `magnetic × gravity`
    ///
    /// Below this the field is either too weak or nearly parallel to gravity
    /// and the horizontal direction is undefined.
    pub min_horizontal_field: f32,
}

impl EstimatorSettings {
    /// Squared accelerometer magnitude under which no orientation is computed
    pub fn free_fall_threshold_squared(&self) -> f32 {
        self.free_fall_ratio * self.gravity * self.gravity
    }
}

impl Default for EstimatorSettings {
    fn default() -> Self {
        Self {
            gravity: 9.81,
            free_fall_ratio: 0.01,
            min_horizontal_field: 0.1,
        }
    }
}

/// One of the four cardinal directions printed on the dial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CardinalLabel {
    North,
    East,
    South,
    West,
}

impl CardinalLabel {
    /// Cardinal bound to the given tick index, if any
    ///
    /// Every sixth tick carries a label, starting with North on tick 0.
    pub fn for_tick(tick: usize) -> Option<Self> {
        match tick % 24 {
            0 => Some(Self::North),
            6 => Some(Self::East),
            12 => Some(Self::South),
            18 => Some(Self::West),
            _ => None,
        }
    }

    /// Index of the tick this label sits on
    pub fn tick(self) -> usize {
        match self {
            Self::North => 0,
            Self::East => 6,
            Self::South => 12,
            Self::West => 18,
        }
    }
}

/// Display strings for the cardinal labels, supplied by the host's
/// localisation layer
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardinalNames {
    pub north: String,
    pub east: String,
    pub south: String,
    pub west: String,
}

impl CardinalNames {
    pub fn get(&self, label: CardinalLabel) -> &str {
        match label {
            CardinalLabel::North => &self.north,
            CardinalLabel::East => &self.east,
            CardinalLabel::South => &self.south,
            CardinalLabel::West => &self.west,
        }
    }
}

impl Default for CardinalNames {
    fn default() -> Self {
        Self {
            north: String::from("N"),
            east: String::from("E"),
            south: String::from("S"),
            west: String::from("W"),
        }
    }
}

/// 8-bit ARGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { a: 0xff, r, g, b }
    }

    /// Unpack a `0xAARRGGBB` value
    pub const fn from_argb(argb: u32) -> Self {
        Self {
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }
}

/// Which of the dial's three colors a primitive is painted with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaintRole {
    Background,
    Text,
    Marker,
}

/// Dial appearance
///
/// Loaded once from the host's resources and immutable afterwards.
///
/// # Example
/// ```
/// use compass_dial::{CardinalNames, DialStyle};
///
/// let style = DialStyle {
///     labels: CardinalNames {
///         north: "N".into(),
///         east: "O".into(),
///         south: "S".into(),
///         west: "W".into(),
///     },
///     text_size: 32.0,
///     ..Default::default()
/// };
/// assert_eq!(style.tick_length, 10.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DialStyle {
    /// Localised cardinal strings
    pub labels: CardinalNames,
    /// Fill color of the dial disc
    pub background: Color,
    /// Color of the cardinal labels
    pub text: Color,
    /// Color of ticks and the north arrow
    pub marker: Color,
    /// Base text size in surface units
    pub text_size: f32,
    /// Length of each radial tick
    pub tick_length: f32,
    /// Horizontal reach of each north-arrow stroke
    pub arrow_half_width: f32,
}

impl DialStyle {
    pub fn color(&self, role: PaintRole) -> Color {
        match role {
            PaintRole::Background => self.background,
            PaintRole::Text => self.text,
            PaintRole::Marker => self.marker,
        }
    }
}

impl Default for DialStyle {
    fn default() -> Self {
        Self {
            labels: CardinalNames::default(),
            background: Color::rgb(0x33, 0x33, 0x33),
            text: Color::rgb(0xff, 0xff, 0xff),
            marker: Color::rgb(0xaa, 0xaa, 0xff),
            text_size: 24.0,
            tick_length: 10.0,
            arrow_half_width: 5.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cardinal_ticks() {
        for label in [
            CardinalLabel::North,
            CardinalLabel::East,
            CardinalLabel::South,
            CardinalLabel::West,
        ] {
            assert_eq!(CardinalLabel::for_tick(label.tick()), Some(label));
        }

        let labelled = (0..24).filter(|&i| CardinalLabel::for_tick(i).is_some()).count();
        assert_eq!(labelled, 4);
        assert_eq!(CardinalLabel::for_tick(3), None);
    }

    #[test]
    fn test_free_fall_threshold() {
        let settings = EstimatorSettings::default();
        let expected = 0.01 * 9.81 * 9.81;
        assert!((settings.free_fall_threshold_squared() - expected).abs() < 1e-6);
    }

    #[test]
    fn test_color_from_argb() {
        let color = Color::from_argb(0x80123456);
        assert_eq!(color, Color { a: 0x80, r: 0x12, g: 0x34, b: 0x56 });
    }
}
