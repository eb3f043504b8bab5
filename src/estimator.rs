//! Orientation estimator: keeps the latest gravity and magnetic readings and
//! derives a bearing from them

use crate::error::{CompassError, Result};
use crate::math::vector_from_sample;
use crate::orientation;
use crate::types::{EstimatorSettings, SensorKind, SensorSample};
use nalgebra::Vector3;

/// Last-value-wins store for the two sensor channels
///
/// Each channel is empty until its first sample arrives. The channels are
/// independent and may be fed in any order. No filtering or averaging is
/// applied.
///
/// # Example
/// ```
/// use compass_dial::{OrientationEstimator, SensorSample};
///
/// let mut estimator = OrientationEstimator::new();
///
/// // Only one channel seen so far
/// assert!(estimator.ingest(SensorSample::accelerometer(&[0.0, 0.0, 9.81])).is_err());
///
/// let bearing = estimator
///     .ingest(SensorSample::magnetic_field(&[0.0, 22.0, -40.0]))
///     .unwrap();
/// assert!(bearing.abs() < 1e-4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct OrientationEstimator {
    settings: EstimatorSettings,
    gravity: Option<Vector3<f32>>,
    geomagnetic: Option<Vector3<f32>>,
}

impl OrientationEstimator {
    /// Create an estimator with default thresholds
    pub fn new() -> Self {
        Self::with_settings(EstimatorSettings::default())
    }

    /// Create an estimator with the given thresholds
    pub fn with_settings(settings: EstimatorSettings) -> Self {
        Self {
            settings,
            gravity: None,
            geomagnetic: None,
        }
    }

    pub fn settings(&self) -> EstimatorSettings {
        self.settings
    }

    /// Last accelerometer reading, if any
    pub fn gravity(&self) -> Option<Vector3<f32>> {
        self.gravity
    }

    /// Last magnetometer reading, if any
    pub fn geomagnetic(&self) -> Option<Vector3<f32>> {
        self.geomagnetic
    }

    /// Whether both channels have delivered at least one sample
    pub fn is_ready(&self) -> bool {
        self.gravity.is_some() && self.geomagnetic.is_some()
    }

    /// Store a sample and, once both channels are populated, derive the
    /// bearing from the latest pair
    ///
    /// # Errors
    /// - [`CompassError::InvalidSample`] if the sample is not three finite
    ///   values. Nothing is stored.
    /// - [`CompassError::AwaitingReading`] if the other channel is still
    ///   empty. The sample is stored.
    /// - [`CompassError::DegenerateOrientation`] if the pair does not define
    ///   an orientation. The sample is stored.
    pub fn ingest(&mut self, sample: SensorSample<'_>) -> Result<f32> {
        let vector = vector_from_sample(sample.values).ok_or(CompassError::InvalidSample {
            sensor: sample.sensor,
            actual: sample.values.len(),
        })?;

        match sample.sensor {
            SensorKind::Accelerometer => self.gravity = Some(vector),
            SensorKind::MagneticField => self.geomagnetic = Some(vector),
        }

        self.recompute_bearing()
    }

    /// Derive the bearing from the stored readings without changing them
    pub fn recompute_bearing(&self) -> Result<f32> {
        let gravity = self
            .gravity
            .ok_or(CompassError::AwaitingReading(SensorKind::Accelerometer))?;
        let geomagnetic = self
            .geomagnetic
            .ok_or(CompassError::AwaitingReading(SensorKind::MagneticField))?;

        orientation::bearing(gravity, geomagnetic, &self.settings)
    }

    /// Forget both readings
    pub fn reset(&mut self) {
        self.gravity = None;
        self.geomagnetic = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLAT: [f32; 3] = [0.0, 0.0, 9.81];
    const NORTH: [f32; 3] = [0.0, 20.0, -40.0];

    #[test]
    fn test_new_estimator() {
        let estimator = OrientationEstimator::new();
        assert!(!estimator.is_ready());
        assert_eq!(
            estimator.recompute_bearing(),
            Err(CompassError::AwaitingReading(SensorKind::Accelerometer))
        );
    }

    #[test]
    fn test_channels_in_either_order() {
        let mut a = OrientationEstimator::new();
        assert_eq!(
            a.ingest(SensorSample::accelerometer(&FLAT)),
            Err(CompassError::AwaitingReading(SensorKind::MagneticField))
        );
        let first = a.ingest(SensorSample::magnetic_field(&NORTH)).unwrap();

        let mut b = OrientationEstimator::new();
        assert_eq!(
            b.ingest(SensorSample::magnetic_field(&NORTH)),
            Err(CompassError::AwaitingReading(SensorKind::Accelerometer))
        );
        let second = b.ingest(SensorSample::accelerometer(&FLAT)).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_sample_leaves_state() {
        let mut estimator = OrientationEstimator::new();
        estimator.ingest(SensorSample::accelerometer(&FLAT)).ok();

        let result = estimator.ingest(SensorSample::accelerometer(&[1.0, 2.0]));
        assert_eq!(
            result,
            Err(CompassError::InvalidSample {
                sensor: SensorKind::Accelerometer,
                actual: 2
            })
        );
        assert_eq!(estimator.gravity(), Some(Vector3::new(0.0, 0.0, 9.81)));

        let result = estimator.ingest(SensorSample::magnetic_field(&[f32::NAN, 0.0, 1.0]));
        assert!(matches!(result, Err(CompassError::InvalidSample { actual: 3, .. })));
        assert_eq!(estimator.geomagnetic(), None);
    }

    #[test]
    fn test_last_value_wins() {
        let mut estimator = OrientationEstimator::new();
        estimator.ingest(SensorSample::accelerometer(&FLAT)).ok();
        estimator.ingest(SensorSample::magnetic_field(&NORTH)).unwrap();

        let east = estimator
            .ingest(SensorSample::magnetic_field(&[-20.0, 0.0, -40.0]))
            .unwrap();
        assert!((east + 90.0).abs() < 1e-4, "bearing {}", east);
        assert_eq!(estimator.geomagnetic(), Some(Vector3::new(-20.0, 0.0, -40.0)));
    }

    #[test]
    fn test_degenerate_sample_is_stored() {
        let mut estimator = OrientationEstimator::new();
        estimator.ingest(SensorSample::magnetic_field(&NORTH)).ok();

        let result = estimator.ingest(SensorSample::accelerometer(&[0.0, 0.0, 0.0]));
        assert_eq!(result, Err(CompassError::DegenerateOrientation));
        assert_eq!(estimator.gravity(), Some(Vector3::zeros()));

        // Recovers as soon as a usable reading arrives
        assert!(estimator.ingest(SensorSample::accelerometer(&FLAT)).is_ok());
    }

    #[test]
    fn test_reset() {
        let mut estimator = OrientationEstimator::new();
        estimator.ingest(SensorSample::accelerometer(&FLAT)).ok();
        estimator.ingest(SensorSample::magnetic_field(&NORTH)).ok();
        assert!(estimator.is_ready());

        estimator.reset();
        assert!(!estimator.is_ready());
    }

    #[test]
    fn test_custom_gravity_units() {
        // Accelerometer reporting in g
        let settings = EstimatorSettings {
            gravity: 1.0,
            ..Default::default()
        };
        let mut estimator = OrientationEstimator::with_settings(settings);
        estimator.ingest(SensorSample::magnetic_field(&NORTH)).ok();

        // 0.5 g passes with g-based thresholds
        assert!(estimator.ingest(SensorSample::accelerometer(&[0.0, 0.0, 0.5])).is_ok());

        // but would be free fall with the m/s² defaults
        let mut strict = OrientationEstimator::new();
        strict.ingest(SensorSample::magnetic_field(&NORTH)).ok();
        assert_eq!(
            strict.ingest(SensorSample::accelerometer(&[0.0, 0.0, 0.5])),
            Err(CompassError::DegenerateOrientation)
        );
    }
}
