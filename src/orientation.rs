//! Rotation matrix and azimuth from gravity and magnetic field readings
//!
//! The construction is the one mobile sensor frameworks use: the horizontal
//! east axis is the cross product of the magnetic field and gravity, and north
//! completes the right-handed frame. Device tilt shows up as pitch and roll,
//! which the compass ignores.

use crate::error::{CompassError, Result};
use crate::math::RAD_TO_DEG;
use crate::types::{EstimatorSettings, Orientation};
// Float methods come from these traits when built without std
#[allow(unused_imports)]
use nalgebra::{ComplexField, RealField};
use nalgebra::{Matrix3, Vector3};

/// Build the rotation matrix mapping device coordinates to world coordinates
///
/// Rows are the world east, north and up axes expressed in device coordinates.
///
/// # Errors
/// [`CompassError::DegenerateOrientation`] when the device is in free fall,
/// the magnetic field is too weak, or the field is parallel to gravity. Readings
/// so large that their products overflow `f32` are rejected the same way.
///
/// # Example
/// ```
/// use nalgebra::Vector3;
/// use compass_dial::{EstimatorSettings, orientation::rotation_matrix};
///
/// let gravity = Vector3::new(0.0, 0.0, 9.81);      // lying flat
/// let magnetic = Vector3::new(0.0, 22.0, -40.0);   // top edge towards north
/// let r = rotation_matrix(gravity, magnetic, &EstimatorSettings::default()).unwrap();
/// assert!((r[(1, 1)] - 1.0).abs() < 1e-6);
/// ```
pub fn rotation_matrix(
    gravity: Vector3<f32>,
    geomagnetic: Vector3<f32>,
    settings: &EstimatorSettings,
) -> Result<Matrix3<f32>> {
    let gravity_squared = gravity.magnitude_squared();
    if !gravity_squared.is_finite() || gravity_squared < settings.free_fall_threshold_squared() {
        return Err(CompassError::DegenerateOrientation);
    }

    let east = geomagnetic.cross(&gravity);
    let east_magnitude = east.magnitude();
    if !east_magnitude.is_finite() || east_magnitude < settings.min_horizontal_field {
        return Err(CompassError::DegenerateOrientation);
    }

    let east = east / east_magnitude;
    let up = gravity / gravity_squared.sqrt();
    let north = up.cross(&east);

    Ok(Matrix3::from_rows(&[
        east.transpose(),
        north.transpose(),
        up.transpose(),
    ]))
}

/// Decompose a rotation matrix into azimuth, pitch and roll
pub fn orientation(rotation: &Matrix3<f32>) -> Orientation {
    Orientation {
        azimuth: rotation[(0, 1)].atan2(rotation[(1, 1)]),
        pitch: (-rotation[(2, 1)]).asin(),
        roll: (-rotation[(2, 0)]).atan2(rotation[(2, 2)]),
    }
}

/// Dial bearing in degrees for an azimuth in radians
///
/// The sign is flipped so the dial turns against the device and keeps its
/// north label pointing at magnetic north.
pub fn bearing_from_azimuth(azimuth: f32) -> f32 {
    azimuth * RAD_TO_DEG * -1.0
}

/// Full derivation from the two sensor vectors to a dial bearing
pub fn bearing(
    gravity: Vector3<f32>,
    geomagnetic: Vector3<f32>,
    settings: &EstimatorSettings,
) -> Result<f32> {
    let rotation = rotation_matrix(gravity, geomagnetic, settings)?;
    let bearing = bearing_from_azimuth(orientation(&rotation).azimuth);
    if !bearing.is_finite() {
        return Err(CompassError::DegenerateOrientation);
    }
    Ok(bearing)
}

#[cfg(test)]
mod tests {
    use super::*;

    const G: f32 = 9.81;

    fn settings() -> EstimatorSettings {
        EstimatorSettings::default()
    }

    #[test]
    fn test_flat_device_pointing_north() {
        let gravity = Vector3::new(0.0, 0.0, G);
        let magnetic = Vector3::new(0.0, 20.0, -40.0);

        let r = rotation_matrix(gravity, magnetic, &settings()).unwrap();
        let o = orientation(&r);

        assert!(o.azimuth.abs() < 1e-6, "azimuth {}", o.azimuth);
        assert!(o.pitch.abs() < 1e-6);
        assert!(o.roll.abs() < 1e-6);
    }

    #[test]
    fn test_flat_device_pointing_east() {
        // Device Y axis towards east puts magnetic north along -X
        let gravity = Vector3::new(0.0, 0.0, G);
        let magnetic = Vector3::new(-20.0, 0.0, -40.0);

        let b = bearing(gravity, magnetic, &settings()).unwrap();
        assert!((b - (-90.0)).abs() < 1e-4, "bearing {}", b);
    }

    #[test]
    fn test_flat_device_pointing_west() {
        let gravity = Vector3::new(0.0, 0.0, G);
        let magnetic = Vector3::new(20.0, 0.0, -40.0);

        let b = bearing(gravity, magnetic, &settings()).unwrap();
        assert!((b - 90.0).abs() < 1e-4, "bearing {}", b);
    }

    #[test]
    fn test_rotation_matrix_is_orthonormal() {
        let gravity = Vector3::new(1.2, -0.4, 9.7);
        let magnetic = Vector3::new(13.0, 25.0, -38.0);

        let r = rotation_matrix(gravity, magnetic, &settings()).unwrap();
        let identity = r * r.transpose();

        assert!((identity - Matrix3::identity()).norm() < 1e-5);
        assert!((r.determinant() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_free_fall_is_degenerate() {
        let magnetic = Vector3::new(0.0, 20.0, -40.0);

        assert_eq!(
            rotation_matrix(Vector3::zeros(), magnetic, &settings()),
            Err(CompassError::DegenerateOrientation)
        );
        assert_eq!(
            rotation_matrix(Vector3::new(0.0, 0.0, 0.5), magnetic, &settings()),
            Err(CompassError::DegenerateOrientation)
        );
    }

    #[test]
    fn test_parallel_vectors_are_degenerate() {
        let gravity = Vector3::new(0.0, 0.0, G);
        let magnetic = Vector3::new(0.0, 0.0, -45.0);

        assert_eq!(
            bearing(gravity, magnetic, &settings()),
            Err(CompassError::DegenerateOrientation)
        );
    }

    #[test]
    fn test_zero_field_is_degenerate() {
        let gravity = Vector3::new(0.0, 0.0, G);

        assert_eq!(
            bearing(gravity, Vector3::zeros(), &settings()),
            Err(CompassError::DegenerateOrientation)
        );
    }

    #[test]
    fn test_overflowing_readings_are_degenerate() {
        let huge_gravity = Vector3::new(0.0, 0.0, 1e20);
        let huge_field = Vector3::new(0.0, 1e20, 0.0);

        assert_eq!(
            bearing(huge_gravity, huge_field, &settings()),
            Err(CompassError::DegenerateOrientation)
        );
        assert_eq!(
            bearing(huge_gravity, Vector3::new(0.0, 20.0, -40.0), &settings()),
            Err(CompassError::DegenerateOrientation)
        );

        // Gravity is fine but E×A overflows
        assert_eq!(
            bearing(Vector3::new(0.0, 0.0, G), Vector3::new(0.0, 1e38, 0.0), &settings()),
            Err(CompassError::DegenerateOrientation)
        );
    }

    #[test]
    fn test_large_finite_readings_still_work() {
        let gravity = Vector3::new(0.0, 0.0, 1e10);
        let magnetic = Vector3::new(20.0, 0.0, -40.0);

        let b = bearing(gravity, magnetic, &settings()).unwrap();
        assert!((b - 90.0).abs() < 1e-3, "bearing {}", b);
    }

    #[test]
    fn test_bearing_sign_flip() {
        let azimuth = 30.0f32.to_radians();
        assert!((bearing_from_azimuth(azimuth) + 30.0).abs() < 1e-4);
        assert_eq!(bearing_from_azimuth(0.0), 0.0);
    }

    #[test]
    fn test_upright_device_pitch() {
        // Standing upright, field pointing into the screen
        let gravity = Vector3::new(0.0, G, 0.0);
        let magnetic = Vector3::new(0.0, 0.0, -50.0);

        let r = rotation_matrix(gravity, magnetic, &settings()).unwrap();
        let o = orientation(&r);

        assert!(o.azimuth.is_finite());
        assert!((o.pitch + core::f32::consts::FRAC_PI_2).abs() < 1e-4, "pitch {}", o.pitch);
    }
}
