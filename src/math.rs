//! Mathematical utilities and nalgebra helpers for the compass widget

use nalgebra::{Isometry2, Point2, UnitComplex, Vector2, Vector3};

/// Mathematical constants
pub const DEG_TO_RAD: f32 = core::f32::consts::PI / 180.0;
pub const RAD_TO_DEG: f32 = 180.0 / core::f32::consts::PI;

/// Build a vector from a raw sensor buffer
///
/// Returns `None` unless the buffer holds exactly three finite values.
pub fn vector_from_sample(values: &[f32]) -> Option<Vector3<f32>> {
    match values {
        [x, y, z] if x.is_finite() && y.is_finite() && z.is_finite() => {
            Some(Vector3::new(*x, *y, *z))
        }
        _ => None,
    }
}

/// Rigid rotation of `degrees` about `pivot`
///
/// Surface coordinates have Y pointing down, so a positive angle turns
/// clockwise on screen.
pub fn rotation_about(pivot: Point2<f32>, degrees: f32) -> Isometry2<f32> {
    let angle = degrees * DEG_TO_RAD;
    let rotation = UnitComplex::new(angle);
    let shift = pivot.coords - rotation * pivot.coords;
    Isometry2::new(shift, angle)
}

/// Pure translation by `(dx, dy)`
pub fn translation(dx: f32, dy: f32) -> Isometry2<f32> {
    Isometry2::new(Vector2::new(dx, dy), 0.0)
}
