//! Scoped 2D transform stack used while laying out the dial

use crate::math::{RAD_TO_DEG, rotation_about, translation};
use nalgebra::{Isometry2, Point2};

/// Current drawing transform plus a save/restore discipline
///
/// Saving and restoring only happens through [`TransformStack::scoped`], so
/// every save is matched by exactly one restore.
///
/// # Example
/// ```
/// use nalgebra::Point2;
/// use compass_dial::TransformStack;
///
/// let mut stack = TransformStack::new();
/// let center = Point2::new(50.0, 50.0);
///
/// stack.scoped(|stack| {
///     stack.rotate(90.0, center);
///     let top = stack.map(Point2::new(50.0, 0.0));
///     assert!((top.x - 100.0).abs() < 1e-4);
/// });
///
/// assert_eq!(stack.depth(), 0);
/// assert_eq!(stack.map(Point2::new(50.0, 0.0)), Point2::new(50.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TransformStack {
    current: Isometry2<f32>,
    depth: usize,
}

impl TransformStack {
    pub fn new() -> Self {
        Self {
            current: Isometry2::identity(),
            depth: 0,
        }
    }

    /// Transform from local drawing coordinates to surface coordinates
    pub fn current(&self) -> Isometry2<f32> {
        self.current
    }

    /// Number of scopes currently open
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Net rotation of the current transform in degrees, in (-180, 180]
    pub fn rotation_degrees(&self) -> f32 {
        self.current.rotation.angle() * RAD_TO_DEG
    }

    /// Rotate subsequent drawing by `degrees` about `pivot` (local coordinates)
    pub fn rotate(&mut self, degrees: f32, pivot: Point2<f32>) {
        self.current = self.current * rotation_about(pivot, degrees);
    }

    /// Shift subsequent drawing by `(dx, dy)` (local coordinates)
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.current = self.current * translation(dx, dy);
    }

    /// Map a local point to surface coordinates
    pub fn map(&self, point: Point2<f32>) -> Point2<f32> {
        self.current * point
    }

    /// Run `body` with a saved copy of the current transform and restore it
    /// afterwards, whatever `body` did to the stack
    pub fn scoped<R>(&mut self, body: impl FnOnce(&mut Self) -> R) -> R {
        let saved = self.current;
        self.depth += 1;
        let result = body(self);
        self.depth -= 1;
        self.current = saved;
        result
    }
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new()
    }
}
