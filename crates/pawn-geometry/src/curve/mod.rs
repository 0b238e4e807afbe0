//! Profile curves in the (radius, height) plane.

mod bezier;

use pawn_math::{Point2, Vector2};

pub use bezier::CubicBezier;

/// Trait for parametric curves in the profile plane.
///
/// `x` is the distance from the revolution axis and `y` is the height.
pub trait ProfileCurve: Send + Sync {
    /// Evaluate the curve at parameter `t`.
    fn point_at(&self, t: f64) -> Point2;

    /// Evaluate the first derivative with respect to `t`.
    fn derivative_at(&self, t: f64) -> Vector2;

    /// Return the parameter domain `(t_min, t_max)`.
    fn domain(&self) -> (f64, f64) {
        (0.0, 1.0)
    }
}
