//! Cubic Bezier segments.

use pawn_math::{Point2, Vector2};
use serde::{Deserialize, Serialize};

use super::ProfileCurve;

/// One cubic Bezier piece of a profile: endpoints `p0`/`p3`, handles `c1`/`c2`.
///
/// Consecutive segments are expected to share endpoints (`p3` of one equals
/// `p0` of the next). This is not checked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicBezier {
    pub p0: Point2,
    pub c1: Point2,
    pub c2: Point2,
    pub p3: Point2,
}

impl CubicBezier {
    pub fn new(p0: Point2, c1: Point2, c2: Point2, p3: Point2) -> Self {
        Self { p0, c1, c2, p3 }
    }

    /// Build a segment from `[x, y]` pairs in `p0, c1, c2, p3` order.
    pub fn from_array(points: [[f64; 2]; 4]) -> Self {
        let [p0, c1, c2, p3] = points.map(Point2::from);
        Self { p0, c1, c2, p3 }
    }

    /// Straight segment from `start` to `end` with handles at one and two thirds.
    pub fn line(start: Point2, end: Point2) -> Self {
        let step = (end - start) / 3.0;
        Self::new(start, start + step, end - step, end)
    }

    /// `B(t) = (1-t)^3 P0 + 3(1-t)^2 t C1 + 3(1-t) t^2 C2 + t^3 P3`
    ///
    /// `t` outside `[0, 1]` extrapolates the same polynomial.
    pub fn evaluate(&self, t: f64) -> Point2 {
        let u = 1.0 - t;
        let uu = u * u;
        let tt = t * t;
        uu * u * self.p0 + 3.0 * uu * t * self.c1 + 3.0 * u * tt * self.c2 + tt * t * self.p3
    }

    /// `B'(t) = 3(1-t)^2 (C1-P0) + 6(1-t) t (C2-C1) + 3 t^2 (P3-C2)`
    pub fn derivative(&self, t: f64) -> Vector2 {
        let u = 1.0 - t;
        3.0 * u * u * (self.c1 - self.p0)
            + 6.0 * u * t * (self.c2 - self.c1)
            + 3.0 * t * t * (self.p3 - self.c2)
    }
}

impl ProfileCurve for CubicBezier {
    fn point_at(&self, t: f64) -> Point2 {
        self.evaluate(t)
    }

    fn derivative_at(&self, t: f64) -> Vector2 {
        self.derivative(t)
    }
}
