//! Sampling of profile curves into a discrete (radius, height) polyline.

use pawn_core::{PawnError, Result};
use pawn_math::{Aabb2, Point2, Vector2};
use serde::{Deserialize, Serialize};

use crate::curve::{CubicBezier, ProfileCurve};

/// A sampled point on the profile with its derivative along the curve parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfilePoint {
    /// `x` = radius, `y` = height
    pub position: Point2,
    /// `(d radius, d height)` with respect to the curve parameter
    pub derivative: Vector2,
}

impl ProfilePoint {
    pub fn new(position: Point2, derivative: Vector2) -> Self {
        Self {
            position,
            derivative,
        }
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.position.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.position.y
    }
}

/// How samples at the shared endpoint of two consecutive segments are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JointPolicy {
    /// Keep both samples. The revolved mesh gets a zero-height triangle row at
    /// every joint.
    #[default]
    Duplicate,
    /// Drop the `t = 0` sample of every segment after the first.
    Merge,
}

/// Ordered profile samples in curve traversal order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Profile {
    pub points: Vec<ProfilePoint>,
}

impl Profile {
    pub fn new(points: Vec<ProfilePoint>) -> Self {
        Self { points }
    }

    /// Build a profile from a raw `(radius, height)` table.
    ///
    /// Derivatives are estimated with central differences over the point index
    /// (one-sided at both ends).
    pub fn from_polyline(points: &[Point2]) -> Result<Self> {
        if points.len() < 2 {
            return Err(PawnError::Config(format!(
                "polyline profile needs at least 2 points, got {}",
                points.len()
            )));
        }

        let last = points.len() - 1;
        let samples = points
            .iter()
            .enumerate()
            .map(|(i, &p)| {
                let derivative = match i {
                    0 => points[1] - points[0],
                    i if i == last => points[last] - points[last - 1],
                    i => (points[i + 1] - points[i - 1]) * 0.5,
                };
                ProfilePoint::new(p, derivative)
            })
            .collect();
        Ok(Self { points: samples })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn bounds(&self) -> Option<Aabb2> {
        Aabb2::from_points(self.points.iter().map(|p| p.position))
    }
}

/// Sample each curve at `resolution + 1` evenly spaced parameters over its domain.
pub fn sample_curves<C: ProfileCurve>(
    curves: &[C],
    resolution: usize,
    joints: JointPolicy,
) -> Result<Profile> {
    if curves.is_empty() {
        return Err(PawnError::Config("profile has no segments".into()));
    }
    if resolution == 0 {
        return Err(PawnError::Config(
            "profile resolution must be at least 1".into(),
        ));
    }

    let mut points = Vec::with_capacity((resolution + 1) * curves.len());
    for (index, curve) in curves.iter().enumerate() {
        let first = match joints {
            JointPolicy::Merge if index > 0 => 1,
            _ => 0,
        };
        let (t_min, t_max) = curve.domain();
        for i in first..=resolution {
            let t = t_min + (t_max - t_min) * i as f64 / resolution as f64;
            points.push(ProfilePoint::new(curve.point_at(t), curve.derivative_at(t)));
        }
    }

    tracing::debug!(
        segments = curves.len(),
        resolution,
        samples = points.len(),
        "sampled profile"
    );
    Ok(Profile { points })
}

/// Sample an ordered list of Bezier segments into one continuous profile.
///
/// With [`JointPolicy::Duplicate`] the output has `(resolution + 1) * segments`
/// points.
pub fn sample_profile(
    segments: &[CubicBezier],
    resolution: usize,
    joints: JointPolicy,
) -> Result<Profile> {
    sample_curves(segments, resolution, joints)
}
