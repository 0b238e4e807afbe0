//! Profile configuration and the built-in pawn outline.

use pawn_core::Result;
use pawn_math::Point2;
use serde::{Deserialize, Serialize};

use crate::curve::CubicBezier;
use crate::normalize::{normalize_profile_with, DerivativeScaling, NormalizationPolicy, NormalizedProfile};
use crate::profile::{sample_profile, JointPolicy, Profile};

/// Everything needed to turn Bezier segments into a normalized profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    pub segments: Vec<CubicBezier>,
    /// Samples per segment (each segment yields `resolution + 1` points)
    pub resolution: usize,
    pub joints: JointPolicy,
    pub normalization: NormalizationPolicy,
    pub derivatives: DerivativeScaling,
    /// Traced `(radius, height)` outline. When set it replaces `segments`.
    pub outline: Option<Vec<Point2>>,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            segments: pawn_profile_segments(),
            resolution: 32,
            joints: JointPolicy::Duplicate,
            normalization: NormalizationPolicy::default(),
            derivatives: DerivativeScaling::Rescale,
            outline: None,
        }
    }
}

/// Sample and normalize the configured profile.
pub fn build_profile(config: &ProfileConfig) -> Result<NormalizedProfile> {
    let profile = match &config.outline {
        Some(points) => Profile::from_polyline(points)?,
        None => sample_profile(&config.segments, config.resolution, config.joints)?,
    };
    normalize_profile_with(profile, config.normalization, config.derivatives)
}

/// Pawn silhouette traced from the base rim (top, height 1) down to the
/// head apex on the axis (height 0).
///
/// The base sits at the top so the cap quad closes it, and the downward
/// traversal makes the revolver's cross-product normals point outward.
pub fn pawn_profile_segments() -> Vec<CubicBezier> {
    vec![
        // base lip
        CubicBezier::from_array([[0.45, 1.00], [0.47, 0.98], [0.47, 0.94], [0.42, 0.92]]),
        // bead above the lip
        CubicBezier::from_array([[0.42, 0.92], [0.36, 0.90], [0.38, 0.86], [0.40, 0.84]]),
        // flared body
        CubicBezier::from_array([[0.40, 0.84], [0.40, 0.78], [0.24, 0.70], [0.18, 0.56]]),
        // neck taper
        CubicBezier::from_array([[0.18, 0.56], [0.14, 0.46], [0.12, 0.40], [0.13, 0.36]]),
        // collar
        CubicBezier::from_array([[0.13, 0.36], [0.26, 0.35], [0.26, 0.31], [0.10, 0.30]]),
        // upper head
        CubicBezier::from_array([[0.10, 0.30], [0.14, 0.27], [0.15, 0.21], [0.15, 0.15]]),
        // lower head, quarter circle closing on the axis
        CubicBezier::from_array([[0.15, 0.15], [0.15, 0.0672], [0.0828, 0.0], [0.0, 0.0]]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pawn_segments_are_continuous() {
        let segments = pawn_profile_segments();
        for pair in segments.windows(2) {
            assert!(
                (pair[0].p3 - pair[1].p0).length() < 1e-12,
                "gap between {:?} and {:?}",
                pair[0].p3,
                pair[1].p0
            );
        }
    }

    #[test]
    fn test_pawn_profile_closes_on_axis() {
        let segments = pawn_profile_segments();
        let last = segments.last().unwrap();
        assert_eq!(last.p3.x, 0.0);
        assert!(last.derivative(1.0).x < 0.0);
    }

    #[test]
    fn test_default_profile_builds() {
        let config = ProfileConfig::default();
        let profile = build_profile(&config).unwrap();
        assert_eq!(profile.len(), (config.resolution + 1) * config.segments.len());
        assert_eq!(profile.rows.first().unwrap().point.height(), 1.0);
        assert_eq!(profile.rows.last().unwrap().point.height(), 0.0);
    }

    #[test]
    fn test_outline_replaces_segments() {
        let config = ProfileConfig {
            outline: Some(vec![
                Point2::new(0.4, 0.0),
                Point2::new(0.3, 1.0),
                Point2::new(0.2, 2.0),
            ]),
            normalization: NormalizationPolicy::Linear,
            ..ProfileConfig::default()
        };
        let profile = build_profile(&config).unwrap();
        assert_eq!(profile.len(), 3);
        assert_eq!(profile.rows[1].v, 0.5);
    }

    #[test]
    fn test_derivative_scaling_from_config() {
        let outline = vec![Point2::new(0.4, 0.0), Point2::new(0.3, 1.0), Point2::new(0.2, 2.0)];
        let rescaled = ProfileConfig {
            outline: Some(outline.clone()),
            ..ProfileConfig::default()
        };
        assert_eq!(build_profile(&rescaled).unwrap().rows[1].point.derivative.y, 0.5);

        let mut preserved: ProfileConfig = serde_json::from_str(r#"{"derivatives": "preserve"}"#).unwrap();
        assert_eq!(preserved.derivatives, DerivativeScaling::Preserve);
        preserved.outline = Some(outline);
        assert_eq!(build_profile(&preserved).unwrap().rows[1].point.derivative.y, 1.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ProfileConfig = serde_json::from_str(r#"{"resolution": 8}"#).unwrap();
        assert_eq!(config.resolution, 8);
        assert_eq!(config.segments.len(), pawn_profile_segments().len());
        assert_eq!(config.joints, JointPolicy::Duplicate);
        assert_eq!(config.derivatives, DerivativeScaling::Rescale);
    }
}
