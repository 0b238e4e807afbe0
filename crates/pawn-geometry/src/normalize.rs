//! Height normalization and texture-V assignment.

use pawn_core::{PawnError, Result, Tolerance};
use pawn_math::Aabb2;
use serde::{Deserialize, Serialize};

use crate::profile::{Profile, ProfilePoint};

/// How normalized height maps to texture-V.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NormalizationPolicy {
    /// `v` is the normalized height.
    Linear,
    /// The texture restarts at height fraction `seam`: `[0, seam]` and
    /// `[seam, 1]` each map onto `[0, 1]`.
    SplitRemap { seam: f64 },
}

impl NormalizationPolicy {
    /// Seam fraction matched to the stock body texture's proportions.
    pub const DEFAULT_SEAM: f64 = 0.24089;

    pub fn validate(&self) -> Result<()> {
        match *self {
            NormalizationPolicy::Linear => Ok(()),
            NormalizationPolicy::SplitRemap { seam } if seam > 0.0 && seam < 1.0 => Ok(()),
            NormalizationPolicy::SplitRemap { seam } => Err(PawnError::Config(format!(
                "split-remap seam must lie in (0, 1), got {}",
                seam
            ))),
        }
    }

    /// Map a normalized height in `[0, 1]` to texture-V.
    pub fn texture_v(&self, v: f64) -> f64 {
        match *self {
            NormalizationPolicy::Linear => v,
            NormalizationPolicy::SplitRemap { seam } => {
                if v <= seam {
                    v / seam
                } else {
                    (v - seam) / (1.0 - seam)
                }
            }
        }
    }
}

impl Default for NormalizationPolicy {
    fn default() -> Self {
        NormalizationPolicy::SplitRemap {
            seam: Self::DEFAULT_SEAM,
        }
    }
}

/// What normalization does to the height derivative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DerivativeScaling {
    /// Scale by the same factor as the height, so normals follow the rescaled
    /// shape.
    #[default]
    Rescale,
    /// Keep the sampled derivative as is. Normals then describe the profile
    /// at its authored height.
    Preserve,
}

/// One profile row after normalization: height in `[0, 1]` plus texture-V.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileRow {
    pub point: ProfilePoint,
    pub v: f64,
}

/// A profile whose heights span exactly `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedProfile {
    pub rows: Vec<ProfileRow>,
    /// Bounds of the profile before rescaling.
    pub source_bounds: Aabb2,
}

impl NormalizedProfile {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Rescale heights to `[0, 1]` and assign texture-V according to `policy`.
///
/// Height derivatives are scaled by the same factor so normals computed from
/// them match the rescaled shape. Radii are left untouched.
pub fn normalize_profile(profile: Profile, policy: NormalizationPolicy) -> Result<NormalizedProfile> {
    normalize_profile_with(profile, policy, DerivativeScaling::Rescale)
}

/// [`normalize_profile`] with explicit control over the height derivative.
pub fn normalize_profile_with(
    profile: Profile,
    policy: NormalizationPolicy,
    derivatives: DerivativeScaling,
) -> Result<NormalizedProfile> {
    policy.validate()?;
    let source_bounds = profile
        .bounds()
        .ok_or_else(|| PawnError::Config("cannot normalize an empty profile".into()))?;

    let extent = source_bounds.height();
    if !Tolerance::default().is_significant(extent) {
        return Err(PawnError::DegenerateProfile(format!(
            "profile has no height extent (min y = {}, max y = {})",
            source_bounds.min.y, source_bounds.max.y
        )));
    }

    let min_y = source_bounds.min.y;
    let rows = profile
        .points
        .into_iter()
        .map(|mut point| {
            point.position.y = (point.position.y - min_y) / extent;
            if derivatives == DerivativeScaling::Rescale {
                point.derivative.y /= extent;
            }
            let v = policy.texture_v(point.position.y);
            ProfileRow { point, v }
        })
        .collect();

    Ok(NormalizedProfile {
        rows,
        source_bounds,
    })
}
