//! PawnForge geometry: profile curves, sampling, and height normalization.

pub mod config;
pub mod curve;
pub mod normalize;
pub mod profile;

pub use config::{build_profile, pawn_profile_segments, ProfileConfig};
pub use curve::{CubicBezier, ProfileCurve};
pub use normalize::{
    normalize_profile, normalize_profile_with, DerivativeScaling, NormalizationPolicy, NormalizedProfile,
    ProfileRow,
};
pub use profile::{sample_curves, sample_profile, JointPolicy, Profile, ProfilePoint};
