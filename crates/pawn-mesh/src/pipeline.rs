//! Profile-to-mesh pipeline: sample, normalize, revolve, cap.

use pawn_core::{Result, Validate};
use pawn_geometry::{build_profile, ProfileConfig};
use serde::{Deserialize, Serialize};

use crate::cap::{append_cap, CapConfig};
use crate::mesh::Mesh;
use crate::revolve::{revolve_profile, RevolveConfig};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PawnMeshConfig {
    pub profile: ProfileConfig,
    pub revolve: RevolveConfig,
    /// `None` leaves the body open.
    pub cap: Option<CapConfig>,
}

impl Default for PawnMeshConfig {
    fn default() -> Self {
        Self {
            profile: ProfileConfig::default(),
            revolve: RevolveConfig::default(),
            cap: Some(CapConfig::default()),
        }
    }
}

impl PawnMeshConfig {
    /// Check everything that can be checked without sampling.
    pub fn validate(&self) -> Result<()> {
        self.revolve.validate()?;
        self.profile.normalization.validate()?;
        if let Some(cap) = &self.cap {
            cap.validate()?;
        }
        Ok(())
    }
}

/// Build the complete mesh. Fails without producing a partial mesh on any
/// configuration error.
pub fn build_pawn_mesh(config: &PawnMeshConfig) -> Result<Mesh> {
    let _span = tracing::info_span!("build_pawn_mesh").entered();
    config.validate()?;

    let profile = build_profile(&config.profile)?;
    let mut mesh = revolve_profile(&profile, config.revolve.divisions)?;
    if let Some(cap) = &config.cap {
        append_cap(&mut mesh, cap)?;
    }
    mesh.validate()?;

    tracing::info!(
        rows = profile.len(),
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        "pawn mesh built"
    );
    Ok(mesh)
}
