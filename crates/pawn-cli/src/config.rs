use std::path::Path;

use pawn_core::{PawnError, Result, Validate};
use pawn_mesh::PawnMeshConfig;
use pawn_texture::TextureConfig;
use serde::{Deserialize, Serialize};

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PawnConfig {
    pub mesh: PawnMeshConfig,
    pub texture: TextureConfig,
}

impl PawnConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let config: PawnConfig =
            serde_json::from_str(text).map_err(|e| PawnError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| PawnError::Config(e.to_string()))
    }
}

impl Validate for PawnConfig {
    fn validate(&self) -> Result<()> {
        self.mesh.validate()?;
        self.texture.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_default() {
        let config = PawnConfig::from_json("{}").unwrap();
        assert_eq!(config, PawnConfig::default());
    }

    #[test]
    fn test_partial_sections() {
        let config = PawnConfig::from_json(
            r#"{ "mesh": { "revolve": { "divisions": 12 } }, "texture": { "seed": 4 } }"#,
        )
        .unwrap();
        assert_eq!(config.mesh.revolve.divisions, 12);
        assert_eq!(config.texture.seed, Some(4));
        assert_eq!(config.texture.tiles_x, 120);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = PawnConfig::from_json(r#"{ "texture": { "primary_probability": 2.0 } }"#).unwrap_err();
        assert!(matches!(err, PawnError::Config(_)));
        let err = PawnConfig::from_json(r#"{ "mesh": { "revolve": { "divisions": 2 } } }"#).unwrap_err();
        assert!(matches!(err, PawnError::Config(_)));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(PawnConfig::from_json("{ mesh"), Err(PawnError::Config(_))));
    }

    #[test]
    fn test_round_trip() {
        let config = PawnConfig::default();
        let back = PawnConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(back, config);
    }
}
