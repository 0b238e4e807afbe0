//! Flat textured quad closing one end of the revolved body.

use pawn_core::{PawnError, Result};
use pawn_math::{dvec2, dvec3, Vector3};
use serde::{Deserialize, Serialize};

use crate::mesh::{Mesh, SurfaceVertex, TexRegion};

/// Which end of the body the cap closes; decides the normal direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapSide {
    /// Normal `+Y`
    #[default]
    Top,
    /// Normal `-Y`
    Bottom,
}

impl CapSide {
    pub fn normal(self) -> Vector3 {
        match self {
            CapSide::Top => Vector3::Y,
            CapSide::Bottom => Vector3::NEG_Y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapConfig {
    /// Height of the quad in normalized profile units
    pub height: f64,
    /// Half the side length of the square quad
    pub half_extent: f64,
    pub side: CapSide,
}

impl CapConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.height.is_finite() {
            return Err(PawnError::Config(format!(
                "cap height must be finite, got {}",
                self.height
            )));
        }
        if !(self.half_extent > 0.0 && self.half_extent.is_finite()) {
            return Err(PawnError::Config(format!(
                "cap half extent must be positive, got {}",
                self.half_extent
            )));
        }
        Ok(())
    }
}

impl Default for CapConfig {
    fn default() -> Self {
        Self {
            height: 0.995,
            half_extent: 0.5,
            side: CapSide::Top,
        }
    }
}

/// Append the cap quad (4 vertices, 2 triangles) tagged [`TexRegion::Cap`].
///
/// UVs span the full `[0, 1]` square so the shading stage can mask a disc
/// around `(0.5, 0.5)`.
pub fn append_cap(mesh: &mut Mesh, config: &CapConfig) -> Result<()> {
    config.validate()?;
    let h = config.half_extent;
    let y = config.height;
    let normal = config.side.normal();

    let corner = |x: f64, z: f64, u: f64, v: f64| SurfaceVertex {
        position: dvec3(x, y, z),
        uv: dvec2(u, v),
        region: TexRegion::Cap,
        normal,
    };
    let vertices = [
        corner(-h, -h, 0.0, 0.0),
        corner(h, -h, 1.0, 0.0),
        corner(h, h, 1.0, 1.0),
        corner(-h, h, 0.0, 1.0),
    ];
    let indices: [u32; 6] = match config.side {
        CapSide::Top => [0, 1, 2, 2, 3, 0],
        CapSide::Bottom => [0, 2, 1, 2, 0, 3],
    };

    mesh.append(&vertices, &indices)?;
    tracing::debug!(height = y, side = ?config.side, "appended cap quad");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pawn_core::Validate;

    fn body_stub() -> Mesh {
        let vertex = SurfaceVertex {
            position: dvec3(0.0, 0.0, 0.0),
            uv: dvec2(0.0, 0.0),
            region: TexRegion::Body,
            normal: Vector3::X,
        };
        Mesh {
            vertices: vec![vertex; 5],
            indices: vec![0, 1, 2, 2, 3, 4],
        }
    }

    #[test]
    fn test_cap_offsets_indices() {
        let mut mesh = body_stub();
        append_cap(&mut mesh, &CapConfig::default()).unwrap();
        assert_eq!(mesh.vertex_count(), 9);
        assert_eq!(mesh.triangle_count(), 4);
        assert_eq!(&mesh.indices[..6], &[0, 1, 2, 2, 3, 4]);
        assert_eq!(&mesh.indices[6..], &[5, 6, 7, 7, 8, 5]);
        mesh.validate().unwrap();
    }

    #[test]
    fn test_cap_vertices() {
        let mut mesh = Mesh::default();
        let config = CapConfig::default();
        append_cap(&mut mesh, &config).unwrap();
        assert_eq!(mesh.region_count(TexRegion::Cap), 4);
        for v in &mesh.vertices {
            assert_eq!(v.position.y, 0.995);
            assert_eq!(v.position.x.abs(), 0.5);
            assert_eq!(v.position.z.abs(), 0.5);
            assert_eq!(v.normal, Vector3::Y);
        }
        let uvs: Vec<_> = mesh.vertices.iter().map(|v| (v.uv.x, v.uv.y)).collect();
        assert_eq!(uvs, vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
    }

    #[test]
    fn test_winding_opposes_normal_on_both_sides() {
        for side in [CapSide::Top, CapSide::Bottom] {
            let mut mesh = Mesh::default();
            append_cap(&mut mesh, &CapConfig { side, ..CapConfig::default() }).unwrap();
            for tri in mesh.triangles() {
                let face = mesh.face_normal(tri);
                assert!(face.length() > 0.0);
                assert!(face.dot(side.normal()) < 0.0, "{:?} winding", side);
            }
        }
    }

    #[test]
    fn test_invalid_extent_rejected() {
        let mut mesh = Mesh::default();
        let config = CapConfig {
            half_extent: 0.0,
            ..CapConfig::default()
        };
        assert!(append_cap(&mut mesh, &config).is_err());
        assert_eq!(mesh.vertex_count(), 0);
    }
}
