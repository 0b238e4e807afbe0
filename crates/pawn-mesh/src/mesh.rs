use pawn_core::{PawnError, Result, Validate};
use pawn_math::{Aabb3, Point2, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Surface region tag carried per vertex, selecting the shading branch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum TexRegion {
    /// Revolved body, sampled from the body texture.
    #[default]
    Body = 0,
    /// Flat cap quad, sampled from the cap texture through a circular mask.
    Cap = 1,
}

impl TexRegion {
    /// Shader-side values below this decode as [`TexRegion::Body`].
    pub const THRESHOLD: f32 = 0.5;

    /// Float encoding used in the vertex attribute.
    pub fn shader_value(self) -> f32 {
        match self {
            TexRegion::Body => 0.0,
            TexRegion::Cap => 1.0,
        }
    }

    /// Decode a (possibly interpolated) shader value.
    pub fn from_shader_value(value: f32) -> Self {
        if value < Self::THRESHOLD {
            TexRegion::Body
        } else {
            TexRegion::Cap
        }
    }
}

/// One mesh vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceVertex {
    pub position: Point3,
    pub uv: Point2,
    pub region: TexRegion,
    /// Unit surface normal
    pub normal: Vector3,
}

/// Indexed triangle mesh. Indices come in triples.
///
/// Triangles wind clockwise when viewed from the side their vertex normals
/// face. The body and the cap follow the same rule.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<SurfaceVertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Append vertices and indices local to them, offsetting the indices by
    /// the current vertex count. Existing data is not renumbered.
    pub fn append(&mut self, vertices: &[SurfaceVertex], indices: &[u32]) -> Result<()> {
        if u32::try_from(self.vertices.len() + vertices.len()).is_err() {
            return Err(PawnError::Config("mesh exceeds u32 index range".into()));
        }
        let offset = self.vertices.len() as u32;
        self.vertices.extend_from_slice(vertices);
        self.indices.extend(indices.iter().map(|&i| i + offset));
        Ok(())
    }

    /// Iterate triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Unnormalized geometric normal of triangle `tri` from its corner order.
    pub fn face_normal(&self, tri: [u32; 3]) -> Vector3 {
        let p0 = self.vertices[tri[0] as usize].position;
        let p1 = self.vertices[tri[1] as usize].position;
        let p2 = self.vertices[tri[2] as usize].position;
        (p1 - p0).cross(p2 - p0)
    }

    /// Number of vertices tagged with `region`.
    pub fn region_count(&self, region: TexRegion) -> usize {
        self.vertices.iter().filter(|v| v.region == region).count()
    }

    /// Compute the axis-aligned bounding box of all positions.
    pub fn bounding_box(&self) -> Aabb3 {
        Aabb3::from_points(self.vertices.iter().map(|v| v.position))
            .unwrap_or(Aabb3::new(Point3::ZERO, Point3::ZERO))
    }
}

impl Validate for Mesh {
    fn validate(&self) -> Result<()> {
        if self.indices.len() % 3 != 0 {
            return Err(PawnError::Config(format!(
                "index count {} is not a multiple of 3",
                self.indices.len()
            )));
        }
        let n = self.vertices.len();
        if let Some(&bad) = self.indices.iter().find(|&&i| i as usize >= n) {
            return Err(PawnError::Config(format!(
                "index {} out of bounds for {} vertices",
                bad, n
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pawn_math::{dvec2, dvec3};

    fn vertex(x: f64, y: f64, z: f64) -> SurfaceVertex {
        SurfaceVertex {
            position: dvec3(x, y, z),
            uv: dvec2(0.0, 0.0),
            region: TexRegion::Body,
            normal: Vector3::Y,
        }
    }

    fn single_triangle() -> Mesh {
        Mesh {
            vertices: vec![vertex(0.0, 0.0, 0.0), vertex(1.0, 0.0, 0.0), vertex(0.0, 1.0, 0.0)],
            indices: vec![0, 1, 2],
        }
    }

    #[test]
    fn test_vertex_and_triangle_count() {
        let mesh = single_triangle();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn test_append_offsets_indices() {
        let mut a = single_triangle();
        let b = single_triangle();
        a.append(&b.vertices, &b.indices).unwrap();
        assert_eq!(a.vertex_count(), 6);
        assert_eq!(a.triangle_count(), 2);
        assert_eq!(&a.indices[..3], &[0, 1, 2]);
        assert_eq!(&a.indices[3..], &[3, 4, 5]);
        a.validate().unwrap();
    }

    #[test]
    fn test_face_normal_follows_corner_order() {
        let mesh = single_triangle();
        let n = mesh.face_normal([0, 1, 2]);
        assert_eq!(n, dvec3(0.0, 0.0, 1.0));
        let flipped = mesh.face_normal([0, 2, 1]);
        assert_eq!(flipped, dvec3(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_validate_rejects_out_of_range_index() {
        let mut mesh = single_triangle();
        mesh.indices[2] = 3;
        assert!(mesh.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_partial_triangle() {
        let mut mesh = single_triangle();
        mesh.indices.push(0);
        assert!(mesh.validate().is_err());
    }

    #[test]
    fn test_region_shader_encoding() {
        assert_eq!(TexRegion::Body.shader_value(), 0.0);
        assert_eq!(TexRegion::Cap.shader_value(), 1.0);
        assert_eq!(TexRegion::from_shader_value(0.0), TexRegion::Body);
        assert_eq!(TexRegion::from_shader_value(0.49), TexRegion::Body);
        assert_eq!(TexRegion::from_shader_value(0.5), TexRegion::Cap);
        assert_eq!(TexRegion::from_shader_value(1.0), TexRegion::Cap);
    }

    #[test]
    fn test_bounding_box() {
        let mesh = single_triangle();
        let bb = mesh.bounding_box();
        assert_eq!(bb.min, dvec3(0.0, 0.0, 0.0));
        assert_eq!(bb.max, dvec3(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_empty_mesh() {
        let mesh = Mesh::default();
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.triangle_count(), 0);
        mesh.validate().unwrap();
        let bb = mesh.bounding_box();
        assert_eq!(bb.min, Point3::ZERO);
        assert_eq!(bb.max, Point3::ZERO);
    }
}
