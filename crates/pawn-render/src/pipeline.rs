use bytemuck::{Pod, Zeroable};
use pawn_core::{Result, Validate};
use pawn_mesh::{Mesh, SurfaceVertex};

/// Vertex with f32 data packed for GPU.
///
/// Attribute locations: 0 position, 1 uv, 2 region id, 3 normal.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GpuVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
    pub tex_id: f32,
    pub normal: [f32; 3],
}

/// One vertex attribute as the shader sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    pub location: u32,
    /// Byte offset inside [`GpuVertex`]
    pub offset: usize,
    /// Number of f32 components
    pub components: u32,
}

impl GpuVertex {
    pub const STRIDE: usize = std::mem::size_of::<GpuVertex>();

    pub const ATTRIBUTES: [VertexAttribute; 4] = [
        VertexAttribute {
            location: 0,
            offset: std::mem::offset_of!(GpuVertex, position),
            components: 3,
        },
        VertexAttribute {
            location: 1,
            offset: std::mem::offset_of!(GpuVertex, uv),
            components: 2,
        },
        VertexAttribute {
            location: 2,
            offset: std::mem::offset_of!(GpuVertex, tex_id),
            components: 1,
        },
        VertexAttribute {
            location: 3,
            offset: std::mem::offset_of!(GpuVertex, normal),
            components: 3,
        },
    ];

    /// Create a GPU vertex from mesh vertex data.
    pub fn from_surface_vertex(v: &SurfaceVertex) -> Self {
        Self {
            position: v.position.as_vec3().to_array(),
            uv: v.uv.as_vec2().to_array(),
            tex_id: v.region.shader_value(),
            normal: v.normal.as_vec3().to_array(),
        }
    }
}

/// Prepared render data ready for GPU upload.
#[derive(Debug, Clone)]
pub struct RenderMesh {
    pub vertices: Vec<GpuVertex>,
    pub indices: Vec<u32>,
    pub vertex_buffer_bytes: Vec<u8>,
    pub index_buffer_bytes: Vec<u8>,
}

impl RenderMesh {
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }
}

/// Convert a mesh to GPU-ready buffers. The mesh is validated first so the
/// index buffer never points past the vertex buffer.
pub fn prepare_mesh(mesh: &Mesh) -> Result<RenderMesh> {
    mesh.validate()?;
    let vertices: Vec<GpuVertex> = mesh.vertices.iter().map(GpuVertex::from_surface_vertex).collect();

    let vertex_buffer_bytes = bytemuck::cast_slice(&vertices).to_vec();
    let index_buffer_bytes = bytemuck::cast_slice(&mesh.indices).to_vec();
    tracing::debug!(
        vertices = vertices.len(),
        indices = mesh.indices.len(),
        bytes = vertex_buffer_bytes.len() + index_buffer_bytes.len(),
        "prepared render mesh"
    );

    Ok(RenderMesh {
        vertices,
        indices: mesh.indices.clone(),
        vertex_buffer_bytes,
        index_buffer_bytes,
    })
}

/// Uniform buffer for camera and model matrices, column-major.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct CameraUniforms {
    pub model: [[f32; 4]; 4],
    pub view_projection: [[f32; 4]; 4],
    pub mvp: [[f32; 4]; 4],
    pub eye_position: [f32; 4],
}

impl CameraUniforms {
    pub fn new(camera: &crate::camera::Camera, pose: &crate::animation::ModelPose) -> Self {
        let model = pose.model_matrix();
        let view_projection = camera.view_projection();
        let eye = camera.eye.as_vec3();
        Self {
            model: model.as_mat4().to_cols_array_2d(),
            view_projection: view_projection.as_mat4().to_cols_array_2d(),
            mvp: (view_projection * model).as_mat4().to_cols_array_2d(),
            eye_position: [eye.x, eye.y, eye.z, 1.0],
        }
    }
}
