//! Render-side data for the pawn: packed GPU vertices, camera and model
//! animation, and a CPU reference of the fragment lighting model.

pub mod animation;
pub mod camera;
pub mod pipeline;
pub mod shading;

pub use animation::ModelPose;
pub use camera::Camera;
pub use pipeline::{prepare_mesh, CameraUniforms, GpuVertex, RenderMesh, VertexAttribute};
pub use shading::{shade_fragment, Fragment, LightingContext, SolidColor, TextureSampler};
