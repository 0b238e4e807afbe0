pub mod cap;
pub mod mesh;
pub mod pipeline;
pub mod revolve;

pub use cap::{append_cap, CapConfig, CapSide};
pub use mesh::{Mesh, SurfaceVertex, TexRegion};
pub use pipeline::{build_pawn_mesh, PawnMeshConfig};
pub use revolve::{revolve_indices, revolve_profile, surface_normal, NormalSource, RevolveConfig};
