//! Voxel-to-triangle-mesh conversion with hidden-face culling.

mod chunk_mesh;
mod face_direction;

pub use chunk_mesh::{ChunkMesh, mesh_chunk};
pub use face_direction::FaceDirection;
