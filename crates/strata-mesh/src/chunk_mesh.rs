//! Hidden-face culling mesher.
//!
//! Emits one quad per solid-block face whose neighbor is not solid. Cells
//! outside the chunk count as air, so boundary faces are always emitted;
//! adjoining chunks overdraw at their shared border rather than leaving
//! holes. Output order is deterministic: blocks scan y, then z, then x, and
//! faces follow [`FaceDirection::ALL`].

use strata_voxel::{BlockId, CHUNK_HEIGHT, CHUNK_SIZE, ChunkData};

use crate::face_direction::FaceDirection;

/// Triangle mesh for one chunk, in chunk-local coordinates.
///
/// `positions` is a flat buffer of three floats per vertex; `indices` holds
/// two counter-clockwise triangles per quad.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChunkMesh {
    /// Vertex position buffer, three floats per vertex.
    pub positions: Vec<f32>,
    /// Triangle index buffer, six indices per quad.
    pub indices: Vec<u32>,
    /// Number of quads emitted.
    pub quads: usize,
}

impl ChunkMesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of vertices in the position buffer.
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Pushes one unit-square face of the block whose min corner is
    /// `(x, y, z)`.
    pub fn push_face(&mut self, x: usize, y: usize, z: usize, direction: FaceDirection) {
        let base = self.vertex_count() as u32;
        for corner in direction.corner_offsets() {
            self.positions.extend_from_slice(&[
                x as f32 + corner[0],
                y as f32 + corner[1],
                z as f32 + corner[2],
            ]);
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        self.quads += 1;
    }
}

/// Converts a chunk's block buffer into a triangle mesh.
///
/// Pure and deterministic: equal block buffers produce byte-identical
/// meshes. Water meshes like any solid block; transparency is a renderer
/// concern.
pub fn mesh_chunk(chunk: &ChunkData) -> ChunkMesh {
    let blocks = chunk.blocks();
    let mut mesh = ChunkMesh::new();

    let solid_at = |x: i32, y: i32, z: i32| -> bool {
        if x < 0
            || x >= CHUNK_SIZE as i32
            || y < 0
            || y >= CHUNK_HEIGHT as i32
            || z < 0
            || z >= CHUNK_SIZE as i32
        {
            return false;
        }
        let offset = ((y as usize * CHUNK_SIZE) + z as usize) * CHUNK_SIZE + x as usize;
        blocks[offset].is_solid()
    };

    for y in 0..CHUNK_HEIGHT {
        for z in 0..CHUNK_SIZE {
            for x in 0..CHUNK_SIZE {
                if !solid_at(x as i32, y as i32, z as i32) {
                    continue;
                }
                for direction in FaceDirection::ALL {
                    let (nx, ny, nz) = direction.offset(x as i32, y as i32, z as i32);
                    if !solid_at(nx, ny, nz) {
                        mesh.push_face(x, y, z, direction);
                    }
                }
            }
        }
    }

    mesh
}
