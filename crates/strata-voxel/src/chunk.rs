//! Chunk dimensions, linear offset math, block identifiers, and the chunk
//! data buffer.
//!
//! A chunk is a fixed `16 × 16 × 128` cuboid of block cells stored in a flat
//! buffer, indexed as `offset = (y * CHUNK_SIZE + z) * CHUNK_SIZE + x`.
//! Out-of-range coordinates or offsets are rejected, never silently clamped.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Side length of a chunk in blocks (X and Z).
pub const CHUNK_SIZE: usize = 16;

/// Height of a chunk in blocks (Y).
pub const CHUNK_HEIGHT: usize = 128;

/// Total number of block cells in a chunk.
pub const CHUNK_VOLUME: usize = CHUNK_SIZE * CHUNK_SIZE * CHUNK_HEIGHT;

/// A coordinate or offset fell outside the chunk's valid domain.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum BoundsError {
    /// Block coordinates outside `0..CHUNK_SIZE` / `0..CHUNK_HEIGHT`.
    #[error("block coords ({x}, {y}, {z}) out of chunk bounds")]
    Coords {
        /// X coordinate as given.
        x: usize,
        /// Y coordinate as given.
        y: usize,
        /// Z coordinate as given.
        z: usize,
    },
    /// Linear offset outside `0..CHUNK_VOLUME`.
    #[error("linear offset {0} out of chunk bounds")]
    Offset(usize),
}

/// Identifies a block material stored in a single cell.
///
/// The discriminants are the persisted wire values and must never be
/// renumbered. Obsidian is the impermeable bedrock material; Magma is the
/// hazardous one that may not touch water after generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum BlockId {
    /// Empty cell.
    Air = 0,
    /// Grassy surface material.
    Grass = 1,
    /// Subsurface soil.
    Dirt = 2,
    /// Generic deep material.
    Stone = 3,
    /// Tree trunk material.
    Wood = 4,
    /// Tree canopy material.
    Leaves = 5,
    /// Desert and shore surface material.
    Sand = 6,
    /// Liquid filling columns below sea level.
    Water = 7,
    /// Impermeable chunk floor.
    Obsidian = 8,
    /// Hazardous molten material.
    Magma = 9,
}

/// A raw byte did not map to any [`BlockId`] discriminant.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("unknown block id: {0}")]
pub struct UnknownBlockId(pub u8);

impl BlockId {
    /// Whether the mesher treats this cell as occluding.
    ///
    /// Water currently meshes as solid; translucency is the renderer's
    /// concern, keyed by block id.
    pub fn is_solid(self) -> bool {
        self != BlockId::Air
    }
}

impl From<BlockId> for u8 {
    fn from(id: BlockId) -> u8 {
        id as u8
    }
}

impl TryFrom<u8> for BlockId {
    type Error = UnknownBlockId;

    fn try_from(raw: u8) -> Result<Self, UnknownBlockId> {
        match raw {
            0 => Ok(BlockId::Air),
            1 => Ok(BlockId::Grass),
            2 => Ok(BlockId::Dirt),
            3 => Ok(BlockId::Stone),
            4 => Ok(BlockId::Wood),
            5 => Ok(BlockId::Leaves),
            6 => Ok(BlockId::Sand),
            7 => Ok(BlockId::Water),
            8 => Ok(BlockId::Obsidian),
            9 => Ok(BlockId::Magma),
            other => Err(UnknownBlockId(other)),
        }
    }
}

/// Returns `true` if `(x, y, z)` lies inside the chunk.
pub fn in_bounds(x: usize, y: usize, z: usize) -> bool {
    x < CHUNK_SIZE && y < CHUNK_HEIGHT && z < CHUNK_SIZE
}

/// Converts block coordinates to a linear buffer offset.
///
/// Exact inverse of [`coords_of`] on the valid domain.
pub fn offset_of(x: usize, y: usize, z: usize) -> Result<usize, BoundsError> {
    if !in_bounds(x, y, z) {
        return Err(BoundsError::Coords { x, y, z });
    }
    Ok((y * CHUNK_SIZE + z) * CHUNK_SIZE + x)
}

/// Converts a linear buffer offset back to block coordinates.
///
/// Exact inverse of [`offset_of`] on the valid domain.
pub fn coords_of(offset: usize) -> Result<(usize, usize, usize), BoundsError> {
    if offset >= CHUNK_VOLUME {
        return Err(BoundsError::Offset(offset));
    }
    let plane = CHUNK_SIZE * CHUNK_SIZE;
    let y = offset / plane;
    let rem = offset % plane;
    let z = rem / CHUNK_SIZE;
    let x = rem % CHUNK_SIZE;
    Ok((x, y, z))
}

/// Uniquely identifies a chunk; the sole input (besides dimensions) to
/// generation. A key always maps to the same base content.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ChunkKey {
    /// World seed string.
    pub seed: String,
    /// Chunk-grid X coordinate.
    pub cx: i32,
    /// Chunk-grid Z coordinate.
    pub cz: i32,
}

impl ChunkKey {
    /// Creates a new chunk key.
    pub fn new(seed: impl Into<String>, cx: i32, cz: i32) -> Self {
        Self {
            seed: seed.into(),
            cx,
            cz,
        }
    }

    /// Composite string key used by the persistence layer: `seed:cx:cz`.
    pub fn storage_key(&self) -> String {
        format!("{}:{}:{}", self.seed, self.cx, self.cz)
    }
}

/// A generated chunk: its key plus the flat block buffer.
///
/// Produced once by the generator, consumed by the mesher and by edit
/// application. The chunk manager never retains this; it tracks keys only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChunkData {
    /// The key this content was generated for.
    pub key: ChunkKey,
    blocks: Vec<BlockId>,
}

impl ChunkData {
    /// Creates a chunk filled entirely with air.
    pub fn new_air(key: ChunkKey) -> Self {
        Self {
            key,
            blocks: vec![BlockId::Air; CHUNK_VOLUME],
        }
    }

    /// Wraps an existing block buffer.
    ///
    /// # Panics
    /// Panics if the buffer does not hold exactly [`CHUNK_VOLUME`] cells;
    /// a short or oversized buffer is a caller bug, not a recoverable state.
    pub fn from_blocks(key: ChunkKey, blocks: Vec<BlockId>) -> Self {
        assert_eq!(
            blocks.len(),
            CHUNK_VOLUME,
            "block buffer must hold exactly one chunk volume"
        );
        Self { key, blocks }
    }

    /// Returns the block at `(x, y, z)`.
    pub fn get(&self, x: usize, y: usize, z: usize) -> Result<BlockId, BoundsError> {
        Ok(self.blocks[offset_of(x, y, z)?])
    }

    /// Sets the block at `(x, y, z)`.
    pub fn set(&mut self, x: usize, y: usize, z: usize, id: BlockId) -> Result<(), BoundsError> {
        let offset = offset_of(x, y, z)?;
        self.blocks[offset] = id;
        Ok(())
    }

    /// Returns the block at a linear offset.
    pub fn get_offset(&self, offset: usize) -> Result<BlockId, BoundsError> {
        self.blocks
            .get(offset)
            .copied()
            .ok_or(BoundsError::Offset(offset))
    }

    /// Sets the block at a linear offset.
    pub fn set_offset(&mut self, offset: usize, id: BlockId) -> Result<(), BoundsError> {
        match self.blocks.get_mut(offset) {
            Some(cell) => {
                *cell = id;
                Ok(())
            }
            None => Err(BoundsError::Offset(offset)),
        }
    }

    /// The flat block buffer in `(y, z, x)` layout.
    pub fn blocks(&self) -> &[BlockId] {
        &self.blocks
    }

    /// Consumes the chunk, handing buffer ownership to the caller.
    ///
    /// This is the transfer point for cross-thread message passing: the
    /// sender gives up access, the receiver becomes the sole owner.
    pub fn into_parts(self) -> (ChunkKey, Vec<BlockId>) {
        (self.key, self.blocks)
    }
}
