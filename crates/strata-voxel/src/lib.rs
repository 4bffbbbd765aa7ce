//! Voxel data model and chunk lifecycle management: dimensions and offset
//! math, block identifiers, chunk data buffers, the streaming chunk manager,
//! and per-chunk edit persistence.

pub mod chunk;
pub mod chunk_manager;
pub mod delta_store;
pub mod file_store;

pub use chunk::{
    BlockId, BoundsError, CHUNK_HEIGHT, CHUNK_SIZE, CHUNK_VOLUME, ChunkData, ChunkKey,
    UnknownBlockId, coords_of, in_bounds, offset_of,
};
pub use chunk_manager::{
    ChunkCoord, ChunkManager, GenerationRequest, PositionUpdate, StreamConfig,
};
pub use delta_store::{BlockDelta, DeltaStore, MemoryStore, apply_deltas};
pub use file_store::FileStore;
