//! Streaming controller: decides which chunks must exist, in what order to
//! generate them, and which to discard, based on player movement.
//!
//! The manager owns no chunk content. Per key it tracks only lifecycle state
//! (`unrequested → pending → loaded → unrequested`), with a nearest-first
//! request queue. It holds plain in-memory sets with no internal locking and
//! must be driven from a single control loop; concurrent callers serialize.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use rustc_hash::FxHashSet;

use crate::chunk::{CHUNK_SIZE, ChunkKey};

/// Position of a chunk on the chunk grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkCoord {
    /// Chunk-grid X coordinate.
    pub cx: i32,
    /// Chunk-grid Z coordinate.
    pub cz: i32,
}

impl ChunkCoord {
    /// Creates a new chunk coordinate.
    pub fn new(cx: i32, cz: i32) -> Self {
        Self { cx, cz }
    }

    /// The chunk containing a world-space position.
    pub fn from_world(world_x: f64, world_z: f64) -> Self {
        Self {
            cx: (world_x / CHUNK_SIZE as f64).floor() as i32,
            cz: (world_z / CHUNK_SIZE as f64).floor() as i32,
        }
    }

    /// Chebyshev (square-ring) distance to another chunk coordinate.
    pub fn chebyshev_distance(self, other: Self) -> u32 {
        let dx = self.cx.abs_diff(other.cx);
        let dz = self.cz.abs_diff(other.cz);
        dx.max(dz)
    }
}

/// Configuration for chunk streaming.
#[derive(Clone, Copy, Debug)]
pub struct StreamConfig {
    /// Chebyshev radius of the needed set around the player's chunk.
    pub radius: u32,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self { radius: 8 }
    }
}

/// A generation request handed to an external worker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationRequest {
    /// World seed string.
    pub seed: String,
    /// Chunk-grid X coordinate.
    pub cx: i32,
    /// Chunk-grid Z coordinate.
    pub cz: i32,
}

impl GenerationRequest {
    /// The chunk key this request resolves to.
    pub fn key(&self) -> ChunkKey {
        ChunkKey::new(self.seed.clone(), self.cx, self.cz)
    }
}

/// Result of a single position update.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PositionUpdate {
    /// Number of generation requests newly enqueued by this update.
    pub requests: usize,
    /// Loaded chunks that fell outside the needed set. The manager keeps
    /// them `loaded` until [`ChunkManager::on_chunk_unloaded`] confirms.
    pub unload: Vec<ChunkCoord>,
}

/// Tracks chunk lifecycle state around the player and emits generation
/// requests and unload notices.
pub struct ChunkManager {
    seed: String,
    config: StreamConfig,
    pending: FxHashSet<ChunkCoord>,
    loaded: FxHashSet<ChunkCoord>,
    /// Min-heap keyed by Chebyshev distance at enqueue time.
    queue: BinaryHeap<Reverse<(u32, ChunkCoord)>>,
    /// Explicit last-seen guard so sub-chunk movement is a no-op.
    last_player_chunk: Option<ChunkCoord>,
}

impl ChunkManager {
    /// Creates a manager for the given world seed.
    pub fn new(seed: impl Into<String>, config: StreamConfig) -> Self {
        Self {
            seed: seed.into(),
            config,
            pending: FxHashSet::default(),
            loaded: FxHashSet::default(),
            queue: BinaryHeap::new(),
            last_player_chunk: None,
        }
    }

    /// The world seed this manager streams for.
    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Recomputes the needed chunk set for a new player position.
    ///
    /// Returns a no-op result when the resulting chunk coordinate is
    /// unchanged since the last call. Otherwise enqueues a request for every
    /// needed chunk that is neither pending nor loaded, and reports loaded
    /// chunks outside the needed set for unloading. Requests already in
    /// flight for chunks that fell out of the needed set are not cancelled;
    /// they complete, load, and become unload candidates on the next update.
    pub fn update_player_position(&mut self, world_x: f64, world_z: f64) -> PositionUpdate {
        let center = ChunkCoord::from_world(world_x, world_z);
        if self.last_player_chunk == Some(center) {
            return PositionUpdate::default();
        }
        self.last_player_chunk = Some(center);

        let radius = self.config.radius as i32;
        let mut needed = FxHashSet::default();
        let mut requests = 0;
        for dz in -radius..=radius {
            for dx in -radius..=radius {
                let coord = ChunkCoord::new(center.cx + dx, center.cz + dz);
                needed.insert(coord);
                if !self.loaded.contains(&coord) && !self.pending.contains(&coord) {
                    self.pending.insert(coord);
                    self.queue
                        .push(Reverse((center.chebyshev_distance(coord), coord)));
                    requests += 1;
                }
            }
        }

        let mut unload: Vec<ChunkCoord> = self
            .loaded
            .iter()
            .filter(|coord| !needed.contains(coord))
            .copied()
            .collect();
        unload.sort_unstable();

        tracing::debug!(
            cx = center.cx,
            cz = center.cz,
            requests,
            unload = unload.len(),
            "player chunk changed"
        );

        PositionUpdate { requests, unload }
    }

    /// Pops the next generation request, nearest-first.
    ///
    /// Ordering is by Chebyshev distance to the player's chunk at the time
    /// of the update that enqueued the request, not arrival order.
    pub fn next_request(&mut self) -> Option<GenerationRequest> {
        let Reverse((_dist, coord)) = self.queue.pop()?;
        Some(GenerationRequest {
            seed: self.seed.clone(),
            cx: coord.cx,
            cz: coord.cz,
        })
    }

    /// Transitions a chunk `pending → loaded` once its content exists.
    pub fn on_chunk_generated(&mut self, key: &ChunkKey) {
        let coord = ChunkCoord::new(key.cx, key.cz);
        self.pending.remove(&coord);
        self.loaded.insert(coord);
    }

    /// Transitions a chunk `loaded → unrequested` after the caller has
    /// actually discarded it.
    pub fn on_chunk_unloaded(&mut self, cx: i32, cz: i32) {
        self.loaded.remove(&ChunkCoord::new(cx, cz));
    }

    /// Forgets a pending request whose generation failed or timed out.
    ///
    /// There is no automatic retry: clearing the pending mark lets the next
    /// position update enqueue the chunk again if it is still needed.
    pub fn on_generation_failed(&mut self, cx: i32, cz: i32) {
        self.pending.remove(&ChunkCoord::new(cx, cz));
    }

    /// Number of chunks currently marked loaded.
    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }

    /// Number of chunks currently pending generation.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}
