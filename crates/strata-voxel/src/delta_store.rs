//! Per-chunk edit persistence, independent of regeneration.
//!
//! Player edits are recorded as deltas against the generated baseline and
//! replayed onto freshly generated chunks by the caller. Stores are keyed by
//! [`ChunkKey::storage_key`] (`seed:cx:cz`), so a whole world can be cleared
//! by seed namespace.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use strata_diag::reporter;

use crate::chunk::{BlockId, ChunkData, ChunkKey};

/// A single cell override relative to the generated baseline of one chunk.
///
/// The persisted shape is `{"offset": int, "id": int}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockDelta {
    /// Linear offset of the edited cell.
    pub offset: u32,
    /// Block the cell was changed to.
    pub id: BlockId,
}

/// Persistence of player edits per chunk.
///
/// Infallible by contract: implementations degrade internally (warning
/// through the reporter) rather than surfacing environment errors.
pub trait DeltaStore {
    /// Returns the recorded delta list for a chunk, or `None` if no edits
    /// were ever saved for it.
    fn load_delta(&self, key: &ChunkKey) -> Option<Vec<BlockDelta>>;

    /// Replaces the full delta list for a chunk (not an incremental merge).
    fn save_delta(&mut self, key: &ChunkKey, deltas: Vec<BlockDelta>);

    /// Removes every recorded chunk under the given seed's namespace.
    fn clear_world(&mut self, seed: &str);
}

/// Fully authoritative in-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    map: FxHashMap<String, Vec<BlockDelta>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of chunks with recorded edits.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if no chunk has recorded edits.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl DeltaStore for MemoryStore {
    fn load_delta(&self, key: &ChunkKey) -> Option<Vec<BlockDelta>> {
        self.map.get(&key.storage_key()).cloned()
    }

    fn save_delta(&mut self, key: &ChunkKey, deltas: Vec<BlockDelta>) {
        self.map.insert(key.storage_key(), deltas);
    }

    fn clear_world(&mut self, seed: &str) {
        let prefix = format!("{seed}:");
        self.map.retain(|stored, _| !stored.starts_with(&prefix));
    }
}

/// Replays recorded edits onto a freshly generated chunk.
///
/// Offsets outside the chunk volume indicate corrupted persistence; they are
/// skipped with a warning rather than poisoning the whole chunk.
pub fn apply_deltas(chunk: &mut ChunkData, deltas: &[BlockDelta]) {
    for delta in deltas {
        if chunk.set_offset(delta.offset as usize, delta.id).is_err() {
            reporter().warn(&format!(
                "skipping delta with out-of-range offset {} for chunk {}",
                delta.offset,
                chunk.key.storage_key()
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::{CHUNK_VOLUME, offset_of};

    #[test]
    fn test_save_then_load_returns_exact_list() {
        let mut store = MemoryStore::new();
        let key = ChunkKey::new("s", 0, 0);
        let deltas = vec![
            BlockDelta {
                offset: 1,
                id: BlockId::Grass,
            },
            BlockDelta {
                offset: 300,
                id: BlockId::Air,
            },
        ];

        store.save_delta(&key, deltas.clone());
        assert_eq!(store.load_delta(&key), Some(deltas));
        assert_eq!(store.load_delta(&ChunkKey::new("s", 1, 0)), None);
    }

    #[test]
    fn test_save_replaces_rather_than_merges() {
        let mut store = MemoryStore::new();
        let key = ChunkKey::new("s", 2, -1);
        store.save_delta(
            &key,
            vec![BlockDelta {
                offset: 5,
                id: BlockId::Stone,
            }],
        );
        store.save_delta(&key, vec![]);
        assert_eq!(store.load_delta(&key), Some(vec![]));
    }

    #[test]
    fn test_clear_world_removes_only_that_seed() {
        let mut store = MemoryStore::new();
        store.save_delta(&ChunkKey::new("a", 0, 0), vec![]);
        store.save_delta(&ChunkKey::new("a", 1, 0), vec![]);
        store.save_delta(&ChunkKey::new("ab", 0, 0), vec![]);
        store.save_delta(&ChunkKey::new("b", 0, 0), vec![]);

        store.clear_world("a");

        assert_eq!(store.load_delta(&ChunkKey::new("a", 0, 0)), None);
        assert_eq!(store.load_delta(&ChunkKey::new("a", 1, 0)), None);
        // Prefix matching must not bleed into longer seed names.
        assert!(store.load_delta(&ChunkKey::new("ab", 0, 0)).is_some());
        assert!(store.load_delta(&ChunkKey::new("b", 0, 0)).is_some());
    }

    #[test]
    fn test_apply_deltas_overrides_baseline() {
        let mut chunk = ChunkData::new_air(ChunkKey::new("s", 0, 0));
        let offset = offset_of(3, 10, 4).expect("in range") as u32;
        apply_deltas(
            &mut chunk,
            &[BlockDelta {
                offset,
                id: BlockId::Wood,
            }],
        );
        assert_eq!(chunk.get(3, 10, 4), Ok(BlockId::Wood));
    }

    #[test]
    fn test_apply_deltas_skips_out_of_range_offsets() {
        let mut chunk = ChunkData::new_air(ChunkKey::new("s", 0, 0));
        apply_deltas(
            &mut chunk,
            &[
                BlockDelta {
                    offset: CHUNK_VOLUME as u32,
                    id: BlockId::Stone,
                },
                BlockDelta {
                    offset: 0,
                    id: BlockId::Sand,
                },
            ],
        );
        // The valid delta still lands.
        assert_eq!(chunk.get(0, 0, 0), Ok(BlockId::Sand));
    }
}
