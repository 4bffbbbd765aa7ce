//! Durable delta store backed by one JSON file per chunk.
//!
//! Layout: `<root>/<seed-dir>/<cx>_<cz>.json`, where the seed directory name
//! is a sanitized form of the seed plus a hash so distinct seeds never
//! collide. If the root cannot be created at construction the store degrades
//! to in-memory behavior with exactly one warning; per-operation I/O errors
//! are absorbed by an always-written in-memory mirror. The store never
//! panics and never corrupts recorded state.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use strata_diag::reporter;
use thiserror::Error;

use crate::chunk::ChunkKey;
use crate::delta_store::{BlockDelta, DeltaStore, MemoryStore};

#[derive(Debug, Error)]
enum FileStoreError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed delta file: {0}")]
    Json(#[from] serde_json::Error),
}

/// JSON-file-backed [`DeltaStore`] with in-memory degradation.
pub struct FileStore {
    root: PathBuf,
    durable: bool,
    mirror: MemoryStore,
}

impl FileStore {
    /// Opens a store rooted at `root`, creating the directory if needed.
    ///
    /// If the directory cannot be created, the store silently degrades to
    /// in-memory semantics after warning once through the reporter.
    pub fn open(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let durable = match fs::create_dir_all(&root) {
            Ok(()) => true,
            Err(err) => {
                reporter().warn(&format!(
                    "delta store root {} is unavailable ({err}); using in-memory storage",
                    root.display()
                ));
                false
            }
        };
        Self {
            root,
            durable,
            mirror: MemoryStore::new(),
        }
    }

    /// Whether the backing directory was available at construction.
    pub fn is_durable(&self) -> bool {
        self.durable
    }

    fn seed_dir(&self, seed: &str) -> PathBuf {
        self.root.join(seed_dir_name(seed))
    }

    fn chunk_path(&self, key: &ChunkKey) -> PathBuf {
        self.seed_dir(&key.seed)
            .join(format!("{}_{}.json", key.cx, key.cz))
    }

    fn read_file(&self, key: &ChunkKey) -> Result<Option<Vec<BlockDelta>>, FileStoreError> {
        match fs::read(self.chunk_path(key)) {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write_file(&self, key: &ChunkKey, deltas: &[BlockDelta]) -> Result<(), FileStoreError> {
        fs::create_dir_all(self.seed_dir(&key.seed))?;
        let bytes = serde_json::to_vec(deltas)?;
        fs::write(self.chunk_path(key), bytes)?;
        Ok(())
    }

    fn remove_seed_dir(&self, seed: &str) -> Result<(), FileStoreError> {
        match fs::remove_dir_all(self.seed_dir(seed)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

impl DeltaStore for FileStore {
    fn load_delta(&self, key: &ChunkKey) -> Option<Vec<BlockDelta>> {
        if !self.durable {
            return self.mirror.load_delta(key);
        }
        match self.read_file(key) {
            Ok(found) => found,
            Err(err) => {
                reporter().warn(&format!(
                    "failed to read deltas for {} ({err}); serving in-memory mirror",
                    key.storage_key()
                ));
                self.mirror.load_delta(key)
            }
        }
    }

    fn save_delta(&mut self, key: &ChunkKey, deltas: Vec<BlockDelta>) {
        if self.durable
            && let Err(err) = self.write_file(key, &deltas)
        {
            reporter().warn(&format!(
                "failed to persist deltas for {} ({err}); kept in memory only",
                key.storage_key()
            ));
        }
        self.mirror.save_delta(key, deltas);
    }

    fn clear_world(&mut self, seed: &str) {
        if self.durable
            && let Err(err) = self.remove_seed_dir(seed)
        {
            reporter().warn(&format!(
                "failed to clear persisted world '{seed}' ({err})"
            ));
        }
        self.mirror.clear_world(seed);
    }
}

/// Filesystem-safe directory name for a seed.
///
/// Keeps a readable prefix and appends an FNV-1a hash of the raw seed so
/// seeds that sanitize identically still get distinct directories.
fn seed_dir_name(seed: &str) -> String {
    let cleaned: String = seed
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let mut hash: u32 = 0x811c_9dc5;
    for byte in seed.bytes() {
        hash ^= u32::from(byte);
        hash = hash.wrapping_mul(0x0100_0193);
    }
    format!("{cleaned}-{hash:08x}")
}
