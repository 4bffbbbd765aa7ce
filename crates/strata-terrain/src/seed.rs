//! Deterministic seed derivation.
//!
//! The world seed string folds to a 32-bit hash (FNV-1a, matching the
//! persisted world format), and each chunk derives its own RNG stream from
//! that hash plus its grid coordinates. Identical inputs always yield
//! identical sequences, regardless of thread or platform.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Folds a world seed string into a 32-bit hash (FNV-1a).
pub fn world_seed_hash(seed: &str) -> u32 {
    let mut hash: u32 = 0x811c_9dc5;
    for byte in seed.bytes() {
        hash ^= u32::from(byte);
        hash = hash.wrapping_mul(0x0100_0193);
    }
    hash
}

/// Combines the world hash with chunk coordinates into a well-distributed
/// u64 for per-chunk RNG seeding.
pub fn derive_chunk_seed(world_hash: u32, cx: i32, cz: i32) -> u64 {
    let mut hasher = DefaultHasher::new();
    world_hash.hash(&mut hasher);
    cx.hash(&mut hasher);
    cz.hash(&mut hasher);
    hasher.finish()
}

/// Deterministic RNG for a specific chunk.
///
/// Produces an identical sequence for the same `(world_hash, cx, cz)`.
pub fn chunk_rng(world_hash: u32, cx: i32, cz: i32) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(derive_chunk_seed(world_hash, cx, cz))
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;

    #[test]
    fn test_world_seed_hash_is_stable_and_distinguishes_seeds() {
        assert_eq!(world_seed_hash("abc"), world_seed_hash("abc"));
        assert_ne!(world_seed_hash("abc"), world_seed_hash("abd"));
        // FNV-1a offset basis for the empty string.
        assert_eq!(world_seed_hash(""), 0x811c_9dc5);
    }

    #[test]
    fn test_chunk_rng_streams_are_reproducible_and_independent() {
        let hash = world_seed_hash("s");
        let a: Vec<u32> = chunk_rng(hash, 1, 2).random_iter().take(8).collect();
        let b: Vec<u32> = chunk_rng(hash, 1, 2).random_iter().take(8).collect();
        let c: Vec<u32> = chunk_rng(hash, 2, 1).random_iter().take(8).collect();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
