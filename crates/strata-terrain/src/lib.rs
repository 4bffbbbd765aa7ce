//! Deterministic chunk terrain generation: seed derivation, smoothed
//! hash-noise fields, biome assignment, and the column-fill pipeline.

mod biome;
mod generator;
mod noise_field;
mod seed;

pub use biome::Biome;
pub use generator::{Generator, TerrainConfig, generate_chunk};
pub use noise_field::NoiseField2;
pub use seed::{chunk_rng, derive_chunk_seed, world_seed_hash};
