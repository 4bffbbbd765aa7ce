//! Deterministic chunk generation.
//!
//! `generate` is a pure function of `(seed, cx, cz)`: no hidden random
//! state, no side effects, bit-identical output for identical inputs. The
//! pipeline per column: biome and height from smoothed hash-noise, an
//! unconditional obsidian floor, rare magma pockets, depth-from-surface
//! fill, water up to sea level, downward water percolation, and a final
//! whole-chunk pass that solidifies any magma touching water.

use rand::Rng;

use strata_voxel::{BlockId, CHUNK_HEIGHT, CHUNK_SIZE, CHUNK_VOLUME, ChunkData, ChunkKey};

use crate::biome::Biome;
use crate::noise_field::NoiseField2;
use crate::seed::{chunk_rng, world_seed_hash};

/// Tunable generation parameters.
#[derive(Clone, Debug)]
pub struct TerrainConfig {
    /// Water fills air below this height in columns lower than it.
    pub sea_level: usize,
    /// The bottom `floor_depth` layers of every chunk are obsidian.
    pub floor_depth: usize,
    /// Per-column probability of seeding a magma pocket above the floor.
    pub magma_chance: f64,
    /// Lattice cell size of the biome noise field, in world units.
    pub biome_cell_size: f64,
    /// Lattice cell size of the column height noise field, in world units.
    pub height_cell_size: f64,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            sea_level: 20,
            floor_depth: 3,
            magma_chance: 0.02,
            biome_cell_size: 48.0,
            height_cell_size: 12.0,
        }
    }
}

/// Deterministic terrain generator.
pub struct Generator {
    config: TerrainConfig,
}

/// Generates a chunk with the default configuration.
pub fn generate_chunk(seed: &str, cx: i32, cz: i32) -> ChunkData {
    Generator::new(TerrainConfig::default()).generate(seed, cx, cz)
}

impl Generator {
    /// Creates a generator with the given configuration.
    pub fn new(config: TerrainConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// Generates the base content for one chunk.
    ///
    /// Never fails for in-range dimensions; there is no error path here.
    pub fn generate(&self, seed: &str, cx: i32, cz: i32) -> ChunkData {
        let world_hash = world_seed_hash(seed);
        let biome_field = self.biome_field(world_hash);
        let height_field = self.height_field(world_hash);

        let mut blocks = vec![BlockId::Air; CHUNK_VOLUME];
        let mut rng = chunk_rng(world_hash, cx, cz);
        let floor = self.config.floor_depth;
        let sea = self.config.sea_level;

        for x in 0..CHUNK_SIZE {
            for z in 0..CHUNK_SIZE {
                let wx = f64::from(cx) * CHUNK_SIZE as f64 + x as f64;
                let wz = f64::from(cz) * CHUNK_SIZE as f64 + z as f64;
                let biome = Biome::classify(biome_field.sample(wx, wz));
                let height = self.column_height_at(&height_field, biome, wx, wz);

                // Unconditional obsidian floor.
                for y in 0..floor {
                    blocks[block_index(x, y, z)] = BlockId::Obsidian;
                }

                // Rare magma pocket just above the floor, strictly below the
                // column surface.
                if rng.random::<f64>() < self.config.magma_chance {
                    let y = floor + rng.random_range(0..2usize);
                    if y < height {
                        blocks[block_index(x, y, z)] = BlockId::Magma;
                    }
                }

                // Fill remaining solids top-down by depth from surface.
                for y in (floor..height).rev() {
                    let cell = &mut blocks[block_index(x, y, z)];
                    if *cell != BlockId::Air {
                        continue;
                    }
                    let depth = height - 1 - y;
                    *cell = if depth == 0 {
                        biome.surface_block()
                    } else if depth < 4 {
                        biome.subsurface_block()
                    } else {
                        BlockId::Stone
                    };
                }

                // Columns below sea level flood up to it.
                if height < sea {
                    for y in height..sea {
                        let cell = &mut blocks[block_index(x, y, z)];
                        if *cell == BlockId::Air {
                            *cell = BlockId::Water;
                        }
                    }
                }
            }
        }

        percolate_water(&mut blocks);
        solidify_magma(&mut blocks);

        ChunkData::from_blocks(ChunkKey::new(seed, cx, cz), blocks)
    }

    /// Column height (number of ground cells) at a world position.
    pub fn column_height(&self, seed: &str, wx: f64, wz: f64) -> usize {
        let world_hash = world_seed_hash(seed);
        let biome = Biome::classify(self.biome_field(world_hash).sample(wx, wz));
        self.column_height_at(&self.height_field(world_hash), biome, wx, wz)
    }

    /// Biome at a world position.
    pub fn biome_at(&self, seed: &str, wx: f64, wz: f64) -> Biome {
        Biome::classify(self.biome_field(world_seed_hash(seed)).sample(wx, wz))
    }

    fn biome_field(&self, world_hash: u32) -> NoiseField2 {
        NoiseField2::new(world_hash, self.config.biome_cell_size)
    }

    fn height_field(&self, world_hash: u32) -> NoiseField2 {
        // Decorrelate from the biome field sharing the same world hash.
        NoiseField2::new(world_hash.wrapping_add(0x9e37_79b9), self.config.height_cell_size)
    }

    fn column_height_at(&self, field: &NoiseField2, biome: Biome, wx: f64, wz: f64) -> usize {
        let swing = (field.sample(wx, wz) * 2.0 - 1.0) * biome.amplitude();
        let raw = self.config.sea_level as f64 + biome.base_offset() + swing;
        let min = self.config.floor_depth as i64 + 1;
        let max = (CHUNK_HEIGHT - 16) as i64;
        (raw.floor() as i64).clamp(min, max) as usize
    }
}

fn block_index(x: usize, y: usize, z: usize) -> usize {
    (y * CHUNK_SIZE + z) * CHUNK_SIZE + x
}

/// Continues each column's water downward through air pockets.
///
/// Water flows from the lowest water cell into directly-below air, stopping
/// at the first non-air cell. Magma blocks percolation like any solid.
pub(crate) fn percolate_water(blocks: &mut [BlockId]) {
    for x in 0..CHUNK_SIZE {
        for z in 0..CHUNK_SIZE {
            let lowest_water = (0..CHUNK_HEIGHT)
                .find(|&y| blocks[block_index(x, y, z)] == BlockId::Water);
            let Some(lowest) = lowest_water else {
                continue;
            };
            for y in (0..lowest).rev() {
                let cell = &mut blocks[block_index(x, y, z)];
                if *cell != BlockId::Air {
                    break;
                }
                *cell = BlockId::Water;
            }
        }
    }
}

/// Converts any magma cell with a water face-neighbor to obsidian.
///
/// Models instantaneous solidification; runs over the whole chunk after all
/// fills complete. Neighbors outside the chunk are ignored.
pub(crate) fn solidify_magma(blocks: &mut [BlockId]) {
    const NEIGHBORS: [(i64, i64, i64); 6] = [
        (1, 0, 0),
        (-1, 0, 0),
        (0, 1, 0),
        (0, -1, 0),
        (0, 0, 1),
        (0, 0, -1),
    ];

    for y in 0..CHUNK_HEIGHT {
        for z in 0..CHUNK_SIZE {
            for x in 0..CHUNK_SIZE {
                if blocks[block_index(x, y, z)] != BlockId::Magma {
                    continue;
                }
                let touches_water = NEIGHBORS.iter().any(|&(dx, dy, dz)| {
                    let nx = x as i64 + dx;
                    let ny = y as i64 + dy;
                    let nz = z as i64 + dz;
                    nx >= 0
                        && nx < CHUNK_SIZE as i64
                        && ny >= 0
                        && ny < CHUNK_HEIGHT as i64
                        && nz >= 0
                        && nz < CHUNK_SIZE as i64
                        && blocks[block_index(nx as usize, ny as usize, nz as usize)]
                            == BlockId::Water
                });
                if touches_water {
                    blocks[block_index(x, y, z)] = BlockId::Obsidian;
                }
            }
        }
    }
}
