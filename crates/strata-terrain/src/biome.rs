//! Biome categories and their terrain parameters.

use strata_voxel::BlockId;

/// Biome category for a terrain column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Biome {
    /// Flat grassland slightly above sea level.
    Plains,
    /// Dry sand flats.
    Desert,
    /// Tall rolling terrain.
    Hills,
    /// Sea floor, below sea level.
    Ocean,
}

impl Biome {
    /// Classifies a biome from a noise field value in `[0, 1)`.
    pub fn classify(value: f64) -> Self {
        if value < 0.30 {
            Biome::Ocean
        } else if value < 0.60 {
            Biome::Plains
        } else if value < 0.78 {
            Biome::Desert
        } else {
            Biome::Hills
        }
    }

    /// The topmost block of a column in this biome.
    pub fn surface_block(self) -> BlockId {
        match self {
            Biome::Plains | Biome::Hills => BlockId::Grass,
            Biome::Desert | Biome::Ocean => BlockId::Sand,
        }
    }

    /// The block filling the few cells directly under the surface.
    pub fn subsurface_block(self) -> BlockId {
        match self {
            Biome::Plains | Biome::Hills => BlockId::Dirt,
            Biome::Desert | Biome::Ocean => BlockId::Sand,
        }
    }

    /// Height swing of the column noise, in blocks.
    pub fn amplitude(self) -> f64 {
        match self {
            Biome::Plains => 3.0,
            Biome::Desert => 2.0,
            Biome::Hills => 10.0,
            Biome::Ocean => 4.0,
        }
    }

    /// Mean column height relative to sea level, in blocks.
    pub fn base_offset(self) -> f64 {
        match self {
            Biome::Plains => 2.0,
            Biome::Desert => 3.0,
            Biome::Hills => 6.0,
            Biome::Ocean => -6.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_thresholds() {
        assert_eq!(Biome::classify(0.0), Biome::Ocean);
        assert_eq!(Biome::classify(0.299), Biome::Ocean);
        assert_eq!(Biome::classify(0.30), Biome::Plains);
        assert_eq!(Biome::classify(0.60), Biome::Desert);
        assert_eq!(Biome::classify(0.78), Biome::Hills);
        assert_eq!(Biome::classify(0.999), Biome::Hills);
    }

    #[test]
    fn test_ocean_columns_sit_below_sea_level_on_average() {
        assert!(Biome::Ocean.base_offset() + Biome::Ocean.amplitude() < 0.0);
    }
}
