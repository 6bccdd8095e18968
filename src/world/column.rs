//! Vertical column synthesis: one biome surface block expands into the full
//! fixed-height stack written over the raw terrain.

use crate::constants::{GEN_WATER_LEVEL, WORLD_HEIGHT};
use crate::core::block::Block;
use crate::error::GenError;

/// One full-height vertical stack of blocks for a single (x, z) position.
pub type Column = [Block; WORLD_HEIGHT as usize];

/// Expand `biome` (a surface block produced by the classifier) into a column
/// for a terrain surface at `height`.
///
/// Blocks that never form a terrain surface (air, wood, leaves, flowers,
/// cactus) are caller bugs and are rejected.
pub fn generate(height: i32, biome: Block) -> Result<Column, GenError> {
    debug_assert!(
        (0..WORLD_HEIGHT).contains(&height),
        "column height {height} outside world"
    );

    match biome {
        Block::WATER => Ok(flooded(height, Block::SAND_BEACH, None)),
        Block::ICE => Ok(flooded(height, Block::SNOW, Some(Block::ICE))),
        Block::SAND_BEACH => Ok(layered(height, 2, Block::SAND_BEACH)),
        Block::SAND_DESERT => Ok(layered(height, 5, Block::SAND_DESERT)),
        Block::SNOW => Ok(layered(height, 3, Block::SNOW)),
        Block::STONE => Ok(layered(height, 0, Block::STONE)),
        Block::STONE_SNOW => Ok(layered(height, 2, Block::STONE_SNOW)),
        Block::DIRT_PLAIN => Ok(layered(height, 3, Block::DIRT_PLAIN)),
        Block::DIRT_JUNGLE => Ok(layered(height, 3, Block::DIRT_JUNGLE)),
        Block::DIRT_SNOW => Ok(layered(height, 3, Block::DIRT_SNOW)),
        other => Err(GenError::InvalidColumnBiome { block: other }),
    }
}

/// Stone underneath, `depth` voxels of `surface` material up to `height`,
/// air above.
fn layered(height: i32, depth: i32, surface: Block) -> Column {
    let mut column = [Block::AIR; WORLD_HEIGHT as usize];
    for y in 0..=height {
        column[y as usize] = if y < height - depth { Block::STONE } else { surface };
    }
    column
}

/// A submerged column: `bed` material at the terrain surface, water filled up
/// to one voxel above the water level, optionally capped by an ice sheet.
fn flooded(height: i32, bed: Block, sheet: Option<Block>) -> Column {
    let mut column = [Block::AIR; WORLD_HEIGHT as usize];
    for y in 0..=GEN_WATER_LEVEL + 1 {
        column[y as usize] = if y < height - 3 {
            Block::STONE
        } else if y < height {
            bed
        } else if y == GEN_WATER_LEVEL + 1 {
            sheet.unwrap_or(Block::WATER)
        } else {
            Block::WATER
        };
    }
    column
}

#[cfg(test)]
mod tests {
    use super::*;

    const DRY_BIOMES: [Block; 8] = [
        Block::SAND_BEACH,
        Block::SAND_DESERT,
        Block::SNOW,
        Block::STONE,
        Block::STONE_SNOW,
        Block::DIRT_PLAIN,
        Block::DIRT_JUNGLE,
        Block::DIRT_SNOW,
    ];

    #[test]
    fn dry_columns_are_solid_below_and_empty_above() {
        for biome in DRY_BIOMES {
            for height in [130, 155, 170, 191] {
                let column = generate(height, biome).unwrap();
                for y in 0..=height {
                    assert!(!column[y as usize].is_air(), "{biome:?} air at {y} (h={height})");
                }
                for y in height + 1..WORLD_HEIGHT {
                    assert!(column[y as usize].is_air(), "{biome:?} solid at {y} (h={height})");
                }
                assert_eq!(column[height as usize], biome);
            }
        }
    }

    #[test]
    fn subsurface_depths_are_biome_specific() {
        let height = 170;
        for (biome, depth) in [
            (Block::SAND_BEACH, 2),
            (Block::SAND_DESERT, 5),
            (Block::SNOW, 3),
            (Block::STONE_SNOW, 2),
            (Block::DIRT_PLAIN, 3),
            (Block::DIRT_JUNGLE, 3),
            (Block::DIRT_SNOW, 3),
        ] {
            let column = generate(height, biome).unwrap();
            for y in height - depth..=height {
                assert_eq!(column[y as usize], biome, "{biome:?} at {y}");
            }
            assert_eq!(column[(height - depth - 1) as usize], Block::STONE);
        }
    }

    #[test]
    fn stone_column_is_stone_throughout() {
        let column = generate(160, Block::STONE).unwrap();
        for y in 0..=160 {
            assert_eq!(column[y as usize], Block::STONE);
        }
        assert!(column[161].is_air());
    }

    #[test]
    fn water_column_floods_to_one_above_water_level() {
        let height = 140;
        let column = generate(height, Block::WATER).unwrap();
        for y in 0..height - 3 {
            assert_eq!(column[y as usize], Block::STONE);
        }
        for y in height - 3..height {
            assert_eq!(column[y as usize], Block::SAND_BEACH);
        }
        for y in height..=GEN_WATER_LEVEL + 1 {
            assert_eq!(column[y as usize], Block::WATER);
        }
        assert!(column[(GEN_WATER_LEVEL + 2) as usize].is_air());
    }

    #[test]
    fn ice_column_caps_the_water_with_a_sheet() {
        let column = generate(142, Block::ICE).unwrap();
        assert_eq!(column[(GEN_WATER_LEVEL + 1) as usize], Block::ICE);
        assert_eq!(column[GEN_WATER_LEVEL as usize], Block::WATER);
        assert_eq!(column[141], Block::SNOW);
    }

    #[test]
    fn non_surface_blocks_are_rejected() {
        for block in [
            Block::AIR,
            Block::WOOD_PLAIN,
            Block::WOOD_SNOW,
            Block::LEAVES_JUNGLE,
            Block::FLOWERS,
            Block::CACTUS,
        ] {
            assert_eq!(
                generate(160, block).unwrap_err(),
                GenError::InvalidColumnBiome { block }
            );
        }
    }
}
