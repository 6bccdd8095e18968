//! Probabilistic vegetation: trees and cacti grown on qualifying surface
//! voxels during superchunk generation.
//!
//! All randomness is derived from a seed-mixed position hash, so the same
//! seed always grows the same forest.

use glam::IVec3;

use crate::constants::{SUPERCHUNK_X, SUPERCHUNK_Z};
use crate::core::block::Block;
use crate::error::GenError;

/// A single block write, in superchunk-local coordinates.
pub type Placement = (IVec3, Block);

/// Per-mille spawn chances per qualifying surface voxel.
const PLAINS_TREE_CHANCE: u32 = 10;
const JUNGLE_TREE_CHANCE: u32 = 100;
const SNOW_TREE_CHANCE: u32 = 5;
const CACTUS_CHANCE: u32 = 5;

const SALT_SPAWN: u32 = 0x9e37_79b9;
const SALT_SHAPE: u32 = 0x85eb_ca6b;
const SALT_CORNER: u32 = 0xc2b2_ae35;

pub struct VegetationGenerator {
    seed: u32,
}

impl VegetationGenerator {
    pub fn new(seed: u32) -> Self {
        VegetationGenerator { seed }
    }

    /// Roll for a structure rooted on the surface voxel at superchunk-local
    /// `pos` carrying `biome`.
    ///
    /// Non-vegetation-bearing surface blocks yield nothing; a block value
    /// that is not a recognized material is a caller bug. Structures whose
    /// horizontal extent would leave the superchunk are suppressed so
    /// generation never writes into a neighbor that may not exist yet.
    pub fn generate(&self, pos: IVec3, biome: Block) -> Result<Vec<Placement>, GenError> {
        match biome {
            Block::DIRT_PLAIN => Ok(self.rolled(pos, PLAINS_TREE_CHANCE, Self::plains_tree)),
            Block::DIRT_JUNGLE => Ok(self.rolled(pos, JUNGLE_TREE_CHANCE, Self::jungle_tree)),
            Block::DIRT_SNOW => Ok(self.rolled(pos, SNOW_TREE_CHANCE, Self::snow_tree)),
            Block::SAND_DESERT => Ok(self.rolled(pos, CACTUS_CHANCE, Self::cactus)),
            Block::AIR
            | Block::WATER
            | Block::SAND_BEACH
            | Block::ICE
            | Block::SNOW
            | Block::STONE
            | Block::STONE_SNOW
            | Block::FLOWERS
            | Block::WOOD_PLAIN
            | Block::WOOD_JUNGLE
            | Block::WOOD_SNOW
            | Block::CACTUS
            | Block::LEAVES_PLAIN
            | Block::LEAVES_JUNGLE
            | Block::LEAVES_SNOW => Ok(Vec::new()),
            other => Err(GenError::InvalidBlock { block: other }),
        }
    }

    fn rolled(
        &self,
        pos: IVec3,
        chance_per_mille: u32,
        grow: fn(&Self, IVec3) -> Vec<Placement>,
    ) -> Vec<Placement> {
        if self.position_hash(pos, SALT_SPAWN) % 1000 < chance_per_mille {
            grow(self, pos)
        } else {
            Vec::new()
        }
    }

    /// Round canopy on a straight trunk, 6-10 tall.
    fn plains_tree(&self, pos: IVec3) -> Vec<Placement> {
        if !horizontal_fit(pos, 2) {
            return Vec::new();
        }

        let trunk = 6 + (self.position_hash(pos, SALT_SHAPE) % 5) as i32;
        let mut parts = Vec::new();
        for dy in 1..=trunk {
            parts.push((pos + IVec3::new(0, dy, 0), Block::WOOD_PLAIN));
        }
        self.canopy(&mut parts, pos, pos + IVec3::new(0, trunk, 0), Block::LEAVES_PLAIN);
        parts
    }

    /// Trunk bends sideways after two voxels; canopy sits over the bend.
    fn jungle_tree(&self, pos: IVec3) -> Vec<Placement> {
        let trunk = 4 + (self.position_hash(pos, SALT_SHAPE) % 2) as i32;
        let bend = trunk - 2;
        if pos.x - 2 < 0
            || pos.x + bend + 2 >= SUPERCHUNK_X
            || pos.z - 2 < 0
            || pos.z + 2 >= SUPERCHUNK_Z
        {
            return Vec::new();
        }

        let mut parts = Vec::new();
        for dy in 1..=2 {
            parts.push((pos + IVec3::new(0, dy, 0), Block::WOOD_JUNGLE));
        }
        for i in 1..=bend {
            parts.push((pos + IVec3::new(i, 2 + i, 0), Block::WOOD_JUNGLE));
        }
        let crown = pos + IVec3::new(bend, 2 + bend, 0);
        self.canopy(&mut parts, pos, crown, Block::LEAVES_JUNGLE);
        parts
    }

    /// Conical tiers of leaves stacked on a short trunk; an unlucky roll
    /// leaves only a bare stump.
    fn snow_tree(&self, pos: IVec3) -> Vec<Placement> {
        if !horizontal_fit(pos, 2) {
            return Vec::new();
        }

        let hash = self.position_hash(pos, SALT_SHAPE);
        let trunk = 2 + (hash % 2) as i32;
        let tiers = (hash >> 8) as i32 % 4;

        let mut parts = Vec::new();
        if tiers == 0 {
            parts.push((pos + IVec3::new(0, 1, 0), Block::WOOD_SNOW));
            return parts;
        }

        let top = trunk + tiers * 3;
        for dy in 1..=top {
            parts.push((pos + IVec3::new(0, dy, 0), Block::WOOD_SNOW));
        }
        for tier in 0..tiers {
            let base = pos + IVec3::new(0, trunk + tier * 3 + 1, 0);
            for (dy, radius) in [(0i32, 2i32), (1, 1)] {
                let layer = base + IVec3::new(0, dy, 0);
                for dx in -radius..=radius {
                    for dz in -radius..=radius {
                        if dx == 0 && dz == 0 {
                            continue;
                        }
                        if dx.abs() + dz.abs() > radius + 1 {
                            continue;
                        }
                        parts.push((layer + IVec3::new(dx, 0, dz), Block::LEAVES_SNOW));
                    }
                }
            }
        }
        parts.push((pos + IVec3::new(0, top + 1, 0), Block::LEAVES_SNOW));
        parts
    }

    /// A bare cactus column, 2-5 tall. Fits in a single column, so it never
    /// needs a bounds guard.
    fn cactus(&self, pos: IVec3) -> Vec<Placement> {
        let height = 2 + (self.position_hash(pos, SALT_SHAPE) % 4) as i32;
        (1..=height)
            .map(|dy| (pos + IVec3::new(0, dy, 0), Block::CACTUS))
            .collect()
    }

    /// Two radius-2 leaf rings below a radius-1 cap, centered on `crown`,
    /// with ragged corners decided per position.
    fn canopy(&self, parts: &mut Vec<Placement>, root: IVec3, crown: IVec3, leaves: Block) {
        for (dy, radius) in [(-1, 2), (0, 2), (1, 1)] {
            let layer = crown + IVec3::new(0, dy, 0);
            for dx in -radius..=radius {
                for dz in -radius..=radius {
                    let at = layer + IVec3::new(dx, 0, dz);
                    // Leave the trunk line alone.
                    if dx == 0 && dz == 0 && at.y <= crown.y {
                        continue;
                    }
                    if dx.abs() == radius
                        && dz.abs() == radius
                        && self.position_hash(at + root, SALT_CORNER) % 2 == 0
                    {
                        continue;
                    }
                    parts.push((at, leaves));
                }
            }
        }
        parts.push((crown + IVec3::new(0, 2, 0), leaves));
    }

    fn position_hash(&self, pos: IVec3, salt: u32) -> u32 {
        let mut hash = self.seed ^ salt;
        hash = hash.wrapping_add(pos.x as u32).wrapping_mul(73856093);
        hash = hash.wrapping_add(pos.y as u32).wrapping_mul(19349663);
        hash = hash.wrapping_add(pos.z as u32).wrapping_mul(83492791);
        hash ^ (hash >> 16)
    }
}

/// Whether a structure reaching `radius` voxels sideways from `pos` stays
/// inside the superchunk footprint.
fn horizontal_fit(pos: IVec3, radius: i32) -> bool {
    pos.x - radius >= 0
        && pos.x + radius < SUPERCHUNK_X
        && pos.z - radius >= 0
        && pos.z + radius < SUPERCHUNK_Z
}
