//! Terrain synthesis: fBm height field, temperature-driven biome selection,
//! 3D cave carving, biome column overwrite, vegetation decoration.

use glam::{IVec3, Vec2, Vec3};

use crate::constants::{
    GEN_CARVING_H, GEN_MAX_H, GEN_MIN_H, GEN_WATER_LEVEL, SUPERCHUNK_X, SUPERCHUNK_Z,
};
use crate::core::block::Block;
use crate::core::superchunk::SuperChunk;
use crate::error::GenError;
use crate::world::column;
use crate::world::noise::{Fbm2, Fbm3};
use crate::world::vegetation::VegetationGenerator;

const SAND_LEVEL: i32 = GEN_WATER_LEVEL + 3;
const DIRT_LEVEL: i32 = SAND_LEVEL + 18;
const STONE_LEVEL: i32 = DIRT_LEVEL + 4;

/// Derive a noise-field offset from the world seed. Offsets land in
/// [0, 100000), comfortably inside f32 integer precision.
fn seed_offset(seed: u32, salt: u32) -> f32 {
    let mut h = seed.wrapping_add(salt.wrapping_mul(0x9e37_79b9));
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    (h % 100_000) as f32
}

/// Deterministic world generator: all noise fields and the vegetation hash
/// derive from one u32 seed.
pub struct TerrainGenerator {
    height_noise: Fbm2,
    temperature_noise: Fbm2,
    carving_noise: Fbm3,
    vegetation: VegetationGenerator,
    seed: u32,
}

impl TerrainGenerator {
    pub fn new(seed: u32) -> Result<Self, GenError> {
        let height_noise = Fbm2::new(
            Vec2::new(seed_offset(seed, 0), seed_offset(seed, 1)),
            3,
            1.0,
            1.0 / 256.0,
            0.5,
            2.0,
        )?;
        let temperature_noise = Fbm2::new(
            Vec2::new(seed_offset(seed, 2), seed_offset(seed, 3)),
            5,
            1.0,
            1.0 / 258.0,
            0.5,
            2.0,
        )?;
        let carving_noise = Fbm3::new(
            Vec3::new(seed_offset(seed, 4), seed_offset(seed, 5), seed_offset(seed, 6)),
            3,
            1.0,
            1.0 / 64.0,
            0.5,
            2.0,
        )?;

        Ok(TerrainGenerator {
            height_noise,
            temperature_noise,
            carving_noise,
            vegetation: VegetationGenerator::new(seed),
            seed,
        })
    }

    /// A generator with a random seed, for worlds that don't care which one.
    pub fn from_entropy() -> Result<Self, GenError> {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Terrain surface height at a world (x, z), clamped to the generation
    /// band.
    pub fn surface_height(&self, x: i32, z: i32) -> i32 {
        let h = self.height_noise.sample_scaled(
            Vec2::new(x as f32, z as f32),
            -1.0,
            1.0,
            GEN_MIN_H as f32,
            GEN_MAX_H as f32,
        );
        (h as i32).clamp(GEN_MIN_H, GEN_MAX_H)
    }

    /// Map a surface height and temperature sample to the biome surface
    /// block for that column.
    ///
    /// Temperature bands select among snow, plain, jungle and desert; within
    /// a band, offsets above the water level pick the surface material.
    pub fn classify(height: i32, temperature: f32) -> Block {
        debug_assert!(
            (GEN_MIN_H..=GEN_MAX_H).contains(&height),
            "height {height} outside generation band"
        );

        if temperature < -0.30 {
            // Snow biome
            if height <= GEN_WATER_LEVEL {
                Block::ICE
            } else if height <= SAND_LEVEL {
                Block::SNOW
            } else if height <= DIRT_LEVEL {
                Block::DIRT_SNOW
            } else if height <= STONE_LEVEL {
                Block::STONE_SNOW
            } else {
                Block::SNOW
            }
        } else if temperature < -0.125 || (temperature > 0.125 && temperature < 0.30) {
            // Plain biome
            if height <= GEN_WATER_LEVEL {
                Block::WATER
            } else if height <= SAND_LEVEL {
                Block::SAND_BEACH
            } else if height <= DIRT_LEVEL {
                Block::DIRT_PLAIN
            } else if height <= STONE_LEVEL {
                Block::STONE
            } else {
                Block::STONE_SNOW
            }
        } else if temperature < 0.125 {
            // Jungle biome
            if height <= GEN_WATER_LEVEL {
                Block::WATER
            } else if height <= DIRT_LEVEL {
                Block::DIRT_JUNGLE
            } else {
                Block::STONE
            }
        } else {
            // Desert biome
            if height <= GEN_WATER_LEVEL {
                Block::WATER
            } else if height <= SAND_LEVEL {
                Block::SAND_BEACH
            } else if height <= STONE_LEVEL {
                Block::SAND_DESERT
            } else {
                Block::STONE
            }
        }
    }

    /// Run the full generation pipeline for the superchunk at `origin`.
    ///
    /// Passes: stone fill to the height field, cave carving in the carving
    /// band, biome column overwrite from the first solid voxel down, then
    /// vegetation rooted on the first floor voxel of each column.
    pub fn generate_superchunk(&self, origin: IVec3) -> Result<SuperChunk, GenError> {
        let mut sc = SuperChunk::new(origin);

        for x in 0..SUPERCHUNK_X {
            for z in 0..SUPERCHUNK_Z {
                let height = self.surface_height(origin.x + x, origin.z + z);
                for y in 0..=height {
                    sc.set(x as usize, y as usize, z as usize, Block::STONE);
                }
            }
        }

        // Carve unusual terrain out of the upper band with 3D noise.
        for x in 0..SUPERCHUNK_X {
            for y in GEN_CARVING_H..GEN_MAX_H {
                for z in 0..SUPERCHUNK_Z {
                    let p = (origin + IVec3::new(x, y, z)).as_vec3();
                    if self.carving_noise.sample(p) > 0.0 {
                        sc.set(x as usize, y as usize, z as usize, Block::AIR);
                    }
                }
            }
        }

        // Overwrite the generation band with biome columns.
        for x in 0..SUPERCHUNK_X {
            for z in 0..SUPERCHUNK_Z {
                for y in (GEN_MIN_H..=GEN_MAX_H).rev() {
                    if sc.get(x as usize, y as usize, z as usize).is_air() {
                        continue;
                    }
                    let temperature = self
                        .temperature_noise
                        .sample(Vec2::new((origin.x + x) as f32, (origin.z + z) as f32));
                    let biome = Self::classify(y, temperature);
                    let column = column::generate(y, biome)?;
                    for y2 in GEN_MIN_H..=GEN_MAX_H {
                        sc.set(x as usize, y2 as usize, z as usize, column[y2 as usize]);
                    }
                    break;
                }
            }
        }

        // Root vegetation on the first floor voxel of each column.
        for x in 0..SUPERCHUNK_X {
            for z in 0..SUPERCHUNK_Z {
                for y in (GEN_MIN_H..=GEN_MAX_H).rev() {
                    let block = sc.get(x as usize, y as usize, z as usize);
                    if !block.is_floor() {
                        continue;
                    }
                    let placements = self.vegetation.generate(IVec3::new(x, y, z), block)?;
                    for (at, b) in placements {
                        sc.set(at.x as usize, at.y as usize, at.z as usize, b);
                    }
                    break;
                }
            }
        }

        Ok(sc)
    }
}
