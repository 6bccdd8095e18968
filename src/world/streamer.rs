//! Streaming: decides which superchunks must exist around the viewpoint,
//! generates and evicts them, and answers world-space point queries.

use glam::{IVec2, IVec3, Vec3};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::config::WorldConfig;
use crate::constants::{SUPERCHUNK_X, SUPERCHUNK_Y, SUPERCHUNK_Z};
use crate::core::BlockQuery;
use crate::core::block::Block;
use crate::core::superchunk::SuperChunk;
use crate::error::GenError;
use crate::world::generator::TerrainGenerator;

/// Owner of all loaded superchunks, keyed by their world-aligned (x, z)
/// origin. The map is the single source of truth for world state: lookups
/// hand out copies of voxel values, never references into storage.
pub struct ChunkManager {
    superchunks: FxHashMap<IVec2, SuperChunk>,
    generator: TerrainGenerator,
    config: WorldConfig,
    generated: u64,
}

impl ChunkManager {
    pub fn new(generator: TerrainGenerator, config: WorldConfig) -> Self {
        debug_assert!(config.view_radius >= 0, "negative view radius");

        ChunkManager {
            superchunks: FxHashMap::default(),
            generator,
            config,
            generated: 0,
        }
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Superchunks generated over this manager's lifetime. Stable across
    /// ticks with an unmoving viewpoint.
    pub fn generated_count(&self) -> u64 {
        self.generated
    }

    pub fn loaded_count(&self) -> usize {
        self.superchunks.len()
    }

    pub fn loaded_keys(&self) -> impl Iterator<Item = IVec2> + '_ {
        self.superchunks.keys().copied()
    }

    /// Loaded superchunks with their keys, for the renderer to walk.
    pub fn superchunks(&self) -> impl Iterator<Item = (IVec2, &SuperChunk)> {
        self.superchunks.iter().map(|(k, sc)| (*k, sc))
    }

    /// The world-aligned origin of the superchunk containing `pos`.
    pub fn superchunk_key(pos: Vec3) -> IVec2 {
        IVec2::new(
            (pos.x.floor() as i32).div_euclid(SUPERCHUNK_X) * SUPERCHUNK_X,
            (pos.z.floor() as i32).div_euclid(SUPERCHUNK_Z) * SUPERCHUNK_Z,
        )
    }

    /// One streaming tick: evict superchunks that left the view radius,
    /// generate the ones that entered it, then rebuild every dirty mesh.
    /// Returns the summed face count of all loaded superchunks.
    pub fn update(&mut self, viewpoint: Vec3) -> Result<usize, GenError> {
        let required = self.required_keys(viewpoint);

        let evicted: Vec<IVec2> = self
            .superchunks
            .keys()
            .filter(|key| !required.contains(*key))
            .copied()
            .collect();
        for key in evicted {
            self.superchunks.remove(&key);
            tracing::debug!(x = key.x, z = key.y, "evicted superchunk");
        }

        for key in &required {
            if self.superchunks.contains_key(key) {
                continue;
            }
            let sc = self.generator.generate_superchunk(IVec3::new(key.x, 0, key.y))?;
            self.superchunks.insert(*key, sc);
            self.generated += 1;
            tracing::debug!(x = key.x, z = key.y, total = self.generated, "generated superchunk");
            // Loaded neighbors saw the stone sentinel across this border;
            // their boundary faces must be re-evaluated.
            self.touch_neighbors(*key);
        }

        let occlusion = self.config.occlusion_culling;
        let keys: Vec<IVec2> = self.superchunks.keys().copied().collect();
        let mut faces = 0;
        for key in keys {
            // Take the superchunk out of the map while meshing it; its own
            // voxels resolve internally, so the map is only consulted for
            // positions beyond its bounds.
            let Some(mut sc) = self.superchunks.remove(&key) else {
                continue;
            };
            faces += sc.update(occlusion, &*self);
            self.superchunks.insert(key, sc);
        }
        Ok(faces)
    }

    /// Point query with the documented fallback: positions in unloaded or
    /// never-generated space read as solid stone rather than blocking on
    /// generation.
    pub fn get(&self, pos: IVec3) -> Block {
        if pos.y < 0 || pos.y >= SUPERCHUNK_Y {
            return Block::STONE;
        }
        let key = IVec2::new(
            pos.x.div_euclid(SUPERCHUNK_X) * SUPERCHUNK_X,
            pos.z.div_euclid(SUPERCHUNK_Z) * SUPERCHUNK_Z,
        );
        match self.superchunks.get(&key) {
            Some(sc) => sc.get(
                (pos.x - key.x) as usize,
                pos.y as usize,
                (pos.z - key.y) as usize,
            ),
            None => Block::STONE,
        }
    }

    /// All superchunk-aligned keys within `view_radius` grid steps of the
    /// viewpoint's key, on X and Z.
    fn required_keys(&self, viewpoint: Vec3) -> FxHashSet<IVec2> {
        let anchor = Self::superchunk_key(viewpoint);
        let r = self.config.view_radius;
        let mut keys =
            FxHashSet::with_capacity_and_hasher(((2 * r + 1) * (2 * r + 1)) as usize, Default::default());
        for dx in -r..=r {
            for dz in -r..=r {
                keys.insert(anchor + IVec2::new(dx * SUPERCHUNK_X, dz * SUPERCHUNK_Z));
            }
        }
        keys
    }

    fn touch_neighbors(&mut self, key: IVec2) {
        for dx in -1..=1 {
            for dz in -1..=1 {
                if dx == 0 && dz == 0 {
                    continue;
                }
                let neighbor = key + IVec2::new(dx * SUPERCHUNK_X, dz * SUPERCHUNK_Z);
                if let Some(sc) = self.superchunks.get_mut(&neighbor) {
                    sc.touch();
                }
            }
        }
    }
}

impl BlockQuery for ChunkManager {
    fn block_at(&self, pos: IVec3) -> Block {
        self.get(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager(view_radius: i32) -> ChunkManager {
        let generator = TerrainGenerator::new(2137).unwrap();
        let config = WorldConfig {
            view_radius,
            occlusion_culling: true,
        };
        ChunkManager::new(generator, config)
    }

    #[test]
    fn keys_are_floor_aligned() {
        assert_eq!(ChunkManager::superchunk_key(Vec3::ZERO), IVec2::ZERO);
        assert_eq!(ChunkManager::superchunk_key(Vec3::new(31.9, 80.0, 0.1)), IVec2::ZERO);
        assert_eq!(
            ChunkManager::superchunk_key(Vec3::new(32.0, 0.0, -0.5)),
            IVec2::new(32, -32)
        );
        assert_eq!(
            ChunkManager::superchunk_key(Vec3::new(-1.0, 0.0, -33.0)),
            IVec2::new(-32, -64)
        );
    }

    #[test]
    fn radius_zero_loads_exactly_the_origin_superchunk() {
        let mut m = manager(0);
        m.update(Vec3::ZERO).unwrap();
        let keys: Vec<IVec2> = m.loaded_keys().collect();
        assert_eq!(keys, vec![IVec2::ZERO]);
    }

    #[test]
    fn steady_viewpoint_is_idempotent() {
        let mut m = manager(1);
        let viewpoint = Vec3::new(5.0, 160.0, -7.0);
        m.update(viewpoint).unwrap();
        let mut keys: Vec<IVec2> = m.loaded_keys().collect();
        keys.sort_by_key(|k| (k.x, k.y));
        let generated = m.generated_count();
        assert_eq!(keys.len(), 9);

        for _ in 0..5 {
            m.update(viewpoint).unwrap();
            let mut again: Vec<IVec2> = m.loaded_keys().collect();
            again.sort_by_key(|k| (k.x, k.y));
            assert_eq!(again, keys);
            assert_eq!(m.generated_count(), generated);
        }
    }

    #[test]
    fn leaving_the_radius_evicts_within_one_tick() {
        let mut m = manager(1);
        m.update(Vec3::ZERO).unwrap();
        assert!(m.loaded_keys().any(|k| k == IVec2::new(-32, -32)));

        // Jump well past view_radius + 1 superchunk steps.
        m.update(Vec3::new(5.0 * SUPERCHUNK_X as f32, 0.0, 0.0)).unwrap();
        assert_eq!(m.loaded_count(), 9);
        assert!(m.loaded_keys().all(|k| k.x >= 4 * SUPERCHUNK_X));
    }

    #[test]
    fn moving_one_step_generates_only_the_new_edge() {
        let mut m = manager(1);
        m.update(Vec3::ZERO).unwrap();
        assert_eq!(m.generated_count(), 9);

        m.update(Vec3::new(SUPERCHUNK_X as f32, 0.0, 0.0)).unwrap();
        assert_eq!(m.loaded_count(), 9);
        // A 3x3 window moved one column: three keys generated, three evicted.
        assert_eq!(m.generated_count(), 12);
    }

    #[test]
    fn unloaded_space_reads_as_stone() {
        let mut m = manager(0);
        m.update(Vec3::ZERO).unwrap();
        // Far outside the single loaded superchunk.
        assert_eq!(m.get(IVec3::new(500, 150, 500)), Block::STONE);
        // Above and below the vertical extent.
        assert_eq!(m.get(IVec3::new(5, -1, 5)), Block::STONE);
        assert_eq!(m.get(IVec3::new(5, SUPERCHUNK_Y, 5)), Block::STONE);
        // Inside the loaded superchunk, high above terrain: real air.
        assert!(m.get(IVec3::new(5, 250, 5)).is_air());
    }

    #[test]
    fn point_queries_match_superchunk_storage() {
        let mut m = manager(0);
        m.update(Vec3::ZERO).unwrap();
        let (_, sc) = m.superchunks().next().unwrap();
        for (x, y, z) in [(0, 0, 0), (13, 140, 27), (31, 255, 31)] {
            assert_eq!(
                m.get(IVec3::new(x as i32, y as i32, z as i32)),
                sc.get(x, y, z)
            );
        }
    }

    #[test]
    fn new_superchunks_redirty_loaded_neighbors() {
        let mut m = manager(0);
        m.update(Vec3::ZERO).unwrap();
        assert!(!m.superchunks[&IVec2::ZERO].is_dirty());

        let key = IVec2::new(SUPERCHUNK_X, 0);
        let sc = m
            .generator
            .generate_superchunk(IVec3::new(key.x, 0, key.y))
            .unwrap();
        m.superchunks.insert(key, sc);
        m.touch_neighbors(key);
        assert!(m.superchunks[&IVec2::ZERO].is_dirty());
    }

    #[test]
    fn update_reports_a_live_mesh() {
        let mut m = manager(0);
        let faces = m.update(Vec3::ZERO).unwrap();
        // A generated superchunk always exposes at least its terrain surface.
        assert!(faces > 0);
        let again = m.update(Vec3::ZERO).unwrap();
        assert_eq!(faces, again);
    }
}
