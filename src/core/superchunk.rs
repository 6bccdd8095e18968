use glam::IVec3;

use crate::constants::{
    CHUNK_EXTENT, SUPERCHUNK_CHUNK_COUNT, SUPERCHUNK_CHUNKS_X, SUPERCHUNK_CHUNKS_Y,
    SUPERCHUNK_CHUNKS_Z, SUPERCHUNK_X, SUPERCHUNK_Y, SUPERCHUNK_Z,
};
use crate::core::BlockQuery;
use crate::core::block::Block;
use crate::core::chunk::{Chunk, ChunkMesh};

const fn chunk_index(cx: usize, cy: usize, cz: usize) -> usize {
    (cx * SUPERCHUNK_CHUNKS_Y as usize + cy) * SUPERCHUNK_CHUNKS_Z as usize + cz
}

/// The streaming unit: a 2x16x2 grid of chunks covering 32x256x32 voxels.
///
/// Origins are multiples of the horizontal extent on X/Z and always 0 on Y;
/// the world has a fixed vertical extent and never streams vertically.
pub struct SuperChunk {
    chunks: Vec<Chunk>,
    origin: IVec3,
    dirty: bool,
    face_count: usize,
}

impl SuperChunk {
    pub fn new(origin: IVec3) -> Self {
        debug_assert!(origin.x % SUPERCHUNK_X == 0, "unaligned superchunk x {}", origin.x);
        debug_assert!(origin.z % SUPERCHUNK_Z == 0, "unaligned superchunk z {}", origin.z);
        debug_assert!(origin.y == 0, "superchunk y must be 0, got {}", origin.y);

        let mut chunks = Vec::with_capacity(SUPERCHUNK_CHUNK_COUNT);
        for cx in 0..SUPERCHUNK_CHUNKS_X {
            for cy in 0..SUPERCHUNK_CHUNKS_Y {
                for cz in 0..SUPERCHUNK_CHUNKS_Z {
                    chunks.push(Chunk::new(origin + IVec3::new(cx, cy, cz) * CHUNK_EXTENT));
                }
            }
        }

        SuperChunk {
            chunks,
            origin,
            dirty: true,
            face_count: 0,
        }
    }

    pub fn origin(&self) -> IVec3 {
        self.origin
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The owned chunks, for the renderer to walk face lists and origins.
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn get(&self, x: usize, y: usize, z: usize) -> Block {
        debug_assert!(x < SUPERCHUNK_X as usize, "superchunk x {x} out of bounds");
        debug_assert!(y < SUPERCHUNK_Y as usize, "superchunk y {y} out of bounds");
        debug_assert!(z < SUPERCHUNK_Z as usize, "superchunk z {z} out of bounds");

        let e = CHUNK_EXTENT as usize;
        self.chunks[chunk_index(x / e, y / e, z / e)].get(x % e, y % e, z % e)
    }

    pub fn set(&mut self, x: usize, y: usize, z: usize, block: Block) {
        debug_assert!(x < SUPERCHUNK_X as usize, "superchunk x {x} out of bounds");
        debug_assert!(y < SUPERCHUNK_Y as usize, "superchunk y {y} out of bounds");
        debug_assert!(z < SUPERCHUNK_Z as usize, "superchunk z {z} out of bounds");

        let e = CHUNK_EXTENT as usize;
        self.chunks[chunk_index(x / e, y / e, z / e)].set(x % e, y % e, z % e, block);
        self.dirty = true;
    }

    /// Dirty every owned chunk, forcing a full re-mesh on the next update.
    pub fn touch(&mut self) {
        for chunk in &mut self.chunks {
            chunk.touch();
        }
        self.dirty = true;
    }

    /// Rebuild all dirty chunk meshes and return the summed face count.
    ///
    /// Cross-chunk neighbor lookups resolve against sibling chunks first and
    /// fall through to `world` only past this superchunk's bounds.
    pub fn update(&mut self, occlusion_culling: bool, world: &dyn BlockQuery) -> usize {
        if !self.dirty {
            return self.face_count;
        }

        let built: Vec<(usize, ChunkMesh)> = {
            let view = SuperChunkView {
                superchunk: self,
                world,
            };
            self.chunks
                .iter()
                .enumerate()
                .filter(|(_, chunk)| chunk.is_dirty())
                .map(|(i, chunk)| (i, chunk.build_mesh(occlusion_culling, &view)))
                .collect()
        };
        for (i, mesh) in built {
            self.chunks[i].install_mesh(mesh);
        }

        self.face_count = self
            .chunks
            .iter()
            .map(|c| c.face_count(false) + c.face_count(true))
            .sum();
        self.dirty = false;
        self.face_count
    }
}

/// Read-only neighbor resolution for meshing: sibling chunks inside the
/// superchunk, then the wider world query.
struct SuperChunkView<'a> {
    superchunk: &'a SuperChunk,
    world: &'a dyn BlockQuery,
}

impl BlockQuery for SuperChunkView<'_> {
    fn block_at(&self, pos: IVec3) -> Block {
        let local = pos - self.superchunk.origin;
        let inside = local.x >= 0
            && local.x < SUPERCHUNK_X
            && local.y >= 0
            && local.y < SUPERCHUNK_Y
            && local.z >= 0
            && local.z < SUPERCHUNK_Z;
        if inside {
            self.superchunk
                .get(local.x as usize, local.y as usize, local.z as usize)
        } else {
            self.world.block_at(pos)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AirWorld;

    impl BlockQuery for AirWorld {
        fn block_at(&self, _pos: IVec3) -> Block {
            Block::AIR
        }
    }

    #[test]
    fn get_set_delegate_across_chunk_seams() {
        let mut sc = SuperChunk::new(IVec3::ZERO);
        // One coordinate in each corner chunk and one on a seam.
        for (x, y, z) in [(0, 0, 0), (31, 255, 31), (15, 16, 31), (16, 15, 0)] {
            sc.set(x, y, z, Block::ICE);
            assert_eq!(sc.get(x, y, z), Block::ICE);
        }
    }

    #[test]
    fn chunk_origins_tile_the_superchunk() {
        let origin = IVec3::new(-32, 0, 64);
        let sc = SuperChunk::new(origin);
        assert_eq!(sc.chunks().len(), SUPERCHUNK_CHUNK_COUNT);
        for chunk in sc.chunks() {
            let local = chunk.origin() - origin;
            assert_eq!(local.x % CHUNK_EXTENT, 0);
            assert!(local.x >= 0 && local.x < SUPERCHUNK_X);
            assert!(local.y >= 0 && local.y < SUPERCHUNK_Y);
            assert!(local.z >= 0 && local.z < SUPERCHUNK_Z);
        }
    }

    #[test]
    fn update_is_a_no_op_when_clean() {
        let mut sc = SuperChunk::new(IVec3::ZERO);
        sc.set(4, 4, 4, Block::STONE);
        let faces = sc.update(true, &AirWorld);
        assert_eq!(faces, 6);
        assert!(!sc.is_dirty());
        assert_eq!(sc.update(true, &AirWorld), faces);
    }

    #[test]
    fn set_redirties_the_aggregate() {
        let mut sc = SuperChunk::new(IVec3::ZERO);
        sc.update(true, &AirWorld);
        sc.set(0, 0, 0, Block::STONE);
        assert!(sc.is_dirty());
    }

    #[test]
    fn touch_dirties_every_chunk() {
        let mut sc = SuperChunk::new(IVec3::ZERO);
        sc.update(true, &AirWorld);
        sc.touch();
        assert!(sc.chunks().iter().all(Chunk::is_dirty));
    }

    #[test]
    fn occlusion_crosses_chunk_boundaries_inside_the_superchunk() {
        let mut sc = SuperChunk::new(IVec3::ZERO);
        // Adjacent voxels in sibling chunks along X (15 | 16 seam).
        sc.set(15, 8, 8, Block::STONE);
        sc.set(16, 8, 8, Block::STONE);
        let faces = sc.update(true, &AirWorld);
        assert_eq!(faces, 10);
    }
}
