//! Core world-state types: packed voxel values, dense chunk storage with
//! occlusion-culled meshing, and the superchunk streaming unit.

use glam::IVec3;

pub mod block;
pub mod chunk;
pub mod superchunk;
pub mod vertex;

pub use block::{Block, FaceDir};
pub use chunk::{Chunk, ChunkMesh};
pub use superchunk::SuperChunk;
pub use vertex::{FaceQuad, FaceVertex};

/// Read-only point lookup into world voxel data.
///
/// Meshing receives one of these instead of a back-reference to its
/// container, so chunks never know who owns them. Implementations return a
/// copy of the voxel value, and answer with a solid-stone sentinel for
/// regions that are not (or not yet) generated.
pub trait BlockQuery {
    fn block_at(&self, pos: IVec3) -> Block;
}
