use glam::IVec3;

use crate::constants::{CHUNK_EXTENT, CHUNK_VOLUME};
use crate::core::BlockQuery;
use crate::core::block::{Block, FaceDir};
use crate::core::vertex::FaceQuad;

/// Flat-arena index; X-major, then Y, then Z, for cache-friendly column scans.
const fn index(x: usize, y: usize, z: usize) -> usize {
    (x * CHUNK_EXTENT as usize + y) * CHUNK_EXTENT as usize + z
}

const fn in_bounds(p: IVec3) -> bool {
    p.x >= 0 && p.x < CHUNK_EXTENT && p.y >= 0 && p.y < CHUNK_EXTENT && p.z >= 0 && p.z < CHUNK_EXTENT
}

/// Face lists produced by one mesh build, pending installation.
#[derive(Default)]
pub struct ChunkMesh {
    pub opaque: Vec<FaceQuad>,
    pub alpha: Vec<FaceQuad>,
}

impl ChunkMesh {
    pub fn face_count(&self) -> usize {
        self.opaque.len() + self.alpha.len()
    }
}

/// A dense 16x16x16 voxel cube owning its derived mesh.
///
/// After a successful mesh rebuild the face lists reflect the voxel data and
/// the neighboring voxels observed through the query at build time; any later
/// neighbor change across a shared face must re-dirty this chunk via
/// [`Chunk::touch`].
pub struct Chunk {
    blocks: [Block; CHUNK_VOLUME],
    origin: IVec3,
    dirty: bool,
    opaque: Vec<FaceQuad>,
    alpha: Vec<FaceQuad>,
}

impl Chunk {
    pub fn new(origin: IVec3) -> Self {
        Chunk {
            blocks: [Block::AIR; CHUNK_VOLUME],
            origin,
            dirty: true,
            opaque: Vec::new(),
            alpha: Vec::new(),
        }
    }

    /// World-aligned origin of this chunk's (0, 0, 0) voxel.
    pub fn origin(&self) -> IVec3 {
        self.origin
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn get(&self, x: usize, y: usize, z: usize) -> Block {
        debug_assert!(x < CHUNK_EXTENT as usize, "chunk x {x} out of bounds");
        debug_assert!(y < CHUNK_EXTENT as usize, "chunk y {y} out of bounds");
        debug_assert!(z < CHUNK_EXTENT as usize, "chunk z {z} out of bounds");

        self.blocks[index(x, y, z)]
    }

    pub fn set(&mut self, x: usize, y: usize, z: usize, block: Block) {
        debug_assert!(x < CHUNK_EXTENT as usize, "chunk x {x} out of bounds");
        debug_assert!(y < CHUNK_EXTENT as usize, "chunk y {y} out of bounds");
        debug_assert!(z < CHUNK_EXTENT as usize, "chunk z {z} out of bounds");

        self.blocks[index(x, y, z)] = block;
        self.dirty = true;
    }

    /// Force a rebuild without changing data, e.g. when a neighbor across a
    /// shared face changed.
    pub fn touch(&mut self) {
        self.dirty = true;
    }

    /// Rebuild the mesh if dirty; returns the total face count either way.
    pub fn rebuild_mesh(&mut self, occlusion_culling: bool, world: &dyn BlockQuery) -> usize {
        if !self.dirty {
            return self.opaque.len() + self.alpha.len();
        }
        let mesh = self.build_mesh(occlusion_culling, world);
        self.install_mesh(mesh);
        self.opaque.len() + self.alpha.len()
    }

    /// Compute fresh face lists without mutating the chunk.
    ///
    /// Columns are scanned top-down so that the "opaque seen above" state is
    /// available when a `TOP_OVERLAY` voxel is reached; the carried flag
    /// resets on air and on alpha voxels, and does not consult the chunk
    /// above this one.
    pub fn build_mesh(&self, occlusion_culling: bool, world: &dyn BlockQuery) -> ChunkMesh {
        let mut mesh = ChunkMesh::default();
        let extent = CHUNK_EXTENT as usize;

        for x in 0..extent {
            for z in 0..extent {
                let mut opaque_above = false;
                for y in (0..extent).rev() {
                    let block = self.blocks[index(x, y, z)];
                    if block.is_air() {
                        opaque_above = false;
                        continue;
                    }

                    for face in FaceDir::ALL {
                        if occlusion_culling && self.occluded(block, x, y, z, face, world) {
                            continue;
                        }
                        let data = if opaque_above
                            && block.has_top_overlay()
                            && !block.is_alpha()
                            && face.is_side()
                        {
                            // Covered variant: the side texture without the
                            // exposed-top overlay strip.
                            block.with_face(FaceDir::Bottom)
                        } else {
                            block.with_face(face)
                        };
                        let quad = FaceQuad::emit(face, x as u8, y as u8, z as u8, data);
                        if block.is_alpha() {
                            mesh.alpha.push(quad);
                        } else {
                            mesh.opaque.push(quad);
                        }
                    }

                    opaque_above = !block.is_alpha();
                }
            }
        }

        mesh
    }

    /// Store freshly built face lists and clear the dirty flag.
    pub fn install_mesh(&mut self, mesh: ChunkMesh) {
        self.opaque = mesh.opaque;
        self.alpha = mesh.alpha;
        self.dirty = false;
    }

    /// Whether `face` of the voxel at `(x, y, z)` is hidden by its neighbor.
    ///
    /// Alpha faces are drawn only against open air; opaque faces are drawn
    /// whenever the neighbor is alpha-flagged (air, water, leaves). Neighbor
    /// lookups that leave this chunk go through `world`, which answers with
    /// the stone sentinel for not-yet-generated regions.
    fn occluded(
        &self,
        block: Block,
        x: usize,
        y: usize,
        z: usize,
        face: FaceDir,
        world: &dyn BlockQuery,
    ) -> bool {
        let local = IVec3::new(x as i32, y as i32, z as i32) + face.delta();
        let neighbor = if in_bounds(local) {
            self.blocks[index(local.x as usize, local.y as usize, local.z as usize)]
        } else {
            world.block_at(self.origin + local)
        };

        if block.is_alpha() {
            !neighbor.is_air()
        } else {
            !neighbor.is_alpha()
        }
    }

    pub fn faces(&self, alpha: bool) -> &[FaceQuad] {
        if alpha { &self.alpha } else { &self.opaque }
    }

    /// Face count of the requested list. The mesh must be current.
    pub fn face_count(&self, alpha: bool) -> usize {
        debug_assert!(!self.dirty, "face_count on a dirty chunk");

        if alpha { self.alpha.len() } else { self.opaque.len() }
    }
}
