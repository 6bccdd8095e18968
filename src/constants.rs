//! Fixed world dimensions, the terrain generation band, the default view
//! radius, and compile-time sanity guards.
//!
//! Horizontal dimensions are `i32` because they are mixed with `IVec3`/`IVec2`
//! component arithmetic throughout; volume/count values that index flat arenas
//! are `usize`.

/// Edge length of a single chunk, in voxels.
pub const CHUNK_EXTENT: i32 = 16;

/// Number of voxels in one chunk (`CHUNK_EXTENT`³).
pub const CHUNK_VOLUME: usize = (CHUNK_EXTENT as usize).pow(3);

/// Chunk grid of one superchunk: a 2×16×2 stack covering the full world height.
pub const SUPERCHUNK_CHUNKS_X: i32 = 2;
pub const SUPERCHUNK_CHUNKS_Y: i32 = 16;
pub const SUPERCHUNK_CHUNKS_Z: i32 = 2;

/// Total chunks owned by a superchunk.
pub const SUPERCHUNK_CHUNK_COUNT: usize =
    (SUPERCHUNK_CHUNKS_X * SUPERCHUNK_CHUNKS_Y * SUPERCHUNK_CHUNKS_Z) as usize;

/// Voxel extents of one superchunk.
pub const SUPERCHUNK_X: i32 = SUPERCHUNK_CHUNKS_X * CHUNK_EXTENT;
pub const SUPERCHUNK_Y: i32 = SUPERCHUNK_CHUNKS_Y * CHUNK_EXTENT;
pub const SUPERCHUNK_Z: i32 = SUPERCHUNK_CHUNKS_Z * CHUNK_EXTENT;

/// Fixed vertical extent of the world; the world never streams vertically.
pub const WORLD_HEIGHT: i32 = SUPERCHUNK_Y;

/// Terrain generation band: surface heights are clamped to `[GEN_MIN_H,
/// GEN_MAX_H]`.
pub const GEN_MIN_H: i32 = 128;
pub const GEN_MAX_H: i32 = 192;

/// Water fills up to this level inside the band.
pub const GEN_WATER_LEVEL: i32 = GEN_MIN_H + 22;

/// The 3D carver only acts at or above this height.
pub const GEN_CARVING_H: i32 = GEN_MIN_H + 30;

// Compile-time sanity guards on the relationships the generator relies on.
const _: () = assert!(WORLD_HEIGHT == SUPERCHUNK_Y);
const _: () = assert!(GEN_MIN_H < GEN_MAX_H);
const _: () = assert!(GEN_MAX_H <= WORLD_HEIGHT);
const _: () = assert!(GEN_MIN_H <= GEN_WATER_LEVEL && GEN_WATER_LEVEL <= GEN_MAX_H);
const _: () = assert!(GEN_MIN_H <= GEN_CARVING_H && GEN_CARVING_H <= GEN_MAX_H);
