//! Voxel world core: two-level spatial storage, procedural terrain
//! generation, viewpoint-driven streaming, and occlusion-culled meshing.
//!
//! The crate owns world state and produces per-chunk face lists; rendering,
//! windowing, camera math and input are external collaborators that consume
//! them.

// Core module with fundamental world-state types
pub mod core;

// World module with generation and streaming
pub mod world;

// Other modules
pub mod config;
pub mod constants;
pub mod error;

// Re-exports
pub use config::WorldConfig;
pub use constants::*;
pub use core::{Block, BlockQuery, Chunk, ChunkMesh, FaceDir, FaceQuad, FaceVertex, SuperChunk};
pub use error::GenError;
pub use world::noise::{Fbm2, Fbm3};
pub use world::{ChunkManager, TerrainGenerator, VegetationGenerator};
