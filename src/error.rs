//! Error taxonomy for world generation.

use thiserror::Error;

use crate::core::block::Block;

/// Failures raised while constructing noise samplers or generating terrain.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenError {
    /// An fBm sampler was constructed with zero octaves.
    #[error("octaves must be at least 1")]
    InvalidOctaves,
    /// An fBm sampler was constructed with a gain outside `(0, 1)`.
    #[error("gain must be in (0, 1), got {gain}")]
    InvalidGain { gain: f32 },
    /// An fBm sampler was constructed with a lacunarity not greater than 1.
    #[error("lacunarity must be greater than 1, got {lacunarity}")]
    InvalidLacunarity { lacunarity: f32 },
    /// Column synthesis received a block that is not a valid surface biome.
    #[error("block {block:?} is not a valid column biome")]
    InvalidColumnBiome { block: Block },
    /// Vegetation generation received an unrecognized block material.
    #[error("block {block:?} is not a recognized material")]
    InvalidBlock { block: Block },
}
