//! # Chunk Generation
//!
//! A chunk carries an ordered list of generators. When it is generated, each
//! one fills in blocks in turn, so later generators see and build on the blocks
//! of earlier ones: terrain first, then water, then vegetation.
//!
//! Generators must be deterministic for a given chunk position and seed and may
//! only touch the block array of the chunk they are given. Sunlight is seeded by
//! the chunk after the last generator has run.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::block::BlockTypeSize;
use super::chunk::Chunk;

mod liquid;
mod patterns;
mod terrain;
mod vegetation;

pub use liquid::LiquidGenerator;
pub use patterns::{CheckerboardGenerator, FlatGenerator};
pub use terrain::PerlinTerrainGenerator;
pub use vegetation::VegetationGenerator;

/// Water fills open columns up to this local height.
pub const SEA_LEVEL: i32 = 32;

/// Fills in the blocks of a freshly created chunk.
pub trait ChunkGenerator: Send + Sync {
    /// Populates `chunk`'s blocks from its position and the generator's seed.
    fn populate(&self, chunk: &mut Chunk);
}

/// Generators selectable from the world configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorKind {
    /// Noise-based hills with stone, dirt, grass, sand and caves.
    Terrain,
    /// Water up to [`SEA_LEVEL`] in open columns.
    Liquid,
    /// Plants and trees on grass.
    Vegetation,
    /// A solid floor of `block` filling local heights `0..height`.
    Flat {
        /// Number of layers to fill.
        height: i32,
        /// Block code to fill with.
        block: BlockTypeSize,
    },
    /// A 3D checkerboard of white blocks and air.
    Checkerboard,
}

impl GeneratorKind {
    /// Creates the generator this kind describes, bound to `seed`.
    pub fn build(&self, seed: u32) -> Arc<dyn ChunkGenerator> {
        match self {
            GeneratorKind::Terrain => Arc::new(PerlinTerrainGenerator::new(seed)),
            GeneratorKind::Liquid => Arc::new(LiquidGenerator::new(SEA_LEVEL)),
            GeneratorKind::Vegetation => Arc::new(VegetationGenerator::new(seed)),
            GeneratorKind::Flat { height, block } => Arc::new(FlatGenerator::new(*height, *block)),
            GeneratorKind::Checkerboard => Arc::new(CheckerboardGenerator),
        }
    }
}

/// Builds the generator list for a world, preserving order.
pub fn build_generators(kinds: &[GeneratorKind], seed: u32) -> Vec<Arc<dyn ChunkGenerator>> {
    kinds.iter().map(|kind| kind.build(seed)).collect()
}

/// Local height of the highest non-air block in a column, if any.
pub(crate) fn column_top(chunk: &Chunk, x: i32, z: i32) -> Option<i32> {
    use super::block::block_type::BlockType;
    use super::chunk::CHUNK_DIMENSION_Y;

    (0..CHUNK_DIMENSION_Y)
        .rev()
        .find(|&y| chunk.get_block(x, y, z) != BlockType::AIR.code())
}
