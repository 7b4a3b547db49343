//! Simple block patterns, mostly useful for tests and debugging worlds.

use super::ChunkGenerator;
use crate::voxels::block::{block_type::BlockType, BlockTypeSize};
use crate::voxels::chunk::{Chunk, CHUNK_DIMENSION_X, CHUNK_DIMENSION_Y, CHUNK_DIMENSION_Z};

/// Fills every column with `block` from the bottom up to `height` (exclusive).
pub struct FlatGenerator {
    height: i32,
    block: BlockTypeSize,
}

impl FlatGenerator {
    pub fn new(height: i32, block: BlockTypeSize) -> Self {
        FlatGenerator {
            height: height.clamp(0, CHUNK_DIMENSION_Y),
            block,
        }
    }
}

impl ChunkGenerator for FlatGenerator {
    fn populate(&self, chunk: &mut Chunk) {
        for x in 0..CHUNK_DIMENSION_X {
            for z in 0..CHUNK_DIMENSION_Z {
                for y in 0..self.height {
                    chunk.set_block(x, y, z, self.block);
                }
            }
        }
    }
}

/// Alternates white blocks and air in all three directions.
pub struct CheckerboardGenerator;

impl ChunkGenerator for CheckerboardGenerator {
    fn populate(&self, chunk: &mut Chunk) {
        for x in 0..CHUNK_DIMENSION_X {
            for y in 0..CHUNK_DIMENSION_Y {
                for z in 0..CHUNK_DIMENSION_Z {
                    let block = if (x + y + z) % 2 == 0 {
                        BlockType::WHITE
                    } else {
                        BlockType::AIR
                    };
                    chunk.set_block(x, y, z, block.code());
                }
            }
        }
    }
}
