use super::ChunkGenerator;
use crate::voxels::block::block_type::BlockType;
use crate::voxels::chunk::{Chunk, CHUNK_DIMENSION_X, CHUNK_DIMENSION_Y, CHUNK_DIMENSION_Z};

/// Floods open columns with water from `sea_level` down to the first non-air block.
///
/// Caves are left dry: water only fills air that is connected straight up to
/// the sea surface.
pub struct LiquidGenerator {
    sea_level: i32,
}

impl LiquidGenerator {
    pub fn new(sea_level: i32) -> Self {
        LiquidGenerator {
            sea_level: sea_level.min(CHUNK_DIMENSION_Y - 1),
        }
    }
}

impl ChunkGenerator for LiquidGenerator {
    fn populate(&self, chunk: &mut Chunk) {
        for x in 0..CHUNK_DIMENSION_X {
            for z in 0..CHUNK_DIMENSION_Z {
                for y in (0..=self.sea_level).rev() {
                    if chunk.get_block(x, y, z) != BlockType::AIR.code() {
                        break;
                    }
                    chunk.set_block(x, y, z, BlockType::WATER.code());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Point3;

    #[test]
    fn fills_down_to_the_ground_only() {
        let mut chunk = Chunk::new(Point3::new(0, 0, 0), Vec::new());
        chunk.set_block(0, 5, 0, BlockType::STONE.code());
        // a pocket of air under the stone stays dry
        LiquidGenerator::new(10).populate(&mut chunk);

        for y in 6..=10 {
            assert_eq!(chunk.get_block(0, y, 0), BlockType::WATER.code());
        }
        assert_eq!(chunk.get_block(0, 11, 0), BlockType::AIR.code());
        assert_eq!(chunk.get_block(0, 4, 0), BlockType::AIR.code());
        // an empty column is filled to the bottom
        assert_eq!(chunk.get_block(1, 0, 1), BlockType::WATER.code());
    }
}
