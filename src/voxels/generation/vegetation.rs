use super::{column_top, ChunkGenerator};
use crate::voxels::block::block_type::BlockType;
use crate::voxels::chunk::{Chunk, CHUNK_DIMENSION_X, CHUNK_DIMENSION_Y, CHUNK_DIMENSION_Z};

/// One in `TREE_CHANCE` grass columns grows a tree.
const TREE_CHANCE: u32 = 64;
/// One in `PLANT_CHANCE` remaining grass columns grows a plant.
const PLANT_CHANCE: u32 = 6;
/// Trees are kept this far from the chunk edge so their canopy fits.
const TREE_MARGIN: i32 = 2;

/// Plants billboards and small trees on grass.
///
/// Placement is driven by an RNG seeded from the world seed and the chunk id,
/// so a chunk always grows the same vegetation.
pub struct VegetationGenerator {
    seed: u32,
}

impl VegetationGenerator {
    pub fn new(seed: u32) -> Self {
        VegetationGenerator { seed }
    }

    fn rng_for(&self, chunk: &Chunk) -> fastrand::Rng {
        fastrand::Rng::with_seed(
            (self.seed as u64) ^ chunk.id().wrapping_mul(0x9E37_79B9_7F4A_7C15),
        )
    }

    fn plant_tree(chunk: &mut Chunk, x: i32, ground: i32, z: i32, trunk_height: i32) {
        let top = ground + trunk_height;

        for y in ground + 1..=top {
            chunk.set_block(x, y, z, BlockType::WOOD.code());
        }

        for dx in -2..=2 {
            for dz in -2..=2 {
                for dy in -1..=1 {
                    let (lx, ly, lz) = (x + dx, top + dy, z + dz);
                    // trim the corners of the canopy
                    if dx.abs() == 2 && dz.abs() == 2 {
                        continue;
                    }
                    if chunk.get_block(lx, ly, lz) == BlockType::AIR.code() {
                        chunk.set_block(lx, ly, lz, BlockType::LEAVES.code());
                    }
                }
            }
        }
        chunk.set_block(x, top + 2, z, BlockType::LEAVES.code());
    }
}

impl ChunkGenerator for VegetationGenerator {
    fn populate(&self, chunk: &mut Chunk) {
        let mut rng = self.rng_for(chunk);

        for x in 0..CHUNK_DIMENSION_X {
            for z in 0..CHUNK_DIMENSION_Z {
                let Some(ground) = column_top(chunk, x, z) else {
                    continue;
                };
                if chunk.get_block(x, ground, z) != BlockType::GRASS.code() {
                    continue;
                }

                let trunk_height = rng.i32(4..=6);
                let fits = (TREE_MARGIN..CHUNK_DIMENSION_X - TREE_MARGIN).contains(&x)
                    && (TREE_MARGIN..CHUNK_DIMENSION_Z - TREE_MARGIN).contains(&z)
                    && ground + trunk_height + 2 < CHUNK_DIMENSION_Y;

                if fits && rng.u32(0..TREE_CHANCE) == 0 {
                    Self::plant_tree(chunk, x, ground, z, trunk_height);
                } else if ground + 1 < CHUNK_DIMENSION_Y && rng.u32(0..PLANT_CHANCE) == 0 {
                    chunk.set_block(x, ground + 1, z, BlockType::random_plant(&mut rng).code());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voxels::block::Block;
    use crate::voxels::generation::FlatGenerator;
    use cgmath::Point3;

    fn grass_chunk(x: i32, z: i32) -> Chunk {
        let mut chunk = Chunk::new(Point3::new(x, 0, z), Vec::new());
        FlatGenerator::new(20, BlockType::GRASS.code()).populate(&mut chunk);
        chunk
    }

    #[test]
    fn same_chunk_grows_the_same_plants() {
        let generator = VegetationGenerator::new(5);
        let mut a = grass_chunk(2, 9);
        let mut b = grass_chunk(2, 9);
        generator.populate(&mut a);
        generator.populate(&mut b);
        assert_eq!(a.cells(), b.cells());
    }

    #[test]
    fn plants_sit_on_grass() {
        let generator = VegetationGenerator::new(5);
        let mut chunk = grass_chunk(0, 0);
        generator.populate(&mut chunk);

        let mut plants = 0;
        for x in 0..CHUNK_DIMENSION_X {
            for z in 0..CHUNK_DIMENSION_Z {
                let code = chunk.get_block(x, 20, z);
                if Block::properties(code).billboard {
                    plants += 1;
                    assert_eq!(chunk.get_block(x, 19, z), BlockType::GRASS.code());
                }
            }
        }
        assert!(plants > 0);
    }

    #[test]
    fn trees_are_trunk_and_canopy() {
        let mut chunk = grass_chunk(0, 0);
        VegetationGenerator::plant_tree(&mut chunk, 8, 19, 8, 5);

        for y in 20..=24 {
            assert_eq!(chunk.get_block(8, y, 8), BlockType::WOOD.code());
        }
        assert_eq!(chunk.get_block(8, 26, 8), BlockType::LEAVES.code());
        assert_eq!(chunk.get_block(10, 24, 8), BlockType::LEAVES.code());
        assert_eq!(chunk.get_block(10, 24, 10), BlockType::AIR.code());
    }

    #[test]
    fn nothing_grows_on_sand() {
        let mut chunk = Chunk::new(Point3::new(0, 0, 0), Vec::new());
        FlatGenerator::new(20, BlockType::SAND.code()).populate(&mut chunk);
        let before = chunk.cells().to_vec();
        VegetationGenerator::new(1).populate(&mut chunk);
        assert_eq!(chunk.cells(), &before[..]);
    }
}
