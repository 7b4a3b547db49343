//! Noise-based terrain.
//!
//! Column heights come from 2D Perlin noise; caves are carved where 3D Perlin
//! noise leaves the `[PERLIN_NEGATIVE_THRESHOLD, PERLIN_POSITIVE_THRESHOLD]` band.

use noise::{NoiseFn, Perlin};

use super::{ChunkGenerator, SEA_LEVEL};
use crate::voxels::block::block_type::BlockType;
use crate::voxels::chunk::{Chunk, CHUNK_DIMENSION_X, CHUNK_DIMENSION_Y, CHUNK_DIMENSION_Z};

/// Scaling factor applied to world coordinates when sampling height noise.
pub const PERLIN_SCALE_FACTOR: f64 = 0.02;
/// Scaling factor applied to world coordinates when sampling cave noise.
pub const CAVE_SCALE_FACTOR: f64 = 0.06;
/// Cave noise above this value is carved out.
pub const PERLIN_POSITIVE_THRESHOLD: f64 = 0.55;
/// Cave noise below this value is carved out.
pub const PERLIN_NEGATIVE_THRESHOLD: f64 = -0.55;

/// Average surface height.
const BASE_HEIGHT: f64 = 40.0;
/// Maximum deviation from the average surface height.
const HEIGHT_AMPLITUDE: f64 = 18.0;
/// Thickness of the dirt layer under the surface.
const DIRT_DEPTH: i32 = 4;

/// Hills of stone covered with dirt and grass, sand near the water line, and caves.
pub struct PerlinTerrainGenerator {
    height_noise: Perlin,
    cave_noise: Perlin,
}

impl PerlinTerrainGenerator {
    pub fn new(seed: u32) -> Self {
        PerlinTerrainGenerator {
            height_noise: Perlin::new(seed),
            cave_noise: Perlin::new(seed.wrapping_add(1)),
        }
    }

    /// Surface height of the world column at `(wx, wz)`.
    pub fn surface_height(&self, wx: i32, wz: i32) -> i32 {
        let sample = self.height_noise.get([
            wx as f64 * PERLIN_SCALE_FACTOR,
            wz as f64 * PERLIN_SCALE_FACTOR,
        ]);
        ((BASE_HEIGHT + sample * HEIGHT_AMPLITUDE) as i32).clamp(1, CHUNK_DIMENSION_Y - 2)
    }

    fn is_cave(&self, wx: i32, y: i32, wz: i32) -> bool {
        let sample = self.cave_noise.get([
            wx as f64 * CAVE_SCALE_FACTOR,
            y as f64 * CAVE_SCALE_FACTOR,
            wz as f64 * CAVE_SCALE_FACTOR,
        ]);
        !(PERLIN_NEGATIVE_THRESHOLD..=PERLIN_POSITIVE_THRESHOLD).contains(&sample)
    }
}

impl ChunkGenerator for PerlinTerrainGenerator {
    fn populate(&self, chunk: &mut Chunk) {
        for x in 0..CHUNK_DIMENSION_X {
            for z in 0..CHUNK_DIMENSION_Z {
                let world = chunk.block_world_pos(x, 0, z);
                let height = self.surface_height(world.x, world.z);
                let beach = height <= SEA_LEVEL + 1;

                for y in 0..=height {
                    let block = if y == height {
                        if beach {
                            BlockType::SAND
                        } else {
                            BlockType::GRASS
                        }
                    } else if y > height - DIRT_DEPTH {
                        if beach {
                            BlockType::SAND
                        } else {
                            BlockType::DIRT
                        }
                    } else if y > 0 && self.is_cave(world.x, y, world.z) {
                        BlockType::AIR
                    } else {
                        BlockType::STONE
                    };
                    chunk.set_block(x, y, z, block.code());
                }
            }
        }
    }
}
