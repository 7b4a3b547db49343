//! # Block Type Module
//!
//! This module defines the different types of blocks in the voxel world and
//! their byte codes. The codes are what chunks store and what ends up on disk,
//! so existing variants must never be renumbered.

use num_derive::FromPrimitive;

use super::BlockTypeSize;

/// Enumerates all block types known to the chunk store.
///
/// The discriminant is the byte code stored in chunk arrays and save files.
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
#[repr(u8)]
pub enum BlockType {
    /// Empty space. Translucent and open to the sky.
    AIR = 0,

    /// A basic dirt block, found below the grass layer.
    DIRT = 1,

    /// Dirt with grass on top. Vegetation is only planted on grass.
    GRASS = 2,

    /// Tree trunks.
    WOOD = 3,

    /// A plain white block, mostly used by test patterns.
    WHITE = 4,

    /// Bedrock-like filler below the dirt layer.
    STONE = 5,

    /// Beach material around the sea level.
    SAND = 6,

    /// Liquid. Translucent, but covers the column below it from the sky.
    WATER = 7,

    /// Tree canopy. Translucent, but covers the column below it from the sky.
    LEAVES = 8,

    /// Fully translucent solid block.
    GLASS = 9,

    /// Billboard plant. Does not cover the sky.
    TALL_GRASS = 10,

    /// Billboard plant.
    RED_FLOWER = 11,

    /// Billboard plant.
    YELLOW_FLOWER = 12,
}

impl BlockType {
    /// Converts a stored byte code back into a `BlockType`.
    ///
    /// Returns `None` for codes no variant is assigned to, including the
    /// out-of-bounds sentinel.
    pub fn from_code(code: BlockTypeSize) -> Option<Self> {
        num::FromPrimitive::from_u8(code)
    }

    /// The byte code stored for this block type.
    pub fn code(self) -> BlockTypeSize {
        self as BlockTypeSize
    }

    /// Picks a billboard plant using the supplied generator.
    pub fn random_plant(rng: &mut fastrand::Rng) -> Self {
        match rng.u8(0..10) {
            0 => BlockType::RED_FLOWER,
            1 => BlockType::YELLOW_FLOWER,
            _ => BlockType::TALL_GRASS,
        }
    }
}
