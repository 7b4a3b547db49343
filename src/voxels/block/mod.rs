//! # Block Module
//!
//! Block codes and the capability records the lighting and storage code query.
//! The chunk store never needs the identity of a concrete block, only whether
//! light passes through it and whether it covers the sky.

use phf::phf_map;

pub mod block_side;
pub mod block_type;

/// The underlying integer type used to represent block types in memory and on disk.
pub type BlockTypeSize = u8;

/// Code returned for any block lookup outside a chunk's bounds.
pub const NO_BLOCK: BlockTypeSize = BlockTypeSize::MAX;

/// Capability record for one block code.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BlockProperties {
    /// Light can pass through this block.
    pub translucent: bool,
    /// Sprite-like block that neither covers the sky nor blocks sunlight seeding.
    pub billboard: bool,
    /// Liquid block, used by the generators to avoid planting on water.
    pub liquid: bool,
}

impl BlockProperties {
    const OPAQUE: BlockProperties = BlockProperties {
        translucent: false,
        billboard: false,
        liquid: false,
    };

    /// An opaque block never carries light.
    pub fn is_opaque(&self) -> bool {
        !self.translucent
    }
}

/// Immutable table mapping block codes to their capabilities.
///
/// Codes missing from the table (including [`NO_BLOCK`]) are treated as opaque.
static BLOCK_PROPERTIES: phf::Map<u8, BlockProperties> = phf_map! {
    0u8 => BlockProperties { translucent: true, billboard: false, liquid: false },
    1u8 => BlockProperties::OPAQUE,
    2u8 => BlockProperties::OPAQUE,
    3u8 => BlockProperties::OPAQUE,
    4u8 => BlockProperties::OPAQUE,
    5u8 => BlockProperties::OPAQUE,
    6u8 => BlockProperties::OPAQUE,
    7u8 => BlockProperties { translucent: true, billboard: false, liquid: true },
    8u8 => BlockProperties { translucent: true, billboard: false, liquid: false },
    9u8 => BlockProperties { translucent: true, billboard: false, liquid: false },
    10u8 => BlockProperties { translucent: true, billboard: true, liquid: false },
    11u8 => BlockProperties { translucent: true, billboard: true, liquid: false },
    12u8 => BlockProperties { translucent: true, billboard: true, liquid: false },
};

/// Namespace for block code lookups.
pub struct Block;

impl Block {
    /// Looks up the capability record for a block code.
    pub fn properties(code: BlockTypeSize) -> BlockProperties {
        BLOCK_PROPERTIES
            .get(&code)
            .copied()
            .unwrap_or(BlockProperties::OPAQUE)
    }

    /// True if light can pass through the block.
    pub fn is_translucent(code: BlockTypeSize) -> bool {
        Self::properties(code).translucent
    }

    /// True if the block leaves a column open to the sky (air or billboard).
    pub fn is_open(code: BlockTypeSize) -> bool {
        code == block_type::BlockType::AIR.code() || Self::properties(code).billboard
    }
}
