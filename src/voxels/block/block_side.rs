//! # Block Side Module
//!
//! The six faces of a voxel block. Light refresh and propagation visit the
//! face-adjacent neighbors of a cell in this order.

use cgmath::{Point3, Vector3};

/// Represents the six possible faces of a voxel block.
///
/// The order matches the neighbor order of the lighting code:
/// +X, -X, +Z, -Z, +Y, -Y.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The face pointing at positive X
    RIGHT = 0,

    /// The face pointing at negative X
    LEFT = 1,

    /// The face pointing at positive Z
    FRONT = 2,

    /// The face pointing at negative Z
    BACK = 3,

    /// The face pointing at positive Y
    TOP = 4,

    /// The face pointing at negative Y
    BOTTOM = 5,
}

impl BlockSide {
    /// Returns all six faces in neighbor-visit order.
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::RIGHT,
            BlockSide::LEFT,
            BlockSide::FRONT,
            BlockSide::BACK,
            BlockSide::TOP,
            BlockSide::BOTTOM,
        ]
    }

    /// Unit offset from a cell to the neighbor across this face.
    pub fn offset(self) -> Vector3<i32> {
        match self {
            BlockSide::RIGHT => Vector3::new(1, 0, 0),
            BlockSide::LEFT => Vector3::new(-1, 0, 0),
            BlockSide::FRONT => Vector3::new(0, 0, 1),
            BlockSide::BACK => Vector3::new(0, 0, -1),
            BlockSide::TOP => Vector3::new(0, 1, 0),
            BlockSide::BOTTOM => Vector3::new(0, -1, 0),
        }
    }

    /// The six face-adjacent neighbors of `position`.
    pub fn neighbors(position: Point3<i32>) -> [Point3<i32>; 6] {
        Self::all().map(|side| position + side.offset())
    }
}
