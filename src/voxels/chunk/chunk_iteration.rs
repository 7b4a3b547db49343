//! # Chunk Iteration Module
//!
//! Walks every local position of a chunk in storage order: x outermost, then y,
//! then z innermost. This is the order of the cell vector and of the save format,
//! so the n-th position yielded corresponds to the n-th stored cell.

use cgmath::Point3;

use super::{CHUNK_DIMENSION_X, CHUNK_DIMENSION_Y, CHUNK_DIMENSION_Z};

/// Iterator over all local positions of a chunk.
pub struct LocalPositionIterator {
    local_x: i32,
    local_y: i32,
    local_z: i32,
}

impl LocalPositionIterator {
    /// Starts at local position (0, 0, 0).
    pub fn new() -> Self {
        LocalPositionIterator {
            local_x: 0,
            local_y: 0,
            local_z: 0,
        }
    }
}

impl Default for LocalPositionIterator {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for LocalPositionIterator {
    type Item = Point3<i32>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.local_x == CHUNK_DIMENSION_X {
            return None;
        }

        let position = Point3::new(self.local_x, self.local_y, self.local_z);

        self.local_z += 1;
        if self.local_z == CHUNK_DIMENSION_Z {
            self.local_z = 0;
            self.local_y += 1;
            if self.local_y == CHUNK_DIMENSION_Y {
                self.local_y = 0;
                self.local_x += 1;
            }
        }

        Some(position)
    }
}
