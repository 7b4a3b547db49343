//! # Chunk Identity
//!
//! Stable chunk ids and the priority order used when scheduling chunk work.
//!
//! Ids come from a Cantor pairing of the grid coordinates after folding each
//! signed coordinate onto the naturals (0, -1, 1, -2, 2, ... map to 0, 1, 2, 3, 4, ...).
//! The pairing is injective, so two grid cells never share a save file.

use std::cmp::Ordering;

use cgmath::Point3;

use super::{Chunk, CHUNK_DIMENSION_X, CHUNK_DIMENSION_Z};

/// Identifier of a chunk, derived from its grid position.
pub type ChunkId = u64;

/// Folds a signed coordinate onto the naturals without collisions.
fn fold(value: i32) -> u64 {
    if value >= 0 {
        (value as u64) * 2
    } else {
        (-(value as i64) as u64) * 2 - 1
    }
}

/// Pairs two grid coordinates into a single id.
///
/// Injective for every pair whose folded sum stays below 2^32, which covers
/// grid coordinates in `(-2^30, 2^30)` on both axes.
pub fn cantorize(x: i32, z: i32) -> ChunkId {
    let a = fold(x) as u128;
    let b = fold(z) as u128;
    let sum = a + b;
    (sum * (sum + 1) / 2 + b) as ChunkId
}

impl Chunk {
    /// Horizontal distance from `player` to this chunk's world origin.
    pub fn distance_to_player(&self, player: Point3<f32>) -> f64 {
        let dx = player.x as f64 - (self.position.x * CHUNK_DIMENSION_X) as f64;
        let dz = player.z as f64 - (self.position.z * CHUNK_DIMENSION_Z) as f64;
        (dx * dx + dz * dz).sqrt()
    }

    /// Scheduling order between two chunks.
    ///
    /// With a player position, nearer chunks come first. Without one, chunks
    /// are ordered by descending id.
    pub fn priority_cmp(&self, other: &Chunk, player: Option<Point3<f32>>) -> Ordering {
        match player {
            Some(player) => self
                .distance_to_player(player)
                .total_cmp(&other.distance_to_player(player)),
            None => other.id.cmp(&self.id),
        }
    }
}
