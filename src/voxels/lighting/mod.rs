//! # Lighting Engine
//!
//! Two independent light channels, sun and block, each an intensity in
//! `0..=MAX_LIGHT` that decays by one per hop and only travels through
//! translucent blocks.
//!
//! Sunlight is seeded per column by the chunk itself (see
//! [`Chunk::scan_sunlight_column`](super::chunk::Chunk::scan_sunlight_column)).
//! Everything that may cross a chunk boundary lives here and goes through a
//! [`WorldAccessor`](super::world::WorldAccessor), which resolves world
//! coordinates to the owning chunk and locks one chunk at a time.

use serde::{Deserialize, Serialize};

mod propagation;
mod sunlight;

pub use propagation::{refresh_light_at_local_pos, spread_light, update_light};
pub use sunlight::refresh_sunlight_at_local_pos;

/// Brightest light intensity. Also what out-of-bounds light probes return.
pub const MAX_LIGHT: u8 = 15;

/// The two light channels stored per cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LightKind {
    /// Light emitted by blocks.
    Block,
    /// Light coming from the open sky.
    Sun,
}
