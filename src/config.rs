//! # Configuration
//!
//! World settings loaded from a JSON file. Chunk dimensions are not part of the
//! configuration: the save format depends on them, so they are compile-time
//! constants in the chunk module.

use std::{fs, path::Path, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::VoxelError;
use crate::voxels::generation::GeneratorKind;

/// Settings for a [`World`](crate::voxels::world::World).
///
/// Every field has a default, so a partial file such as `{"seed": 7}` is valid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Seed handed to every generator.
    pub seed: u32,
    /// Directory holding one `<chunk id>.bc` file per saved chunk.
    pub save_path: PathBuf,
    /// Maximum number of chunks kept in memory before the least recently used
    /// one is flushed and evicted.
    pub cache_capacity: usize,
    /// Generators applied, in order, to every new chunk.
    pub generators: Vec<GeneratorKind>,
    /// Radius, in chunks, the demo generates around the origin.
    pub view_distance: i32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            seed: 0,
            save_path: PathBuf::from("SAVED_WORLDS/world"),
            cache_capacity: 1024,
            generators: vec![
                GeneratorKind::Terrain,
                GeneratorKind::Liquid,
                GeneratorKind::Vegetation,
            ],
            view_distance: 4,
        }
    }
}

impl WorldConfig {
    /// Parses a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, VoxelError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, VoxelError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}
