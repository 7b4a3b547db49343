//! # Chunk Persistence
//!
//! One binary file per chunk, named `<chunk id>.bc` inside the world save directory.
//!
//! ## Layout
//!
//! ```text
//! byte 0        flags (bit 0: light_dirty at save time)
//! bytes 1..     for x in 0..16, y in 0..128, z in 0..16:
//!                   block code, sunlight, block light
//! ```
//!
//! The total size is always `1 + 16 * 128 * 16 * 3` bytes. Files of any other
//! size are rejected without touching the in-memory chunk.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use bitvec::prelude::*;
use log::{debug, error};

use super::{Chunk, ChunkCell, ChunkId, CHUNK_SIZE};
use crate::error::VoxelError;

/// Extension of chunk save files.
pub const CHUNK_FILE_EXTENSION: &str = "bc";

/// Exact size of a chunk save file in bytes.
pub const CHUNK_FILE_SIZE: usize = 1 + CHUNK_SIZE * std::mem::size_of::<ChunkCell>();

/// Bit of the flag byte holding `light_dirty`.
const LIGHT_DIRTY_FLAG: usize = 0;

/// Result of trying to load a chunk from disk.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChunkLoadOutcome {
    /// The file was read and the chunk now holds its contents.
    Loaded,
    /// No file exists for this chunk. Not an error: the chunk has never been saved.
    NotFound,
    /// The file exists but could not be read or is malformed. The chunk is unchanged.
    Failed,
}

/// Path of the save file for chunk `id` inside `save_path`.
pub fn chunk_file_path(save_path: &Path, id: ChunkId) -> PathBuf {
    save_path.join(format!("{id}.{CHUNK_FILE_EXTENSION}"))
}

/// Serializes cells and flags into the fixed file layout.
pub fn encode_chunk(cells: &[ChunkCell], light_dirty: bool) -> Vec<u8> {
    let mut flags = BitArray::<[u8; 1], Lsb0>::new([0]);
    flags.set(LIGHT_DIRTY_FLAG, light_dirty);

    let mut bytes = Vec::with_capacity(1 + std::mem::size_of_val(cells));
    bytes.extend_from_slice(&flags.into_inner());
    bytes.extend_from_slice(bytemuck::cast_slice(cells));
    bytes
}

/// Parses the fixed file layout back into cells and the `light_dirty` flag.
pub fn decode_chunk(bytes: &[u8]) -> Result<(Vec<ChunkCell>, bool), VoxelError> {
    if bytes.len() != CHUNK_FILE_SIZE {
        return Err(VoxelError::TruncatedChunkFile {
            expected: CHUNK_FILE_SIZE,
            actual: bytes.len(),
        });
    }

    let flags = BitArray::<[u8; 1], Lsb0>::new([bytes[0]]);
    let cells: Vec<ChunkCell> = bytemuck::cast_slice(&bytes[1..]).to_vec();
    Ok((cells, flags[LIGHT_DIRTY_FLAG]))
}

/// Writes `bytes` next to `path` first and renames it into place, so a failed
/// write never leaves a half-written chunk file behind.
fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), VoxelError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let staging = path.with_extension(format!("{CHUNK_FILE_EXTENSION}.tmp"));
    fs::write(&staging, bytes)?;
    fs::rename(&staging, path)?;
    Ok(())
}

/// Reads a whole file, mapping "does not exist" to `None`.
fn read_if_present(path: &Path) -> Result<Option<Vec<u8>>, VoxelError> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}

impl Chunk {
    fn try_write_to_disk(&self, save_path: &Path) -> Result<PathBuf, VoxelError> {
        if self.fresh {
            return Err(VoxelError::FreshChunk);
        }
        let path = chunk_file_path(save_path, self.id);
        write_atomically(&path, &encode_chunk(&self.cells, self.light_dirty))?;
        Ok(path)
    }

    /// Saves the chunk into `save_path`.
    ///
    /// Fresh chunks are never written. Returns false if nothing was written;
    /// I/O failures are logged.
    pub fn write_chunk_to_disk(&self, save_path: &Path) -> bool {
        match self.try_write_to_disk(save_path) {
            Ok(path) => {
                debug!("Wrote {} to {}.", self, path.display());
                true
            }
            Err(VoxelError::FreshChunk) => false,
            Err(err) => {
                error!("Failed to write {}: {}", self, err);
                false
            }
        }
    }

    /// Replaces the chunk's cells and `light_dirty` flag with the saved state
    /// from `save_path`, if one exists.
    ///
    /// The chunk is only modified after the whole file has been read and
    /// validated. The `fresh` flag is left to the caller.
    pub fn load_chunk_from_file(&mut self, save_path: &Path) -> ChunkLoadOutcome {
        let path = chunk_file_path(save_path, self.id);

        let decoded = read_if_present(&path)
            .and_then(|bytes| bytes.map(|b| decode_chunk(&b)).transpose());

        match decoded {
            Ok(Some((cells, light_dirty))) => {
                self.cells = cells;
                self.light_dirty = light_dirty;
                debug!("Loaded {} from {}.", self, path.display());
                ChunkLoadOutcome::Loaded
            }
            Ok(None) => ChunkLoadOutcome::NotFound,
            Err(err) => {
                error!("Failed to load {} from {}: {}", self, path.display(), err);
                ChunkLoadOutcome::Failed
            }
        }
    }
}
