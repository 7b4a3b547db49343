//! Hand-off between chunk storage and whatever builds geometry from it.
//!
//! Geometry itself is the builder's business. The world only decides when a
//! chunk needs a new mesh (generated and dirty), passes it to a
//! [`ChunkMeshBuilder`], clears the dirty flag afterwards and counts the rebuild
//! in a [`ChunkStatistics`].

use std::sync::atomic::{AtomicU64, Ordering};

use super::block::{block_side::BlockSide, block_type::BlockType, Block};
use super::chunk::{chunk_iteration::LocalPositionIterator, Chunk};

/// Builds a derived mesh from a chunk's blocks and light.
///
/// Called with the chunk locked. Implementations must not reach back into the
/// world.
pub trait ChunkMeshBuilder {
    fn build_mesh(&mut self, chunk: &Chunk);
}

/// Counters for chunk work, shared by whoever drives mesh rebuilds.
#[derive(Debug, Default)]
pub struct ChunkStatistics {
    mesh_updates: AtomicU64,
}

impl ChunkStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one completed mesh rebuild.
    pub fn record_mesh_update(&self) {
        self.mesh_updates.fetch_add(1, Ordering::Relaxed);
    }

    /// Number of mesh rebuilds recorded so far.
    pub fn mesh_update_count(&self) -> u64 {
        self.mesh_updates.load(Ordering::Relaxed)
    }
}

/// Counts the block faces a mesh of the chunk would need, one counter per side.
///
/// A face is visible when its block is not air and the cell it faces lets light
/// through. Cells past the chunk border count as covered.
#[derive(Debug, Default)]
pub struct FaceCountingMeshBuilder {
    /// Visible faces per [`BlockSide`], indexed by the side's discriminant.
    pub faces: [u64; 6],
    /// Chunks handed to this builder.
    pub chunks: u64,
}

impl FaceCountingMeshBuilder {
    pub fn total_faces(&self) -> u64 {
        self.faces.iter().sum()
    }
}

impl ChunkMeshBuilder for FaceCountingMeshBuilder {
    fn build_mesh(&mut self, chunk: &Chunk) {
        for local in LocalPositionIterator::new() {
            let block = chunk.get_block(local.x, local.y, local.z);
            if block == BlockType::AIR.code() {
                continue;
            }

            for side in BlockSide::all() {
                let facing = local + side.offset();
                if Block::is_translucent(chunk.get_block(facing.x, facing.y, facing.z)) {
                    self.faces[side as usize] += 1;
                }
            }
        }
        self.chunks += 1;
    }
}
