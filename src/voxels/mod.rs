//! # Voxel Store
//!
//! Storage, lighting, generation and persistence of the chunks that make up a
//! voxel world.
//!
//! ## Architecture
//!
//! * **Block**: block codes and the capability record (translucent, billboard, liquid) behind each
//! * **Chunk**: a 16x128x16 array of cells, each holding a block code and two light values
//! * **Lighting**: sunlight seeding, flood-fill propagation and per-cell refresh across chunk borders
//! * **Generation**: ordered generators that fill a fresh chunk's blocks
//! * **Chunk Cache**: the bounded map that hands out the one live instance of each chunk
//! * **World**: resolves world positions to chunks and keeps neighbors in sync
//!
//! ## Data Flow
//!
//! 1. The world asks the chunk cache for a chunk, which creates it fresh if needed
//! 2. Generating the chunk loads it from disk or runs its generators and seeds sunlight
//! 3. Block edits go through the world, which dirties face neighbors and relights
//! 4. Dirty chunks are handed to a mesh builder, evicted chunks are written to disk
//!
//! ## Thread Safety
//!
//! Chunks live behind [`MtResource`](crate::core::MtResource) handles. Operations
//! lock one chunk at a time and never hold a chunk lock while asking the world
//! for another chunk.

pub mod block;
pub mod chunk;
pub mod chunk_cache;
pub mod generation;
pub mod lighting;
pub mod meshing;
pub mod world;
