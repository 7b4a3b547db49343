//! # Chunk Cache
//!
//! The single source of truth for which chunk instance lives at a grid position.
//! `load_or_create_chunk` always returns the same live instance for the same
//! coordinates for as long as it stays cached, which neighbor invalidation and
//! cross-chunk lighting rely on.
//!
//! The cache is bounded. When it grows past its capacity, the least recently
//! used chunks that nobody else holds a handle to are written to disk and
//! dropped. A chunk still referenced elsewhere is never evicted, so no second
//! instance can be created for its grid cell while the first is in use.

use std::{path::PathBuf, sync::Arc};

use cgmath::Point3;
use log::debug;
use lru::LruCache;

use super::chunk::Chunk;
use super::generation::ChunkGenerator;
use crate::core::MtResource;

/// LRU-bounded map from chunk grid position to chunk.
pub struct ChunkCache {
    chunks: LruCache<Point3<i32>, MtResource<Chunk>>,
    capacity: usize,
    save_path: PathBuf,
    /// Bound into every chunk the cache creates.
    generators: Vec<Arc<dyn ChunkGenerator>>,
}

impl ChunkCache {
    pub fn new(
        capacity: usize,
        save_path: PathBuf,
        generators: Vec<Arc<dyn ChunkGenerator>>,
    ) -> Self {
        ChunkCache {
            chunks: LruCache::unbounded(),
            capacity: capacity.max(1),
            save_path,
            generators,
        }
    }

    /// Returns the chunk at grid `(x, z)`, creating a fresh one if it is not cached.
    ///
    /// A newly created chunk is neither loaded nor generated; that happens in
    /// [`Chunk::generate`].
    pub fn load_or_create_chunk(&mut self, x: i32, z: i32) -> MtResource<Chunk> {
        let key = Point3::new(x, 0, z);
        if let Some(chunk) = self.chunks.get(&key) {
            return chunk.clone();
        }

        let chunk = MtResource::new(Chunk::new(key, self.generators.clone()));
        self.chunks.put(key, chunk.clone());
        self.evict_excess();
        chunk
    }

    /// Returns the chunk at grid `(x, z)` if it is cached, without creating it
    /// or touching the recency order.
    pub fn peek(&self, x: i32, z: i32) -> Option<MtResource<Chunk>> {
        self.chunks.peek(&Point3::new(x, 0, z)).cloned()
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Handles to every cached chunk, most recently used first.
    pub fn chunks(&self) -> Vec<MtResource<Chunk>> {
        self.chunks.iter().map(|(_, chunk)| chunk.clone()).collect()
    }

    /// Writes every cached, non-fresh chunk to disk. Returns how many were written.
    pub fn save_all(&self) -> usize {
        self.chunks
            .iter()
            .filter(|(_, chunk)| chunk.get().write_chunk_to_disk(&self.save_path))
            .count()
    }

    fn evict_excess(&mut self) {
        while self.chunks.len() > self.capacity {
            // the cache's own handle is the only one left
            let candidate = self
                .chunks
                .iter()
                .rev()
                .find(|(_, chunk)| chunk.handle_count() == 1)
                .map(|(key, _)| *key);

            let Some(key) = candidate else {
                break;
            };

            if let Some(chunk) = self.chunks.pop(&key) {
                let chunk = chunk.get();
                chunk.write_chunk_to_disk(&self.save_path);
                debug!("Evicted {} from the chunk cache.", chunk);
            }
        }
    }
}
