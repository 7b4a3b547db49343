//! # World Module
//!
//! This module provides the `World` struct, the owner of the chunk cache and the
//! accessor through which chunks reach each other.
//!
//! ## World Accessor
//!
//! Lighting and neighbor invalidation work in world coordinates and may touch
//! any chunk. They go through the [`WorldAccessor`] trait, which resolves a world
//! position to its owning chunk (creating it if needed) and delegates to that
//! chunk's local-coordinate operations.
//!
//! ## Locking
//!
//! Every accessor call locks at most one chunk, and only for the duration of the
//! call. No chunk lock is ever held while another one is requested, so two
//! chunks propagating light into each other cannot deadlock.
//!
//! Fresh chunks are not trusted: their light reads as [`MAX_LIGHT`], the same
//! open-sky assumption used past the edge of a chunk, so propagation never
//! floods into a chunk that has not been generated yet.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use cgmath::Point3;
use log::{debug, info};

use super::block::{Block, BlockTypeSize};
use super::chunk::{Chunk, CHUNK_DIMENSION_X, CHUNK_DIMENSION_Y, CHUNK_DIMENSION_Z};
use super::chunk_cache::ChunkCache;
use super::generation::{build_generators, ChunkGenerator};
use super::lighting::{self, LightKind, MAX_LIGHT};
use super::meshing::{ChunkMeshBuilder, ChunkStatistics};
use crate::config::WorldConfig;
use crate::core::MtResource;

/// World-space operations the chunk core needs from its owner.
pub trait WorldAccessor {
    /// Block code at a world position.
    fn get_block(&self, position: Point3<i32>) -> BlockTypeSize;

    /// Light intensity at a world position.
    fn get_light(&self, position: Point3<i32>, kind: LightKind) -> u8;

    /// Sets the light intensity at a world position, invalidating face
    /// neighbors of the owning chunk if the value changed.
    fn set_light(&self, position: Point3<i32>, intensity: u8, kind: LightKind);

    /// Flood-fills light from a world position. See [`lighting::spread_light`].
    fn spread_light(&self, position: Point3<i32>, intensity: u8, depth: u8, kind: LightKind) -> usize {
        lighting::spread_light(self, position, intensity, depth, kind)
    }

    /// The live chunk at grid `(x, z)`, created if it does not exist yet.
    fn load_or_create_chunk(&self, x: i32, z: i32) -> MtResource<Chunk>;

    /// Directory chunk files are saved in.
    fn world_save_path(&self) -> &Path;

    /// Current player position, if there is a player.
    fn player_position(&self) -> Option<Point3<f32>>;
}

/// Splits a world position into the owning chunk's grid position and the
/// local position inside that chunk.
pub fn split_world_position(position: Point3<i32>) -> (Point3<i32>, Point3<i32>) {
    let grid = Point3::new(
        position.x.div_euclid(CHUNK_DIMENSION_X),
        0,
        position.z.div_euclid(CHUNK_DIMENSION_Z),
    );
    let local = Point3::new(
        position.x.rem_euclid(CHUNK_DIMENSION_X),
        position.y,
        position.z.rem_euclid(CHUNK_DIMENSION_Z),
    );
    (grid, local)
}

/// A voxel world: a chunk cache, the generators bound into new chunks and the
/// player position used for scheduling.
pub struct World {
    config: WorldConfig,
    chunk_cache: MtResource<ChunkCache>,
    player: MtResource<Option<Point3<f32>>>,
}

impl World {
    /// Creates a world whose generators come from the configuration.
    pub fn new(config: WorldConfig) -> Self {
        let generators = build_generators(&config.generators, config.seed);
        Self::with_generators(config, generators)
    }

    /// Creates a world with an explicit generator list, ignoring the one in
    /// the configuration.
    pub fn with_generators(config: WorldConfig, generators: Vec<Arc<dyn ChunkGenerator>>) -> Self {
        let chunk_cache = ChunkCache::new(config.cache_capacity, config.save_path.clone(), generators);
        World {
            config,
            chunk_cache: MtResource::new(chunk_cache),
            player: MtResource::new(None),
        }
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn chunk_cache(&self) -> &MtResource<ChunkCache> {
        &self.chunk_cache
    }

    pub fn set_player_position(&self, position: Option<Point3<f32>>) {
        *self.player.get_mut() = position;
    }

    /// Resolves a world position to its chunk and local coordinates.
    fn resolve(&self, position: Point3<i32>) -> (MtResource<Chunk>, Point3<i32>) {
        let (grid, local) = split_world_position(position);
        (self.load_or_create_chunk(grid.x, grid.z), local)
    }

    /// Loads or generates the chunk at grid `(x, z)` and returns it.
    pub fn generate_chunk(&self, x: i32, z: i32) -> MtResource<Chunk> {
        let chunk = self.load_or_create_chunk(x, z);
        chunk.get_mut().generate(&self.config.save_path);
        chunk
    }

    /// The eight chunks around grid position `grid`, in the order
    /// +x, -x, +z, -z, +x+z, -x-z, -x+z, +x-z.
    pub fn load_or_create_neighbors(&self, grid: Point3<i32>) -> [MtResource<Chunk>; 8] {
        [
            (1, 0),
            (-1, 0),
            (0, 1),
            (0, -1),
            (1, 1),
            (-1, -1),
            (-1, 1),
            (1, -1),
        ]
        .map(|(dx, dz)| self.load_or_create_chunk(grid.x + dx, grid.z + dz))
    }

    /// Marks the face-adjacent chunks touching local cell `(x, z)` of chunk
    /// `grid` as dirty. Interior cells affect no neighbor.
    pub fn mark_neighbors_dirty(&self, grid: Point3<i32>, x: i32, z: i32) {
        let faces = self.load_or_create_chunk(grid.x, grid.z).get().face_neighbors(x, z);
        if faces.is_empty() {
            return;
        }

        let neighbors = self.load_or_create_neighbors(grid);
        for neighbor in neighbors.iter().take(4) {
            let mut neighbor = neighbor.get_mut();
            if faces.contains(&neighbor.position()) {
                neighbor.set_dirty(true);
            }
        }
    }

    /// Sets the block at a world position.
    ///
    /// When the block changed, face neighbors are invalidated and, with
    /// `update_light`, the column's sunlight is rescanned with spreading and
    /// refreshing, the cell's block light is refreshed, and its light is
    /// spread back out if the new block lets light through.
    pub fn set_block(&self, position: Point3<i32>, block_type: BlockTypeSize, update_light: bool) {
        let (grid, local) = split_world_position(position);
        let chunk = self.load_or_create_chunk(grid.x, grid.z);

        let changed = chunk.get_mut().set_block(local.x, local.y, local.z, block_type);
        if !changed {
            return;
        }
        self.mark_neighbors_dirty(grid, local.x, local.z);

        if update_light && !chunk.get().is_fresh() {
            lighting::refresh_sunlight_at_local_pos(self, grid, local.x, local.z, true, true);
            lighting::refresh_light_at_local_pos(self, grid, local.x, local.y, local.z, LightKind::Block);

            if Block::is_translucent(block_type) {
                for kind in [LightKind::Sun, LightKind::Block] {
                    let intensity = self.get_light(position, kind);
                    if intensity > 0 {
                        self.spread_light(position, intensity, 0, kind);
                    }
                }
            }
        }
    }

    /// Runs the chunk-wide lighting pass on the chunk at grid `(x, z)`.
    pub fn update_light(&self, x: i32, z: i32) {
        lighting::update_light(self, Point3::new(x, 0, z));
    }

    /// Runs the lighting pass on every cached chunk that needs one, nearest to
    /// the player first. Returns how many chunks were lit.
    pub fn update_dirty_light(&self) -> usize {
        let mut lit = 0;
        for chunk in self.chunks_by_priority() {
            let (position, needs_light) = {
                let chunk = chunk.get();
                (chunk.position(), !chunk.is_fresh() && chunk.is_light_dirty())
            };
            if needs_light {
                self.update_light(position.x, position.z);
                lit += 1;
            }
        }
        lit
    }

    /// Hands the chunk at grid `(x, z)` to `builder` if it is generated and
    /// dirty, then clears its dirty flag.
    ///
    /// The builder runs while the chunk is locked and must not call back into
    /// the world. Returns true if a mesh was built.
    pub fn generate_mesh(
        &self,
        x: i32,
        z: i32,
        builder: &mut dyn ChunkMeshBuilder,
        statistics: &ChunkStatistics,
    ) -> bool {
        let chunk = self.load_or_create_chunk(x, z);
        let mut chunk = chunk.get_mut();
        if chunk.is_fresh() || !chunk.is_dirty() {
            return false;
        }

        builder.build_mesh(&chunk);
        chunk.set_dirty(false);
        statistics.record_mesh_update();
        true
    }

    /// Every cached chunk, ordered for scheduling: nearest to the player first,
    /// or by descending id without a player.
    pub fn chunks_by_priority(&self) -> Vec<MtResource<Chunk>> {
        let player = self.player_position();
        let mut chunks = self.chunk_cache.get().chunks();
        chunks.sort_by(|a, b| {
            if a.ptr_eq(b) {
                return std::cmp::Ordering::Equal;
            }
            a.get().priority_cmp(&b.get(), player)
        });
        chunks
    }

    /// Writes every generated chunk in the cache to disk.
    pub fn save_all(&self) -> usize {
        let saved = self.chunk_cache.get().save_all();
        info!("Saved {} chunks to {}.", saved, self.config.save_path.display());
        saved
    }

    /// Save directory as an owned path.
    pub fn save_path(&self) -> PathBuf {
        self.config.save_path.clone()
    }
}

impl WorldAccessor for World {
    fn get_block(&self, position: Point3<i32>) -> BlockTypeSize {
        let (chunk, local) = self.resolve(position);
        let block = chunk.get().get_block(local.x, local.y, local.z);
        block
    }

    fn get_light(&self, position: Point3<i32>, kind: LightKind) -> u8 {
        let (chunk, local) = self.resolve(position);
        let chunk = chunk.get();
        if chunk.is_fresh() {
            return MAX_LIGHT;
        }
        chunk.get_light(local.x, local.y, local.z, kind)
    }

    fn set_light(&self, position: Point3<i32>, intensity: u8, kind: LightKind) {
        if !(0..CHUNK_DIMENSION_Y).contains(&position.y) {
            return;
        }
        let (grid, local) = split_world_position(position);
        let changed = self
            .load_or_create_chunk(grid.x, grid.z)
            .get_mut()
            .set_light(local.x, local.y, local.z, intensity, kind);
        if changed {
            self.mark_neighbors_dirty(grid, local.x, local.z);
        }
    }

    fn load_or_create_chunk(&self, x: i32, z: i32) -> MtResource<Chunk> {
        self.chunk_cache.get_mut().load_or_create_chunk(x, z)
    }

    fn world_save_path(&self) -> &Path {
        &self.config.save_path
    }

    fn player_position(&self) -> Option<Point3<f32>> {
        *self.player.get()
    }
}

impl Drop for World {
    fn drop(&mut self) {
        debug!("Dropping world with {} cached chunks.", self.chunk_cache.get().len());
    }
}
