//! # Chunk Module
//!
//! This module provides the `Chunk` struct: the dense block and light storage of
//! one 16x128x16 cell of the world, together with the flags that track whether
//! its derived artifacts are stale.
//!
//! ## Storage Layout
//!
//! Each cell is stored as a [`ChunkCell`] of three bytes (block code, sunlight,
//! block light) in a single vector indexed x-major, then y, then z. This is the
//! same order the save format uses, so persistence is a straight byte copy.
//!
//! ## Coordinates
//!
//! All accessors on `Chunk` take local coordinates. Anything outside
//! `[0, CHUNK_DIMENSION_*)` is answered with a sentinel instead of being indexed:
//! [`NO_BLOCK`] for blocks, [`MAX_LIGHT`] for light (open sky past the edge of the
//! generated world). Writes outside the bounds are ignored.
//!
//! ## Flags
//! - `fresh`: the chunk has not been generated or loaded yet. Light writes are
//!   ignored while fresh so neighbor propagation cannot pollute it.
//! - `dirty`: block or light data changed since the mesh was last rebuilt.
//! - `light_dirty`: the chunk-wide lighting pass has not run since a relevant change.

use std::{fmt, sync::Arc};

use cgmath::Point3;
use log::{trace, warn};
use web_time::Instant;

use super::block::{Block, BlockTypeSize, NO_BLOCK};
use super::generation::ChunkGenerator;
use super::lighting::{LightKind, MAX_LIGHT};

pub mod chunk_identity;
pub mod chunk_iteration;
pub mod persistence;

pub use chunk_identity::ChunkId;
use persistence::ChunkLoadOutcome;

/// Width of a chunk in blocks.
pub const CHUNK_DIMENSION_X: i32 = 16;
/// Height of a chunk in blocks.
pub const CHUNK_DIMENSION_Y: i32 = 128;
/// Depth of a chunk in blocks.
pub const CHUNK_DIMENSION_Z: i32 = 16;
/// The total number of cells in a chunk.
pub const CHUNK_SIZE: usize =
    (CHUNK_DIMENSION_X * CHUNK_DIMENSION_Y * CHUNK_DIMENSION_Z) as usize;

/// One cell of chunk storage.
///
/// The field order is the on-disk byte order of a cell.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ChunkCell {
    /// Block code, see [`BlockType`](super::block::block_type::BlockType).
    pub block_type: BlockTypeSize,
    /// Sunlight intensity, 0..=15.
    pub sunlight: u8,
    /// Block light intensity, 0..=15.
    pub block_light: u8,
}

/// What happened to an open cell during a sunlight column scan.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SunlightColumnEvent {
    /// The cell at this local y is exposed to the sky and was darker before.
    Brightened(i32),
    /// The cell at this local y is covered by a block above it and was set to 0.
    Covered(i32),
}

/// A 16x128x16 block of the voxel world.
pub struct Chunk {
    /// Position in chunk-grid coordinates. Only `x` and `z` are meaningful.
    position: Point3<i32>,
    id: ChunkId,
    cells: Vec<ChunkCell>,
    fresh: bool,
    dirty: bool,
    light_dirty: bool,
    /// Generators applied by [`Chunk::generate`], in order.
    generators: Vec<Arc<dyn ChunkGenerator>>,
}

impl Chunk {
    /// Creates a fresh, all-air chunk at the given grid position.
    ///
    /// The `y` component of `position` is ignored and stored as 0.
    pub fn new(position: Point3<i32>, generators: Vec<Arc<dyn ChunkGenerator>>) -> Self {
        let position = Point3::new(position.x, 0, position.z);
        Chunk {
            position,
            id: chunk_identity::cantorize(position.x, position.z),
            cells: vec![ChunkCell::default(); CHUNK_SIZE],
            fresh: true,
            dirty: true,
            light_dirty: true,
            generators,
        }
    }

    /// Position of the chunk in chunk-grid coordinates.
    pub fn position(&self) -> Point3<i32> {
        self.position
    }

    /// Stable id derived from the grid position. Also the save file name.
    pub fn id(&self) -> ChunkId {
        self.id
    }

    pub fn is_fresh(&self) -> bool {
        self.fresh
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Sets the mesh dirty flag. Clearing it is reserved to whoever rebuilt the mesh.
    pub fn set_dirty(&mut self, dirty: bool) {
        self.dirty = dirty;
    }

    pub fn is_light_dirty(&self) -> bool {
        self.light_dirty
    }

    pub fn set_light_dirty(&mut self, light_dirty: bool) {
        self.light_dirty = light_dirty;
    }

    /// Maps local coordinates to a cell index, or `None` outside the chunk.
    fn index(x: i32, y: i32, z: i32) -> Option<usize> {
        if !(0..CHUNK_DIMENSION_X).contains(&x)
            || !(0..CHUNK_DIMENSION_Y).contains(&y)
            || !(0..CHUNK_DIMENSION_Z).contains(&z)
        {
            return None;
        }
        Some(((x * CHUNK_DIMENSION_Y + y) * CHUNK_DIMENSION_Z + z) as usize)
    }

    /// Returns the block code at a local position, or [`NO_BLOCK`] outside the chunk.
    pub fn get_block(&self, x: i32, y: i32, z: i32) -> BlockTypeSize {
        match Self::index(x, y, z) {
            Some(i) => self.cells[i].block_type,
            None => NO_BLOCK,
        }
    }

    /// Sets the block code at a local position.
    ///
    /// Placing an opaque block removes the sunlight stored in that cell. Block
    /// light is left as it is until the next lighting pass.
    ///
    /// Returns true if the stored block changed, in which case the chunk is now
    /// dirty and the caller is responsible for invalidating face neighbors
    /// (see [`Chunk::face_neighbors`]).
    pub fn set_block(&mut self, x: i32, y: i32, z: i32, block_type: BlockTypeSize) -> bool {
        let Some(i) = Self::index(x, y, z) else {
            return false;
        };

        let cell = &mut self.cells[i];
        let old_value = cell.block_type;
        cell.block_type = block_type;

        if Block::properties(block_type).is_opaque() {
            cell.sunlight = 0;
        }

        if old_value != block_type {
            self.dirty = true;
            return true;
        }
        false
    }

    /// Returns the light intensity at a local position.
    ///
    /// Outside the chunk this is [`MAX_LIGHT`]: probes past the generated world
    /// see open sky.
    pub fn get_light(&self, x: i32, y: i32, z: i32, kind: LightKind) -> u8 {
        match Self::index(x, y, z) {
            Some(i) => match kind {
                LightKind::Sun => self.cells[i].sunlight,
                LightKind::Block => self.cells[i].block_light,
            },
            None => MAX_LIGHT,
        }
    }

    /// Sets the light intensity at a local position.
    ///
    /// Ignored while the chunk is fresh or outside the chunk. Opaque cells
    /// always store 0, whatever intensity is requested.
    ///
    /// Returns true if the stored value changed.
    pub fn set_light(&mut self, x: i32, y: i32, z: i32, intensity: u8, kind: LightKind) -> bool {
        if self.fresh {
            return false;
        }
        let Some(i) = Self::index(x, y, z) else {
            return false;
        };

        let cell = &mut self.cells[i];
        let intensity = if Block::properties(cell.block_type).is_opaque() {
            0
        } else {
            intensity.min(MAX_LIGHT)
        };

        let slot = match kind {
            LightKind::Sun => &mut cell.sunlight,
            LightKind::Block => &mut cell.block_light,
        };
        let old_value = *slot;
        *slot = intensity;

        if old_value != intensity {
            self.dirty = true;
            return true;
        }
        false
    }

    /// Grid positions of the face-adjacent chunks that share a face with the
    /// cell at local `(x, z)`. Empty for interior cells.
    pub fn face_neighbors(&self, x: i32, z: i32) -> Vec<Point3<i32>> {
        let mut neighbors = Vec::new();
        let p = self.position;

        if x == 0 {
            neighbors.push(Point3::new(p.x - 1, 0, p.z));
        }
        if x == CHUNK_DIMENSION_X - 1 {
            neighbors.push(Point3::new(p.x + 1, 0, p.z));
        }
        if z == 0 {
            neighbors.push(Point3::new(p.x, 0, p.z - 1));
        }
        if z == CHUNK_DIMENSION_Z - 1 {
            neighbors.push(Point3::new(p.x, 0, p.z + 1));
        }
        neighbors
    }

    /// World-space position of this chunk's (0, 0, 0) cell.
    pub fn world_origin(&self) -> Point3<i32> {
        Point3::new(
            self.position.x * CHUNK_DIMENSION_X,
            self.position.y * CHUNK_DIMENSION_Y,
            self.position.z * CHUNK_DIMENSION_Z,
        )
    }

    /// Converts a local position to world coordinates.
    pub fn block_world_pos(&self, x: i32, y: i32, z: i32) -> Point3<i32> {
        let origin = self.world_origin();
        Point3::new(origin.x + x, origin.y + y, origin.z + z)
    }

    /// True if every cell from `y` up to the top of the chunk lets light through.
    pub fn can_block_see_the_sky(&self, x: i32, y: i32, z: i32) -> bool {
        (y.max(0)..CHUNK_DIMENSION_Y).all(|y| Block::is_translucent(self.get_block(x, y, z)))
    }

    /// Rescans the sunlight of one column from the top down.
    ///
    /// Open cells (air or billboards) above the first covering block receive
    /// [`MAX_LIGHT`]; open cells below it receive 0. Covering cells themselves
    /// are left untouched. Writes go straight to storage, so this also works on
    /// fresh chunks.
    ///
    /// The returned events let the caller spread light from brightened cells
    /// or pull lateral light into covered ones.
    pub fn scan_sunlight_column(&mut self, x: i32, z: i32) -> Vec<SunlightColumnEvent> {
        let mut events = Vec::new();
        if Self::index(x, 0, z).is_none() {
            return events;
        }

        let mut covered = false;
        for y in (0..CHUNK_DIMENSION_Y).rev() {
            let Some(i) = Self::index(x, y, z) else {
                continue;
            };
            let cell = &mut self.cells[i];

            if !Block::is_open(cell.block_type) {
                covered = true;
                continue;
            }

            let old_value = cell.sunlight;
            if covered {
                cell.sunlight = 0;
                events.push(SunlightColumnEvent::Covered(y));
            } else {
                cell.sunlight = MAX_LIGHT;
                if old_value < MAX_LIGHT {
                    events.push(SunlightColumnEvent::Brightened(y));
                }
            }

            if old_value != cell.sunlight && !self.fresh {
                self.dirty = true;
            }
        }
        events
    }

    /// Seeds direct top-down sunlight for every column. Only runs while fresh.
    fn seed_sunlight(&mut self) {
        if !self.fresh {
            return;
        }
        for x in 0..CHUNK_DIMENSION_X {
            for z in 0..CHUNK_DIMENSION_Z {
                self.scan_sunlight_column(x, z);
            }
        }
    }

    /// Loads the chunk from disk, or runs the generators and seeds sunlight.
    ///
    /// Does nothing on chunks that are not fresh. Returns true if the chunk was
    /// loaded or generated by this call.
    pub fn generate(&mut self, save_path: &std::path::Path) -> bool {
        if !self.fresh {
            return false;
        }

        let start = Instant::now();

        match self.load_chunk_from_file(save_path) {
            ChunkLoadOutcome::Loaded => {
                self.fresh = false;
                trace!(
                    "{} loaded from disk ({:.3}s).",
                    self,
                    start.elapsed().as_secs_f64()
                );
                return true;
            }
            ChunkLoadOutcome::NotFound => {}
            ChunkLoadOutcome::Failed => {
                warn!("{} could not be loaded, generating it instead.", self);
            }
        }

        let generators = self.generators.clone();
        for generator in &generators {
            generator.populate(self);
        }

        self.seed_sunlight();
        self.fresh = false;

        trace!(
            "{} generated ({:.3}s).",
            self,
            start.elapsed().as_secs_f64()
        );
        true
    }

    /// Read-only view of the raw cells, in storage order.
    pub fn cells(&self) -> &[ChunkCell] {
        &self.cells
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Chunk ({}) at ({}, {}, {})",
            self.id, self.position.x, self.position.y, self.position.z
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voxels::block::block_type::BlockType;

    fn generated_chunk() -> Chunk {
        let mut chunk = Chunk::new(Point3::new(0, 0, 0), Vec::new());
        chunk.fresh = false;
        chunk.dirty = false;
        chunk
    }

    #[test]
    fn out_of_bounds_reads_return_sentinels() {
        let chunk = generated_chunk();
        let outside = [
            (-1, 0, 0),
            (CHUNK_DIMENSION_X, 0, 0),
            (0, -1, 0),
            (0, CHUNK_DIMENSION_Y, 0),
            (0, 0, -1),
            (0, 0, CHUNK_DIMENSION_Z),
        ];
        for (x, y, z) in outside {
            assert_eq!(chunk.get_block(x, y, z), NO_BLOCK);
            assert_eq!(chunk.get_light(x, y, z, LightKind::Sun), MAX_LIGHT);
            assert_eq!(chunk.get_light(x, y, z, LightKind::Block), MAX_LIGHT);
        }
    }

    #[test]
    fn out_of_bounds_writes_are_ignored() {
        let mut chunk = generated_chunk();
        assert!(!chunk.set_block(-1, 0, 0, BlockType::STONE.code()));
        assert!(!chunk.set_light(0, CHUNK_DIMENSION_Y, 0, 3, LightKind::Sun));
        assert!(!chunk.is_dirty());
    }

    #[test]
    fn set_block_marks_dirty_only_on_change() {
        let mut chunk = generated_chunk();
        assert!(!chunk.set_block(1, 1, 1, BlockType::AIR.code()));
        assert!(!chunk.is_dirty());

        assert!(chunk.set_block(1, 1, 1, BlockType::DIRT.code()));
        assert!(chunk.is_dirty());
        assert_eq!(chunk.get_block(1, 1, 1), BlockType::DIRT.code());
    }

    #[test]
    fn opaque_block_removes_sunlight_but_not_block_light() {
        let mut chunk = generated_chunk();
        chunk.set_light(2, 2, 2, 12, LightKind::Sun);
        chunk.set_light(2, 2, 2, 9, LightKind::Block);

        chunk.set_block(2, 2, 2, BlockType::STONE.code());

        assert_eq!(chunk.get_light(2, 2, 2, LightKind::Sun), 0);
        assert_eq!(chunk.get_light(2, 2, 2, LightKind::Block), 9);
    }

    #[test]
    fn opaque_cells_refuse_light() {
        let mut chunk = generated_chunk();
        chunk.set_block(4, 4, 4, BlockType::STONE.code());
        chunk.set_light(4, 4, 4, 10, LightKind::Sun);
        chunk.set_light(4, 4, 4, 10, LightKind::Block);
        assert_eq!(chunk.get_light(4, 4, 4, LightKind::Sun), 0);
        assert_eq!(chunk.get_light(4, 4, 4, LightKind::Block), 0);
    }

    #[test]
    fn fresh_chunks_ignore_light_writes() {
        let mut chunk = Chunk::new(Point3::new(0, 0, 0), Vec::new());
        chunk.set_dirty(false);

        assert!(!chunk.set_light(0, 0, 0, 7, LightKind::Sun));
        assert!(!chunk.set_light(0, 0, 0, 7, LightKind::Block));

        assert_eq!(chunk.get_light(0, 0, 0, LightKind::Sun), 0);
        assert_eq!(chunk.get_light(0, 0, 0, LightKind::Block), 0);
        assert!(!chunk.is_dirty());
    }

    #[test]
    fn dirty_stays_set_until_cleared() {
        let mut chunk = generated_chunk();
        chunk.set_light(5, 5, 5, 4, LightKind::Block);
        assert!(chunk.is_dirty());

        // an unchanged write does not reset it
        chunk.set_light(5, 5, 5, 4, LightKind::Block);
        assert!(chunk.is_dirty());

        chunk.set_dirty(false);
        assert!(!chunk.is_dirty());
    }

    #[test]
    fn face_neighbors_cover_edges_only() {
        let chunk = Chunk::new(Point3::new(2, 0, 2), Vec::new());
        assert!(chunk.face_neighbors(5, 5).is_empty());
        assert_eq!(chunk.face_neighbors(0, 5), vec![Point3::new(1, 0, 2)]);
        assert_eq!(
            chunk.face_neighbors(CHUNK_DIMENSION_X - 1, CHUNK_DIMENSION_Z - 1),
            vec![Point3::new(3, 0, 2), Point3::new(2, 0, 3)]
        );
    }

    #[test]
    fn world_positions_are_offset_by_grid() {
        let chunk = Chunk::new(Point3::new(-1, 5, 3), Vec::new());
        assert_eq!(chunk.position(), Point3::new(-1, 0, 3));
        assert_eq!(chunk.block_world_pos(1, 2, 3), Point3::new(-15, 2, 51));
    }

    #[test]
    fn sky_visibility_follows_translucency() {
        let mut chunk = generated_chunk();
        assert!(chunk.can_block_see_the_sky(3, 0, 3));
        chunk.set_block(3, 50, 3, BlockType::GLASS.code());
        assert!(chunk.can_block_see_the_sky(3, 0, 3));
        chunk.set_block(3, 60, 3, BlockType::DIRT.code());
        assert!(!chunk.can_block_see_the_sky(3, 0, 3));
        assert!(chunk.can_block_see_the_sky(3, 61, 3));
    }

    #[test]
    fn seeding_lights_an_open_column() {
        let mut chunk = Chunk::new(Point3::new(0, 0, 0), Vec::new());
        chunk.seed_sunlight();
        for y in 0..CHUNK_DIMENSION_Y {
            assert_eq!(chunk.get_light(3, y, 5, LightKind::Sun), MAX_LIGHT);
        }
    }

    #[test]
    fn seeding_stops_at_the_first_cover() {
        let mut chunk = Chunk::new(Point3::new(0, 0, 0), Vec::new());
        chunk.set_block(3, 10, 5, BlockType::STONE.code());
        chunk.seed_sunlight();

        for y in 11..CHUNK_DIMENSION_Y {
            assert_eq!(chunk.get_light(3, y, 5, LightKind::Sun), MAX_LIGHT);
        }
        for y in 0..=10 {
            assert_eq!(chunk.get_light(3, y, 5, LightKind::Sun), 0);
        }
    }

    #[test]
    fn billboards_do_not_cover_but_leaves_do() {
        let mut chunk = Chunk::new(Point3::new(0, 0, 0), Vec::new());
        chunk.set_block(1, 40, 1, BlockType::TALL_GRASS.code());
        chunk.set_block(2, 40, 2, BlockType::LEAVES.code());
        chunk.seed_sunlight();

        assert_eq!(chunk.get_light(1, 40, 1, LightKind::Sun), MAX_LIGHT);
        assert_eq!(chunk.get_light(1, 39, 1, LightKind::Sun), MAX_LIGHT);
        // translucent cover keeps whatever it had and darkens the column below
        assert_eq!(chunk.get_light(2, 40, 2, LightKind::Sun), 0);
        assert_eq!(chunk.get_light(2, 39, 2, LightKind::Sun), 0);
    }

    #[test]
    fn column_scan_reports_changes() {
        let mut chunk = generated_chunk();
        let events = chunk.scan_sunlight_column(0, 0);
        assert_eq!(events.len(), CHUNK_DIMENSION_Y as usize);
        assert!(chunk.is_dirty());

        chunk.set_dirty(false);
        assert!(chunk.scan_sunlight_column(0, 0).is_empty());
        assert!(!chunk.is_dirty());

        chunk.set_block(0, 100, 0, BlockType::DIRT.code());
        let events = chunk.scan_sunlight_column(0, 0);
        assert_eq!(events.len(), 100);
        assert!(events.iter().all(|e| matches!(e, SunlightColumnEvent::Covered(y) if *y < 100)));
    }

    #[test]
    fn display_names_id_and_position() {
        let chunk = Chunk::new(Point3::new(0, 0, 0), Vec::new());
        assert_eq!(chunk.to_string(), "Chunk (0) at (0, 0, 0)");
    }
}
