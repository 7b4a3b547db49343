use cgmath::Point3;
use log::trace;

use super::{LightKind, MAX_LIGHT};
use crate::voxels::block::{block_side::BlockSide, Block};
use crate::voxels::chunk::{
    chunk_iteration::LocalPositionIterator, CHUNK_DIMENSION_X, CHUNK_DIMENSION_Y,
    CHUNK_DIMENSION_Z,
};
use crate::voxels::world::WorldAccessor;

/// Flood-fills light outward from `origin` (world coordinates).
///
/// The cell reached after `depth` hops receives `intensity - depth`,
/// unconditionally. A neighbor is only visited if it is translucent and its
/// current light is strictly below the value it would receive, so cells that
/// already dominate the incoming light stop the fill. Nothing is visited past
/// `depth == intensity`. Intensities above [`MAX_LIGHT`] are clamped.
///
/// Uses an explicit worklist processed depth-first, so the call stack stays flat
/// however far the light travels across chunk boundaries.
///
/// Returns the number of cells written.
pub fn spread_light<W: WorldAccessor + ?Sized>(
    world: &W,
    origin: Point3<i32>,
    intensity: u8,
    depth: u8,
    kind: LightKind,
) -> usize {
    let intensity = intensity.min(MAX_LIGHT);
    let mut worklist = vec![(origin, depth)];
    let mut writes = 0;

    while let Some((position, depth)) = worklist.pop() {
        if depth > intensity {
            continue;
        }

        let new_value = intensity - depth;

        // neighbor state is sampled before this cell is written
        let neighbors = BlockSide::neighbors(position)
            .map(|n| (n, world.get_light(n, kind), world.get_block(n)));

        world.set_light(position, new_value, kind);
        writes += 1;

        if intensity == 0 {
            continue;
        }

        // reversed so the first side is processed first
        for (neighbor, light, block) in neighbors.into_iter().rev() {
            if (light as i32) < new_value as i32 - 1 && Block::is_translucent(block) {
                worklist.push((neighbor, depth + 1));
            }
        }
    }

    writes
}

/// Recomputes the light of a single cell from its six neighbors.
///
/// Opaque cells are set to 0. Translucent cells take the brightest neighbor
/// minus one, but never get darker than they already are. Positions outside
/// the chunk are ignored.
pub fn refresh_light_at_local_pos<W: WorldAccessor + ?Sized>(
    world: &W,
    chunk_position: Point3<i32>,
    x: i32,
    y: i32,
    z: i32,
    kind: LightKind,
) {
    if !(0..CHUNK_DIMENSION_X).contains(&x)
        || !(0..CHUNK_DIMENSION_Y).contains(&y)
        || !(0..CHUNK_DIMENSION_Z).contains(&z)
    {
        return;
    }

    let chunk = world.load_or_create_chunk(chunk_position.x, chunk_position.z);
    let (block, position) = {
        let chunk = chunk.get();
        (chunk.get_block(x, y, z), chunk.block_world_pos(x, y, z))
    };

    if Block::properties(block).is_opaque() {
        world.set_light(position, 0, kind);
        return;
    }

    let current = world.get_light(position, kind);
    let brightest = BlockSide::neighbors(position)
        .into_iter()
        .map(|n| world.get_light(n, kind))
        .max()
        .unwrap_or(0);

    world.set_light(position, brightest.saturating_sub(1).max(current), kind);
}

/// Re-propagates sunlight from every lit translucent cell of a chunk and clears
/// its `light_dirty` flag. Does nothing on fresh chunks.
pub fn update_light<W: WorldAccessor + ?Sized>(world: &W, chunk_position: Point3<i32>) {
    let chunk = world.load_or_create_chunk(chunk_position.x, chunk_position.z);
    if chunk.get().is_fresh() {
        return;
    }

    let mut writes = 0;
    for local in LocalPositionIterator::new() {
        let (sunlight, block, position) = {
            let chunk = chunk.get();
            (
                chunk.get_light(local.x, local.y, local.z, LightKind::Sun),
                chunk.get_block(local.x, local.y, local.z),
                chunk.block_world_pos(local.x, local.y, local.z),
            )
        };

        if sunlight > 0 && Block::is_translucent(block) {
            writes += world.spread_light(position, sunlight, 0, LightKind::Sun);
        }
    }

    let mut chunk = chunk.get_mut();
    chunk.set_light_dirty(false);
    trace!("Updated light of {} ({} writes).", chunk, writes);
}
