use cgmath::Point3;

use super::{propagation::refresh_light_at_local_pos, LightKind, MAX_LIGHT};
use crate::voxels::chunk::SunlightColumnEvent;
use crate::voxels::world::WorldAccessor;

/// Rescans the sunlight of one column of a chunk after its blocks changed.
///
/// Cells exposed to the sky get full sunlight and cells below the first covering
/// block get none, exactly as when the chunk was seeded. Then:
/// - with `spread`, light is flood-filled from every cell that got brighter;
/// - with `refresh`, every covered cell pulls in light from its neighbors
///   instead of staying fully dark.
pub fn refresh_sunlight_at_local_pos<W: WorldAccessor + ?Sized>(
    world: &W,
    chunk_position: Point3<i32>,
    x: i32,
    z: i32,
    spread: bool,
    refresh: bool,
) {
    if x < 0 || z < 0 {
        return;
    }

    let chunk = world.load_or_create_chunk(chunk_position.x, chunk_position.z);
    let (events, origin) = {
        let mut chunk = chunk.get_mut();
        (chunk.scan_sunlight_column(x, z), chunk.world_origin())
    };

    for event in events {
        match event {
            SunlightColumnEvent::Brightened(y) if spread => {
                let position = Point3::new(origin.x + x, origin.y + y, origin.z + z);
                world.spread_light(position, MAX_LIGHT, 0, LightKind::Sun);
            }
            SunlightColumnEvent::Covered(y) if refresh => {
                refresh_light_at_local_pos(world, chunk_position, x, y, z, LightKind::Sun);
            }
            _ => {}
        }
    }
}
