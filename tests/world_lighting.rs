use std::sync::Arc;

use cgmath::Point3;
use tempfile::TempDir;
use voxel_chunk_store::{
    config::WorldConfig,
    voxels::{
        block::block_type::BlockType,
        chunk::{Chunk, CHUNK_DIMENSION_Z},
        generation::{ChunkGenerator, FlatGenerator},
        lighting::{refresh_light_at_local_pos, LightKind, MAX_LIGHT},
        world::{World, WorldAccessor},
    },
};

fn world_with(dir: &TempDir, generators: Vec<Arc<dyn ChunkGenerator>>) -> World {
    let config = WorldConfig {
        save_path: dir.path().to_path_buf(),
        ..WorldConfig::default()
    };
    World::with_generators(config, generators)
}

/// Solid stone with a one-block air tunnel along x at y = 64, z = 8,
/// running from chunk (0, 0) into chunk (1, 0).
fn tunnel_world(dir: &TempDir) -> World {
    let world = world_with(
        dir,
        vec![Arc::new(FlatGenerator::new(128, BlockType::STONE.code()))],
    );
    world.generate_chunk(0, 0);
    world.generate_chunk(1, 0);
    for x in 2..=25 {
        world.set_block(Point3::new(x, 64, 8), BlockType::AIR.code(), false);
    }
    world
}

fn block_light(world: &World, x: i32) -> u8 {
    world.get_light(Point3::new(x, 64, 8), LightKind::Block)
}

/// A stone slab at y = 20 over the columns with local x < 8.
struct Overhang;

impl ChunkGenerator for Overhang {
    fn populate(&self, chunk: &mut Chunk) {
        for x in 0..8 {
            for z in 0..CHUNK_DIMENSION_Z {
                chunk.set_block(x, 20, z, BlockType::STONE.code());
            }
        }
    }
}

#[test]
fn spread_decays_by_one_per_hop_across_chunks() {
    let dir = tempfile::tempdir().unwrap();
    let world = tunnel_world(&dir);
    world.load_or_create_chunk(1, 0).get_mut().set_dirty(false);
    // markers just past the reach of the light
    world.set_light(Point3::new(6, 64, 8), 3, LightKind::Block);
    world.set_light(Point3::new(18, 64, 8), 3, LightKind::Block);

    let writes = world.spread_light(Point3::new(12, 64, 8), 6, 0, LightKind::Block);

    assert_eq!(writes, 11);
    for x in 7..=17 {
        let expected = 6 - (x - 12i32).abs();
        assert_eq!(block_light(&world, x) as i32, expected, "x = {x}");
    }
    // a cell at 1 never passes light on
    assert_eq!(block_light(&world, 6), 3);
    assert_eq!(block_light(&world, 18), 3);
    // crossed into the next chunk
    assert_eq!(block_light(&world, 16), 2);
    assert!(world.load_or_create_chunk(1, 0).get().is_dirty());
}

#[test]
fn spread_never_exceeds_its_intensity() {
    let dir = tempfile::tempdir().unwrap();
    let world = tunnel_world(&dir);
    world.spread_light(Point3::new(20, 64, 8), 9, 0, LightKind::Block);

    let brightest = (2..=25).map(|x| block_light(&world, x)).max();
    assert_eq!(brightest, Some(9));
    // stone around the tunnel stays dark
    assert_eq!(world.get_light(Point3::new(20, 65, 8), LightKind::Block), 0);
}

#[test]
fn spread_intensity_is_capped_at_max_light() {
    let dir = tempfile::tempdir().unwrap();
    let world = tunnel_world(&dir);

    let writes = world.spread_light(Point3::new(12, 64, 8), 40, 0, LightKind::Block);

    // the whole tunnel, each cell once
    assert_eq!(writes, 24);
    assert_eq!(block_light(&world, 12), MAX_LIGHT);
    assert_eq!(block_light(&world, 2), MAX_LIGHT - 10);
    assert_eq!(block_light(&world, 25), MAX_LIGHT - 13);
}

#[test]
fn spread_stops_at_brighter_cells() {
    let dir = tempfile::tempdir().unwrap();
    let world = tunnel_world(&dir);
    world.spread_light(Point3::new(10, 64, 8), 10, 0, LightKind::Block);
    world.spread_light(Point3::new(14, 64, 8), 3, 0, LightKind::Block);

    // the origin is overwritten, brighter neighbors stop the fill
    assert_eq!(block_light(&world, 14), 3);
    assert_eq!(block_light(&world, 13), 7);
    assert_eq!(block_light(&world, 15), 5);
}

#[test]
fn refresh_only_raises_light() {
    let dir = tempfile::tempdir().unwrap();
    let world = tunnel_world(&dir);
    let chunk = Point3::new(0, 0, 0);

    world.set_light(Point3::new(10, 64, 8), 9, LightKind::Block);
    refresh_light_at_local_pos(&world, chunk, 11, 64, 8, LightKind::Block);
    assert_eq!(block_light(&world, 11), 8);

    world.set_light(Point3::new(10, 64, 8), 0, LightKind::Block);
    refresh_light_at_local_pos(&world, chunk, 11, 64, 8, LightKind::Block);
    assert_eq!(block_light(&world, 11), 8);

    // opaque cells are refreshed to darkness
    refresh_light_at_local_pos(&world, chunk, 11, 65, 8, LightKind::Block);
    assert_eq!(world.get_light(Point3::new(11, 65, 8), LightKind::Block), 0);
}

#[test]
fn refresh_outside_the_chunk_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let world = world_with(&dir, Vec::new());
    for (x, z) in [(0, 0), (1, 0), (-1, 0)] {
        world.generate_chunk(x, z);
    }
    let chunk = Point3::new(0, 0, 0);

    refresh_light_at_local_pos(&world, chunk, 16, 50, 4, LightKind::Sun);
    refresh_light_at_local_pos(&world, chunk, -1, 50, 4, LightKind::Sun);
    refresh_light_at_local_pos(&world, chunk, 4, 128, 4, LightKind::Sun);

    // the cells those positions would alias in the neighbors keep their light
    assert_eq!(world.get_light(Point3::new(16, 50, 4), LightKind::Sun), MAX_LIGHT);
    assert_eq!(world.get_light(Point3::new(-1, 50, 4), LightKind::Sun), MAX_LIGHT);
}

#[test]
fn light_cannot_be_set_in_fresh_chunks() {
    let dir = tempfile::tempdir().unwrap();
    let world = world_with(&dir, Vec::new());
    let chunk = world.load_or_create_chunk(2, 2);
    chunk.get_mut().set_dirty(false);

    world.set_light(Point3::new(40, 30, 40), 4, LightKind::Sun);

    // neighbors see open sky instead of the untrusted zero
    assert_eq!(world.get_light(Point3::new(40, 30, 40), LightKind::Sun), MAX_LIGHT);

    let chunk = chunk.get();
    assert!(chunk.is_fresh());
    assert!(!chunk.is_dirty());
    assert_eq!(chunk.get_light(8, 30, 8, LightKind::Sun), 0);
}

#[test]
fn opening_a_block_lets_sunlight_in() {
    let dir = tempfile::tempdir().unwrap();
    let world = world_with(
        &dir,
        vec![Arc::new(FlatGenerator::new(20, BlockType::STONE.code()))],
    );
    for (x, z) in [(0, 0), (1, 0), (-1, 0), (0, 1), (0, -1)] {
        world.generate_chunk(x, z);
    }
    let hole = Point3::new(8, 19, 8);
    assert_eq!(world.get_light(hole, LightKind::Sun), 0);

    world.set_block(hole, BlockType::AIR.code(), true);
    assert_eq!(world.get_light(hole, LightKind::Sun), MAX_LIGHT);

    world.set_block(hole, BlockType::STONE.code(), true);
    assert_eq!(world.get_light(hole, LightKind::Sun), 0);
    assert_eq!(world.get_light(Point3::new(8, 20, 8), LightKind::Sun), MAX_LIGHT);
}

#[test]
fn placing_a_roof_pulls_in_light_from_the_side() {
    let dir = tempfile::tempdir().unwrap();
    let world = world_with(&dir, Vec::new());
    world.generate_chunk(0, 0);

    world.set_block(Point3::new(8, 30, 8), BlockType::STONE.code(), true);

    assert_eq!(world.get_light(Point3::new(8, 30, 8), LightKind::Sun), 0);
    assert_eq!(world.get_light(Point3::new(8, 31, 8), LightKind::Sun), MAX_LIGHT);
    assert_eq!(world.get_light(Point3::new(8, 29, 8), LightKind::Sun), MAX_LIGHT - 1);
    assert_eq!(world.get_light(Point3::new(8, 0, 8), LightKind::Sun), MAX_LIGHT - 1);
}

#[test]
fn update_light_spreads_sunlight_under_overhangs() {
    let dir = tempfile::tempdir().unwrap();
    let world = world_with(&dir, vec![Arc::new(Overhang)]);
    world.generate_chunk(0, 0);

    let edge = Point3::new(7, 10, 8);
    let deep = Point3::new(4, 10, 8);
    assert_eq!(world.get_light(edge, LightKind::Sun), 0);
    assert_eq!(world.get_light(deep, LightKind::Sun), 0);

    world.update_light(0, 0);

    assert_eq!(world.get_light(edge, LightKind::Sun), MAX_LIGHT - 1);
    assert!(world.get_light(deep, LightKind::Sun) > 0);
    assert!(world.get_light(deep, LightKind::Sun) <= MAX_LIGHT - 4);
    // the slab itself stays dark
    assert_eq!(world.get_light(Point3::new(4, 20, 8), LightKind::Sun), 0);
    assert!(!world.load_or_create_chunk(0, 0).get().is_light_dirty());
}

#[test]
fn opaque_placement_keeps_block_light() {
    let dir = tempfile::tempdir().unwrap();
    let world = tunnel_world(&dir);
    let cell = Point3::new(12, 64, 8);
    world.set_light(cell, 7, LightKind::Block);

    world.set_block(cell, BlockType::STONE.code(), false);

    assert_eq!(world.get_light(cell, LightKind::Sun), 0);
    assert_eq!(world.get_light(cell, LightKind::Block), 7);
}

#[test]
fn update_light_clears_the_light_flag() {
    let dir = tempfile::tempdir().unwrap();
    let world = world_with(
        &dir,
        vec![Arc::new(FlatGenerator::new(10, BlockType::DIRT.code()))],
    );
    world.generate_chunk(0, 0);
    world.generate_chunk(1, 1);
    assert!(world.load_or_create_chunk(0, 0).get().is_light_dirty());

    assert_eq!(world.update_dirty_light(), 2);
    assert!(!world.load_or_create_chunk(0, 0).get().is_light_dirty());
    assert!(!world.load_or_create_chunk(1, 1).get().is_light_dirty());
    assert_eq!(world.update_dirty_light(), 0);
}
