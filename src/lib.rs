//! # Voxel Chunk Store
//!
//! Persistent, mutable voxel content for a block world: block identities, sun
//! and block light, dirty tracking for derived meshes, pluggable procedural
//! generation and a fixed binary save format.
//!
//! ## Key Modules
//!
//! * `config` - World configuration loaded from JSON
//! * `core` - Shared, lock-protected resource handles
//! * `error` - Error type for persistence and configuration
//! * `voxels` - Blocks, chunks, lighting, generation and the world accessor
//!
//! ## Usage
//!
//! ```no_run
//! use voxel_chunk_store::{config::WorldConfig, voxels::world::World};
//!
//! let world = World::new(WorldConfig::default());
//! world.generate_chunk(0, 0);
//! world.update_light(0, 0);
//! world.save_all();
//! ```

use std::path::Path;

use cgmath::Point3;
use log::{error, info};

use config::WorldConfig;
use voxels::{
    meshing::{ChunkStatistics, FaceCountingMeshBuilder},
    world::World,
};

pub mod config;
pub mod core;
pub mod error;
pub mod voxels;

pub const WORLD_GENERATION_STOPWATCH: &str = "World Generation";

/// Runs the headless demo.
///
/// Loads the configuration from the file named by the first argument (or uses
/// the defaults), generates every chunk within the view distance of the
/// origin, lights them, builds their meshes and saves them.
pub fn run() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let config = match std::env::args().nth(1) {
        Some(path) => match WorldConfig::from_json_file(Path::new(&path)) {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to read configuration {}: {}", path, e);
                return;
            }
        },
        None => WorldConfig::default(),
    };

    let view_distance = config.view_distance.max(0);
    let world = World::new(config);
    world.set_player_position(Some(Point3::new(8.0, 64.0, 8.0)));

    let start = web_time::Instant::now();
    for x in -view_distance..=view_distance {
        for z in -view_distance..=view_distance {
            world.generate_chunk(x, z);
        }
    }
    info!("{}: {:?}", WORLD_GENERATION_STOPWATCH, start.elapsed());

    let lit = world.update_dirty_light();
    info!("Lit {} chunks.", lit);

    let statistics = ChunkStatistics::new();
    let mut builder = FaceCountingMeshBuilder::default();
    for chunk in world.chunks_by_priority() {
        let position = chunk.get().position();
        world.generate_mesh(position.x, position.z, &mut builder, &statistics);
    }
    info!(
        "Built {} meshes with {} visible faces.",
        statistics.mesh_update_count(),
        builder.total_faces()
    );

    world.save_all();
}
