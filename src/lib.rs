#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Terrain
//!
//! A procedural, editable voxel terrain core with bevelled meshing and
//! slope-aware pathfinding.
//!
//! This crate provides the data and geometry side of a voxel game world: an
//! infinite seeded terrain, an overlay of edits on top of it, chunked
//! materialization into meshes and colliders, and a path search that walks
//! the terrain's ramps.
//!
//! ## Key Modules
//!
//! * `voxels` - Cells, corner masks, the generator, the editable field, chunk
//!   management and the [`World`] facade
//! * `meshing` - Bevelled surface synthesis and decoration placement
//! * `pathfinding` - Step rules and A* search
//! * `config` - Serializable settings for every component
//! * `error` - The crate error type
//!
//! ## Architecture
//!
//! Data flows one way: generator, then field, then either the pathfinder or
//! the chunk manager (which drives the mesh synthesizer). Edits flow back into
//! the field and rebuild only the chunks that show the edited cell.
//!
//! Rendering and physics stay with the host. Built chunks are handed to a
//! [`voxels::chunk::ChunkSink`], and physics queries are consumed through
//! [`voxels::spatial::SpatialQuery`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! fn main() {
//!     voxel_terrain::run();
//! }
//! ```
//!
//! ## Performance Considerations
//!
//! * The generated layer is never stored; cells are computed on demand
//! * Edits are a sparse overlay, so memory grows only with what was changed
//! * Chunks are rebuilt in full, and only on request or invalidation

use cgmath::Point3;
use log::{error, info};

pub mod config;
pub mod error;
pub mod meshing;
pub mod pathfinding;
pub mod voxels;

pub use config::EngineSettings;
pub use error::{Result, TerrainError};
pub use voxels::world::World;

use voxels::cell::VoxelCell;
use voxels::chunk::{ChunkPrefabs, ChunkSink, PhysicalChunk, VisualChunk};
use voxels::coords::{ChunkPosition, GridCoordinate};
use voxels::spatial::cell_with_floor_near;

/// Sink that only reports what it is asked to build.
struct LoggingSink;

impl ChunkSink for LoggingSink {
    type Visual = ChunkPosition;
    type Physical = ChunkPosition;

    fn create_visual(&mut self, chunk: VisualChunk) -> ChunkPosition {
        info!(
            "Visual chunk {:?}: {} vertices, {} decorations",
            chunk.position,
            chunk.mesh.vertices.len(),
            chunk.decorations.len()
        );
        chunk.position
    }

    fn destroy_visual(&mut self, handle: ChunkPosition) {
        info!("Visual chunk {:?} destroyed", handle);
    }

    fn create_physical(&mut self, chunk: PhysicalChunk) -> ChunkPosition {
        info!(
            "Physical chunk {:?}: {} colliders",
            chunk.position,
            chunk.colliders.len()
        );
        chunk.position
    }

    fn destroy_physical(&mut self, handle: ChunkPosition) {
        info!("Physical chunk {:?} destroyed", handle);
    }
}

/// Runs a short demonstration against the default world.
///
/// Materializes the chunks around the origin, places a block, and searches a
/// path across the area, logging each step. Set `RUST_LOG=debug` to also see
/// chunk lifecycle and timing output.
pub fn run() {
    env_logger::Builder::new()
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();
    info!("Logger initialized");

    if let Err(e) = demonstrate() {
        error!("Demonstration failed: {}", e);
    }
}

fn demonstrate() -> Result<()> {
    let settings = EngineSettings::default();
    let mut world = World::new(settings, ChunkPrefabs::default(), LoggingSink)?;

    let (min, max) = (Point3::new(-8.0, 0.0, -8.0), Point3::new(15.0, 0.0, 15.0));
    world.request_visual_range(min, max)?;
    world.request_physical_range(min, max);

    world.write_cell(GridCoordinate::new(2, 1, 2), VoxelCell::solid(1))?;
    info!("Placed a block; {} edits in the overlay", world.field().edit_count());

    let start = cell_with_floor_near(world.field(), GridCoordinate::new(-4, 0, -4), 4);
    let goal = cell_with_floor_near(world.field(), GridCoordinate::new(6, 0, 6), 4);
    match (start, goal) {
        (Some(start), Some(goal)) => match world.find_path(start, goal) {
            Some(path) => info!("Path {:?} -> {:?}: {} cells", start, goal, path.len()),
            None => info!("No path {:?} -> {:?}", start, goal),
        },
        _ => info!("No standable cells found for the path search"),
    }

    world.shutdown();
    Ok(())
}
