//! # World Module
//!
//! This module provides the `World` struct, the facade a host drives the
//! terrain through. It ties the voxel field to the chunk manager so that edits
//! and materialized chunks never disagree.
//!
//! ## Architecture
//!
//! The world owns:
//!
//! * the [`VoxelField`] (generator plus edit overlay)
//! * the [`ChunkManager`] and, through it, the host's [`ChunkSink`]
//! * the path search settings
//!
//! Every cell write goes through [`World::write_cell`], which applies the edit
//! and rebuilds each materialized chunk whose geometry depends on the cell
//! before returning.
//!
//! ## Performance Considerations
//!
//! - Reads never touch the chunk tables; they are overlay lookups or noise samples
//! - A write rebuilds at most four chunks of each kind, and only those already materialized

use cgmath::Point3;
use log::info;

use crate::config::{EngineSettings, PathfindingSettings};
use crate::error::Result;
use crate::pathfinding::{self, SlopeWalker};

use super::cell::VoxelCell;
use super::chunk::{ChunkBuildSettings, ChunkManager, ChunkPrefabs, ChunkSink};
use super::coords::GridCoordinate;
use super::field::VoxelField;
use super::generator::TerrainGenerator;

/// A procedural, editable voxel world with materialized chunks.
///
/// # Examples
///
/// ```
/// use voxel_terrain::config::EngineSettings;
/// use voxel_terrain::voxels::chunk::{ChunkPrefabs, ChunkSink, PhysicalChunk, VisualChunk};
/// use voxel_terrain::voxels::world::World;
/// use cgmath::Point3;
///
/// struct Discard;
///
/// impl ChunkSink for Discard {
///     type Visual = ();
///     type Physical = ();
///     fn create_visual(&mut self, _: VisualChunk) {}
///     fn destroy_visual(&mut self, _: ()) {}
///     fn create_physical(&mut self, _: PhysicalChunk) {}
///     fn destroy_physical(&mut self, _: ()) {}
/// }
///
/// let mut world = World::new(EngineSettings::default(), ChunkPrefabs::default(), Discard).unwrap();
/// world.request_visual_range(Point3::new(0.0, 0.0, 0.0), Point3::new(15.0, 0.0, 15.0)).unwrap();
/// assert_eq!(world.chunks().visual_count(), 4);
/// ```
pub struct World<S: ChunkSink> {
    field: VoxelField,
    chunks: ChunkManager<S>,
    pathfinding: PathfindingSettings,
}

impl<S: ChunkSink> World<S> {
    /// Creates a world with no edits and no materialized chunks.
    ///
    /// # Arguments
    /// * `settings` - Settings of every component; validated before use
    /// * `prefabs` - Decoration and collision prefab tables
    /// * `sink` - Host factory receiving built chunks
    ///
    /// # Returns
    /// The world, or [`TerrainError::InvalidConfiguration`](crate::error::TerrainError::InvalidConfiguration)
    /// if the settings describe geometry the engine cannot build.
    pub fn new(settings: EngineSettings, prefabs: ChunkPrefabs, sink: S) -> Result<Self> {
        settings.validate()?;
        info!(
            "Creating world: seed {}, {} materials, chunk size {}",
            settings.world.seed, settings.world.materials_count, settings.chunk.chunk_size
        );

        let build = ChunkBuildSettings::new(&settings, prefabs);
        let generator = TerrainGenerator::new(settings.world);
        Ok(World {
            field: VoxelField::new(generator, settings.chunk.chunk_size),
            chunks: ChunkManager::new(build, sink),
            pathfinding: settings.pathfinding,
        })
    }

    /// The voxel field.
    pub fn field(&self) -> &VoxelField {
        &self.field
    }

    /// The chunk manager.
    pub fn chunks(&self) -> &ChunkManager<S> {
        &self.chunks
    }

    /// Mutable access to the chunk manager, e.g. to reach the sink.
    pub fn chunks_mut(&mut self) -> &mut ChunkManager<S> {
        &mut self.chunks
    }

    /// Reads the cell at `p`.
    pub fn read(&self, p: GridCoordinate) -> VoxelCell {
        self.field.read(p)
    }

    /// Writes a cell and rebuilds every materialized chunk that shows it.
    ///
    /// When this returns `Ok`, no materialized chunk reflects the old value.
    pub fn write_cell(&mut self, p: GridCoordinate, cell: VoxelCell) -> Result<()> {
        for position in self.field.write(p, cell) {
            self.chunks.invalidate_chunk(&self.field, position)?;
        }
        Ok(())
    }

    /// Materializes visual chunks covering `[min, max]`.
    pub fn request_visual_range(&mut self, min: Point3<f32>, max: Point3<f32>) -> Result<()> {
        self.chunks.request_visual_range(&self.field, min, max)
    }

    /// Destroys visual chunks covering `[min, max]`.
    pub fn release_visual_range(&mut self, min: Point3<f32>, max: Point3<f32>) {
        self.chunks.release_visual_range(min, max);
    }

    /// Materializes physical chunks covering `[min, max]`.
    pub fn request_physical_range(&mut self, min: Point3<f32>, max: Point3<f32>) {
        self.chunks.request_physical_range(&self.field, min, max);
    }

    /// Destroys physical chunks covering `[min, max]`.
    pub fn release_physical_range(&mut self, min: Point3<f32>, max: Point3<f32>) {
        self.chunks.release_physical_range(min, max);
    }

    /// Searches a walkable path over the current terrain, edits included.
    ///
    /// The search is confined to a box of `search_radius` around `from`.
    pub fn find_path(&self, from: GridCoordinate, to: GridCoordinate) -> Option<Vec<GridCoordinate>> {
        let walker = SlopeWalker::with_radius(&self.field, from, self.pathfinding.search_radius);
        pathfinding::find_path(&walker, from, to)
    }

    /// Destroys every materialized chunk. Safe to call repeatedly.
    pub fn shutdown(&mut self) {
        self.chunks.shutdown();
    }
}
