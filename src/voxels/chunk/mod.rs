//! # Chunk Module
//!
//! Materialization of the voxel field into renderable and collidable chunks.
//!
//! ## Architecture
//!
//! A chunk is a `chunk_size x chunk_size` column keyed by its min-corner x/z.
//! Two independent kinds of chunk can exist per position:
//!
//! * **Visual**: a bevelled mesh plus decoration placements ([`VisualChunk`])
//! * **Physical**: collider placements only ([`PhysicalChunk`])
//!
//! The [`ChunkManager`] keeps one table per kind and hands built chunks to a
//! [`ChunkSink`], the host-side factory that turns them into scene objects and
//! returns a handle. Handles are destroyed through the same sink.
//!
//! ## Lifecycle
//!
//! Each position and kind is either absent or materialized. Range requests
//! create what is missing and leave existing chunks alone; releases destroy
//! what is present. Invalidation destroys a materialized chunk and rebuilds it
//! immediately, in that order, so a position never holds two instances.
//!
//! ## Performance Considerations
//!
//! * Table lookups are O(1) hash map accesses keyed by [`ChunkPosition`]
//! * Building a visual chunk is the expensive step; it only happens for
//!   positions that are absent, or on explicit invalidation

use std::collections::HashMap;

use cgmath::Point3;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::config::{ChunkSettings, EngineSettings, MeshSettings};
use crate::error::Result;
use crate::meshing::decoration::{DecorationPrefabs, PrefabId};

use super::coords::{ChunkPosition, GridCoordinate};
use super::field::TerrainSource;

pub mod physical;
pub mod visual;

pub use physical::{Collider, PhysicalChunk};
pub use visual::VisualChunk;

#[cfg(test)]
mod tests;

/// Host-side factory for chunk scene objects.
///
/// The manager calls `create_*` with a fully built chunk (which carries its
/// min corner and size) and stores the returned handle until it calls the
/// matching `destroy_*`.
pub trait ChunkSink {
    /// Handle of a visual scene object.
    type Visual;
    /// Handle of a physical scene object.
    type Physical;

    /// Instantiates a renderable object for a built chunk.
    fn create_visual(&mut self, chunk: VisualChunk) -> Self::Visual;
    /// Removes a renderable object.
    fn destroy_visual(&mut self, handle: Self::Visual);
    /// Instantiates a collidable object for a built chunk.
    fn create_physical(&mut self, chunk: PhysicalChunk) -> Self::Physical;
    /// Removes a collidable object.
    fn destroy_physical(&mut self, handle: Self::Physical);
}

/// Prefab tables used while building chunks.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkPrefabs {
    /// Slope, resource and object decorations of visual chunks.
    pub decorations: DecorationPrefabs,
    /// Collision prefabs of physical chunks, indexed by corner mask bits.
    pub collision: Vec<Option<PrefabId>>,
}

/// Everything needed to build a chunk of either kind.
#[derive(Clone, Debug)]
pub struct ChunkBuildSettings {
    /// Footprint and vertical extents.
    pub chunk: ChunkSettings,
    /// Bevel and buffer bounds.
    pub mesh: MeshSettings,
    /// Number of materials meshed per visual chunk.
    pub materials_count: u32,
    /// Prefab lookup tables.
    pub prefabs: ChunkPrefabs,
}

impl ChunkBuildSettings {
    /// Collects the chunk-related parts of the engine settings.
    pub fn new(settings: &EngineSettings, prefabs: ChunkPrefabs) -> Self {
        ChunkBuildSettings {
            chunk: settings.chunk.clone(),
            mesh: settings.mesh.clone(),
            materials_count: settings.world.materials_count,
            prefabs,
        }
    }
}

/// Tracks materialized chunks and drives their creation and destruction.
pub struct ChunkManager<S: ChunkSink> {
    settings: ChunkBuildSettings,
    sink: S,
    visual: HashMap<ChunkPosition, S::Visual>,
    physical: HashMap<ChunkPosition, S::Physical>,
}

impl<S: ChunkSink> ChunkManager<S> {
    /// Creates a manager with no materialized chunks.
    pub fn new(settings: ChunkBuildSettings, sink: S) -> Self {
        ChunkManager {
            settings,
            sink,
            visual: HashMap::new(),
            physical: HashMap::new(),
        }
    }

    /// The settings chunks are built with.
    pub fn settings(&self) -> &ChunkBuildSettings {
        &self.settings
    }

    /// The sink receiving chunk objects.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    fn chunk_size(&self) -> i32 {
        self.settings.chunk.chunk_size
    }

    /// Materializes a visual chunk for every position covering `[min, max]`
    /// that does not have one yet.
    ///
    /// # Arguments
    /// * `source` - The terrain to mesh
    /// * `min` - One corner of the range; only x/z are used
    /// * `max` - The opposite corner, inclusive
    ///
    /// # Returns
    /// `Ok` once every covered position is materialized; a mesh capacity error
    /// aborts the request, leaving the chunks created so far in place.
    pub fn request_visual_range<T: TerrainSource>(
        &mut self,
        source: &T,
        min: Point3<f32>,
        max: Point3<f32>,
    ) -> Result<()> {
        trace!("Visual range requested: {:?} to {:?}", min, max);
        for position in ChunkPosition::covering(min, max, self.chunk_size()) {
            if !self.visual.contains_key(&position) {
                self.create_visual(source, position)?;
            }
        }
        Ok(())
    }

    /// Destroys every visual chunk covering `[min, max]`.
    pub fn release_visual_range(&mut self, min: Point3<f32>, max: Point3<f32>) {
        trace!("Visual range released: {:?} to {:?}", min, max);
        for position in ChunkPosition::covering(min, max, self.chunk_size()) {
            if let Some(handle) = self.visual.remove(&position) {
                debug!("Destroying visual chunk {:?}", position);
                self.sink.destroy_visual(handle);
            }
        }
    }

    /// Materializes a physical chunk for every position covering `[min, max]`
    /// that does not have one yet.
    pub fn request_physical_range<T: TerrainSource>(
        &mut self,
        source: &T,
        min: Point3<f32>,
        max: Point3<f32>,
    ) {
        trace!("Physical range requested: {:?} to {:?}", min, max);
        for position in ChunkPosition::covering(min, max, self.chunk_size()) {
            if !self.physical.contains_key(&position) {
                self.create_physical(source, position);
            }
        }
    }

    /// Destroys every physical chunk covering `[min, max]`.
    pub fn release_physical_range(&mut self, min: Point3<f32>, max: Point3<f32>) {
        trace!("Physical range released: {:?} to {:?}", min, max);
        for position in ChunkPosition::covering(min, max, self.chunk_size()) {
            if let Some(handle) = self.physical.remove(&position) {
                debug!("Destroying physical chunk {:?}", position);
                self.sink.destroy_physical(handle);
            }
        }
    }

    /// Rebuilds the chunks of both kinds that contain the cell `p`.
    pub fn invalidate<T: TerrainSource>(&mut self, source: &T, p: GridCoordinate) -> Result<()> {
        self.invalidate_chunk(source, ChunkPosition::containing(p, self.chunk_size()))
    }

    /// Rebuilds the chunks of both kinds at `position`.
    ///
    /// Only materialized chunks are rebuilt; each is destroyed before its
    /// replacement is created. Absent positions stay absent.
    pub fn invalidate_chunk<T: TerrainSource>(
        &mut self,
        source: &T,
        position: ChunkPosition,
    ) -> Result<()> {
        if let Some(handle) = self.physical.remove(&position) {
            debug!("Invalidating physical chunk {:?}", position);
            self.sink.destroy_physical(handle);
            self.create_physical(source, position);
        }
        if let Some(handle) = self.visual.remove(&position) {
            debug!("Invalidating visual chunk {:?}", position);
            self.sink.destroy_visual(handle);
            self.create_visual(source, position)?;
        }
        Ok(())
    }

    /// Destroys every materialized chunk of both kinds.
    ///
    /// Safe to call repeatedly; later calls find nothing to destroy.
    pub fn shutdown(&mut self) {
        if self.visual.is_empty() && self.physical.is_empty() {
            return;
        }
        debug!(
            "Shutting down {} visual and {} physical chunks",
            self.visual.len(),
            self.physical.len()
        );
        for (_, handle) in self.visual.drain() {
            self.sink.destroy_visual(handle);
        }
        for (_, handle) in self.physical.drain() {
            self.sink.destroy_physical(handle);
        }
    }

    /// Whether a visual chunk is materialized at `position`.
    pub fn has_visual(&self, position: ChunkPosition) -> bool {
        self.visual.contains_key(&position)
    }

    /// Whether a physical chunk is materialized at `position`.
    pub fn has_physical(&self, position: ChunkPosition) -> bool {
        self.physical.contains_key(&position)
    }

    /// Number of materialized visual chunks.
    pub fn visual_count(&self) -> usize {
        self.visual.len()
    }

    /// Number of materialized physical chunks.
    pub fn physical_count(&self) -> usize {
        self.physical.len()
    }

    fn create_visual<T: TerrainSource>(&mut self, source: &T, position: ChunkPosition) -> Result<()> {
        let chunk = VisualChunk::build(source, position, &self.settings)?;
        debug!(
            "Creating visual chunk {:?}: {} triangles, {} decorations",
            position,
            chunk.mesh.triangle_count(),
            chunk.decorations.len()
        );
        let handle = self.sink.create_visual(chunk);
        self.visual.insert(position, handle);
        Ok(())
    }

    fn create_physical<T: TerrainSource>(&mut self, source: &T, position: ChunkPosition) {
        let chunk = PhysicalChunk::build(source, position, &self.settings);
        debug!(
            "Creating physical chunk {:?}: {} colliders",
            position,
            chunk.colliders.len()
        );
        let handle = self.sink.create_physical(chunk);
        self.physical.insert(position, handle);
    }
}

impl<S: ChunkSink> Drop for ChunkManager<S> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
