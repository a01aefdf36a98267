//! Visual chunks: a bevelled mesh plus decoration placements.

use cgmath::Vector3;

use crate::error::Result;
use crate::meshing::{
    bevel::{self, BevelParams},
    cell_block::CellBlock,
    decoration, ChunkMesh, Decoration,
};
use crate::voxels::coords::{ChunkPosition, GridCoordinate};
use crate::voxels::field::TerrainSource;

use super::ChunkBuildSettings;

/// Renderable contents of one chunk column.
#[derive(Clone, Debug)]
pub struct VisualChunk {
    /// Key of the chunk.
    pub position: ChunkPosition,
    /// World coordinate of the min corner; mesh positions are relative to it.
    pub min: GridCoordinate,
    /// Extent of the meshed cells.
    pub size: Vector3<i32>,
    /// Surface geometry, one sub-mesh per material.
    pub mesh: ChunkMesh,
    /// Prefab instances to spawn alongside the mesh.
    pub decorations: Vec<Decoration>,
}

impl VisualChunk {
    /// Synthesizes the geometry of the chunk at `position`.
    ///
    /// # Arguments
    /// * `source` - The terrain to read cells from
    /// * `position` - Which chunk to build
    /// * `settings` - Chunk extents, bevel, buffer bounds and prefab tables
    ///
    /// # Returns
    /// The chunk, or a configuration error when the mesh exceeds its buffer bounds.
    pub fn build<T: TerrainSource>(
        source: &T,
        position: ChunkPosition,
        settings: &ChunkBuildSettings,
    ) -> Result<Self> {
        let min = position.min_corner();
        let size = Vector3::new(
            settings.chunk.chunk_size,
            settings.chunk.visual_height,
            settings.chunk.chunk_size,
        );
        let block = CellBlock::capture(source, min, size);

        let params = BevelParams {
            bevel: settings.mesh.bevel,
            materials_count: settings.materials_count,
            max_vertices: settings.mesh.max_vertices,
            max_indices: settings.mesh.max_indices,
        };
        let mesh = bevel::synthesize(&block, min, size, &params)?;
        let decorations = decoration::place(&block, min, size, &settings.prefabs.decorations);

        Ok(VisualChunk {
            position,
            min,
            size,
            mesh,
            decorations,
        })
    }
}
