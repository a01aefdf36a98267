//! Physical chunks: collision volumes only.
//!
//! Every cell in the chunk's collision layers gets the collision prefab for
//! its corner mask, so full blocks and each ramp orientation can use their
//! own collider shape. Empty cells normally map to an empty slot.

use cgmath::{Point3, Vector3};

use crate::meshing::decoration::{lookup, PrefabId};
use crate::voxels::coords::{ChunkPosition, GridCoordinate};
use crate::voxels::corner::CornerMask;
use crate::voxels::field::TerrainSource;

use super::ChunkBuildSettings;

/// One collider instance.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Collider {
    /// Collision prefab to spawn.
    pub prefab: PrefabId,
    /// World-space min corner of the cell.
    pub position: Point3<f32>,
    /// Mask the prefab was chosen for.
    pub mask: CornerMask,
}

/// Collidable contents of one chunk column.
#[derive(Clone, Debug)]
pub struct PhysicalChunk {
    /// Key of the chunk.
    pub position: ChunkPosition,
    /// World coordinate of the min corner.
    pub min: GridCoordinate,
    /// Extent of the cells given collision.
    pub size: Vector3<i32>,
    /// Colliders to spawn.
    pub colliders: Vec<Collider>,
}

impl PhysicalChunk {
    /// Collects the colliders of the chunk at `position`.
    pub fn build<T: TerrainSource>(
        source: &T,
        position: ChunkPosition,
        settings: &ChunkBuildSettings,
    ) -> Self {
        let min = position.min_corner();
        let size = Vector3::new(
            settings.chunk.chunk_size,
            settings.chunk.physical_height,
            settings.chunk.chunk_size,
        );

        let mut colliders = Vec::new();
        for y in 0..size.y {
            for z in 0..size.z {
                for x in 0..size.x {
                    let p = min + Vector3::new(x, y, z);
                    let mask = source.mask_at(p).nearest_defined();
                    if let Some(prefab) = lookup(&settings.prefabs.collision, mask.bits() as usize) {
                        colliders.push(Collider {
                            prefab,
                            position: Point3::new(p.x as f32, p.y as f32, p.z as f32),
                            mask,
                        });
                    }
                }
            }
        }

        PhysicalChunk {
            position,
            min,
            size,
            colliders,
        }
    }
}
