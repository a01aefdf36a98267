//! The per-cell record stored in the voxel field.

use serde::{Deserialize, Serialize};

use super::corner::CornerMask;

/// Everything the terrain knows about one grid cell.
///
/// Id fields use zero for "none": a zero `material_id` is not meshed, and
/// zero resource/object ids place no decoration.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoxelCell {
    /// Occupancy of the cell.
    pub mask: CornerMask,
    /// Surface material, selecting the sub-mesh the cell contributes to.
    pub material_id: u32,
    /// Resource decoration placed at the cell.
    pub resource_id: u32,
    /// Object decoration placed at the cell (only ever set by edits).
    pub object_id: u32,
}

impl VoxelCell {
    /// An empty cell with no decorations.
    pub const EMPTY: VoxelCell = VoxelCell {
        mask: CornerMask::NONE,
        material_id: 0,
        resource_id: 0,
        object_id: 0,
    };

    /// A full block of the given material.
    pub fn solid(material_id: u32) -> Self {
        VoxelCell {
            mask: CornerMask::ALL,
            material_id,
            ..VoxelCell::EMPTY
        }
    }
}
