//! Decoration placement for visual chunks.
//!
//! Ramps, resources and placed objects are not part of the bevel mesh; they
//! are prefab instances the renderer spawns at cell positions. Prefabs are
//! chosen through fixed lookup tables indexed by the cell's mask, resource id
//! and object id respectively. An index past the end of a table, or an empty
//! slot, simply places nothing.

use cgmath::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::voxels::coords::GridCoordinate;

use super::cell_block::CellBlock;

/// Opaque handle of a renderer-side prefab.
pub type PrefabId = u32;

/// What a decoration represents.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecorationKind {
    /// A ramp wedge, picked by the cell's corner mask.
    Slope,
    /// A resource deposit, picked by the cell's resource id.
    Resource,
    /// A placed object, picked by the cell's object id.
    Object,
}

/// A prefab instance to spawn.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Decoration {
    /// Which table the prefab came from.
    pub kind: DecorationKind,
    /// The prefab to spawn.
    pub prefab: PrefabId,
    /// World-space min corner of the decorated cell.
    pub position: Point3<f32>,
}

/// Lookup tables from cell attributes to prefabs.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecorationPrefabs {
    /// Indexed by corner mask bits (after clamping to a defined mask).
    pub slopes: Vec<Option<PrefabId>>,
    /// Indexed by resource id.
    pub resources: Vec<Option<PrefabId>>,
    /// Indexed by object id.
    pub objects: Vec<Option<PrefabId>>,
}

/// Looks up a prefab slot, treating out-of-range indices as empty.
pub fn lookup(table: &[Option<PrefabId>], index: usize) -> Option<PrefabId> {
    table.get(index).copied().flatten()
}

/// Decorations for the chunk cells `[min, min + size)`, plus the layer just
/// below the chunk so that ramps and deposits in the ground show up.
///
/// Each cell is visited once and may produce up to one decoration per kind.
/// Resource and object id zero never decorate; the slope table is consulted
/// for every mask, including `NONE` and `ALL`.
pub(crate) fn place(
    block: &CellBlock,
    min: GridCoordinate,
    size: Vector3<i32>,
    prefabs: &DecorationPrefabs,
) -> Vec<Decoration> {
    let mut decorations = Vec::new();
    for y in -1..size.y {
        for z in 0..size.z {
            for x in 0..size.x {
                let p = min + Vector3::new(x, y, z);
                let cell = block.get(p);
                let position = Point3::new(p.x as f32, p.y as f32, p.z as f32);
                let picks = [
                    (DecorationKind::Slope, &prefabs.slopes, cell.mask.nearest_defined().bits() as usize),
                    (DecorationKind::Resource, &prefabs.resources, cell.resource_id as usize),
                    (DecorationKind::Object, &prefabs.objects, cell.object_id as usize),
                ];
                for (kind, table, index) in picks {
                    if kind != DecorationKind::Slope && index == 0 {
                        continue;
                    }
                    if let Some(prefab) = lookup(table, index) {
                        decorations.push(Decoration { kind, prefab, position });
                    }
                }
            }
        }
    }
    decorations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_skips_missing_slots() {
        let table = vec![None, Some(7), None];
        assert_eq!(lookup(&table, 0), None);
        assert_eq!(lookup(&table, 1), Some(7));
        assert_eq!(lookup(&table, 2), None);
        assert_eq!(lookup(&table, 99), None);
        assert_eq!(lookup(&[], 0), None);
    }
}
