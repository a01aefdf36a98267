//! Padded cell cache for a chunk.
//!
//! Meshing a cell looks one cell back along every axis, so the cache covers
//! `[min - 1, min + size]` inclusive: the chunk itself plus one wrapped layer
//! on each side. Cells are fetched from the field exactly once per build.

use bitvec::prelude::BitVec;
use cgmath::{Point3, Vector3};

use crate::voxels::{cell::VoxelCell, coords::GridCoordinate, field::TerrainSource};

pub(crate) struct CellBlock {
    origin: GridCoordinate,
    dims: Vector3<i32>,
    cells: Vec<VoxelCell>,
}

impl CellBlock {
    /// Caches the cells a chunk at `min` with extent `size` depends on.
    pub fn capture<T: TerrainSource>(source: &T, min: GridCoordinate, size: Vector3<i32>) -> Self {
        let origin = min - Vector3::new(1, 1, 1);
        let dims = size + Vector3::new(1, 1, 1);
        let mut cells = Vec::with_capacity((dims.x * dims.y * dims.z) as usize);
        for y in 0..dims.y {
            for z in 0..dims.z {
                for x in 0..dims.x {
                    cells.push(source.cell_at(origin + Vector3::new(x, y, z)));
                }
            }
        }
        CellBlock { origin, dims, cells }
    }

    fn index(&self, p: GridCoordinate) -> usize {
        let local = p - self.origin;
        debug_assert!(
            (0..self.dims.x).contains(&local.x)
                && (0..self.dims.y).contains(&local.y)
                && (0..self.dims.z).contains(&local.z),
            "{:?} outside cached block",
            p
        );
        ((local.y * self.dims.z + local.z) * self.dims.x + local.x) as usize
    }

    /// Cached cell at a world coordinate inside the block.
    pub fn get(&self, p: GridCoordinate) -> VoxelCell {
        self.cells[self.index(p)]
    }

    /// One bit per cached cell: set where the cell's surface is `material_id`.
    pub fn occupancy(&self, material_id: u32) -> Occupancy<'_> {
        Occupancy {
            block: self,
            bits: self.cells.iter().map(|cell| cell.material_id == material_id).collect(),
        }
    }
}

pub(crate) struct Occupancy<'a> {
    block: &'a CellBlock,
    bits: BitVec,
}

impl Occupancy<'_> {
    pub fn is_solid(&self, p: Point3<i32>) -> bool {
        self.bits[self.block.index(p)]
    }

    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }
}
