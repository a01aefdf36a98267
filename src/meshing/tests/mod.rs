use std::collections::HashMap;

use crate::voxels::{cell::VoxelCell, coords::GridCoordinate, field::TerrainSource};

mod bevel_tests;

/// Empty space with a handful of explicit cells.
#[derive(Default)]
struct Cells(HashMap<GridCoordinate, VoxelCell>);

impl Cells {
    fn with(mut self, x: i32, y: i32, z: i32, cell: VoxelCell) -> Self {
        self.0.insert(GridCoordinate::new(x, y, z), cell);
        self
    }
}

impl TerrainSource for Cells {
    fn cell_at(&self, p: GridCoordinate) -> VoxelCell {
        self.0.get(&p).copied().unwrap_or_default()
    }
}
