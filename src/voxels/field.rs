//! # Voxel Field Module
//!
//! The single source of truth for what occupies a cell.
//!
//! ## Architecture
//!
//! The field has two layers:
//!
//! * the generated layer, computed on demand by [`TerrainGenerator`] and never stored
//! * the edit overlay, a sparse map of explicitly written cells that shadows
//!   the generated layer
//!
//! Reads check the overlay first and fall back to the generator. The overlay
//! only grows; it lives as long as the field and is never pruned, even when an
//! edit happens to restore the generated value.
//!
//! ## Concurrency
//!
//! Reads take `&self` and may be shared freely. Writes take `&mut self`, so the
//! single-writer rule for the overlay is enforced by the borrow checker.

use std::collections::HashMap;

use log::trace;

use super::cell::VoxelCell;
use super::coords::{ChunkPosition, GridCoordinate};
use super::corner::CornerMask;
use super::generator::TerrainGenerator;

/// Read access to terrain cells.
///
/// Implemented by the generator, the voxel field, and by toy grids in tests,
/// so consumers such as the step provider can walk any of them.
pub trait TerrainSource {
    /// Full cell record at `p`. Never fails; the domain is unbounded.
    fn cell_at(&self, p: GridCoordinate) -> VoxelCell;

    /// Occupancy of the cell at `p`.
    fn mask_at(&self, p: GridCoordinate) -> CornerMask {
        self.cell_at(p).mask
    }

    /// Surface material of the cell at `p`.
    fn material_id_at(&self, p: GridCoordinate) -> u32 {
        self.cell_at(p).material_id
    }

    /// Resource id of the cell at `p`.
    fn resource_id_at(&self, p: GridCoordinate) -> u32 {
        self.cell_at(p).resource_id
    }
}

/// Procedural terrain plus the overlay of edits made to it.
pub struct VoxelField {
    generator: TerrainGenerator,
    chunk_size: i32,
    edits: HashMap<GridCoordinate, VoxelCell>,
}

impl VoxelField {
    /// Creates a field with an empty overlay.
    ///
    /// # Arguments
    /// * `generator` - Source of every cell that has not been edited
    /// * `chunk_size` - Chunk edge length, used to report which chunks an edit dirties
    pub fn new(generator: TerrainGenerator, chunk_size: i32) -> Self {
        VoxelField {
            generator,
            chunk_size,
            edits: HashMap::new(),
        }
    }

    /// The generator backing the unedited cells.
    pub fn generator(&self) -> &TerrainGenerator {
        &self.generator
    }

    /// Chunk edge length the field reports dirty chunks in.
    pub fn chunk_size(&self) -> i32 {
        self.chunk_size
    }

    /// Reads a cell: the overlay entry if one exists, otherwise the generated cell.
    pub fn read(&self, p: GridCoordinate) -> VoxelCell {
        match self.edits.get(&p) {
            Some(cell) => *cell,
            None => VoxelCell {
                mask: self.generator.mask_at(p),
                material_id: self.generator.material_id_at(p),
                resource_id: self.generator.resource_id_at(p),
                object_id: 0,
            },
        }
    }

    /// Stores a cell in the overlay, replacing any earlier edit at `p`.
    ///
    /// # Returns
    /// The chunk positions whose geometry depends on `p` and must be
    /// re-materialized: the chunk containing `p`, plus the chunks across its
    /// +x and +z faces (and the diagonal one) when `p` lies on those faces,
    /// because a chunk's mesh samples one cell back across its min faces.
    pub fn write(&mut self, p: GridCoordinate, cell: VoxelCell) -> Vec<ChunkPosition> {
        trace!("Overlay write at {:?}: {:?}", p, cell);
        self.edits.insert(p, cell);

        let home = ChunkPosition::containing(p, self.chunk_size);
        let on_far_x = p.x == home.x + self.chunk_size - 1;
        let on_far_z = p.z == home.z + self.chunk_size - 1;

        let mut dirty = vec![home];
        if on_far_x {
            dirty.push(ChunkPosition::new(home.x + self.chunk_size, home.z));
        }
        if on_far_z {
            dirty.push(ChunkPosition::new(home.x, home.z + self.chunk_size));
        }
        if on_far_x && on_far_z {
            dirty.push(ChunkPosition::new(home.x + self.chunk_size, home.z + self.chunk_size));
        }
        dirty
    }

    /// The overlay entry at `p`, if the cell was ever written.
    pub fn edit_at(&self, p: GridCoordinate) -> Option<&VoxelCell> {
        self.edits.get(&p)
    }

    /// Number of cells in the overlay.
    pub fn edit_count(&self) -> usize {
        self.edits.len()
    }

    /// Iterates over every overlay entry, in no particular order.
    pub fn edits(&self) -> impl Iterator<Item = (&GridCoordinate, &VoxelCell)> {
        self.edits.iter()
    }
}

impl TerrainSource for VoxelField {
    fn cell_at(&self, p: GridCoordinate) -> VoxelCell {
        self.read(p)
    }

    fn mask_at(&self, p: GridCoordinate) -> CornerMask {
        match self.edits.get(&p) {
            Some(cell) => cell.mask,
            None => self.generator.mask_at(p),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorldSettings;

    fn field() -> VoxelField {
        VoxelField::new(TerrainGenerator::new(WorldSettings::default()), 8)
    }

    #[test]
    fn unedited_cells_come_from_the_generator() {
        let field = field();
        let generator = TerrainGenerator::new(WorldSettings::default());
        for x in -8..8 {
            for z in -8..8 {
                let p = GridCoordinate::new(x, 0, z);
                assert_eq!(field.read(p), generator.cell_at(p));
            }
        }
        assert_eq!(field.edit_count(), 0);
    }

    #[test]
    fn overlay_shadows_generated_cells() {
        let mut field = field();
        let solid = VoxelCell {
            object_id: 4,
            ..VoxelCell::solid(2)
        };
        let above = GridCoordinate::new(3, 5, 3);
        let below = GridCoordinate::new(3, -4, 3);

        field.write(above, solid);
        field.write(below, VoxelCell::EMPTY);

        assert_eq!(field.read(above), solid);
        assert_eq!(field.read(below), VoxelCell::EMPTY);
        assert_eq!(field.mask_at(below), CornerMask::NONE);
        assert_eq!(field.edit_count(), 2);
    }

    #[test]
    fn rewrites_replace_earlier_edits() {
        let mut field = field();
        let p = GridCoordinate::new(-2, 1, 9);
        field.write(p, VoxelCell::solid(1));
        field.write(p, VoxelCell::solid(3));
        assert_eq!(field.read(p).material_id, 3);
        assert_eq!(field.edit_count(), 1);
    }

    #[test]
    fn interior_write_dirties_one_chunk() {
        let mut field = field();
        let dirty = field.write(GridCoordinate::new(-3, 0, 12), VoxelCell::EMPTY);
        assert_eq!(dirty, vec![ChunkPosition::new(-8, 8)]);
    }

    #[test]
    fn far_corner_write_dirties_neighbours() {
        let mut field = field();
        let dirty = field.write(GridCoordinate::new(7, 0, 15), VoxelCell::EMPTY);
        assert_eq!(
            dirty,
            vec![
                ChunkPosition::new(0, 8),
                ChunkPosition::new(8, 8),
                ChunkPosition::new(0, 16),
                ChunkPosition::new(8, 16),
            ]
        );
    }
}
