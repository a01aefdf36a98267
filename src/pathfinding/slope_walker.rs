//! # Slope Walker
//!
//! Step rules for a walker that cannot jump but can use ramps.
//!
//! ## Standing Positions
//!
//! A walker occupies a cell. It may stand in an empty cell resting on a full
//! block, or on a ramp cell. It can never stand inside a full block.
//!
//! ## Steps
//!
//! For each horizontal direction the neighbour cell decides the move:
//!
//! * empty neighbour: walk across when it has ground under it, otherwise step
//!   down into the cell below it
//! * ramp that does not rise towards us: walk onto it
//! * full block, while standing on a ramp rising towards it: climb onto its top
//!
//! From an empty cell the four diagonals are also allowed, but only when both
//! flanking cells and the diagonal are empty and the diagonal has ground under
//! it, so a walker never squeezes past a solid corner.

use cgmath::Vector3;

use crate::voxels::coords::{GridCoordinate, DOWN, UP};
use crate::voxels::corner::CornerMask;
use crate::voxels::field::TerrainSource;

use super::StepProvider;

/// Horizontal directions with the side a ramp rises towards when it leads
/// that way.
const DIRECTIONS: [(Vector3<i32>, CornerMask); 4] = [
    (Vector3 { x: -1, y: 0, z: 0 }, CornerMask::LEFT),
    (Vector3 { x: 1, y: 0, z: 0 }, CornerMask::RIGHT),
    (Vector3 { x: 0, y: 0, z: -1 }, CornerMask::NEAR),
    (Vector3 { x: 0, y: 0, z: 1 }, CornerMask::FAR),
];

/// Diagonals as index pairs into [`DIRECTIONS`].
const DIAGONALS: [(usize, usize); 4] = [(0, 2), (0, 3), (1, 2), (1, 3)];

/// Slope-aware step provider confined to a box around a centre cell.
pub struct SlopeWalker<'a, T: TerrainSource> {
    terrain: &'a T,
    center: GridCoordinate,
    size: Vector3<i32>,
}

impl<'a, T: TerrainSource> SlopeWalker<'a, T> {
    /// Creates a walker over `terrain`.
    ///
    /// # Arguments
    /// * `terrain` - The terrain to walk
    /// * `center` - Centre of the search box, usually the start cell
    /// * `size` - Per-axis half-extent; cells at this distance or further are outside
    pub fn new(terrain: &'a T, center: GridCoordinate, size: Vector3<i32>) -> Self {
        SlopeWalker { terrain, center, size }
    }

    /// Creates a walker with the same half-extent on every axis.
    pub fn with_radius(terrain: &'a T, center: GridCoordinate, radius: i32) -> Self {
        Self::new(terrain, center, Vector3::new(radius, radius, radius))
    }

    fn is_inside(&self, p: GridCoordinate) -> bool {
        let d = p - self.center;
        d.x.abs() < self.size.x && d.y.abs() < self.size.y && d.z.abs() < self.size.z
    }

    /// Whether a walker can stand at `p`.
    pub fn is_standable(&self, p: GridCoordinate) -> bool {
        if !self.is_inside(p) {
            return false;
        }
        let mask = self.terrain.mask_at(p);
        if mask.is_full() {
            return false;
        }
        !mask.is_empty() || self.terrain.mask_at(p + DOWN).is_full()
    }
}

impl<T: TerrainSource> StepProvider for SlopeWalker<'_, T> {
    fn is_valid_from(&self, from: GridCoordinate) -> bool {
        self.is_standable(from)
    }

    fn is_valid_to(&self, to: GridCoordinate) -> bool {
        self.is_standable(to)
    }

    fn possible_steps(&self, p: GridCoordinate) -> Vec<GridCoordinate> {
        let mut steps = Vec::new();
        if !self.is_inside(p) {
            return steps;
        }

        let mask = self.terrain.mask_at(p);
        let mut neighbour_masks = [CornerMask::NONE; 4];

        for (i, &(direction, towards)) in DIRECTIONS.iter().enumerate() {
            let neighbour = p + direction;
            let neighbour_mask = self.terrain.mask_at(neighbour);
            neighbour_masks[i] = neighbour_mask;

            if neighbour_mask.is_empty() {
                let below = neighbour + DOWN;
                steps.push(if self.terrain.mask_at(below).is_full() {
                    neighbour
                } else {
                    below
                });
            } else if !neighbour_mask.intersects(!towards) {
                steps.push(neighbour);
            } else if mask.contains(towards) && neighbour_mask.is_full() {
                let top = neighbour + UP;
                if self.terrain.mask_at(top).is_empty() {
                    steps.push(top);
                }
            }
        }

        if mask.is_empty() {
            for &(a, b) in DIAGONALS.iter() {
                if !(neighbour_masks[a].is_empty() && neighbour_masks[b].is_empty()) {
                    continue;
                }
                let diagonal = p + DIRECTIONS[a].0 + DIRECTIONS[b].0;
                if self.terrain.mask_at(diagonal).is_empty()
                    && self.terrain.mask_at(diagonal + DOWN).is_full()
                {
                    steps.push(diagonal);
                }
            }
        }

        steps
    }
}
