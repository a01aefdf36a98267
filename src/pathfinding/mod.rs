//! # Pathfinding Module
//!
//! Grid pathfinding over the voxel terrain.
//!
//! ## Architecture
//!
//! * [`StepProvider`] - the traversal rules: which cells are valid endpoints
//!   and which cells can be reached from a given cell in one step
//! * [`SlopeWalker`] - the terrain-aware provider that understands ramps,
//!   ledges and diagonal corner cutting
//! * [`astar`] - best-first search generic over any provider
//!
//! ## Performance Considerations
//!
//! Searches have no cancellation point; they are bounded instead by the
//! provider, which refuses to expand cells outside its search box.

pub mod astar;
pub mod slope_walker;

pub use astar::{find_path, find_path_into};
pub use slope_walker::SlopeWalker;

use crate::voxels::coords::GridCoordinate;

#[cfg(test)]
mod tests;

/// Traversal rules consumed by the path search.
pub trait StepProvider {
    /// Whether a search may start at `from`.
    fn is_valid_from(&self, from: GridCoordinate) -> bool;

    /// Whether a search may end at `to`.
    fn is_valid_to(&self, to: GridCoordinate) -> bool;

    /// Cells reachable from `p` in one step.
    fn possible_steps(&self, p: GridCoordinate) -> Vec<GridCoordinate>;
}
