//! # Meshing Module
//!
//! Geometry synthesis for visual chunks.
//!
//! ## Architecture
//!
//! * **Cell block**: a padded cache of the cells a chunk's geometry depends on
//! * **Bevel synthesis**: per-material surfaces with rounded edges, built from
//!   seven sub-regions per lattice cube and a fixed triangulation table
//! * **Decorations**: prefab placements for ramps, resources and objects
//! * **Mesh buffers**: bounded vertex/index buffers with per-material sub-meshes
//!
//! ## Performance Considerations
//!
//! * Cells are read from the field once per chunk build and cached
//! * Per-material occupancy is a bit vector over the cache; materials absent
//!   from a chunk are skipped without visiting its cells
//! * There is no incremental meshing: every (re)materialization rebuilds the
//!   whole chunk, which is bounded by the chunk footprint
//! * Buffers are bounded; overflowing them is a configuration error

pub mod bevel;
pub(crate) mod cell_block;
pub mod decoration;
pub mod mesh;
pub mod tables;
pub mod vertex;

pub use bevel::BevelParams;
pub use decoration::{Decoration, DecorationKind, DecorationPrefabs, PrefabId};
pub use mesh::{ChunkMesh, SubMesh};
pub use vertex::MeshVertex;

#[cfg(test)]
mod tests;
