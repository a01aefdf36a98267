//! # Voxel Terrain Core
//!
//! This module contains the data side of the terrain: what occupies each cell,
//! where it comes from, and which regions of it are materialized.
//!
//! ## Architecture
//!
//! The voxel system is organized into several key components:
//!
//! * **Corner masks and cells**: per-cell occupancy (empty, full block or ramp)
//!   plus material, resource and object ids
//! * **Generator**: deterministic procedural terrain from a seed
//! * **Field**: the generator shadowed by a sparse overlay of edits
//! * **Chunk**: visual and physical materialization of chunk columns
//! * **World**: the facade tying edits to chunk invalidation
//! * **Spatial**: surface and spawn queries plus the host physics interface
//!
//! ## Data Flow
//!
//! 1. The host requests a spatial range of visual or physical chunks
//! 2. Missing chunks are built from field reads and handed to the host sink
//! 3. Edits go into the overlay and rebuild the chunks that show the edited cell
//! 4. Path searches read the same field, so they see every edit immediately
//!
//! ## Thread Safety
//!
//! Reads only need `&self` and the generator holds no interior state, so a
//! field can be shared for reading while no write is in progress.

pub mod cell;
pub mod chunk;
pub mod coords;
pub mod corner;
pub mod field;
pub mod generator;
pub mod spatial;
pub mod world;
