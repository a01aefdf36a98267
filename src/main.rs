//! # Voxel Terrain Demonstration
//!
//! Native entry point. It simply calls into the library's `run()` function,
//! which builds a default world, edits it and runs a path search.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release
//! ```

fn main() {
    voxel_terrain::run();
}
