//! # Error Module
//!
//! Errors surfaced by the terrain core.
//!
//! Only configuration problems are errors here. Conditions that are expected
//! during normal operation (no path between two cells, an empty prefab slot)
//! are modelled as `Option`/`bool` by the functions that produce them.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, TerrainError>;

/// Fatal configuration errors raised by the terrain core.
#[derive(Debug, Error)]
pub enum TerrainError {
    /// The mesh synthesizer ran out of buffer space for a chunk.
    ///
    /// The chunk footprint is too large for the configured buffer bounds and
    /// must be fixed in configuration; retrying produces the same result.
    #[error("chunk mesh exceeds the {kind} limit of {limit}")]
    MeshCapacityExceeded {
        /// Which buffer overflowed (`"vertex"` or `"index"`).
        kind: &'static str,
        /// The configured limit that was hit.
        limit: usize,
    },

    /// A settings value is outside the range the engine can work with.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A settings document could not be parsed.
    #[error("malformed settings document: {0}")]
    Settings(#[from] serde_json::Error),
}
