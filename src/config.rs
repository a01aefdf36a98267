//! # Configuration Module
//!
//! Serializable settings for every part of the terrain core.
//!
//! ## Structure
//!
//! * [`WorldSettings`] - seed, noise frequencies and thresholds for the generator
//! * [`ChunkSettings`] - chunk footprint and vertical extents
//! * [`MeshSettings`] - bevel width and mesh buffer bounds
//! * [`PathfindingSettings`] - search area cap
//!
//! All structs use `#[serde(default)]`, so a settings document only needs to
//! name the values it overrides. Reading the document from disk is left to the
//! host; [`EngineSettings::from_json_str`] parses and validates it.

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TerrainError};

/// Parameters of the procedural terrain generator.
///
/// Noise samples are remapped to `[0, 1]` before they are compared against any
/// of the thresholds below.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSettings {
    /// Seed shared by every noise channel (channels add a fixed offset).
    pub seed: u32,
    /// Horizontal frequency of the height channel.
    pub height_frequency: f64,
    /// Height sample above which the ground layer (y = 0) is solid.
    pub obstacle_threshold: f64,
    /// Height sample above which the peak layer (y = 1) is solid.
    pub peak_threshold: f64,
    /// Probability that an empty ground cell is considered for a ramp.
    pub slope_chance: f64,
    /// Horizontal frequency of the material channel.
    pub materials_frequency: f64,
    /// Number of distinct materials; material ids are `1..=materials_count`.
    pub materials_count: u32,
    /// Horizontal frequency of the resource channel.
    pub resources_frequency: f64,
    /// Resource sample below which a solid cell carries a resource.
    pub resource_chance: f64,
}

impl Default for WorldSettings {
    fn default() -> Self {
        WorldSettings {
            seed: 1337,
            height_frequency: 0.08,
            obstacle_threshold: 0.6,
            peak_threshold: 0.75,
            slope_chance: 0.5,
            materials_frequency: 0.05,
            materials_count: 3,
            resources_frequency: 0.2,
            resource_chance: 0.1,
        }
    }
}

/// Footprint and vertical extents of materialized chunks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkSettings {
    /// Horizontal edge length of a chunk, in cells.
    pub chunk_size: i32,
    /// Number of cell layers meshed by a visual chunk, starting at y = 0.
    pub visual_height: i32,
    /// Number of cell layers given collision by a physical chunk, starting at y = 0.
    pub physical_height: i32,
}

impl Default for ChunkSettings {
    fn default() -> Self {
        ChunkSettings {
            chunk_size: 8,
            visual_height: 3,
            physical_height: 2,
        }
    }
}

/// Bevel geometry and buffer bounds of the mesh synthesizer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshSettings {
    /// Half-width of the rounded strip along every cell edge.
    pub bevel: f32,
    /// Maximum number of vertices a single chunk mesh may hold.
    pub max_vertices: usize,
    /// Maximum number of indices a single chunk mesh may hold.
    pub max_indices: usize,
}

impl Default for MeshSettings {
    fn default() -> Self {
        MeshSettings {
            bevel: 0.1,
            max_vertices: 64_000,
            max_indices: 64_000,
        }
    }
}

/// Limits applied to path searches.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathfindingSettings {
    /// Half-extent of the search box around the start cell, per axis.
    pub search_radius: i32,
}

impl Default for PathfindingSettings {
    fn default() -> Self {
        PathfindingSettings { search_radius: 10 }
    }
}

/// Aggregate of all terrain core settings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Generator settings.
    pub world: WorldSettings,
    /// Chunk layout settings.
    pub chunk: ChunkSettings,
    /// Mesh synthesis settings.
    pub mesh: MeshSettings,
    /// Path search settings.
    pub pathfinding: PathfindingSettings,
}

impl EngineSettings {
    /// Parses a JSON settings document and validates the result.
    ///
    /// # Arguments
    /// * `json` - The document; missing fields fall back to their defaults
    ///
    /// # Returns
    /// The parsed settings, or a [`TerrainError`] if the document is malformed
    /// or describes geometry the engine cannot build.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: EngineSettings = serde_json::from_str(json)?;
        settings.validate()?;
        info!(
            "Loaded settings: seed {}, chunk size {}, bevel {}",
            settings.world.seed, settings.chunk.chunk_size, settings.mesh.bevel
        );
        Ok(settings)
    }

    /// Checks that the settings describe buildable geometry.
    pub fn validate(&self) -> Result<()> {
        if self.chunk.chunk_size < 1 {
            return Err(TerrainError::InvalidConfiguration(format!(
                "chunk size must be positive, got {}",
                self.chunk.chunk_size
            )));
        }
        if self.chunk.visual_height < 1 || self.chunk.physical_height < 1 {
            return Err(TerrainError::InvalidConfiguration(
                "chunk heights must be positive".to_string(),
            ));
        }
        if !(self.mesh.bevel > 0.0 && self.mesh.bevel < 0.5) {
            return Err(TerrainError::InvalidConfiguration(format!(
                "bevel must lie in (0, 0.5), got {}",
                self.mesh.bevel
            )));
        }
        if self.world.materials_count < 1 {
            return Err(TerrainError::InvalidConfiguration(
                "at least one material is required".to_string(),
            ));
        }
        if self.pathfinding.search_radius < 1 {
            return Err(TerrainError::InvalidConfiguration(
                "search radius must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(EngineSettings::default().validate().is_ok());
    }

    #[test]
    fn partial_document_keeps_defaults() {
        let settings =
            EngineSettings::from_json_str(r#"{ "world": { "seed": 7 }, "chunk": { "chunk_size": 16 } }"#)
                .unwrap();
        assert_eq!(settings.world.seed, 7);
        assert_eq!(settings.chunk.chunk_size, 16);
        assert_eq!(settings.chunk.visual_height, 3);
        assert_eq!(settings.mesh, MeshSettings::default());
    }

    #[test]
    fn malformed_document_is_rejected() {
        let result = EngineSettings::from_json_str("{ not json");
        assert!(matches!(result, Err(TerrainError::Settings(_))));
    }

    #[test]
    fn oversized_bevel_is_rejected() {
        let result = EngineSettings::from_json_str(r#"{ "mesh": { "bevel": 0.5 } }"#);
        assert!(matches!(result, Err(TerrainError::InvalidConfiguration(_))));
    }

    #[test]
    fn zero_chunk_size_is_rejected() {
        let mut settings = EngineSettings::default();
        settings.chunk.chunk_size = 0;
        assert!(settings.validate().is_err());
    }
}
