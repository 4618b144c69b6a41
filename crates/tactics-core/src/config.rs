//! Configuration System
//!
//! Loads the board, pipeline and starting roster from a TOML file so
//! scenarios can be changed without recompiling.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::warn;

use tactics_events::Position;

use crate::fov::DEFAULT_FOV_RADIUS;
use crate::manager::EntityBuilder;
use crate::setup;
use crate::systems::SystemKind;

/// Default scenario file path
pub const DEFAULT_CONFIG_PATH: &str = "scenario.toml";

/// Top-level configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Systems run each tick, in order
    #[serde(default = "SystemKind::default_pipeline")]
    pub pipeline: Vec<SystemKind>,
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Starting roster, one record per entity
    #[serde(default = "setup::default_entities")]
    pub entities: Vec<EntitySpec>,
}

/// Simulation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub seed: u64,
    pub ticks: u64,
    pub board_size: i32,
    pub fov_radius: i32,
    /// Wait for a line of input between ticks
    pub interactive: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            ticks: 20,
            board_size: 16,
            fov_radius: DEFAULT_FOV_RADIUS,
            interactive: false,
        }
    }
}

impl SimulationConfig {
    pub fn rules(&self) -> Rules {
        Rules {
            board_size: self.board_size,
            fov_radius: self.fov_radius,
        }
    }
}

/// Board rules shared by the transition step and the systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    /// Cells per side of the square board
    pub board_size: i32,
    /// Chebyshev vision radius
    pub fov_radius: i32,
}

impl Default for Rules {
    fn default() -> Self {
        SimulationConfig::default().rules()
    }
}

/// One entity of the starting roster. Omitted fields mean "absent".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntitySpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glyph: Option<char>,
    pub movable: bool,
    pub ai: bool,
    pub vision: bool,
    pub viewer: bool,
    pub user_control: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl EntitySpec {
    pub fn builder(&self) -> EntityBuilder {
        let mut builder = EntityBuilder::new();
        if let Some(name) = &self.name {
            builder = builder.name(name.clone());
        }
        if let Some(position) = self.position {
            builder = builder.position(position.x, position.y);
        }
        if let Some(glyph) = self.glyph {
            builder = builder.glyph(glyph);
        }
        if self.movable {
            builder = builder.movable();
        }
        if self.ai {
            builder = builder.ai();
        }
        if self.vision {
            builder = builder.vision();
        }
        if self.viewer {
            builder = builder.viewer();
        }
        if self.user_control {
            builder = builder.user_control();
        }
        builder
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from `path`, or use defaults if it cannot be read
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path.as_ref()).unwrap_or_else(|e| {
            warn!(path = %path.as_ref().display(), error = %e, "using default scenario");
            Self::default()
        })
    }

    /// Serialize back to TOML, e.g. to write out a starter scenario
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pipeline: SystemKind::default_pipeline(),
            simulation: SimulationConfig::default(),
            entities: setup::default_entities(),
        }
    }
}

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tactics_events::ComponentKind;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.simulation.board_size, 16);
        assert_eq!(config.simulation.seed, 42);
        assert_eq!(config.pipeline.first(), Some(&SystemKind::Cleanup));
        assert!(!config.entities.is_empty());
    }

    #[test]
    fn test_parse_partial_config() {
        let config = Config::from_str(
            r##"
pipeline = ["cleanup", "field_of_view"]

[simulation]
board_size = 10
fov_radius = 3

[[entities]]
name = "scout"
position = { x = 5, y = 5 }
glyph = "s"
vision = true

[[entities]]
position = { x = 6, y = 5 }
glyph = "#"
"##,
        )
        .unwrap();

        assert_eq!(config.pipeline, vec![SystemKind::Cleanup, SystemKind::FieldOfView]);
        assert_eq!(config.simulation.board_size, 10);
        assert_eq!(config.simulation.ticks, 20);
        assert_eq!(config.entities.len(), 2);
        assert!(config.entities[0].vision);
        assert!(!config.entities[1].vision);
        assert_eq!(config.simulation.rules().fov_radius, 3);
    }

    #[test]
    fn test_spec_builder_components() {
        let spec = EntitySpec {
            name: Some("marine".into()),
            position: Some(Position::new(1, 2)),
            glyph: Some('m'),
            movable: true,
            ai: true,
            ..EntitySpec::default()
        };
        let kinds: Vec<_> = spec.builder().components().iter().map(|c| c.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                ComponentKind::Name,
                ComponentKind::Position,
                ComponentKind::Visible,
                ComponentKind::Movable,
                ComponentKind::Ai,
            ]
        );
    }

    #[test]
    fn test_load_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[simulation]\nseed = 7\nticks = 3").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.simulation.seed, 7);
        assert_eq!(config.simulation.ticks, 3);
        assert_eq!(config.pipeline, SystemKind::default_pipeline());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let config = Config::load_or_default("does/not/exist.toml");
        assert_eq!(config.simulation.board_size, 16);

        assert!(matches!(
            Config::load("does/not/exist.toml"),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            Config::from_str("pipeline = [\"teleport\"]"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_default_roundtrips_through_toml() {
        let toml = Config::default().to_toml().unwrap();
        let parsed = Config::from_str(&toml).unwrap();
        assert_eq!(parsed.entities, Config::default().entities);
        assert_eq!(parsed.pipeline, SystemKind::default_pipeline());
    }
}
