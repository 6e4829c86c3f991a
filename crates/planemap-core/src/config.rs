//! View configuration (`planemap.toml`) parsing and validation.
//!
//! ```toml
//! [view]
//! plane_size = 3.0
//! steps = 500
//! grid_divisions = 32
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Conventional configuration file name
pub const CONFIG_FILE_NAME: &str = "planemap.toml";

/// Default half-width of the sampled square, `[-3, 3] x [-3, 3]`
pub const DEFAULT_PLANE_SIZE: f64 = 3.0;
/// Default number of segments each grid line is split into
pub const DEFAULT_STEPS: usize = 500;
/// Default number of grid lines per `plane_size` of width
pub const DEFAULT_GRID_DIVISIONS: usize = 32;
/// Largest accepted segment count per grid line
pub const MAX_STEPS: usize = 100_000;
/// Largest accepted line count per half-axis
pub const MAX_GRID_DIVISIONS: usize = 1024;

/// Errors that can occur when loading a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for '{field}': {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// The complete planemap.toml file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Sampling window and density.
    #[serde(default)]
    pub view: ViewConfig,
}

/// Sampling window and density.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ViewConfig {
    /// Half-width of the square region sampled around the origin.
    pub plane_size: f64,

    /// Segments per sampled line; each line yields `steps + 1` points.
    pub steps: usize,

    /// Grid lines per `plane_size` of width. Each axis gets
    /// `2 * grid_divisions` lines across the full window.
    pub grid_divisions: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            plane_size: DEFAULT_PLANE_SIZE,
            steps: DEFAULT_STEPS,
            grid_divisions: DEFAULT_GRID_DIVISIONS,
        }
    }
}

impl ViewConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_plane_size(mut self, plane_size: f64) -> Self {
        self.plane_size = plane_size;
        self
    }

    #[must_use]
    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    #[must_use]
    pub fn with_grid_divisions(mut self, grid_divisions: usize) -> Self {
        self.grid_divisions = grid_divisions;
        self
    }

    /// Parse the `[view]` table of a configuration file
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(content)?;
        file.view.validate()?;
        Ok(file.view)
    }

    /// Load and validate a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), ?config, "loaded view config");
        Ok(config)
    }

    /// Check that the window is non-empty and sampling is possible
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.plane_size.is_finite() && self.plane_size > 0.0) {
            return Err(ConfigError::Invalid {
                field: "plane_size",
                reason: "must be a positive finite number",
            });
        }
        if !(1..=MAX_STEPS).contains(&self.steps) {
            return Err(ConfigError::Invalid {
                field: "steps",
                reason: "must be between 1 and 100000",
            });
        }
        if !(1..=MAX_GRID_DIVISIONS).contains(&self.grid_divisions) {
            return Err(ConfigError::Invalid {
                field: "grid_divisions",
                reason: "must be between 1 and 1024",
            });
        }
        Ok(())
    }
}
