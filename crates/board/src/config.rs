//! Host-supplied configuration for the board engine.

use anyhow::{Context, Result};
use board_core::viewport::DEFAULT_VIEWPORT_MARGIN;
use board_core::GridSettings;
use interaction::DEFAULT_MIN_ELEMENT_SIZE;
use serde::{Deserialize, Serialize};

/// Configuration the host hands the engine at startup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Grid snapping configuration
    pub grid: GridSettings,
    /// Culling margin in world units
    pub viewport_margin: f32,
    /// Floor for element and aggregate-box dimensions during resize
    pub min_element_size: f32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            grid: GridSettings::default(),
            viewport_margin: DEFAULT_VIEWPORT_MARGIN,
            min_element_size: DEFAULT_MIN_ELEMENT_SIZE,
        }
    }
}

impl BoardConfig {
    /// Parses a configuration from a JSON document. Missing fields fall
    /// back to their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("failed to parse board configuration")
    }
}
