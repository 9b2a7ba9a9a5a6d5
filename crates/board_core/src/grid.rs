//! Grid snapping shared by drag and resize.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// The default grid cell size in world units.
pub const DEFAULT_GRID_SIZE: f32 = 24.0;

/// Host-supplied grid configuration.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridSettings {
    /// Grid cell size in world units
    pub size: f32,
    /// When disabled, snapping is the identity
    pub enabled: bool,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            size: DEFAULT_GRID_SIZE,
            enabled: true,
        }
    }
}

impl GridSettings {
    pub fn new(size: f32, enabled: bool) -> Self {
        Self { size, enabled }
    }

    /// Snaps a coordinate to the nearest grid line.
    ///
    /// Idempotent: `snap(snap(v)) == snap(v)`.
    pub fn snap(&self, value: f32) -> f32 {
        if self.enabled {
            (value / self.size).round() * self.size
        } else {
            value
        }
    }

    /// Snaps both components of a point.
    pub fn snap_point(&self, point: Vec2) -> Vec2 {
        Vec2::new(self.snap(point.x), self.snap(point.y))
    }
}
