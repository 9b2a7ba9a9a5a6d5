//! Viewport state for the canvas.
//!
//! The viewport describes the window into world coordinates: a world-space
//! origin, a size in screen units, and a zoom percentage. Culling queries
//! expand the resulting world rectangle by a margin so elements just past
//! the edge are already available when the user pans.

use glam::Vec2;

use crate::bounds::Bounds;

/// Extra world units added on every side of the viewport before a culling
/// query, so near-offscreen elements render without popping during a pan.
pub const DEFAULT_VIEWPORT_MARGIN: f32 = 100.0;

/// Camera/viewport state for the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Top-left corner of the view in world coordinates
    pub origin: Vec2,
    /// Viewport size in screen units
    pub size: Vec2,
    /// Zoom percentage (100.0 = 1:1)
    pub zoom: f32,
    /// Culling margin in world units
    pub margin: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            origin: Vec2::ZERO,
            size: Vec2::ZERO,
            zoom: 100.0,
            margin: DEFAULT_VIEWPORT_MARGIN,
        }
    }
}

impl Viewport {
    pub fn new(origin: Vec2, size: Vec2) -> Self {
        Self {
            origin,
            size,
            ..Self::default()
        }
    }

    pub fn with_zoom(mut self, zoom: f32) -> Self {
        self.zoom = zoom;
        self
    }

    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    /// The screen-to-world scale factor.
    pub fn scale(&self) -> f32 {
        self.zoom / 100.0
    }

    /// The visible world rectangle, without the culling margin.
    pub fn world_bounds(&self) -> Bounds {
        Bounds::from_origin_size(self.origin, self.size / self.scale())
    }

    /// The world rectangle used for culling queries, expanded by `margin`
    /// on all sides.
    pub fn query_bounds(&self) -> Bounds {
        self.world_bounds().expand(self.margin)
    }

    /// Convert a screen-space vector (cursor movement) to world units.
    pub fn screen_to_world_vector(&self, vector: Vec2) -> Vec2 {
        vector / self.scale()
    }

    /// Convert a screen-space point to world coordinates.
    pub fn screen_to_world(&self, point: Vec2) -> Vec2 {
        self.origin + point / self.scale()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_bounds_applies_zoom() {
        let viewport = Viewport::new(Vec2::new(100.0, 100.0), Vec2::new(800.0, 600.0))
            .with_zoom(200.0);

        let bounds = viewport.world_bounds();
        assert_eq!(bounds.min, Vec2::new(100.0, 100.0));
        // At 200% zoom, 800x600 screen units cover 400x300 world units.
        assert_eq!(bounds.size(), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_query_bounds_applies_margin() {
        let viewport = Viewport::new(Vec2::ZERO, Vec2::new(800.0, 600.0)).with_margin(100.0);

        let query = viewport.query_bounds();
        assert_eq!(query.min, Vec2::new(-100.0, -100.0));
        assert_eq!(query.max, Vec2::new(900.0, 700.0));
    }

    #[test]
    fn test_screen_to_world_conversion() {
        let viewport =
            Viewport::new(Vec2::new(50.0, 50.0), Vec2::new(800.0, 600.0)).with_zoom(50.0);

        assert_eq!(
            viewport.screen_to_world_vector(Vec2::new(10.0, 20.0)),
            Vec2::new(20.0, 40.0)
        );
        assert_eq!(
            viewport.screen_to_world(Vec2::new(100.0, 100.0)),
            Vec2::new(250.0, 250.0)
        );
    }
}
