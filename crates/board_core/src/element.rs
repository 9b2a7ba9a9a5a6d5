//! The element record as the spatial and interaction layers see it.
//!
//! The host application owns the authoritative element list; this crate
//! only carries the fields the engine needs (placement plus the locked
//! flag that excludes an element from hit-testing).

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::bounds::Bounds;

/// Unique identifier for a board element.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(uuid::Uuid);

impl ElementId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Create an ElementId from a u128 (useful for tests).
    pub fn from_u128(value: u128) -> Self {
        Self(uuid::Uuid::from_u128(value))
    }

    /// Get the full UUID string.
    pub fn to_uuid_string(&self) -> String {
        self.0.to_string()
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementId({})", &self.0.to_string()[..8])
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// A single element on the board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    /// Top-left corner in world coordinates
    pub position: Vec2,
    /// Width and height in world units (non-negative by caller precondition)
    pub size: Vec2,
    /// Locked elements are skipped by hit-testing and cannot start a drag
    #[serde(default)]
    pub locked: bool,
}

impl Element {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            id: ElementId::new(),
            position,
            size,
            locked: false,
        }
    }

    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    /// The element's bounds in world coordinates.
    pub fn bounds(&self) -> Bounds {
        Bounds::from_origin_size(self.position, self.size)
    }

    /// Move the element by a delta.
    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }

    /// Whether a world-space point falls on this element.
    pub fn contains_point(&self, point: Vec2) -> bool {
        self.bounds().contains_point(point)
    }
}
