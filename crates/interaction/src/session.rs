//! Transient gesture sessions.
//!
//! Each session exists only between pointer-down and pointer-up. The
//! tagged union `GestureState` is owned by a single controller, so at most
//! one gesture can be live at a time and a lost pointer capture resets it
//! to `Idle` without leaving state behind.

use std::collections::HashMap;

use board_core::{Bounds, ElementId};
use glam::Vec2;

use crate::handle::ResizeHandle;

/// State captured at the start of a group drag.
#[derive(Clone, Debug)]
pub struct DragSession {
    /// The element the pointer went down on; snapping applies to its
    /// candidate position only
    pub primary: ElementId,
    /// Cursor position minus the primary's position at gesture start
    pub pointer_offset: Vec2,
    /// Every selected element's position at gesture start
    pub initial_positions: HashMap<ElementId, Vec2>,
}

/// One element's placement as fractions of the initial aggregate box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RelativePlacement {
    pub id: ElementId,
    /// (position - box.origin) / box.size
    pub rel_pos: Vec2,
    /// size / box.size
    pub rel_size: Vec2,
}

/// State captured at the start of a group resize.
#[derive(Clone, Debug)]
pub struct ResizeSession {
    pub handle: ResizeHandle,
    /// Aggregate box over the selection at gesture start
    pub initial_box: Bounds,
    /// Per-element fractions, captured once and never re-derived mid-gesture
    pub placements: Vec<RelativePlacement>,
}

/// State of an in-progress marquee selection.
#[derive(Clone, Copy, Debug)]
pub struct MarqueeSession {
    /// World position of the pointer-down
    pub anchor: Vec2,
    /// Current world position of the pointer
    pub cursor: Vec2,
}

impl MarqueeSession {
    /// The marquee rectangle, corner order normalized.
    pub fn bounds(&self) -> Bounds {
        Bounds::from_corners(self.anchor, self.cursor)
    }
}

/// The gesture state machine: at most one session is live at a time.
#[derive(Clone, Debug, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging(DragSession),
    Resizing(ResizeSession),
    MarqueeSelecting(MarqueeSession),
}

impl GestureState {
    pub fn is_idle(&self) -> bool {
        matches!(self, GestureState::Idle)
    }

    /// Short name for log lines.
    pub fn name(&self) -> &'static str {
        match self {
            GestureState::Idle => "idle",
            GestureState::Dragging(_) => "dragging",
            GestureState::Resizing(_) => "resizing",
            GestureState::MarqueeSelecting(_) => "marquee",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;

    #[test]
    fn test_marquee_bounds_normalizes_corners() {
        let session = MarqueeSession {
            anchor: vec2(50.0, 60.0),
            cursor: vec2(10.0, 20.0),
        };
        let bounds = session.bounds();
        assert_eq!(bounds.min, vec2(10.0, 20.0));
        assert_eq!(bounds.max, vec2(50.0, 60.0));
    }

    #[test]
    fn test_default_state_is_idle() {
        let state = GestureState::default();
        assert!(state.is_idle());
        assert_eq!(state.name(), "idle");
    }
}
