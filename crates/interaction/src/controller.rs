//! The gesture controller: owns the state machine and turns pointer
//! movement into per-element position/size updates.
//!
//! Drag is rigid: snapping applies to the primary element's candidate
//! position only, and the resulting single delta is applied to every
//! member's initial position, so pairwise offsets survive the whole
//! gesture bit-for-bit. Resize is proportional: each member is
//! re-projected through fractions of the initial aggregate box captured at
//! gesture start.

use std::collections::HashMap;

use board_core::{Bounds, Element, ElementId, GridSettings};
use glam::Vec2;
use smallvec::SmallVec;

use crate::handle::ResizeHandle;
use crate::selection::aggregate_bounds;
use crate::session::{
    DragSession, GestureState, MarqueeSession, RelativePlacement, ResizeSession,
};

/// Floor for aggregate-box and per-element dimensions, in world units.
///
/// Applied to the aggregate box before scale factors are derived, so the
/// proportional math never divides by zero; a resize that would shrink a
/// dimension below this simply stops shrinking further.
pub const DEFAULT_MIN_ELEMENT_SIZE: f32 = 20.0;

/// A position/size change for one element, emitted once per affected
/// element per move event. The host merges these into its own store.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElementUpdate {
    pub id: ElementId,
    pub position: Option<Vec2>,
    pub size: Option<Vec2>,
}

/// The updates produced by one move event.
pub type UpdateBatch = SmallVec<[ElementUpdate; 8]>;

/// Drives drag, resize and marquee gestures over the current selection.
pub struct GestureController {
    state: GestureState,
    grid: GridSettings,
    min_size: f32,
}

impl GestureController {
    pub fn new(grid: GridSettings) -> Self {
        Self {
            state: GestureState::Idle,
            grid,
            min_size: DEFAULT_MIN_ELEMENT_SIZE,
        }
    }

    pub fn with_min_size(mut self, min_size: f32) -> Self {
        self.min_size = min_size;
        self
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state.is_idle()
    }

    pub fn grid(&self) -> GridSettings {
        self.grid
    }

    pub fn set_grid(&mut self, grid: GridSettings) {
        self.grid = grid;
    }

    /// Starts a group drag from a pointer-down on `primary`.
    ///
    /// `selected` is the full current selection; every member's starting
    /// position is captured so later moves are pure translations of it.
    pub fn begin_drag(&mut self, primary: ElementId, pointer_world: Vec2, selected: &[Element]) {
        if !self.state.is_idle() {
            log::warn!("ignoring begin_drag while {}", self.state.name());
            return;
        }
        let primary_position = match selected.iter().find(|e| e.id == primary) {
            Some(element) => element.position,
            None => {
                log::warn!("begin_drag: primary {primary} not in selection");
                return;
            }
        };

        let initial_positions: HashMap<ElementId, Vec2> = selected
            .iter()
            .map(|element| (element.id, element.position))
            .collect();

        log::debug!("drag started on {primary} with {} elements", selected.len());
        self.state = GestureState::Dragging(DragSession {
            primary,
            pointer_offset: pointer_world - primary_position,
            initial_positions,
        });
    }

    /// Produces one position update per member for the current pointer
    /// location. Returns an empty batch when no drag is active.
    pub fn update_drag(&mut self, pointer_world: Vec2) -> UpdateBatch {
        let session = match &self.state {
            GestureState::Dragging(session) => session,
            _ => return UpdateBatch::new(),
        };

        let candidate = self.grid.snap_point(pointer_world - session.pointer_offset);
        let primary_start = match session.initial_positions.get(&session.primary) {
            Some(position) => *position,
            None => return UpdateBatch::new(),
        };
        let delta = candidate - primary_start;

        session
            .initial_positions
            .iter()
            .map(|(id, start)| ElementUpdate {
                id: *id,
                position: Some(*start + delta),
                size: None,
            })
            .collect()
    }

    /// Starts a group resize from `handle`, capturing the aggregate box and
    /// each member's placement as fractions of it.
    pub fn begin_resize(&mut self, handle: ResizeHandle, selected: &[Element]) {
        if !self.state.is_idle() {
            log::warn!("ignoring begin_resize while {}", self.state.name());
            return;
        }
        let initial_box = match aggregate_bounds(selected) {
            Some(bounds) => bounds,
            None => return,
        };

        // A fresh host element may legitimately have a zero dimension, so
        // the fractions are derived against a floored size; the degenerate
        // axis then contributes zero, never NaN.
        let box_size = initial_box.size().max(Vec2::splat(f32::EPSILON));
        let placements = selected
            .iter()
            .map(|element| RelativePlacement {
                id: element.id,
                rel_pos: (element.position - initial_box.min) / box_size,
                rel_size: element.size / box_size,
            })
            .collect();

        log::debug!(
            "resize started at {handle:?} over {} elements",
            selected.len()
        );
        self.state = GestureState::Resizing(ResizeSession {
            handle,
            initial_box,
            placements,
        });
    }

    /// Produces one position+size update per member for the cursor's total
    /// movement since gesture start, given in screen units.
    pub fn update_resize(&mut self, screen_delta: Vec2, zoom: f32) -> UpdateBatch {
        let session = match &self.state {
            GestureState::Resizing(session) => session,
            _ => return UpdateBatch::new(),
        };

        let delta = screen_delta / (zoom / 100.0);
        let mut new_box = resize_box(session.handle, session.initial_box, delta, self.min_size);

        if self.grid.enabled {
            new_box = Bounds::from_origin_size(
                self.grid.snap_point(new_box.origin()),
                self.grid.snap_point(new_box.size()),
            );
        }

        let new_size = new_box.size();
        let min = Vec2::splat(self.min_size);

        session
            .placements
            .iter()
            .map(|placement| ElementUpdate {
                id: placement.id,
                position: Some(new_box.min + placement.rel_pos * new_size),
                size: Some((placement.rel_size * new_size).max(min)),
            })
            .collect()
    }

    /// Starts a marquee selection at a pointer-down on empty canvas.
    pub fn begin_marquee(&mut self, anchor: Vec2) {
        if !self.state.is_idle() {
            log::warn!("ignoring begin_marquee while {}", self.state.name());
            return;
        }
        self.state = GestureState::MarqueeSelecting(MarqueeSession {
            anchor,
            cursor: anchor,
        });
    }

    /// Extends the marquee to the current pointer location.
    pub fn update_marquee(&mut self, cursor: Vec2) {
        if let GestureState::MarqueeSelecting(session) = &mut self.state {
            session.cursor = cursor;
        }
    }

    /// The current marquee rectangle, if a marquee is in progress.
    pub fn marquee_bounds(&self) -> Option<Bounds> {
        match &self.state {
            GestureState::MarqueeSelecting(session) => Some(session.bounds()),
            _ => None,
        }
    }

    /// Commits the marquee: hit-tests unlocked elements against it and
    /// returns the ids the caller should select. Ends the gesture.
    pub fn commit_marquee(&mut self, elements: &[Element]) -> Vec<ElementId> {
        let session = match &self.state {
            GestureState::MarqueeSelecting(session) => *session,
            _ => return Vec::new(),
        };

        let marquee = session.bounds();
        let hits = elements
            .iter()
            .filter(|element| !element.locked && element.bounds().intersects(&marquee))
            .map(|element| element.id)
            .collect();

        self.state = GestureState::Idle;
        hits
    }

    /// Normal gesture end on pointer-up; the session is discarded and no
    /// implicit re-snap occurs.
    pub fn end_gesture(&mut self) {
        if !self.state.is_idle() {
            log::debug!("gesture {} ended", self.state.name());
            self.state = GestureState::Idle;
        }
    }

    /// Forced transition back to idle when pointer capture is lost.
    pub fn cancel(&mut self) {
        if !self.state.is_idle() {
            log::debug!("gesture {} cancelled", self.state.name());
            self.state = GestureState::Idle;
        }
    }
}

/// Applies a world-space cursor delta to the edges implicated by `handle`,
/// clamping width and height to `min_size` with the opposite edge held
/// fixed, before any snapping or scale derivation happens.
fn resize_box(handle: ResizeHandle, initial: Bounds, delta: Vec2, min_size: f32) -> Bounds {
    let mut left = initial.min.x;
    let mut top = initial.min.y;
    let mut right = initial.max.x;
    let mut bottom = initial.max.y;

    if handle.moves_left() {
        left += delta.x;
    }
    if handle.moves_right() {
        right += delta.x;
    }
    if handle.moves_top() {
        top += delta.y;
    }
    if handle.moves_bottom() {
        bottom += delta.y;
    }

    if right - left < min_size {
        if handle.moves_left() {
            left = right - min_size;
        } else {
            right = left + min_size;
        }
    }
    if bottom - top < min_size {
        if handle.moves_top() {
            top = bottom - min_size;
        } else {
            bottom = top + min_size;
        }
    }

    Bounds::new(Vec2::new(left, top), Vec2::new(right, bottom))
}
