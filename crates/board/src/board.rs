//! Host-facing façade over the board engine.
//!
//! `Board` owns the authoritative element list, keeps the culling index in
//! sync with it, and routes pointer events through the gesture controller.
//! Element order is z-order, back to front; hit-testing walks it in
//! reverse and skips locked elements. Every per-element change produced by
//! a gesture is forwarded to the host's `on_update` callback; the host is
//! responsible for batching those into its own undo history.

pub mod config;
pub mod logger;

use glam::Vec2;

use interaction::{GestureController, UpdateBatch};
use spatial::ViewportCulling;

pub use board_core::{Bounds, Element, ElementId, GridSettings, Viewport};
pub use config::BoardConfig;
pub use interaction::{ElementUpdate, GestureState, ResizeHandle, Selection};
pub use logger::BoardLogger;
pub use spatial::PerformanceStats;

/// Callback invoked once per affected element per move event.
pub type UpdateCallback = Box<dyn FnMut(&ElementUpdate)>;

/// The planning board engine as the host embeds it.
pub struct Board {
    /// All elements, in z-order (back to front)
    elements: Vec<Element>,
    selection: Selection,
    culling: ViewportCulling,
    controller: GestureController,
    config: BoardConfig,
    /// Screen position of the active gesture's pointer-down
    pointer_down_screen: Option<Vec2>,
    on_update: Option<UpdateCallback>,
}

impl Board {
    pub fn new() -> Self {
        Self::with_config(BoardConfig::default())
    }

    pub fn with_config(config: BoardConfig) -> Self {
        let controller =
            GestureController::new(config.grid).with_min_size(config.min_element_size);
        Self {
            elements: Vec::new(),
            selection: Selection::new(),
            culling: ViewportCulling::new(),
            controller,
            config,
            pointer_down_screen: None,
            on_update: None,
        }
    }

    /// Registers the host callback that receives element updates.
    pub fn set_on_update(&mut self, callback: UpdateCallback) {
        self.on_update = Some(callback);
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Updates the grid configuration for subsequent gestures.
    pub fn set_grid(&mut self, grid: GridSettings) {
        self.config.grid = grid;
        self.controller.set_grid(grid);
    }

    // --- element store ---------------------------------------------------

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|element| element.id == id)
    }

    /// Adds an element on top of the z-order.
    pub fn add_element(&mut self, element: Element) {
        self.elements.push(element);
        self.culling.update_elements(&self.elements);
    }

    /// Replaces the whole element set.
    pub fn set_elements(&mut self, elements: Vec<Element>) {
        self.elements = elements;
        self.selection.clear();
        self.culling.update_elements(&self.elements);
    }

    /// Replaces an element's record in place, keeping its z-position; an
    /// unknown id is added on top of the z-order instead.
    pub fn update_element(&mut self, element: Element) {
        match self.elements.iter_mut().find(|e| e.id == element.id) {
            Some(existing) => *existing = element,
            None => self.elements.push(element),
        }
        self.culling.update_elements(&self.elements);
    }

    pub fn remove_element(&mut self, id: ElementId) {
        if let Some(index) = self.elements.iter().position(|e| e.id == id) {
            self.elements.remove(index);
            self.selection.remove(id);
            self.culling.update_elements(&self.elements);
        }
    }

    // --- rendering support ------------------------------------------------

    /// The elements the renderer should draw for this viewport, in no
    /// particular order.
    pub fn visible_elements(&self, viewport: &Viewport) -> Vec<Element> {
        self.culling.visible_elements(viewport)
    }

    pub fn is_element_visible(&self, id: ElementId, viewport: &Viewport) -> bool {
        self.culling.is_element_visible(id, viewport)
    }

    pub fn stats(&self) -> PerformanceStats {
        self.culling.stats()
    }

    // --- selection --------------------------------------------------------

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected_elements(&self) -> Vec<Element> {
        self.selection
            .members(&self.elements)
            .into_iter()
            .cloned()
            .collect()
    }

    /// The topmost unlocked element at a world point.
    pub fn hit_test(&self, point: Vec2) -> Option<ElementId> {
        self.elements
            .iter()
            .rev()
            .find(|element| !element.locked && element.contains_point(point))
            .map(|element| element.id)
    }

    // --- gestures ---------------------------------------------------------

    pub fn gesture(&self) -> &GestureState {
        self.controller.state()
    }

    /// The in-progress marquee rectangle, for rendering the selection box.
    pub fn marquee_bounds(&self) -> Option<Bounds> {
        self.controller.marquee_bounds()
    }

    /// Pointer-down in world and screen coordinates. A hit starts a drag
    /// on the (possibly updated) selection; empty canvas starts a marquee.
    pub fn pointer_down(&mut self, world: Vec2, screen: Vec2, multi: bool) {
        match self.hit_test(world) {
            Some(id) => {
                self.selection.click(id, multi);
                // A modifier-click can toggle the element out of the
                // selection; only a still-selected element starts a drag.
                if self.selection.is_selected(id) {
                    let selected = self.selected_elements();
                    self.controller.begin_drag(id, world, &selected);
                }
            }
            None => {
                if !multi {
                    self.selection.clear();
                }
                self.controller.begin_marquee(world);
            }
        }
        self.pointer_down_screen = Some(screen);
    }

    /// Starts a resize of the current selection from a handle. The screen
    /// position seeds the cursor delta for later moves.
    pub fn begin_resize(&mut self, handle: ResizeHandle, screen: Vec2) {
        let selected = self.selected_elements();
        self.controller.begin_resize(handle, &selected);
        self.pointer_down_screen = Some(screen);
    }

    /// Pointer movement during a gesture. `zoom` is the viewport zoom
    /// percentage used to scale resize deltas to world units.
    pub fn pointer_move(&mut self, world: Vec2, screen: Vec2, zoom: f32) {
        let updates = if matches!(self.controller.state(), GestureState::Dragging(_)) {
            self.controller.update_drag(world)
        } else if matches!(self.controller.state(), GestureState::Resizing(_)) {
            let down = match self.pointer_down_screen {
                Some(down) => down,
                None => return,
            };
            self.controller.update_resize(screen - down, zoom)
        } else if matches!(self.controller.state(), GestureState::MarqueeSelecting(_)) {
            self.controller.update_marquee(world);
            return;
        } else {
            return;
        };
        self.apply_updates(updates);
    }

    /// Pointer-up: commits a marquee or ends the active drag/resize.
    pub fn pointer_up(&mut self) {
        if matches!(self.controller.state(), GestureState::MarqueeSelecting(_)) {
            let hits = self.controller.commit_marquee(&self.elements);
            self.selection.replace_with(hits);
        } else {
            self.controller.end_gesture();
        }
        self.pointer_down_screen = None;
    }

    /// Forces the gesture machine back to idle, discarding session state.
    /// Call when pointer capture is lost mid-gesture.
    pub fn cancel_gesture(&mut self) {
        self.controller.cancel();
        self.pointer_down_screen = None;
    }

    fn apply_updates(&mut self, updates: UpdateBatch) {
        if updates.is_empty() {
            return;
        }

        for update in &updates {
            if let Some(element) = self.elements.iter_mut().find(|e| e.id == update.id) {
                if let Some(position) = update.position {
                    element.position = position;
                }
                if let Some(size) = update.size {
                    element.size = size;
                }
            }
        }

        if let Some(callback) = &mut self.on_update {
            for update in &updates {
                callback(update);
            }
        }

        // One index rebuild per move event, not one per element.
        self.culling.update_elements(&self.elements);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn element(id: u128, x: f32, y: f32, w: f32, h: f32) -> Element {
        Element {
            id: ElementId::from_u128(id),
            position: vec2(x, y),
            size: vec2(w, h),
            locked: false,
        }
    }

    fn board_no_snap() -> Board {
        Board::with_config(BoardConfig {
            grid: GridSettings::new(24.0, false),
            ..BoardConfig::default()
        })
    }

    #[test]
    fn test_pointer_down_selects_and_drags() {
        let mut board = board_no_snap();
        board.add_element(element(1, 0.0, 0.0, 50.0, 50.0));
        board.add_element(element(2, 100.0, 0.0, 50.0, 50.0));

        let updates: Rc<RefCell<Vec<ElementUpdate>>> = Rc::default();
        let sink = updates.clone();
        board.set_on_update(Box::new(move |update| sink.borrow_mut().push(*update)));

        board.pointer_down(vec2(10.0, 10.0), vec2(10.0, 10.0), false);
        assert!(board.selection().is_selected(ElementId::from_u128(1)));
        assert!(matches!(board.gesture(), GestureState::Dragging(_)));

        board.pointer_move(vec2(40.0, 10.0), vec2(40.0, 10.0), 100.0);
        board.pointer_up();

        assert_eq!(
            board.element(ElementId::from_u128(1)).unwrap().position,
            vec2(30.0, 0.0)
        );
        // The unselected element did not move.
        assert_eq!(
            board.element(ElementId::from_u128(2)).unwrap().position,
            vec2(100.0, 0.0)
        );
        assert_eq!(updates.borrow().len(), 1);
        assert!(board.gesture().is_idle());
    }

    #[test]
    fn test_deselecting_click_does_not_start_drag() {
        let mut board = board_no_snap();
        board.add_element(element(1, 0.0, 0.0, 50.0, 50.0));
        board.add_element(element(2, 100.0, 0.0, 50.0, 50.0));

        board.pointer_down(vec2(10.0, 10.0), vec2(10.0, 10.0), false);
        board.pointer_up();
        board.pointer_down(vec2(110.0, 10.0), vec2(110.0, 10.0), true);
        board.pointer_up();
        assert_eq!(board.selection().len(), 2);

        // Modifier-click on a member toggles it out; no drag begins.
        board.pointer_down(vec2(110.0, 10.0), vec2(110.0, 10.0), true);
        assert!(board.gesture().is_idle());
        assert!(!board.selection().is_selected(ElementId::from_u128(2)));
        assert!(board.selection().is_selected(ElementId::from_u128(1)));
        board.pointer_up();
    }

    #[test]
    fn test_update_element_upserts_unknown_on_top() {
        let mut board = board_no_snap();
        board.add_element(element(1, 0.0, 0.0, 50.0, 50.0));

        // Known id: replaced in place.
        board.update_element(element(1, 10.0, 10.0, 50.0, 50.0));
        assert_eq!(board.elements().len(), 1);
        assert_eq!(
            board.element(ElementId::from_u128(1)).unwrap().position,
            vec2(10.0, 10.0)
        );

        // Unknown id: lands on top of the z-order.
        board.update_element(element(2, 20.0, 20.0, 50.0, 50.0));
        assert_eq!(board.elements().len(), 2);
        assert_eq!(
            board.hit_test(vec2(30.0, 30.0)),
            Some(ElementId::from_u128(2))
        );
    }

    #[test]
    fn test_topmost_element_wins_hit_test() {
        let mut board = board_no_snap();
        board.add_element(element(1, 0.0, 0.0, 50.0, 50.0));
        board.add_element(element(2, 25.0, 25.0, 50.0, 50.0));

        assert_eq!(
            board.hit_test(vec2(30.0, 30.0)),
            Some(ElementId::from_u128(2))
        );
    }

    #[test]
    fn test_locked_element_cannot_start_drag() {
        let mut board = board_no_snap();
        board.add_element(element(1, 0.0, 0.0, 50.0, 50.0).with_locked(true));

        board.pointer_down(vec2(10.0, 10.0), vec2(10.0, 10.0), false);

        // The click fell through to the canvas and started a marquee.
        assert!(matches!(board.gesture(), GestureState::MarqueeSelecting(_)));
        assert!(board.selection().is_empty());
        board.pointer_up();
    }

    #[test]
    fn test_marquee_selects_region() {
        let mut board = board_no_snap();
        board.add_element(element(1, 10.0, 10.0, 20.0, 20.0));
        board.add_element(element(2, 300.0, 300.0, 20.0, 20.0));

        board.pointer_down(vec2(-5.0, -5.0), vec2(-5.0, -5.0), false);
        board.pointer_move(vec2(50.0, 50.0), vec2(50.0, 50.0), 100.0);
        assert!(board.marquee_bounds().is_some());
        board.pointer_up();

        assert!(board.selection().is_selected(ElementId::from_u128(1)));
        assert!(!board.selection().is_selected(ElementId::from_u128(2)));
        assert!(board.gesture().is_idle());
    }

    #[test]
    fn test_group_resize_through_facade() {
        let mut board = board_no_snap();
        board.add_element(element(1, 0.0, 0.0, 100.0, 100.0));
        board.add_element(element(2, 25.0, 25.0, 25.0, 25.0));

        board.pointer_down(vec2(50.0, 90.0), vec2(50.0, 90.0), false);
        board.pointer_up();
        board.pointer_down(vec2(30.0, 30.0), vec2(30.0, 30.0), true);
        board.pointer_up();
        assert_eq!(board.selection().len(), 2);

        board.begin_resize(ResizeHandle::BottomRight, vec2(100.0, 100.0));
        board.pointer_move(vec2(150.0, 150.0), vec2(150.0, 150.0), 100.0);
        board.pointer_up();

        let outer = board.element(ElementId::from_u128(1)).unwrap();
        assert_eq!(outer.size, vec2(150.0, 150.0));
        let inner = board.element(ElementId::from_u128(2)).unwrap();
        assert_eq!(inner.position, vec2(37.5, 37.5));
        assert_eq!(inner.size, vec2(37.5, 37.5));
    }

    #[test]
    fn test_drag_keeps_index_in_sync() {
        let mut board = board_no_snap();
        board.add_element(element(1, 0.0, 0.0, 50.0, 50.0));

        let viewport = Viewport::new(vec2(0.0, 0.0), vec2(200.0, 200.0)).with_margin(0.0);
        assert_eq!(board.visible_elements(&viewport).len(), 1);

        board.pointer_down(vec2(10.0, 10.0), vec2(10.0, 10.0), false);
        board.pointer_move(vec2(1000.0, 1000.0), vec2(1000.0, 1000.0), 100.0);
        board.pointer_up();

        assert!(board.visible_elements(&viewport).is_empty());
    }

    #[test]
    fn test_cancel_discards_gesture() {
        let mut board = board_no_snap();
        board.add_element(element(1, 0.0, 0.0, 50.0, 50.0));

        board.pointer_down(vec2(10.0, 10.0), vec2(10.0, 10.0), false);
        board.cancel_gesture();
        assert!(board.gesture().is_idle());

        // Moves after cancellation change nothing.
        board.pointer_move(vec2(500.0, 500.0), vec2(500.0, 500.0), 100.0);
        assert_eq!(
            board.element(ElementId::from_u128(1)).unwrap().position,
            vec2(0.0, 0.0)
        );
    }
}
