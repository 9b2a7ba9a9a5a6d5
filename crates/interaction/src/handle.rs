//! Resize handle positions on the selection's aggregate box.

use strum_macros::EnumIter;

/// One of the eight resize affordances: four corners and four edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum ResizeHandle {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

impl ResizeHandle {
    /// Returns the opposite handle (the anchor that stays fixed during a
    /// resize from this handle)
    pub fn opposite(&self) -> Self {
        match self {
            ResizeHandle::TopLeft => ResizeHandle::BottomRight,
            ResizeHandle::Top => ResizeHandle::Bottom,
            ResizeHandle::TopRight => ResizeHandle::BottomLeft,
            ResizeHandle::Right => ResizeHandle::Left,
            ResizeHandle::BottomRight => ResizeHandle::TopLeft,
            ResizeHandle::Bottom => ResizeHandle::Top,
            ResizeHandle::BottomLeft => ResizeHandle::TopRight,
            ResizeHandle::Left => ResizeHandle::Right,
        }
    }

    /// Returns true if dragging this handle moves the left edge
    pub fn moves_left(&self) -> bool {
        matches!(
            self,
            ResizeHandle::TopLeft | ResizeHandle::Left | ResizeHandle::BottomLeft
        )
    }

    /// Returns true if dragging this handle moves the right edge
    pub fn moves_right(&self) -> bool {
        matches!(
            self,
            ResizeHandle::TopRight | ResizeHandle::Right | ResizeHandle::BottomRight
        )
    }

    /// Returns true if dragging this handle moves the top edge
    pub fn moves_top(&self) -> bool {
        matches!(
            self,
            ResizeHandle::TopLeft | ResizeHandle::Top | ResizeHandle::TopRight
        )
    }

    /// Returns true if dragging this handle moves the bottom edge
    pub fn moves_bottom(&self) -> bool {
        matches!(
            self,
            ResizeHandle::BottomLeft | ResizeHandle::Bottom | ResizeHandle::BottomRight
        )
    }
}
