//! Core types shared by the planning board engine.
//!
//! Everything in this crate is plain data in world (canvas-logical)
//! coordinates: axis-aligned bounds, the element record the host owns,
//! grid snapping, and the viewport description the renderer queries with.

pub mod bounds;
pub mod element;
pub mod grid;
pub mod viewport;

pub use bounds::Bounds;
pub use element::{Element, ElementId};
pub use grid::GridSettings;
pub use viewport::Viewport;
