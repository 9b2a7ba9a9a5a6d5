//! Spatial indexing for the board: a quadtree over axis-aligned bounds and
//! the viewport-culling façade the renderer queries each frame.

pub mod culling;
pub mod quadtree;

pub use culling::{PerformanceStats, ViewportCulling};
pub use quadtree::{QuadTree, QuadTreeConfig};
