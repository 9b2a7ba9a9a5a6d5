//! Selection and transform engine: aggregate bounds over the current
//! selection, rigid group drag, proportional group resize, and marquee
//! selection, all driven through one explicit gesture state machine.

pub mod controller;
pub mod handle;
pub mod selection;
pub mod session;

pub use controller::{ElementUpdate, GestureController, UpdateBatch, DEFAULT_MIN_ELEMENT_SIZE};
pub use handle::ResizeHandle;
pub use selection::{aggregate_bounds, Selection};
pub use session::{DragSession, GestureState, MarqueeSession, RelativePlacement, ResizeSession};
