//! Cursor state tracking
//!
//! Holds the one-step cursor history (previous/current rectangle), the
//! preset anchor table used by auto-cycle mode, and the publishing of both
//! rectangles to every registered render target.

pub mod presets;
pub mod tracker;
pub mod types;

pub use presets::{Anchor, PresetCursor, PresetMove, DEFAULT_PRESETS};
pub use tracker::{CursorState, CursorTracker};
pub use types::{CanvasSize, CursorRect};
