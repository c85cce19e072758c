//! Cursor session
//!
//! Owns the tracker, the preset cycle, the mode and the single repeating
//! timer, and routes input events to cursor operations. Everything runs on
//! one task; each event is handled to completion before the next.

pub mod driver;
pub mod input;
pub mod layout;
pub mod mode;
pub mod timer;

pub use driver::{CursorSession, Outcome, SessionError, SessionResult};
pub use input::{forward_lines, parse_line, InputEvent, ParseEventError};
pub use layout::{Layout, TracingLayout};
pub use mode::Mode;
pub use timer::{Tick, TickTimer};
