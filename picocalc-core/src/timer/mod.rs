//! Periodic signal sources
//!
//! Two independent timers drive the display side of the system:
//!
//! - the dirty tick (every ~25 ms) marks the frame for flushing
//! - the header tick (every ~5 s) repaints the two-line status header
//!
//! Callbacks run inside a [`TimerSlot`], which swallows and counts their
//! errors so a failing callback never stops its timer.

pub mod header;
pub mod periodic;

pub use header::{compose_lines, extract_version, EditorState, HeaderError, HeaderOutcome, HeaderRefresher};
pub use periodic::{DirtyTick, PeriodicCallback, TickReport, TimerSlot};
