//! Embassy async tasks
//!
//! Each task owns one long-running loop and shares state only through the
//! display context and the statics in `channels`.

pub mod dirty_tick;
pub mod flush;
pub mod header;

pub use dirty_tick::dirty_tick_task;
pub use flush::flush_task;
pub use header::header_task;
