//! Display flush coordination
//!
//! The renderer on core 0 draws into a frame buffer and marks it dirty.
//! The flush worker on core 1 notices, takes the frame lock and pushes the
//! buffer to the LCD.
//!
//! ```text
//! dirty tick ──mark()──▶ DirtyFlag ──take()──▶ FlushWorker
//!                                                 │ lock
//!                                                 ▼
//!                              FrameLock<B> ──flush(&B)──▶ FlushTarget
//! ```

pub mod context;
pub mod dirty;
pub mod frame;
pub mod worker;

pub use context::{DisplayContext, FlushStats, WorkerState};
pub use dirty::DirtyFlag;
pub use frame::FrameLock;
pub use worker::{FlushOutcome, FlushWorker};
