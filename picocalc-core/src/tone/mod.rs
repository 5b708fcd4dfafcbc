//! Cooperative tone playback
//!
//! A tone task configures a PWM output at ~50% duty, suspends for the tone
//! duration and then disables the output. Tasks are composed sequentially
//! or as an overlapping stereo pair.
//!
//! Two call styles are offered:
//!
//! - `*_async` functions, for code already running on an executor
//! - blocking wrappers on [`ToneScheduler`], which start a fresh executor
//!   and run it to completion
//!
//! The blocking wrappers go through their core's [`SchedulerGuard`]. Calling one while
//! a scheduler is already active on the same core returns
//! [`ToneError::Reentrant`] instead of nesting executors.
//!
//! ```text
//!   task ──► play_tone_async ──┐
//!                              ├──► tone_task ──► ToneOutput
//!   caller ──► ToneScheduler ──┘        │
//!              (guard check)            └──► DelayNs::delay_ms
//! ```

mod error;
mod guard;
mod play;
mod request;
mod scheduler;
mod speakers;

pub use error::ToneError;
pub use guard::{Core, Reentrant, SchedulerGuard, SchedulerHandle};
pub use play::{play_pair_async, play_tone_async, play_tones_async, tone_task};
pub use request::{ToneRequest, ToneSequence};
pub use scheduler::ToneScheduler;
pub use speakers::{SpeakerBank, StereoSpeakers};
