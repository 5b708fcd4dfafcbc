//! Display context shared by both execution contexts
//!
//! One of these is built at boot (usually in a `StaticCell`) and handed by
//! reference to the dirty tick, the renderer and the flush worker. It
//! replaces free-floating globals for the flag, the buffer and its lock.

use embassy_sync::blocking_mutex::raw::RawMutex;
use portable_atomic::{AtomicBool, AtomicU32, Ordering};

use super::dirty::DirtyFlag;
use super::frame::FrameLock;

/// Flush worker state as seen from the other core
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WorkerState {
    /// Waiting for the next poll
    Idle,
    /// Frame lock held, hardware transfer in progress
    Flushing,
}

/// Counters kept by the flush worker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FlushStats {
    /// Successful transfers
    pub flushes: u32,
    /// Failed transfers (each one re-armed the dirty flag)
    pub failures: u32,
    /// Polls that found the flag clean
    pub skipped_polls: u32,
}

/// Everything the renderer, the dirty tick and the flush worker share
pub struct DisplayContext<M: RawMutex, B> {
    dirty: DirtyFlag,
    frame: FrameLock<M, B>,
    flushing: AtomicBool,
    flushes: AtomicU32,
    failures: AtomicU32,
    skipped_polls: AtomicU32,
}

impl<M: RawMutex, B> DisplayContext<M, B> {
    /// Build a context around the renderer's frame buffer
    pub const fn new(buffer: B) -> Self {
        Self {
            dirty: DirtyFlag::new(),
            frame: FrameLock::new(buffer),
            flushing: AtomicBool::new(false),
            flushes: AtomicU32::new(0),
            failures: AtomicU32::new(0),
            skipped_polls: AtomicU32::new(0),
        }
    }

    /// Request a flush on the next worker poll
    ///
    /// Non-blocking; safe from the fast periodic tick.
    pub fn mark_dirty(&self) {
        self.dirty.mark();
    }

    /// The dirty flag
    pub fn dirty(&self) -> &DirtyFlag {
        &self.dirty
    }

    /// The locked frame buffer
    pub fn frame(&self) -> &FrameLock<M, B> {
        &self.frame
    }

    /// Current worker state
    pub fn worker_state(&self) -> WorkerState {
        if self.flushing.load(Ordering::Acquire) {
            WorkerState::Flushing
        } else {
            WorkerState::Idle
        }
    }

    /// Snapshot of the flush counters
    pub fn stats(&self) -> FlushStats {
        FlushStats {
            flushes: self.flushes.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            skipped_polls: self.skipped_polls.load(Ordering::Relaxed),
        }
    }

    pub(crate) fn set_worker_state(&self, state: WorkerState) {
        self.flushing
            .store(state == WorkerState::Flushing, Ordering::Release);
    }

    pub(crate) fn record_flush(&self) {
        self.flushes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_skip(&self) {
        self.skipped_polls.fetch_add(1, Ordering::Relaxed);
    }
}
