//! Flush worker
//!
//! The only durable task on core 1. Every poll it consumes the dirty flag;
//! if the frame changed it takes the frame lock and pushes the buffer to
//! the panel. A failed transfer re-arms the flag and the loop carries on.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal_async::delay::DelayNs;
use picocalc_hal::FlushTarget;

use super::context::{DisplayContext, WorkerState};
use crate::signal::ShutdownSignal;

/// Result of a single poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlushOutcome {
    /// Flag was clean, nothing sent to the panel
    Idle,
    /// Frame transferred
    Flushed,
    /// Transfer failed; the flag was set again for the next poll
    Retry,
}

/// Polls the dirty flag and performs guarded flushes
pub struct FlushWorker<'a, M: RawMutex, B, T> {
    ctx: &'a DisplayContext<M, B>,
    target: T,
    poll_interval_ms: u32,
}

impl<'a, M, B, T> FlushWorker<'a, M, B, T>
where
    M: RawMutex,
    T: FlushTarget<B>,
{
    /// Create a worker for `ctx` that flushes through `target`
    pub fn new(ctx: &'a DisplayContext<M, B>, target: T, poll_interval_ms: u32) -> Self {
        Self {
            ctx,
            target,
            poll_interval_ms: poll_interval_ms.max(1),
        }
    }

    /// Poll interval in milliseconds
    pub fn poll_interval_ms(&self) -> u32 {
        self.poll_interval_ms
    }

    /// Access the flush target
    pub fn target(&self) -> &T {
        &self.target
    }

    /// One poll: consume the flag, flush under the frame lock if it was set
    ///
    /// The lock is held across the whole hardware call, so a flush never
    /// overlaps another flush or a renderer holding the buffer.
    pub async fn try_consume_and_flush(&mut self) -> FlushOutcome {
        if !self.ctx.dirty().take() {
            self.ctx.record_skip();
            return FlushOutcome::Idle;
        }

        let frame = self.ctx.frame().lock().await;
        self.ctx.set_worker_state(WorkerState::Flushing);
        let result = self.target.flush(&frame);
        self.ctx.set_worker_state(WorkerState::Idle);
        drop(frame);

        match result {
            Ok(()) => {
                self.ctx.record_flush();
                FlushOutcome::Flushed
            }
            Err(_) => {
                self.ctx.dirty().mark();
                self.ctx.record_failure();
                #[cfg(feature = "defmt")]
                defmt::warn!("Display flush failed, retrying next poll");
                FlushOutcome::Retry
            }
        }
    }

    /// Run until `shutdown` is raised
    ///
    /// The firmware passes a signal nobody raises, so on hardware this
    /// never returns.
    pub async fn run<D: DelayNs>(&mut self, delay: &mut D, shutdown: &ShutdownSignal) {
        while !shutdown.is_raised() {
            self.try_consume_and_flush().await;
            delay.delay_ms(self.poll_interval_ms).await;
        }
    }
}
