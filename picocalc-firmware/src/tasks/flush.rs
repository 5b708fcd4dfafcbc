//! Flush worker task
//!
//! Spawned on core 1 when multithreading is enabled, otherwise on the main
//! executor.

use defmt::*;
use embassy_time::Delay;
use picocalc_core::display::FlushWorker;

use crate::board::{DisplayCtx, Panel};
use crate::channels::SHUTDOWN;

#[embassy_executor::task]
pub async fn flush_task(ctx: &'static DisplayCtx, panel: Panel, poll_ms: u32) {
    let mut worker = FlushWorker::new(ctx, panel, poll_ms);
    info!("Flush worker started ({} ms poll)", worker.poll_interval_ms());

    worker.run(&mut Delay, &SHUTDOWN).await;

    info!("Flush worker stopped");
}
