//! Fast tick: marks the frame dirty

use defmt::*;
use embassy_time::{Duration, Ticker};
use picocalc_core::timer::{DirtyTick, TimerSlot};

use crate::board::DisplayCtx;
use crate::channels::SHUTDOWN;

#[embassy_executor::task]
pub async fn dirty_tick_task(ctx: &'static DisplayCtx, period_ms: u32) {
    let mut slot = TimerSlot::new("dirty", period_ms, DirtyTick::new(ctx));
    info!("Dirty tick task started ({} ms)", slot.period_ms());

    let mut ticker = Ticker::every(Duration::from_millis(u64::from(slot.period_ms())));

    while !SHUTDOWN.is_raised() {
        ticker.next().await;
        slot.fire();
    }
}
