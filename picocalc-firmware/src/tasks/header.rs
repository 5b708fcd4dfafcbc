//! Slow tick: repaints the status header

use defmt::*;
use embassy_time::{Duration, Ticker};
use picocalc_core::timer::{TickReport, TimerSlot};

use crate::board::{DisplayCtx, Header};
use crate::channels::SHUTDOWN;

/// Paint once at boot, then on every tick
#[embassy_executor::task]
pub async fn header_task(header: Header, ctx: &'static DisplayCtx, period_ms: u32) {
    let mut slot = TimerSlot::new("header", period_ms, header);
    info!("Header task started ({} ms)", slot.period_ms());

    slot.fire();
    let mut ticker = Ticker::every(Duration::from_millis(u64::from(slot.period_ms())));

    while !SHUTDOWN.is_raised() {
        ticker.next().await;
        if slot.fire() == TickReport::Failed {
            warn!("Header refresh failed, terminal pipe full?");
        }
        trace!("flush stats: {}", ctx.stats());
    }
}
