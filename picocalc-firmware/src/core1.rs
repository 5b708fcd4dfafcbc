//! Core 1 bring-up
//!
//! Core 1 runs its own executor with a single task: the flush worker.

use embassy_executor::Executor;
use embassy_rp::multicore::{spawn_core1, Stack};
use embassy_rp::peripherals::CORE1;
use embassy_rp::Peri;
use static_cell::{ConstStaticCell, StaticCell};

use crate::board::{DisplayCtx, Panel, CORE1_STACK_SIZE};
use crate::tasks::flush_task;

static CORE1_STACK: ConstStaticCell<Stack<CORE1_STACK_SIZE>> = ConstStaticCell::new(Stack::new());

static EXECUTOR1: StaticCell<Executor> = StaticCell::new();

/// Start core 1 and run the flush worker on it
pub fn spawn_flush_core(p_core1: Peri<'static, CORE1>, ctx: &'static DisplayCtx, panel: Panel, poll_ms: u32) {
    spawn_core1(p_core1, CORE1_STACK.take(), move || {
        let executor1 = EXECUTOR1.init(Executor::new());
        executor1.run(|spawner| spawner.spawn(flush_task(ctx, panel, poll_ms)).unwrap())
    });
}
