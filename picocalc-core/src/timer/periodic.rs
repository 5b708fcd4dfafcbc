//! Timer callback boundary

use core::convert::Infallible;

use embassy_sync::blocking_mutex::raw::RawMutex;

use crate::display::DisplayContext;

/// Work done on every timer expiry
pub trait PeriodicCallback {
    /// Error type reported by a failed tick
    type Error;

    /// Called once per period
    fn on_tick(&mut self) -> Result<(), Self::Error>;
}

/// What happened on one expiry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickReport {
    /// Callback returned `Ok`
    Completed,
    /// Callback failed; the error was logged and dropped
    Failed,
}

/// A timer's callback plus its bookkeeping
pub struct TimerSlot<C> {
    name: &'static str,
    period_ms: u32,
    callback: C,
    fired: u32,
    failures: u32,
}

impl<C: PeriodicCallback> TimerSlot<C> {
    /// Register `callback` to run every `period_ms`
    pub fn new(name: &'static str, period_ms: u32, callback: C) -> Self {
        Self {
            name,
            period_ms: period_ms.max(1),
            callback,
            fired: 0,
            failures: 0,
        }
    }

    /// Run the callback for one expiry
    ///
    /// Errors stop here. The timer keeps its schedule either way.
    pub fn fire(&mut self) -> TickReport {
        self.fired = self.fired.wrapping_add(1);
        match self.callback.on_tick() {
            Ok(()) => TickReport::Completed,
            Err(_) => {
                self.failures = self.failures.wrapping_add(1);
                #[cfg(feature = "defmt")]
                defmt::warn!("{} timer callback failed ({} so far)", self.name, self.failures);
                TickReport::Failed
            }
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    /// Number of expiries handled
    pub fn fired(&self) -> u32 {
        self.fired
    }

    /// Number of expiries whose callback failed
    pub fn failures(&self) -> u32 {
        self.failures
    }

    pub fn callback(&self) -> &C {
        &self.callback
    }

    pub fn callback_mut(&mut self) -> &mut C {
        &mut self.callback
    }
}

/// Fast tick: marks the frame dirty and nothing else
pub struct DirtyTick<'a, M: RawMutex, B> {
    ctx: &'a DisplayContext<M, B>,
}

impl<'a, M: RawMutex, B> DirtyTick<'a, M, B> {
    pub fn new(ctx: &'a DisplayContext<M, B>) -> Self {
        Self { ctx }
    }
}

impl<M: RawMutex, B> PeriodicCallback for DirtyTick<'_, M, B> {
    type Error = Infallible;

    fn on_tick(&mut self) -> Result<(), Self::Error> {
        self.ctx.mark_dirty();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

    struct Flaky {
        calls: u32,
    }

    impl PeriodicCallback for Flaky {
        type Error = ();

        fn on_tick(&mut self) -> Result<(), ()> {
            self.calls += 1;
            if self.calls % 2 == 0 {
                Err(())
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn test_failing_callback_keeps_firing() {
        let mut slot = TimerSlot::new("flaky", 100, Flaky { calls: 0 });

        assert_eq!(slot.fire(), TickReport::Completed);
        assert_eq!(slot.fire(), TickReport::Failed);
        assert_eq!(slot.fire(), TickReport::Completed);
        assert_eq!(slot.fire(), TickReport::Failed);

        assert_eq!(slot.fired(), 4);
        assert_eq!(slot.failures(), 2);
        assert_eq!(slot.callback().calls, 4);
    }

    #[test]
    fn test_dirty_tick_is_idempotent() {
        let ctx: DisplayContext<CriticalSectionRawMutex, ()> = DisplayContext::new(());
        let mut slot = TimerSlot::new("dirty", 25, DirtyTick::new(&ctx));

        assert_eq!(slot.fire(), TickReport::Completed);
        assert_eq!(slot.fire(), TickReport::Completed);
        assert!(ctx.dirty().take());
        assert!(!ctx.dirty().take());
    }

    #[test]
    fn test_zero_period_is_clamped() {
        let slot = TimerSlot::new("x", 0, Flaky { calls: 0 });
        assert_eq!(slot.period_ms(), 1);
    }
}
