//! Fake hardware for host tests

use core::cell::{Cell, RefCell};
use core::future::poll_fn;
use core::task::Poll;
use std::rc::Rc;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::Arc;
use std::vec::Vec;

use embassy_futures::yield_now;
use embedded_hal_async::delay::DelayNs;
use picocalc_hal::{FlushTarget, I2cBus, PinId, ToneOutput};

// Links the std critical-section implementation used by embassy-sync.
use critical_section as _;

/// Panel error returned by [`MockPanel`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelFault;

/// Flush target that counts transfers and tracks overlap
#[derive(Clone, Default)]
pub struct MockPanel {
    pub flushes: Arc<AtomicU32>,
    pub attempts: Arc<AtomicU32>,
    pub fail_remaining: Arc<AtomicU32>,
    pub in_flight: Arc<AtomicUsize>,
    pub max_in_flight: Arc<AtomicUsize>,
    pub hold_us: u64,
}

impl MockPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next `count` flush calls
    pub fn failing(count: u32) -> Self {
        let panel = Self::new();
        panel.fail_remaining.store(count, Ordering::SeqCst);
        panel
    }

    /// Spend `hold_us` inside each flush so overlaps are visible
    pub fn slow(hold_us: u64) -> Self {
        Self {
            hold_us,
            ..Self::default()
        }
    }

    pub fn flush_count(&self) -> u32 {
        self.flushes.load(Ordering::SeqCst)
    }

    pub fn attempt_count(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl<B: ?Sized> FlushTarget<B> for MockPanel {
    type Error = PanelFault;

    fn flush(&mut self, _buffer: &B) -> Result<(), Self::Error> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if self.hold_us > 0 {
            std::thread::sleep(std::time::Duration::from_micros(self.hold_us));
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let failed = self
            .fail_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failed {
            Err(PanelFault)
        } else {
            self.flushes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }
}

/// Everything a tone test can observe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneEvent {
    Configure { pin: PinId, frequency_hz: u32, at_ms: u64 },
    Duty { pin: PinId, level: u16 },
    Disable { pin: PinId, at_ms: u64 },
}

/// Shared virtual clock and event log
#[derive(Clone, Default)]
pub struct ToneLog {
    pub now_ms: Rc<Cell<u64>>,
    pub events: Rc<RefCell<Vec<ToneEvent>>>,
    /// Wake times of delays still sleeping
    sleepers: Rc<RefCell<Vec<u64>>>,
}

impl ToneLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ToneEvent> {
        self.events.borrow().clone()
    }

    pub fn configure_count(&self) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|e| matches!(e, ToneEvent::Configure { .. }))
            .count()
    }

    fn push(&self, event: ToneEvent) {
        self.events.borrow_mut().push(event);
    }

    /// Wake the sleeper due at `deadline` if it is due or the earliest
    ///
    /// The clock only moves forward, to the earliest pending deadline.
    fn try_wake(&self, deadline: u64) -> bool {
        let mut sleepers = self.sleepers.borrow_mut();
        let earliest = sleepers.iter().copied().min();
        if deadline > self.now_ms.get() && earliest != Some(deadline) {
            return false;
        }
        if let Some(i) = sleepers.iter().position(|&d| d == deadline) {
            sleepers.remove(i);
        }
        self.now_ms.set(self.now_ms.get().max(deadline));
        true
    }
}

/// Output configuration error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PwmFault;

/// PWM output that logs into a [`ToneLog`]
pub struct MockTone {
    pin: PinId,
    log: ToneLog,
    max_frequency_hz: u32,
}

impl MockTone {
    pub fn new(pin: u8, log: &ToneLog) -> Self {
        Self {
            pin: PinId(pin),
            log: log.clone(),
            max_frequency_hz: 20_000,
        }
    }
}

impl ToneOutput for MockTone {
    type Error = PwmFault;

    fn pin(&self) -> PinId {
        self.pin
    }

    fn configure(&mut self, frequency_hz: u32) -> Result<(), Self::Error> {
        if frequency_hz > self.max_frequency_hz {
            return Err(PwmFault);
        }
        self.log.push(ToneEvent::Configure {
            pin: self.pin,
            frequency_hz,
            at_ms: self.log.now_ms.get(),
        });
        Ok(())
    }

    fn set_duty(&mut self, level: u16) {
        self.log.push(ToneEvent::Duty {
            pin: self.pin,
            level,
        });
    }

    fn disable(&mut self) {
        self.log.push(ToneEvent::Disable {
            pin: self.pin,
            at_ms: self.log.now_ms.get(),
        });
    }
}

/// Delay running on the virtual clock
///
/// Each sleep wakes at `now + ms`. Sleeps started in the same poll pass run
/// concurrently, so two 100 ms sleeps under `join` both end at 100 ms.
#[derive(Clone)]
pub struct MockDelay {
    log: ToneLog,
}

impl MockDelay {
    pub fn new(log: &ToneLog) -> Self {
        Self { log: log.clone() }
    }

    async fn advance(&mut self, ms: u64) {
        let deadline = self.log.now_ms.get() + ms;
        self.log.sleepers.borrow_mut().push(deadline);
        // Let sibling tasks register their own sleeps first.
        yield_now().await;
        poll_fn(|cx| {
            if self.log.try_wake(deadline) {
                Poll::Ready(())
            } else {
                cx.waker().wake_by_ref();
                Poll::Pending
            }
        })
        .await
    }
}

impl DelayNs for MockDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.advance(u64::from(ns) / 1_000_000).await;
    }

    async fn delay_us(&mut self, us: u32) {
        self.advance(u64::from(us) / 1_000).await;
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.advance(u64::from(ms)).await;
    }
}

/// Delay that returns immediately (for worker loops)
#[derive(Clone, Default)]
pub struct NoDelay {
    pub calls: u32,
}

impl DelayNs for NoDelay {
    async fn delay_ns(&mut self, _ns: u32) {
        self.calls += 1;
        yield_now().await;
    }
}

/// I2C error returned by [`MockI2c`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusFault;

/// I2C bus that answers reads from a canned reply
#[derive(Default)]
pub struct MockI2c {
    pub reply: Vec<u8>,
    pub writes: Vec<(u8, Vec<u8>)>,
    pub fail: bool,
}

impl MockI2c {
    pub fn replying(reply: &[u8]) -> Self {
        Self {
            reply: reply.to_vec(),
            ..Self::default()
        }
    }
}

impl I2cBus for MockI2c {
    type Error = BusFault;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        if self.fail {
            return Err(BusFault);
        }
        self.writes.push((address, data.to_vec()));
        Ok(())
    }

    fn read(&mut self, _address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        if self.fail {
            return Err(BusFault);
        }
        for (dst, src) in buf.iter_mut().zip(self.reply.iter()) {
            *dst = *src;
        }
        Ok(())
    }
}
