//! Uptime clock for the header
//!
//! Wall-clock sync (RTC, NTP) belongs to the shell; until then the header
//! shows time since boot.

use embassy_time::Instant;
use picocalc_core::status::{Clock, TimeOfDay};

pub struct UptimeClock {
    boot: Instant,
}

impl UptimeClock {
    pub fn new() -> Self {
        Self { boot: Instant::now() }
    }
}

impl Clock for UptimeClock {
    fn now(&mut self) -> TimeOfDay {
        TimeOfDay::from_secs(self.boot.elapsed().as_secs())
    }
}
