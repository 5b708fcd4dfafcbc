//! Status sources for the header line
//!
//! Battery level comes from the keyboard controller, the time string from
//! whatever clock the board provides.

pub mod battery;
pub mod clock;

pub use battery::{BatteryGauge, BatteryReading, KeyboardBattery};
pub use clock::{Clock, TimeOfDay};
