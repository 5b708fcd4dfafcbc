//! PicoCalc Hardware Abstraction Layer
//!
//! This crate defines the hardware capabilities the system core consumes.
//! Chip-specific crates implement them; the core and its host tests only
//! ever see these traits.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  picocalc-firmware / picocalc-core      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  picocalc-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!            ┌─────────────────────┐
//!            │ picocalc-hal-rp2040 │
//!            └─────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`display::FlushTarget`] - Frame buffer transfer to the LCD
//! - [`pwm::ToneOutput`] - Square-wave output on a speaker pin
//! - [`i2c::I2cBus`] - I2C bus operations (keyboard controller)

#![no_std]
#![deny(unsafe_code)]

pub mod display;
pub mod i2c;
pub mod pwm;

// Re-export key traits at crate root for convenience
pub use display::FlushTarget;
pub use i2c::I2cBus;
pub use pwm::{PinId, PwmTiming, ToneOutput, DUTY_HALF};
