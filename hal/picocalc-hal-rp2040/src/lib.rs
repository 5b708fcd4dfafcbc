//! RP2040 implementations of the PicoCalc HAL traits
//!
//! - PWM speaker channels (implements `picocalc_hal::ToneOutput`)
//! - I2C adapter for the keyboard controller (implements `picocalc_hal::I2cBus`)
//! - ILI9488 LCD panel over SPI (implements `picocalc_hal::FlushTarget`)

#![no_std]

pub mod display;
pub mod i2c;
pub mod pwm;

pub use display::{Frame, LcdPanel, PanelError};
pub use i2c::KeyboardI2c;
pub use pwm::{SharedSlice, SpeakerChannel};
