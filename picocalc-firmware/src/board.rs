//! PicoCalc wiring and the concrete types built from it
//!
//! | Function        | Peripheral  | GPIO                                  |
//! |-----------------|-------------|---------------------------------------|
//! | LCD (ILI9488)   | SPI1        | SCK 10, MOSI 11, CS 13, DC 14, RST 15 |
//! | Keyboard / batt | I2C1        | SDA 6, SCL 7                          |
//! | Speakers        | PWM slice 5 | L 26 (A), R 27 (B)                    |

use embassy_rp::gpio::Output;
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::{I2C1, SPI1};
use embassy_rp::spi::{self, Spi};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use picocalc_core::display::DisplayContext;
use picocalc_core::status::KeyboardBattery;
use picocalc_core::timer::HeaderRefresher;
use picocalc_core::tone::{StereoSpeakers, ToneScheduler};
use picocalc_hal_rp2040::{Frame, KeyboardI2c, LcdPanel, SpeakerChannel};

use crate::channels::TerminalSink;
use crate::clock::UptimeClock;

/// LCD SPI clock
pub const LCD_SPI_HZ: u32 = 25_000_000;

/// Core 1 stack size in bytes
pub const CORE1_STACK_SIZE: usize = 4096;

pub type DisplayCtx = DisplayContext<CriticalSectionRawMutex, Frame>;

pub type Panel = LcdPanel<Spi<'static, SPI1, spi::Blocking>, Output<'static>, Output<'static>>;

pub type KeyboardBus = KeyboardI2c<I2c<'static, I2C1, i2c::Blocking>>;

pub type Header = HeaderRefresher<'static, KeyboardBattery<KeyboardBus>, UptimeClock, TerminalSink>;

pub type Speakers = StereoSpeakers<SpeakerChannel<'static, 'static>>;

pub type Tones = ToneScheduler<Speakers, embassy_time::Delay>;
