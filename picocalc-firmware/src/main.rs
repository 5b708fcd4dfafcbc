//! PicoCalc - System Core Firmware
//!
//! Boots the RP2040 in the PicoCalc handheld and starts the system core:
//!
//! - Core 0: dirty tick, status header, tone playback
//! - Core 1: LCD flush worker
//!
//! The renderer (terminal emulator) and the shell sit on top and reach the
//! core through the display context, the terminal pipe and the tone
//! scheduler.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::clocks::ClockConfig;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::pwm::{self, Pwm};
use embassy_rp::spi::{self, Spi};
use embassy_time::{Delay, Timer};
use picocalc_core::config::{parse_config, SystemConfig};
use picocalc_core::display::DisplayContext;
use picocalc_core::status::KeyboardBattery;
use picocalc_core::terminal::scroll_region;
use picocalc_core::timer::{extract_version, HeaderRefresher};
use picocalc_core::tone::{Core, StereoSpeakers, ToneRequest, ToneScheduler};
use picocalc_hal::i2c::I2cConfig;
use picocalc_hal_rp2040::{Frame, KeyboardI2c, LcdPanel, SharedSlice};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use crate::board::{DisplayCtx, Tones, LCD_SPI_HZ};
use crate::channels::{TerminalSink, EDITOR};
use crate::clock::UptimeClock;

mod board;
mod channels;
mod clock;
mod core1;
mod tasks;

/// Embedded configuration (compiled into firmware)
/// Edit system.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../system.toml");

/// Frame buffer, its lock and the dirty flag
static DISPLAY: DisplayCtx = DisplayContext::new(Frame::new());

static SPEAKER_SLICE: StaticCell<SharedSlice<'static>> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("PicoCalc system core starting...");

    let config = load_config();

    let mut rp_config = embassy_rp::config::Config::default();
    match ClockConfig::system_freq(config.cpu_freq_hz) {
        Ok(clocks) => rp_config.clocks = clocks,
        Err(_) => warn!("Cannot run at {} Hz, keeping default clock", config.cpu_freq_hz),
    }
    let p = embassy_rp::init(rp_config);
    info!("Peripherals initialized");

    // LCD on SPI1
    let mut spi_config = spi::Config::default();
    spi_config.frequency = LCD_SPI_HZ;
    let spi = Spi::new_blocking_txonly(p.SPI1, p.PIN_10, p.PIN_11, spi_config);
    let cs = Output::new(p.PIN_13, Level::High);
    let dc = Output::new(p.PIN_14, Level::High);
    let mut lcd_reset = Output::new(p.PIN_15, Level::Low);
    Timer::after_millis(10).await;
    lcd_reset.set_high();
    Timer::after_millis(120).await;

    let mut panel = LcdPanel::new(spi, dc, cs);
    if panel.init(&mut Delay).is_err() {
        error!("LCD init failed");
    }
    info!("LCD initialized");

    // Keyboard controller on I2C1 (also reports the battery)
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = I2cConfig::KEYBOARD.frequency;
    let i2c = I2c::new_blocking(p.I2C1, p.PIN_7, p.PIN_6, i2c_config);
    let battery = KeyboardBattery::new(KeyboardI2c::new(i2c));

    // Flush worker
    DISPLAY.mark_dirty();
    let poll_ms = config.timing.flush_poll_ms;
    if config.multithreading {
        core1::spawn_flush_core(p.CORE1, &DISPLAY, panel, poll_ms);
        info!("Flush worker on core 1");
    } else {
        spawner.spawn(tasks::flush_task(&DISPLAY, panel, poll_ms)).unwrap();
        info!("Flush worker on core 0");
    }

    spawner
        .spawn(tasks::dirty_tick_task(&DISPLAY, config.timing.dirty_period_ms))
        .unwrap();

    if config.show_bar {
        let mut sink = TerminalSink;
        if scroll_region(&mut sink, config.non_scrolling_lines, config.terminal_rows).is_err() {
            warn!("Terminal pipe full, scroll region not set");
        }

        let header = HeaderRefresher::new(
            &EDITOR,
            &config.product,
            extract_version(&config.version),
            config.terminal_width,
            battery,
            UptimeClock::new(),
            sink,
        );
        spawner
            .spawn(tasks::header_task(header, &DISPLAY, config.timing.header_period_ms))
            .unwrap();
    }

    // Speakers share PWM slice 5
    let slice = SPEAKER_SLICE.init(SharedSlice::new(Pwm::new_output_ab(
        p.PWM_SLICE5,
        p.PIN_26,
        p.PIN_27,
        pwm::Config::default(),
    )));
    let speakers = StereoSpeakers::new(
        slice.channel_a(config.audio.speaker_left),
        slice.channel_b(config.audio.speaker_right),
    );

    let mut tones: Tones = ToneScheduler::new(Core::Zero, speakers, Delay);

    // This executor is a running scheduler: blocking tone calls on core 0
    // must fail from here on.
    let _running = unwrap!(tones.guard().enter());

    boot_chime(&mut tones, &config).await;

    info!("System core up");
    core::future::pending::<()>().await;
}

/// Parse the embedded configuration, falling back to defaults
fn load_config() -> SystemConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!(
                "Config: {}x{} terminal, multithreading={}, cpu={} Hz",
                config.terminal_width, config.terminal_rows, config.multithreading, config.cpu_freq_hz
            );
            config
        }
        Err(e) => {
            warn!("Embedded config rejected ({}), using defaults", e);
            SystemConfig::default()
        }
    }
}

/// Two overlapping notes, one per speaker
async fn boot_chime(tones: &mut Tones, config: &SystemConfig) {
    let left = ToneRequest::new(config.audio.speaker_left, 880, 80);
    let right = ToneRequest::new(config.audio.speaker_right, 1320, 80);

    if let (Ok(left), Ok(right)) = (left, right) {
        if let Err(e) = tones.play_pair_async(left, right).await {
            warn!("Boot chime failed: {}", e);
        }
    }
}
