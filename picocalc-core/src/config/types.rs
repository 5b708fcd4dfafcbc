//! Configuration types

use heapless::String;

/// Maximum length of the product and version labels
pub const MAX_LABEL_LEN: usize = 16;

/// Periodic task timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimingConfig {
    /// Fast tick that marks the frame dirty
    pub dirty_period_ms: u32,
    /// Status header repaint
    pub header_period_ms: u32,
    /// Flush worker poll interval
    pub flush_poll_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            dirty_period_ms: 25,
            header_period_ms: 5000,
            flush_poll_ms: 5,
        }
    }
}

/// Speaker wiring
///
/// The board wires the speakers to channels A and B of PWM slice 5, so the
/// only accepted values are the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AudioConfig {
    /// GPIO of the left channel
    pub speaker_left: u8,
    /// GPIO of the right channel
    pub speaker_right: u8,
}

impl AudioConfig {
    /// GPIO on PWM slice 5 channel A
    pub const LEFT_PIN: u8 = 26;
    /// GPIO on PWM slice 5 channel B
    pub const RIGHT_PIN: u8 = 27;
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            speaker_left: Self::LEFT_PIN,
            speaker_right: Self::RIGHT_PIN,
        }
    }
}

/// Everything the firmware reads at boot
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SystemConfig {
    /// Terminal height in text rows
    pub terminal_rows: u8,
    /// Terminal width in columns
    pub terminal_width: u8,
    /// Rows kept out of the scroll region for the header
    pub non_scrolling_lines: u8,
    /// Run the flush worker on core 1
    pub multithreading: bool,
    /// Paint the status header
    pub show_bar: bool,
    /// System clock
    pub cpu_freq_hz: u32,
    pub product: String<MAX_LABEL_LEN>,
    pub version: String<MAX_LABEL_LEN>,
    pub timing: TimingConfig,
    pub audio: AudioConfig,
}

impl SystemConfig {
    /// Minimum terminal width that still fits the header
    pub const MIN_WIDTH: u8 = 20;
    /// Widest terminal the header can be composed for
    pub const MAX_WIDTH: u8 = crate::timer::header::MAX_HEADER_WIDTH as u8;
}

impl Default for SystemConfig {
    fn default() -> Self {
        let mut product = String::new();
        let _ = product.push_str("PicoCalc");
        let mut version = String::new();
        let _ = version.push_str("0.1.0");

        Self {
            terminal_rows: 40,
            terminal_width: 53,
            non_scrolling_lines: 2,
            multithreading: true,
            show_bar: true,
            cpu_freq_hz: 200_000_000,
            product,
            version,
            timing: TimingConfig::default(),
            audio: AudioConfig::default(),
        }
    }
}
