//! PWM tone output abstraction
//!
//! One [`ToneOutput`] drives one PWM-capable pin. The tone scheduler
//! configures a frequency, sets a duty level, waits, then disables.

/// GPIO number of a PWM-capable output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinId(pub u8);

impl PinId {
    /// Raw GPIO number
    pub const fn number(self) -> u8 {
        self.0
    }
}

impl From<u8> for PinId {
    fn from(pin: u8) -> Self {
        Self(pin)
    }
}

/// Duty level for a ~50% square wave (out of `u16::MAX`)
pub const DUTY_HALF: u16 = 32768;

/// Clock divider and wrap value for one PWM slice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PwmTiming {
    /// Integer clock divider, `1..=255`
    pub divider: u8,
    /// Counter wrap value
    pub top: u16,
}

impl PwmTiming {
    /// Pick the smallest divider that fits `frequency_hz` in a 16-bit counter
    ///
    /// Returns `None` for zero, for frequencies above half the clock, and for
    /// frequencies too low to reach with an 8-bit divider.
    pub fn for_frequency(clk_hz: u32, frequency_hz: u32) -> Option<Self> {
        if frequency_hz == 0 {
            return None;
        }
        let cycles = clk_hz / frequency_hz;
        if cycles < 2 {
            return None;
        }

        let divider = cycles.div_ceil(65_536).max(1);
        if divider > 255 {
            return None;
        }

        Some(Self {
            divider: divider as u8,
            top: (cycles / divider - 1) as u16,
        })
    }

    /// Compare value for a duty `level` out of `u16::MAX`
    pub fn compare(&self, level: u16) -> u16 {
        ((u32::from(self.top) + 1) * u32::from(level) / 65_536) as u16
    }
}

/// Square-wave output on a single pin
pub trait ToneOutput {
    /// Error type for configuration failures
    type Error;

    /// The pin this output drives
    fn pin(&self) -> PinId;

    /// Program the output frequency in Hz
    ///
    /// Implementations must reject frequencies their clock divider cannot
    /// reach instead of silently clamping.
    fn configure(&mut self, frequency_hz: u32) -> Result<(), Self::Error>;

    /// Set the duty level, `0..=u16::MAX`
    fn set_duty(&mut self, level: u16);

    /// Stop driving the pin
    fn disable(&mut self);
}

impl<T: ToneOutput> ToneOutput for &mut T {
    type Error = T::Error;

    fn pin(&self) -> PinId {
        T::pin(self)
    }

    fn configure(&mut self, frequency_hz: u32) -> Result<(), Self::Error> {
        T::configure(self, frequency_hz)
    }

    fn set_duty(&mut self, level: u16) {
        T::set_duty(self, level)
    }

    fn disable(&mut self) {
        T::disable(self)
    }
}
