//! PWM speaker channels
//!
//! GPIO 26 and 27 are channels A and B of PWM slice 5, so the two speakers
//! share one counter. Each channel owns its compare value, but the wrap
//! value and divider belong to the slice: a stereo pair plays at whichever
//! frequency was configured last.

use core::cell::RefCell;

use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::pwm::{Config, Pwm};
use fixed::types::U12F4;
use picocalc_hal::{PinId, PwmTiming, ToneOutput};

/// One PWM slice and its current configuration
pub struct SharedSlice<'d> {
    inner: RefCell<SliceState<'d>>,
}

struct SliceState<'d> {
    pwm: Pwm<'d>,
    config: Config,
}

impl<'d> SharedSlice<'d> {
    /// Take a slice created with both outputs silent
    pub fn new(pwm: Pwm<'d>) -> Self {
        let mut config = Config::default();
        config.compare_a = 0;
        config.compare_b = 0;
        let mut state = SliceState { pwm, config };
        state.apply();
        Self {
            inner: RefCell::new(state),
        }
    }

    /// Handle for channel A
    pub fn channel_a(&self, pin: u8) -> SpeakerChannel<'_, 'd> {
        SpeakerChannel::new(self, Channel::A, pin)
    }

    /// Handle for channel B
    pub fn channel_b(&self, pin: u8) -> SpeakerChannel<'_, 'd> {
        SpeakerChannel::new(self, Channel::B, pin)
    }
}

impl SliceState<'_> {
    fn apply(&mut self) {
        self.pwm.set_config(&self.config);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Channel {
    A,
    B,
}

/// Frequency out of reach of the slice divider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UnreachableFrequency(pub u32);

/// One speaker on one channel of a [`SharedSlice`]
pub struct SpeakerChannel<'s, 'd> {
    slice: &'s SharedSlice<'d>,
    channel: Channel,
    pin: PinId,
    timing: Option<PwmTiming>,
}

impl<'s, 'd> SpeakerChannel<'s, 'd> {
    fn new(slice: &'s SharedSlice<'d>, channel: Channel, pin: u8) -> Self {
        Self {
            slice,
            channel,
            pin: PinId(pin),
            timing: None,
        }
    }

    fn set_compare(&self, compare: u16) {
        let mut state = self.slice.inner.borrow_mut();
        match self.channel {
            Channel::A => state.config.compare_a = compare,
            Channel::B => state.config.compare_b = compare,
        }
        state.apply();
    }
}

impl ToneOutput for SpeakerChannel<'_, '_> {
    type Error = UnreachableFrequency;

    fn pin(&self) -> PinId {
        self.pin
    }

    fn configure(&mut self, frequency_hz: u32) -> Result<(), Self::Error> {
        let timing = PwmTiming::for_frequency(clk_sys_freq(), frequency_hz)
            .ok_or(UnreachableFrequency(frequency_hz))?;

        let mut state = self.slice.inner.borrow_mut();
        state.config.divider = U12F4::from_bits(u16::from(timing.divider) << 4);
        state.config.top = timing.top;
        state.config.enable = true;
        state.apply();

        self.timing = Some(timing);
        Ok(())
    }

    fn set_duty(&mut self, level: u16) {
        if let Some(timing) = self.timing {
            self.set_compare(timing.compare(level));
        }
    }

    fn disable(&mut self) {
        self.set_compare(0);
        self.timing = None;
    }
}
