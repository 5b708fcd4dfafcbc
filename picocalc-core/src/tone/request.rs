//! Validated tone requests

use picocalc_hal::PinId;

use super::error::ToneError;

/// One tone: pin, frequency and duration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ToneRequest {
    pin: PinId,
    frequency_hz: u32,
    duration_ms: u32,
}

impl ToneRequest {
    /// Build a request; frequency and duration must be non-zero
    pub fn new(pin: impl Into<PinId>, frequency_hz: u32, duration_ms: u32) -> Result<Self, ToneError> {
        if frequency_hz == 0 || duration_ms == 0 {
            return Err(ToneError::InvalidTone);
        }
        Ok(Self {
            pin: pin.into(),
            frequency_hz,
            duration_ms,
        })
    }

    pub fn pin(&self) -> PinId {
        self.pin
    }

    pub fn frequency_hz(&self) -> u32 {
        self.frequency_hz
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }
}

/// Parallel pin/frequency/duration lists played in order
///
/// Construction checks every entry, so a sequence that exists can be played
/// without a validation failure half way through.
#[derive(Debug, Clone, Copy)]
pub struct ToneSequence<'a> {
    pins: &'a [PinId],
    frequencies: &'a [u32],
    durations: &'a [u32],
}

impl<'a> ToneSequence<'a> {
    pub fn new(
        pins: &'a [PinId],
        frequencies: &'a [u32],
        durations: &'a [u32],
    ) -> Result<Self, ToneError> {
        if pins.len() != frequencies.len() || pins.len() != durations.len() {
            return Err(ToneError::LengthMismatch {
                pins: pins.len(),
                frequencies: frequencies.len(),
                durations: durations.len(),
            });
        }
        if frequencies.iter().chain(durations).any(|&v| v == 0) {
            return Err(ToneError::InvalidTone);
        }
        Ok(Self {
            pins,
            frequencies,
            durations,
        })
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    /// Tones in submission order
    pub fn iter(&self) -> impl Iterator<Item = ToneRequest> + 'a {
        let (pins, frequencies, durations) = (self.pins, self.frequencies, self.durations);
        pins.iter()
            .zip(frequencies)
            .zip(durations)
            .map(|((&pin, &frequency_hz), &duration_ms)| ToneRequest {
                pin,
                frequency_hz,
                duration_ms,
            })
    }
}
