//! Tone playback errors

use picocalc_hal::PinId;

use super::guard::Reentrant;

/// Why a tone request was refused or cut short
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ToneError {
    /// Pin, frequency and duration lists differ in length
    LengthMismatch {
        pins: usize,
        frequencies: usize,
        durations: usize,
    },
    /// Zero frequency or zero duration
    InvalidTone,
    /// No speaker is attached to this pin
    UnknownPin(PinId),
    /// Both halves of a pair address the same output
    SamePin(PinId),
    /// The PWM output rejected the frequency
    Output(PinId),
    /// Blocking entry called while a scheduler is running on this core
    Reentrant,
}

impl ToneError {
    /// True for errors detected before any output was touched
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ToneError::LengthMismatch { .. }
                | ToneError::InvalidTone
                | ToneError::UnknownPin(_)
                | ToneError::SamePin(_)
        )
    }
}

impl From<Reentrant> for ToneError {
    fn from(_: Reentrant) -> Self {
        ToneError::Reentrant
    }
}
