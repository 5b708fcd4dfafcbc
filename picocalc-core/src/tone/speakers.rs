//! Speaker outputs addressed by pin

use picocalc_hal::{PinId, ToneOutput};

/// A fixed set of tone outputs
pub trait SpeakerBank {
    /// Output type for every pin in the bank
    type Output: ToneOutput;

    /// Whether `pin` has an output
    fn contains(&self, pin: PinId) -> bool;

    /// The output driving `pin`
    fn output(&mut self, pin: PinId) -> Option<&mut Self::Output>;

    /// Two distinct outputs at once, in the order asked for
    fn output_pair(
        &mut self,
        first: PinId,
        second: PinId,
    ) -> Option<(&mut Self::Output, &mut Self::Output)>;
}

/// Left and right speaker channels
pub struct StereoSpeakers<O> {
    left: O,
    right: O,
}

impl<O: ToneOutput> StereoSpeakers<O> {
    pub fn new(left: O, right: O) -> Self {
        Self { left, right }
    }

    pub fn left(&mut self) -> &mut O {
        &mut self.left
    }

    pub fn right(&mut self) -> &mut O {
        &mut self.right
    }

    /// Stop both channels
    pub fn silence(&mut self) {
        self.left.disable();
        self.right.disable();
    }
}

impl<O: ToneOutput> SpeakerBank for StereoSpeakers<O> {
    type Output = O;

    fn contains(&self, pin: PinId) -> bool {
        self.left.pin() == pin || self.right.pin() == pin
    }

    fn output(&mut self, pin: PinId) -> Option<&mut O> {
        if self.left.pin() == pin {
            Some(&mut self.left)
        } else if self.right.pin() == pin {
            Some(&mut self.right)
        } else {
            None
        }
    }

    fn output_pair(&mut self, first: PinId, second: PinId) -> Option<(&mut O, &mut O)> {
        let (left, right) = (self.left.pin(), self.right.pin());
        if first == left && second == right {
            Some((&mut self.left, &mut self.right))
        } else if first == right && second == left {
            Some((&mut self.right, &mut self.left))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockTone, ToneLog};

    #[test]
    fn test_lookup_by_pin() {
        let log = ToneLog::new();
        let mut bank = StereoSpeakers::new(MockTone::new(26, &log), MockTone::new(27, &log));

        assert!(bank.contains(PinId(27)));
        assert!(!bank.contains(PinId(5)));
        assert_eq!(bank.output(PinId(26)).map(|o| o.pin()), Some(PinId(26)));
        assert!(bank.output(PinId(5)).is_none());
    }

    #[test]
    fn test_pair_order_follows_request() {
        let log = ToneLog::new();
        let mut bank = StereoSpeakers::new(MockTone::new(26, &log), MockTone::new(27, &log));

        let (a, b) = bank.output_pair(PinId(27), PinId(26)).unwrap();
        assert_eq!((a.pin(), b.pin()), (PinId(27), PinId(26)));
        assert!(bank.output_pair(PinId(26), PinId(26)).is_none());
    }
}
