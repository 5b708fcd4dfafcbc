//! Wall-clock source for the header

use core::fmt;

/// Hours, minutes and seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeOfDay {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl TimeOfDay {
    /// Time of day for a count of seconds since midnight (wraps at 24h)
    pub fn from_secs(secs: u64) -> Self {
        let day = secs % 86_400;
        Self {
            hours: (day / 3600) as u8,
            minutes: ((day / 60) % 60) as u8,
            seconds: (day % 60) as u8,
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// Source of the current time
pub trait Clock {
    fn now(&mut self) -> TimeOfDay;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_secs() {
        let t = TimeOfDay::from_secs(3 * 3600 + 7 * 60 + 9);
        assert_eq!(t.to_string(), "03:07:09");
    }

    #[test]
    fn test_wraps_at_midnight() {
        assert_eq!(TimeOfDay::from_secs(86_400 + 61), TimeOfDay::from_secs(61));
    }
}
