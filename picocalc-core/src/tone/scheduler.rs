//! Tone scheduler owning the speakers

use embedded_hal_async::delay::DelayNs;
use picocalc_hal::PinId;

use super::error::ToneError;
use super::guard::{Core, SchedulerGuard};
use super::play;
use super::request::{ToneRequest, ToneSequence};
use super::speakers::SpeakerBank;

/// Speakers plus the delay used to time them
///
/// Blocking methods start their own executor through the core's
/// [`SchedulerGuard`], so two schedulers on one core still refuse to nest.
/// The `*_async` methods must be used from code that is already running on
/// an executor.
pub struct ToneScheduler<S, D> {
    guard: &'static SchedulerGuard,
    speakers: S,
    delay: D,
}

impl<S, D> ToneScheduler<S, D>
where
    S: SpeakerBank,
    D: DelayNs + Clone,
{
    /// Scheduler for code running on `core`
    pub fn new(core: Core, speakers: S, delay: D) -> Self {
        Self {
            guard: SchedulerGuard::for_core(core),
            speakers,
            delay,
        }
    }

    /// Guard of the core this scheduler was built for
    pub fn guard(&self) -> &'static SchedulerGuard {
        self.guard
    }

    pub fn speakers(&mut self) -> &mut S {
        &mut self.speakers
    }

    /// Play one tone and wait for it to finish
    pub fn play_tone(&mut self, pin: impl Into<PinId>, frequency_hz: u32, duration_ms: u32) -> Result<(), ToneError> {
        self.check_idle()?;
        let tone = ToneRequest::new(pin, frequency_hz, duration_ms)?;
        self.guard
            .block_on(play::play_tone_async(&mut self.speakers, &mut self.delay, tone))?
    }

    /// Play tones one after another and wait for the last one
    ///
    /// Mismatched list lengths are refused before any output is touched.
    /// Empty lists return immediately.
    pub fn play_tones(&mut self, pins: &[PinId], frequencies: &[u32], durations: &[u32]) -> Result<(), ToneError> {
        self.check_idle()?;
        let sequence = ToneSequence::new(pins, frequencies, durations)?;
        if sequence.is_empty() {
            return Ok(());
        }
        self.guard
            .block_on(play::play_tones_async(&mut self.speakers, &mut self.delay, &sequence))?
    }

    /// Play two tones on both speakers at once and wait for both
    pub fn play_pair(&mut self, first: ToneRequest, second: ToneRequest) -> Result<(), ToneError> {
        self.check_idle()?;
        self.guard
            .block_on(play::play_pair_async(&mut self.speakers, &self.delay, first, second))?
    }

    pub async fn play_tone_async(&mut self, tone: ToneRequest) -> Result<(), ToneError> {
        play::play_tone_async(&mut self.speakers, &mut self.delay, tone).await
    }

    pub async fn play_tones_async(&mut self, sequence: &ToneSequence<'_>) -> Result<(), ToneError> {
        play::play_tones_async(&mut self.speakers, &mut self.delay, sequence).await
    }

    pub async fn play_pair_async(&mut self, first: ToneRequest, second: ToneRequest) -> Result<(), ToneError> {
        play::play_pair_async(&mut self.speakers, &self.delay, first, second).await
    }

    fn check_idle(&self) -> Result<(), ToneError> {
        if self.guard.is_active() {
            #[cfg(feature = "defmt")]
            defmt::error!("Blocking tone call from inside a running scheduler");
            return Err(ToneError::Reentrant);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockDelay, MockTone, ToneLog};
    use crate::tone::StereoSpeakers;

    type Scheduler = ToneScheduler<StereoSpeakers<MockTone>, MockDelay>;

    fn scheduler(log: &ToneLog) -> Scheduler {
        let speakers = StereoSpeakers::new(MockTone::new(26, log), MockTone::new(27, log));
        ToneScheduler::new(Core::Zero, speakers, MockDelay::new(log))
    }

    #[test]
    fn test_empty_batch_is_noop() {
        let log = ToneLog::new();
        let mut tones = scheduler(&log);

        assert_eq!(tones.play_tones(&[], &[], &[]), Ok(()));
        assert!(log.events().is_empty());
    }

    #[test]
    fn test_mismatched_batch_touches_nothing() {
        let log = ToneLog::new();
        let mut tones = scheduler(&log);

        let result = tones.play_tones(&[PinId(26), PinId(27)], &[440], &[100, 100]);
        assert!(matches!(result, Err(ToneError::LengthMismatch { .. })));
        assert!(result.unwrap_err().is_validation());
        assert_eq!(log.configure_count(), 0);
    }

    #[test]
    fn test_blocking_calls_complete() {
        let log = ToneLog::new();
        let mut tones = scheduler(&log);
        let guard = tones.guard();

        tones.play_tone(26, 440, 100).unwrap();
        tones.play_tones(&[PinId(27), PinId(26)], &[660, 880], &[50, 50]).unwrap();
        tones
            .play_pair(
                ToneRequest::new(26, 440, 20).unwrap(),
                ToneRequest::new(27, 550, 20).unwrap(),
            )
            .unwrap();

        assert_eq!(log.configure_count(), 5);
        assert!(!guard.is_active());
    }

    #[test]
    fn test_blocking_call_inside_scheduler_is_reentrant() {
        let log = ToneLog::new();
        let mut tones = scheduler(&log);
        let guard = tones.guard();

        let nested = guard
            .block_on(async {
                (
                    tones.play_tone(26, 440, 100),
                    tones.play_tones(&[PinId(26)], &[440, 880], &[1]),
                )
            })
            .unwrap();

        assert_eq!(nested, (Err(ToneError::Reentrant), Err(ToneError::Reentrant)));
        assert!(!nested.0.unwrap_err().is_validation());
        assert_eq!(log.configure_count(), 0);

        // Guard released once the outer scheduler finished
        assert_eq!(tones.play_tone(26, 440, 100), Ok(()));
    }

    #[test]
    fn test_async_calls_inside_scheduler() {
        let log = ToneLog::new();
        let mut tones = scheduler(&log);
        let guard = tones.guard();
        let pins = [PinId(26), PinId(27)];
        let sequence = ToneSequence::new(&pins, &[440, 660], &[10, 10]).unwrap();

        let result = guard
            .block_on(async {
                tones.play_tone_async(ToneRequest::new(27, 440, 10)?).await?;
                tones.play_tones_async(&sequence).await?;
                tones
                    .play_pair_async(ToneRequest::new(26, 440, 10)?, ToneRequest::new(27, 660, 10)?)
                    .await
            })
            .unwrap();

        assert_eq!(result, Ok(()));
        assert_eq!(log.configure_count(), 5);
    }

    #[test]
    fn test_second_scheduler_on_same_core_cannot_nest() {
        let outer_log = ToneLog::new();
        let inner_log = ToneLog::new();
        let outer = scheduler(&outer_log);

        let nested = outer
            .guard()
            .block_on(async {
                let mut inner = scheduler(&inner_log);
                inner.play_tone(26, 440, 10)
            })
            .unwrap();

        assert_eq!(nested, Err(ToneError::Reentrant));
        assert_eq!(inner_log.configure_count(), 0);
    }

    #[test]
    fn test_other_core_is_independent() {
        let log = ToneLog::new();
        let outer = scheduler(&log);

        let result = outer
            .guard()
            .block_on(async {
                let speakers = StereoSpeakers::new(MockTone::new(26, &log), MockTone::new(27, &log));
                let mut other = ToneScheduler::new(Core::One, speakers, MockDelay::new(&log));
                other.play_tone(27, 660, 10)
            })
            .unwrap();

        assert_eq!(result, Ok(()));
    }
}
