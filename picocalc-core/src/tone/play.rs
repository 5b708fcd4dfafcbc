//! Tone tasks and their compositions

use embassy_futures::join::join;
use embedded_hal_async::delay::DelayNs;
use picocalc_hal::{ToneOutput, DUTY_HALF};

use super::error::ToneError;
use super::request::{ToneRequest, ToneSequence};
use super::speakers::SpeakerBank;

/// Play one tone on `output`
///
/// Suspends on `delay` for the whole duration, so other tasks on the same
/// executor keep running. The output is always disabled before returning
/// once it has been configured.
pub async fn tone_task<O, D>(output: &mut O, delay: &mut D, tone: ToneRequest) -> Result<(), ToneError>
where
    O: ToneOutput,
    D: DelayNs,
{
    let pin = output.pin();
    output
        .configure(tone.frequency_hz())
        .map_err(|_| ToneError::Output(pin))?;
    output.set_duty(DUTY_HALF);
    delay.delay_ms(tone.duration_ms()).await;
    output.disable();
    Ok(())
}

/// Play one tone on whichever speaker drives `tone.pin()`
pub async fn play_tone_async<S, D>(speakers: &mut S, delay: &mut D, tone: ToneRequest) -> Result<(), ToneError>
where
    S: SpeakerBank,
    D: DelayNs,
{
    let output = speakers
        .output(tone.pin())
        .ok_or(ToneError::UnknownPin(tone.pin()))?;
    tone_task(output, delay, tone).await
}

/// Play a sequence strictly in order, one tone at a time
///
/// Every pin is checked before the first tone starts.
pub async fn play_tones_async<S, D>(
    speakers: &mut S,
    delay: &mut D,
    sequence: &ToneSequence<'_>,
) -> Result<(), ToneError>
where
    S: SpeakerBank,
    D: DelayNs,
{
    if let Some(tone) = sequence.iter().find(|t| !speakers.contains(t.pin())) {
        return Err(ToneError::UnknownPin(tone.pin()));
    }

    for tone in sequence.iter() {
        play_tone_async(speakers, delay, tone).await?;
    }
    Ok(())
}

/// Play two tones on two different speakers at the same time
///
/// Both tasks are polled by the same executor; each suspends on its own
/// copy of `delay`. Both outputs are given their full duration even if the
/// other one fails.
pub async fn play_pair_async<S, D>(
    speakers: &mut S,
    delay: &D,
    first: ToneRequest,
    second: ToneRequest,
) -> Result<(), ToneError>
where
    S: SpeakerBank,
    D: DelayNs + Clone,
{
    if first.pin() == second.pin() {
        return Err(ToneError::SamePin(first.pin()));
    }
    for pin in [first.pin(), second.pin()] {
        if !speakers.contains(pin) {
            return Err(ToneError::UnknownPin(pin));
        }
    }

    let (out_a, out_b) = speakers
        .output_pair(first.pin(), second.pin())
        .ok_or(ToneError::UnknownPin(second.pin()))?;
    let mut delay_a = delay.clone();
    let mut delay_b = delay.clone();

    let (a, b) = join(
        tone_task(out_a, &mut delay_a, first),
        tone_task(out_b, &mut delay_b, second),
    )
    .await;
    a.and(b)
}
