//! Frame scheduling and timing utilities.
//!
//! Provides portable frame pacing without async/await or platform-specific timers.
//! The caller is responsible for sleeping/waiting between frames; every wait is a
//! point where cancellation is polled.

use embassy_time::{Duration, Instant};
use log::{info, warn};

use crate::OutputDriver;
use crate::sequence::{Phase, SunriseSequence};
use crate::signal::CancelSignal;

/// Longest single wait before the cancellation signal is polled again.
pub const DEFAULT_CANCEL_POLL: Duration = Duration::from_millis(100);

/// How a sequence ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceOutcome {
    /// Ramp, hold and fade-out all played
    Completed,
    /// The cancellation signal was raised
    Cancelled,
    /// The LED strip refused a frame
    StrandUnavailable,
}

/// Whether the sequence wants more frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Running(Phase),
    Finished(SequenceOutcome),
}

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameResult {
    /// The deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to wait until the next frame (may be zero if behind schedule).
    pub sleep_duration: Duration,
    pub status: FrameStatus,
}

/// Portable driver for one wake-up sequence.
///
/// This scheduler:
/// - Polls the cancellation signal before every frame
/// - Advances the sequence and writes its frames to the output driver
/// - Tracks frame timing with drift correction
/// - Returns timing info so the caller can sleep appropriately
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = FrameScheduler::new(sequence, driver, &CANCEL);
///
/// loop {
///     let result = scheduler.tick(Instant::now());
///     if let FrameStatus::Finished(outcome) = result.status {
///         break outcome;
///     }
///     // Platform-specific sleep
///     sleep_ms(result.sleep_duration.as_millis());
/// }
/// ```
pub struct FrameScheduler<O: OutputDriver, C: CancelSignal, const MAX_LEDS: usize> {
    output: O,
    cancel: C,
    sequence: SunriseSequence<MAX_LEDS>,
    next_frame: Instant,
    poll_interval: Duration,
    outcome: Option<SequenceOutcome>,
}

impl<O: OutputDriver, C: CancelSignal, const MAX_LEDS: usize> FrameScheduler<O, C, MAX_LEDS> {
    /// Create a new frame scheduler.
    ///
    /// Cancellation is polled at least every [`DEFAULT_CANCEL_POLL`] by [`Self::run`].
    pub fn new(sequence: SunriseSequence<MAX_LEDS>, driver: O, cancel: C) -> Self {
        Self::with_poll_interval(sequence, driver, cancel, DEFAULT_CANCEL_POLL)
    }

    /// Create a new frame scheduler with a custom cancellation poll interval.
    pub fn with_poll_interval(
        sequence: SunriseSequence<MAX_LEDS>,
        driver: O,
        cancel: C,
        poll_interval: Duration,
    ) -> Self {
        Self {
            output: driver,
            cancel,
            sequence,
            next_frame: Instant::from_ticks(0),
            poll_interval: poll_interval.max(Duration::from_ticks(1)),
            outcome: None,
        }
    }

    /// Process one frame and return timing information.
    ///
    /// This method:
    /// 1. Stops with a cleared strip if cancellation was requested
    /// 2. Checks that the strip can take a frame
    /// 3. Advances the sequence to `now` and writes its frame
    /// 4. Applies drift correction if we've fallen too far behind
    /// 5. Returns the deadline for the next frame
    ///
    /// Once the sequence has finished every further call reports the same outcome.
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        if let Some(outcome) = self.outcome {
            return Self::finished(now, outcome);
        }

        if self.cancel.is_cancelled() {
            warn!("sequence cancelled");
            return self.abort(now, SequenceOutcome::Cancelled);
        }

        if !self.output.is_ready() {
            warn!("LED strand not ready, aborting sequence");
            return self.abort(now, SequenceOutcome::StrandUnavailable);
        }

        let frame = self.sequence.tick(now);
        let phase = frame.phase;
        let next_update = frame.next_update;
        if let Err(err) = self.output.write(frame.pixels, frame.brightness) {
            warn!("{}, aborting sequence", err);
            return self.abort(now, SequenceOutcome::StrandUnavailable);
        }

        if phase == Phase::Idle {
            info!("sequence completed");
            self.outcome = Some(SequenceOutcome::Completed);
            return Self::finished(now, SequenceOutcome::Completed);
        }

        // Drift correction: if we've fallen too far behind, reset to now
        // This prevents catch-up bursts after long stalls
        let max_drift = next_update + next_update;
        if now > self.next_frame + max_drift {
            self.next_frame = now;
        }

        // Calculate next frame deadline
        self.next_frame += next_update;

        FrameResult {
            next_deadline: self.next_frame,
            sleep_duration: self.next_frame.saturating_duration_since(now),
            status: FrameStatus::Running(phase),
        }
    }

    /// Play the sequence to the end.
    ///
    /// `now` samples the monotonic clock and `wait` blocks for the given
    /// duration. Waits are split so cancellation is noticed within one poll
    /// interval.
    pub fn run(
        &mut self,
        mut now: impl FnMut() -> Instant,
        mut wait: impl FnMut(Duration),
    ) -> SequenceOutcome {
        loop {
            let result = self.tick(now());
            if let FrameStatus::Finished(outcome) = result.status {
                return outcome;
            }

            let mut remaining = result.sleep_duration;
            while remaining > Duration::from_ticks(0) && !self.cancel.is_cancelled() {
                let slice = remaining.min(self.poll_interval);
                wait(slice);
                remaining -= slice;
            }
        }
    }

    /// Outcome of the sequence, once it has finished.
    pub const fn outcome(&self) -> Option<SequenceOutcome> {
        self.outcome
    }

    pub const fn sequence(&self) -> &SunriseSequence<MAX_LEDS> {
        &self.sequence
    }

    pub const fn output(&self) -> &O {
        &self.output
    }

    /// Release the output driver.
    pub fn into_output(self) -> O {
        self.output
    }

    /// Clear the strip and finish.
    fn abort(&mut self, now: Instant, outcome: SequenceOutcome) -> FrameResult {
        let frame = self.sequence.cancel();
        if self.output.is_ready() {
            if let Err(err) = self.output.write(frame.pixels, frame.brightness) {
                warn!("could not clear strip: {}", err);
            }
        }
        self.outcome = Some(outcome);
        Self::finished(now, outcome)
    }

    const fn finished(now: Instant, outcome: SequenceOutcome) -> FrameResult {
        FrameResult {
            next_deadline: now,
            sleep_duration: Duration::from_ticks(0),
            status: FrameStatus::Finished(outcome),
        }
    }
}
