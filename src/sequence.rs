//! Wake-up sequence phases
//!
//! A triggered alarm plays as `Ramp -> Hold -> FadeOut -> Idle`. The sequence
//! does no waiting of its own: the driver feeds it monotonic timestamps and
//! it answers with the frame to present and how long until the next update.

use embassy_time::{Duration, Instant};
use log::{debug, info};

use crate::color::Rgb;
use crate::config::SequenceTimings;
use crate::effect::oscillate;
use crate::math8::saturate8;
use crate::renderer::{RenderRequest, Renderer};

/// Hold brightness swing around the peak
const HOLD_SWING: f32 = 0.05;
const HOLD_SWING_RATE: f64 = 0.001;

/// Red channel drift during the hold
const HOLD_RED_BASE: f32 = 0.98;
const HOLD_RED_SWING: f32 = 0.04;
const HOLD_RED_RATE: f64 = 0.0005;

/// Phase of a wake-up sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Colors walk through the preset while brightness rises
    Ramp,
    /// Daylight: final color held at peak brightness
    Hold,
    /// Brightness steps down to zero
    FadeOut,
    /// Strip cleared, sequence over
    Idle,
}

/// Frame produced by one sequence tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequenceFrame<'a> {
    pub pixels: &'a [Rgb],
    pub brightness: u8,
    pub phase: Phase,
    /// Time until the sequence wants its next tick
    pub next_update: Duration,
}

/// Ramp refresh delay at the given progress
///
/// Follows `1 - 4p(1 - p)`: slowest at the ends of the ramp, fastest in the
/// middle where colors change the most.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn ramp_delay(progress: f32, timings: &SequenceTimings) -> Duration {
    let p = progress.clamp(0.0, 1.0);
    let curve = 1.0 - 4.0 * p * (1.0 - p);
    let min = timings.ramp_min_delay.as_millis();
    let span = timings.ramp_max_delay.as_millis().saturating_sub(min);
    Duration::from_millis(min + (span as f32 * curve) as u64)
}

/// State machine for one triggered alarm
pub struct SunriseSequence<const MAX_LEDS: usize> {
    renderer: Renderer<MAX_LEDS>,
    request: RenderRequest,
    timings: SequenceTimings,
    phase: Phase,
    started: Option<Instant>,
    phase_started: Instant,
    reported_decile: u8,
}

impl<const MAX_LEDS: usize> SunriseSequence<MAX_LEDS> {
    pub fn new(renderer: Renderer<MAX_LEDS>, request: RenderRequest, timings: SequenceTimings) -> Self {
        Self {
            renderer,
            request,
            timings,
            phase: Phase::Ramp,
            started: None,
            phase_started: Instant::from_ticks(0),
            reported_decile: 0,
        }
    }

    pub const fn phase(&self) -> Phase {
        self.phase
    }

    pub const fn request(&self) -> &RenderRequest {
        &self.request
    }

    pub const fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Idle)
    }

    /// Advance to `now` and render the frame for it
    ///
    /// The first call starts the ramp.
    pub fn tick(&mut self, now: Instant) -> SequenceFrame<'_> {
        self.advance(now);

        match self.phase {
            Phase::Ramp => self.render_ramp(now),
            Phase::Hold => self.render_hold(now),
            Phase::FadeOut => self.render_fade(now),
            Phase::Idle => self.render_idle(),
        }
    }

    /// Stop immediately and clear the strip, skipping hold and fade-out
    pub fn cancel(&mut self) -> SequenceFrame<'_> {
        if self.phase != Phase::Idle {
            info!("sunrise cancelled during {:?}", self.phase);
        }
        self.phase = Phase::Idle;
        self.render_idle()
    }

    /// Move through every phase whose end lies at or before `now`
    fn advance(&mut self, now: Instant) {
        let start = *self.started.get_or_insert_with(|| {
            info!(
                "sunrise '{}' started: {} s ramp to brightness {}",
                self.request.preset.name(),
                self.request.total_duration.as_secs(),
                self.request.peak_brightness
            );
            now
        });

        loop {
            let next = match self.phase {
                Phase::Ramp => {
                    let end = start + self.request.total_duration;
                    (now >= end).then_some((Phase::Hold, end))
                }
                Phase::Hold => {
                    let end = self.phase_started + self.timings.hold;
                    (now >= end).then_some((Phase::FadeOut, end))
                }
                Phase::FadeOut => {
                    let elapsed = now.saturating_duration_since(self.phase_started);
                    (self.fade_dropped(elapsed) > u64::from(self.request.peak_brightness))
                        .then_some((Phase::Idle, now))
                }
                Phase::Idle => None,
            };

            let Some((phase, at)) = next else {
                return;
            };
            info!("sunrise phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
            self.phase_started = at;
        }
    }

    /// Brightness removed after `elapsed` of fading
    fn fade_dropped(&self, elapsed: Duration) -> u64 {
        let interval = self.timings.fade_interval.as_ticks().max(1);
        let steps = elapsed.as_ticks() / interval;
        steps * u64::from(self.timings.fade_step.max(1))
    }

    fn render_ramp(&mut self, now: Instant) -> SequenceFrame<'_> {
        let start = self.started.unwrap_or(now);
        let elapsed = now.saturating_duration_since(start);
        let request = self.request;

        let frame = self.renderer.render_frame(
            request.preset,
            elapsed,
            request.total_duration,
            request.peak_brightness,
            now,
        );

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let decile = (frame.progress * 10.0) as u8;
        if decile > self.reported_decile {
            self.reported_decile = decile;
            debug!("sunrise progress {}%", decile * 10);
        }

        SequenceFrame {
            pixels: frame.pixels,
            brightness: frame.brightness,
            phase: Phase::Ramp,
            next_update: ramp_delay(frame.progress, &self.timings),
        }
    }

    fn render_hold(&mut self, now: Instant) -> SequenceFrame<'_> {
        let peak = f32::from(self.request.peak_brightness);
        let brightness = saturate8(peak * (1.0 + oscillate(now, HOLD_SWING_RATE, 0.0) * HOLD_SWING));

        let mut color = self.request.preset.last_color();
        let red_shift = HOLD_RED_BASE + HOLD_RED_SWING * oscillate(now, HOLD_RED_RATE, 0.0);
        color.r = saturate8(f32::from(color.r) * red_shift);

        SequenceFrame {
            pixels: self.renderer.fill(color),
            brightness,
            phase: Phase::Hold,
            next_update: self.timings.hold_refresh,
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn render_fade(&mut self, now: Instant) -> SequenceFrame<'_> {
        let elapsed = now.saturating_duration_since(self.phase_started);
        let dropped = self.fade_dropped(elapsed);
        let brightness = u64::from(self.request.peak_brightness).saturating_sub(dropped) as u8;

        SequenceFrame {
            pixels: self.renderer.fill(self.request.preset.last_color()),
            brightness,
            phase: Phase::FadeOut,
            next_update: self.timings.fade_interval,
        }
    }

    fn render_idle(&mut self) -> SequenceFrame<'_> {
        SequenceFrame {
            pixels: self.renderer.clear(),
            brightness: 0,
            phase: Phase::Idle,
            next_update: Duration::from_ticks(0),
        }
    }
}
