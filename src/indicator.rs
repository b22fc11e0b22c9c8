//! Short feedback animations
//!
//! Indicators borrow the strip between wake-up sequences: a status blink
//! on boot, a flash when the button is pressed and a rainbow sweep for
//! checking the wiring. Each one is finite and leaves the strip cleared.

use embassy_time::{Duration, Instant};

use crate::OutputDriver;
use crate::color::{BLACK, Rgb, fill_rainbow, fill_solid};
use crate::error::Result;

pub const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };

/// One step of an indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorFrame {
    pub brightness: u8,
    /// `None` once the indicator is over and the strip has been cleared
    pub next_update: Option<Duration>,
}

impl IndicatorFrame {
    const DONE: Self = Self {
        brightness: 0,
        next_update: None,
    };

    pub const fn is_done(&self) -> bool {
        self.next_update.is_none()
    }
}

pub trait Indicator {
    /// Draw the indicator as it looks `elapsed` after it started
    fn frame(&self, elapsed: Duration, leds: &mut [Rgb]) -> IndicatorFrame;
}

/// Shows a single color for a fixed time, then clears
fn timed_flash(
    elapsed: Duration,
    length: Duration,
    brightness: u8,
    leds: &mut [Rgb],
    draw: impl FnOnce(&mut [Rgb]),
) -> IndicatorFrame {
    if elapsed >= length {
        fill_solid(leds, BLACK);
        return IndicatorFrame::DONE;
    }
    draw(leds);
    IndicatorFrame {
        brightness,
        next_update: Some(length - elapsed),
    }
}

/// First pixel blue at low brightness
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusBlink;

impl StatusBlink {
    pub const LENGTH: Duration = Duration::from_millis(100);
    pub const BRIGHTNESS: u8 = 50;
}

impl Indicator for StatusBlink {
    fn frame(&self, elapsed: Duration, leds: &mut [Rgb]) -> IndicatorFrame {
        timed_flash(elapsed, Self::LENGTH, Self::BRIGHTNESS, leds, |leds| {
            fill_solid(leds, BLACK);
            if let Some(first) = leds.first_mut() {
                *first = BLUE;
            }
        })
    }
}

/// Whole strip blue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonFeedback;

impl ButtonFeedback {
    pub const LENGTH: Duration = Duration::from_millis(200);
    pub const BRIGHTNESS: u8 = 100;
}

impl Indicator for ButtonFeedback {
    fn frame(&self, elapsed: Duration, leds: &mut [Rgb]) -> IndicatorFrame {
        timed_flash(elapsed, Self::LENGTH, Self::BRIGHTNESS, leds, |leds| {
            fill_solid(leds, BLUE);
        })
    }
}

/// Rainbow sweeping once around the hue wheel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestPattern;

impl TestPattern {
    pub const FRAME_INTERVAL: Duration = Duration::from_millis(50);
    pub const FRAMES: u64 = 64;
    pub const HUE_STEP: u8 = 4;
    pub const BRIGHTNESS: u8 = 50;

    /// Hue spacing between neighbouring pixels, spreading one wheel over the strip
    #[allow(clippy::cast_possible_truncation)]
    pub fn pixel_hue_step(len: usize) -> u8 {
        (256 / len.max(1)).min(255) as u8
    }
}

impl Indicator for TestPattern {
    #[allow(clippy::cast_possible_truncation)]
    fn frame(&self, elapsed: Duration, leds: &mut [Rgb]) -> IndicatorFrame {
        let frame = elapsed.as_ticks() / Self::FRAME_INTERVAL.as_ticks();
        if frame >= Self::FRAMES {
            fill_solid(leds, BLACK);
            return IndicatorFrame::DONE;
        }

        let start_hue = (frame as u8).wrapping_mul(Self::HUE_STEP);
        fill_rainbow(leds, start_hue, Self::pixel_hue_step(leds.len()));

        let next_frame = Self::FRAME_INTERVAL * (frame as u32 + 1);
        IndicatorFrame {
            brightness: Self::BRIGHTNESS,
            next_update: Some(next_frame - elapsed),
        }
    }
}

/// Play an indicator to the end on `output`
///
/// The final cleared frame is written too.
pub fn play<I: Indicator, O: OutputDriver>(
    indicator: &I,
    leds: &mut [Rgb],
    output: &mut O,
    mut now: impl FnMut() -> Instant,
    mut wait: impl FnMut(Duration),
) -> Result<()> {
    let start = now();
    loop {
        let frame = indicator.frame(now().saturating_duration_since(start), leds);
        output.write(leds, frame.brightness)?;
        match frame.next_update {
            Some(delay) => wait(delay),
            None => return Ok(()),
        }
    }
}
