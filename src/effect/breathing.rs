//! Slow brightness swell over the whole ramp

use embassy_time::Instant;

use super::oscillate;

/// Phase rate of the swell, in radians per millisecond
const RATE: f64 = 0.002;

/// Swell amplitude at the start of the ramp
const AMPLITUDE: f32 = 0.1;

/// Share of the amplitude that fades away by the end of the ramp
const DECAY: f32 = 0.7;

/// Brightness multiplier that breathes around 1.0
///
/// Amplitude decays linearly from 10% at progress 0 to 3% at progress 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Breathing;

impl Breathing {
    pub fn amplitude(progress: f32) -> f32 {
        (1.0 - progress.clamp(0.0, 1.0) * DECAY) * AMPLITUDE
    }

    pub fn multiplier(progress: f32, now: Instant) -> f32 {
        1.0 + oscillate(now, RATE, 0.0) * Self::amplitude(progress)
    }
}
