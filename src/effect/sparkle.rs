//! Random glints during the middle of the ramp

use super::{Effect, LayerContext};
use crate::color::{Rgb, saturating_boost};

const START: f32 = 0.3;
const END: f32 = 0.8;

/// Largest share of the strip that may glint in one frame
const MAX_SHARE: f32 = 0.1;

/// Brightens a few random pixels above the base color
///
/// Each candidate pixel glints with even odds. Pixels that do not glint keep
/// whatever the frame already holds.
#[derive(Debug, Clone)]
pub struct Sparkle {
    state: u64,
}

impl Sparkle {
    pub const fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// SplitMix64 step folded down to 32 bits
    #[allow(clippy::cast_possible_truncation)]
    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        (z ^ (z >> 31)) as u32
    }

    /// Uniform in `0..n`; `n` must be non-zero
    fn below(&mut self, n: usize) -> usize {
        (self.next_u32() as usize) % n
    }

    /// Uniform in `low..high`
    #[allow(clippy::cast_possible_truncation)]
    fn range8(&mut self, low: u8, high: u8) -> u8 {
        let span = u32::from(high.saturating_sub(low)).max(1);
        low + (self.next_u32() % span) as u8
    }

    fn coin(&mut self) -> bool {
        self.next_u32() & 1 == 1
    }

    /// Number of candidate pixels for a strip of `len` at this progress
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn candidates(len: usize, progress: f32) -> usize {
        let intensity = ((progress - START) * 2.0).clamp(0.0, 1.0);
        libm::floorf(len as f32 * MAX_SHARE * intensity) as usize
    }
}

impl Effect for Sparkle {
    fn is_active(&self, ctx: &LayerContext) -> bool {
        ctx.progress > START && ctx.progress < END
    }

    fn apply(&mut self, ctx: &LayerContext, leds: &mut [Rgb]) {
        if leds.is_empty() {
            return;
        }

        for _ in 0..Self::candidates(leds.len(), ctx.progress) {
            let pos = self.below(leds.len());
            if self.coin() {
                let r = self.range8(50, 100);
                let g = self.range8(30, 70);
                let b = self.range8(20, 50);
                leds[pos] = saturating_boost(ctx.base, r, g, b);
            }
        }
    }
}
