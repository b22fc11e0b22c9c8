//! Color presets
//!
//! A preset is a named journey through up to [`MAX_STAGES`] waypoint colors.
//! Each stage owns a fraction of the ramp; the renderer walks the stages by
//! ramp progress and eases from one waypoint into the next.

use log::warn;

use crate::{
    color::{BLACK, Rgb, blend_colors},
    error::{Error, Result},
    math8::{ease_in_out_quad, unit8},
};

/// Maximum number of stages in one preset
pub const MAX_STAGES: usize = 6;

/// Name of the preset that enables the wave layer
pub const OCEAN: &str = "ocean";

/// Progress values this close below a stage boundary belong to the next stage.
///
/// Cumulative fractions are summed in `f32`, so an exact decimal boundary
/// can land one ulp either side of the progress value that names it.
const BOUNDARY_EPSILON: f32 = 1e-6;

/// One waypoint of a preset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stage {
    pub color: Rgb,
    /// Share of the ramp spent blending from this stage into the next
    pub fraction: f32,
}

impl Stage {
    pub const fn new(r: u8, g: u8, b: u8, fraction: f32) -> Self {
        Self {
            color: Rgb { r, g, b },
            fraction,
        }
    }
}

const EMPTY_STAGE: Stage = Stage {
    color: BLACK,
    fraction: 0.0,
};

/// Named, ordered list of stages
///
/// Stages are stored inline so presets can live in `const` tables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorPreset {
    name: &'static str,
    stages: [Stage; MAX_STAGES],
    len: usize,
}

impl ColorPreset {
    /// Build a preset from 1 to [`MAX_STAGES`] stages
    ///
    /// Fails to compile (or panics at runtime) on an empty or oversized
    /// stage list.
    pub const fn new(name: &'static str, stages: &[Stage]) -> Self {
        assert!(
            !stages.is_empty() && stages.len() <= MAX_STAGES,
            "preset needs 1..=MAX_STAGES stages"
        );

        let mut inline = [EMPTY_STAGE; MAX_STAGES];
        let mut i = 0;
        while i < stages.len() {
            inline[i] = stages[i];
            i += 1;
        }

        Self {
            name,
            stages: inline,
            len: stages.len(),
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages[..self.len]
    }

    pub const fn first_color(&self) -> Rgb {
        self.stages[0].color
    }

    pub const fn last_color(&self) -> Rgb {
        self.stages[self.len - 1].color
    }

    /// Color at the given ramp progress
    ///
    /// Progress at or below 0 yields the first stage color and at or above 1
    /// the last, both unmodified. In between, the stage whose cumulative
    /// range `[acc, acc + fraction)` holds `progress` is blended into its
    /// successor along the ease-in-out curve. When the fractions sum to less
    /// than 1 the last stage absorbs the remainder.
    pub fn color_at(&self, progress: f32) -> Rgb {
        if progress.is_nan() || progress <= 0.0 {
            return self.first_color();
        }
        if progress >= 1.0 {
            return self.last_color();
        }

        let stages = self.stages();
        let mut accumulated = 0.0_f32;
        for (stage, next) in stages.iter().zip(stages.iter().skip(1)) {
            let stage_end = accumulated + stage.fraction;
            if progress < stage_end - BOUNDARY_EPSILON {
                let local = if stage.fraction > 0.0 {
                    (progress - accumulated) / stage.fraction
                } else {
                    0.0
                };
                let amount = ease_in_out_quad(unit8(local));
                return blend_colors(stage.color, next.color, amount);
            }
            accumulated = stage_end;
        }

        self.last_color()
    }
}

/// Built-in presets; the first entry is the fallback for unknown names
pub const PRESETS: [ColorPreset; 4] = [
    ColorPreset::new(
        "sunrise",
        &[
            Stage::new(32, 0, 0, 0.15),
            Stage::new(80, 8, 0, 0.25),
            Stage::new(160, 32, 0, 0.35),
            Stage::new(255, 80, 16, 0.20),
            Stage::new(255, 180, 80, 0.15),
            Stage::new(255, 220, 180, 0.10),
        ],
    ),
    ColorPreset::new(
        OCEAN,
        &[
            Stage::new(0, 8, 32, 0.20),
            Stage::new(0, 32, 80, 0.25),
            Stage::new(0, 80, 160, 0.25),
            Stage::new(32, 160, 255, 0.20),
            Stage::new(80, 200, 255, 0.10),
        ],
    ),
    ColorPreset::new(
        "forest",
        &[
            Stage::new(8, 16, 0, 0.25),
            Stage::new(16, 40, 8, 0.25),
            Stage::new(40, 80, 16, 0.25),
            Stage::new(80, 160, 40, 0.15),
            Stage::new(120, 255, 80, 0.10),
        ],
    ),
    ColorPreset::new(
        "lavender",
        &[
            Stage::new(32, 0, 32, 0.20),
            Stage::new(80, 16, 80, 0.25),
            Stage::new(160, 80, 160, 0.25),
            Stage::new(200, 120, 180, 0.20),
            Stage::new(255, 180, 220, 0.10),
        ],
    ),
];

/// Look up a preset by exact name
pub fn find_preset<'t>(table: &'t [ColorPreset], name: &str) -> Result<&'t ColorPreset> {
    table
        .iter()
        .find(|preset| preset.name == name)
        .ok_or(Error::UnknownPreset)
}

/// Look up a preset, falling back to the first table entry
///
/// # Panics
///
/// Panics if `table` is empty.
pub fn resolve_preset<'t>(table: &'t [ColorPreset], name: &str) -> &'t ColorPreset {
    match find_preset(table, name) {
        Ok(preset) => preset,
        Err(err) => {
            let fallback = &table[0];
            warn!("{}: '{}', using '{}'", err, name, fallback.name);
            fallback
        }
    }
}
