//! Error types
//!
//! Every error in this crate is recoverable. Callers skip, fall back or
//! abort to a cleared strip; nothing here is meant to stop the device.

use thiserror::Error;

/// A malformed alarm record
///
/// The offending record is skipped, the rest of its batch is still applied.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// Time string is not `H:MM`, `HH:MM` or `HH:MM:SS`
    #[error("time is not in HH:MM format")]
    InvalidTime,

    #[error("hour {0} out of range (0..=23)")]
    HourOutOfRange(u32),

    #[error("minute {0} out of range (0..=59)")]
    MinuteOutOfRange(u32),

    /// Weekday integers are 0 (Sunday) to 6 (Saturday)
    #[error("weekday {0} out of range (0..=6)")]
    WeekdayOutOfRange(i32),

    #[error("brightness {0} out of range (0..=255)")]
    BrightnessOutOfRange(i32),

    /// Ramp duration must be a positive number of minutes
    #[error("duration {0} is not a positive number of minutes")]
    InvalidDuration(i32),

    #[error("preset name is {0} bytes long")]
    PresetNameTooLong(usize),

    /// Another record in the same batch already uses this id
    #[error("duplicate alarm id {0}")]
    DuplicateId(u32),
}

/// Errors surfaced by the scheduler, renderer and their collaborators
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Alarm record could not be parsed
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Wall clock is not synchronized yet
    #[error("wall clock is not available")]
    ClockUnavailable,

    /// Preset name is not in the preset table
    #[error("unknown color preset")]
    UnknownPreset,

    /// LED strip is not ready to accept frames
    #[error("LED strand is not available")]
    StrandUnavailable,
}

pub type Result<T> = core::result::Result<T, Error>;
