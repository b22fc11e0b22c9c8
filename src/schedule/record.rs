//! Alarm record intake
//!
//! Records arrive from the alarm source loosely typed: a time string, a list
//! of weekday integers and optional tuning fields. They are validated one by
//! one into [`Alarm`]s.

use heapless::String;

use super::alarm::{Alarm, AlarmId, TimeOfDay, WeekdayMask};
use crate::{
    config::{MAX_PRESET_NAME, RecordDefaults},
    error::ParseError,
};

/// One alarm as supplied by the alarm source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AlarmRecord<'a> {
    pub id: u32,
    /// `"HH:MM"`, optionally followed by `":SS"`
    pub time: &'a str,
    /// Weekday integers, Sunday = 0 to Saturday = 6
    pub days_of_week: &'a [i32],
    pub enabled: bool,
    pub brightness: Option<i32>,
    pub duration_minutes: Option<i32>,
    pub color_preset: Option<&'a str>,
}

/// Parse `H:MM`, `HH:MM` or `HH:MM:SS`; seconds are validated and dropped
///
/// Minutes and seconds always take two digits.
pub fn parse_time_of_day(text: &str) -> Result<TimeOfDay, ParseError> {
    let mut parts = text.trim().split(':');
    let hour = parse_field(parts.next(), 1)?;
    let minute = parse_field(parts.next(), 2)?;
    if let Some(seconds) = parts.next() {
        if parse_field(Some(seconds), 2)? > 59 {
            return Err(ParseError::InvalidTime);
        }
    }
    if parts.next().is_some() {
        return Err(ParseError::InvalidTime);
    }

    if hour > 23 {
        return Err(ParseError::HourOutOfRange(hour));
    }
    if minute > 59 {
        return Err(ParseError::MinuteOutOfRange(minute));
    }

    #[allow(clippy::cast_possible_truncation)]
    TimeOfDay::new(hour as u8, minute as u8).ok_or(ParseError::InvalidTime)
}

/// `min_digits` to two ASCII digits
fn parse_field(field: Option<&str>, min_digits: usize) -> Result<u32, ParseError> {
    let field = field.ok_or(ParseError::InvalidTime)?;
    if !(min_digits..=2).contains(&field.len()) || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidTime);
    }
    field.parse().map_err(|_| ParseError::InvalidTime)
}

impl Alarm {
    /// Validate a record, filling omitted fields from `defaults`
    pub fn from_record(
        record: &AlarmRecord<'_>,
        defaults: &RecordDefaults,
    ) -> Result<Self, ParseError> {
        let time = parse_time_of_day(record.time)?;

        let mut days = WeekdayMask::NONE;
        for &day in record.days_of_week {
            let index = u8::try_from(day)
                .ok()
                .filter(|&d| d < 7)
                .ok_or(ParseError::WeekdayOutOfRange(day))?;
            days = days.with_day(index);
        }

        let brightness = match record.brightness {
            Some(value) => {
                u8::try_from(value).map_err(|_| ParseError::BrightnessOutOfRange(value))?
            }
            None => defaults.brightness,
        };

        let duration_minutes = match record.duration_minutes {
            Some(value) => u16::try_from(value)
                .ok()
                .filter(|&minutes| minutes > 0)
                .ok_or(ParseError::InvalidDuration(value))?,
            None => defaults.duration_minutes,
        };

        let name = record.color_preset.unwrap_or(defaults.preset);
        let preset = String::<MAX_PRESET_NAME>::try_from(name)
            .map_err(|()| ParseError::PresetNameTooLong(name.len()))?;

        Ok(Self {
            id: AlarmId(record.id),
            time,
            days,
            enabled: record.enabled,
            brightness,
            duration_minutes,
            preset,
        })
    }
}
