use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use heapless::String;

use crate::config::MAX_PRESET_NAME;

/// Externally assigned alarm identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AlarmId(pub u32);

/// Hour and minute an alarm fires at
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    /// Returns `None` unless `hour < 24` and `minute < 60`
    pub const fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Self { hour, minute })
    }

    pub const fn hour(self) -> u8 {
        self.hour
    }

    pub const fn minute(self) -> u8 {
        self.minute
    }

    /// True when `now` falls inside this minute, seconds ignored
    pub fn matches(self, now: &NaiveDateTime) -> bool {
        now.hour() == u32::from(self.hour) && now.minute() == u32::from(self.minute)
    }
}

/// Days of the week an alarm recurs on
///
/// Bit `n` is day `n`, counted from Sunday = 0 to Saturday = 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WeekdayMask(u8);

impl WeekdayMask {
    pub const NONE: Self = Self(0);
    pub const SUNDAY: Self = Self(1 << 0);
    pub const MONDAY: Self = Self(1 << 1);
    pub const TUESDAY: Self = Self(1 << 2);
    pub const WEDNESDAY: Self = Self(1 << 3);
    pub const THURSDAY: Self = Self(1 << 4);
    pub const FRIDAY: Self = Self(1 << 5);
    pub const SATURDAY: Self = Self(1 << 6);
    /// Monday to Friday
    pub const WORK_WEEK: Self = Self(0b011_1110);
    /// Saturday and Sunday
    pub const WEEKEND: Self = Self(0b100_0001);
    pub const EVERY_DAY: Self = Self(0b111_1111);

    /// Build a mask from day indices; indices above 6 are ignored
    pub fn from_days(days: &[u8]) -> Self {
        days.iter()
            .filter(|&&day| day < 7)
            .fold(Self::NONE, |mask, &day| mask.with_day(day))
    }

    /// Raw bits, Sunday in bit 0
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn with_day(self, day: u8) -> Self {
        if day > 6 {
            return self;
        }
        Self(self.0 | (1 << day))
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains_day(self, day: u8) -> bool {
        day < 7 && self.0 & (1 << day) != 0
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn contains(self, weekday: Weekday) -> bool {
        self.contains_day(weekday.num_days_from_sunday() as u8)
    }
}

/// One recurring wake event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alarm {
    pub id: AlarmId,
    pub time: TimeOfDay,
    pub days: WeekdayMask,
    pub enabled: bool,
    /// Peak brightness reached at the end of the ramp
    pub brightness: u8,
    /// Length of the ramp phase
    pub duration_minutes: u16,
    /// Key into the preset table, resolved when the alarm fires
    pub preset: String<MAX_PRESET_NAME>,
}

impl Alarm {
    /// True when this alarm should fire during the minute containing `now`
    pub fn is_due(&self, now: &NaiveDateTime) -> bool {
        self.enabled && self.time.matches(now) && self.days.contains(now.weekday())
    }
}
