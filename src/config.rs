//! Tunables for scheduling, record intake and the wake-up sequence

use embassy_time::Duration;

/// Maximum number of alarms held at once
pub const MAX_ALARMS: usize = 10;

/// Maximum length of a preset name carried by an alarm, in bytes
pub const MAX_PRESET_NAME: usize = 16;

/// Longest the device may sleep, whatever the next alarm is
pub const DEFAULT_MAX_SLEEP: Duration = Duration::from_secs(60 * 60);

/// Sleep length when no enabled alarm is upcoming
pub const DEFAULT_CHECK_IN: Duration = Duration::from_secs(60 * 60);

/// Scheduler configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Ceiling applied to every computed sleep duration
    pub max_sleep: Duration,
    /// Fallback sleep duration when there is nothing to wait for
    pub check_in: Duration,
}

impl SchedulerConfig {
    pub const fn new() -> Self {
        Self {
            max_sleep: DEFAULT_MAX_SLEEP,
            check_in: DEFAULT_CHECK_IN,
        }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Values applied when an alarm record leaves an optional field out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordDefaults {
    pub brightness: u8,
    pub duration_minutes: u16,
    pub preset: &'static str,
}

impl RecordDefaults {
    pub const fn new() -> Self {
        Self {
            brightness: 255,
            duration_minutes: 30,
            preset: "sunrise",
        }
    }
}

impl Default for RecordDefaults {
    fn default() -> Self {
        Self::new()
    }
}

/// Timing of the wake-up sequence phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceTimings {
    /// Ramp refresh delay at the midpoint, where colors move fastest
    pub ramp_min_delay: Duration,
    /// Ramp refresh delay at the very start and end
    pub ramp_max_delay: Duration,
    /// Length of the daylight hold after the ramp
    pub hold: Duration,
    /// Refresh interval during the hold
    pub hold_refresh: Duration,
    /// Brightness removed per fade-out step
    pub fade_step: u8,
    /// Interval between fade-out steps
    pub fade_interval: Duration,
}

impl SequenceTimings {
    pub const fn new() -> Self {
        Self {
            ramp_min_delay: Duration::from_millis(50),
            ramp_max_delay: Duration::from_millis(500),
            hold: Duration::from_secs(5 * 60),
            hold_refresh: Duration::from_secs(1),
            fade_step: 2,
            fade_interval: Duration::from_millis(50),
        }
    }
}

impl Default for SequenceTimings {
    fn default() -> Self {
        Self::new()
    }
}
