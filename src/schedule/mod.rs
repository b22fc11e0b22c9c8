//! Alarm scheduling
//!
//! [`SchedulerState`] owns the active alarm set and the preset table. It
//! answers two questions for the wake loop: is an alarm due this minute, and
//! how long may the device sleep before the next one.

mod alarm;
mod record;
mod shared;

use chrono::{Datelike, Days, NaiveDateTime};
use embassy_time::Duration;
use heapless::Vec;
use log::{debug, info, warn};

pub use alarm::{Alarm, AlarmId, TimeOfDay, WeekdayMask};
pub use record::{AlarmRecord, parse_time_of_day};
pub use shared::SharedScheduler;

use crate::{
    clock::WallClock,
    config::{MAX_ALARMS, RecordDefaults, SchedulerConfig},
    error::ParseError,
    preset::{ColorPreset, PRESETS, resolve_preset},
    renderer::RenderRequest,
};

/// Days searched ahead of today when looking for the next firing instant
///
/// Today plus a full week always reaches every weekday.
const SEARCH_DAYS: u64 = 8;

/// Outcome of applying one batch of alarm records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchReport {
    /// Alarms now active
    pub accepted: usize,
    /// Malformed records that were skipped
    pub skipped: usize,
    /// Valid records dropped because the set was already full
    pub ignored: usize,
}

/// Active alarms plus the tables and settings used to interpret them
#[derive(Debug, Clone)]
pub struct SchedulerState {
    alarms: Vec<Alarm, MAX_ALARMS>,
    presets: &'static [ColorPreset],
    config: SchedulerConfig,
    defaults: RecordDefaults,
}

impl Default for SchedulerState {
    fn default() -> Self {
        Self::new(SchedulerConfig::default())
    }
}

impl SchedulerState {
    /// Empty scheduler using the built-in presets
    pub const fn new(config: SchedulerConfig) -> Self {
        Self::with_presets(config, &PRESETS)
    }

    /// Empty scheduler with a custom preset table
    ///
    /// The first preset is the fallback for unknown names, so the table
    /// must not be empty.
    pub const fn with_presets(config: SchedulerConfig, presets: &'static [ColorPreset]) -> Self {
        assert!(!presets.is_empty(), "preset table must not be empty");
        Self {
            alarms: Vec::new(),
            presets,
            config,
            defaults: RecordDefaults::new(),
        }
    }

    #[must_use]
    pub fn with_record_defaults(mut self, defaults: RecordDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn alarms(&self) -> &[Alarm] {
        &self.alarms
    }

    pub const fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub const fn presets(&self) -> &'static [ColorPreset] {
        self.presets
    }

    /// Replace the whole alarm set, returning how many alarms were accepted
    ///
    /// See [`Self::replace_alarms_with_report`].
    pub fn replace_alarms(&mut self, records: &[AlarmRecord<'_>]) -> Result<usize, ParseError> {
        self.replace_alarms_with_report(records)
            .map(|report| report.accepted)
    }

    /// Replace the whole alarm set from a batch of records
    ///
    /// Malformed records are skipped and counted. Once [`MAX_ALARMS`] alarms
    /// are accepted the remaining records are ignored. The new set is built
    /// completely before it replaces the old one. When every record of a
    /// non-empty batch is malformed, the first error is returned and the
    /// current set is kept.
    pub fn replace_alarms_with_report(
        &mut self,
        records: &[AlarmRecord<'_>],
    ) -> Result<BatchReport, ParseError> {
        let (alarms, report) = build_alarm_set(records, &self.defaults)?;
        self.alarms = alarms;
        Ok(report)
    }

    /// Install an already validated set
    pub(crate) fn install(&mut self, alarms: Vec<Alarm, MAX_ALARMS>) {
        self.alarms = alarms;
    }

    pub(crate) const fn record_defaults(&self) -> &RecordDefaults {
        &self.defaults
    }

    /// First enabled alarm, in stored order, due during the minute of `now`
    pub fn check_due(&self, now: NaiveDateTime) -> Option<AlarmId> {
        let due = self.alarms.iter().find(|alarm| alarm.is_due(&now))?;
        info!(
            "alarm {} due at {:02}:{:02}",
            due.id.0,
            due.time.hour(),
            due.time.minute()
        );
        Some(due.id)
    }

    /// Earliest future firing instant across all enabled alarms
    ///
    /// Candidates at exactly `now` are not in the future and are skipped.
    pub fn next_alarm(&self, now: NaiveDateTime) -> Option<(AlarmId, NaiveDateTime)> {
        let today = now.date();
        let mut best: Option<(AlarmId, NaiveDateTime)> = None;

        for alarm in self.alarms.iter().filter(|alarm| alarm.enabled) {
            for offset in 0..SEARCH_DAYS {
                let Some(candidate) = today
                    .checked_add_days(Days::new(offset))
                    .and_then(|date| {
                        date.and_hms_opt(
                            u32::from(alarm.time.hour()),
                            u32::from(alarm.time.minute()),
                            0,
                        )
                    })
                else {
                    continue;
                };

                if !alarm.days.contains(candidate.weekday()) || candidate <= now {
                    continue;
                }
                if best.is_none_or(|(_, at)| candidate < at) {
                    best = Some((alarm.id, candidate));
                }
                // Later offsets of this alarm are only further out.
                break;
            }
        }

        best
    }

    /// Time until the next firing instant, clamped to the sleep ceiling
    ///
    /// With no enabled alarm the check-in interval is returned instead.
    pub fn time_until_next(&self, now: NaiveDateTime) -> Duration {
        let wait = match self.next_alarm(now) {
            Some((id, at)) => {
                let millis = (at - now).num_milliseconds().max(0).unsigned_abs();
                debug!("next alarm {} at {:?} in {} ms", id.0, at, millis);
                Duration::from_millis(millis)
            }
            None => {
                debug!("no upcoming alarm, checking in later");
                self.config.check_in
            }
        };

        wait.min(self.config.max_sleep)
    }

    /// [`Self::check_due`] against a clock that may not be synchronized
    ///
    /// An unavailable clock never triggers an alarm.
    pub fn due_alarm(&self, clock: &impl WallClock) -> Option<AlarmId> {
        match clock.local_now() {
            Ok(now) => self.check_due(now),
            Err(err) => {
                warn!("{}, skipping alarm check", err);
                None
            }
        }
    }

    /// [`Self::time_until_next`] against a clock that may not be synchronized
    ///
    /// An unavailable clock yields the check-in interval.
    pub fn next_wake(&self, clock: &impl WallClock) -> Duration {
        match clock.local_now() {
            Ok(now) => self.time_until_next(now),
            Err(err) => {
                warn!("{}, sleeping for the check-in interval", err);
                self.config.check_in.min(self.config.max_sleep)
            }
        }
    }

    /// Resolve an alarm into a render request
    ///
    /// Unknown preset names fall back to the first preset in the table.
    pub fn render_request(&self, id: AlarmId) -> Option<RenderRequest> {
        let alarm = self.alarms.iter().find(|alarm| alarm.id == id)?;
        let preset = resolve_preset(self.presets, &alarm.preset);
        Some(RenderRequest {
            preset,
            total_duration: Duration::from_secs(u64::from(alarm.duration_minutes) * 60),
            peak_brightness: alarm.brightness,
        })
    }

    /// The render request of the alarm due at `now`, if any
    pub fn due_request(&self, now: NaiveDateTime) -> Option<RenderRequest> {
        self.check_due(now).and_then(|id| self.render_request(id))
    }
}

/// Validate a batch into a fresh alarm set
pub(crate) fn build_alarm_set(
    records: &[AlarmRecord<'_>],
    defaults: &RecordDefaults,
) -> Result<(Vec<Alarm, MAX_ALARMS>, BatchReport), ParseError> {
    let mut alarms: Vec<Alarm, MAX_ALARMS> = Vec::new();
    let mut report = BatchReport::default();
    let mut first_error = None;

    for record in records {
        let parsed = Alarm::from_record(record, defaults).and_then(|alarm| {
            if alarms.iter().any(|existing| existing.id == alarm.id) {
                Err(ParseError::DuplicateId(alarm.id.0))
            } else {
                Ok(alarm)
            }
        });

        match parsed {
            Ok(alarm) => {
                if alarms.push(alarm).is_err() {
                    report.ignored += 1;
                }
            }
            Err(err) => {
                warn!("skipping alarm record {}: {}", record.id, err);
                first_error.get_or_insert(err);
                report.skipped += 1;
            }
        }
    }

    if alarms.is_empty() {
        if let Some(err) = first_error {
            return Err(err);
        }
    }

    report.accepted = alarms.len();
    info!(
        "loaded {} alarms ({} skipped, {} over capacity)",
        report.accepted, report.skipped, report.ignored
    );
    Ok((alarms, report))
}
