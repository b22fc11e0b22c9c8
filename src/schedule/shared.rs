//! Scheduler shared between the wake loop and the alarm refresh path
//!
//! Built on `critical-section`, so it is safe to touch from interrupt
//! handlers as well as from the main loop.

use core::cell::RefCell;

use critical_section::Mutex;

use super::{AlarmRecord, BatchReport, SchedulerState, build_alarm_set};
use crate::error::ParseError;

/// A [`SchedulerState`] behind a critical-section mutex
///
/// Readers never observe a half-replaced alarm set: a batch is validated
/// outside the lock and swapped in as a whole.
pub struct SharedScheduler {
    inner: Mutex<RefCell<SchedulerState>>,
}

impl SharedScheduler {
    pub const fn new(state: SchedulerState) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(state)),
        }
    }

    /// Run `f` with shared access to the scheduler
    pub fn read<R>(&self, f: impl FnOnce(&SchedulerState) -> R) -> R {
        critical_section::with(|cs| f(&self.inner.borrow(cs).borrow()))
    }

    /// Replace the alarm set from a batch of records
    ///
    /// Same contract as [`SchedulerState::replace_alarms_with_report`].
    pub fn replace_alarms(&self, records: &[AlarmRecord<'_>]) -> Result<BatchReport, ParseError> {
        let defaults = self.read(|state| *state.record_defaults());
        let (alarms, report) = build_alarm_set(records, &defaults)?;
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().install(alarms));
        Ok(report)
    }
}
