//! Low-power sleep planning

use embassy_time::Duration;
use log::debug;

use crate::clock::WallClock;
use crate::schedule::SchedulerState;

/// What the device asks of the platform before it goes to sleep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SleepRequest {
    /// Already clamped to the scheduler's sleep ceiling
    pub duration: Duration,
    /// Wake early when the button is pressed
    pub wake_on_button: bool,
}

/// Puts the device to sleep
///
/// How sleep is entered is up to the platform. On hardware this usually
/// never returns.
pub trait SleepScheduler {
    fn enter_sleep(&mut self, request: SleepRequest);
}

impl<S: SleepScheduler + ?Sized> SleepScheduler for &mut S {
    fn enter_sleep(&mut self, request: SleepRequest) {
        (**self).enter_sleep(request);
    }
}

/// Plan the next sleep from the alarm set
///
/// An unavailable clock falls back to the check-in interval.
pub fn plan_sleep(state: &SchedulerState, clock: &impl WallClock) -> SleepRequest {
    let request = SleepRequest {
        duration: state.next_wake(clock),
        wake_on_button: true,
    };
    debug!("planned sleep of {} s", request.duration.as_secs());
    request
}
