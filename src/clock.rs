//! Wall-clock source

use chrono::NaiveDateTime;

use crate::error::{Error, Result};

/// Supplies the current local date and time
///
/// Implementations return [`Error::ClockUnavailable`] until the clock has
/// been synchronized.
pub trait WallClock {
    fn local_now(&self) -> Result<NaiveDateTime>;
}

/// A fixed reading; `None` behaves like an unsynchronized clock
impl WallClock for Option<NaiveDateTime> {
    fn local_now(&self) -> Result<NaiveDateTime> {
        self.ok_or(Error::ClockUnavailable)
    }
}

impl<C: WallClock + ?Sized> WallClock for &C {
    fn local_now(&self) -> Result<NaiveDateTime> {
        (**self).local_now()
    }
}
