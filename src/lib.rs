#![no_std]

pub mod clock;
pub mod color;
pub mod config;
pub mod cycle;
pub mod effect;
pub mod error;
pub mod frame_scheduler;
pub mod indicator;
#[cfg(feature = "esp32-log")]
pub mod logging;
pub mod math8;
pub mod preset;
pub mod renderer;
pub mod schedule;
pub mod sequence;
pub mod signal;
pub mod sleep;

pub use clock::WallClock;
pub use config::{RecordDefaults, SchedulerConfig, SequenceTimings};
pub use cycle::{AlarmSource, CycleReport, Refresh, WakeCycle};
pub use error::{Error, ParseError, Result};
pub use frame_scheduler::{FrameResult, FrameScheduler, FrameStatus, SequenceOutcome};
pub use indicator::{ButtonFeedback, Indicator, StatusBlink, TestPattern};
pub use preset::{ColorPreset, PRESETS, Stage, find_preset, resolve_preset};
pub use renderer::{Frame, RenderRequest, Renderer};
pub use schedule::{
    Alarm, AlarmId, AlarmRecord, BatchReport, SchedulerState, SharedScheduler, TimeOfDay,
    WeekdayMask,
};
pub use sequence::{Phase, SequenceFrame, SunriseSequence};
pub use signal::{CancelFlag, CancelSignal};
pub use sleep::{SleepRequest, SleepScheduler, plan_sleep};

pub use color::{Hsv, Rgb};
pub use embassy_time::{Duration, Instant};

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// The sequence driver and the indicators are generic over it.
pub trait OutputDriver {
    /// Whether the strip can take a frame right now
    fn is_ready(&self) -> bool;

    /// Write colors to the LED strip at a global brightness
    ///
    /// Fails with [`Error::StrandUnavailable`] when the strip rejects the frame.
    fn write(&mut self, colors: &[Rgb], brightness: u8) -> Result<()>;
}

impl<O: OutputDriver + ?Sized> OutputDriver for &mut O {
    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }

    fn write(&mut self, colors: &[Rgb], brightness: u8) -> Result<()> {
        (**self).write(colors, brightness)
    }
}
