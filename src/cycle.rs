//! One wake cycle of the device
//!
//! Each time the device wakes it refreshes its alarms, plays a sequence if
//! one is due and goes back to sleep. The steps run one after another;
//! nothing touches the alarm set while a sequence is playing.

use chrono::{NaiveDateTime, Timelike};
use embassy_time::{Duration, Instant};
use log::{info, warn};

use crate::OutputDriver;
use crate::clock::WallClock;
use crate::config::SequenceTimings;
use crate::error::ParseError;
use crate::frame_scheduler::{FrameScheduler, SequenceOutcome};
use crate::renderer::{DEFAULT_SEED, RenderRequest, Renderer};
use crate::schedule::{AlarmId, AlarmRecord, BatchReport, SharedScheduler};
use crate::sequence::SunriseSequence;
use crate::signal::CancelSignal;
use crate::sleep::{SleepRequest, SleepScheduler, plan_sleep};

/// Producer of validated-shape alarm records
pub trait AlarmSource {
    /// Fetch a fresh batch and hand it to `apply`
    ///
    /// Returns `None` when the source could not be reached; `apply` is then
    /// never called.
    fn fetch<R>(&mut self, apply: impl FnOnce(&[AlarmRecord<'_>]) -> R) -> Option<R>;
}

/// What happened to the alarm set at the start of a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    Applied(BatchReport),
    /// Every record was malformed, the previous set was kept
    Rejected(ParseError),
    /// The source was unreachable, the previous set was kept
    Unavailable,
}

/// Summary of one wake cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    pub refresh: Refresh,
    /// Alarm whose sequence was played, if any
    pub triggered: Option<AlarmId>,
    pub outcome: Option<SequenceOutcome>,
    /// Sleep handed to the sleep scheduler
    pub sleep: SleepRequest,
}

/// Collaborators of the wake loop
pub struct WakeCycle<'a, S, C, O, X, P> {
    pub scheduler: &'a SharedScheduler,
    pub source: S,
    pub clock: C,
    pub output: O,
    pub cancel: X,
    pub sleeper: P,
    pub timings: SequenceTimings,
    pub led_count: usize,
    pub seed: u64,
    last_fired: Option<(AlarmId, NaiveDateTime)>,
}

impl<'a, S, C, O, X, P> WakeCycle<'a, S, C, O, X, P>
where
    S: AlarmSource,
    C: WallClock,
    O: OutputDriver,
    X: CancelSignal,
    P: SleepScheduler,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        scheduler: &'a SharedScheduler,
        source: S,
        clock: C,
        output: O,
        cancel: X,
        sleeper: P,
        led_count: usize,
    ) -> Self {
        Self {
            scheduler,
            source,
            clock,
            output,
            cancel,
            sleeper,
            timings: SequenceTimings::new(),
            led_count,
            seed: DEFAULT_SEED,
            last_fired: None,
        }
    }

    /// Run one full cycle, ending with a sleep request
    ///
    /// `now` and `wait` drive the sequence, as in [`FrameScheduler::run`].
    /// An alarm that already played (or was dismissed) during the current
    /// minute is not played again.
    pub fn run<const MAX_LEDS: usize>(
        &mut self,
        now: impl FnMut() -> Instant,
        wait: impl FnMut(Duration),
    ) -> CycleReport {
        let refresh = self.refresh();

        let mut triggered = None;
        let mut outcome = None;
        if let Some((id, at, request)) = self.due() {
            if self.last_fired == Some((id, at)) {
                info!("alarm {} already handled this minute", id.0);
            } else {
                self.last_fired = Some((id, at));
                triggered = Some(id);
                outcome = Some(self.play::<MAX_LEDS>(request, now, wait));
            }
        }

        let sleep = self.scheduler.read(|state| plan_sleep(state, &self.clock));
        info!(
            "sleeping for {} s (button wake: {})",
            sleep.duration.as_secs(),
            sleep.wake_on_button
        );
        self.sleeper.enter_sleep(sleep);

        CycleReport {
            refresh,
            triggered,
            outcome,
            sleep,
        }
    }

    fn refresh(&mut self) -> Refresh {
        let scheduler = self.scheduler;
        match self.source.fetch(|records| scheduler.replace_alarms(records)) {
            Some(Ok(report)) => Refresh::Applied(report),
            Some(Err(err)) => {
                warn!("alarm batch rejected: {}", err);
                Refresh::Rejected(err)
            }
            None => {
                let kept = scheduler.read(|state| state.alarms().len());
                warn!("alarm source unavailable, keeping {} alarms", kept);
                Refresh::Unavailable
            }
        }
    }

    /// Due alarm, the minute it is due in and its render request
    fn due(&self) -> Option<(AlarmId, NaiveDateTime, RenderRequest)> {
        let at = match self.clock.local_now() {
            Ok(at) => at,
            Err(err) => {
                warn!("{}, skipping alarm check", err);
                return None;
            }
        };
        let minute = at.with_second(0).and_then(|t| t.with_nanosecond(0))?;

        self.scheduler.read(|state| {
            let id = state.check_due(at)?;
            state.render_request(id).map(|request| (id, minute, request))
        })
    }

    fn play<const MAX_LEDS: usize>(
        &mut self,
        request: RenderRequest,
        now: impl FnMut() -> Instant,
        wait: impl FnMut(Duration),
    ) -> SequenceOutcome {
        self.cancel.reset();

        let renderer = Renderer::<MAX_LEDS>::with_seed(self.led_count, self.seed);
        let sequence = SunriseSequence::new(renderer, request, self.timings);
        let mut frames = FrameScheduler::new(sequence, &mut self.output, &self.cancel);
        frames.run(now, wait)
    }
}
