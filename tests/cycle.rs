mod tests {
    use core::cell::Cell;

    use chrono::{NaiveDate, NaiveDateTime};
    use dawn_composer::{
        AlarmId, AlarmRecord, AlarmSource, CancelFlag, OutputDriver, Refresh, Result,
        SchedulerState, SequenceOutcome, SequenceTimings, SharedScheduler, SleepRequest,
        SleepScheduler, WakeCycle, color::Rgb,
    };
    use embassy_time::{Duration, Instant};

    const LEDS: usize = 6;

    static MORNING: &[AlarmRecord<'static>] = &[AlarmRecord {
        id: 1,
        time: "06:30",
        days_of_week: &[1, 2, 3, 4, 5],
        enabled: true,
        brightness: Some(150),
        duration_minutes: Some(1),
        color_preset: None,
    }];

    struct FixedSource(Option<&'static [AlarmRecord<'static>]>);

    impl AlarmSource for FixedSource {
        fn fetch<R>(&mut self, apply: impl FnOnce(&[AlarmRecord<'_>]) -> R) -> Option<R> {
            self.0.map(apply)
        }
    }

    #[derive(Default)]
    struct Recorder {
        frames: Vec<(Vec<Rgb>, u8)>,
    }

    impl OutputDriver for Recorder {
        fn is_ready(&self) -> bool {
            true
        }

        fn write(&mut self, colors: &[Rgb], brightness: u8) -> Result<()> {
            self.frames.push((colors.to_vec(), brightness));
            Ok(())
        }
    }

    #[derive(Default)]
    struct SleepLog(Vec<SleepRequest>);

    impl SleepScheduler for SleepLog {
        fn enter_sleep(&mut self, request: SleepRequest) {
            self.0.push(request);
        }
    }

    /// Wednesday 2024-01-03
    fn wednesday(hour: u32, minute: u32) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(2024, 1, 3)
            .unwrap()
            .and_hms_opt(hour, minute, 5)
    }

    fn short_timings() -> SequenceTimings {
        SequenceTimings {
            hold: Duration::from_secs(2),
            fade_step: 50,
            ..SequenceTimings::default()
        }
    }

    #[test]
    fn test_due_alarm_plays_then_sleeps() {
        let scheduler = SharedScheduler::new(SchedulerState::default());
        let flag = CancelFlag::new();
        let mut cycle = WakeCycle::new(
            &scheduler,
            FixedSource(Some(MORNING)),
            wednesday(6, 30),
            Recorder::default(),
            &flag,
            SleepLog::default(),
            LEDS,
        );
        cycle.timings = short_timings();

        let clock = Cell::new(0u64);
        let report = cycle.run::<LEDS>(
            || Instant::from_millis(clock.get()),
            |wait: Duration| clock.set(clock.get() + wait.as_millis()),
        );

        assert!(matches!(report.refresh, Refresh::Applied(batch) if batch.accepted == 1));
        assert_eq!(report.triggered, Some(AlarmId(1)));
        assert_eq!(report.outcome, Some(SequenceOutcome::Completed));
        assert_eq!(report.sleep.duration, Duration::from_secs(3600));
        assert!(report.sleep.wake_on_button);
        assert_eq!(cycle.sleeper.0, [report.sleep]);

        let peak = cycle.output.frames.iter().map(|(_, b)| *b).max().unwrap();
        assert!(peak >= 140);
        let (pixels, brightness) = cycle.output.frames.last().unwrap();
        assert_eq!(*brightness, 0);
        assert!(pixels.iter().all(|&led| led == Rgb::default()));
        assert!(clock.get() >= 62_000);
    }

    #[test]
    fn test_same_minute_plays_once() {
        let scheduler = SharedScheduler::new(SchedulerState::default());
        let mut cycle = WakeCycle::new(
            &scheduler,
            FixedSource(Some(MORNING)),
            wednesday(6, 30),
            Recorder::default(),
            false,
            SleepLog::default(),
            LEDS,
        );
        cycle.timings = short_timings();

        let clock = Cell::new(0u64);
        let now = || Instant::from_millis(clock.get());
        let wait = |wait: Duration| clock.set(clock.get() + wait.as_millis());

        assert_eq!(cycle.run::<LEDS>(now, wait).triggered, Some(AlarmId(1)));
        let frames = cycle.output.frames.len();

        let report = cycle.run::<LEDS>(now, wait);
        assert_eq!(report.triggered, None);
        assert_eq!(report.outcome, None);
        assert_eq!(cycle.output.frames.len(), frames);
        assert_eq!(cycle.sleeper.0.len(), 2);
    }

    #[test]
    fn test_nothing_due_goes_to_sleep() {
        let scheduler = SharedScheduler::new(SchedulerState::default());
        let mut cycle = WakeCycle::new(
            &scheduler,
            FixedSource(Some(MORNING)),
            wednesday(6, 10),
            Recorder::default(),
            false,
            SleepLog::default(),
            LEDS,
        );

        let report = cycle.run::<LEDS>(|| Instant::from_millis(0), |_| {});
        assert_eq!(report.triggered, None);
        assert_eq!(report.sleep.duration, Duration::from_secs(20 * 60 - 5));
        assert!(cycle.output.frames.is_empty());
    }

    #[test]
    fn test_unreachable_source_keeps_alarms() {
        let scheduler = SharedScheduler::new(SchedulerState::default());
        scheduler.replace_alarms(MORNING).unwrap();

        let mut cycle = WakeCycle::new(
            &scheduler,
            FixedSource(None),
            wednesday(6, 10),
            Recorder::default(),
            false,
            SleepLog::default(),
            LEDS,
        );
        let report = cycle.run::<LEDS>(|| Instant::from_millis(0), |_| {});

        assert_eq!(report.refresh, Refresh::Unavailable);
        assert_eq!(scheduler.read(|state| state.alarms().len()), 1);
        assert_eq!(report.sleep.duration, Duration::from_secs(20 * 60 - 5));
    }

    #[test]
    fn test_rejected_batch_keeps_alarms() {
        static BROKEN: &[AlarmRecord<'static>] = &[AlarmRecord {
            id: 2,
            time: "not a time",
            days_of_week: &[1],
            enabled: true,
            brightness: None,
            duration_minutes: None,
            color_preset: None,
        }];

        let scheduler = SharedScheduler::new(SchedulerState::default());
        scheduler.replace_alarms(MORNING).unwrap();

        let mut cycle = WakeCycle::new(
            &scheduler,
            FixedSource(Some(BROKEN)),
            wednesday(6, 10),
            Recorder::default(),
            false,
            SleepLog::default(),
            LEDS,
        );
        let report = cycle.run::<LEDS>(|| Instant::from_millis(0), |_| {});

        assert!(matches!(report.refresh, Refresh::Rejected(_)));
        assert_eq!(scheduler.read(|state| state.alarms()[0].id), AlarmId(1));
    }

    #[test]
    fn test_unsynced_clock_never_triggers() {
        let scheduler = SharedScheduler::new(SchedulerState::default());
        let mut cycle = WakeCycle::new(
            &scheduler,
            FixedSource(Some(MORNING)),
            None::<NaiveDateTime>,
            Recorder::default(),
            false,
            SleepLog::default(),
            LEDS,
        );
        let report = cycle.run::<LEDS>(|| Instant::from_millis(0), |_| {});

        assert_eq!(report.triggered, None);
        assert_eq!(report.sleep.duration, Duration::from_secs(3600));
        assert!(cycle.output.frames.is_empty());
    }

    #[test]
    fn test_dismiss_cancels_sequence() {
        let scheduler = SharedScheduler::new(SchedulerState::default());
        let flag = CancelFlag::new();
        // A press left over from before the alarm is ignored
        flag.raise();

        let mut cycle = WakeCycle::new(
            &scheduler,
            FixedSource(Some(MORNING)),
            wednesday(6, 30),
            Recorder::default(),
            &flag,
            SleepLog::default(),
            LEDS,
        );

        let clock = Cell::new(0u64);
        let report = cycle.run::<LEDS>(
            || Instant::from_millis(clock.get()),
            |wait: Duration| {
                clock.set(clock.get() + wait.as_millis());
                if clock.get() >= 20_000 {
                    flag.raise();
                }
            },
        );

        assert_eq!(report.outcome, Some(SequenceOutcome::Cancelled));
        assert!((20_000..20_200).contains(&clock.get()));
        assert_eq!(cycle.output.frames.last().unwrap().1, 0);
        assert_eq!(cycle.sleeper.0.len(), 1);
    }
}
