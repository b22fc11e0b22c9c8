mod tests {
    use dawn_composer::{
        Alarm, AlarmId, AlarmRecord, ParseError, RecordDefaults, TimeOfDay, WeekdayMask,
        schedule::parse_time_of_day,
    };

    fn record(time: &str) -> AlarmRecord<'_> {
        AlarmRecord {
            id: 7,
            time,
            days_of_week: &[1, 3],
            enabled: true,
            ..AlarmRecord::default()
        }
    }

    #[test]
    fn test_parse_time_of_day() {
        assert_eq!(parse_time_of_day("06:30"), Ok(TimeOfDay::new(6, 30).unwrap()));
        assert_eq!(parse_time_of_day("6:30"), Ok(TimeOfDay::new(6, 30).unwrap()));
        assert_eq!(parse_time_of_day("23:59:59"), Ok(TimeOfDay::new(23, 59).unwrap()));
        assert_eq!(parse_time_of_day(" 07:05 "), Ok(TimeOfDay::new(7, 5).unwrap()));
        assert_eq!(parse_time_of_day("00:00"), Ok(TimeOfDay::new(0, 0).unwrap()));
    }

    #[test]
    fn test_parse_time_of_day_rejects() {
        assert_eq!(parse_time_of_day("24:00"), Err(ParseError::HourOutOfRange(24)));
        assert_eq!(parse_time_of_day("12:60"), Err(ParseError::MinuteOutOfRange(60)));
        for text in [
            "", "1230", "12:3a", "12:", ":30", "007:05", "12:30:60", "12:30:00:00", "-1:30",
            "6:3", "06:3", "06:030", "06:30:5",
        ] {
            assert_eq!(parse_time_of_day(text), Err(ParseError::InvalidTime), "{text:?}");
        }
    }

    #[test]
    fn test_time_of_day_bounds() {
        assert!(TimeOfDay::new(23, 59).is_some());
        assert!(TimeOfDay::new(24, 0).is_none());
        assert!(TimeOfDay::new(0, 60).is_none());
    }

    #[test]
    fn test_from_record_defaults() {
        let alarm = Alarm::from_record(&record("06:30"), &RecordDefaults::default()).unwrap();
        assert_eq!(alarm.id, AlarmId(7));
        assert_eq!(alarm.time, TimeOfDay::new(6, 30).unwrap());
        assert_eq!(alarm.days, WeekdayMask::MONDAY.union(WeekdayMask::WEDNESDAY));
        assert!(alarm.enabled);
        assert_eq!(alarm.brightness, 255);
        assert_eq!(alarm.duration_minutes, 30);
        assert_eq!(alarm.preset.as_str(), "sunrise");
    }

    #[test]
    fn test_from_record_fields() {
        let record = AlarmRecord {
            brightness: Some(0),
            duration_minutes: Some(45),
            color_preset: Some("forest"),
            enabled: false,
            ..record("7:15")
        };
        let alarm = Alarm::from_record(&record, &RecordDefaults::default()).unwrap();
        assert_eq!(alarm.brightness, 0);
        assert_eq!(alarm.duration_minutes, 45);
        assert_eq!(alarm.preset.as_str(), "forest");
        assert!(!alarm.enabled);
    }

    #[test]
    fn test_custom_defaults() {
        let defaults = RecordDefaults {
            brightness: 90,
            duration_minutes: 10,
            preset: "ocean",
        };
        let alarm = Alarm::from_record(&record("05:00"), &defaults).unwrap();
        assert_eq!(alarm.brightness, 90);
        assert_eq!(alarm.duration_minutes, 10);
        assert_eq!(alarm.preset.as_str(), "ocean");
    }

    #[test]
    fn test_from_record_rejects() {
        let defaults = RecordDefaults::default();
        let check = |record: AlarmRecord<'_>, expected: ParseError| {
            assert_eq!(Alarm::from_record(&record, &defaults), Err(expected));
        };

        check(
            AlarmRecord {
                days_of_week: &[1, 7],
                ..record("06:30")
            },
            ParseError::WeekdayOutOfRange(7),
        );
        check(
            AlarmRecord {
                days_of_week: &[-1],
                ..record("06:30")
            },
            ParseError::WeekdayOutOfRange(-1),
        );
        check(
            AlarmRecord {
                brightness: Some(256),
                ..record("06:30")
            },
            ParseError::BrightnessOutOfRange(256),
        );
        check(
            AlarmRecord {
                brightness: Some(-1),
                ..record("06:30")
            },
            ParseError::BrightnessOutOfRange(-1),
        );
        check(
            AlarmRecord {
                duration_minutes: Some(0),
                ..record("06:30")
            },
            ParseError::InvalidDuration(0),
        );
        check(
            AlarmRecord {
                duration_minutes: Some(-5),
                ..record("06:30")
            },
            ParseError::InvalidDuration(-5),
        );
        check(
            AlarmRecord {
                color_preset: Some("a-very-long-preset"),
                ..record("06:30")
            },
            ParseError::PresetNameTooLong(18),
        );
        check(record("25:00"), ParseError::HourOutOfRange(25));
    }

    #[test]
    fn test_empty_days_never_fire() {
        let record = AlarmRecord {
            days_of_week: &[],
            ..record("06:30")
        };
        let alarm = Alarm::from_record(&record, &RecordDefaults::default()).unwrap();
        assert!(alarm.days.is_empty());
    }

    #[test]
    fn test_weekday_mask() {
        assert_eq!(WeekdayMask::from_days(&[0, 6, 9]), WeekdayMask::WEEKEND);
        assert_eq!(
            WeekdayMask::from_days(&[1, 2, 3, 4, 5]),
            WeekdayMask::WORK_WEEK
        );
        assert_eq!(
            WeekdayMask::WORK_WEEK.union(WeekdayMask::WEEKEND),
            WeekdayMask::EVERY_DAY
        );
        assert!(WeekdayMask::SUNDAY.contains_day(0));
        assert!(!WeekdayMask::SUNDAY.contains_day(7));
        assert!(WeekdayMask::WORK_WEEK.contains(chrono::Weekday::Fri));
        assert!(!WeekdayMask::WORK_WEEK.contains(chrono::Weekday::Sat));
        assert_eq!(WeekdayMask::SATURDAY.bits(), 0b100_0000);
    }
}
