// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 5, 4)
        .unwrap()
        .and_hms_opt(8, 15, 30)
        .unwrap()
}

fn add_args(text: &str, fields: AlertFields) -> AddArgs {
    AddArgs {
        text: text.to_string(),
        fields,
        disabled: false,
    }
}

fn at_time(time: &str) -> AlertFields {
    AlertFields {
        time: Some(time.to_string()),
        ..Default::default()
    }
}

#[test]
fn add_defaults_date_to_today_and_normalises_time() {
    let alert = add_args("Stretch", at_time("9:30")).build(now()).unwrap();

    assert_eq!(alert.date, "2026-05-04");
    assert_eq!(alert.time, "09:30:00");
    assert_eq!(alert.text, "Stretch");
    assert_eq!(alert.recurrence, Recurrence::Once);
    assert!(alert.enabled);
}

#[test]
fn add_requires_time() {
    let err = add_args("Stretch", AlertFields::default())
        .build(now())
        .unwrap_err();

    assert_eq!(err.message, "missing --time");
}

#[test]
fn add_disabled() {
    let mut args = add_args("Later", at_time("10:00"));
    args.disabled = true;

    assert!(!args.build(now()).unwrap().enabled);
}

#[parameterized(
    short = { "07:05", "07:05:00" },
    full = { "23:59:59", "23:59:59" },
    padded = { " 6:00 ", "06:00:00" },
)]
fn time_is_stored_with_seconds(input: &str, expected: &str) {
    assert_eq!(parse_time(input).unwrap(), expected);
}

#[parameterized(
    hour_out_of_range = { "25:00" },
    words = { "noon" },
    empty = { "" },
)]
fn bad_time_is_rejected(input: &str) {
    assert!(parse_time(input).is_err());
}

#[test]
fn weekdays_imply_weekly_and_dedupe() {
    let fields = AlertFields {
        time: Some("09:00".into()),
        weekdays: vec!["mon".into(), "Friday".into(), "MON".into()],
        ..Default::default()
    };

    let alert = add_args("Standup", fields).build(now()).unwrap();

    assert_eq!(
        alert.recurrence,
        Recurrence::Weekly {
            weekdays: vec![Weekday::Mon, Weekday::Fri]
        }
    );
}

#[test]
fn weekly_without_weekdays_is_rejected() {
    let fields = AlertFields {
        time: Some("09:00".into()),
        repeat: Some(RepeatArg::Weekly),
        ..Default::default()
    };

    let err = add_args("Standup", fields).build(now()).unwrap_err();

    assert!(err.message.contains("at least one weekday"));
}

#[test]
fn interval_requires_positive_every() {
    let missing = AlertFields {
        time: Some("09:00".into()),
        repeat: Some(RepeatArg::Interval),
        ..Default::default()
    };
    assert!(add_args("Drink", missing).build(now()).is_err());

    let negative = AlertFields {
        time: Some("09:00".into()),
        every: Some(-5),
        ..Default::default()
    };
    assert!(add_args("Drink", negative).build(now()).is_err());

    let ok = AlertFields {
        time: Some("09:00".into()),
        every: Some(45),
        ..Default::default()
    };
    assert_eq!(
        add_args("Drink", ok).build(now()).unwrap().recurrence,
        Recurrence::Interval {
            interval_minutes: 45
        }
    );
}

#[test]
fn conflicting_repeat_options_are_rejected() {
    let fields = AlertFields {
        time: Some("09:00".into()),
        repeat: Some(RepeatArg::Daily),
        every: Some(30),
        ..Default::default()
    };

    let err = add_args("Both", fields).build(now()).unwrap_err();

    assert!(err.message.contains("--repeat daily"));
}

#[test]
fn monthly_defaults_to_first_and_checks_range() {
    let fields = AlertFields {
        time: Some("09:00".into()),
        repeat: Some(RepeatArg::Monthly),
        ..Default::default()
    };
    assert_eq!(
        add_args("Rent", fields).build(now()).unwrap().recurrence,
        Recurrence::Monthly { day_of_month: 1 }
    );

    let fields = AlertFields {
        time: Some("09:00".into()),
        day_of_month: Some(32),
        ..Default::default()
    };
    assert!(add_args("Rent", fields).build(now()).is_err());
}

#[test]
fn edit_leaves_unset_fields_alone() {
    let original = Alert::new("2026-01-01", "09:00:00", "Stretch")
        .with_recurrence(Recurrence::Weekly {
            weekdays: vec![Weekday::Tue],
        })
        .with_display(Display::All);
    let args = EditArgs {
        index: 0,
        text: Some("Stretch more".into()),
        fields: AlertFields::default(),
    };

    let edited = args.patch(original.clone()).unwrap();

    assert_eq!(edited.text, "Stretch more");
    assert_eq!(edited.date, original.date);
    assert_eq!(edited.time, original.time);
    assert_eq!(edited.recurrence, original.recurrence);
    assert_eq!(edited.presentation, original.presentation);
}

#[test]
fn edit_repeat_weekly_keeps_existing_weekdays() {
    let original = Alert::new("2026-01-01", "09:00:00", "Gym").with_recurrence(Recurrence::Weekly {
        weekdays: vec![Weekday::Sat],
    });
    let args = EditArgs {
        index: 0,
        text: None,
        fields: AlertFields {
            repeat: Some(RepeatArg::Weekly),
            time: Some("07:00".into()),
            ..Default::default()
        },
    };

    let edited = args.patch(original).unwrap();

    assert_eq!(edited.time, "07:00:00");
    assert_eq!(
        edited.recurrence,
        Recurrence::Weekly {
            weekdays: vec![Weekday::Sat]
        }
    );
}

#[test]
fn presentation_overrides_are_validated() {
    let mut alert = Alert::new("2026-01-01", "09:00:00", "Look");
    let fields = AlertFields {
        display: Some(DisplayArg::All),
        transparency: Some(25.0),
        overlay_color: Some("10, 20, 30".into()),
        start_size: Some(120),
        ..Default::default()
    };

    fields.apply(&mut alert).unwrap();

    assert_eq!(alert.presentation.display, Display::All);
    assert_eq!(alert.presentation.transparency, Some(25.0));
    assert_eq!(alert.presentation.overlay_color, Some(Rgb(10, 20, 30)));
    assert_eq!(alert.presentation.start_size, Some(120));

    let too_clear = AlertFields {
        text_transparency: Some(140.0),
        ..Default::default()
    };
    assert!(too_clear.apply(&mut alert).is_err());
}

#[parameterized(
    expansion_too_long = { Some(1e300), None },
    expansion_zero = { Some(0.0), None },
    expansion_nan = { Some(f64::NAN), None },
    multiplier_too_large = { None, Some(11.0) },
    multiplier_infinite = { None, Some(f64::INFINITY) },
)]
fn presentation_timing_out_of_range_is_rejected(expansion: Option<f64>, multiplier: Option<f64>) {
    let mut alert = Alert::new("2026-01-01", "09:00:00", "Look");
    let fields = AlertFields {
        expansion_time: expansion,
        duration_multiplier: multiplier,
        ..Default::default()
    };

    assert!(fields.apply(&mut alert).is_err());
    assert_eq!(alert.presentation.expansion_time, None);
    assert_eq!(alert.presentation.duration_multiplier, None);
}

#[test]
fn presentation_timing_accepts_range_bounds() {
    let mut alert = Alert::new("2026-01-01", "09:00:00", "Look");
    let fields = AlertFields {
        expansion_time: Some(1440.0),
        duration_multiplier: Some(0.1),
        ..Default::default()
    };

    fields.apply(&mut alert).unwrap();

    assert_eq!(alert.presentation.expansion_time, Some(1440.0));
    assert_eq!(alert.presentation.duration_multiplier, Some(0.1));
}

#[parameterized(
    two_channels = { "1,2" },
    too_bright = { "0,0,256" },
    words = { "red" },
)]
fn bad_color_is_rejected(input: &str) {
    assert!(parse_rgb("--text-color", input).is_err());
}
