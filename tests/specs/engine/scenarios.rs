// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! End-to-end scheduling scenarios
//!
//! Drive the engine and executor with a fake clock, presenter and persister,
//! the way the daemon loop does.

use chrono::{NaiveDateTime, TimeDelta, Weekday};
use ga_adapters::{FakePersister, FakePresenter};
use ga_core::{Alert, Clock, Display, FakeClock, Recurrence};
use ga_engine::{Executor, SchedulingEngine};

fn dt(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

struct Harness {
    engine: SchedulingEngine<FakeClock>,
    executor: Executor<FakePresenter, FakePersister>,
    clock: FakeClock,
    presenter: FakePresenter,
    persister: FakePersister,
}

impl Harness {
    async fn start(now: &str, alerts: Vec<Alert>, screens: usize) -> Self {
        let clock = FakeClock::at(dt(now));
        let presenter = FakePresenter::with_screens(screens);
        let persister = FakePersister::new();
        let mut engine = SchedulingEngine::new(alerts, clock.clone());
        let executor = Executor::new(presenter.clone(), persister.clone());
        let effects = engine.initialize();
        executor.execute_all(effects).await;
        Self {
            engine,
            executor,
            clock,
            presenter,
            persister,
        }
    }

    /// Jump to `at` and run whatever is due, as the daemon loop would
    async fn run_until(&mut self, at: &str) {
        self.clock.set(dt(at));
        let effects = self.engine.poll(dt(at));
        self.executor.execute_all(effects).await;
    }

    fn shown_texts(&self) -> Vec<String> {
        self.presenter
            .presented()
            .into_iter()
            .map(|a| a.text)
            .collect()
    }
}

#[tokio::test]
async fn passed_one_shot_is_disabled_and_saved_at_startup() {
    let h = Harness::start(
        "2025-06-01 12:00:00",
        vec![Alert::new("2025-01-01", "09:00:00", "New year")],
        1,
    )
    .await;

    assert!(!h.engine.alerts()[0].enabled);
    assert!(h.engine.armed().is_empty());
    let saved = h.persister.last_saved().unwrap();
    assert!(!saved[0].enabled);
    assert!(h.shown_texts().is_empty());
}

#[tokio::test]
async fn a_day_of_alerts() {
    let alerts = vec![
        Alert::new("2025-06-02", "09:00:00", "Standup").with_recurrence(Recurrence::Weekly {
            weekdays: vec![Weekday::Mon, Weekday::Fri],
        }),
        Alert::new("2025-06-02", "12:30:00", "Lunch"),
        Alert::new("2025-06-02", "08:00:00", "Water")
            .with_recurrence(Recurrence::Interval {
                interval_minutes: 120,
            }),
    ];
    // 2025-06-02 is a Monday
    let mut h = Harness::start("2025-06-02 07:00:00", alerts, 1).await;

    h.run_until("2025-06-02 08:00:00").await;
    h.run_until("2025-06-02 09:00:00").await;
    assert_eq!(h.shown_texts(), vec!["Water", "Standup"]);

    // Standup moves on to Friday, water to 10:00
    assert_eq!(
        h.engine.armed(),
        vec![
            (0, dt("2025-06-06 09:00:00")),
            (1, dt("2025-06-02 12:30:00")),
            (2, dt("2025-06-02 10:00:00")),
        ]
    );

    // A late wake runs water once and keeps it on its grid
    h.run_until("2025-06-02 12:45:00").await;
    assert_eq!(h.shown_texts(), vec!["Water", "Standup", "Water", "Lunch"]);
    assert!(!h.engine.alerts()[1].enabled);
    assert!(!h.persister.last_saved().unwrap()[1].enabled);
    assert_eq!(h.engine.armed()[1], (2, dt("2025-06-02 14:00:00")));
}

#[tokio::test]
async fn delay_snoozes_what_is_showing_once_per_alert() {
    let alerts = vec![Alert::new("2025-06-02", "09:00:00", "Everywhere")
        .with_recurrence(Recurrence::Daily)
        .with_display(Display::All)];
    let mut h = Harness::start("2025-06-02 08:59:00", alerts, 3).await;

    h.run_until("2025-06-02 09:00:00").await;
    assert_eq!(h.executor.showing().await.len(), 3);

    let showing = h.executor.showing().await;
    let (count, effects) = h.engine.delay_active(10, &showing).unwrap();
    h.executor.execute_all(effects).await;

    assert_eq!(count, 1);
    assert!(h.executor.showing().await.is_empty());
    assert_eq!(h.engine.next_deadline(), Some(dt("2025-06-02 09:10:00")));

    h.run_until("2025-06-02 09:10:00").await;
    let presented = h.presenter.presented();
    assert_eq!(presented.len(), 2);
    assert_eq!(presented[1].recurrence, Recurrence::Once);
    assert_eq!(presented[1].time, "09:10:00");
    assert!(h.engine.delayed().is_empty());
    // The original keeps its daily schedule
    assert_eq!(h.engine.armed(), vec![(0, dt("2025-06-03 09:00:00"))]);
}

#[tokio::test]
async fn removing_an_alert_keeps_the_others_on_time() {
    let alerts = vec![
        Alert::new("2025-06-02", "09:00:00", "a").with_recurrence(Recurrence::Daily),
        Alert::new("2025-06-02", "10:00:00", "b").disabled(),
        Alert::new("2025-06-02", "11:00:00", "c").with_recurrence(Recurrence::Daily),
        Alert::new("2025-06-02", "12:00:00", "d").disabled(),
    ];
    let mut h = Harness::start("2025-06-02 08:00:00", alerts, 1).await;

    let (removed, effects) = h.engine.remove_alert(0).unwrap();
    h.executor.execute_all(effects).await;

    assert_eq!(removed.text, "a");
    assert_eq!(h.engine.armed(), vec![(1, dt("2025-06-02 11:00:00"))]);
    assert_eq!(h.persister.last_saved().unwrap().len(), 3);

    h.run_until("2025-06-02 11:00:00").await;
    assert_eq!(h.shown_texts(), vec!["c"]);
}

#[tokio::test]
async fn long_waits_are_chained_through_the_timer_ceiling() {
    let alerts = vec![Alert::new("2025-09-01", "09:00:00", "Quarterly")];
    let mut h = Harness::start("2025-06-01 09:00:00", alerts, 1).await;

    // The first wake is at the ceiling, well before the alert
    let first_wake = h.engine.next_deadline().unwrap();
    assert!(first_wake < dt("2025-09-01 09:00:00"));
    assert_eq!(h.engine.armed(), vec![(0, dt("2025-09-01 09:00:00"))]);

    let mut wakes = 0;
    while let Some(next) = h.engine.next_deadline() {
        h.clock.set(next);
        let effects = h.engine.poll(next);
        h.executor.execute_all(effects).await;
        wakes += 1;
        assert!(wakes < 10, "ceiling wakes never reached the alert");
    }

    assert_eq!(h.shown_texts(), vec!["Quarterly"]);
    assert!(!h.engine.alerts()[0].enabled);
    assert!(h.clock.now() - dt("2025-06-01 09:00:00") > TimeDelta::days(90));
}
