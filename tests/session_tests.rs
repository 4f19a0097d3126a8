use chrono::Duration;
use hrclock::core::clock::ManualClock;
use hrclock::core::policy::TimePolicy;
use hrclock::core::session::SessionManager;
use hrclock::db::memory::MemoryStore;
use hrclock::db::store::TimeEntryStore;
use hrclock::errors::{AppError, AppResult};
use hrclock::models::time_entry::{TimeEntry, TimeEntryFilter, TimeEntryPatch};
use std::sync::Arc;

mod common;
use common::{date, memory_manager, utc};

#[test]
fn full_day_is_eight_and_a_half_hours() {
    let (mgr, clock) = memory_manager(utc(2025, 9, 1, 9, 0, 0));

    let open = mgr.clock_in(1).unwrap();
    assert!(open.is_open());
    assert_eq!(open.total_hours, 0.0);
    assert_eq!(open.date, date(2025, 9, 1));

    clock.set(utc(2025, 9, 1, 17, 30, 0));
    let done = mgr.clock_out(1).unwrap();

    assert_eq!(done.id, 1);
    assert_eq!(done.total_hours, 8.5);
    assert_eq!(done.clock_out, Some(utc(2025, 9, 1, 17, 30, 0)));
    assert!(mgr.current_entry(1).unwrap().is_none());
    assert_eq!(mgr.entries_for_employee(1).unwrap(), vec![done]);
}

#[test]
fn clock_out_without_session_creates_nothing() {
    let (mgr, _clock) = memory_manager(utc(2025, 9, 1, 9, 0, 0));

    match mgr.clock_out(7) {
        Err(AppError::NotClockedIn(7)) => {}
        other => panic!("unexpected: {:?}", other),
    }

    assert!(mgr.into_store().is_empty());
}

#[test]
fn second_clock_in_keeps_the_first_session() {
    let (mgr, clock) = memory_manager(utc(2025, 9, 1, 9, 0, 0));
    let first = mgr.clock_in(1).unwrap();

    clock.advance(Duration::minutes(30));
    match mgr.clock_in(1) {
        Err(AppError::AlreadyClockedIn(1)) => {}
        other => panic!("unexpected: {:?}", other),
    }

    assert_eq!(mgr.current_entry(1).unwrap(), Some(first));
}

#[test]
fn employees_have_independent_sessions() {
    let (mgr, clock) = memory_manager(utc(2025, 9, 1, 8, 0, 0));
    mgr.clock_in(2).unwrap();
    clock.advance(Duration::hours(1));
    mgr.clock_in(1).unwrap();

    let open: Vec<i64> = mgr
        .open_sessions()
        .unwrap()
        .iter()
        .map(|e| e.employee_id)
        .collect();
    assert_eq!(open, vec![1, 2]);

    clock.advance(Duration::hours(1));
    assert_eq!(mgr.clock_out(2).unwrap().total_hours, 2.0);
    assert!(mgr.current_entry(1).unwrap().is_some());
}

#[test]
fn elapsed_follows_the_clock() {
    let (mgr, clock) = memory_manager(utc(2025, 9, 1, 9, 0, 0));
    assert_eq!(mgr.elapsed(1).unwrap(), None);

    mgr.clock_in(1).unwrap();
    clock.advance(Duration::seconds(3723));
    assert_eq!(mgr.elapsed(1).unwrap(), Some(Duration::seconds(3723)));
}

#[test]
fn clock_out_before_clock_in_is_rejected() {
    let (mgr, clock) = memory_manager(utc(2025, 9, 1, 9, 0, 0));
    mgr.clock_in(1).unwrap();

    clock.set(utc(2025, 9, 1, 8, 0, 0));
    assert!(matches!(mgr.clock_out(1), Err(AppError::InvalidTime(_))));
    assert!(mgr.current_entry(1).unwrap().is_some());
}

#[test]
fn weekly_sum_covers_exactly_seven_days() {
    let (mgr, clock) = memory_manager(utc(2025, 9, 1, 9, 0, 0));

    let work = |start, hours: i64, minutes: i64, employee| {
        clock.set(start);
        mgr.clock_in(employee).unwrap();
        clock.advance(Duration::hours(hours) + Duration::minutes(minutes));
        mgr.clock_out(employee).unwrap();
    };

    // Sunday before, Monday, Wednesday, following Monday, other employee
    work(utc(2025, 8, 31, 9, 0, 0), 4, 0, 1);
    work(utc(2025, 9, 1, 9, 0, 0), 8, 0, 1);
    work(utc(2025, 9, 3, 9, 0, 0), 7, 30, 1);
    work(utc(2025, 9, 8, 9, 0, 0), 6, 0, 1);
    work(utc(2025, 9, 2, 9, 0, 0), 5, 0, 2);

    let week = mgr.weekly_hours(1, date(2025, 9, 1)).unwrap();

    assert_eq!(week.week_end, date(2025, 9, 7));
    assert_eq!(week.total_hours, 15.5);
    assert_eq!(week.entries.len(), 2);
    assert!(week.entries.iter().all(|e| e.employee_id == 1));
    assert_eq!(week.daily_hours(), [8.0, 0.0, 7.5, 0.0, 0.0, 0.0, 0.0]);
}

#[test]
fn week_start_is_taken_as_given() {
    let (mgr, clock) = memory_manager(utc(2025, 9, 3, 9, 0, 0));
    mgr.clock_in(1).unwrap();
    clock.advance(Duration::hours(2));
    mgr.clock_out(1).unwrap();

    // a Wednesday start still spans seven days
    let week = mgr.weekly_hours(1, date(2025, 9, 3)).unwrap();
    assert_eq!(week.week_end, date(2025, 9, 9));
    assert_eq!(week.total_hours, 2.0);
}

#[test]
fn week_past_the_last_date_is_an_error() {
    let (mgr, _clock) = memory_manager(utc(2025, 9, 1, 9, 0, 0));
    assert!(matches!(
        mgr.weekly_hours(1, chrono::NaiveDate::MAX),
        Err(AppError::InvalidDate(_))
    ));
}

#[test]
fn today_without_entries_is_empty() {
    let (mgr, _clock) = memory_manager(utc(2025, 9, 1, 9, 0, 0));
    assert!(mgr.todays_entries().unwrap().is_empty());

    // an open session is not a persisted entry
    mgr.clock_in(1).unwrap();
    assert!(mgr.todays_entries().unwrap().is_empty());
}

#[test]
fn today_uses_the_configured_boundary() {
    let (mgr, clock) = memory_manager(utc(2025, 9, 1, 22, 0, 0));
    mgr.clock_in(1).unwrap();
    clock.advance(Duration::hours(1));
    mgr.clock_out(1).unwrap();

    clock.set(utc(2025, 9, 1, 23, 59, 59));
    assert_eq!(mgr.todays_entries().unwrap().len(), 1);

    clock.set(utc(2025, 9, 2, 0, 0, 0));
    assert!(mgr.todays_entries().unwrap().is_empty());
}

#[test]
fn at_most_one_open_session_per_employee() {
    let (mgr, clock) = memory_manager(utc(2025, 9, 1, 6, 0, 0));

    // a fixed pseudo-random sequence of punches for three employees
    let mut seed: u32 = 17;
    for _ in 0..200 {
        seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        let employee = i64::from((seed >> 8) % 3) + 1;
        clock.advance(Duration::minutes(i64::from((seed >> 4) % 50)));

        let _ = if (seed >> 16) % 2 == 0 {
            mgr.clock_in(employee).map(|_| ())
        } else {
            mgr.clock_out(employee).map(|_| ())
        };

        let open = mgr.open_sessions().unwrap();
        let mut ids: Vec<i64> = open.iter().map(|e| e.employee_id).collect();
        ids.dedup();
        assert_eq!(ids.len(), open.len());
        assert!(open.iter().all(TimeEntry::is_open));
    }

    let mut store = mgr.into_store();
    for e in store.list(&TimeEntryFilter::all()).unwrap() {
        assert!(!e.is_open());
        assert!(e.total_hours >= 0.0);
    }
}

#[test]
fn concurrent_clock_ins_yield_one_session() {
    let (mgr, _clock) = memory_manager(utc(2025, 9, 1, 9, 0, 0));

    let successes = std::thread::scope(|s| {
        let handles: Vec<_> = (0..8).map(|_| s.spawn(|| mgr.clock_in(5).is_ok())).collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count()
    });

    assert_eq!(successes, 1);
    assert_eq!(mgr.open_sessions().unwrap().len(), 1);
}

/// A store whose writes can be switched off.
struct FlakyStore {
    inner: MemoryStore,
    down: bool,
}

impl FlakyStore {
    fn check(&self) -> AppResult<()> {
        if self.down {
            Err(AppError::Other("disk unplugged".into()))
        } else {
            Ok(())
        }
    }
}

impl TimeEntryStore for FlakyStore {
    fn create(&mut self, entry: &TimeEntry) -> AppResult<TimeEntry> {
        self.check()?;
        self.inner.create(entry)
    }

    fn list(&mut self, filter: &TimeEntryFilter) -> AppResult<Vec<TimeEntry>> {
        self.inner.list(filter)
    }

    fn update(&mut self, id: i64, patch: &TimeEntryPatch) -> AppResult<TimeEntry> {
        self.check()?;
        self.inner.update(id, patch)
    }

    fn delete(&mut self, id: i64) -> AppResult<()> {
        self.check()?;
        self.inner.delete(id)
    }
}

#[test]
fn failed_persist_keeps_the_session_open() {
    let clock = Arc::new(ManualClock::new(utc(2025, 9, 1, 9, 0, 0)));
    let store = FlakyStore {
        inner: MemoryStore::new(),
        down: false,
    };
    let mgr = SessionManager::new(store, Box::new(clock.clone()), TimePolicy::utc()).unwrap();

    let open = mgr.clock_in(1).unwrap();
    clock.advance(Duration::hours(8));

    mgr.with_store(|s| {
        s.down = true;
        Ok(())
    })
    .unwrap();

    match mgr.clock_out(1) {
        Err(AppError::StoreUnavailable(reason)) => assert!(reason.contains("disk unplugged")),
        other => panic!("unexpected: {:?}", other),
    }
    assert_eq!(mgr.current_entry(1).unwrap(), Some(open));

    // retry once the store is back
    mgr.with_store(|s| {
        s.down = false;
        Ok(())
    })
    .unwrap();
    assert_eq!(mgr.clock_out(1).unwrap().total_hours, 8.0);
}
