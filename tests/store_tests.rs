use chrono::Duration;
use hrclock::core::clock::ManualClock;
use hrclock::core::entry::EntryLogic;
use hrclock::core::policy::TimePolicy;
use hrclock::core::session::SessionManager;
use hrclock::db::memory::MemoryStore;
use hrclock::db::migrate::pending_migrations;
use hrclock::db::pool::DbPool;
use hrclock::db::store::TimeEntryStore;
use hrclock::errors::AppError;
use hrclock::models::time_entry::{TimeEntry, TimeEntryFilter, TimeEntryPatch};
use std::sync::Arc;

mod common;
use common::{date, setup_test_db, utc};

fn completed(employee_id: i64, day: u32, hours: f64) -> TimeEntry {
    let start = utc(2025, 9, day, 9, 0, 0);
    TimeEntry {
        id: 0,
        employee_id,
        clock_in: start,
        clock_out: Some(start + Duration::minutes((hours * 60.0) as i64)),
        total_hours: hours,
        date: date(2025, 9, day),
    }
}

#[test]
fn sqlite_store_assigns_ids_and_filters() {
    let mut pool = DbPool::in_memory().unwrap();

    let a = pool.create(&completed(1, 1, 8.0)).unwrap();
    let b = pool.create(&completed(2, 2, 6.0)).unwrap();
    let c = pool.create(&completed(1, 3, 7.5)).unwrap();
    assert!(a.id > 0 && b.id > a.id && c.id > b.id);

    let all = pool.list(&TimeEntryFilter::all()).unwrap();
    assert_eq!(all, vec![a.clone(), b.clone(), c.clone()]);

    let emp1 = pool
        .list(&TimeEntryFilter::between(date(2025, 9, 1), date(2025, 9, 2)).for_employee(1))
        .unwrap();
    assert_eq!(emp1, vec![a]);

    assert_eq!(pool.get(c.id).unwrap(), c);
}

#[test]
fn sqlite_update_and_delete_unknown_ids() {
    let mut pool = DbPool::in_memory().unwrap();

    let patch = TimeEntryPatch {
        total_hours: Some(1.0),
        ..TimeEntryPatch::default()
    };
    assert!(matches!(
        pool.update(42, &patch),
        Err(AppError::EntryNotFound(42))
    ));
    assert!(matches!(pool.delete(42), Err(AppError::EntryNotFound(42))));
    assert!(matches!(pool.get(42), Err(AppError::EntryNotFound(42))));
}

#[test]
fn memory_store_ids_follow_the_highest() {
    let mut store = MemoryStore::with_entries(vec![TimeEntry {
        id: 10,
        ..completed(1, 1, 8.0)
    }]);
    assert_eq!(store.create(&completed(1, 2, 4.0)).unwrap().id, 11);
    assert_eq!(store.len(), 2);

    store.delete(10).unwrap();
    assert!(matches!(store.delete(10), Err(AppError::EntryNotFound(10))));
}

#[test]
fn clock_in_from_another_process_is_reported_as_already_clocked_in() {
    let db_path = setup_test_db("open_session_two_processes");
    let clock = Arc::new(ManualClock::new(utc(2025, 9, 1, 9, 0, 0)));

    let first = SessionManager::new(
        DbPool::open(&db_path).unwrap(),
        Box::new(clock.clone()),
        TimePolicy::utc(),
    )
    .unwrap();
    let second = SessionManager::new(
        DbPool::open(&db_path).unwrap(),
        Box::new(clock.clone()),
        TimePolicy::utc(),
    )
    .unwrap();

    second.clock_in(5).unwrap();
    match first.clock_in(5) {
        Err(AppError::AlreadyClockedIn(5)) => {}
        other => panic!("unexpected: {:?}", other),
    }
    assert!(first.current_entry(5).unwrap().is_none());
}

#[test]
fn open_session_survives_reopening_the_database() {
    let db_path = setup_test_db("open_session_restart");
    let clock = Arc::new(ManualClock::new(utc(2025, 9, 1, 9, 0, 0)));

    {
        let mgr = SessionManager::new(
            DbPool::open(&db_path).unwrap(),
            Box::new(clock.clone()),
            TimePolicy::utc(),
        )
        .unwrap();
        mgr.clock_in(3).unwrap();
    }

    clock.set(utc(2025, 9, 1, 17, 30, 0));
    let mgr = SessionManager::new(
        DbPool::open(&db_path).unwrap(),
        Box::new(clock.clone()),
        TimePolicy::utc(),
    )
    .unwrap();

    let open = mgr.current_entry(3).unwrap().expect("session restored");
    assert_eq!(open.clock_in, utc(2025, 9, 1, 9, 0, 0));
    assert!(matches!(mgr.clock_in(3), Err(AppError::AlreadyClockedIn(3))));

    let done = mgr.clock_out(3).unwrap();
    assert_eq!(done.total_hours, 8.5);

    let mut pool = mgr.into_store();
    assert!(pool.load_open_sessions().unwrap().is_empty());
    assert_eq!(pool.list(&TimeEntryFilter::all()).unwrap(), vec![done]);
}

#[test]
fn edit_recomputes_hours_and_date() {
    let mut pool = DbPool::in_memory().unwrap();
    let e = pool.create(&completed(1, 1, 8.0)).unwrap();

    let edited = EntryLogic::edit(
        &mut pool,
        e.id,
        None,
        Some(utc(2025, 9, 1, 12, 15, 0)),
        &TimePolicy::utc(),
    )
    .unwrap();
    assert_eq!(edited.total_hours, 3.25);
    assert_eq!(pool.get(e.id).unwrap(), edited);

    let err = EntryLogic::edit(
        &mut pool,
        e.id,
        Some(utc(2025, 9, 1, 13, 0, 0)),
        None,
        &TimePolicy::utc(),
    );
    assert!(matches!(err, Err(AppError::InvalidTime(_))));

    let moved = EntryLogic::edit(
        &mut pool,
        e.id,
        Some(utc(2025, 8, 31, 23, 0, 0)),
        None,
        &TimePolicy::utc(),
    )
    .unwrap();
    assert_eq!(moved.date, date(2025, 8, 31));
    assert_eq!(moved.total_hours, 13.25);
}

#[test]
fn delete_returns_the_removed_entry() {
    let mut pool = DbPool::in_memory().unwrap();
    let e = pool.create(&completed(4, 2, 5.0)).unwrap();

    assert_eq!(EntryLogic::delete(&mut pool, e.id).unwrap(), e);
    assert!(matches!(
        EntryLogic::delete(&mut pool, e.id),
        Err(AppError::EntryNotFound(_))
    ));
}

#[test]
fn migrations_are_recorded_once() {
    let db_path = setup_test_db("migrations_once");
    let pool = DbPool::open(&db_path).unwrap();
    assert!(pending_migrations(&pool.conn).unwrap().is_empty());
    drop(pool);

    let pool = DbPool::open(&db_path).unwrap();
    let applied: i64 = pool
        .conn
        .query_row(
            "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(applied, 4);
}
