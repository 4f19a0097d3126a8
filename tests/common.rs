#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use hrclock::core::clock::ManualClock;
use hrclock::core::policy::TimePolicy;
use hrclock::core::session::SessionManager;
use hrclock::db::memory::MemoryStore;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

pub fn hrc() -> Command {
    cargo_bin_cmd!("hrclock")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_hrclock.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_hrclock_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// `init` a fresh test database
pub fn init_db(db_path: &str) {
    hrc()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

pub fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// In-memory session manager on UTC days with a clock the test controls.
pub fn memory_manager(at: DateTime<Utc>) -> (SessionManager<MemoryStore>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(at));
    let manager = SessionManager::new(
        MemoryStore::new(),
        Box::new(clock.clone()),
        TimePolicy::utc(),
    )
    .unwrap();
    (manager, clock)
}
