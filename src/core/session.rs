//! Time clock session manager.
//!
//! Keeps at most one open session per employee and computes elapsed and
//! historical totals. Open sessions and the record store sit behind a single
//! mutex: every operation, including its persistence call, runs while holding
//! it, so overlapping clock-in / clock-out calls are applied one at a time.

use crate::core::calculator::hours::{hours_between, sum_hours};
use crate::core::clock::Clock;
use crate::core::policy::TimePolicy;
use crate::db::store::TimeEntryStore;
use crate::errors::{AppError, AppResult};
use crate::models::time_entry::{TimeEntry, TimeEntryFilter};
use crate::models::weekly::WeeklyAggregate;
use chrono::{Duration, NaiveDate};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

struct SessionState<S> {
    store: S,
    open: HashMap<i64, TimeEntry>,
}

pub struct SessionManager<S: TimeEntryStore> {
    state: Mutex<SessionState<S>>,
    clock: Box<dyn Clock>,
    policy: TimePolicy,
}

/// Any failure of the record store during a session operation is reported
/// as `StoreUnavailable`. Lookups that found nothing and a session opened
/// elsewhere keep their meaning.
fn store_error(e: AppError) -> AppError {
    match e {
        AppError::StoreUnavailable(_)
        | AppError::EntryNotFound(_)
        | AppError::AlreadyClockedIn(_) => e,
        other => AppError::StoreUnavailable(other.to_string()),
    }
}

impl<S: TimeEntryStore> SessionManager<S> {
    /// Build a manager and restore the open sessions the store remembers.
    pub fn new(mut store: S, clock: Box<dyn Clock>, policy: TimePolicy) -> AppResult<Self> {
        let mut open: HashMap<i64, TimeEntry> = HashMap::new();
        for entry in store.load_open_sessions().map_err(store_error)? {
            // keep the earliest if a store ever reports duplicates
            match open.get(&entry.employee_id) {
                Some(cur) if cur.clock_in <= entry.clock_in => {}
                _ => {
                    open.insert(entry.employee_id, entry);
                }
            }
        }

        Ok(Self {
            state: Mutex::new(SessionState { store, open }),
            clock,
            policy,
        })
    }

    pub fn policy(&self) -> &TimePolicy {
        &self.policy
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, SessionState<S>>> {
        self.state
            .lock()
            .map_err(|_| AppError::Other("session state lock poisoned".into()))
    }

    /// Calendar date of "now" under the configured day boundary.
    pub fn today(&self) -> NaiveDate {
        self.policy.boundary.date_of(&self.clock.now())
    }

    // ---------------------------
    // Clock in / out
    // ---------------------------

    pub fn clock_in(&self, employee_id: i64) -> AppResult<TimeEntry> {
        let mut state = self.lock()?;

        if state.open.contains_key(&employee_id) {
            return Err(AppError::AlreadyClockedIn(employee_id));
        }

        let now = self.clock.now();
        let entry = TimeEntry::open(employee_id, now, self.policy.boundary.date_of(&now));

        state
            .store
            .save_open_session(&entry)
            .map_err(store_error)?;
        state.open.insert(employee_id, entry.clone());

        Ok(entry)
    }

    /// Close the employee's session and persist it. On failure the session
    /// stays open so the call can be retried.
    pub fn clock_out(&self, employee_id: i64) -> AppResult<TimeEntry> {
        let mut state = self.lock()?;

        let open = state
            .open
            .get(&employee_id)
            .cloned()
            .ok_or(AppError::NotClockedIn(employee_id))?;

        let now = self.clock.now();
        if now < open.clock_in {
            return Err(AppError::InvalidTime(format!(
                "clock-out at {} precedes clock-in at {}",
                now.to_rfc3339(),
                open.clock_in.to_rfc3339()
            )));
        }

        let completed = TimeEntry {
            clock_out: Some(now),
            total_hours: hours_between(&open.clock_in, &now, self.policy.rounding),
            ..open
        };

        let saved = state
            .store
            .complete_session(&completed)
            .map_err(store_error)?;
        state.open.remove(&employee_id);

        Ok(saved)
    }

    // ---------------------------
    // Queries
    // ---------------------------

    pub fn current_entry(&self, employee_id: i64) -> AppResult<Option<TimeEntry>> {
        Ok(self.lock()?.open.get(&employee_id).cloned())
    }

    /// All open sessions, ordered by employee id.
    pub fn open_sessions(&self) -> AppResult<Vec<TimeEntry>> {
        let state = self.lock()?;
        let mut out: Vec<TimeEntry> = state.open.values().cloned().collect();
        out.sort_by_key(|e| e.employee_id);
        Ok(out)
    }

    /// Running time of the open session, if any.
    pub fn elapsed(&self, employee_id: i64) -> AppResult<Option<Duration>> {
        let now = self.clock.now();
        Ok(self
            .current_entry(employee_id)?
            .map(|e| (now - e.clock_in).max(Duration::zero())))
    }

    /// Persisted entries dated today, every employee.
    pub fn todays_entries(&self) -> AppResult<Vec<TimeEntry>> {
        let today = self.today();
        self.lock()?
            .store
            .list(&TimeEntryFilter::on(today))
            .map_err(store_error)
    }

    pub fn entries_for_employee(&self, employee_id: i64) -> AppResult<Vec<TimeEntry>> {
        self.lock()?
            .store
            .list(&TimeEntryFilter::all().for_employee(employee_id))
            .map_err(store_error)
    }

    /// Entries of one employee dated `[week_start, week_start + 6]`.
    /// `week_start` is taken as given, whatever day of the week it is.
    pub fn weekly_hours(&self, employee_id: i64, week_start: NaiveDate) -> AppResult<WeeklyAggregate> {
        let week_end = week_start
            .checked_add_signed(Duration::days(6))
            .ok_or_else(|| {
                AppError::InvalidDate(format!("week starting {} runs past the calendar", week_start))
            })?;

        let entries = self
            .lock()?
            .store
            .list(&TimeEntryFilter::between(week_start, week_end).for_employee(employee_id))
            .map_err(store_error)?;

        let total_hours = sum_hours(entries.iter().map(|e| e.total_hours), self.policy.rounding);

        Ok(WeeklyAggregate {
            employee_id,
            week_start,
            week_end,
            entries,
            total_hours,
        })
    }

    /// Run a closure against the underlying store while holding the lock.
    pub fn with_store<T>(&self, f: impl FnOnce(&mut S) -> AppResult<T>) -> AppResult<T> {
        let mut state = self.lock()?;
        f(&mut state.store)
    }

    pub fn into_store(self) -> S {
        self.state
            .into_inner()
            .unwrap_or_else(|p| p.into_inner())
            .store
    }
}
