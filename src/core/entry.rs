use crate::core::calculator::hours::hours_between;
use crate::core::policy::TimePolicy;
use crate::db::store::TimeEntryStore;
use crate::errors::{AppError, AppResult};
use crate::models::time_entry::{TimeEntry, TimeEntryPatch};
use chrono::{DateTime, Utc};

/// Corrections to completed entries.
pub struct EntryLogic;

impl EntryLogic {
    /// Replace clock-in and/or clock-out of a completed entry. Total hours and
    /// the entry date are recomputed so the record stays consistent.
    pub fn edit<S: TimeEntryStore>(
        store: &mut S,
        id: i64,
        clock_in: Option<DateTime<Utc>>,
        clock_out: Option<DateTime<Utc>>,
        policy: &TimePolicy,
    ) -> AppResult<TimeEntry> {
        if clock_in.is_none() && clock_out.is_none() {
            return Err(AppError::InvalidTime(
                "Nothing to do: specify at least --in or --out.".into(),
            ));
        }

        let current = store.get(id)?;

        let new_in = clock_in.unwrap_or(current.clock_in);
        let new_out = clock_out.or(current.clock_out).ok_or_else(|| {
            AppError::InvalidTime(format!("Entry {} has no clock-out to edit against", id))
        })?;

        if new_out < new_in {
            return Err(AppError::InvalidTime(
                "Clock-out must not be earlier than clock-in.".into(),
            ));
        }

        let patch = TimeEntryPatch {
            clock_in: clock_in.map(|_| new_in),
            clock_out: Some(new_out),
            total_hours: Some(hours_between(&new_in, &new_out, policy.rounding)),
            date: Some(policy.boundary.date_of(&new_in)),
            ..TimeEntryPatch::default()
        };

        store.update(id, &patch)
    }

    pub fn delete<S: TimeEntryStore>(store: &mut S, id: i64) -> AppResult<TimeEntry> {
        let entry = store.get(id)?;
        store.delete(id)?;
        Ok(entry)
    }
}
