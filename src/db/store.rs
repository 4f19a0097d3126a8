//! Record store contract for time entries.
//!
//! The session manager only talks to storage through this trait. `DbPool`
//! implements it on top of SQLite (see `db::queries`), `MemoryStore` keeps
//! everything in a `Vec`.

use crate::errors::{AppError, AppResult};
use crate::models::time_entry::{TimeEntry, TimeEntryFilter, TimeEntryPatch};

pub trait TimeEntryStore {
    /// Persist a new entry and return it with its assigned id.
    fn create(&mut self, entry: &TimeEntry) -> AppResult<TimeEntry>;

    /// Entries matching `filter`, ordered by clock-in time.
    fn list(&mut self, filter: &TimeEntryFilter) -> AppResult<Vec<TimeEntry>>;

    fn update(&mut self, id: i64, patch: &TimeEntryPatch) -> AppResult<TimeEntry>;

    fn delete(&mut self, id: i64) -> AppResult<()>;

    fn get(&mut self, id: i64) -> AppResult<TimeEntry> {
        self.list(&TimeEntryFilter::all())?
            .into_iter()
            .find(|e| e.id == id)
            .ok_or(AppError::EntryNotFound(id))
    }

    // ---------------------------
    // Open sessions
    // ---------------------------
    // Stores that cannot outlive the process keep the defaults: open
    // sessions then only exist in the session manager's memory.

    fn load_open_sessions(&mut self) -> AppResult<Vec<TimeEntry>> {
        Ok(Vec::new())
    }

    fn save_open_session(&mut self, _entry: &TimeEntry) -> AppResult<()> {
        Ok(())
    }

    fn clear_open_session(&mut self, _employee_id: i64) -> AppResult<()> {
        Ok(())
    }

    /// Persist a closed session and drop its open-session record.
    fn complete_session(&mut self, entry: &TimeEntry) -> AppResult<TimeEntry> {
        let saved = self.create(entry)?;
        self.clear_open_session(entry.employee_id)?;
        Ok(saved)
    }
}
