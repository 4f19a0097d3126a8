//! In-memory record store. Same shape as the SQLite store, nothing survives
//! the process (open sessions included).

use crate::db::store::TimeEntryStore;
use crate::errors::{AppError, AppResult};
use crate::models::time_entry::{TimeEntry, TimeEntryFilter, TimeEntryPatch};

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: Vec<TimeEntry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with existing records (ids are kept as given).
    pub fn with_entries(entries: Vec<TimeEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn next_id(&self) -> i64 {
        self.entries.iter().map(|e| e.id).max().unwrap_or(0) + 1
    }
}

impl TimeEntryStore for MemoryStore {
    fn create(&mut self, entry: &TimeEntry) -> AppResult<TimeEntry> {
        let mut saved = entry.clone();
        saved.id = self.next_id();
        self.entries.push(saved.clone());
        Ok(saved)
    }

    fn list(&mut self, filter: &TimeEntryFilter) -> AppResult<Vec<TimeEntry>> {
        let mut out: Vec<TimeEntry> = self
            .entries
            .iter()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect();
        out.sort_by_key(|e| (e.clock_in, e.id));
        Ok(out)
    }

    fn update(&mut self, id: i64, patch: &TimeEntryPatch) -> AppResult<TimeEntry> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(AppError::EntryNotFound(id))?;
        patch.apply_to(entry);
        Ok(entry.clone())
    }

    fn delete(&mut self, id: i64) -> AppResult<()> {
        let idx = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(AppError::EntryNotFound(id))?;
        self.entries.remove(idx);
        Ok(())
    }
}
