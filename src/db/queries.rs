//! SQLite implementation of the time-entry record store.

use crate::db::pool::DbPool;
use crate::db::store::TimeEntryStore;
use crate::errors::{AppError, AppResult};
use crate::models::time_entry::{TimeEntry, TimeEntryFilter, TimeEntryPatch};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const SELECT_ENTRY: &str =
    "SELECT id, employee_id, clock_in, clock_out, total_hours, date FROM time_entries";

pub(crate) fn ts_to_db(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub(crate) fn date_to_db(d: &NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

fn conversion_error(idx: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
}

pub(crate) fn ts_from_db(idx: usize, raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| conversion_error(idx, AppError::InvalidTime(raw.to_string())))
}

pub(crate) fn date_from_db(idx: usize, raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| conversion_error(idx, AppError::InvalidDate(raw.to_string())))
}

pub fn map_row(row: &Row) -> Result<TimeEntry> {
    let clock_in: String = row.get("clock_in")?;
    let clock_out: Option<String> = row.get("clock_out")?;
    let date: String = row.get("date")?;

    Ok(TimeEntry {
        id: row.get("id")?,
        employee_id: row.get("employee_id")?,
        clock_in: ts_from_db(2, &clock_in)?,
        clock_out: clock_out.as_deref().map(|s| ts_from_db(3, s)).transpose()?,
        total_hours: row.get("total_hours")?,
        date: date_from_db(5, &date)?,
    })
}

pub fn insert_entry(conn: &Connection, e: &TimeEntry) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO time_entries (employee_id, clock_in, clock_out, total_hours, date)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            e.employee_id,
            ts_to_db(&e.clock_in),
            e.clock_out.as_ref().map(ts_to_db),
            e.total_hours,
            date_to_db(&e.date),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn load_entry(conn: &Connection, id: i64) -> AppResult<Option<TimeEntry>> {
    let mut stmt = conn.prepare_cached(&format!("{SELECT_ENTRY} WHERE id = ?1"))?;
    Ok(stmt.query_row([id], map_row).optional()?)
}

pub fn load_entries(conn: &Connection, filter: &TimeEntryFilter) -> AppResult<Vec<TimeEntry>> {
    let mut stmt = conn.prepare_cached(&format!(
        "{SELECT_ENTRY}
         WHERE (?1 IS NULL OR employee_id = ?1)
           AND (?2 IS NULL OR date >= ?2)
           AND (?3 IS NULL OR date <= ?3)
         ORDER BY clock_in ASC, id ASC"
    ))?;

    let rows = stmt.query_map(
        params![
            filter.employee_id,
            filter.from.as_ref().map(date_to_db),
            filter.to.as_ref().map(date_to_db),
        ],
        map_row,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Rewrite every column of an entry (all fields except id).
pub fn update_entry(conn: &Connection, e: &TimeEntry) -> AppResult<()> {
    conn.execute(
        "UPDATE time_entries
         SET employee_id = ?1, clock_in = ?2, clock_out = ?3,
             total_hours = ?4, date = ?5
         WHERE id = ?6",
        params![
            e.employee_id,
            ts_to_db(&e.clock_in),
            e.clock_out.as_ref().map(ts_to_db),
            e.total_hours,
            date_to_db(&e.date),
            e.id,
        ],
    )?;
    Ok(())
}

pub fn delete_entry(conn: &Connection, id: i64) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM time_entries WHERE id = ?1", [id])?)
}

pub fn load_open_sessions(conn: &Connection) -> AppResult<Vec<TimeEntry>> {
    let mut stmt = conn.prepare_cached(
        "SELECT employee_id, clock_in, date FROM open_sessions ORDER BY employee_id ASC",
    )?;
    let rows = stmt.query_map([], |row| {
        let clock_in: String = row.get(1)?;
        let date: String = row.get(2)?;
        Ok(TimeEntry::open(
            row.get(0)?,
            ts_from_db(1, &clock_in)?,
            date_from_db(2, &date)?,
        ))
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

impl TimeEntryStore for DbPool {
    fn create(&mut self, entry: &TimeEntry) -> AppResult<TimeEntry> {
        let id = insert_entry(&self.conn, entry)?;
        Ok(TimeEntry {
            id,
            ..entry.clone()
        })
    }

    fn list(&mut self, filter: &TimeEntryFilter) -> AppResult<Vec<TimeEntry>> {
        load_entries(&self.conn, filter)
    }

    fn get(&mut self, id: i64) -> AppResult<TimeEntry> {
        load_entry(&self.conn, id)?.ok_or(AppError::EntryNotFound(id))
    }

    fn update(&mut self, id: i64, patch: &TimeEntryPatch) -> AppResult<TimeEntry> {
        let mut entry = self.get(id)?;
        patch.apply_to(&mut entry);
        update_entry(&self.conn, &entry)?;
        Ok(entry)
    }

    fn delete(&mut self, id: i64) -> AppResult<()> {
        match delete_entry(&self.conn, id)? {
            0 => Err(AppError::EntryNotFound(id)),
            _ => Ok(()),
        }
    }

    fn load_open_sessions(&mut self) -> AppResult<Vec<TimeEntry>> {
        load_open_sessions(&self.conn)
    }

    fn save_open_session(&mut self, entry: &TimeEntry) -> AppResult<()> {
        // The primary key on employee_id backs the one-open-session rule,
        // also against other processes sharing the database file.
        let inserted = self.conn.execute(
            "INSERT INTO open_sessions (employee_id, clock_in, date) VALUES (?1, ?2, ?3)",
            params![
                entry.employee_id,
                ts_to_db(&entry.clock_in),
                date_to_db(&entry.date)
            ],
        );

        match inserted {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(AppError::AlreadyClockedIn(entry.employee_id))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn clear_open_session(&mut self, employee_id: i64) -> AppResult<()> {
        self.conn.execute(
            "DELETE FROM open_sessions WHERE employee_id = ?1",
            [employee_id],
        )?;
        Ok(())
    }

    fn complete_session(&mut self, entry: &TimeEntry) -> AppResult<TimeEntry> {
        let tx = self.conn.transaction()?;
        let id = insert_entry(&tx, entry)?;
        tx.execute(
            "DELETE FROM open_sessions WHERE employee_id = ?1",
            [entry.employee_id],
        )?;
        tx.commit()?;

        Ok(TimeEntry {
            id,
            ..entry.clone()
        })
    }
}
