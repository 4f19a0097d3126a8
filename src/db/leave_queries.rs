use crate::db::queries::{date_from_db, date_to_db, ts_from_db, ts_to_db};
use crate::errors::{AppError, AppResult};
use crate::models::leave::{LeaveRequest, LeaveStatus, LeaveType, Urgency};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const SELECT_LEAVE: &str = "SELECT id, employee_name, leave_type, start_date, end_date, total_days,
            reason, urgency, status, created_at, manager_id, reviewed_at, reviewed_by
     FROM leave_requests";

fn invalid(idx: usize, what: &str, raw: &str) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        idx,
        rusqlite::types::Type::Text,
        Box::new(AppError::InvalidLeave(format!("invalid {}: {}", what, raw))),
    )
}

pub fn map_leave_row(row: &Row) -> Result<LeaveRequest> {
    let leave_type: String = row.get("leave_type")?;
    let urgency: String = row.get("urgency")?;
    let status: String = row.get("status")?;
    let start: String = row.get("start_date")?;
    let end: String = row.get("end_date")?;
    let created_at: String = row.get("created_at")?;
    let reviewed_at: Option<String> = row.get("reviewed_at")?;

    Ok(LeaveRequest {
        id: row.get("id")?,
        employee_name: row.get("employee_name")?,
        leave_type: LeaveType::from_db_str(&leave_type)
            .ok_or_else(|| invalid(2, "leave type", &leave_type))?,
        start_date: date_from_db(3, &start)?,
        end_date: date_from_db(4, &end)?,
        total_days: row.get("total_days")?,
        reason: row.get("reason")?,
        urgency: Urgency::from_db_str(&urgency).ok_or_else(|| invalid(7, "urgency", &urgency))?,
        status: LeaveStatus::from_db_str(&status).ok_or_else(|| invalid(8, "status", &status))?,
        created_at: ts_from_db(9, &created_at)?,
        manager_id: row.get("manager_id")?,
        reviewed_at: reviewed_at.as_deref().map(|s| ts_from_db(11, s)).transpose()?,
        reviewed_by: row.get("reviewed_by")?,
    })
}

pub fn insert_leave(conn: &Connection, r: &LeaveRequest) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO leave_requests
            (employee_name, leave_type, start_date, end_date, total_days, reason,
             urgency, status, created_at, manager_id, reviewed_at, reviewed_by)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            r.employee_name,
            r.leave_type.to_db_str(),
            date_to_db(&r.start_date),
            date_to_db(&r.end_date),
            r.total_days,
            r.reason,
            r.urgency.to_db_str(),
            r.status.to_db_str(),
            ts_to_db(&r.created_at),
            r.manager_id,
            r.reviewed_at.as_ref().map(ts_to_db),
            r.reviewed_by,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn load_leave(conn: &Connection, id: i64) -> AppResult<Option<LeaveRequest>> {
    let mut stmt = conn.prepare_cached(&format!("{SELECT_LEAVE} WHERE id = ?1"))?;
    Ok(stmt.query_row([id], map_leave_row).optional()?)
}

/// Newest first, optionally restricted to one status.
pub fn load_leaves(conn: &Connection, status: Option<LeaveStatus>) -> AppResult<Vec<LeaveRequest>> {
    let mut stmt = conn.prepare_cached(&format!(
        "{SELECT_LEAVE} WHERE (?1 IS NULL OR status = ?1) ORDER BY id DESC"
    ))?;

    let rows = stmt.query_map([status.map(|s| s.to_db_str())], map_leave_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn update_review(conn: &Connection, r: &LeaveRequest) -> AppResult<()> {
    conn.execute(
        "UPDATE leave_requests
         SET status = ?1, reviewed_at = ?2, reviewed_by = ?3
         WHERE id = ?4",
        params![
            r.status.to_db_str(),
            r.reviewed_at.as_ref().map(ts_to_db),
            r.reviewed_by,
            r.id,
        ],
    )?;
    Ok(())
}

pub fn delete_leave(conn: &Connection, id: i64) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM leave_requests WHERE id = ?1", [id])?)
}

pub fn count_by_status(conn: &Connection) -> AppResult<Vec<(String, usize)>> {
    let mut stmt =
        conn.prepare_cached("SELECT status, COUNT(*) FROM leave_requests GROUP BY status")?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)? as usize))
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
