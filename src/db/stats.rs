use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use chrono::NaiveDate;
use rusqlite::OptionalExtension;
use std::fs;

/// Figures printed by `db --info`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DbInfo {
    pub file_size: u64,
    pub entries: i64,
    pub open_sessions: i64,
    pub leave_requests: i64,
    pub first_date: Option<String>,
    pub last_date: Option<String>,
    pub total_hours: f64,
}

impl DbInfo {
    pub fn average_hours_per_day(&self) -> Option<f64> {
        let (f, l) = (self.first_date.as_ref()?, self.last_date.as_ref()?);
        let d1 = NaiveDate::parse_from_str(f, "%Y-%m-%d").ok()?;
        let d2 = NaiveDate::parse_from_str(l, "%Y-%m-%d").ok()?;
        let days = (d2 - d1).num_days() + 1;
        Some(self.total_hours / days as f64)
    }
}

pub fn collect_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<DbInfo> {
    let conn = &pool.conn;

    let count = |sql: &str| conn.query_row(sql, [], |row| row.get::<_, i64>(0));

    let first_date: Option<String> = conn
        .query_row(
            "SELECT date FROM time_entries ORDER BY date ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let last_date: Option<String> = conn
        .query_row(
            "SELECT date FROM time_entries ORDER BY date DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    Ok(DbInfo {
        file_size: fs::metadata(db_path).map(|m| m.len()).unwrap_or(0),
        entries: count("SELECT COUNT(*) FROM time_entries")?,
        open_sessions: count("SELECT COUNT(*) FROM open_sessions")?,
        leave_requests: count("SELECT COUNT(*) FROM leave_requests")?,
        first_date,
        last_date,
        total_hours: conn.query_row(
            "SELECT IFNULL(SUM(total_hours), 0) FROM time_entries",
            [],
            |row| row.get(0),
        )?,
    })
}

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    let info = collect_db_info(pool, db_path)?;
    let file_mb = (info.file_size as f64) / (1024.0 * 1024.0);

    println!();
    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);
    println!(
        "{}• Time entries:{} {}{}{}",
        CYAN, RESET, GREEN, info.entries, RESET
    );
    println!("{}• Open sessions:{} {}", CYAN, RESET, info.open_sessions);
    println!("{}• Leave requests:{} {}", CYAN, RESET, info.leave_requests);

    let dash = format!("{GREY}--{RESET}");
    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", info.first_date.as_deref().unwrap_or(&dash));
    println!("    to:   {}", info.last_date.as_deref().unwrap_or(&dash));

    if let Some(avg) = info.average_hours_per_day() {
        println!("{}• Average hours/day:{} {:.2}", CYAN, RESET, avg);
    }

    println!();
    Ok(())
}
