// src/export/model.rs

use crate::models::time_entry::TimeEntry;
use crate::utils::date::DayBoundary;
use serde::Serialize;

/// Flat row used by the CSV and JSON exports.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntryExport {
    pub id: i64,
    pub employee_id: i64,
    pub date: String,
    pub clock_in: String,
    pub clock_out: String,
    pub total_hours: f64,
}

impl TimeEntryExport {
    /// Timestamps are written as RFC 3339 in the configured timezone.
    pub fn from_entry(e: &TimeEntry, boundary: &DayBoundary) -> Self {
        let local = |ts: &chrono::DateTime<chrono::Utc>| match boundary {
            DayBoundary::Local => ts.with_timezone(&chrono::Local).to_rfc3339(),
            DayBoundary::Fixed(off) => ts.with_timezone(off).to_rfc3339(),
        };

        Self {
            id: e.id,
            employee_id: e.employee_id,
            date: e.date_str(),
            clock_in: local(&e.clock_in),
            clock_out: e.clock_out.as_ref().map(local).unwrap_or_default(),
            total_hours: e.total_hours,
        }
    }
}
