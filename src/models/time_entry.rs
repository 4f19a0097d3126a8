use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One attendance session.
///
/// `clock_out == None` means the session is still open. `id` is 0 until the
/// record store assigns one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntry {
    pub id: i64,
    pub employee_id: i64,
    pub clock_in: DateTime<Utc>,
    pub clock_out: Option<DateTime<Utc>>,
    pub total_hours: f64,
    pub date: NaiveDate,
}

impl TimeEntry {
    /// A fresh open session.
    pub fn open(employee_id: i64, clock_in: DateTime<Utc>, date: NaiveDate) -> Self {
        Self {
            id: 0,
            employee_id,
            clock_in,
            clock_out: None,
            total_hours: 0.0,
            date,
        }
    }

    pub fn is_open(&self) -> bool {
        self.clock_out.is_none()
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Selection criteria for `TimeEntryStore::list`. Date bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeEntryFilter {
    pub employee_id: Option<i64>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl TimeEntryFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn on(date: NaiveDate) -> Self {
        Self::between(date, date)
    }

    pub fn between(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            employee_id: None,
            from: Some(from),
            to: Some(to),
        }
    }

    pub fn for_employee(mut self, employee_id: i64) -> Self {
        self.employee_id = Some(employee_id);
        self
    }

    pub fn matches(&self, e: &TimeEntry) -> bool {
        self.employee_id.is_none_or(|id| e.employee_id == id)
            && self.from.is_none_or(|d| e.date >= d)
            && self.to.is_none_or(|d| e.date <= d)
    }
}

/// Partial update applied by `TimeEntryStore::update`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeEntryPatch {
    pub employee_id: Option<i64>,
    pub clock_in: Option<DateTime<Utc>>,
    pub clock_out: Option<DateTime<Utc>>,
    pub total_hours: Option<f64>,
    pub date: Option<NaiveDate>,
}

impl TimeEntryPatch {
    pub fn apply_to(&self, e: &mut TimeEntry) {
        if let Some(v) = self.employee_id {
            e.employee_id = v;
        }
        if let Some(v) = self.clock_in {
            e.clock_in = v;
        }
        if let Some(v) = self.clock_out {
            e.clock_out = Some(v);
        }
        if let Some(v) = self.total_hours {
            e.total_hours = v;
        }
        if let Some(v) = self.date {
            e.date = v;
        }
    }
}
