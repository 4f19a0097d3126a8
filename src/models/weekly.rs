use super::time_entry::TimeEntry;
use chrono::NaiveDate;
use serde::Serialize;

/// Hours of one employee over `[week_start, week_end]`. Derived, never stored.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyAggregate {
    pub employee_id: i64,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub entries: Vec<TimeEntry>,
    pub total_hours: f64,
}

impl WeeklyAggregate {
    /// Hours per day of the week, `week_start` first.
    pub fn daily_hours(&self) -> [f64; 7] {
        let mut days = [0.0; 7];
        for e in &self.entries {
            let idx = (e.date - self.week_start).num_days();
            if (0..7).contains(&idx) {
                days[idx as usize] += e.total_hours;
            }
        }
        days
    }

    /// Progress toward a weekly goal, capped at 100.
    pub fn progress_percent(&self, goal_hours: f64) -> f64 {
        if goal_hours <= 0.0 {
            return 100.0;
        }
        (self.total_hours / goal_hours * 100.0).min(100.0)
    }
}
