use crate::db::leave_queries::{
    count_by_status, delete_leave, insert_leave, load_leave, load_leaves, update_review,
};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::leave::{
    LeaveDraft, LeaveRequest, LeaveStats, LeaveStatus, LeaveType, Urgency,
};
use crate::utils::date::parse_date;
use chrono::{DateTime, NaiveDate, Utc};

pub const DEFAULT_MIN_REASON_LENGTH: usize = 10;

/// Inclusive number of calendar days covered by a request.
pub fn leave_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days().abs() + 1
}

/// Fields of a draft that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidLeave {
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    pub urgency: Urgency,
}

/// Validate a draft against `today`. Every problem is collected so the user
/// sees them all at once.
pub fn validate_draft(
    draft: &LeaveDraft,
    today: NaiveDate,
    min_reason_length: usize,
) -> AppResult<ValidLeave> {
    let mut problems: Vec<String> = Vec::new();

    if draft.employee_name.trim().is_empty() {
        problems.push("Employee name is required".into());
    }

    let leave_type = match draft.leave_type.as_deref().map(str::trim) {
        None | Some("") => {
            problems.push("Leave type is required".into());
            None
        }
        Some(t) => {
            let parsed = LeaveType::from_db_str(t);
            if parsed.is_none() {
                problems.push(format!("Unknown leave type '{}'", t));
            }
            parsed
        }
    };

    let mut parse_required = |raw: &Option<String>, label: &str| -> Option<NaiveDate> {
        match raw.as_deref().map(str::trim) {
            None | Some("") => {
                problems.push(format!("{} is required", label));
                None
            }
            Some(s) => {
                let d = parse_date(s);
                if d.is_none() {
                    problems.push(format!("{} '{}' is not a YYYY-MM-DD date", label, s));
                }
                d
            }
        }
    };
    let start = parse_required(&draft.start_date, "Start date");
    let end = parse_required(&draft.end_date, "End date");

    if let (Some(s), Some(e)) = (start, end) {
        if s < today {
            problems.push("Start date cannot be in the past".into());
        }
        if e < s {
            problems.push("End date must be after start date".into());
        }
    }

    let reason = draft.reason.trim();
    if reason.is_empty() {
        problems.push("Reason is required".into());
    } else if reason.chars().count() < min_reason_length {
        problems.push(format!(
            "Reason must be at least {} characters long",
            min_reason_length
        ));
    }

    let urgency = match draft.urgency.as_deref() {
        None => Some(Urgency::Normal),
        Some(u) => {
            let parsed = Urgency::from_db_str(u);
            if parsed.is_none() {
                problems.push(format!("Unknown urgency '{}'", u));
            }
            parsed
        }
    };

    match (leave_type, start, end, urgency) {
        (Some(leave_type), Some(start_date), Some(end_date), Some(urgency))
            if problems.is_empty() =>
        {
            Ok(ValidLeave {
                leave_type,
                start_date,
                end_date,
                reason: reason.to_string(),
                urgency,
            })
        }
        _ => Err(AppError::InvalidLeave(problems.join("; "))),
    }
}

/// Manager decision on a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Deny,
}

impl Decision {
    fn status(self) -> LeaveStatus {
        match self {
            Decision::Approve => LeaveStatus::Approved,
            Decision::Deny => LeaveStatus::Denied,
        }
    }
}

pub struct LeaveLogic;

impl LeaveLogic {
    pub fn submit(
        pool: &mut DbPool,
        draft: &LeaveDraft,
        now: DateTime<Utc>,
        today: NaiveDate,
        min_reason_length: usize,
    ) -> AppResult<LeaveRequest> {
        let valid = validate_draft(draft, today, min_reason_length)?;
        let employee_name = draft.employee_name.trim();

        let mut request = LeaveRequest {
            id: 0,
            employee_name: employee_name.to_string(),
            leave_type: valid.leave_type,
            start_date: valid.start_date,
            end_date: valid.end_date,
            total_days: leave_days(valid.start_date, valid.end_date),
            reason: valid.reason,
            urgency: valid.urgency,
            status: LeaveStatus::Pending,
            created_at: now,
            manager_id: draft.manager_id.unwrap_or(1),
            reviewed_at: None,
            reviewed_by: None,
        };

        request.id = insert_leave(&pool.conn, &request)?;
        Ok(request)
    }

    pub fn get(pool: &mut DbPool, id: i64) -> AppResult<LeaveRequest> {
        load_leave(&pool.conn, id)?.ok_or(AppError::LeaveNotFound(id))
    }

    /// Approve or deny. Only pending requests can be reviewed.
    pub fn review(
        pool: &mut DbPool,
        id: i64,
        decision: Decision,
        reviewer: &str,
        now: DateTime<Utc>,
    ) -> AppResult<LeaveRequest> {
        let mut request = Self::get(pool, id)?;

        if request.status != LeaveStatus::Pending {
            return Err(AppError::LeaveAlreadyReviewed {
                id,
                status: request.status.to_string(),
            });
        }

        request.status = decision.status();
        request.reviewed_at = Some(now);
        request.reviewed_by = Some(reviewer.to_string());

        update_review(&pool.conn, &request)?;
        Ok(request)
    }

    pub fn list(pool: &mut DbPool, status: Option<LeaveStatus>) -> AppResult<Vec<LeaveRequest>> {
        load_leaves(&pool.conn, status)
    }

    pub fn stats(pool: &mut DbPool) -> AppResult<LeaveStats> {
        let mut stats = LeaveStats::default();
        for (status, n) in count_by_status(&pool.conn)? {
            match LeaveStatus::from_db_str(&status) {
                Some(LeaveStatus::Pending) => stats.pending = n,
                Some(LeaveStatus::Approved) => stats.approved = n,
                Some(LeaveStatus::Denied) => stats.denied = n,
                None => {}
            }
        }
        Ok(stats)
    }

    pub fn delete(pool: &mut DbPool, id: i64) -> AppResult<()> {
        match delete_leave(&pool.conn, id)? {
            0 => Err(AppError::LeaveNotFound(id)),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    fn draft() -> LeaveDraft {
        LeaveDraft {
            employee_name: "John Doe".into(),
            leave_type: Some("vacation".into()),
            start_date: Some("2025-10-06".into()),
            end_date: Some("2025-10-10".into()),
            reason: "Family trip to the seaside".into(),
            urgency: None,
            manager_id: None,
        }
    }

    #[test]
    fn inclusive_day_count() {
        assert_eq!(leave_days(d("2025-10-06"), d("2025-10-10")), 5);
        assert_eq!(leave_days(d("2025-10-06"), d("2025-10-06")), 1);
    }

    #[test]
    fn valid_draft_defaults_to_normal_urgency() {
        let v = validate_draft(&draft(), d("2025-10-01"), 10).unwrap();
        assert_eq!(v.leave_type, LeaveType::Vacation);
        assert_eq!(v.urgency, Urgency::Normal);
    }

    #[test]
    fn collects_every_problem() {
        let bad = LeaveDraft {
            leave_type: None,
            start_date: Some("2025-09-01".into()),
            end_date: Some("2025-08-30".into()),
            reason: "  short ".into(),
            ..draft()
        };
        let err = validate_draft(&bad, d("2025-09-10"), 10).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Leave type is required"));
        assert!(msg.contains("Start date cannot be in the past"));
        assert!(msg.contains("End date must be after start date"));
        assert!(msg.contains("at least 10 characters"));
    }

    #[test]
    fn empty_name_is_reported_with_the_rest() {
        let bad = LeaveDraft {
            employee_name: "   ".into(),
            leave_type: None,
            ..draft()
        };
        let msg = validate_draft(&bad, d("2025-09-10"), 10)
            .unwrap_err()
            .to_string();
        assert!(msg.contains("Employee name is required"));
        assert!(msg.contains("Leave type is required"));
    }

    #[test]
    fn missing_dates_and_unknown_values() {
        let bad = LeaveDraft {
            leave_type: Some("sabbatical".into()),
            start_date: None,
            end_date: Some("10/10/2025".into()),
            urgency: Some("asap".into()),
            ..draft()
        };
        let msg = validate_draft(&bad, d("2025-09-10"), 10)
            .unwrap_err()
            .to_string();
        assert!(msg.contains("Unknown leave type 'sabbatical'"));
        assert!(msg.contains("Start date is required"));
        assert!(msg.contains("is not a YYYY-MM-DD date"));
        assert!(msg.contains("Unknown urgency 'asap'"));
    }
}
