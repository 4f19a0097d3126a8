use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveType {
    Vacation,
    Sick,
    Personal,
    Maternity,
    Paternity,
    Emergency,
}

impl LeaveType {
    pub const ALL: [LeaveType; 6] = [
        LeaveType::Vacation,
        LeaveType::Sick,
        LeaveType::Personal,
        LeaveType::Maternity,
        LeaveType::Paternity,
        LeaveType::Emergency,
    ];

    pub fn to_db_str(&self) -> &'static str {
        match self {
            LeaveType::Vacation => "vacation",
            LeaveType::Sick => "sick",
            LeaveType::Personal => "personal",
            LeaveType::Maternity => "maternity",
            LeaveType::Paternity => "paternity",
            LeaveType::Emergency => "emergency",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.to_db_str() == s.trim().to_lowercase())
    }

    pub fn label(&self) -> &'static str {
        match self {
            LeaveType::Vacation => "Vacation Leave",
            LeaveType::Sick => "Sick Leave",
            LeaveType::Personal => "Personal Leave",
            LeaveType::Maternity => "Maternity Leave",
            LeaveType::Paternity => "Paternity Leave",
            LeaveType::Emergency => "Emergency Leave",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    #[default]
    Normal,
    High,
    Urgent,
}

impl Urgency {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Normal => "normal",
            Urgency::High => "high",
            Urgency::Urgent => "urgent",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(Urgency::Low),
            "normal" => Some(Urgency::Normal),
            "high" => Some(Urgency::High),
            "urgent" => Some(Urgency::Urgent),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveStatus {
    #[default]
    Pending,
    Approved,
    Denied,
}

impl LeaveStatus {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            LeaveStatus::Pending => "pending",
            LeaveStatus::Approved => "approved",
            LeaveStatus::Denied => "denied",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Some(LeaveStatus::Pending),
            "approved" => Some(LeaveStatus::Approved),
            "denied" => Some(LeaveStatus::Denied),
            _ => None,
        }
    }
}

impl fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    pub id: i64,
    pub employee_name: String,
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_days: i64,
    pub reason: String,
    pub urgency: Urgency,
    pub status: LeaveStatus,
    pub created_at: DateTime<Utc>,
    pub manager_id: i64,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub reviewed_by: Option<String>,
}

/// Unvalidated form input for a new request. Every field may be missing,
/// validation reports all problems at once.
#[derive(Debug, Clone, Default)]
pub struct LeaveDraft {
    pub employee_name: String,
    pub leave_type: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub reason: String,
    pub urgency: Option<String>,
    pub manager_id: Option<i64>,
}

/// Counters shown above the request list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LeaveStats {
    pub pending: usize,
    pub approved: usize,
    pub denied: usize,
}
