use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmployeeStatus {
    #[default]
    Active,
    Inactive,
    OnLeave,
}

impl EmployeeStatus {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            EmployeeStatus::Active => "active",
            EmployeeStatus::Inactive => "inactive",
            EmployeeStatus::OnLeave => "on-leave",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "active" => Some(EmployeeStatus::Active),
            "inactive" => Some(EmployeeStatus::Inactive),
            "on-leave" | "on_leave" | "onleave" => Some(EmployeeStatus::OnLeave),
            _ => None,
        }
    }
}

impl fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub role: String,
    /// Department name; departments are matched by name, case-insensitively.
    pub department: String,
    pub hire_date: NaiveDate,
    pub status: EmployeeStatus,
    pub emergency_contact_name: String,
    pub emergency_contact_phone: String,
    pub emergency_contact_relationship: String,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Case-insensitive substring match on name, email, role and department.
    pub fn matches(&self, query: &str) -> bool {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return true;
        }
        [
            &self.first_name,
            &self.last_name,
            &self.email,
            &self.role,
            &self.department,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&q))
    }
}

/// Unvalidated employee form. Text fields are taken as typed, dates and
/// status are parsed during validation.
#[derive(Debug, Clone, Default)]
pub struct EmployeeDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub role: String,
    pub department: String,
    pub hire_date: Option<String>,
    pub status: Option<String>,
    pub emergency_contact_name: String,
    pub emergency_contact_phone: String,
    pub emergency_contact_relationship: String,
}

impl From<&Employee> for EmployeeDraft {
    fn from(e: &Employee) -> Self {
        Self {
            first_name: e.first_name.clone(),
            last_name: e.last_name.clone(),
            email: e.email.clone(),
            phone: e.phone.clone(),
            role: e.role.clone(),
            department: e.department.clone(),
            hire_date: Some(e.hire_date.format("%Y-%m-%d").to_string()),
            status: Some(e.status.to_db_str().to_string()),
            emergency_contact_name: e.emergency_contact_name.clone(),
            emergency_contact_phone: e.emergency_contact_phone.clone(),
            emergency_contact_relationship: e.emergency_contact_relationship.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: i64,
    pub name: String,
    pub manager_id: Option<i64>,
    pub description: String,
    /// Employees whose `department` names this one. Computed on load.
    pub employee_count: usize,
}

#[derive(Debug, Clone, Default)]
pub struct DepartmentDraft {
    pub name: String,
    pub manager_id: Option<i64>,
    pub description: String,
}

/// Dashboard counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryStats {
    pub employees: usize,
    pub active: usize,
    pub on_leave: usize,
    pub departments: usize,
}

/// Counters for the `stats` command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(flatten)]
    pub directory: DirectoryStats,
    pub open_sessions: usize,
    pub pending_leave: usize,
    pub hours_today: f64,
}
