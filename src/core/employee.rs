//! Employee and department directory.
//!
//! Time entries and open sessions only carry an employee id. When the
//! directory has been filled in, clock-ins are checked against it.

use crate::core::calculator::hours::sum_hours;
use crate::core::leave::LeaveLogic;
use crate::core::session::SessionManager;
use crate::db::employee_queries::{
    count_employees_by_status, delete_department, delete_employee, find_department_by_name,
    insert_department, insert_employee, load_department, load_departments, load_employee,
    load_employees, update_department, update_employee,
};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::employee::{
    DashboardStats, Department, DepartmentDraft, DirectoryStats, Employee, EmployeeDraft,
    EmployeeStatus,
};
use crate::utils::date::parse_date;
use regex::Regex;
use std::sync::LazyLock;

static EMAIL: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").ok());

fn is_email(s: &str) -> bool {
    match EMAIL.as_ref() {
        Some(re) => re.is_match(s),
        None => s.contains('@'),
    }
}

/// Validate an employee form. Every problem is collected; on success the
/// returned employee has id 0.
pub fn validate_employee(draft: &EmployeeDraft) -> AppResult<Employee> {
    let mut problems: Vec<String> = Vec::new();

    let mut required = |value: &str, label: &str| {
        if value.trim().is_empty() {
            problems.push(format!("{} is required", label));
        }
    };
    required(&draft.first_name, "First name");
    required(&draft.last_name, "Last name");
    required(&draft.email, "Email");
    required(&draft.phone, "Phone");
    required(&draft.role, "Role");
    required(&draft.department, "Department");

    let email = draft.email.trim();
    if !email.is_empty() && !is_email(email) {
        problems.push("Invalid email format".into());
    }

    let hire_date = match draft.hire_date.as_deref().map(str::trim) {
        None | Some("") => {
            problems.push("Hire date is required".into());
            None
        }
        Some(s) => {
            let d = parse_date(s);
            if d.is_none() {
                problems.push(format!("Hire date '{}' is not a YYYY-MM-DD date", s));
            }
            d
        }
    };

    let status = match draft.status.as_deref() {
        None => Some(EmployeeStatus::Active),
        Some(s) => {
            let parsed = EmployeeStatus::from_db_str(s);
            if parsed.is_none() {
                problems.push(format!("Unknown status '{}'", s));
            }
            parsed
        }
    };

    match (hire_date, status) {
        (Some(hire_date), Some(status)) if problems.is_empty() => Ok(Employee {
            id: 0,
            first_name: draft.first_name.trim().to_string(),
            last_name: draft.last_name.trim().to_string(),
            email: email.to_string(),
            phone: draft.phone.trim().to_string(),
            role: draft.role.trim().to_string(),
            department: draft.department.trim().to_string(),
            hire_date,
            status,
            emergency_contact_name: draft.emergency_contact_name.trim().to_string(),
            emergency_contact_phone: draft.emergency_contact_phone.trim().to_string(),
            emergency_contact_relationship: draft
                .emergency_contact_relationship
                .trim()
                .to_string(),
        }),
        _ => Err(AppError::InvalidEmployee(problems.join("; "))),
    }
}

pub struct EmployeeLogic;

impl EmployeeLogic {
    pub fn create(pool: &mut DbPool, draft: &EmployeeDraft) -> AppResult<Employee> {
        let mut employee = validate_employee(draft)?;
        employee.id = insert_employee(&pool.conn, &employee)?;
        Ok(employee)
    }

    pub fn get(pool: &mut DbPool, id: i64) -> AppResult<Employee> {
        load_employee(&pool.conn, id)?.ok_or(AppError::EmployeeNotFound(id))
    }

    /// Replace an employee with a fully validated form.
    pub fn update(pool: &mut DbPool, id: i64, draft: &EmployeeDraft) -> AppResult<Employee> {
        Self::get(pool, id)?;
        let employee = Employee {
            id,
            ..validate_employee(draft)?
        };
        update_employee(&pool.conn, &employee)?;
        Ok(employee)
    }

    /// Newest first. `status` narrows by status, `query` searches name,
    /// email, role and department.
    pub fn list(
        pool: &mut DbPool,
        status: Option<EmployeeStatus>,
        query: Option<&str>,
    ) -> AppResult<Vec<Employee>> {
        let mut employees = load_employees(&pool.conn, status)?;
        if let Some(q) = query {
            employees.retain(|e| e.matches(q));
        }
        Ok(employees)
    }

    pub fn delete(pool: &mut DbPool, id: i64) -> AppResult<()> {
        match delete_employee(&pool.conn, id)? {
            0 => Err(AppError::EmployeeNotFound(id)),
            _ => Ok(()),
        }
    }

    pub fn stats(pool: &mut DbPool) -> AppResult<DirectoryStats> {
        let mut stats = DirectoryStats::default();
        for (status, n) in count_employees_by_status(&pool.conn)? {
            stats.employees += n;
            match EmployeeStatus::from_db_str(&status) {
                Some(EmployeeStatus::Active) => stats.active = n,
                Some(EmployeeStatus::OnLeave) => stats.on_leave = n,
                _ => {}
            }
        }
        stats.departments = load_departments(&pool.conn)?.len();
        Ok(stats)
    }

    /// Lookup before a clock-in. With an empty directory every id is
    /// accepted; otherwise the employee must exist and not be inactive.
    pub fn check_clock_in(pool: &mut DbPool, id: i64) -> AppResult<Option<Employee>> {
        if load_employees(&pool.conn, None)?.is_empty() {
            return Ok(None);
        }

        let employee = Self::get(pool, id)?;
        if employee.status == EmployeeStatus::Inactive {
            return Err(AppError::EmployeeInactive(id));
        }
        Ok(Some(employee))
    }
}

/// Directory counters plus today's activity from the session manager.
pub fn dashboard(manager: &SessionManager<DbPool>) -> AppResult<DashboardStats> {
    let open_sessions = manager.open_sessions()?.len();
    let hours_today = sum_hours(
        manager.todays_entries()?.iter().map(|e| e.total_hours),
        manager.policy().rounding,
    );

    manager.with_store(|pool| {
        Ok(DashboardStats {
            directory: EmployeeLogic::stats(pool)?,
            open_sessions,
            pending_leave: LeaveLogic::stats(pool)?.pending,
            hours_today,
        })
    })
}

pub struct DepartmentLogic;

impl DepartmentLogic {
    /// `current` is the id of the department being edited, so a rename to
    /// its own name is not a duplicate.
    fn validate(
        pool: &mut DbPool,
        draft: &DepartmentDraft,
        current: Option<i64>,
    ) -> AppResult<Department> {
        let mut problems: Vec<String> = Vec::new();
        let name = draft.name.trim();

        if name.is_empty() {
            problems.push("Department name is required".into());
        } else if let Some(existing) = find_department_by_name(&pool.conn, name)?
            && Some(existing.id) != current
        {
            problems.push(format!("Department '{}' already exists", existing.name));
        }

        if let Some(manager) = draft.manager_id
            && load_employee(&pool.conn, manager)?.is_none()
        {
            problems.push(format!("Manager {} is not a known employee", manager));
        }

        if !problems.is_empty() {
            return Err(AppError::InvalidDepartment(problems.join("; ")));
        }

        Ok(Department {
            id: current.unwrap_or(0),
            name: name.to_string(),
            manager_id: draft.manager_id,
            description: draft.description.trim().to_string(),
            employee_count: 0,
        })
    }

    pub fn create(pool: &mut DbPool, draft: &DepartmentDraft) -> AppResult<Department> {
        let mut dept = Self::validate(pool, draft, None)?;
        dept.id = insert_department(&pool.conn, &dept)?;
        Self::get(pool, dept.id)
    }

    pub fn get(pool: &mut DbPool, id: i64) -> AppResult<Department> {
        load_department(&pool.conn, id)?.ok_or(AppError::DepartmentNotFound(id))
    }

    pub fn update(pool: &mut DbPool, id: i64, draft: &DepartmentDraft) -> AppResult<Department> {
        Self::get(pool, id)?;
        let dept = Self::validate(pool, draft, Some(id))?;
        update_department(&pool.conn, &dept)?;
        Self::get(pool, id)
    }

    pub fn list(pool: &mut DbPool) -> AppResult<Vec<Department>> {
        load_departments(&pool.conn)
    }

    pub fn delete(pool: &mut DbPool, id: i64) -> AppResult<Department> {
        let dept = Self::get(pool, id)?;
        delete_department(&pool.conn, id)?;
        Ok(dept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> EmployeeDraft {
        EmployeeDraft {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            phone: "555-0100".into(),
            role: "Engineer".into(),
            department: "Engineering".into(),
            hire_date: Some("2024-03-01".into()),
            ..EmployeeDraft::default()
        }
    }

    #[test]
    fn valid_form_defaults_to_active() {
        let e = validate_employee(&draft()).unwrap();
        assert_eq!(e.status, EmployeeStatus::Active);
        assert_eq!(e.full_name(), "Ada Lovelace");
    }

    #[test]
    fn every_missing_field_is_reported() {
        let msg = validate_employee(&EmployeeDraft::default())
            .unwrap_err()
            .to_string();
        for field in [
            "First name",
            "Last name",
            "Email",
            "Phone",
            "Role",
            "Department",
            "Hire date",
        ] {
            assert!(msg.contains(&format!("{} is required", field)), "{}", msg);
        }
    }

    #[test]
    fn bad_email_date_and_status() {
        let bad = EmployeeDraft {
            email: "ada at example".into(),
            hire_date: Some("01/03/2024".into()),
            status: Some("retired".into()),
            ..draft()
        };
        let msg = validate_employee(&bad).unwrap_err().to_string();
        assert!(msg.contains("Invalid email format"));
        assert!(msg.contains("is not a YYYY-MM-DD date"));
        assert!(msg.contains("Unknown status 'retired'"));
    }

    #[test]
    fn search_covers_name_email_role_and_department() {
        let e = validate_employee(&draft()).unwrap();
        assert!(e.matches("love"));
        assert!(e.matches("EXAMPLE.COM"));
        assert!(e.matches("engineer"));
        assert!(e.matches(""));
        assert!(!e.matches("sales"));
    }
}
