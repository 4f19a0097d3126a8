use crate::db::queries::{date_from_db, date_to_db};
use crate::errors::{AppError, AppResult};
use crate::models::employee::{Department, Employee, EmployeeStatus};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const SELECT_EMPLOYEE: &str = "SELECT id, first_name, last_name, email, phone, role, department,
            hire_date, status, emergency_contact_name, emergency_contact_phone,
            emergency_contact_relationship
     FROM employees";

// employee_count is computed against the employees table on every load
const SELECT_DEPARTMENT: &str = "SELECT d.id, d.name, d.manager_id, d.description,
            (SELECT COUNT(*) FROM employees e WHERE e.department = d.name COLLATE NOCASE)
                AS employee_count
     FROM departments d";

pub fn map_employee_row(row: &Row) -> Result<Employee> {
    let hire_date: String = row.get("hire_date")?;
    let status: String = row.get("status")?;

    Ok(Employee {
        id: row.get("id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        email: row.get("email")?,
        phone: row.get("phone")?,
        role: row.get("role")?,
        department: row.get("department")?,
        hire_date: date_from_db(7, &hire_date)?,
        status: EmployeeStatus::from_db_str(&status).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                8,
                rusqlite::types::Type::Text,
                Box::new(AppError::InvalidEmployee(format!("invalid status: {}", status))),
            )
        })?,
        emergency_contact_name: row.get("emergency_contact_name")?,
        emergency_contact_phone: row.get("emergency_contact_phone")?,
        emergency_contact_relationship: row.get("emergency_contact_relationship")?,
    })
}

pub fn insert_employee(conn: &Connection, e: &Employee) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO employees
            (first_name, last_name, email, phone, role, department, hire_date, status,
             emergency_contact_name, emergency_contact_phone, emergency_contact_relationship)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            e.first_name,
            e.last_name,
            e.email,
            e.phone,
            e.role,
            e.department,
            date_to_db(&e.hire_date),
            e.status.to_db_str(),
            e.emergency_contact_name,
            e.emergency_contact_phone,
            e.emergency_contact_relationship,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn load_employee(conn: &Connection, id: i64) -> AppResult<Option<Employee>> {
    let mut stmt = conn.prepare_cached(&format!("{SELECT_EMPLOYEE} WHERE id = ?1"))?;
    Ok(stmt.query_row([id], map_employee_row).optional()?)
}

/// Newest first, optionally restricted to one status.
pub fn load_employees(
    conn: &Connection,
    status: Option<EmployeeStatus>,
) -> AppResult<Vec<Employee>> {
    let mut stmt = conn.prepare_cached(&format!(
        "{SELECT_EMPLOYEE} WHERE (?1 IS NULL OR status = ?1) ORDER BY id DESC"
    ))?;

    let rows = stmt.query_map([status.map(|s| s.to_db_str())], map_employee_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Rewrite every column of an employee (all fields except id).
pub fn update_employee(conn: &Connection, e: &Employee) -> AppResult<usize> {
    Ok(conn.execute(
        "UPDATE employees
         SET first_name = ?1, last_name = ?2, email = ?3, phone = ?4, role = ?5,
             department = ?6, hire_date = ?7, status = ?8, emergency_contact_name = ?9,
             emergency_contact_phone = ?10, emergency_contact_relationship = ?11
         WHERE id = ?12",
        params![
            e.first_name,
            e.last_name,
            e.email,
            e.phone,
            e.role,
            e.department,
            date_to_db(&e.hire_date),
            e.status.to_db_str(),
            e.emergency_contact_name,
            e.emergency_contact_phone,
            e.emergency_contact_relationship,
            e.id,
        ],
    )?)
}

pub fn delete_employee(conn: &Connection, id: i64) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM employees WHERE id = ?1", [id])?)
}

pub fn count_employees_by_status(conn: &Connection) -> AppResult<Vec<(String, usize)>> {
    let mut stmt = conn.prepare_cached("SELECT status, COUNT(*) FROM employees GROUP BY status")?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)? as usize))
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------
// Departments
// ---------------------------

pub fn map_department_row(row: &Row) -> Result<Department> {
    Ok(Department {
        id: row.get("id")?,
        name: row.get("name")?,
        manager_id: row.get("manager_id")?,
        description: row.get("description")?,
        employee_count: row.get::<_, i64>("employee_count")? as usize,
    })
}

pub fn insert_department(conn: &Connection, d: &Department) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO departments (name, manager_id, description) VALUES (?1, ?2, ?3)",
        params![d.name, d.manager_id, d.description],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn load_department(conn: &Connection, id: i64) -> AppResult<Option<Department>> {
    let mut stmt = conn.prepare_cached(&format!("{SELECT_DEPARTMENT} WHERE d.id = ?1"))?;
    Ok(stmt.query_row([id], map_department_row).optional()?)
}

pub fn find_department_by_name(conn: &Connection, name: &str) -> AppResult<Option<Department>> {
    let mut stmt = conn.prepare_cached(&format!(
        "{SELECT_DEPARTMENT} WHERE d.name = ?1 COLLATE NOCASE"
    ))?;
    Ok(stmt.query_row([name], map_department_row).optional()?)
}

/// Alphabetical by name.
pub fn load_departments(conn: &Connection) -> AppResult<Vec<Department>> {
    let mut stmt =
        conn.prepare_cached(&format!("{SELECT_DEPARTMENT} ORDER BY d.name COLLATE NOCASE"))?;
    let rows = stmt.query_map([], map_department_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn update_department(conn: &Connection, d: &Department) -> AppResult<usize> {
    Ok(conn.execute(
        "UPDATE departments SET name = ?1, manager_id = ?2, description = ?3 WHERE id = ?4",
        params![d.name, d.manager_id, d.description, d.id],
    )?)
}

pub fn delete_department(conn: &Connection, id: i64) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM departments WHERE id = ?1", [id])?)
}
