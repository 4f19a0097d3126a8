use crate::cli::commands::del::ask_confirmation;
use crate::cli::parser::{Commands, EmployeeAction, EmployeeFields};
use crate::config::Config;
use crate::core::employee::EmployeeLogic;
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::employee::{Employee, EmployeeDraft, EmployeeStatus};
use crate::ui::messages::{header, info, success};
use crate::utils::colors::{GREEN, GREY, RESET, YELLOW};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Employee { action } = cmd else {
        return Ok(());
    };

    let mut pool = DbPool::open(&cfg.database)?;

    match action {
        EmployeeAction::Add { fields } => {
            let draft = fields.apply(EmployeeDraft::default());
            let e = EmployeeLogic::create(&mut pool, &draft)?;

            ttlog_quiet(
                &pool.conn,
                "employee_add",
                &e.id.to_string(),
                &format!("{} ({})", e.full_name(), e.department),
            );
            success(format!("Employee #{} added: {}", e.id, e.full_name()));
        }

        EmployeeAction::List {
            status,
            search,
            json,
        } => {
            let filter = match status {
                Some(s) => Some(EmployeeStatus::from_db_str(s).ok_or_else(|| {
                    AppError::InvalidEmployee(format!("unknown status '{}'", s))
                })?),
                None => None,
            };

            let employees = EmployeeLogic::list(&mut pool, filter, search.as_deref())?;

            if *json {
                let out = serde_json::to_string_pretty(&employees)
                    .map_err(|e| AppError::Other(e.to_string()))?;
                println!("{}", out);
                return Ok(());
            }

            header(format!("Employees: {}", employees.len()));
            if employees.is_empty() {
                info("No employees found.");
            } else {
                print!("{}", render_employees(&employees));
            }
        }

        EmployeeAction::Show { id } => {
            let e = EmployeeLogic::get(&mut pool, *id)?;
            print_employee(&e);
        }

        EmployeeAction::Update { id, fields } => {
            let current = EmployeeLogic::get(&mut pool, *id)?;
            let draft = fields.apply(EmployeeDraft::from(&current));
            let e = EmployeeLogic::update(&mut pool, *id, &draft)?;

            ttlog_quiet(&pool.conn, "employee_edit", &id.to_string(), &e.full_name());
            success(format!("Employee #{} updated.", id));
        }

        EmployeeAction::Del { id, yes } => {
            let e = EmployeeLogic::get(&mut pool, *id)?;
            let prompt = format!(
                "Remove employee #{} ({}) from the directory? Time entries are kept.",
                e.id,
                e.full_name()
            );

            if !*yes && !ask_confirmation(&prompt) {
                info("Operation cancelled.");
                return Ok(());
            }

            EmployeeLogic::delete(&mut pool, *id)?;
            ttlog_quiet(&pool.conn, "employee_del", &id.to_string(), &e.full_name());
            success(format!("Employee #{} has been removed.", id));
        }
    }

    Ok(())
}

impl EmployeeFields {
    /// Overlay the given flags on a draft.
    fn apply(&self, mut draft: EmployeeDraft) -> EmployeeDraft {
        let set = |target: &mut String, value: &Option<String>| {
            if let Some(v) = value {
                *target = v.clone();
            }
        };
        set(&mut draft.first_name, &self.first_name);
        set(&mut draft.last_name, &self.last_name);
        set(&mut draft.email, &self.email);
        set(&mut draft.phone, &self.phone);
        set(&mut draft.role, &self.role);
        set(&mut draft.department, &self.department);
        set(&mut draft.emergency_contact_name, &self.emergency_name);
        set(&mut draft.emergency_contact_phone, &self.emergency_phone);
        set(
            &mut draft.emergency_contact_relationship,
            &self.emergency_relationship,
        );
        if self.hire_date.is_some() {
            draft.hire_date = self.hire_date.clone();
        }
        if self.status.is_some() {
            draft.status = self.status.clone();
        }
        draft
    }
}

fn status_colored(status: EmployeeStatus) -> String {
    let color = match status {
        EmployeeStatus::Active => GREEN,
        EmployeeStatus::OnLeave => YELLOW,
        EmployeeStatus::Inactive => GREY,
    };
    format!("{color}{}{RESET}", status)
}

fn render_employees(employees: &[Employee]) -> String {
    let mut table = Table::new(vec![
        Column::new("ID", 4),
        Column::new("NAME", 20),
        Column::new("EMAIL", 24),
        Column::new("ROLE", 14),
        Column::new("DEPARTMENT", 12),
        Column::new("HIRED", 10),
        Column::new("STATUS", 8),
    ]);

    for e in employees {
        table.add_row(vec![
            e.id.to_string(),
            e.full_name(),
            e.email.clone(),
            e.role.clone(),
            e.department.clone(),
            e.hire_date.to_string(),
            status_colored(e.status),
        ]);
    }

    table.render()
}

fn print_employee(e: &Employee) {
    header(format!("Employee #{}: {}", e.id, e.full_name()));
    println!("  Email:      {}", e.email);
    println!("  Phone:      {}", e.phone);
    println!("  Role:       {}", e.role);
    println!("  Department: {}", e.department);
    println!("  Hired:      {}", e.hire_date);
    println!("  Status:     {}", status_colored(e.status));
    if !e.emergency_contact_name.is_empty() {
        println!(
            "  Emergency:  {} {} ({})",
            e.emergency_contact_name, e.emergency_contact_phone, e.emergency_contact_relationship
        );
    }
}
