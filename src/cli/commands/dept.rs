use crate::cli::parser::{Commands, DeptAction};
use crate::config::Config;
use crate::core::employee::DepartmentLogic;
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::employee::{Department, DepartmentDraft};
use crate::ui::messages::{header, info, success};
use crate::utils::colors::{GREY, RESET};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Dept { action } = cmd else {
        return Ok(());
    };

    let mut pool = DbPool::open(&cfg.database)?;

    match action {
        DeptAction::Add {
            name,
            manager,
            description,
        } => {
            let draft = DepartmentDraft {
                name: name.clone(),
                manager_id: *manager,
                description: description.clone(),
            };
            let d = DepartmentLogic::create(&mut pool, &draft)?;

            ttlog_quiet(&pool.conn, "dept_add", &d.id.to_string(), &d.name);
            success(format!("Department #{} created: {}", d.id, d.name));
        }

        DeptAction::List { json } => {
            let departments = DepartmentLogic::list(&mut pool)?;

            if *json {
                let out = serde_json::to_string_pretty(&departments)
                    .map_err(|e| AppError::Other(e.to_string()))?;
                println!("{}", out);
                return Ok(());
            }

            header(format!("Departments: {}", departments.len()));
            if departments.is_empty() {
                info("No departments found.");
            } else {
                print!("{}", render_departments(&departments));
            }
        }

        DeptAction::Update {
            id,
            name,
            manager,
            description,
        } => {
            let current = DepartmentLogic::get(&mut pool, *id)?;
            let draft = DepartmentDraft {
                name: name.clone().unwrap_or(current.name),
                manager_id: manager.or(current.manager_id),
                description: description.clone().unwrap_or(current.description),
            };
            let d = DepartmentLogic::update(&mut pool, *id, &draft)?;

            ttlog_quiet(&pool.conn, "dept_edit", &id.to_string(), &d.name);
            success(format!("Department #{} updated.", id));
        }

        DeptAction::Del { id } => {
            let d = DepartmentLogic::delete(&mut pool, *id)?;
            ttlog_quiet(&pool.conn, "dept_del", &id.to_string(), &d.name);
            success(format!("Department #{} ({}) has been deleted.", id, d.name));
        }
    }

    Ok(())
}

fn render_departments(departments: &[Department]) -> String {
    let mut table = Table::new(vec![
        Column::new("ID", 4),
        Column::new("NAME", 16),
        Column::new("MANAGER", 7),
        Column::new("EMPLOYEES", 9),
        Column::new("DESCRIPTION", 24),
    ]);

    for d in departments {
        table.add_row(vec![
            d.id.to_string(),
            d.name.clone(),
            d.manager_id
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{GREY}-{RESET}")),
            d.employee_count.to_string(),
            d.description.clone(),
        ]);
    }

    table.render()
}
