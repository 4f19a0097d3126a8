use crate::cli::commands::open_manager;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::employee::EmployeeLogic;
use crate::db::log::ttlog_quiet;
use crate::errors::AppResult;
use crate::models::time_entry::TimeEntry;
use crate::ui::messages::{info, success};
use crate::utils::colors::{CYAN, GREEN, RESET};
use crate::utils::date::DayBoundary;
use crate::utils::table::{Column, Table};
use crate::utils::time::{format_elapsed, format_hours};
use chrono::Duration;

/// `in`, `out` and `status`.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    match cmd {
        Commands::In { employee, at } => {
            let employee_id = employee.unwrap_or(cfg.default_employee);
            let manager = open_manager(cfg, at)?;

            let known = manager.with_store(|pool| EmployeeLogic::check_clock_in(pool, employee_id))?;
            let who = match &known {
                Some(e) => format!("{} (#{})", e.full_name(), employee_id),
                None => format!("Employee {}", employee_id),
            };

            let entry = manager.clock_in(employee_id)?;
            let boundary = manager.policy().boundary;
            let when = format!("{} {}", entry.date, boundary.format_time(&entry.clock_in));

            manager.with_store(|pool| {
                ttlog_quiet(&pool.conn, "clock_in", &employee_id.to_string(), &when);
                Ok(())
            })?;

            success(format!("{} clocked in at {}{}{}", who, GREEN, when, RESET));
        }

        Commands::Out { employee, at } => {
            let employee_id = employee.unwrap_or(cfg.default_employee);
            let manager = open_manager(cfg, at)?;

            let entry = manager.clock_out(employee_id)?;
            let boundary = manager.policy().boundary;

            manager.with_store(|pool| {
                ttlog_quiet(
                    &pool.conn,
                    "clock_out",
                    &entry.id.to_string(),
                    &format!("employee {}: {:.2}h", employee_id, entry.total_hours),
                );
                Ok(())
            })?;

            success(format!(
                "Employee {} clocked out at {} (entry #{})",
                employee_id,
                entry
                    .clock_out
                    .map(|t| boundary.format_time(&t))
                    .unwrap_or_default(),
                entry.id
            ));
            println!(
                "⏱️  Worked: {}{:.2}h{} ({})",
                CYAN,
                entry.total_hours,
                RESET,
                format_hours(entry.total_hours)
            );
        }

        Commands::Status { employee, all } => {
            let manager = open_manager(cfg, &None)?;
            let boundary = manager.policy().boundary;

            let sessions = if *all {
                manager.open_sessions()?
            } else {
                let employee_id = employee.unwrap_or(cfg.default_employee);
                manager.current_entry(employee_id)?.into_iter().collect()
            };

            if sessions.is_empty() {
                info("No open sessions.");
                return Ok(());
            }

            let mut rows = Vec::with_capacity(sessions.len());
            for s in sessions {
                let elapsed = manager.elapsed(s.employee_id)?.unwrap_or_else(Duration::zero);
                rows.push((s, elapsed));
            }

            print_sessions(&rows, &boundary);
        }

        _ => {}
    }

    Ok(())
}

fn print_sessions(sessions: &[(TimeEntry, Duration)], boundary: &DayBoundary) {
    let mut table = Table::new(vec![
        Column::new("EMPLOYEE", 8),
        Column::new("DATE", 10),
        Column::new("IN", 8),
        Column::new("ELAPSED", 9),
    ]);

    for (s, elapsed) in sessions {
        table.add_row(vec![
            s.employee_id.to_string(),
            s.date_str(),
            format!("{GREEN}{}{RESET}", boundary.format_time(&s.clock_in)),
            format_elapsed(*elapsed),
        ]);
    }

    println!("🟢 Open sessions:\n");
    print!("{}", table.render());
}
