use crate::cli::commands::open_manager;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calculator::hours::sum_hours;
use crate::db::store::TimeEntryStore;
use crate::errors::{AppError, AppResult};
use crate::models::time_entry::{TimeEntry, TimeEntryFilter};
use crate::ui::messages::{header, info};
use crate::utils::colors::{CYAN, RESET, colorize_in_out, colorize_optional};
use crate::utils::date::{DayBoundary, period_bounds};
use crate::utils::table::{Column, Table};
use crate::utils::time::format_hours;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        today,
        employee,
        period,
        json,
    } = cmd
    {
        let manager = open_manager(cfg, &None)?;
        let policy = *manager.policy();

        let (title, mut entries) = if *today {
            (
                format!("Entries for {}", manager.today()),
                manager.todays_entries()?,
            )
        } else if let Some(p) = period {
            let (from, to) = period_bounds(p).map_err(AppError::InvalidDate)?;
            let filter = TimeEntryFilter::between(from, to);
            (
                format!("Entries {} → {}", from, to),
                manager.with_store(|pool| pool.list(&filter))?,
            )
        } else if let Some(id) = employee {
            (
                format!("Entries of employee {}", id),
                manager.entries_for_employee(*id)?,
            )
        } else {
            (
                "All entries".to_string(),
                manager.with_store(|pool| pool.list(&TimeEntryFilter::all()))?,
            )
        };

        if let Some(id) = employee {
            entries.retain(|e| e.employee_id == *id);
        }

        if *json {
            let out = serde_json::to_string_pretty(&entries)
                .map_err(|e| AppError::Other(e.to_string()))?;
            println!("{}", out);
            return Ok(());
        }

        if entries.is_empty() {
            info("No time entries found.");
            return Ok(());
        }

        header(title);
        print!("{}", render_entries(&entries, &policy.boundary));

        let total = sum_hours(entries.iter().map(|e| e.total_hours), policy.rounding);
        println!(
            "\nTotal: {}{:.2}h{} ({}) over {} entries",
            CYAN,
            total,
            RESET,
            format_hours(total),
            entries.len()
        );
    }

    Ok(())
}

pub(crate) fn render_entries(entries: &[TimeEntry], boundary: &DayBoundary) -> String {
    let mut table = Table::new(vec![
        Column::new("ID", 5),
        Column::new("EMPLOYEE", 8),
        Column::new("DATE", 10),
        Column::new("IN", 5),
        Column::new("OUT", 5),
        Column::new("HOURS", 8),
    ]);

    for e in entries {
        let out = e
            .clock_out
            .map(|t| boundary.format_time(&t))
            .unwrap_or_else(|| "--:--".to_string());

        table.add_row(vec![
            e.id.to_string(),
            e.employee_id.to_string(),
            e.date_str(),
            colorize_in_out(&boundary.format_time(&e.clock_in), true),
            colorize_in_out(&out, false),
            colorize_optional(&format_hours(e.total_hours)),
        ]);
    }

    table.render()
}
