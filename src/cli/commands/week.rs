use crate::cli::commands::open_manager;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::weekly::WeeklyAggregate;
use crate::ui::messages::header;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::date::{parse_date, week_start_of};
use crate::utils::time::format_hours;
use chrono::Duration;

const BAR_WIDTH: usize = 30;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Week {
        employee,
        start,
        json,
    } = cmd
    {
        let employee_id = employee.unwrap_or(cfg.default_employee);
        let manager = open_manager(cfg, &None)?;

        let week_start = match start {
            Some(s) => parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?,
            None => week_start_of(manager.today(), manager.policy().week_start),
        };

        let week = manager.weekly_hours(employee_id, week_start)?;

        if *json {
            let out =
                serde_json::to_string_pretty(&week).map_err(|e| AppError::Other(e.to_string()))?;
            println!("{}", out);
            return Ok(());
        }

        print_week(&week, cfg.weekly_hours_goal);
    }

    Ok(())
}

fn print_week(week: &WeeklyAggregate, goal: f64) {
    header(format!(
        "Employee {}: week {} → {}",
        week.employee_id, week.week_start, week.week_end
    ));

    for (i, hours) in week.daily_hours().iter().enumerate() {
        let Some(day) = week.week_start.checked_add_signed(Duration::days(i as i64)) else {
            break;
        };
        let label = day.format("%a %Y-%m-%d");
        if *hours > 0.0 {
            println!("  {}  {:>6.2}h  {}", label, hours, format_hours(*hours));
        } else {
            println!("  {}  {GREY}{:>6}{RESET}", label, "-");
        }
    }

    let pct = week.progress_percent(goal);
    let filled = ((pct / 100.0) * BAR_WIDTH as f64).round() as usize;
    let color = if pct >= 100.0 { GREEN } else { YELLOW };

    println!();
    println!(
        "Total: {CYAN}{:.2}h{RESET} ({}) in {} entries",
        week.total_hours,
        format_hours(week.total_hours),
        week.entries.len()
    );
    println!(
        "Goal:  {:.0}h [{color}{}{RESET}{}] {:.0}%",
        goal,
        "█".repeat(filled),
        "░".repeat(BAR_WIDTH - filled.min(BAR_WIDTH)),
        pct
    );
}
