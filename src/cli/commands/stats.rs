use crate::cli::commands::open_manager;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::employee::dashboard;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::header;
use crate::utils::colors::{CYAN, RESET, YELLOW};
use crate::utils::time::format_hours;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Stats { json } = cmd {
        let manager = open_manager(cfg, &None)?;
        let stats = dashboard(&manager)?;

        if *json {
            let out =
                serde_json::to_string_pretty(&stats).map_err(|e| AppError::Other(e.to_string()))?;
            println!("{}", out);
            return Ok(());
        }

        header(format!("Dashboard for {}", manager.today()));
        println!("  Employees:      {}", stats.directory.employees);
        println!("  Active:         {}", stats.directory.active);
        println!("  On leave:       {}", stats.directory.on_leave);
        println!("  Departments:    {}", stats.directory.departments);
        println!("  Clocked in:     {CYAN}{}{RESET}", stats.open_sessions);
        println!("  Pending leave:  {YELLOW}{}{RESET}", stats.pending_leave);
        println!(
            "  Hours today:    {:.2}h ({})",
            stats.hours_today,
            format_hours(stats.hours_today)
        );
    }

    Ok(())
}
