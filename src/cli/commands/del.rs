use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::entry::EntryLogic;
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::db::store::TimeEntryStore;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
pub(crate) fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id, yes } = cmd {
        let mut pool = DbPool::open(&cfg.database)?;

        // fail on unknown ids before prompting
        let entry = pool.get(*id)?;

        let prompt = format!(
            "Delete entry #{} (employee {}, {}, {:.2}h)? This action is irreversible.",
            entry.id, entry.employee_id, entry.date, entry.total_hours
        );

        if !*yes && !ask_confirmation(&prompt) {
            info("Operation cancelled.");
            return Ok(());
        }

        let removed = EntryLogic::delete(&mut pool, *id)?;
        ttlog_quiet(
            &pool.conn,
            "del",
            &id.to_string(),
            &format!("employee {} on {}", removed.employee_id, removed.date),
        );

        success(format!("Entry #{} has been deleted.", id));
    }

    Ok(())
}
