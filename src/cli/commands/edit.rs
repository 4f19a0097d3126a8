use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::entry::EntryLogic;
use crate::core::policy::TimePolicy;
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::db::store::TimeEntryStore;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::date::parse_timestamp;
use crate::utils::time::format_hours;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit {
        id,
        clock_in,
        clock_out,
    } = cmd
    {
        let policy = TimePolicy::from_config(cfg)?;
        let mut pool = DbPool::open(&cfg.database)?;

        // bare HH:MM refers to the entry's own day, not today
        let day = pool.get(*id)?.date;
        let parse = |v: &Option<String>| {
            v.as_deref()
                .map(|s| parse_timestamp(s, &policy.boundary, day))
                .transpose()
        };
        let new_in = parse(clock_in)?;
        let new_out = parse(clock_out)?;

        let entry = EntryLogic::edit(&mut pool, *id, new_in, new_out, &policy)?;

        let summary = format!(
            "{} {} → {} ({:.2}h)",
            entry.date,
            policy.boundary.format_time(&entry.clock_in),
            entry
                .clock_out
                .map(|t| policy.boundary.format_time(&t))
                .unwrap_or_default(),
            entry.total_hours
        );
        ttlog_quiet(&pool.conn, "edit", &id.to_string(), &summary);

        success(format!(
            "Entry #{} updated: {} [{}]",
            id,
            summary,
            format_hours(entry.total_hours)
        ));
    }

    Ok(())
}
