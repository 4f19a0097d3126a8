use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::utils::date::DayBoundary;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        range,
        force,
    } = cmd
    {
        let boundary = DayBoundary::parse(&cfg.timezone)?;
        let mut pool = DbPool::open(&cfg.database)?;

        let rows = ExportLogic::export(&mut pool, *format, file, range, *force, &boundary)?;
        if rows > 0 {
            ttlog_quiet(
                &pool.conn,
                "export",
                file,
                &format!("{} entries exported as {}", rows, format.as_str()),
            );
        }
    }
    Ok(())
}
