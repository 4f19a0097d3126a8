pub mod backup;
pub mod clock;
pub mod config;
pub mod db;
pub mod del;
pub mod dept;
pub mod edit;
pub mod employee;
pub mod export;
pub mod init;
pub mod leave;
pub mod list;
pub mod log;
pub mod stats;
pub mod week;

use crate::config::Config;
use crate::core::clock::{Clock, ManualClock, SystemClock};
use crate::core::policy::TimePolicy;
use crate::core::session::SessionManager;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::date::parse_timestamp;
use chrono::Utc;

/// Open the configured database behind a session manager. `at` replaces
/// the system clock with a fixed instant for back-dated punches.
pub(crate) fn open_manager(cfg: &Config, at: &Option<String>) -> AppResult<SessionManager<DbPool>> {
    let policy = TimePolicy::from_config(cfg)?;
    let pool = DbPool::open(&cfg.database)?;

    let clock: Box<dyn Clock> = match at {
        Some(ts) => {
            let today = policy.boundary.date_of(&Utc::now());
            Box::new(ManualClock::new(parse_timestamp(ts, &policy.boundary, today)?))
        }
        None => Box::new(SystemClock),
    };

    SessionManager::new(pool, clock, policy)
}
