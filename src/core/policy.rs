use crate::config::Config;
use crate::core::calculator::hours::RoundingMode;
use crate::errors::AppResult;
use crate::utils::date::{DayBoundary, parse_weekday};
use chrono::Weekday;

/// Explicit rounding and calendar rules. Nothing here falls back to
/// host-locale defaults unless `timezone: local` is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimePolicy {
    pub rounding: RoundingMode,
    pub boundary: DayBoundary,
    pub week_start: Weekday,
}

impl Default for TimePolicy {
    fn default() -> Self {
        Self {
            rounding: RoundingMode::HalfUp,
            boundary: DayBoundary::Local,
            week_start: Weekday::Mon,
        }
    }
}

impl TimePolicy {
    pub fn from_config(cfg: &Config) -> AppResult<Self> {
        Ok(Self {
            rounding: cfg.hours_rounding,
            boundary: DayBoundary::parse(&cfg.timezone)?,
            week_start: parse_weekday(&cfg.week_start)?,
        })
    }

    /// UTC days, half-up, Monday weeks.
    pub fn utc() -> Self {
        Self {
            boundary: DayBoundary::utc(),
            ..Self::default()
        }
    }
}
