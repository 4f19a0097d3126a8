//! Hour arithmetic: durations to decimal hours with an explicit rounding mode.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How hour totals are rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// 0.005 → 0.01
    #[default]
    HalfUp,
    /// Banker's rounding: 0.005 → 0.00, 0.015 → 0.02
    HalfEven,
    /// Truncate toward zero.
    Down,
}

const SECS_PER_HUNDREDTH: i64 = 36;

/// Decimal hours between two instants, rounded to hundredths.
/// Negative spans count as zero.
pub fn hours_between(start: &DateTime<Utc>, end: &DateTime<Utc>, mode: RoundingMode) -> f64 {
    let secs = (*end - *start).num_seconds().max(0);
    hundredths_from_seconds(secs, mode) as f64 / 100.0
}

fn hundredths_from_seconds(secs: i64, mode: RoundingMode) -> i64 {
    let q = secs / SECS_PER_HUNDREDTH;
    let r = secs % SECS_PER_HUNDREDTH;
    let half = SECS_PER_HUNDREDTH / 2;

    match mode {
        RoundingMode::Down => q,
        RoundingMode::HalfUp => {
            if r >= half {
                q + 1
            } else {
                q
            }
        }
        RoundingMode::HalfEven => {
            if r > half || (r == half && q % 2 == 1) {
                q + 1
            } else {
                q
            }
        }
    }
}

/// Round an already-decimal hour value (e.g. a sum) to two places.
pub fn round_hours(value: f64, mode: RoundingMode) -> f64 {
    // Scale first, then clean float noise like 1550.0000000002 before rounding.
    let scaled = (value * 100.0 * 1e6).round() / 1e6;
    let rounded = match mode {
        RoundingMode::HalfUp => scaled.round(),
        RoundingMode::HalfEven => scaled.round_ties_even(),
        RoundingMode::Down => scaled.trunc(),
    };
    rounded / 100.0
}

/// Sum of entry totals, rounded once.
pub fn sum_hours<I>(values: I, mode: RoundingMode) -> f64
where
    I: IntoIterator<Item = f64>,
{
    round_hours(values.into_iter().sum(), mode)
}
