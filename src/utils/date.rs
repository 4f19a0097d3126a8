//! Calendar helpers: day boundary (which timezone defines "today"),
//! period parsing and week arithmetic.

use crate::errors::{AppError, AppResult};
use chrono::{
    DateTime, Datelike, Duration, FixedOffset, Local, LocalResult, NaiveDate, NaiveDateTime,
    NaiveTime, Offset, TimeZone, Utc, Weekday,
};
use std::fmt;

/// Timezone used to turn instants into calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayBoundary {
    /// Host timezone.
    Local,
    /// Fixed UTC offset (`utc` is `+00:00`).
    Fixed(FixedOffset),
}

impl DayBoundary {
    pub fn utc() -> Self {
        DayBoundary::Fixed(Utc.fix())
    }

    /// Accepts `local`, `utc` or an offset like `+02:00` / `-0530`.
    pub fn parse(s: &str) -> AppResult<Self> {
        let v = s.trim();
        match v.to_lowercase().as_str() {
            "local" | "" => return Ok(DayBoundary::Local),
            "utc" | "z" => return Ok(Self::utc()),
            _ => {}
        }

        parse_offset(v)
            .map(DayBoundary::Fixed)
            .ok_or_else(|| AppError::Config(format!("Invalid timezone '{}'", s)))
    }

    /// Calendar date of an instant.
    pub fn date_of(&self, ts: &DateTime<Utc>) -> NaiveDate {
        self.naive_of(ts).date()
    }

    /// Wall-clock representation of an instant.
    pub fn naive_of(&self, ts: &DateTime<Utc>) -> NaiveDateTime {
        match self {
            DayBoundary::Local => ts.with_timezone(&Local).naive_local(),
            DayBoundary::Fixed(off) => ts.with_timezone(off).naive_local(),
        }
    }

    /// Interpret a wall-clock time in this timezone.
    pub fn to_utc(&self, naive: NaiveDateTime) -> AppResult<DateTime<Utc>> {
        let resolved = match self {
            DayBoundary::Local => pick(Local.from_local_datetime(&naive)),
            DayBoundary::Fixed(off) => pick(off.from_local_datetime(&naive)),
        };
        resolved.ok_or_else(|| {
            AppError::InvalidTime(format!("{} does not exist in the configured timezone", naive))
        })
    }

    pub fn format_time(&self, ts: &DateTime<Utc>) -> String {
        self.naive_of(ts).format("%H:%M").to_string()
    }
}

impl fmt::Display for DayBoundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayBoundary::Local => write!(f, "local"),
            DayBoundary::Fixed(off) => write!(f, "{}", off),
        }
    }
}

fn pick<T: TimeZone>(r: LocalResult<DateTime<T>>) -> Option<DateTime<Utc>> {
    // Ambiguous wall times (DST fall-back) resolve to the earlier instant.
    r.earliest().map(|dt| dt.with_timezone(&Utc))
}

fn parse_offset(s: &str) -> Option<FixedOffset> {
    let (sign, rest) = match s.chars().next()? {
        '+' => (1, &s[1..]),
        '-' => (-1, &s[1..]),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = digits[2..].parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Parse a user supplied timestamp.
///
/// Accepted: RFC 3339, `YYYY-MM-DD HH:MM[:SS]`, `YYYY-MM-DDTHH:MM[:SS]`,
/// and `HH:MM[:SS]` which refers to `today`.
pub fn parse_timestamp(
    s: &str,
    boundary: &DayBoundary,
    today: NaiveDate,
) -> AppResult<DateTime<Utc>> {
    let v = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(v) {
        return Ok(dt.with_timezone(&Utc));
    }

    for fmt in [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(v, fmt) {
            return boundary.to_utc(naive);
        }
    }

    for fmt in ["%H:%M:%S", "%H:%M"] {
        if let Ok(t) = NaiveTime::parse_from_str(v, fmt) {
            return boundary.to_utc(today.and_time(t));
        }
    }

    Err(AppError::InvalidTime(s.to_string()))
}

/// First day of the week containing `date`.
pub fn week_start_of(date: NaiveDate, first_day: Weekday) -> NaiveDate {
    let offset = (7 + date.weekday().num_days_from_monday() as i64
        - first_day.num_days_from_monday() as i64)
        % 7;
    date - Duration::days(offset)
}

pub fn parse_weekday(s: &str) -> AppResult<Weekday> {
    s.trim()
        .parse::<Weekday>()
        .map_err(|_| AppError::Config(format!("Invalid week_start '{}'", s)))
}

/// Inclusive bounds of a period: `YYYY`, `YYYY-MM`, `YYYY-MM-DD`
/// or a range `A:B` of those.
pub fn period_bounds(p: &str) -> Result<(NaiveDate, NaiveDate), String> {
    if let Some((a, b)) = p.split_once(':') {
        let (start, _) = single_period(a)?;
        let (_, end) = single_period(b)?;
        if end < start {
            return Err(format!("Invalid period: {} (end before start)", p));
        }
        return Ok((start, end));
    }
    single_period(p)
}

fn single_period(p: &str) -> Result<(NaiveDate, NaiveDate), String> {
    let p = p.trim();

    // YYYY-MM-DD
    if let Some(d) = parse_date(p) {
        return Ok((d, d));
    }

    // YYYY-MM
    if let Some(first) = parse_date(&format!("{}-01", p)) {
        return Ok((first, last_day_of_month(first.year(), first.month())));
    }

    // YYYY
    if p.len() == 4
        && let Ok(year) = p.parse::<i32>()
        && let (Some(first), Some(last)) = (
            NaiveDate::from_ymd_opt(year, 1, 1),
            NaiveDate::from_ymd_opt(year, 12, 31),
        )
    {
        return Ok((first, last));
    }

    Err(format!("Invalid period: {}", p))
}

fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let (y, m) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1)
        .and_then(|d| d.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn week_start_monday_and_sunday() {
        // 2025-09-03 is a Wednesday
        assert_eq!(week_start_of(d("2025-09-03"), Weekday::Mon), d("2025-09-01"));
        assert_eq!(week_start_of(d("2025-09-01"), Weekday::Mon), d("2025-09-01"));
        assert_eq!(week_start_of(d("2025-09-03"), Weekday::Sun), d("2025-08-31"));
    }

    #[test]
    fn periods() {
        assert_eq!(
            period_bounds("2024-02").unwrap(),
            (d("2024-02-01"), d("2024-02-29"))
        );
        assert_eq!(
            period_bounds("2025").unwrap(),
            (d("2025-01-01"), d("2025-12-31"))
        );
        assert_eq!(
            period_bounds("2024-09:2025-09").unwrap(),
            (d("2024-09-01"), d("2025-09-30"))
        );
        assert!(period_bounds("2025-13").is_err());
        assert!(period_bounds("2025-09:2025-08").is_err());
    }

    #[test]
    fn boundary_parsing() {
        assert_eq!(DayBoundary::parse("local").unwrap(), DayBoundary::Local);
        assert_eq!(DayBoundary::parse("UTC").unwrap(), DayBoundary::utc());
        let plus2 = DayBoundary::parse("+02:00").unwrap();
        assert_eq!(
            plus2,
            DayBoundary::Fixed(FixedOffset::east_opt(7200).unwrap())
        );
        assert!(DayBoundary::parse("+25:00").is_err());
        assert!(DayBoundary::parse("Europe/Rome").is_err());
    }

    #[test]
    fn date_depends_on_boundary() {
        let ts = parse_timestamp("2025-09-01T23:30:00Z", &DayBoundary::utc(), d("2025-01-01"))
            .unwrap();
        let plus2 = DayBoundary::parse("+02:00").unwrap();
        assert_eq!(DayBoundary::utc().date_of(&ts), d("2025-09-01"));
        assert_eq!(plus2.date_of(&ts), d("2025-09-02"));
    }

    #[test]
    fn timestamp_formats() {
        let b = DayBoundary::parse("+01:00").unwrap();
        let today = d("2025-09-01");
        let full = parse_timestamp("2025-09-01 09:00", &b, today).unwrap();
        let short = parse_timestamp("09:00", &b, today).unwrap();
        assert_eq!(full, short);
        assert_eq!(full.to_rfc3339(), "2025-09-01T08:00:00+00:00");
        assert!(parse_timestamp("tomorrow", &b, today).is_err());
    }
}
