use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use regex::Regex;

/// Cell value meaning "no date".
pub const ABSENT_DATE: &str = "--";

fn month_day_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(\d{1,2})月(\d{1,2})日$").expect("regex is valid"))
}

// ── Cell parsing ──────────────────────────────────────────────────────────────

/// Parse a `<month>月<day>日` cell onto `year`.
///
/// Returns `None` for the `--` sentinel, an empty cell, anything that does not
/// match the pattern, and month/day pairs that do not exist in `year`.
///
/// The year is never read from the cell, so a plan running from December into
/// January places both ends in the same year.
pub fn parse_month_day(cell: &str, year: i32) -> Option<NaiveDate> {
    let cell = cell.trim();
    if cell.is_empty() || cell == ABSENT_DATE {
        return None;
    }

    let caps = month_day_pattern().captures(cell)?;
    let month: u32 = caps[1].parse().ok()?;
    let day: u32 = caps[2].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// `true` when local midnight of `date` lies strictly before `now`.
pub fn starts_before(date: NaiveDate, now: NaiveDateTime) -> bool {
    date.and_hms_opt(0, 0, 0).is_some_and(|midnight| midnight < now)
}

// ── Month helpers ─────────────────────────────────────────────────────────────

/// Every day of `month` (1-based) in `year`, first to last.
///
/// Returns `None` when `month` is outside `1..=12` or `year` is out of range.
pub fn month_days(year: i32, month: u32) -> Option<Vec<NaiveDate>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    Some(
        first
            .iter_days()
            .take_while(|day| day.month() == month)
            .collect(),
    )
}
