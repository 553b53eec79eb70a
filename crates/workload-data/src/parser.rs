//! Task-file parsing.
//!
//! A task file is flat comma-separated text: the first non-blank line is the
//! header row, every following non-blank line is one task. There is no quoting,
//! so a cell can never contain a comma.
//!
//! Parsing never fails. Rows with too few cells or without a category/item are
//! dropped, and date cells that do not read as `<month>月<day>日` are treated
//! as absent.

use std::collections::BTreeMap;

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};
use tracing::debug;
use workload_core::dates::{parse_month_day, starts_before};
use workload_core::models::{
    TaskRecord, TaskStatus, HEADER_ACTUAL_END, HEADER_ACTUAL_TIME, HEADER_CATEGORY,
    HEADER_EST_END, HEADER_EST_START, HEADER_ESTIMATED_TIME, HEADER_ITEM,
};

const BYTE_ORDER_MARK: char = '\u{feff}';

// ── Public API ────────────────────────────────────────────────────────────────

/// Parse a task file, classifying overdue tasks against the local clock.
pub fn parse(text: &str) -> Vec<TaskRecord> {
    parse_at(text, Local::now().naive_local())
}

/// Parse a task file as if the current local time were `now`.
///
/// Dates carry no year in the file; every date is placed in `now`'s year.
pub fn parse_at(text: &str, now: NaiveDateTime) -> Vec<TaskRecord> {
    // Spreadsheet exports often lead with a byte-order mark.
    let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let Some((header_line, rows)) = lines.split_first() else {
        return Vec::new();
    };
    let headers = split_cells(header_line);

    let mut tasks = Vec::with_capacity(rows.len());
    let mut skipped = 0usize;

    for (offset, line) in rows.iter().enumerate() {
        // The header is line 0, so data rows start at 1.
        let row_index = offset + 1;
        match parse_row(&headers, line, row_index, now) {
            Some(task) => tasks.push(task),
            None => {
                skipped += 1;
                debug!(row = row_index, "skipping malformed task row");
            }
        }
    }

    debug!(parsed = tasks.len(), skipped, "parsed task file");
    tasks
}

/// Status of a task given its planned and actual end dates.
pub fn derive_status(
    est_end: Option<NaiveDate>,
    actual_end: Option<NaiveDate>,
    now: NaiveDateTime,
) -> TaskStatus {
    if actual_end.is_some() {
        TaskStatus::Completed
    } else if est_end.is_some_and(|end| starts_before(end, now)) {
        TaskStatus::Delayed
    } else {
        TaskStatus::Pending
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn split_cells(line: &str) -> Vec<&str> {
    line.split(',').map(str::trim).collect()
}

fn parse_row(
    headers: &[&str],
    line: &str,
    row_index: usize,
    now: NaiveDateTime,
) -> Option<TaskRecord> {
    let cells = split_cells(line);
    if cells.len() < headers.len() {
        return None;
    }

    let row: BTreeMap<String, String> = headers
        .iter()
        .zip(cells)
        .map(|(header, cell)| (header.to_string(), cell.to_string()))
        .collect();

    let field = |name: &str| row.get(name).map(String::as_str).unwrap_or("");

    let category = field(HEADER_CATEGORY);
    let item = field(HEADER_ITEM);
    if category.is_empty() || item.is_empty() {
        return None;
    }

    let year = now.year();
    let est_start = parse_month_day(field(HEADER_EST_START), year);
    let est_end = parse_month_day(field(HEADER_EST_END), year);
    let actual_end = parse_month_day(field(HEADER_ACTUAL_END), year);

    Some(TaskRecord {
        id: format!("{}-{}-{}", category, item, row_index),
        category: category.to_string(),
        item: item.to_string(),
        estimated_time: field(HEADER_ESTIMATED_TIME).to_string(),
        actual_time: field(HEADER_ACTUAL_TIME).to_string(),
        est_start,
        est_end,
        actual_end,
        status: derive_status(est_end, actual_end, now),
        original_row: row,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
