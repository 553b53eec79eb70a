//! Month calendar layout: Sunday-to-Saturday week rows of task bars.
//!
//! The grid runs from the Sunday on or before the first of the month to the
//! Saturday on or after its last day. Task spans are clipped to the grid, and
//! each week stacks the bars it shows into its own lanes.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;
use workload_core::dates::month_days;
use workload_core::models::{PersonWorkload, TaskRecord};
use workload_core::{Result, WorkloadError};

use crate::timeline::{first_fit, task_span};

pub const DAYS_PER_WEEK: i64 = 7;

/// One task drawn in one week.
#[derive(Debug, Clone, Serialize)]
pub struct CalendarBar<'a> {
    pub person: &'a str,
    pub task: &'a TaskRecord,
    /// Span clipped to the calendar grid.
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Weekday columns covered in this week, Sunday = 0.
    pub first_column: u32,
    pub last_column: u32,
}

/// One row of the calendar.
#[derive(Debug, Clone, Serialize)]
pub struct CalendarWeek<'a> {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub lanes: Vec<Vec<CalendarBar<'a>>>,
}

#[derive(Debug, Clone, Copy)]
struct Span<'a> {
    person: &'a str,
    task: &'a TaskRecord,
    start: NaiveDate,
    end: NaiveDate,
}

/// First and last day of the whole-week grid around `month` (1-based).
pub fn calendar_grid(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let days = month_days(year, month)?;
    let (first, last) = (*days.first()?, *days.last()?);
    let start = first.checked_sub_signed(Duration::days(i64::from(
        first.weekday().num_days_from_sunday(),
    )))?;
    let end = last.checked_add_signed(Duration::days(
        DAYS_PER_WEEK - 1 - i64::from(last.weekday().num_days_from_sunday()),
    ))?;
    Some((start, end))
}

/// Lay out every spanned task of `people` on the calendar of `month`.
///
/// Tasks are taken person by person in input order. A task is left out when
/// it has no span, ends before it starts, or misses the grid entirely.
/// Fails with [`WorkloadError::InvalidMonth`] when `(year, month)` does not
/// name a calendar month.
pub fn month_calendar(
    people: &[PersonWorkload],
    year: i32,
    month: u32,
) -> Result<Vec<CalendarWeek<'_>>> {
    let (grid_start, grid_end) =
        calendar_grid(year, month).ok_or(WorkloadError::InvalidMonth { year, month })?;
    let spans = clipped_spans(people, grid_start, grid_end);

    let mut weeks = Vec::new();
    let mut week_start = grid_start;
    loop {
        let week_end = week_start + Duration::days(DAYS_PER_WEEK - 1);
        let visible = spans
            .iter()
            .filter(|s| s.start <= week_end && s.end >= week_start)
            .map(|s| (s, s.start, s.end));
        let lanes = first_fit(visible)
            .into_iter()
            .map(|lane| {
                lane.into_iter()
                    .map(|span| place(span, week_start, week_end))
                    .collect()
            })
            .collect();
        weeks.push(CalendarWeek {
            start: week_start,
            end: week_end,
            lanes,
        });

        match week_end.succ_opt() {
            Some(next) if next <= grid_end => week_start = next,
            _ => break,
        }
    }
    Ok(weeks)
}

fn clipped_spans(
    people: &[PersonWorkload],
    grid_start: NaiveDate,
    grid_end: NaiveDate,
) -> Vec<Span<'_>> {
    people
        .iter()
        .flat_map(|person| person.tasks.iter().map(move |task| (person, task)))
        .filter_map(|(person, task)| {
            let (start, end) = task_span(task)?;
            if start > end || end < grid_start || start > grid_end {
                return None;
            }
            Some(Span {
                person: &person.name,
                task,
                start: start.max(grid_start),
                end: end.min(grid_end),
            })
        })
        .collect()
}

fn place<'a>(span: &Span<'a>, week_start: NaiveDate, week_end: NaiveDate) -> CalendarBar<'a> {
    let column = |date: NaiveDate| (date - week_start).num_days() as u32;
    CalendarBar {
        person: span.person,
        task: span.task,
        start: span.start,
        end: span.end,
        first_column: column(span.start.max(week_start)),
        last_column: column(span.end.min(week_end)),
    }
}
