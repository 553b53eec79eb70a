//! Calendar-day bucketing of tasks.

use chrono::NaiveDate;
use tracing::debug;
use workload_core::dates::month_days;
use workload_core::models::{HeatmapDay, TaskRecord};
use workload_core::policy::intensity_level;
use workload_core::{Result, WorkloadError};

/// Whether `task` occupies `date`.
///
/// The span runs from the planned start to the planned end, each falling back
/// to the actual end. With both ends known the span is inclusive; with only one
/// the task occupies that single day; with neither it occupies no day.
pub fn is_active_on(task: &TaskRecord, date: NaiveDate) -> bool {
    match (task.span_start(), task.span_end()) {
        (Some(start), Some(end)) => start <= date && date <= end,
        (Some(day), None) | (None, Some(day)) => day == date,
        (None, None) => false,
    }
}

/// The tasks active on `date`, in input order.
pub fn tasks_active_on(tasks: &[TaskRecord], date: NaiveDate) -> Vec<&TaskRecord> {
    tasks.iter().filter(|t| is_active_on(t, date)).collect()
}

/// One [`HeatmapDay`] per day of `month` (1-based), first to last.
///
/// Fails with [`WorkloadError::InvalidMonth`] when `(year, month)` does not
/// name a calendar month.
pub fn month_heatmap(tasks: &[TaskRecord], year: i32, month: u32) -> Result<Vec<HeatmapDay>> {
    let days = month_days(year, month).ok_or(WorkloadError::InvalidMonth { year, month })?;

    Ok(days
        .into_iter()
        .map(|date| {
            let active: Vec<TaskRecord> = tasks_active_on(tasks, date)
                .into_iter()
                .cloned()
                .collect();
            HeatmapDay {
                date,
                task_count: active.len(),
                intensity: intensity_level(active.len()),
                tasks: active,
            }
        })
        .collect())
}

/// Like [`month_heatmap`], yielding an empty heatmap for an invalid month.
pub fn generate_month_heatmap(tasks: &[TaskRecord], year: i32, month: u32) -> Vec<HeatmapDay> {
    month_heatmap(tasks, year, month).unwrap_or_else(|e| {
        debug!(error = %e, "no heatmap for invalid month");
        Vec::new()
    })
}
