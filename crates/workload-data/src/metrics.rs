//! Per-person workload metrics.

use workload_core::models::{TaskRecord, TaskStatus, WorkloadMetrics};
use workload_core::policy::round_half_up;

/// Count `tasks` by status, by category and by whether they carry any date.
///
/// Every task lands in exactly one status bucket and exactly one category
/// bucket. The completion rate of an empty list is 0.
pub fn compute_metrics(tasks: &[TaskRecord]) -> WorkloadMetrics {
    let mut metrics = WorkloadMetrics {
        total: tasks.len(),
        ..Default::default()
    };

    for task in tasks {
        match task.status {
            TaskStatus::Completed => metrics.completed += 1,
            TaskStatus::Delayed => metrics.delayed += 1,
            TaskStatus::Pending => metrics.in_progress += 1,
        }

        if task.is_undated() {
            metrics.undated += 1;
        } else {
            metrics.dated += 1;
        }

        *metrics
            .category_breakdown
            .entry(task.category.clone())
            .or_default() += 1;
    }

    metrics.completion_rate = completion_rate(metrics.completed, metrics.total);
    metrics
}

/// The `limit` largest categories, by task count descending.
///
/// Categories with equal counts keep their name order.
pub fn top_categories(metrics: &WorkloadMetrics, limit: usize) -> Vec<(&str, usize)> {
    let mut categories: Vec<(&str, usize)> = metrics
        .category_breakdown
        .iter()
        .map(|(name, &count)| (name.as_str(), count))
        .collect();
    categories.sort_by(|a, b| b.1.cmp(&a.1));
    categories.truncate(limit);
    categories
}

fn completion_rate(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    round_half_up(completed as f64 / total as f64 * 100.0) as u32
}
