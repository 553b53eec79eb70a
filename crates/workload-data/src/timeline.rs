//! Date ranges and lane layout for the team timeline.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use workload_core::models::{PersonWorkload, TaskRecord};

/// Days of padding on each side of the timeline.
pub const TIMELINE_PADDING_DAYS: i64 = 5;
/// Length of the timeline when no task carries a date.
pub const EMPTY_TIMELINE_DAYS: i64 = 30;

/// Inclusive day range covered by the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Number of days in `start..=end`.
    pub total_days: i64,
}

impl TimelineRange {
    fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            total_days: (end - start).num_days() + 1,
        }
    }
}

/// The `(start, end)` a task spans when both fallback boundaries are known.
pub fn task_span(task: &TaskRecord) -> Option<(NaiveDate, NaiveDate)> {
    Some((task.span_start()?, task.span_end()?))
}

/// Range spanning every date of every task, padded on both sides.
///
/// Falls back to the [`EMPTY_TIMELINE_DAYS`] days starting at `today` when no
/// task has a date.
pub fn timeline_range(people: &[PersonWorkload], today: NaiveDate) -> TimelineRange {
    let mut dates = people
        .iter()
        .flat_map(|p| p.tasks.iter())
        .flat_map(TaskRecord::dates);

    let Some(first) = dates.next() else {
        return TimelineRange::new(today, today + Duration::days(EMPTY_TIMELINE_DAYS - 1));
    };
    let (min, max) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));

    TimelineRange::new(
        min - Duration::days(TIMELINE_PADDING_DAYS),
        max + Duration::days(TIMELINE_PADDING_DAYS),
    )
}

/// Stack spanned tasks into lanes so no two tasks in a lane overlap.
///
/// Tasks are placed first-fit in input order; tasks without a span are left
/// out. Overlap is inclusive: a task ending on the day another starts shares
/// no lane with it.
pub fn pack_lanes(tasks: &[TaskRecord]) -> Vec<Vec<&TaskRecord>> {
    first_fit(
        tasks
            .iter()
            .filter_map(|task| task_span(task).map(|(start, end)| (task, start, end))),
    )
}

/// First-fit placement of `(item, start, end)` spans into non-overlapping lanes.
pub(crate) fn first_fit<T>(
    spans: impl IntoIterator<Item = (T, NaiveDate, NaiveDate)>,
) -> Vec<Vec<T>> {
    let mut lanes: Vec<Vec<(T, NaiveDate, NaiveDate)>> = Vec::new();

    for (item, start, end) in spans {
        let free = lanes
            .iter_mut()
            .find(|lane| lane.iter().all(|&(_, s, e)| end < s || start > e));
        match free {
            Some(lane) => lane.push((item, start, end)),
            None => lanes.push(vec![(item, start, end)]),
        }
    }

    lanes
        .into_iter()
        .map(|lane| lane.into_iter().map(|(item, _, _)| item).collect())
        .collect()
}

/// Tasks with no date at all, in input order.
pub fn undated_tasks(tasks: &[TaskRecord]) -> Vec<&TaskRecord> {
    tasks.iter().filter(|t| t.is_undated()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use workload_core::models::TaskStatus;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, day).unwrap()
    }

    fn task(id: &str, start: Option<NaiveDate>, end: Option<NaiveDate>) -> TaskRecord {
        TaskRecord {
            id: id.to_string(),
            category: "Build".to_string(),
            item: id.to_string(),
            estimated_time: String::new(),
            actual_time: String::new(),
            est_start: start,
            est_end: end,
            actual_end: None,
            status: TaskStatus::Pending,
            original_row: BTreeMap::new(),
        }
    }

    fn ids(lane: &[&TaskRecord]) -> Vec<String> {
        lane.iter().map(|t| t.id.clone()).collect()
    }

    // ── task_span ────────────────────────────────────────────────────────────

    #[test]
    fn test_task_span() {
        assert_eq!(
            task_span(&task("a", Some(d(3, 1)), Some(d(3, 4)))),
            Some((d(3, 1), d(3, 4)))
        );
        assert_eq!(task_span(&task("b", Some(d(3, 1)), None)), None);

        let mut done = task("c", None, None);
        done.actual_end = Some(d(3, 9));
        assert_eq!(task_span(&done), Some((d(3, 9), d(3, 9))));
    }

    // ── timeline_range ───────────────────────────────────────────────────────

    #[test]
    fn test_range_pads_min_and_max() {
        let people = vec![
            PersonWorkload::new("A", vec![task("a", Some(d(3, 10)), Some(d(3, 12)))]),
            PersonWorkload::new("B", vec![task("b", Some(d(4, 2)), None)]),
        ];
        let range = timeline_range(&people, d(1, 1));
        assert_eq!(range.start, d(3, 5));
        assert_eq!(range.end, d(4, 7));
        assert_eq!(range.total_days, 34);
    }

    #[test]
    fn test_range_without_dates_starts_today() {
        let people = vec![PersonWorkload::new("A", vec![task("a", None, None)])];
        let today = d(6, 1);
        let range = timeline_range(&people, today);
        assert_eq!(range.start, today);
        assert_eq!(range.total_days, EMPTY_TIMELINE_DAYS);
        assert_eq!(range.end, d(6, 30));
    }

    // ── pack_lanes ───────────────────────────────────────────────────────────

    #[test]
    fn test_pack_lanes_first_fit() {
        let tasks = vec![
            task("a", Some(d(3, 1)), Some(d(3, 5))),
            task("b", Some(d(3, 3)), Some(d(3, 8))),
            task("c", Some(d(3, 6)), Some(d(3, 9))),
            task("d", Some(d(3, 5)), Some(d(3, 5))),
            task("undated", None, None),
        ];
        let lanes = pack_lanes(&tasks);

        assert_eq!(lanes.len(), 3);
        assert_eq!(ids(&lanes[0]), vec!["a", "c"]);
        assert_eq!(ids(&lanes[1]), vec!["b"]);
        // Touching "a" on 3/5 and overlapping "b" forces a third lane.
        assert_eq!(ids(&lanes[2]), vec!["d"]);
    }

    #[test]
    fn test_pack_lanes_empty() {
        assert!(pack_lanes(&[]).is_empty());
        assert!(pack_lanes(&[task("x", Some(d(3, 1)), None)]).is_empty());
    }

    // ── undated_tasks ────────────────────────────────────────────────────────

    #[test]
    fn test_undated_tasks() {
        let tasks = vec![
            task("a", None, None),
            task("b", Some(d(3, 1)), None),
            task("c", None, None),
        ];
        assert_eq!(ids(&undated_tasks(&tasks)), vec!["a", "c"]);
    }
}
