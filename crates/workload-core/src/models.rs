use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Header label of the category column.
pub const HEADER_CATEGORY: &str = "類別";
/// Header label of the item (task title) column.
pub const HEADER_ITEM: &str = "項目";
/// Header label of the estimated-effort column.
pub const HEADER_ESTIMATED_TIME: &str = "預估時間";
/// Header label of the actual-effort column.
pub const HEADER_ACTUAL_TIME: &str = "實際時間";
/// Header label of the planned start date column.
pub const HEADER_EST_START: &str = "預計開始";
/// Header label of the planned end date column.
pub const HEADER_EST_END: &str = "預計完成";
/// Header label of the actual end date column.
pub const HEADER_ACTUAL_END: &str = "實際完成";

/// Derived progress state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// An actual end date is recorded.
    Completed,
    /// Not completed and the planned end lies in the past.
    Delayed,
    /// Anything else.
    Pending,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Completed => "completed",
            TaskStatus::Delayed => "delayed",
            TaskStatus::Pending => "pending",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of work read from a person's task file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// `category-item-row`, unique within one person's list.
    pub id: String,
    pub category: String,
    pub item: String,
    /// Free-text effort label, passed through untouched.
    pub estimated_time: String,
    /// Free-text effort label, passed through untouched.
    pub actual_time: String,
    pub est_start: Option<NaiveDate>,
    pub est_end: Option<NaiveDate>,
    pub actual_end: Option<NaiveDate>,
    pub status: TaskStatus,
    /// Header → cell mapping of the source row.
    #[serde(default)]
    pub original_row: BTreeMap<String, String>,
}

impl TaskRecord {
    /// First day the task occupies: planned start, else actual end.
    pub fn span_start(&self) -> Option<NaiveDate> {
        self.est_start.or(self.actual_end)
    }

    /// Last day the task occupies: planned end, else actual end.
    pub fn span_end(&self) -> Option<NaiveDate> {
        self.est_end.or(self.actual_end)
    }

    /// `true` when none of the three dates is present.
    pub fn is_undated(&self) -> bool {
        self.est_start.is_none() && self.est_end.is_none() && self.actual_end.is_none()
    }

    /// Every date present on the record.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        [self.est_start, self.est_end, self.actual_end]
            .into_iter()
            .flatten()
    }
}

/// All tasks belonging to one tracked team member.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonWorkload {
    pub name: String,
    #[serde(default)]
    pub tasks: Vec<TaskRecord>,
}

impl PersonWorkload {
    pub fn new(name: impl Into<String>, tasks: Vec<TaskRecord>) -> Self {
        Self {
            name: name.into(),
            tasks,
        }
    }

    /// A person whose source could not be loaded.
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }
}

/// Aggregate counts for one person's task list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadMetrics {
    pub total: usize,
    pub completed: usize,
    pub delayed: usize,
    /// Tasks that are neither completed nor delayed.
    pub in_progress: usize,
    /// Tasks with no date at all.
    pub undated: usize,
    /// Tasks with at least one date.
    pub dated: usize,
    /// Rounded percentage of completed tasks; 0 for an empty list.
    pub completion_rate: u32,
    pub category_breakdown: BTreeMap<String, usize>,
}

/// One calendar day of a month heatmap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapDay {
    pub date: NaiveDate,
    pub task_count: usize,
    /// Tasks active on `date`, in input order.
    pub tasks: Vec<TaskRecord>,
    /// Bucketed load, `0..=4`.
    pub intensity: u8,
}

/// Workload balance of one person relative to the team average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Imbalance {
    Overloaded,
    High,
    Balanced,
    Underutilized,
}

impl Imbalance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Imbalance::Overloaded => "overloaded",
            Imbalance::High => "high",
            Imbalance::Balanced => "balanced",
            Imbalance::Underutilized => "underutilized",
        }
    }
}

impl fmt::Display for Imbalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-person metrics extended with the team comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonEntry {
    pub name: String,
    #[serde(flatten)]
    pub metrics: WorkloadMetrics,
    pub imbalance: Imbalance,
    /// Signed, rounded deviation of `metrics.total` from the team mean.
    pub deviation_percent: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2024, m, d)
    }

    fn record(
        est_start: Option<NaiveDate>,
        est_end: Option<NaiveDate>,
        actual_end: Option<NaiveDate>,
    ) -> TaskRecord {
        TaskRecord {
            id: "Ops-Deploy-1".to_string(),
            category: "Ops".to_string(),
            item: "Deploy".to_string(),
            estimated_time: "1d".to_string(),
            actual_time: String::new(),
            est_start,
            est_end,
            actual_end,
            status: TaskStatus::Pending,
            original_row: BTreeMap::new(),
        }
    }

    #[test]
    fn test_span_falls_back_to_actual_end() {
        let task = record(None, date(3, 5), date(3, 4));
        assert_eq!(task.span_start(), date(3, 4));
        assert_eq!(task.span_end(), date(3, 5));

        let task = record(date(3, 1), None, date(3, 4));
        assert_eq!(task.span_start(), date(3, 1));
        assert_eq!(task.span_end(), date(3, 4));
    }

    #[test]
    fn test_undated_and_dates() {
        let task = record(None, None, None);
        assert!(task.is_undated());
        assert_eq!(task.dates().count(), 0);

        let task = record(date(3, 1), None, date(3, 4));
        assert!(!task.is_undated());
        assert_eq!(
            task.dates().collect::<Vec<_>>(),
            vec![date(3, 1).unwrap(), date(3, 4).unwrap()]
        );
    }

    #[test]
    fn test_status_serialises_lowercase() {
        let json = serde_json::to_string(&TaskStatus::Delayed).unwrap();
        assert_eq!(json, "\"delayed\"");
        assert_eq!(TaskStatus::Completed.to_string(), "completed");
    }

    #[test]
    fn test_comparison_entry_flattens_metrics() {
        let entry = ComparisonEntry {
            name: "Jeff".to_string(),
            metrics: WorkloadMetrics {
                total: 3,
                ..Default::default()
            },
            imbalance: Imbalance::Underutilized,
            deviation_percent: -40,
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["name"], "Jeff");
        assert_eq!(value["total"], 3);
        assert_eq!(value["imbalance"], "underutilized");
        assert_eq!(value["deviation_percent"], -40);
    }
}
