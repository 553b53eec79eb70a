//! Plain-text and JSON reports over the computed workload data.

use std::fmt::Write as _;

use chrono::NaiveDate;
use serde::Serialize;
use workload_core::models::{
    ComparisonEntry, HeatmapDay, PersonWorkload, TaskRecord, WorkloadMetrics,
};
use workload_core::policy::round_half_up;
use workload_core::{Result, WorkloadError};
use workload_data::calendar::{month_calendar, CalendarWeek};
use workload_data::comparison::{average_total, compare_workloads};
use workload_data::heatmap::month_heatmap;
use workload_data::metrics::{compute_metrics, top_categories};
use workload_data::timeline::{
    pack_lanes, task_span, timeline_range, undated_tasks, TimelineRange,
};

/// Name of the synthetic heatmap row covering every selected person.
pub const TEAM_ROW: &str = "Team";

/// Categories listed per person in the metrics view.
const TOP_CATEGORY_LIMIT: usize = 5;

/// How a report is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("json") {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Per-run inputs that are not part of the team data.
#[derive(Debug, Clone, Copy)]
pub struct ReportContext {
    pub year: i32,
    pub month: u32,
    pub today: NaiveDate,
}

/// Render `view` for `selected`.
///
/// `team` is the full roster and only matters to the comparison view, whose
/// deviations are measured against the whole team.
pub fn render(
    view: &str,
    format: OutputFormat,
    team: &[PersonWorkload],
    selected: &[PersonWorkload],
    ctx: &ReportContext,
) -> Result<String> {
    match view {
        "compare" => {
            let mut entries = compare_workloads(team);
            let avg = average_total(&entries);
            entries.retain(|e| selected.iter().any(|p| p.name == e.name));
            emit(format, &entries, || compare_text(&entries, avg))
        }
        "metrics" => {
            let rows: Vec<NamedMetrics> = selected
                .iter()
                .map(|p| NamedMetrics {
                    name: &p.name,
                    metrics: compute_metrics(&p.tasks),
                })
                .collect();
            emit(format, &rows, || metrics_text(&rows))
        }
        "heatmap" => {
            let rows = heatmap_rows(selected, ctx.year, ctx.month)?;
            emit(format, &rows, || heatmap_text(&rows, ctx.year, ctx.month))
        }
        "calendar" => {
            let weeks = month_calendar(selected, ctx.year, ctx.month)?;
            emit(format, &weeks, || calendar_text(&weeks, ctx.year, ctx.month))
        }
        "timeline" => {
            let report = timeline_report(selected, ctx.today);
            emit(format, &report, || timeline_text(&report))
        }
        "undated" => {
            let rows: Vec<PersonTasks> = selected
                .iter()
                .map(|p| PersonTasks {
                    name: &p.name,
                    tasks: undated_tasks(&p.tasks),
                })
                .collect();
            emit(format, &rows, || undated_text(&rows))
        }
        other => Err(WorkloadError::Config(format!("unknown view: {other}"))),
    }
}

fn emit<T: Serialize + ?Sized>(
    format: OutputFormat,
    value: &T,
    text: impl FnOnce() -> String,
) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Text => Ok(text()),
    }
}

// ── Serialisable report shapes ────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct NamedMetrics<'a> {
    name: &'a str,
    #[serde(flatten)]
    metrics: WorkloadMetrics,
}

#[derive(Debug, Serialize)]
struct HeatmapRow {
    name: String,
    days: Vec<HeatmapDay>,
}

#[derive(Debug, Serialize)]
struct PersonTasks<'a> {
    name: &'a str,
    tasks: Vec<&'a TaskRecord>,
}

#[derive(Debug, Serialize)]
struct PersonLanes<'a> {
    name: &'a str,
    lanes: Vec<Vec<&'a TaskRecord>>,
}

#[derive(Debug, Serialize)]
struct TimelineReport<'a> {
    range: TimelineRange,
    people: Vec<PersonLanes<'a>>,
}

fn heatmap_rows(selected: &[PersonWorkload], year: i32, month: u32) -> Result<Vec<HeatmapRow>> {
    let mut rows = selected
        .iter()
        .map(|p| {
            Ok(HeatmapRow {
                name: p.name.clone(),
                days: month_heatmap(&p.tasks, year, month)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let all_tasks: Vec<TaskRecord> = selected.iter().flat_map(|p| p.tasks.clone()).collect();
    rows.push(HeatmapRow {
        name: TEAM_ROW.to_string(),
        days: month_heatmap(&all_tasks, year, month)?,
    });
    Ok(rows)
}

fn timeline_report(selected: &[PersonWorkload], today: NaiveDate) -> TimelineReport<'_> {
    TimelineReport {
        range: timeline_range(selected, today),
        people: selected
            .iter()
            .map(|p| PersonLanes {
                name: &p.name,
                lanes: pack_lanes(&p.tasks),
            })
            .collect(),
    }
}

// ── Text rendering ────────────────────────────────────────────────────────────

fn name_width<'a>(names: impl Iterator<Item = &'a str>) -> usize {
    names.map(|n| n.chars().count()).max().unwrap_or(0).max(4)
}

fn compare_text(entries: &[ComparisonEntry], avg_total: f64) -> String {
    let width = name_width(entries.iter().map(|e| e.name.as_str()));
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<width$}  {:>5}  {:>4}  {:>7}  {:>4}  {:>7}  {:>5}  {:>9}  {}",
        "Name", "Total", "Done", "Delayed", "Open", "Undated", "Rate", "Deviation", "Balance"
    );
    for e in entries {
        let m = &e.metrics;
        let _ = writeln!(
            out,
            "{:<width$}  {:>5}  {:>4}  {:>7}  {:>4}  {:>7}  {:>4}%  {:>+8}%  {}",
            e.name,
            m.total,
            m.completed,
            m.delayed,
            m.in_progress,
            m.undated,
            m.completion_rate,
            e.deviation_percent,
            e.imbalance
        );
    }
    let _ = write!(out, "Team average: {:.1} tasks", avg_total);
    out
}

fn metrics_text(rows: &[NamedMetrics<'_>]) -> String {
    let mut out = String::new();
    for (i, row) in rows.iter().enumerate() {
        let m = &row.metrics;
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "{}", row.name);
        let _ = writeln!(
            out,
            "  total {}  completed {}  in progress {}  delayed {}  undated {}  completion {}%",
            m.total, m.completed, m.in_progress, m.delayed, m.undated, m.completion_rate
        );
        for (category, count) in top_categories(m, TOP_CATEGORY_LIMIT) {
            let share = round_half_up(count as f64 / m.total as f64 * 100.0);
            let _ = writeln!(out, "  {category}: {count} ({share}%)");
        }
    }
    out.trim_end().to_string()
}

fn intensity_glyph(intensity: u8) -> char {
    match intensity {
        0 => '.',
        n => char::from_digit(u32::from(n), 10).unwrap_or('#'),
    }
}

fn heatmap_text(rows: &[HeatmapRow], year: i32, month: u32) -> String {
    let width = name_width(rows.iter().map(|r| r.name.as_str()));
    let mut out = String::new();
    let _ = writeln!(out, "{year}-{month:02}  (. idle, 1-4 load)");

    let day_count = rows.first().map(|r| r.days.len()).unwrap_or(0);
    let ruler: String = (1..=day_count)
        .map(|d| char::from_digit((d % 10) as u32, 10).unwrap_or(' '))
        .collect();
    let _ = writeln!(out, "{:<width$}  {}", "", ruler);

    for row in rows {
        let cells: String = row.days.iter().map(|d| intensity_glyph(d.intensity)).collect();
        let peak = row.days.iter().map(|d| d.task_count).max().unwrap_or(0);
        let _ = writeln!(out, "{:<width$}  {}  peak {}", row.name, cells, peak);
    }
    out.trim_end().to_string()
}

fn calendar_text(weeks: &[CalendarWeek<'_>], year: i32, month: u32) -> String {
    let width = name_width(
        weeks
            .iter()
            .flat_map(|w| w.lanes.iter().flatten())
            .map(|bar| bar.person),
    );
    let mut out = String::new();
    let _ = writeln!(out, "{year}-{month:02}  (weeks run Sun..Sat)");
    for week in weeks {
        let _ = writeln!(out, "{}..{}", week.start.format("%m-%d"), week.end.format("%m-%d"));
        if week.lanes.is_empty() {
            let _ = writeln!(out, "  (no tasks)");
        }
        for (i, lane) in week.lanes.iter().enumerate() {
            for bar in lane {
                let strip: String = (0..7)
                    .map(|col| {
                        if (bar.first_column..=bar.last_column).contains(&col) {
                            '#'
                        } else {
                            '.'
                        }
                    })
                    .collect();
                let _ = writeln!(
                    out,
                    "  lane {}  {}  {:<width$}  {} / {} ({})",
                    i + 1,
                    strip,
                    bar.person,
                    bar.task.category,
                    bar.task.item,
                    bar.task.status
                );
            }
        }
    }
    out.trim_end().to_string()
}

fn describe_task(task: &TaskRecord) -> String {
    match task_span(task) {
        Some((start, end)) if start == end => format!(
            "{}  {} / {} ({})",
            start.format("%m-%d"),
            task.category,
            task.item,
            task.status
        ),
        Some((start, end)) => format!(
            "{}..{}  {} / {} ({})",
            start.format("%m-%d"),
            end.format("%m-%d"),
            task.category,
            task.item,
            task.status
        ),
        None => format!("{} / {} ({})", task.category, task.item, task.status),
    }
}

fn timeline_text(report: &TimelineReport<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Timeline {} .. {} ({} days)",
        report.range.start, report.range.end, report.range.total_days
    );
    for person in &report.people {
        let _ = writeln!(out, "{}", person.name);
        if person.lanes.is_empty() {
            let _ = writeln!(out, "  (no scheduled tasks)");
        }
        for (i, lane) in person.lanes.iter().enumerate() {
            for task in lane {
                let _ = writeln!(out, "  lane {}  {}", i + 1, describe_task(task));
            }
        }
    }
    out.trim_end().to_string()
}

fn undated_text(rows: &[PersonTasks<'_>]) -> String {
    let mut out = String::new();
    for row in rows {
        let _ = writeln!(out, "{} ({} undated)", row.name, row.tasks.len());
        for task in &row.tasks {
            let _ = writeln!(out, "  {}", describe_task(task));
        }
    }
    out.trim_end().to_string()
}
