//! Parsing and aggregation pipeline for the workload dashboard.
//!
//! Turns the raw text of a person's task file into [`TaskRecord`]s and derives
//! per-person metrics, month heatmaps, team comparisons, timeline layouts and
//! month calendars from them. Every function here is pure apart from
//! [`parser::parse`], which reads the local clock to classify overdue tasks.
//!
//! [`TaskRecord`]: workload_core::models::TaskRecord

pub mod calendar;
pub mod comparison;
pub mod heatmap;
pub mod metrics;
pub mod parser;
pub mod timeline;

pub use workload_core as core;
