use chrono::{Datelike, NaiveDate};
use clap::Parser;
use std::path::PathBuf;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Team workload overview from per-person task files
#[derive(Parser, Debug, Clone)]
#[command(
    name = "workload-dashboard",
    about = "Team workload overview from per-person task files",
    version
)]
pub struct Settings {
    /// Directory holding one task file per person (auto-discovered if omitted)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// JSON roster of people and their files (defaults to <data-dir>/roster.json)
    #[arg(long)]
    pub roster: Option<PathBuf>,

    /// View to print
    #[arg(
        long,
        default_value = "compare",
        value_parser = ["compare", "metrics", "heatmap", "calendar", "timeline", "undated"]
    )]
    pub view: String,

    /// Year of the heatmap and calendar month (defaults to the current year)
    #[arg(long)]
    pub year: Option<i32>,

    /// Heatmap and calendar month, 1-12 (defaults to the current month)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: Option<u32>,

    /// Only report these people (repeatable)
    #[arg(long = "person")]
    pub people: Vec<String>,

    /// Output format
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse the process arguments.
    pub fn load() -> Self {
        Self::load_from(std::env::args_os())
    }

    /// Parse `args` and resolve `--debug` into the log level.
    ///
    /// Nothing is remembered between runs: every value comes from `args` or
    /// its default.
    pub fn load_from<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let mut settings = Settings::parse_from(args);
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// The `(year, month)` shown by the heatmap and calendar, defaulting to `today`'s.
    pub fn heatmap_month(&self, today: NaiveDate) -> (i32, u32) {
        (
            self.year.unwrap_or_else(|| today.year()),
            self.month.unwrap_or_else(|| today.month()),
        )
    }

    /// `true` when `name` passes the `--person` filter.
    pub fn includes_person(&self, name: &str) -> bool {
        self.people.is_empty() || self.people.iter().any(|p| p.eq_ignore_ascii_case(name))
    }
}
