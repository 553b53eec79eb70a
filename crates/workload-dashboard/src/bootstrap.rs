use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Directory name searched for task files.
pub const DATA_DIR_NAME: &str = "action-data";

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Initialise the global `tracing` subscriber.
///
/// `log_level` is one of the CLI level names and is mapped to a
/// [`tracing_subscriber::EnvFilter`] directive, falling back to `"info"`.
/// Output goes to stderr so reports on stdout stay machine-readable.
pub fn setup_logging(log_level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(filter_directive(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()?;

    Ok(())
}

fn filter_directive(log_level: &str) -> String {
    let upper = log_level.to_uppercase();
    match upper.as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" => "warn".to_string(),
        // tracing has no level above error.
        "ERROR" | "CRITICAL" => "error".to_string(),
        _ => log_level.to_lowercase(),
    }
}

// ── Data-dir discovery ─────────────────────────────────────────────────────────

/// Locate the task-file directory when `--data-dir` is not given.
///
/// Checks, in order:
/// 1. `./action-data/`
/// 2. `~/.workload-dashboard/action-data/`
pub fn discover_data_dir() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok();
    let home = dirs::home_dir();
    first_existing(&data_dir_candidates(cwd.as_deref(), home.as_deref()))
}

fn data_dir_candidates(cwd: Option<&Path>, home: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(cwd) = cwd {
        candidates.push(cwd.join(DATA_DIR_NAME));
    }
    if let Some(home) = home {
        candidates.push(home.join(".workload-dashboard").join(DATA_DIR_NAME));
    }
    candidates
}

fn first_existing(candidates: &[PathBuf]) -> Option<PathBuf> {
    candidates.iter().find(|p| p.is_dir()).cloned()
}
