use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the workload dashboard.
///
/// The parsing and aggregation pipeline itself never fails; these variants
/// cover the application edge (roster files, data directories, output).
#[derive(Error, Debug)]
pub enum WorkloadError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A roster file exists but is not a valid JSON roster.
    #[error("Invalid roster {path}: {source}")]
    RosterParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A derived value could not be serialised for output.
    #[error("Failed to serialise JSON: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// The directory holding the per-person files does not exist.
    #[error("Data path not found: {0}")]
    DataPathNotFound(PathBuf),

    /// A (year, month) pair that does not name a calendar month.
    #[error("Invalid month: {year}-{month}")]
    InvalidMonth { year: i32, month: u32 },

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the workload crates.
pub type Result<T> = std::result::Result<T, WorkloadError>;
