//! Shared types, policy constants and configuration for the workload
//! dashboard.
//!
//! Everything here is free of I/O except [`settings`], which owns the CLI
//! definition and the persisted last-used parameters.

pub mod dates;
pub mod error;
pub mod models;
pub mod policy;
pub mod settings;

pub use error::{Result, WorkloadError};
