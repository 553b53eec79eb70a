//! Runtime layer for the workload dashboard.
//!
//! Resolves who is on the team and where their task files live, then loads
//! every file concurrently and hands the parsed workloads to the caller.

pub mod loader;
pub mod roster;

pub use workload_core as core;
pub use workload_data as data;
