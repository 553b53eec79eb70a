//! Cross-person workload comparison.

use workload_core::models::{ComparisonEntry, Imbalance, PersonWorkload};
use workload_core::policy::{classify_deviation, round_half_up};

use crate::metrics::compute_metrics;

/// Compare each person's task total against the team mean.
///
/// Returns one entry per person, in input order. The deviation is
/// `(total - mean) / mean * 100`; the imbalance band is chosen from the
/// unrounded value. When the mean is zero every person is balanced with a
/// deviation of 0. An empty team yields an empty result.
pub fn compare_workloads(people: &[PersonWorkload]) -> Vec<ComparisonEntry> {
    if people.is_empty() {
        return Vec::new();
    }

    let metrics: Vec<_> = people.iter().map(|p| compute_metrics(&p.tasks)).collect();
    let avg_total =
        metrics.iter().map(|m| m.total as f64).sum::<f64>() / metrics.len() as f64;

    people
        .iter()
        .zip(metrics)
        .map(|(person, metrics)| {
            let (imbalance, deviation_percent) = if avg_total == 0.0 {
                (Imbalance::Balanced, 0)
            } else {
                let deviation = (metrics.total as f64 - avg_total) / avg_total * 100.0;
                (classify_deviation(deviation), round_half_up(deviation))
            };
            ComparisonEntry {
                name: person.name.clone(),
                metrics,
                imbalance,
                deviation_percent,
            }
        })
        .collect()
}

/// Arithmetic mean of the task totals in `entries`, or 0 for none.
pub fn average_total(entries: &[ComparisonEntry]) -> f64 {
    if entries.is_empty() {
        return 0.0;
    }
    entries.iter().map(|e| e.metrics.total as f64).sum::<f64>() / entries.len() as f64
}
