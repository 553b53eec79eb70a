//! Fixed bucketing policies shared by every view.
//!
//! Heatmap intensity bands and imbalance deviation bands are deliberately not
//! configurable; they live here as named constants so each band edge can be
//! tested on its own.

use crate::models::Imbalance;

// ── Heatmap intensity ─────────────────────────────────────────────────────────

/// Highest task count still rendered at intensity 1.
pub const INTENSITY_LIGHT_MAX: usize = 2;
/// Highest task count still rendered at intensity 2.
pub const INTENSITY_MODERATE_MAX: usize = 5;
/// Highest task count still rendered at intensity 3. Anything above is 4.
pub const INTENSITY_HEAVY_MAX: usize = 8;
/// The top intensity level (overloaded day).
pub const MAX_INTENSITY: u8 = 4;

/// Map a day's active task count onto the `0..=4` intensity scale.
pub fn intensity_level(task_count: usize) -> u8 {
    match task_count {
        0 => 0,
        n if n <= INTENSITY_LIGHT_MAX => 1,
        n if n <= INTENSITY_MODERATE_MAX => 2,
        n if n <= INTENSITY_HEAVY_MAX => 3,
        _ => MAX_INTENSITY,
    }
}

// ── Imbalance bands ───────────────────────────────────────────────────────────

/// Deviation (percent above the team mean) beyond which a person is overloaded.
pub const OVERLOADED_DEVIATION: f64 = 50.0;
/// Deviation beyond which a person carries a high load.
pub const HIGH_DEVIATION: f64 = 20.0;
/// Deviation below which a person is underutilized.
pub const UNDERUTILIZED_DEVIATION: f64 = -30.0;

/// Classify an unrounded deviation percentage.
///
/// Bands are checked in descending severity; the first match wins.
pub fn classify_deviation(deviation: f64) -> Imbalance {
    if deviation > OVERLOADED_DEVIATION {
        Imbalance::Overloaded
    } else if deviation > HIGH_DEVIATION {
        Imbalance::High
    } else if deviation < UNDERUTILIZED_DEVIATION {
        Imbalance::Underutilized
    } else {
        Imbalance::Balanced
    }
}

// ── Rounding ──────────────────────────────────────────────────────────────────

/// Round to the nearest integer with halves going towards positive infinity
/// (`-2.5` → `-2`, `2.5` → `3`).
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
