//! Compile-time solver knobs. Exposing these as request fields is a
//! non-goal (spec §6); callers who need different budgets fork the crate.

/// Wall-clock budget for the strict-mode CP-SAT solve.
pub const STRICT_TIME_BUDGET_SECS: f64 = 60.0;

/// Wall-clock budget for the reduced-model solve in hybrid mode.
pub const HYBRID_TIME_BUDGET_SECS: f64 = 5.0;

/// Parallel CP-SAT workers, both modes.
pub const NUM_SEARCH_WORKERS: i32 = 8;

/// Primary objective weight: one scheduled session outweighs any amount of
/// utilization or load-balance improvement for realistic horizons.
pub const BIG: i64 = 1000;

/// Secondary objective weight: slot utilization over faculty-load balance.
pub const MEDIUM: i64 = 10;

pub const DEFAULT_SLOTS_PER_DAY: i64 = 6;
pub const DEFAULT_MAX_CLASSES_PER_DAY: i64 = 4;
pub const DEFAULT_ROOM_TYPE: &str = "lecture";

pub fn default_days() -> Vec<String> {
    ["Mon", "Tue", "Wed", "Thu", "Fri"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
