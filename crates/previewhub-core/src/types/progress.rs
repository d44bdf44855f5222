//! Load progress reporting.

use serde::{Deserialize, Serialize};

/// Progress of an in-flight load, forwarded to plugins through the
/// `on_load_progress` hook.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadProgress {
    /// Bytes loaded so far.
    pub loaded: u64,
    /// Total bytes, 0 when unknown.
    pub total: u64,
    /// Completion percentage in the range 0.0–100.0.
    pub percent: f64,
    /// Whether the total is unknown and `percent` is meaningless.
    pub indeterminate: bool,
}

impl LoadProgress {
    /// Progress with a known total.
    pub fn new(loaded: u64, total: u64) -> Self {
        let percent = if total == 0 {
            0.0
        } else {
            (loaded as f64 / total as f64) * 100.0
        };
        Self {
            loaded,
            total,
            percent,
            indeterminate: false,
        }
    }

    /// Progress with an unknown total.
    pub fn indeterminate(loaded: u64) -> Self {
        Self {
            loaded,
            total: 0,
            percent: 0.0,
            indeterminate: true,
        }
    }
}
