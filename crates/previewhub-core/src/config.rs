//! Preview host configuration schema.
//!
//! The core performs no file I/O of its own; this schema exists so that a
//! host application can embed preview settings in its own configuration
//! files and hand the deserialized struct to the manager.

use serde::{Deserialize, Serialize};

/// Preview host configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// Whether opening a resource immediately drives the idle→loading
    /// transition, or leaves the session idle for an explicit `load` call.
    #[serde(default = "default_true")]
    pub auto_load: bool,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self { auto_load: true }
    }
}

fn default_true() -> bool {
    true
}
