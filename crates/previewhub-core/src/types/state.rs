//! Lifecycle states for the per-resource load state machine.

use serde::{Deserialize, Serialize};

use crate::error::PreviewError;

/// Load progress phase for the current resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreviewPhase {
    /// No load attempted yet for the current session.
    Idle,
    /// A load is in flight.
    Loading,
    /// The load completed successfully.
    Loaded,
    /// The load failed.
    Error,
    /// No plugin could be resolved for the resource.
    Unsupported,
}

/// The lifecycle state plus optional diagnostics.
///
/// Mutated only by the lifecycle controller; everything else reads
/// snapshots through the execution context.
#[derive(Debug, Clone, Default)]
pub struct LifecycleState {
    /// The current phase.
    pub phase: PreviewPhase,
    /// The failure that moved the session into [`PreviewPhase::Error`].
    pub error: Option<PreviewError>,
    /// Human-readable diagnostic for error/unsupported phases.
    pub message: Option<String>,
}

impl Default for PreviewPhase {
    fn default() -> Self {
        Self::Idle
    }
}

impl LifecycleState {
    /// State for a fresh session.
    pub fn idle() -> Self {
        Self {
            phase: PreviewPhase::Idle,
            error: None,
            message: None,
        }
    }

    /// State for an in-flight load.
    pub fn loading() -> Self {
        Self {
            phase: PreviewPhase::Loading,
            error: None,
            message: None,
        }
    }

    /// State for a completed load.
    pub fn loaded() -> Self {
        Self {
            phase: PreviewPhase::Loaded,
            error: None,
            message: None,
        }
    }

    /// State for a failed load, carrying the original error and message.
    pub fn error(error: PreviewError) -> Self {
        let message = error.message.clone();
        Self {
            phase: PreviewPhase::Error,
            error: Some(error),
            message: Some(message),
        }
    }

    /// State for a resource no registered plugin can handle.
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self {
            phase: PreviewPhase::Unsupported,
            error: None,
            message: Some(message.into()),
        }
    }
}
