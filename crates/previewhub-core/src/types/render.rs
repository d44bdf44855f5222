//! Opaque render fragments produced by plugin render hooks.

use serde::{Deserialize, Serialize};

/// A UI fragment produced by a plugin render producer.
///
/// The core never interprets `body`; it is an implementation-defined
/// handle (a DOM description, a widget id, a draw list) that the host's
/// rendering adapter knows how to display. `plugin` records provenance so
/// composed overlay stacks stay attributable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFragment {
    /// Name of the plugin that produced the fragment.
    pub plugin: String,
    /// Opaque fragment body.
    pub body: serde_json::Value,
}

impl RenderFragment {
    /// Create a fragment.
    pub fn new(plugin: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            plugin: plugin.into(),
            body,
        }
    }
}
