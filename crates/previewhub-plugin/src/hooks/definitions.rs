//! Hook point definitions and the payload passed to handlers.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use previewhub_core::{LoadProgress, PreviewError};

/// Enumeration of all hook points in the preview lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookPoint {
    // ── Mount ──
    /// Fired when the preview surface mounts.
    OnMount,
    /// Fired when the preview surface unmounts.
    OnUnmount,

    // ── Load ──
    /// Fired before a load begins. A veto aborts the load.
    BeforeLoad,
    /// Fired when the session enters `loading`.
    OnLoadStart,
    /// Fired with progress updates while loading.
    OnLoadProgress,
    /// Fired when the session enters `loaded`.
    OnLoadSuccess,
    /// Fired when the session enters `error`. A veto suppresses the
    /// host's default error presentation.
    OnLoadError,

    // ── Data ──
    /// First-responder data rewrite; the first non-pass result is the
    /// transformed value.
    TransformData,

    // ── Interaction ──
    /// Forwarded when the user requests a download.
    OnDownload,
    /// Forwarded when the user zooms; payload carries `scale`.
    OnZoom,
    /// Forwarded when the user rotates; payload carries `angle`.
    OnRotate,
    /// Forwarded when fullscreen toggles; payload carries `fullscreen`.
    OnFullscreen,
}

impl HookPoint {
    /// Returns the string name of this hook point.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OnMount => "on_mount",
            Self::OnUnmount => "on_unmount",
            Self::BeforeLoad => "before_load",
            Self::OnLoadStart => "on_load_start",
            Self::OnLoadProgress => "on_load_progress",
            Self::OnLoadSuccess => "on_load_success",
            Self::OnLoadError => "on_load_error",
            Self::TransformData => "transform_data",
            Self::OnDownload => "on_download",
            Self::OnZoom => "on_zoom",
            Self::OnRotate => "on_rotate",
            Self::OnFullscreen => "on_fullscreen",
        }
    }
}

impl std::fmt::Display for HookPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payload passed to hook handlers — a flexible key-value map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookPayload {
    /// The hook point being fired.
    pub hook: HookPoint,
    /// Arbitrary data keyed by string.
    pub data: HashMap<String, serde_json::Value>,
    /// Timestamp of the dispatch.
    pub timestamp: DateTime<Utc>,
}

impl HookPayload {
    /// Creates a new hook payload.
    pub fn new(hook: HookPoint) -> Self {
        Self {
            hook,
            data: HashMap::new(),
            timestamp: Utc::now(),
        }
    }

    /// Inserts a typed data value.
    pub fn with_data(mut self, key: &str, value: serde_json::Value) -> Self {
        self.data.insert(key.to_string(), value);
        self
    }

    /// Inserts a string value.
    pub fn with_string(self, key: &str, value: &str) -> Self {
        self.with_data(key, serde_json::json!(value))
    }

    /// Inserts an integer value.
    pub fn with_int(self, key: &str, value: i64) -> Self {
        self.with_data(key, serde_json::json!(value))
    }

    /// Inserts a float value.
    pub fn with_f64(self, key: &str, value: f64) -> Self {
        self.with_data(key, serde_json::json!(value))
    }

    /// Inserts a boolean value.
    pub fn with_bool(self, key: &str, value: bool) -> Self {
        self.with_data(key, serde_json::json!(value))
    }

    /// Inserts an error under the `"error"` key as `{kind, message}`.
    pub fn with_error(self, error: &PreviewError) -> Self {
        self.with_data(
            "error",
            serde_json::json!({
                "kind": error.kind.to_string(),
                "message": error.message,
            }),
        )
    }

    /// Inserts a progress record under the `"progress"` key.
    pub fn with_progress(self, progress: &LoadProgress) -> Self {
        let value = serde_json::to_value(progress).unwrap_or(serde_json::Value::Null);
        self.with_data("progress", value)
    }

    /// Gets a data value by key.
    pub fn get_data(&self, key: &str) -> Option<&serde_json::Value> {
        self.data.get(key)
    }

    /// Gets a string data value.
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(|v| v.as_str())
    }

    /// Gets an i64 data value.
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.data.get(key).and_then(|v| v.as_i64())
    }

    /// Gets an f64 data value.
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.data.get(key).and_then(|v| v.as_f64())
    }

    /// Gets a bool data value.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.data.get(key).and_then(|v| v.as_bool())
    }
}

/// Action returned by a hook handler telling the pipeline what to do next.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum HookAction {
    /// No opinion; the pipeline continues to the next plugin.
    Pass,
    /// Stop the pipeline. For gating hooks this aborts the guarded
    /// operation; for `OnLoadError` it suppresses default error handling.
    Veto,
    /// Answer with a value; the pipeline stops and returns it.
    Respond(serde_json::Value),
}
