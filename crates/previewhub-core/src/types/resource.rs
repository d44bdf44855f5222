//! Resource descriptors — what the host asks the core to preview.

use serde::{Deserialize, Serialize};

/// Immutable description of the thing to preview.
///
/// Created by the host when the user selects a file and never mutated;
/// replacing the resource creates a new descriptor and restarts the
/// lifecycle. The `locator` is opaque to the core and is only ever passed
/// through to renderer plugins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDescriptor {
    /// Display name of the resource.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// MIME type; may be empty when unknown.
    pub mime_type: String,
    /// File extension, normalized to a lower-cased, dot-prefixed form.
    pub extension: String,
    /// Opaque locator (URL, path, handle) used only by renderers.
    pub locator: String,
}

impl ResourceDescriptor {
    /// Create a descriptor, normalizing the extension.
    pub fn new(
        name: impl Into<String>,
        size: u64,
        mime_type: impl Into<String>,
        extension: &str,
        locator: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            size,
            mime_type: mime_type.into(),
            extension: normalize_extension(extension),
            locator: locator.into(),
        }
    }
}

/// Lower-cases the extension and inserts the leading dot when missing.
fn normalize_extension(extension: &str) -> String {
    let trimmed = extension.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let lowered = trimmed.to_ascii_lowercase();
    if lowered.starts_with('.') {
        lowered
    } else {
        format!(".{lowered}")
    }
}
