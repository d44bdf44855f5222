//! Resolver — selects the single plugin that owns a resource.
//!
//! Eligibility comes from a plugin's `can_handle` override when present,
//! otherwise from its declared MIME patterns and extension suffixes.
//! Among eligible plugins the highest priority wins; ties go to the
//! earliest-registered plugin, which keeps resolution deterministic and
//! stable under reordering of unrelated plugins.

use std::sync::Arc;

use tracing::debug;

use previewhub_core::ResourceDescriptor;

use crate::plugin::{PluginInfo, PreviewPlugin};
use crate::registry::PluginRegistry;

/// Selects one active plugin per resource by capability and priority.
#[derive(Debug, Clone)]
pub struct Resolver {
    /// Registry providing candidates in registration order.
    registry: Arc<PluginRegistry>,
}

impl Resolver {
    /// Creates a resolver over a registry.
    pub fn new(registry: Arc<PluginRegistry>) -> Self {
        Self { registry }
    }

    /// Resolves the best-matching plugin for a resource, or `None` when no
    /// registered plugin is eligible.
    pub async fn resolve(&self, resource: &ResourceDescriptor) -> Option<Arc<dyn PreviewPlugin>> {
        let mut best: Option<(Arc<dyn PreviewPlugin>, i64)> = None;

        for plugin in self.registry.all().await {
            let info = plugin.info();

            let eligible = match plugin.can_handle(resource).await {
                Some(verdict) => verdict,
                None => default_support(&info, resource),
            };
            if !eligible {
                continue;
            }

            let priority = plugin.priority(resource);
            debug!(plugin = %info.name, priority, "Plugin eligible for resource");

            // Strictly-greater replacement keeps the earliest-registered
            // plugin on priority ties.
            let better = best
                .as_ref()
                .is_none_or(|(_, current)| priority > *current);
            if better {
                best = Some((plugin, priority));
            }
        }

        match &best {
            Some((plugin, priority)) => {
                debug!(plugin = %plugin.info().name, priority, "Resolved plugin");
            }
            None => {
                debug!(mime = %resource.mime_type, extension = %resource.extension, "No eligible plugin");
            }
        }

        best.map(|(plugin, _)| plugin)
    }
}

/// Default capability check against declared types and extensions.
pub fn default_support(info: &PluginInfo, resource: &ResourceDescriptor) -> bool {
    if info
        .supported_types
        .iter()
        .any(|pattern| mime_matches(&resource.mime_type, pattern))
    {
        return true;
    }

    let extension = resource.extension.to_ascii_lowercase();
    info.supported_extensions
        .iter()
        .any(|suffix| extension.ends_with(&suffix.to_ascii_lowercase()))
}

/// MIME pattern matching with wildcard support.
///
/// `*/*` matches everything; `type/*` matches any MIME type whose segment
/// before `/` equals `type`; anything else requires exact equality.
pub fn mime_matches(mime: &str, pattern: &str) -> bool {
    if pattern == "*/*" {
        return true;
    }
    if let Some(prefix) = pattern.strip_suffix("/*") {
        return mime.split('/').next() == Some(prefix);
    }
    mime == pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png() -> ResourceDescriptor {
        ResourceDescriptor::new("cat.png", 1024, "image/png", ".png", "mem://cat.png")
    }

    #[test]
    fn test_exact_mime_match() {
        assert!(mime_matches("image/png", "image/png"));
        assert!(!mime_matches("image/png", "image/jpeg"));
    }

    #[test]
    fn test_prefix_wildcard() {
        assert!(mime_matches("image/png", "image/*"));
        assert!(mime_matches("image/svg+xml", "image/*"));
        assert!(!mime_matches("application/pdf", "image/*"));
        // The prefix is a whole segment, not a raw string prefix.
        assert!(!mime_matches("imagesque/x", "image/*"));
    }

    #[test]
    fn test_universal_wildcard() {
        assert!(mime_matches("application/x-unknown", "*/*"));
        assert!(mime_matches("", "*/*"));
    }

    #[test]
    fn test_default_support_by_type() {
        let mut info = PluginInfo::new("image");
        info.supported_types = vec!["image/*".to_string()];
        assert!(default_support(&info, &png()));
    }

    #[test]
    fn test_default_support_by_extension_suffix() {
        let mut info = PluginInfo::new("image");
        info.supported_extensions = vec![".PNG".to_string()];
        assert!(default_support(&info, &png()));
    }

    #[test]
    fn test_no_declared_capability_is_ineligible() {
        let info = PluginInfo::new("empty");
        assert!(!default_support(&info, &png()));
    }
}
