//! Plugin registry — stores active plugin instances in registration order.
//!
//! Registration order is load-bearing: it is the resolver's tie-break and
//! the pipeline's iteration order, so entries live in a `Vec` rather than
//! a map. Re-registering a name replaces the instance in place, keeping
//! its original position.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::plugin::PreviewPlugin;

#[derive(Debug)]
struct RegistryEntry {
    /// Unique plugin name, cached from `info()` at registration.
    name: String,
    /// The plugin instance.
    plugin: Arc<dyn PreviewPlugin>,
}

/// Registry of all active plugins.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    /// Entries in registration order.
    entries: RwLock<Vec<RegistryEntry>>,
}

impl PluginRegistry {
    /// Creates a new empty plugin registry.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Registers a plugin, replacing any prior entry with the same name.
    ///
    /// The plugin's `init` runs fire-and-forget: registration completes
    /// immediately and an `init` failure is logged, never returned.
    pub async fn register(&self, plugin: Arc<dyn PreviewPlugin>) {
        let info = plugin.info();
        let name = info.name.clone();

        {
            let mut entries = self.entries.write().await;
            if let Some(entry) = entries.iter_mut().find(|e| e.name == name) {
                entry.plugin = plugin.clone();
                info!(plugin = %name, "Plugin re-registered, replacing previous instance");
            } else {
                entries.push(RegistryEntry {
                    name: name.clone(),
                    plugin: plugin.clone(),
                });
                info!(plugin = %name, version = %info.version, "Plugin registered");
            }
        }

        tokio::spawn(async move {
            if let Err(error) = plugin.init().await {
                warn!(plugin = %name, error = %error, "Plugin init failed");
            }
        });
    }

    /// Unregisters a plugin by name. No-op if absent.
    ///
    /// The plugin's `destroy` runs fire-and-forget; a failure is logged,
    /// never returned.
    pub async fn unregister(&self, name: &str) {
        let removed = {
            let mut entries = self.entries.write().await;
            entries
                .iter()
                .position(|e| e.name == name)
                .map(|idx| entries.remove(idx).plugin)
        };

        if let Some(plugin) = removed {
            info!(plugin = %name, "Plugin unregistered");
            let name = name.to_string();
            tokio::spawn(async move {
                if let Err(error) = plugin.destroy().await {
                    warn!(plugin = %name, error = %error, "Plugin destroy failed");
                }
            });
        }
    }

    /// Gets a plugin by name.
    pub async fn get(&self, name: &str) -> Option<Arc<dyn PreviewPlugin>> {
        let entries = self.entries.read().await;
        entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.plugin.clone())
    }

    /// Returns all plugins in registration order.
    pub async fn all(&self) -> Vec<Arc<dyn PreviewPlugin>> {
        let entries = self.entries.read().await;
        entries.iter().map(|e| e.plugin.clone()).collect()
    }

    /// Checks whether a plugin is registered.
    pub async fn contains(&self, name: &str) -> bool {
        let entries = self.entries.read().await;
        entries.iter().any(|e| e.name == name)
    }

    /// Returns the number of registered plugins.
    pub async fn count(&self) -> usize {
        let entries = self.entries.read().await;
        entries.len()
    }
}
