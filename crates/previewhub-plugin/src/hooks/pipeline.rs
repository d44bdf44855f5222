//! Hook pipeline — dispatches a hook across plugins in registration order.
//!
//! Semantics for fan-out hooks:
//! - Plugins are visited in registration order; ones not subscribed to the
//!   hook are skipped.
//! - A handler error is logged and treated as if the plugin had no
//!   opinion; the pipeline continues.
//! - A [`HookAction::Veto`] stops the pipeline immediately and becomes the
//!   overall result.
//! - A [`HookAction::Respond`] value is returned immediately, bypassing
//!   the remaining plugins (first responder wins).
//! - If every handler passes, the result is [`PipelineOutcome::Pass`],
//!   read by callers as "no opinion, proceed normally".
//!
//! Handlers are awaited strictly one at a time; concurrent dispatch would
//! make the short-circuit and first-responder ordering ill-defined.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::api::context::ExecutionContext;
use crate::registry::PluginRegistry;

use super::definitions::{HookAction, HookPayload};

/// Aggregated result of dispatching one hook through the pipeline.
#[derive(Debug, Clone)]
pub enum PipelineOutcome {
    /// Every handler passed (or no plugin was subscribed).
    Pass,
    /// A handler vetoed; no later handler ran.
    Veto {
        /// Plugin that vetoed.
        plugin: String,
    },
    /// A handler answered with a value; no later handler ran.
    Respond {
        /// Plugin that answered.
        plugin: String,
        /// The answered value.
        value: serde_json::Value,
    },
}

impl PipelineOutcome {
    /// Whether the pipeline was vetoed.
    pub fn is_veto(&self) -> bool {
        matches!(self, Self::Veto { .. })
    }

    /// Whether every handler passed.
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// The first-responder value, if any.
    pub fn value(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Respond { value, .. } => Some(value),
            _ => None,
        }
    }
}

/// Dispatches hooks to all subscribed plugins.
#[derive(Debug)]
pub struct HookPipeline {
    /// Plugin registry providing the iteration order.
    registry: Arc<PluginRegistry>,
}

impl HookPipeline {
    /// Creates a new pipeline over a registry.
    pub fn new(registry: Arc<PluginRegistry>) -> Self {
        Self { registry }
    }

    /// Runs a hook through the pipeline and returns the aggregated outcome.
    pub async fn run(&self, ctx: &ExecutionContext, payload: &HookPayload) -> PipelineOutcome {
        let plugins = self.registry.all().await;

        debug!(
            hook = %payload.hook,
            plugin_count = plugins.len(),
            session = %ctx.session(),
            "Dispatching hook"
        );

        for plugin in plugins {
            if !plugin.subscribed_hooks().contains(&payload.hook) {
                continue;
            }
            let name = plugin.info().name;

            match plugin.handle_hook(ctx, payload).await {
                Ok(HookAction::Pass) => {}
                Ok(HookAction::Veto) => {
                    debug!(hook = %payload.hook, plugin = %name, "Handler vetoed, stopping pipeline");
                    return PipelineOutcome::Veto { plugin: name };
                }
                Ok(HookAction::Respond(value)) => {
                    debug!(hook = %payload.hook, plugin = %name, "Handler responded, stopping pipeline");
                    return PipelineOutcome::Respond {
                        plugin: name,
                        value,
                    };
                }
                Err(error) => {
                    warn!(
                        hook = %payload.hook,
                        plugin = %name,
                        error = %error,
                        "Hook handler failed, continuing with next plugin"
                    );
                }
            }
        }

        PipelineOutcome::Pass
    }

    /// Runs a notification hook, discarding the outcome.
    pub async fn notify(&self, ctx: &ExecutionContext, payload: &HookPayload) {
        let _ = self.run(ctx, payload).await;
    }

    /// Returns a reference to the plugin registry.
    pub fn registry(&self) -> &Arc<PluginRegistry> {
        &self.registry
    }
}
