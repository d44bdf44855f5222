//! The plugin trait and its capability metadata.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use previewhub_core::{PreviewResult, RenderFragment, ResourceDescriptor};

use crate::api::context::ExecutionContext;
use crate::hooks::definitions::{HookAction, HookPayload, HookPoint};

/// Declarative metadata about a plugin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginInfo {
    /// Unique plugin name; registering the same name twice replaces the
    /// earlier descriptor.
    pub name: String,
    /// Plugin version string.
    #[serde(default)]
    pub version: String,
    /// Plugin description.
    #[serde(default)]
    pub description: String,
    /// MIME patterns this plugin handles. `type/*` and `*/*` wildcards
    /// are supported.
    #[serde(default)]
    pub supported_types: Vec<String>,
    /// Extension suffixes this plugin handles, matched case-insensitively.
    #[serde(default)]
    pub supported_extensions: Vec<String>,
}

impl PluginInfo {
    /// Metadata with just a name; fill the rest through the public fields
    /// or the `plugin_info!` macro.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: String::new(),
            description: String::new(),
            supported_types: Vec::new(),
            supported_extensions: Vec::new(),
        }
    }
}

/// Trait that all preview plugins implement.
///
/// Every hook is optional: the default method bodies report no opinion, so
/// a renderer only overrides what it cares about. The pipeline additionally
/// consults [`subscribed_hooks`](Self::subscribed_hooks) before invoking
/// [`handle_hook`](Self::handle_hook), so a plugin that subscribes to
/// nothing is never entered during fan-out dispatch.
#[async_trait]
pub trait PreviewPlugin: Send + Sync + std::fmt::Debug {
    /// Returns plugin metadata.
    fn info(&self) -> PluginInfo;

    /// Called once after registration. Failure is logged by the registry
    /// and never reaches the registering caller.
    async fn init(&self) -> PreviewResult<()> {
        Ok(())
    }

    /// Called when the plugin is unregistered. Failure is logged, not
    /// propagated.
    async fn destroy(&self) -> PreviewResult<()> {
        Ok(())
    }

    /// Capability override. `None` delegates to the default check against
    /// `supported_types`/`supported_extensions`; `Some(_)` is authoritative
    /// in both directions.
    async fn can_handle(&self, _resource: &ResourceDescriptor) -> Option<bool> {
        None
    }

    /// Resolution priority for a resource; higher wins, ties go to the
    /// earliest-registered plugin.
    fn priority(&self, _resource: &ResourceDescriptor) -> i64 {
        0
    }

    /// Hook points this plugin responds to. The pipeline skips plugins
    /// that are not subscribed to the hook being dispatched.
    fn subscribed_hooks(&self) -> Vec<HookPoint> {
        Vec::new()
    }

    /// Handles one hook invocation.
    ///
    /// Return [`HookAction::Pass`] to let the pipeline continue,
    /// [`HookAction::Veto`] to stop it (aborting a pending load for
    /// `BeforeLoad`, or suppressing default error handling for
    /// `OnLoadError`), or [`HookAction::Respond`] to answer with a value
    /// that ends the pipeline as its result. An `Err` is logged and
    /// treated as no opinion.
    async fn handle_hook(
        &self,
        _ctx: &ExecutionContext,
        _payload: &HookPayload,
    ) -> PreviewResult<HookAction> {
        Ok(HookAction::Pass)
    }

    /// Produces the content-pane fragment. Invoked only on the plugin the
    /// resolver selected for the current resource.
    fn render(&self, _ctx: &ExecutionContext) -> Option<RenderFragment> {
        None
    }

    /// Produces the toolbar fragment. Invoked only on the resolved plugin.
    fn render_toolbar(&self, _ctx: &ExecutionContext) -> Option<RenderFragment> {
        None
    }

    /// Produces a passive overlay fragment. Unlike the other render
    /// producers this is fanned out across all registered plugins and the
    /// non-empty results are composed.
    fn render_overlay(&self, _ctx: &ExecutionContext) -> Option<RenderFragment> {
        None
    }
}
