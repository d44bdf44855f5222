//! Preview manager — the host-facing facade over the whole engine.

use std::sync::Arc;

use tracing::debug;

use previewhub_core::{
    LifecycleState, LoadProgress, PreviewConfig, PreviewError, PreviewPhase, RenderFragment,
    ResourceDescriptor, SessionId,
};

use crate::api::bus::EventBus;
use crate::hooks::definitions::HookPayload;
use crate::hooks::pipeline::{HookPipeline, PipelineOutcome};
use crate::lifecycle::{ErrorDisposition, LifecycleController};
use crate::plugin::PreviewPlugin;
use crate::registry::PluginRegistry;
use crate::resolver::Resolver;

/// Owns one preview surface: registry, resolver, pipeline, bus, and the
/// lifecycle controller, wired together.
///
/// A manager is an explicit instance rather than process-global state, so
/// a host can run several independent preview surfaces side by side.
#[derive(Debug)]
pub struct PreviewManager {
    config: PreviewConfig,
    registry: Arc<PluginRegistry>,
    resolver: Resolver,
    pipeline: Arc<HookPipeline>,
    bus: Arc<EventBus>,
    controller: LifecycleController,
}

impl PreviewManager {
    /// Creates a manager with default configuration.
    pub fn new() -> Self {
        Self::with_config(PreviewConfig::default())
    }

    /// Creates a manager with explicit configuration.
    pub fn with_config(config: PreviewConfig) -> Self {
        let registry = Arc::new(PluginRegistry::new());
        let resolver = Resolver::new(registry.clone());
        let pipeline = Arc::new(HookPipeline::new(registry.clone()));
        let bus = Arc::new(EventBus::new());
        let controller = LifecycleController::new(
            registry.clone(),
            resolver.clone(),
            pipeline.clone(),
            bus.clone(),
        );

        Self {
            config,
            registry,
            resolver,
            pipeline,
            bus,
            controller,
        }
    }

    // ── Plugins ──

    /// Registers a plugin; its `init` side effect is fire-and-forget.
    pub async fn register_plugin(&self, plugin: Arc<dyn PreviewPlugin>) {
        self.registry.register(plugin).await;
    }

    /// Unregisters a plugin by name; its `destroy` is fire-and-forget.
    pub async fn unregister_plugin(&self, name: &str) {
        self.registry.unregister(name).await;
    }

    /// Resolves the plugin that would own `resource`, without opening it.
    pub async fn resolve(&self, resource: &ResourceDescriptor) -> Option<Arc<dyn PreviewPlugin>> {
        self.resolver.resolve(resource).await
    }

    // ── Lifecycle ──

    /// Opens a resource on a fresh session. With `auto_load` enabled
    /// (the default) the idle→loading transition is requested right away.
    pub async fn open(&self, resource: ResourceDescriptor) -> LifecycleState {
        let state = self.controller.open(resource).await;
        if self.config.auto_load && state.phase == PreviewPhase::Idle {
            return self.controller.load().await;
        }
        state
    }

    /// Requests the idle→loading transition for the current session.
    pub async fn load(&self) -> LifecycleState {
        self.controller.load().await
    }

    /// Signals load success for `session`; stale signals are dropped.
    pub async fn finish(&self, session: SessionId) -> LifecycleState {
        self.controller.finish(session).await
    }

    /// Signals load failure for `session`. The returned disposition says
    /// whether the host should present its default error UI.
    pub async fn fail(&self, session: SessionId, error: PreviewError) -> ErrorDisposition {
        self.controller.fail(session, error).await
    }

    /// Forwards a progress update for `session`.
    pub async fn progress(&self, session: SessionId, progress: LoadProgress) {
        self.controller.progress(session, progress).await;
    }

    /// Returns the session to `idle` on a fresh store and session id.
    pub async fn reset(&self) -> LifecycleState {
        self.controller.reset().await
    }

    /// `reset` followed by a new load request.
    pub async fn reload(&self) -> LifecycleState {
        self.controller.reload().await
    }

    /// Snapshot of the current lifecycle state.
    pub async fn state(&self) -> LifecycleState {
        self.controller.state().await
    }

    /// Id of the current session, if a resource is open. Load signals
    /// (`finish`/`fail`/`progress`) must present this tag.
    pub async fn session_id(&self) -> Option<SessionId> {
        self.controller.session_id().await
    }

    /// The plugin owning the current resource, if any.
    pub async fn active_plugin(&self) -> Option<Arc<dyn PreviewPlugin>> {
        self.controller.active_plugin().await
    }

    /// Fans out the mount notification to all plugins.
    pub async fn mount(&self) {
        self.controller.mount().await;
    }

    /// Fans out the unmount notification to all plugins.
    pub async fn unmount(&self) {
        self.controller.unmount().await;
    }

    // ── Hooks & rendering ──

    /// Runs a hook through the pipeline against the current session.
    pub async fn run_hook(&self, payload: HookPayload) -> PipelineOutcome {
        self.controller.run_hook(payload).await
    }

    /// Content-pane fragment from the resolved plugin.
    pub async fn render(&self) -> Option<RenderFragment> {
        self.controller.render().await
    }

    /// Toolbar fragment from the resolved plugin.
    pub async fn render_toolbar(&self) -> Option<RenderFragment> {
        self.controller.render_toolbar().await
    }

    /// Overlay fragments from every registered plugin.
    pub async fn render_overlays(&self) -> Vec<RenderFragment> {
        self.controller.render_overlays().await
    }

    // ── Bus & store ──

    /// The event bus shared across sessions.
    pub fn bus(&self) -> &Arc<EventBus> {
        &self.bus
    }

    /// Reads a key from the current session's shared store.
    pub async fn get_data(&self, key: &str) -> Option<serde_json::Value> {
        self.controller.store().await?.get(key)
    }

    /// Writes a key into the current session's shared store. Silent by
    /// contract: a writer that wants observers to react also emits
    /// [`crate::api::bus::DATA_CHANGED`] after the write. No-op when no
    /// resource is open.
    pub async fn set_data(&self, key: &str, value: serde_json::Value) {
        match self.controller.store().await {
            Some(store) => {
                store.set(key, value);
            }
            None => debug!(key = %key, "No session open, shared-store write dropped"),
        }
    }

    /// Returns the plugin registry.
    pub fn registry(&self) -> &Arc<PluginRegistry> {
        &self.registry
    }

    /// Returns the hook pipeline.
    pub fn pipeline(&self) -> &Arc<HookPipeline> {
        &self.pipeline
    }
}

impl Default for PreviewManager {
    fn default() -> Self {
        Self::new()
    }
}
