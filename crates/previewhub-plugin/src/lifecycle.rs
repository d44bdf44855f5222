//! Lifecycle controller — the per-resource load state machine.
//!
//! Transitions (initial state `idle`):
//!
//! - `idle → loading` when a load is requested and no `before_load`
//!   handler vetoes; a veto leaves the session idle.
//! - `idle → unsupported` when resolution finds no plugin.
//! - `loading → loaded` on a success signal, `loading → error` on a
//!   failure signal from the host's render/fetch path.
//! - `reset` returns any state to `idle` on a fresh session;
//!   `reload` is `reset` immediately followed by a new load.
//!
//! Every session carries a [`SessionId`]. Success/failure/progress
//! signals must present the id of the session they belong to; signals
//! from a superseded session are dropped, so a stale async result can
//! never mutate the current session. The controller never retries on its
//! own; retry is always a fresh `reload` from the caller.

use std::sync::{Arc, PoisonError, RwLock as StdRwLock};

use tokio::sync::RwLock;
use tracing::{debug, info};

use previewhub_core::{
    LifecycleState, LoadProgress, PreviewError, PreviewPhase, RenderFragment, ResourceDescriptor,
    SessionId,
};

use crate::api::bus::EventBus;
use crate::api::context::ExecutionContext;
use crate::api::store::SharedStore;
use crate::hooks::definitions::{HookPayload, HookPoint};
use crate::hooks::pipeline::{HookPipeline, PipelineOutcome};
use crate::plugin::PreviewPlugin;
use crate::registry::PluginRegistry;
use crate::resolver::Resolver;

/// What the host should do about a load failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorDisposition {
    /// Present the default error UI.
    ShowDefault,
    /// An `on_load_error` handler vetoed; the vetoing plugin owns the
    /// error UI.
    Suppressed,
    /// The signal belonged to a superseded session and was dropped.
    Stale,
}

/// One lifecycle session: a resource, its store, its state, its plugin.
struct Session {
    id: SessionId,
    resource: Arc<ResourceDescriptor>,
    store: Arc<SharedStore>,
    state: Arc<StdRwLock<LifecycleState>>,
    active: Option<Arc<dyn PreviewPlugin>>,
}

impl Session {
    fn new(resource: Arc<ResourceDescriptor>, active: Option<Arc<dyn PreviewPlugin>>) -> Self {
        Self {
            id: SessionId::new(),
            resource,
            store: Arc::new(SharedStore::new()),
            state: Arc::new(StdRwLock::new(LifecycleState::idle())),
            active,
        }
    }

    fn context(&self, bus: &Arc<EventBus>) -> ExecutionContext {
        ExecutionContext::new(
            self.resource.clone(),
            self.id,
            self.state.clone(),
            bus.clone(),
            self.store.clone(),
        )
    }

    fn state(&self) -> LifecycleState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_state(&self, state: LifecycleState) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = state;
    }

    fn phase(&self) -> PreviewPhase {
        self.state().phase
    }
}

/// Drives the load state machine for the currently active resource.
pub struct LifecycleController {
    registry: Arc<PluginRegistry>,
    resolver: Resolver,
    pipeline: Arc<HookPipeline>,
    bus: Arc<EventBus>,
    session: RwLock<Option<Session>>,
}

impl LifecycleController {
    /// Creates a controller over shared registry, pipeline, and bus.
    pub fn new(
        registry: Arc<PluginRegistry>,
        resolver: Resolver,
        pipeline: Arc<HookPipeline>,
        bus: Arc<EventBus>,
    ) -> Self {
        Self {
            registry,
            resolver,
            pipeline,
            bus,
            session: RwLock::new(None),
        }
    }

    /// Makes `resource` the active resource on a fresh session.
    ///
    /// Resolution runs first: with a winner the session starts `idle`
    /// awaiting [`load`](Self::load); without one it starts `unsupported`.
    /// Any previous session is discarded along with its store, and its
    /// late signals will fail the freshness check from here on.
    pub async fn open(&self, resource: ResourceDescriptor) -> LifecycleState {
        let resource = Arc::new(resource);
        let resolved = self.resolver.resolve(&resource).await;

        let state = match &resolved {
            Some(plugin) => {
                info!(
                    resource = %resource.name,
                    plugin = %plugin.info().name,
                    "Resource opened"
                );
                LifecycleState::idle()
            }
            None => {
                info!(resource = %resource.name, mime = %resource.mime_type, "Resource unsupported");
                LifecycleState::unsupported(format!(
                    "No plugin found for file type: {}",
                    resource.mime_type
                ))
            }
        };

        let session = Session::new(resource, resolved);
        session.set_state(state.clone());
        *self.session.write().await = Some(session);
        state
    }

    /// Requests the idle→loading transition for the current session.
    ///
    /// Runs the `before_load` gate; a veto aborts the load and the session
    /// stays idle. On entering `loading` the `on_load_start` notification
    /// is fanned out. No-op outside `idle`.
    pub async fn load(&self) -> LifecycleState {
        let (ctx, session_id) = {
            let guard = self.session.read().await;
            let Some(session) = guard.as_ref() else {
                return LifecycleState::idle();
            };
            if session.phase() != PreviewPhase::Idle || session.active.is_none() {
                return session.state();
            }
            (session.context(&self.bus), session.id)
        };

        let outcome = self
            .pipeline
            .run(&ctx, &HookPayload::new(HookPoint::BeforeLoad))
            .await;
        if let PipelineOutcome::Veto { plugin } = outcome {
            debug!(session = %session_id, plugin = %plugin, "Load vetoed");
            return self.state().await;
        }

        // The gate may have awaited arbitrarily long; re-check that the
        // session was not superseded before transitioning.
        let ctx = {
            let guard = self.session.read().await;
            let Some(session) = guard.as_ref() else {
                return LifecycleState::idle();
            };
            if session.id != session_id {
                debug!(session = %session_id, "Dropping stale load request");
                return session.state();
            }
            session.set_state(LifecycleState::loading());
            session.context(&self.bus)
        };

        self.pipeline
            .notify(&ctx, &HookPayload::new(HookPoint::OnLoadStart))
            .await;
        LifecycleState::loading()
    }

    /// Signals that the load path for `session` succeeded.
    ///
    /// Dropped when `session` is stale or the session is not loading.
    pub async fn finish(&self, session: SessionId) -> LifecycleState {
        let ctx = {
            let guard = self.session.read().await;
            let Some(current) = guard.as_ref() else {
                return LifecycleState::idle();
            };
            if current.id != session {
                debug!(session = %session, "Dropping stale load-success signal");
                return current.state();
            }
            if current.phase() != PreviewPhase::Loading {
                return current.state();
            }
            current.set_state(LifecycleState::loaded());
            current.context(&self.bus)
        };

        self.pipeline
            .notify(&ctx, &HookPayload::new(HookPoint::OnLoadSuccess))
            .await;
        LifecycleState::loaded()
    }

    /// Signals that the load path for `session` failed.
    ///
    /// Moves the session to `error` carrying the original error, then runs
    /// the `on_load_error` pipeline; a veto means the vetoing plugin takes
    /// responsibility for its own error UI and the host should not present
    /// the default one.
    pub async fn fail(&self, session: SessionId, error: PreviewError) -> ErrorDisposition {
        let ctx = {
            let guard = self.session.read().await;
            let Some(current) = guard.as_ref() else {
                return ErrorDisposition::Stale;
            };
            if current.id != session {
                debug!(session = %session, "Dropping stale load-failure signal");
                return ErrorDisposition::Stale;
            }
            if current.phase() != PreviewPhase::Loading {
                debug!(session = %session, phase = ?current.phase(), "Ignoring failure signal outside loading");
                return ErrorDisposition::Stale;
            }
            current.set_state(LifecycleState::error(error.clone()));
            current.context(&self.bus)
        };

        let payload = HookPayload::new(HookPoint::OnLoadError).with_error(&error);
        match self.pipeline.run(&ctx, &payload).await {
            PipelineOutcome::Veto { plugin } => {
                info!(session = %session, plugin = %plugin, "Default error presentation suppressed");
                ErrorDisposition::Suppressed
            }
            _ => ErrorDisposition::ShowDefault,
        }
    }

    /// Forwards a progress update for `session` to subscribed plugins.
    pub async fn progress(&self, session: SessionId, progress: LoadProgress) {
        let ctx = {
            let guard = self.session.read().await;
            let Some(current) = guard.as_ref() else {
                return;
            };
            if current.id != session || current.phase() != PreviewPhase::Loading {
                debug!(session = %session, "Dropping stale progress signal");
                return;
            }
            current.context(&self.bus)
        };

        let payload = HookPayload::new(HookPoint::OnLoadProgress).with_progress(&progress);
        self.pipeline.notify(&ctx, &payload).await;
    }

    /// Returns any state to `idle` on a fresh session.
    ///
    /// The resolved plugin and resource carry over; the store and session
    /// id do not, so keys from the old session are gone and its pending
    /// signals become stale.
    pub async fn reset(&self) -> LifecycleState {
        let mut guard = self.session.write().await;
        if let Some(session) = guard.as_mut() {
            let fresh = Session::new(session.resource.clone(), session.active.clone());
            debug!(old = %session.id, new = %fresh.id, "Session reset");
            *session = fresh;
        }
        LifecycleState::idle()
    }

    /// `reset` followed by a new load request.
    pub async fn reload(&self) -> LifecycleState {
        self.reset().await;
        self.load().await
    }

    /// Snapshot of the current lifecycle state.
    pub async fn state(&self) -> LifecycleState {
        let guard = self.session.read().await;
        guard
            .as_ref()
            .map(|s| s.state())
            .unwrap_or_else(LifecycleState::idle)
    }

    /// Id of the current session, if a resource is open.
    pub async fn session_id(&self) -> Option<SessionId> {
        let guard = self.session.read().await;
        guard.as_ref().map(|s| s.id)
    }

    /// The plugin owning the current resource, if any.
    pub async fn active_plugin(&self) -> Option<Arc<dyn PreviewPlugin>> {
        let guard = self.session.read().await;
        guard.as_ref().and_then(|s| s.active.clone())
    }

    /// The current session's shared store, if a resource is open.
    pub async fn store(&self) -> Option<Arc<SharedStore>> {
        let guard = self.session.read().await;
        guard.as_ref().map(|s| s.store.clone())
    }

    /// Execution context for the current session, if a resource is open.
    pub async fn context(&self) -> Option<ExecutionContext> {
        let guard = self.session.read().await;
        guard.as_ref().map(|s| s.context(&self.bus))
    }

    /// Fans out the mount notification.
    pub async fn mount(&self) {
        if let Some(ctx) = self.context().await {
            self.pipeline
                .notify(&ctx, &HookPayload::new(HookPoint::OnMount))
                .await;
        }
    }

    /// Fans out the unmount notification.
    pub async fn unmount(&self) {
        if let Some(ctx) = self.context().await {
            self.pipeline
                .notify(&ctx, &HookPayload::new(HookPoint::OnUnmount))
                .await;
        }
    }

    /// Runs an arbitrary hook through the pipeline against the current
    /// session. Interaction hooks (download, zoom, rotate, fullscreen) are
    /// forwarded this way without the core interpreting them.
    pub async fn run_hook(&self, payload: HookPayload) -> PipelineOutcome {
        match self.context().await {
            Some(ctx) => self.pipeline.run(&ctx, &payload).await,
            None => {
                debug!(hook = %payload.hook, "No session open, hook not dispatched");
                PipelineOutcome::Pass
            }
        }
    }

    /// Content-pane fragment from the resolved plugin.
    pub async fn render(&self) -> Option<RenderFragment> {
        let guard = self.session.read().await;
        let session = guard.as_ref()?;
        let plugin = session.active.as_ref()?;
        plugin.render(&session.context(&self.bus))
    }

    /// Toolbar fragment from the resolved plugin.
    pub async fn render_toolbar(&self) -> Option<RenderFragment> {
        let guard = self.session.read().await;
        let session = guard.as_ref()?;
        let plugin = session.active.as_ref()?;
        plugin.render_toolbar(&session.context(&self.bus))
    }

    /// Overlay fragments from every registered plugin, composed in
    /// registration order.
    pub async fn render_overlays(&self) -> Vec<RenderFragment> {
        let ctx = {
            let guard = self.session.read().await;
            match guard.as_ref() {
                Some(session) => session.context(&self.bus),
                None => return Vec::new(),
            }
        };

        let mut fragments = Vec::new();
        for plugin in self.registry.all().await {
            if let Some(fragment) = plugin.render_overlay(&ctx) {
                fragments.push(fragment);
            }
        }
        fragments
    }
}

impl std::fmt::Debug for LifecycleController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LifecycleController").finish()
    }
}
