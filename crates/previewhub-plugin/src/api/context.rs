//! Execution context — what every hook invocation receives.

use std::sync::{Arc, PoisonError, RwLock};

use previewhub_core::{LifecycleState, ResourceDescriptor, SessionId};

use super::bus::EventBus;
use super::store::SharedStore;

/// Per-resource, per-session value bundle passed to every hook.
///
/// Cheap to clone: everything inside is shared. The bus outlives the
/// session; the store belongs to it exclusively and is dropped when the
/// session ends.
#[derive(Clone)]
pub struct ExecutionContext {
    /// The resource being previewed.
    resource: Arc<ResourceDescriptor>,
    /// Freshness tag of the owning session.
    session: SessionId,
    /// Live handle on the session's lifecycle state.
    state: Arc<RwLock<LifecycleState>>,
    /// The process-wide event bus.
    bus: Arc<EventBus>,
    /// The session's shared store.
    store: Arc<SharedStore>,
}

impl ExecutionContext {
    /// Assembles a context for one session.
    pub fn new(
        resource: Arc<ResourceDescriptor>,
        session: SessionId,
        state: Arc<RwLock<LifecycleState>>,
        bus: Arc<EventBus>,
        store: Arc<SharedStore>,
    ) -> Self {
        Self {
            resource,
            session,
            state,
            bus,
            store,
        }
    }

    /// The resource being previewed.
    pub fn resource(&self) -> &ResourceDescriptor {
        &self.resource
    }

    /// The owning session's id.
    pub fn session(&self) -> SessionId {
        self.session
    }

    /// Snapshot of the current lifecycle state.
    pub fn state(&self) -> LifecycleState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The event bus shared across sessions.
    pub fn bus(&self) -> &Arc<EventBus> {
        &self.bus
    }

    /// The session's shared store.
    pub fn store(&self) -> &Arc<SharedStore> {
        &self.store
    }
}

impl std::fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("resource", &self.resource.name)
            .field("session", &self.session)
            .field("phase", &self.state().phase)
            .finish()
    }
}
