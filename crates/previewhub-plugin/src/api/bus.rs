//! Event bus — process-local publish/subscribe for cooperating plugins.
//!
//! Emission is synchronous fan-out over a snapshot of the listener list,
//! so a listener unsubscribing itself or others mid-dispatch never
//! corrupts the dispatch in progress. Listener failures are logged and do
//! not stop the remaining listeners.
//!
//! Writes to the shared store are silent by contract. A writer that wants
//! observers to react emits [`DATA_CHANGED`] (payload `{key, value}`)
//! immediately after the write — a convention plugin authors must follow,
//! deliberately not an automatic behavior, since silent writes are
//! sometimes exactly what a plugin wants.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};

use tracing::warn;

use previewhub_core::PreviewResult;

/// Event name for the write-then-emit shared-store convention.
pub const DATA_CHANGED: &str = "data_changed";

type EventListener = dyn Fn(&serde_json::Value) -> PreviewResult<()> + Send + Sync;

struct ListenerEntry {
    /// Unique id used by [`Subscription::unsubscribe`].
    id: u64,
    /// The listener callback.
    handler: Arc<EventListener>,
}

#[derive(Default)]
struct BusInner {
    /// Event name → listeners in subscription order.
    listeners: Mutex<HashMap<String, Vec<ListenerEntry>>>,
    /// Source of unique listener ids.
    next_id: AtomicU64,
}

impl BusInner {
    fn remove(&self, event: &str, id: u64) {
        let mut listeners = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(entries) = listeners.get_mut(event) {
            entries.retain(|e| e.id != id);
            if entries.is_empty() {
                listeners.remove(event);
            }
        }
    }
}

/// Process-local publish/subscribe channel.
///
/// The listener table lives behind a shared handle, so subscriptions stay
/// valid however the bus itself is passed around.
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Arc<BusInner>,
}

impl EventBus {
    /// Creates a new empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Synchronously invokes the listeners registered for `event`, in
    /// subscription order, against a pre-iteration snapshot.
    pub fn emit(&self, event: &str, payload: &serde_json::Value) {
        let snapshot: Vec<Arc<EventListener>> = {
            let listeners = self
                .inner
                .listeners
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            listeners
                .get(event)
                .map(|entries| entries.iter().map(|e| e.handler.clone()).collect())
                .unwrap_or_default()
        };

        for handler in snapshot {
            if let Err(error) = handler(payload) {
                warn!(event = %event, error = %error, "Event listener failed");
            }
        }
    }

    /// Registers a listener and returns its subscription handle.
    pub fn on<F>(&self, event: &str, handler: F) -> Subscription
    where
        F: Fn(&serde_json::Value) -> PreviewResult<()> + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        {
            let mut listeners = self
                .inner
                .listeners
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            listeners
                .entry(event.to_string())
                .or_default()
                .push(ListenerEntry {
                    id,
                    handler: Arc::new(handler),
                });
        }
        Subscription {
            bus: Arc::downgrade(&self.inner),
            event: event.to_string(),
            id,
        }
    }

    /// Number of listeners currently registered for an event.
    pub fn listener_count(&self, event: &str) -> usize {
        let listeners = self
            .inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        listeners.get(event).map(|entries| entries.len()).unwrap_or(0)
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let listeners = self
            .inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("EventBus")
            .field("events", &listeners.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Handle removing exactly one listener registration.
///
/// `unsubscribe` is idempotent: the second and later calls find nothing to
/// remove and are harmless. Dropping the subscription without calling it
/// leaves the listener registered.
#[derive(Clone)]
pub struct Subscription {
    /// The owning bus internals.
    bus: Weak<BusInner>,
    /// Event the listener was registered under.
    event: String,
    /// The listener's unique id.
    id: u64,
}

impl Subscription {
    /// Removes the listener this subscription was returned for.
    pub fn unsubscribe(&self) {
        if let Some(bus) = self.bus.upgrade() {
            bus.remove(&self.event, self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("event", &self.event)
            .field("id", &self.id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_emit_reaches_listeners_in_subscription_order() {
        let bus = Arc::new(EventBus::new());
        let order = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let order = order.clone();
            bus.on("ping", move |_| {
                order.lock().unwrap().push(tag);
                Ok(())
            });
        }

        bus.emit("ping", &serde_json::json!(null));
        assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_unsubscribe_is_idempotent() {
        let bus = Arc::new(EventBus::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let counted = calls.clone();
        let sub = bus.on("ping", move |_| {
            counted.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
        let kept = calls.clone();
        bus.on("ping", move |_| {
            kept.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        sub.unsubscribe();
        sub.unsubscribe();
        bus.emit("ping", &serde_json::json!(null));

        // Only the second, unrelated listener remains active.
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(bus.listener_count("ping"), 1);
    }

    #[test]
    fn test_failing_listener_does_not_stop_the_rest() {
        let bus = Arc::new(EventBus::new());
        let calls = Arc::new(AtomicUsize::new(0));

        bus.on("ping", |_| {
            Err(previewhub_core::PreviewError::plugin("listener broke"))
        });
        let counted = calls.clone();
        bus.on("ping", move |_| {
            counted.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        bus.emit("ping", &serde_json::json!(null));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unsubscribe_during_emit_spares_in_flight_dispatch() {
        let bus = Arc::new(EventBus::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));

        // The remover runs first and unsubscribes the listener behind it.
        let target = slot.clone();
        bus.on("ping", move |_| {
            if let Some(sub) = target.lock().unwrap().as_ref() {
                sub.unsubscribe();
            }
            Ok(())
        });
        let counted = calls.clone();
        let victim = bus.on("ping", move |_| {
            counted.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
        *slot.lock().unwrap() = Some(victim);

        bus.emit("ping", &serde_json::json!(null));
        // The snapshot still carried the victim for the in-flight dispatch.
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        bus.emit("ping", &serde_json::json!(null));
        // Gone for the following emission.
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
