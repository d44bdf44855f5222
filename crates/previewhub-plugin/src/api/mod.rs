//! Plugin API — the bus, store, and context handed to plugin code.

pub mod bus;
pub mod context;
pub mod store;

pub use bus::{DATA_CHANGED, EventBus, Subscription};
pub use context::ExecutionContext;
pub use store::SharedStore;
