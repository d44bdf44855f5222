//! # previewhub-plugin
//!
//! Plugin framework for PreviewHub. Provides:
//!
//! - Plugin registry with registration-order semantics and
//!   fire-and-forget init/destroy side effects
//! - Capability/priority resolver selecting one plugin per resource
//! - Hook pipeline with veto short-circuit and first-responder semantics
//! - Event bus plus per-session shared store for cooperating UI fragments
//! - Lifecycle controller driving the idle/loading/loaded/error/
//!   unsupported state machine with stale-session protection
//! - `PreviewManager`, the host facade wiring it all together

pub mod api;
pub mod hooks;
pub mod lifecycle;
pub mod macros;
pub mod manager;
pub mod plugin;
pub mod prelude;
pub mod registry;
pub mod resolver;

pub use api::bus::{DATA_CHANGED, EventBus, Subscription};
pub use api::context::ExecutionContext;
pub use api::store::SharedStore;
pub use hooks::definitions::{HookAction, HookPayload, HookPoint};
pub use hooks::pipeline::{HookPipeline, PipelineOutcome};
pub use lifecycle::{ErrorDisposition, LifecycleController};
pub use manager::PreviewManager;
pub use plugin::{PluginInfo, PreviewPlugin};
pub use registry::PluginRegistry;
pub use resolver::Resolver;
