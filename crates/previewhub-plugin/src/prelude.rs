//! Prelude for convenient imports.

pub use async_trait::async_trait;

pub use previewhub_core::{
    ErrorKind, LifecycleState, LoadProgress, PreviewConfig, PreviewError, PreviewPhase,
    PreviewResult, RenderFragment, ResourceDescriptor, SessionId,
};

pub use crate::api::bus::{DATA_CHANGED, EventBus, Subscription};
pub use crate::api::context::ExecutionContext;
pub use crate::api::store::SharedStore;
pub use crate::hooks::definitions::{HookAction, HookPayload, HookPoint};
pub use crate::hooks::pipeline::{HookPipeline, PipelineOutcome};
pub use crate::lifecycle::{ErrorDisposition, LifecycleController};
pub use crate::manager::PreviewManager;
pub use crate::plugin::{PluginInfo, PreviewPlugin};
pub use crate::registry::PluginRegistry;
pub use crate::resolver::Resolver;
