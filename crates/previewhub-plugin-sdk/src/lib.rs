//! # previewhub-plugin-sdk
//!
//! SDK for developing renderer plugins for PreviewHub.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use previewhub_plugin_sdk::prelude::*;
//! use serde_json::json;
//!
//! let plugin = PluginBuilder::new("image-preview")
//!     .version("1.0.0")
//!     .description("Renders raster images")
//!     .supports_type("image/*")
//!     .priority(10)
//!     .on(HookPoint::BeforeLoad, |_ctx, _payload| async {
//!         Ok(HookAction::Pass)
//!     })
//!     .render(|ctx| {
//!         Some(RenderFragment::new(
//!             "image-preview",
//!             json!({ "img": ctx.resource().locator }),
//!         ))
//!     })
//!     .build();
//!
//! // manager.register_plugin(plugin).await;
//! ```

pub mod builder;

/// Prelude for convenient imports.
pub mod prelude {
    pub use async_trait::async_trait;

    pub use previewhub_core::{
        ErrorKind, LifecycleState, LoadProgress, PreviewConfig, PreviewError, PreviewPhase,
        PreviewResult, RenderFragment, ResourceDescriptor, SessionId,
    };
    pub use previewhub_plugin::api::bus::{DATA_CHANGED, EventBus, Subscription};
    pub use previewhub_plugin::api::context::ExecutionContext;
    pub use previewhub_plugin::api::store::SharedStore;
    pub use previewhub_plugin::hooks::definitions::{HookAction, HookPayload, HookPoint};
    pub use previewhub_plugin::hooks::pipeline::PipelineOutcome;
    pub use previewhub_plugin::lifecycle::ErrorDisposition;
    pub use previewhub_plugin::manager::PreviewManager;
    pub use previewhub_plugin::plugin::{PluginInfo, PreviewPlugin};

    pub use crate::builder::PluginBuilder;
}
