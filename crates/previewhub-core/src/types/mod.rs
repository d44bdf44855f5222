//! Shared domain types for PreviewHub.

pub mod id;
pub mod progress;
pub mod render;
pub mod resource;
pub mod state;

pub use id::SessionId;
pub use progress::LoadProgress;
pub use render::RenderFragment;
pub use resource::ResourceDescriptor;
pub use state::{LifecycleState, PreviewPhase};
