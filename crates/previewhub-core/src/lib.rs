//! # previewhub-core
//!
//! Core crate for PreviewHub. Contains the shared domain types
//! (resource descriptors, lifecycle states, render fragments, session
//! identifiers), the configuration schema, and the unified error system.
//!
//! This crate has **no** internal dependencies on other PreviewHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use config::PreviewConfig;
pub use error::{ErrorKind, PreviewError};
pub use result::PreviewResult;
pub use types::{
    LifecycleState, LoadProgress, PreviewPhase, RenderFragment, ResourceDescriptor, SessionId,
};
