//! Convenience result type alias for PreviewHub.

use crate::error::PreviewError;

/// A specialized `Result` type for PreviewHub operations.
///
/// This is defined as a convenience so that every crate does not need to
/// write `Result<T, PreviewError>` explicitly.
pub type PreviewResult<T> = Result<T, PreviewError>;
