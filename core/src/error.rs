//! Error types for indicator lifecycle operations.
//!
//! Every condition here is non-fatal by design: `attach`/`remove` swallow
//! and log them, while the `try_` variants surface them to callers that
//! want the reason.

use thiserror::Error;

/// Reasons an attach request was ignored
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PresentError {
    #[error("an indicator is already presented")]
    AlreadyPresented,

    #[error("no active root container is available")]
    RootUnavailable,
}

/// Reasons a remove request was ignored
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DismissError {
    #[error("no indicator is currently presented")]
    NotPresented,
}
