// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for Tether publishers.
//!
//! [`TetherError`] is the failure type used by the sources and subjects in this
//! workspace when a caller does not pick a more specific one. Operators never
//! create errors of their own: a failure always originates upstream and is
//! relayed verbatim.
//!
//! # Examples
//!
//! ```
//! use tether_core::{TetherError, Result};
//!
//! fn load() -> Result<()> {
//!     Err(TetherError::stream_error("source not ready"))
//! }
//!
//! assert!(load().is_err());
//! ```

use crate::SubjectError;

/// Root error type for Tether sources.
#[derive(Debug, thiserror::Error)]
pub enum TetherError {
    /// A source failed while producing values.
    #[error("Stream processing error: {context}")]
    StreamProcessingError {
        /// Description of what went wrong
        context: String,
    },

    /// Custom error from user code
    ///
    /// Wraps errors produced by user-provided sources so they can travel
    /// through a publisher's failure channel.
    #[error("User error: {0}")]
    UserError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl TetherError {
    /// Create a stream processing error with the given context
    pub fn stream_error(context: impl Into<String>) -> Self {
        Self::StreamProcessingError {
            context: context.into(),
        }
    }

    /// Wrap a user error
    pub fn user_error(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::UserError(Box::new(error))
    }
}

impl From<SubjectError> for TetherError {
    fn from(error: SubjectError) -> Self {
        Self::stream_error(error.to_string())
    }
}

impl Clone for TetherError {
    fn clone(&self) -> Self {
        match self {
            Self::StreamProcessingError { context } => Self::StreamProcessingError {
                context: context.clone(),
            },
            // The boxed source cannot be cloned, so the clone keeps its message
            Self::UserError(e) => Self::StreamProcessingError {
                context: format!("User error: {e}"),
            },
        }
    }
}

/// Specialized Result type for Tether operations
pub type Result<T> = std::result::Result<T, TetherError>;
