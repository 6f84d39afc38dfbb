//! Error types for Scope Core
//!
//! Provides error handling for:
//! - Failures reported by the project API collaborators
//! - Actions rejected by the editing session
//! - Configuration loading

use crate::state_machine::SessionState;
use serde::{Deserialize, Serialize};

/// Failure reported by an external project API
///
/// Also the store's `error` value, so it is comparable and cloneable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum ApiError {
    /// Request never reached the server or the connection dropped
    #[error("network error: {0}")]
    Network(String),

    /// Server rejected or failed the request
    #[error("server error {status}: {message}")]
    Server {
        /// HTTP-like status code
        status: u16,
        /// Server-provided message
        message: String,
    },

    /// Addressed resource does not exist
    #[error("{resource} not found: {id}")]
    NotFound {
        /// Resource kind, e.g. `attachment`
        resource: String,
        /// Identifier that was looked up
        id: String,
    },

    /// Payload rejected before dispatch
    #[error("validation failed: {0}")]
    Validation(String),
}

impl ApiError {
    /// Attachment lookup failure
    #[inline]
    #[must_use]
    pub fn attachment_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            resource: "attachment".to_string(),
            id: id.into(),
        }
    }

    /// Check if error is a missing resource
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if the request may succeed when re-submitted
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Server { status, .. } => *status >= 500,
            Self::NotFound { .. } | Self::Validation(_) => false,
        }
    }
}

/// Editing session errors
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Collaborator call failed
    #[error("api error: {0}")]
    Api(#[from] ApiError),

    /// Viewer lacks the privilege for the action
    #[error("permission denied: {action}")]
    PermissionDenied {
        /// Rejected action
        action: &'static str,
    },

    /// A save is already pending
    #[error("save already in flight")]
    SaveInFlight,

    /// No project has been received yet
    #[error("session has no project yet")]
    NotInitialized,

    /// No product template answers to the key
    #[error("product template not found: {0}")]
    TemplateNotFound(String),

    /// State machine rejected a transition
    #[error("illegal session transition: {from:?} -> {to:?}")]
    IllegalTransition {
        /// Current state
        from: SessionState,
        /// Requested state
        to: SessionState,
    },
}

impl SessionError {
    /// Check if error is retryable
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Api(err) => err.is_retryable(),
            Self::SaveInFlight => true,
            _ => false,
        }
    }

    /// Check if error is a missing resource
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api(err) if err.is_not_found())
    }

    /// The collaborator error, if this wraps one
    #[inline]
    #[must_use]
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML could not be parsed
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Parsed values are unusable
    #[error("invalid config: {0}")]
    Invalid(String),
}
