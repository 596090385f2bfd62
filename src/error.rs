//! Error taxonomy surfaced by the transport and the auth operations.
//!
//! Callers match on the variant rather than inspecting HTTP details. Only
//! [`ApiError::SessionExpired`] carries a side effect: by the time it is
//! returned the session store has already been cleared.

use thiserror::Error;

/// Generic message used when the server does not supply one.
pub const GENERIC_MESSAGE: &str = "An unexpected error occurred";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Client-side input check failed; no request was sent.
    #[error("{field}: {reason}")]
    Validation { field: &'static str, reason: String },
    #[error("Your session has expired. Please login again.")]
    SessionExpired,
    #[error("You do not have permission to perform this action")]
    Forbidden,
    /// A nominally successful response lacked required fields.
    #[error("Invalid response from server: {0}")]
    MalformedResponse(String),
    #[error("Request failed ({status}): {message}")]
    RequestFailed { status: u16, message: String },
    /// No response was received (unreachable host, refused connection, timeout).
    #[error("Network error: {0}")]
    NetworkError(String),
    /// A newer session change completed while this operation was in flight.
    #[error("Operation superseded by a newer session change")]
    Superseded,
    #[error("Session storage error: {0}")]
    Storage(String),
}

impl ApiError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }

    /// Text suitable for a transient notification.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation { reason, .. } => reason.clone(),
            Self::RequestFailed { message, .. } => message.clone(),
            Self::NetworkError(_) => {
                "Network error: Please check your connection and try again".to_string()
            }
            other => other.to_string(),
        }
    }

    /// Text for a failed sign-in. A `401` there means the credentials were
    /// rejected, not that a session ran out.
    #[must_use]
    pub fn login_message(&self) -> String {
        match self {
            Self::SessionExpired => "Authentication failed: Invalid credentials".to_string(),
            Self::Forbidden => {
                "Access denied: You do not have permission to perform this action".to_string()
            }
            Self::RequestFailed { status: 429, .. } => {
                "Too many attempts: Please try again later".to_string()
            }
            other => other.user_message(),
        }
    }
}
