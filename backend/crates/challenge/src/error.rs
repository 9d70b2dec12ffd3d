//! Challenge Error Types
//!
//! This module provides challenge-specific error variants that integrate
//! with the unified `kernel::AppError` system.
//!
//! An orchestrator `fail` decision is not an error; only the login-facing
//! directory turns it into [`ChallengeError::AuthenticationFailed`].

use axum::response::{IntoResponse, Response};
use kernel::{AppError, ErrorKind};
use thiserror::Error;

/// Challenge-specific result type alias
pub type ChallengeResult<T> = Result<T, ChallengeError>;

#[derive(Debug, Error)]
pub enum ChallengeError {
    /// Required input absent or malformed; raised before any side effect
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Out-of-band notification channel failed
    #[error("Delivery failed: {0}")]
    Delivery(String),

    /// Caller is not the registered directory client
    #[error("Unknown client")]
    InvalidClient,

    /// Identity has no account in the directory
    #[error("Identity not registered")]
    UnknownIdentity,

    /// Per-identity code issuance limit reached
    #[error("Too many codes requested")]
    RateLimitExceeded,

    /// Login session handle unknown or already consumed
    #[error("Login session not found")]
    SessionNotFound,

    /// Login session outlived the directory session timeout
    #[error("Login session expired")]
    SessionExpired,

    /// Attempt limit reached without a correct answer
    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ChallengeError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ChallengeError::Validation(_) => ErrorKind::BadRequest,
            ChallengeError::Delivery(_) => ErrorKind::ServiceUnavailable,
            ChallengeError::InvalidClient
            | ChallengeError::UnknownIdentity
            | ChallengeError::AuthenticationFailed => ErrorKind::Unauthorized,
            ChallengeError::RateLimitExceeded => ErrorKind::TooManyRequests,
            ChallengeError::SessionNotFound | ChallengeError::SessionExpired => ErrorKind::Gone,
            ChallengeError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Shorthand for a validation failure
    pub fn validation(message: impl Into<String>) -> Self {
        ChallengeError::Validation(message.into())
    }

    fn log(&self) {
        match self {
            ChallengeError::Internal(msg) => {
                tracing::error!(message = %msg, "Challenge internal error");
            }
            ChallengeError::Delivery(msg) => {
                tracing::warn!(reason = %msg, "One-time code delivery failed");
            }
            ChallengeError::InvalidClient
            | ChallengeError::UnknownIdentity
            | ChallengeError::AuthenticationFailed
            | ChallengeError::RateLimitExceeded => {
                tracing::warn!(error = %self, "Challenge request rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Challenge error");
            }
        }
    }
}

impl From<ChallengeError> for AppError {
    fn from(err: ChallengeError) -> Self {
        let kind = err.kind();
        match &err {
            // Upstream detail stays in the logs
            ChallengeError::Delivery(_) => AppError::new(kind, "Failed to deliver one-time code")
                .with_action("Start a new login to receive a new code"),
            ChallengeError::Internal(_) => AppError::new(kind, "Internal error"),
            ChallengeError::SessionNotFound | ChallengeError::SessionExpired => {
                AppError::new(kind, err.to_string()).with_action("Start a new login")
            }
            ChallengeError::RateLimitExceeded => AppError::new(kind, err.to_string())
                .with_action("Wait a few minutes before requesting a new code"),
            _ => AppError::new(kind, err.to_string()),
        }
    }
}

impl IntoResponse for ChallengeError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}
