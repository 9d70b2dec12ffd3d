//! Trigger Middleware
//!
//! The trigger routes hand out private challenge parameters, so only the
//! directory holding the shared trigger key may call them.

use crate::error::ChallengeError;
use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use platform::crypto::constant_time_eq;
use std::sync::Arc;

/// Middleware state
#[derive(Clone)]
pub struct TriggerAuth {
    key: Arc<str>,
}

impl TriggerAuth {
    pub fn new(key: impl Into<Arc<str>>) -> Self {
        Self { key: key.into() }
    }
}

/// Middleware that requires `Authorization: Bearer <trigger key>`
pub async fn require_trigger_key(
    State(auth): State<TriggerAuth>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let provided = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    match provided {
        Some(token) if constant_time_eq(token.as_bytes(), auth.key.as_bytes()) => {
            next.run(req).await
        }
        _ => {
            tracing::debug!("Trigger call without a valid key");
            ChallengeError::InvalidClient.into_response()
        }
    }
}
