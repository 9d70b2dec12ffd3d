//! Challenge Routers

use crate::application::config::{ChallengeConfig, DirectoryConfig};
use crate::domain::ports::{Directory, Notifier};
use crate::presentation::handlers::{self, LoginState, TriggerState};
use crate::presentation::middleware::{TriggerAuth, require_trigger_key};
use axum::{Router, middleware, routing::post};
use std::sync::Arc;

/// Directory-facing trigger routes, guarded by the trigger key
pub fn trigger_router<N>(
    notifier: Arc<N>,
    config: Arc<ChallengeConfig>,
    trigger_key: impl Into<Arc<str>>,
) -> Router
where
    N: Notifier + Sync + 'static,
{
    let state = TriggerState { notifier, config };

    Router::new()
        .route("/define", post(handlers::define_challenge::<N>))
        .route("/create", post(handlers::create_challenge::<N>))
        .route("/verify", post(handlers::verify_challenge))
        .layer(middleware::from_fn_with_state(
            TriggerAuth::new(trigger_key),
            require_trigger_key,
        ))
        .with_state(state)
}

/// User-facing login routes
pub fn login_router<D>(directory: Arc<D>, config: Arc<DirectoryConfig>) -> Router
where
    D: Directory + Sync + 'static,
{
    let state = LoginState { directory, config };

    Router::new()
        .route("/start", post(handlers::start_login::<D>))
        .route("/respond", post(handlers::respond_to_challenge::<D>))
        .with_state(state)
}
