//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request errors render through
//! `challenge::AppError`.

mod settings;

use axum::{
    Router, http,
    http::{Method, header},
};
use challenge::{InMemoryDirectory, InMemoryRateLimiter, login_router, trigger_router};
use settings::Settings;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,challenge=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::from_env()?;

    tracing::info!(
        client_id = %settings.directory.client_id,
        max_attempts = settings.challenge.attempt_limit.get(),
        "Challenge configuration loaded"
    );

    let challenge_config = Arc::new(settings.challenge);
    let directory_config = Arc::new(settings.directory);
    let notifier = Arc::new(settings.notifier);

    let limiter = Arc::new(InMemoryRateLimiter::new());

    let directory = Arc::new(InMemoryDirectory::new(
        notifier.clone(),
        limiter.clone(),
        challenge_config.clone(),
        directory_config.clone(),
    ));
    for identity in settings.registered_identities {
        directory.register(identity).await;
    }

    // Unanswered logins die with their session timeout
    let cleanup_directory = directory.clone();
    let cleanup_config = directory_config.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(CLEANUP_INTERVAL);
        loop {
            interval.tick().await;
            cleanup_directory.cleanup_expired().await;
            limiter.cleanup_expired(&cleanup_config.issue_rate_limit).await;
        }
    });

    // CORS configuration
    let allowed_origins: Vec<http::HeaderValue> = settings
        .frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([Method::POST, Method::OPTIONS]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]));

    // Build router
    let mut app = Router::new().nest("/api/otp", login_router(directory, directory_config));

    match settings.trigger_key {
        Some(key) => {
            app = app.nest(
                "/api/auth/triggers",
                trigger_router(notifier, challenge_config, key),
            );
        }
        None => tracing::info!("TRIGGER_API_KEY not set, trigger routes disabled"),
    }

    let app = app.layer(TraceLayer::new_for_http()).layer(cors);

    // Start server
    tracing::info!("Listening on {}", settings.bind_addr);

    let listener = TcpListener::bind(settings.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
