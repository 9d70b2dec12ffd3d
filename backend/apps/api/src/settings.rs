//! Startup Settings
//!
//! Reads the environment once at boot. Missing optional values fall back
//! to development defaults; malformed values abort startup.

use anyhow::{Context, bail};
use challenge::domain::value_objects::{AttemptLimit, Identity};
use challenge::{
    ChallengeConfig, ConfiguredNotifier, DirectoryConfig, HttpNotifier, HttpNotifierConfig,
    LogNotifier,
};
use platform::crypto::from_base64;
use platform::rate_limit::RateLimitConfig;
use std::env;
use std::net::SocketAddr;

pub struct Settings {
    pub challenge: ChallengeConfig,
    pub directory: DirectoryConfig,
    pub notifier: ConfiguredNotifier,
    /// Accounts allowed to request a code
    pub registered_identities: Vec<Identity>,
    pub trigger_key: Option<String>,
    pub frontend_origins: String,
    pub bind_addr: SocketAddr,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        let mut challenge = ChallengeConfig::with_random_secret();
        if let Some(raw) = var("CHALLENGE_MAX_ATTEMPTS") {
            let attempts: u8 = raw
                .parse()
                .context("CHALLENGE_MAX_ATTEMPTS must be a number")?;
            challenge.attempt_limit = AttemptLimit::new(attempts).with_context(|| {
                format!(
                    "CHALLENGE_MAX_ATTEMPTS must be between {} and {}",
                    AttemptLimit::MIN,
                    AttemptLimit::MAX
                )
            })?;
        }

        let mut directory = match var("LOGIN_TOKEN_SECRET") {
            Some(secret_b64) => DirectoryConfig {
                token_secret: decode_secret(&secret_b64)?,
                ..DirectoryConfig::default()
            },
            None if cfg!(debug_assertions) => DirectoryConfig::development(),
            None => bail!("LOGIN_TOKEN_SECRET must be set in production"),
        };
        if let Some(client_id) = var("DIRECTORY_CLIENT_ID") {
            directory.client_id = client_id;
        }
        if let Some(raw) = var("ISSUE_RATE_LIMIT_MAX") {
            let max_requests = raw
                .parse()
                .context("ISSUE_RATE_LIMIT_MAX must be a number")?;
            directory.issue_rate_limit.max_requests = max_requests;
        }
        if let Some(raw) = var("ISSUE_RATE_LIMIT_WINDOW_SECS") {
            let secs = raw
                .parse()
                .context("ISSUE_RATE_LIMIT_WINDOW_SECS must be a number of seconds")?;
            directory.issue_rate_limit = RateLimitConfig::new(directory.issue_rate_limit.max_requests, secs);
        }

        let registered_identities = parse_identities(&var("REGISTERED_IDENTITIES").unwrap_or_default());
        if registered_identities.is_empty() {
            tracing::warn!("REGISTERED_IDENTITIES not set, every login will be rejected");
        }

        let notifier = match var("NOTIFIER_ENDPOINT") {
            Some(endpoint) => {
                let api_key = var("NOTIFIER_API_KEY")
                    .context("NOTIFIER_API_KEY must be set with NOTIFIER_ENDPOINT")?;
                let sender = var("NOTIFIER_SENDER")
                    .context("NOTIFIER_SENDER must be set with NOTIFIER_ENDPOINT")?;
                ConfiguredNotifier::Http(HttpNotifier::new(HttpNotifierConfig::new(
                    endpoint, api_key, sender,
                ))?)
            }
            None => {
                tracing::warn!("NOTIFIER_ENDPOINT not set, codes are written to the log");
                ConfiguredNotifier::Log(LogNotifier)
            }
        };

        let bind_addr = var("BIND_ADDR")
            .unwrap_or_else(|| "0.0.0.0:31113".to_string())
            .parse()
            .context("BIND_ADDR must be host:port")?;

        Ok(Self {
            challenge,
            directory,
            notifier,
            registered_identities,
            trigger_key: var("TRIGGER_API_KEY"),
            frontend_origins: var("FRONTEND_ORIGINS")
                .unwrap_or_else(|| "http://localhost:40922,http://127.0.0.1:40922".to_string()),
            bind_addr,
        })
    }
}

/// Non-empty environment value
fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Comma-separated addresses; blank entries are skipped
fn parse_identities(raw: &str) -> Vec<Identity> {
    raw.split(',')
        .filter_map(|entry| Identity::new(entry.trim()).ok())
        .collect()
}

fn decode_secret(secret_b64: &str) -> anyhow::Result<[u8; 32]> {
    let bytes = from_base64(secret_b64.trim())
        .context("LOGIN_TOKEN_SECRET must be base64")?;
    bytes
        .try_into()
        .map_err(|b: Vec<u8>| anyhow::anyhow!("LOGIN_TOKEN_SECRET must be 32 bytes, got {}", b.len()))
}
