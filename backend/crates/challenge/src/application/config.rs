//! Application Configuration
//!
//! Configuration for the challenge protocol and the login directory.

use crate::domain::value_objects::{AttemptLimit, OtpCode};
use platform::crypto::random_secret;
use platform::rate_limit::RateLimitConfig;
use std::time::Duration;

/// Placeholder substituted with the code in the email body
pub const CODE_PLACEHOLDER: &str = "{code}";

/// Protocol configuration
#[derive(Debug, Clone)]
pub struct ChallengeConfig {
    /// Failed rounds before the login fails permanently
    pub attempt_limit: AttemptLimit,
    /// Email subject
    pub email_subject: String,
    /// Plain-text body; `{code}` is replaced with the code
    pub email_body_template: String,
    /// Key for the challenge metadata tag (32 bytes)
    pub metadata_secret: [u8; 32],
}

impl Default for ChallengeConfig {
    fn default() -> Self {
        Self {
            attempt_limit: AttemptLimit::DEFAULT,
            email_subject: "Your OTP Code".to_string(),
            email_body_template: "Your verification code is: {code}".to_string(),
            metadata_secret: [0u8; 32],
        }
    }
}

impl ChallengeConfig {
    /// Create config with a random metadata key
    pub fn with_random_secret() -> Self {
        Self {
            metadata_secret: random_secret(),
            ..Default::default()
        }
    }

    pub fn render_body(&self, code: &OtpCode) -> String {
        self.email_body_template
            .replace(CODE_PLACEHOLDER, code.as_str())
    }
}

/// Login directory configuration
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    /// Client registration the login endpoints present to the directory
    pub client_id: String,
    /// Directory session timeout; an unanswered code dies with it
    pub session_ttl: Duration,
    /// Lifetime advertised for issued access tokens
    pub token_ttl: Duration,
    /// Access token signing key (32 bytes)
    pub token_secret: [u8; 32],
    /// Codes one identity may be sent per window
    pub issue_rate_limit: RateLimitConfig,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            client_id: "otp-login".to_string(),
            session_ttl: Duration::from_secs(180),
            token_ttl: Duration::from_secs(3600),
            token_secret: [0u8; 32],
            issue_rate_limit: RateLimitConfig::default(),
        }
    }
}

impl DirectoryConfig {
    /// Create config with a random signing key
    pub fn with_random_secret() -> Self {
        Self {
            token_secret: random_secret(),
            ..Default::default()
        }
    }

    /// Development config; a fresh key on every start
    pub fn development() -> Self {
        Self {
            client_id: "otp-login-dev".to_string(),
            ..Self::with_random_secret()
        }
    }

    pub fn session_ttl_ms(&self) -> i64 {
        self.session_ttl.as_millis() as i64
    }

    pub fn token_ttl_secs(&self) -> u64 {
        self.token_ttl.as_secs()
    }
}
