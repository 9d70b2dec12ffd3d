//! Ports
//!
//! Capabilities injected into the use cases. Implementations live in the
//! infrastructure layer; tests substitute fakes.

use crate::domain::entities::LoginStep;
use crate::domain::value_objects::Identity;
use crate::error::ChallengeResult;
use kernel::id::LoginSessionId;
use platform::rate_limit::RateLimitConfig;
use std::fmt;

/// One out-of-band message
#[derive(Clone, PartialEq, Eq)]
pub struct Notification {
    pub destination: String,
    pub subject: String,
    pub body: String,
}

impl fmt::Debug for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notification")
            .field("destination", &self.destination)
            .field("subject", &self.subject)
            .field("body", &"<redacted>")
            .finish()
    }
}

/// Out-of-band delivery channel (email)
#[trait_variant::make(Notifier: Send)]
pub trait LocalNotifier {
    /// Deliver once; failures surface as `ChallengeError::Delivery`
    async fn notify(&self, notification: &Notification) -> ChallengeResult<()>;
}

/// A user's answer to the current round of a login
#[derive(Clone)]
pub struct ChallengeAnswer {
    pub identity: Identity,
    pub answer: String,
    pub session: LoginSessionId,
}

impl fmt::Debug for ChallengeAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChallengeAnswer")
            .field("identity", &self.identity)
            .field("answer", &"<redacted>")
            .field("session", &self.session)
            .finish()
    }
}

/// Identity directory that owns login sessions and drives the protocol
#[trait_variant::make(Directory: Send)]
pub trait LocalDirectory {
    /// Begin a custom-challenge login for `identity`
    async fn initiate(&self, client_id: &str, identity: &Identity) -> ChallengeResult<LoginStep>;

    /// Score an answer and advance the login
    async fn respond(&self, client_id: &str, answer: &ChallengeAnswer)
    -> ChallengeResult<LoginStep>;
}

/// Per-key request counter
#[trait_variant::make(RateLimiter: Send)]
pub trait LocalRateLimiter {
    /// Count one request for `key`; `false` once its window is used up
    async fn check(&self, key: &str, config: &RateLimitConfig) -> ChallengeResult<bool>;
}
