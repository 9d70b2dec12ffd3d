//! Domain Entities
//!
//! Core business entities for the challenge domain.

use crate::domain::value_objects::{CUSTOM_CHALLENGE, Identity, OtpCode};
use kernel::id::LoginSessionId;
use std::fmt;

/// Outcome of one issue/verify round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeAttempt {
    pub challenge_name: String,
    pub challenge_result: bool,
}

impl ChallengeAttempt {
    pub fn new(challenge_name: impl Into<String>, challenge_result: bool) -> Self {
        Self {
            challenge_name: challenge_name.into(),
            challenge_result,
        }
    }

    /// A `CUSTOM_CHALLENGE` round with the given result
    pub fn custom(challenge_result: bool) -> Self {
        Self::new(CUSTOM_CHALLENGE, challenge_result)
    }
}

/// Ordered attempt history of one login
///
/// Append-only: [`Session::appended`] returns a new history and leaves
/// the receiver untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    attempts: Vec<ChallengeAttempt>,
}

impl Session {
    /// Empty history, as at login start
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_attempts(attempts: Vec<ChallengeAttempt>) -> Self {
        Self { attempts }
    }

    pub fn attempts(&self) -> &[ChallengeAttempt] {
        &self.attempts
    }

    pub fn len(&self) -> usize {
        self.attempts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attempts.is_empty()
    }

    /// Most recent round, if any
    pub fn last(&self) -> Option<&ChallengeAttempt> {
        self.attempts.last()
    }

    pub fn appended(&self, attempt: ChallengeAttempt) -> Self {
        let mut attempts = Vec::with_capacity(self.attempts.len() + 1);
        attempts.extend_from_slice(&self.attempts);
        attempts.push(attempt);
        Self { attempts }
    }
}

impl FromIterator<ChallengeAttempt> for Session {
    fn from_iter<I: IntoIterator<Item = ChallengeAttempt>>(iter: I) -> Self {
        Self::from_attempts(iter.into_iter().collect())
    }
}

/// Data safe to show the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicParams {
    pub identity: String,
}

/// Server-held secret for one round
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateParams {
    answer: OtpCode,
}

impl PrivateParams {
    pub fn answer(&self) -> &str {
        self.answer.as_str()
    }
}

impl fmt::Debug for PrivateParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateParams")
            .field("answer", &self.answer)
            .finish()
    }
}

/// Challenge state for one round, produced by the issuer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    pub public_params: PublicParams,
    pub private_params: PrivateParams,
    /// Opaque diagnostics tag; does not reveal the answer
    pub metadata: String,
}

impl Challenge {
    pub fn new(identity: &Identity, answer: OtpCode, metadata: String) -> Self {
        Self {
            public_params: PublicParams {
                identity: identity.as_str().to_owned(),
            },
            private_params: PrivateParams { answer },
            metadata,
        }
    }
}

/// Tokens handed out when the orchestrator grants
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: u64,
}

/// Where a login stands after the directory processed a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginStep {
    /// A fresh code was sent; answer it with this session handle
    Challenged {
        challenge_name: &'static str,
        session: LoginSessionId,
    },
    Authenticated(AuthenticationResult),
    /// Attempt limit reached; no tokens
    Failed,
}
