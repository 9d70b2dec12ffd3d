//! In-Memory Identity Directory
//!
//! Process-local stand-in for a managed identity directory. It owns the
//! attempt history of every pending login and drives the three use cases
//! in the order the protocol prescribes:
//!
//! 1. define: decide on the current history
//! 2. create: materialize a challenge when the decision is `issue`
//! 3. verify: score the user's answer, append the result, back to 1
//!
//! Only registered identities can start a login, and every code sent
//! counts against a per-identity issuance limit. A session handle is
//! consumed by the response that uses it; every new round is stored under
//! a fresh handle.

use crate::application::config::{ChallengeConfig, DirectoryConfig};
use crate::application::create_challenge::{CreateChallengeInput, CreateChallengeUseCase};
use crate::application::define_challenge::{DefineChallengeInput, DefineChallengeUseCase};
use crate::application::verify_challenge::{VerifyChallengeInput, VerifyChallengeUseCase};
use crate::domain::entities::{AuthenticationResult, Challenge, ChallengeAttempt, LoginStep, Session};
use crate::domain::ports::{ChallengeAnswer, Directory, Notifier, RateLimiter};
use crate::domain::value_objects::{CUSTOM_CHALLENGE, Decision, Identity};
use crate::error::{ChallengeError, ChallengeResult};
use chrono::Utc;
use kernel::id::{AccessTokenId, LoginSessionId};
use platform::crypto::{constant_time_eq, from_base64url, hmac_sha256, to_base64url};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// A login waiting for the user's answer
struct PendingLogin {
    identity: Identity,
    session: Session,
    challenge: Challenge,
    expires_at_ms: i64,
}

impl PendingLogin {
    fn is_expired(&self, now_ms: i64) -> bool {
        now_ms > self.expires_at_ms
    }
}

pub struct InMemoryDirectory<N, L>
where
    N: Notifier,
    L: RateLimiter,
{
    define: DefineChallengeUseCase,
    create: CreateChallengeUseCase<N>,
    verify: VerifyChallengeUseCase,
    limiter: Arc<L>,
    config: Arc<DirectoryConfig>,
    registered: RwLock<HashSet<Identity>>,
    pending: Mutex<HashMap<LoginSessionId, PendingLogin>>,
}

impl<N, L> InMemoryDirectory<N, L>
where
    N: Notifier + Sync,
    L: RateLimiter + Sync,
{
    pub fn new(
        notifier: Arc<N>,
        limiter: Arc<L>,
        challenge_config: Arc<ChallengeConfig>,
        config: Arc<DirectoryConfig>,
    ) -> Self {
        Self {
            define: DefineChallengeUseCase::new(challenge_config.clone()),
            create: CreateChallengeUseCase::new(notifier, challenge_config),
            verify: VerifyChallengeUseCase::new(),
            limiter,
            config,
            registered: RwLock::new(HashSet::new()),
            pending: Mutex::new(HashMap::new()),
        }
    }

    /// Add an account; `false` if it already existed
    pub async fn register(&self, identity: Identity) -> bool {
        let added = self.registered.write().await.insert(identity.clone());
        if added {
            tracing::info!(identity = %identity, "Identity registered");
        }
        added
    }

    pub async fn is_registered(&self, identity: &Identity) -> bool {
        self.registered.read().await.contains(identity)
    }

    /// Drop logins whose session timeout has passed
    pub async fn cleanup_expired(&self) -> usize {
        let now_ms = Utc::now().timestamp_millis();
        let mut pending = self.pending.lock().await;
        let before = pending.len();
        pending.retain(|_, login| !login.is_expired(now_ms));
        let removed = before - pending.len();

        if removed > 0 {
            tracing::info!(removed, "Cleaned up expired logins");
        }
        removed
    }

    /// Number of logins waiting for an answer
    pub async fn pending_count(&self) -> usize {
        self.pending.lock().await.len()
    }

    fn check_client(&self, client_id: &str) -> ChallengeResult<()> {
        if constant_time_eq(client_id.as_bytes(), self.config.client_id.as_bytes()) {
            Ok(())
        } else {
            Err(ChallengeError::InvalidClient)
        }
    }

    /// Run the orchestrator on `session` and act on its decision
    async fn advance(&self, identity: Identity, session: Session) -> ChallengeResult<LoginStep> {
        let defined = self.define.execute(DefineChallengeInput {
            session: Some(session.clone()),
        })?;

        match defined.decision {
            Decision::Grant => {
                tracing::info!(identity = %identity, attempts = defined.attempts, "Login granted");
                Ok(LoginStep::Authenticated(self.issue_tokens()))
            }
            Decision::Fail => {
                tracing::warn!(identity = %identity, attempts = defined.attempts, "Login failed");
                Ok(LoginStep::Failed)
            }
            Decision::Issue => {
                let allowed = self
                    .limiter
                    .check(identity.as_str(), &self.config.issue_rate_limit)
                    .await?;
                if !allowed {
                    tracing::warn!(identity = %identity, "Code issuance limit reached");
                    return Err(ChallengeError::RateLimitExceeded);
                }

                let challenge = self
                    .create
                    .execute(CreateChallengeInput {
                        identity: Some(identity.as_str().to_owned()),
                    })
                    .await?;

                let session_id = LoginSessionId::new();
                let expires_at_ms = Utc::now().timestamp_millis() + self.config.session_ttl_ms();
                self.pending.lock().await.insert(
                    session_id,
                    PendingLogin {
                        identity,
                        session,
                        challenge,
                        expires_at_ms,
                    },
                );

                tracing::debug!(session_id = %session_id, attempts = defined.attempts, "Awaiting answer");

                Ok(LoginStep::Challenged {
                    challenge_name: CUSTOM_CHALLENGE,
                    session: session_id,
                })
            }
        }
    }

    fn issue_tokens(&self) -> AuthenticationResult {
        let token_id = AccessTokenId::new();
        AuthenticationResult {
            access_token: sign_access_token(&token_id, &self.config.token_secret),
            token_type: "Bearer",
            expires_in: self.config.token_ttl_secs(),
        }
    }
}

impl<N, L> Directory for InMemoryDirectory<N, L>
where
    N: Notifier + Sync,
    L: RateLimiter + Sync,
{
    async fn initiate(&self, client_id: &str, identity: &Identity) -> ChallengeResult<LoginStep> {
        self.check_client(client_id)?;
        if !self.is_registered(identity).await {
            tracing::warn!(identity = %identity, "Login for unregistered identity");
            return Err(ChallengeError::UnknownIdentity);
        }
        tracing::info!(identity = %identity, "Login started");
        self.advance(identity.clone(), Session::new()).await
    }

    async fn respond(&self, client_id: &str, answer: &ChallengeAnswer) -> ChallengeResult<LoginStep> {
        self.check_client(client_id)?;

        let login = self
            .pending
            .lock()
            .await
            .remove(&answer.session)
            .ok_or(ChallengeError::SessionNotFound)?;

        if login.is_expired(Utc::now().timestamp_millis()) {
            return Err(ChallengeError::SessionExpired);
        }
        if login.identity != answer.identity {
            tracing::warn!(session_id = %answer.session, "Answer for a different identity");
            return Err(ChallengeError::SessionNotFound);
        }

        let verified = self.verify.execute(VerifyChallengeInput {
            expected: Some(login.challenge.private_params.answer().to_owned()),
            submitted: Some(answer.answer.clone()),
        })?;

        let session = login
            .session
            .appended(ChallengeAttempt::custom(verified.matched));

        self.advance(login.identity, session).await
    }
}

/// `base64url(token_id || HMAC-SHA256(secret, token_id))`
pub fn sign_access_token(token_id: &AccessTokenId, secret: &[u8; 32]) -> String {
    let id_bytes = token_id.as_bytes();
    let signature = hmac_sha256(secret, id_bytes);
    let mut token = Vec::with_capacity(16 + 32);
    token.extend_from_slice(id_bytes);
    token.extend_from_slice(&signature);
    to_base64url(&token)
}

/// Check a token's signature and return its ID
pub fn verify_access_token(token: &str, secret: &[u8; 32]) -> Option<AccessTokenId> {
    let data = from_base64url(token).ok()?;
    if data.len() != 48 {
        return None;
    }

    let id_bytes: [u8; 16] = data[..16].try_into().ok()?;
    let expected = hmac_sha256(secret, &id_bytes);
    if !constant_time_eq(&data[16..], &expected) {
        return None;
    }

    Some(AccessTokenId::from_bytes(id_bytes))
}
