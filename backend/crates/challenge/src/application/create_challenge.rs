//! Create Challenge Use Case (issuer)

use crate::application::config::ChallengeConfig;
use crate::domain::entities::Challenge;
use crate::domain::ports::{Notification, Notifier};
use crate::domain::services::{challenge_tag, generate_code};
use crate::domain::value_objects::Identity;
use crate::error::ChallengeResult;
use std::sync::Arc;

/// Input DTO for create challenge
#[derive(Debug, Clone)]
pub struct CreateChallengeInput {
    /// Destination taken from the user's attributes
    pub identity: Option<String>,
}

/// Create Challenge Use Case
pub struct CreateChallengeUseCase<N>
where
    N: Notifier,
{
    notifier: Arc<N>,
    config: Arc<ChallengeConfig>,
}

impl<N> CreateChallengeUseCase<N>
where
    N: Notifier,
{
    pub fn new(notifier: Arc<N>, config: Arc<ChallengeConfig>) -> Self {
        Self { notifier, config }
    }

    /// Generate a code, commit it to challenge state and deliver it once
    ///
    /// On a delivery error the code is already committed; the caller
    /// decides whether to issue a new challenge or abandon the login.
    pub async fn execute(&self, input: CreateChallengeInput) -> ChallengeResult<Challenge> {
        // Validate before a secret exists
        let identity = Identity::from_attribute(input.identity)?;

        let code = generate_code(&mut rand::rng());
        let metadata = challenge_tag(&code, &self.config.metadata_secret);

        let notification = Notification {
            destination: identity.as_str().to_owned(),
            subject: self.config.email_subject.clone(),
            body: self.config.render_body(&code),
        };
        let challenge = Challenge::new(&identity, code, metadata);

        tracing::info!(
            identity = %identity,
            metadata = %challenge.metadata,
            "Issuing challenge"
        );

        self.notifier.notify(&notification).await?;

        Ok(challenge)
    }
}
