//! Respond To Challenge Use Case
//!
//! User-facing entry: submits the emailed code for a pending login.

use crate::application::config::DirectoryConfig;
use crate::domain::entities::LoginStep;
use crate::domain::ports::{ChallengeAnswer, Directory};
use crate::domain::value_objects::Identity;
use crate::error::{ChallengeError, ChallengeResult};
use kernel::id::LoginSessionId;
use std::sync::Arc;

/// Input DTO for respond to challenge
#[derive(Debug, Clone)]
pub struct RespondToChallengeInput {
    pub email: Option<String>,
    pub code: Option<String>,
    pub session: Option<String>,
}

/// Respond To Challenge Use Case
pub struct RespondToChallengeUseCase<D>
where
    D: Directory,
{
    directory: Arc<D>,
    config: Arc<DirectoryConfig>,
}

impl<D> RespondToChallengeUseCase<D>
where
    D: Directory,
{
    pub fn new(directory: Arc<D>, config: Arc<DirectoryConfig>) -> Self {
        Self { directory, config }
    }

    pub async fn execute(&self, input: RespondToChallengeInput) -> ChallengeResult<LoginStep> {
        let answer = Self::validate(input)?;

        self.directory
            .respond(&self.config.client_id, &answer)
            .await
    }

    fn validate(input: RespondToChallengeInput) -> ChallengeResult<ChallengeAnswer> {
        let present = |value: Option<String>| value.filter(|v| !v.is_empty());

        let (Some(email), Some(code), Some(session)) = (
            present(input.email),
            present(input.code),
            present(input.session),
        ) else {
            return Err(ChallengeError::validation(
                "email, code, and session are required",
            ));
        };

        let session = session
            .parse::<LoginSessionId>()
            .map_err(|e| ChallengeError::validation(e.to_string()))?;

        Ok(ChallengeAnswer {
            identity: Identity::new(email)?,
            answer: code,
            session,
        })
    }
}
