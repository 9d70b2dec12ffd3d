//! Start Login Use Case
//!
//! User-facing entry: begins a custom-challenge login for an email.

use crate::application::config::DirectoryConfig;
use crate::domain::entities::LoginStep;
use crate::domain::ports::Directory;
use crate::domain::value_objects::Identity;
use crate::error::{ChallengeError, ChallengeResult};
use std::sync::Arc;

/// Input DTO for start login
#[derive(Debug, Clone)]
pub struct StartLoginInput {
    pub email: Option<String>,
}

/// Start Login Use Case
pub struct StartLoginUseCase<D>
where
    D: Directory,
{
    directory: Arc<D>,
    config: Arc<DirectoryConfig>,
}

impl<D> StartLoginUseCase<D>
where
    D: Directory,
{
    pub fn new(directory: Arc<D>, config: Arc<DirectoryConfig>) -> Self {
        Self { directory, config }
    }

    pub async fn execute(&self, input: StartLoginInput) -> ChallengeResult<LoginStep> {
        let identity = input
            .email
            .filter(|email| !email.trim().is_empty())
            .ok_or_else(|| ChallengeError::validation("Missing email in request body"))
            .and_then(Identity::new)?;

        self.directory
            .initiate(&self.config.client_id, &identity)
            .await
    }
}
