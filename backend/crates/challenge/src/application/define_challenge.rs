//! Define Challenge Use Case (orchestrator)

use crate::application::config::ChallengeConfig;
use crate::domain::entities::Session;
use crate::domain::services::decide;
use crate::domain::value_objects::Decision;
use crate::error::{ChallengeError, ChallengeResult};
use std::sync::Arc;

/// Input DTO for define challenge
#[derive(Debug, Clone)]
pub struct DefineChallengeInput {
    /// Attempt history; `None` when the directory sent none at all
    pub session: Option<Session>,
}

/// Output DTO for define challenge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefineChallengeOutput {
    pub decision: Decision,
    pub attempts: usize,
}

/// Define Challenge Use Case
pub struct DefineChallengeUseCase {
    config: Arc<ChallengeConfig>,
}

impl DefineChallengeUseCase {
    pub fn new(config: Arc<ChallengeConfig>) -> Self {
        Self { config }
    }

    pub fn execute(&self, input: DefineChallengeInput) -> ChallengeResult<DefineChallengeOutput> {
        let session = input
            .session
            .ok_or_else(|| ChallengeError::validation("Missing session"))?;

        let decision = decide(&session, self.config.attempt_limit);

        tracing::debug!(
            attempts = session.len(),
            decision = %decision,
            "Defined next challenge step"
        );

        Ok(DefineChallengeOutput {
            decision,
            attempts: session.len(),
        })
    }
}
