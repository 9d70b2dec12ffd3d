//! Verify Challenge Use Case (verifier)

use crate::domain::services::answers_match;
use crate::error::{ChallengeError, ChallengeResult};

/// Input DTO for verify challenge
#[derive(Debug, Clone)]
pub struct VerifyChallengeInput {
    /// Answer held in the challenge's private parameters
    pub expected: Option<String>,
    /// Answer the user submitted for this round
    pub submitted: Option<String>,
}

/// Output DTO for verify challenge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifyChallengeOutput {
    pub matched: bool,
}

/// Verify Challenge Use Case
///
/// Scores a single round; the attempt limit is not its concern.
#[derive(Debug, Clone, Copy, Default)]
pub struct VerifyChallengeUseCase;

impl VerifyChallengeUseCase {
    pub fn new() -> Self {
        Self
    }

    pub fn execute(&self, input: VerifyChallengeInput) -> ChallengeResult<VerifyChallengeOutput> {
        let expected = input
            .expected
            .filter(|expected| !expected.is_empty())
            .ok_or_else(|| ChallengeError::validation("Missing expected answer"))?;
        let submitted = input
            .submitted
            .ok_or_else(|| ChallengeError::validation("Missing challenge answer"))?;

        let matched = answers_match(&expected, &submitted);

        tracing::debug!(matched, "Verified challenge answer");

        Ok(VerifyChallengeOutput { matched })
    }
}
