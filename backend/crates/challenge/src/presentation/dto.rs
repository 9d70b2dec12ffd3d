//! API DTOs (Data Transfer Objects)
//!
//! Trigger DTOs are exchanged with the directory only. Login DTOs reach
//! the end user and never carry private parameters or metadata.

use crate::domain::entities::{AuthenticationResult, Challenge, ChallengeAttempt, Session};
use crate::domain::value_objects::Decision;
use serde::{Deserialize, Serialize};

// ============================================================================
// Directory triggers
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeAttemptDto {
    pub challenge_name: String,
    pub challenge_result: bool,
}

/// Request for POST /define
#[derive(Debug, Clone, Deserialize)]
pub struct DefineChallengeRequest {
    pub session: Option<Vec<ChallengeAttemptDto>>,
}

impl DefineChallengeRequest {
    pub fn into_session(self) -> Option<Session> {
        self.session.map(|attempts| {
            attempts
                .into_iter()
                .map(|a| ChallengeAttempt::new(a.challenge_name, a.challenge_result))
                .collect()
        })
    }
}

/// Response for POST /define
#[derive(Debug, Clone, Serialize)]
pub struct DefineChallengeResponse {
    pub action: Decision,
}

/// Request for POST /create
#[derive(Debug, Clone, Deserialize)]
pub struct CreateChallengeRequest {
    pub identity: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PublicParamsDto {
    pub identity: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PrivateParamsDto {
    pub answer: String,
}

/// Response for POST /create
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChallengeResponse {
    pub public_params: PublicParamsDto,
    pub private_params: PrivateParamsDto,
    pub metadata: String,
}

impl From<Challenge> for CreateChallengeResponse {
    fn from(challenge: Challenge) -> Self {
        Self {
            private_params: PrivateParamsDto {
                answer: challenge.private_params.answer().to_owned(),
            },
            public_params: PublicParamsDto {
                identity: challenge.public_params.identity,
            },
            metadata: challenge.metadata,
        }
    }
}

/// Request for POST /verify
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyChallengeRequest {
    pub expected: Option<String>,
    pub submitted: Option<String>,
}

/// Response for POST /verify
#[derive(Debug, Clone, Serialize)]
pub struct VerifyChallengeResponse {
    #[serde(rename = "match")]
    pub matched: bool,
}

// ============================================================================
// Login (user-facing)
// ============================================================================

/// Request for POST /start
#[derive(Debug, Clone, Deserialize)]
pub struct StartLoginRequest {
    pub email: Option<String>,
}

/// Request for POST /respond
#[derive(Debug, Clone, Deserialize)]
pub struct RespondRequest {
    pub email: Option<String>,
    pub code: Option<String>,
    pub session: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationResultDto {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: u64,
}

impl From<AuthenticationResult> for AuthenticationResultDto {
    fn from(result: AuthenticationResult) -> Self {
        Self {
            access_token: result.access_token,
            token_type: result.token_type,
            expires_in: result.expires_in,
        }
    }
}

/// Response for POST /start and POST /respond
///
/// Either a next challenge (`challengeName` + `session`) or tokens.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication_result: Option<AuthenticationResultDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub challenge_name: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<String>,
}
