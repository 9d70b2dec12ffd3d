//! HTTP Handlers

use crate::application::config::{ChallengeConfig, DirectoryConfig};
use crate::application::create_challenge::{CreateChallengeInput, CreateChallengeUseCase};
use crate::application::define_challenge::{DefineChallengeInput, DefineChallengeUseCase};
use crate::application::respond_to_challenge::{
    RespondToChallengeInput, RespondToChallengeUseCase,
};
use crate::application::start_login::{StartLoginInput, StartLoginUseCase};
use crate::application::verify_challenge::{VerifyChallengeInput, VerifyChallengeUseCase};
use crate::domain::entities::LoginStep;
use crate::domain::ports::{Directory, Notifier};
use crate::error::{ChallengeError, ChallengeResult};
use crate::presentation::dto::{
    CreateChallengeRequest, CreateChallengeResponse, DefineChallengeRequest,
    DefineChallengeResponse, LoginResponse, RespondRequest, StartLoginRequest,
    VerifyChallengeRequest, VerifyChallengeResponse,
};
use axum::Json;
use axum::extract::State;
use std::sync::Arc;

/// Shared state for the directory trigger handlers
pub struct TriggerState<N>
where
    N: Notifier,
{
    pub notifier: Arc<N>,
    pub config: Arc<ChallengeConfig>,
}

impl<N> Clone for TriggerState<N>
where
    N: Notifier,
{
    fn clone(&self) -> Self {
        Self {
            notifier: self.notifier.clone(),
            config: self.config.clone(),
        }
    }
}

/// Shared state for the login handlers
pub struct LoginState<D>
where
    D: Directory,
{
    pub directory: Arc<D>,
    pub config: Arc<DirectoryConfig>,
}

impl<D> Clone for LoginState<D>
where
    D: Directory,
{
    fn clone(&self) -> Self {
        Self {
            directory: self.directory.clone(),
            config: self.config.clone(),
        }
    }
}

/// POST /define
pub async fn define_challenge<N>(
    State(state): State<TriggerState<N>>,
    Json(req): Json<DefineChallengeRequest>,
) -> ChallengeResult<Json<DefineChallengeResponse>>
where
    N: Notifier + Sync + 'static,
{
    let use_case = DefineChallengeUseCase::new(state.config.clone());

    let output = use_case.execute(DefineChallengeInput {
        session: req.into_session(),
    })?;

    Ok(Json(DefineChallengeResponse {
        action: output.decision,
    }))
}

/// POST /create
pub async fn create_challenge<N>(
    State(state): State<TriggerState<N>>,
    Json(req): Json<CreateChallengeRequest>,
) -> ChallengeResult<Json<CreateChallengeResponse>>
where
    N: Notifier + Sync + 'static,
{
    let use_case = CreateChallengeUseCase::new(state.notifier.clone(), state.config.clone());

    let challenge = use_case
        .execute(CreateChallengeInput {
            identity: req.identity,
        })
        .await?;

    Ok(Json(challenge.into()))
}

/// POST /verify
pub async fn verify_challenge(
    Json(req): Json<VerifyChallengeRequest>,
) -> ChallengeResult<Json<VerifyChallengeResponse>> {
    let output = VerifyChallengeUseCase::new().execute(VerifyChallengeInput {
        expected: req.expected,
        submitted: req.submitted,
    })?;

    Ok(Json(VerifyChallengeResponse {
        matched: output.matched,
    }))
}

/// POST /start
pub async fn start_login<D>(
    State(state): State<LoginState<D>>,
    Json(req): Json<StartLoginRequest>,
) -> ChallengeResult<Json<LoginResponse>>
where
    D: Directory + Sync + 'static,
{
    let use_case = StartLoginUseCase::new(state.directory.clone(), state.config.clone());

    let step = use_case.execute(StartLoginInput { email: req.email }).await?;

    login_response(step)
}

/// POST /respond
pub async fn respond_to_challenge<D>(
    State(state): State<LoginState<D>>,
    Json(req): Json<RespondRequest>,
) -> ChallengeResult<Json<LoginResponse>>
where
    D: Directory + Sync + 'static,
{
    let use_case = RespondToChallengeUseCase::new(state.directory.clone(), state.config.clone());

    let step = use_case
        .execute(RespondToChallengeInput {
            email: req.email,
            code: req.code,
            session: req.session,
        })
        .await?;

    login_response(step)
}

fn login_response(step: LoginStep) -> ChallengeResult<Json<LoginResponse>> {
    match step {
        LoginStep::Challenged {
            challenge_name,
            session,
        } => Ok(Json(LoginResponse {
            challenge_name: Some(challenge_name),
            session: Some(session.to_string()),
            ..Default::default()
        })),
        LoginStep::Authenticated(result) => Ok(Json(LoginResponse {
            authentication_result: Some(result.into()),
            ..Default::default()
        })),
        LoginStep::Failed => Err(ChallengeError::AuthenticationFailed),
    }
}
