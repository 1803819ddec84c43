use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use crate::credential::models::LoginCommand;
use crate::credential::models::Password;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let Json(body) = payload?;

    state
        .auth_service
        .login(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|token| ApiSuccess::new(StatusCode::OK, LoginResponseData { token }))
}

#[derive(Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
enum ParseLoginRequestError {
    #[error("Username is required")]
    MissingUsername,

    #[error("Password is required")]
    MissingPassword,
}

impl LoginRequest {
    // Only presence is checked here; anything else is a failed login.
    fn try_into_command(self) -> Result<LoginCommand, ParseLoginRequestError> {
        if self.username.trim().is_empty() {
            return Err(ParseLoginRequestError::MissingUsername);
        }
        if self.password.is_empty() {
            return Err(ParseLoginRequestError::MissingPassword);
        }
        Ok(LoginCommand::new(
            self.username,
            Password::presented(self.password),
        ))
    }
}

impl From<ParseLoginRequestError> for ApiError {
    fn from(err: ParseLoginRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub token: String,
}
