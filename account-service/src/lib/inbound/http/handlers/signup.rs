use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::credential::errors::PasswordPolicyError;
use crate::credential::models::Password;
use crate::credential::models::SignupCommand;
use crate::inbound::http::router::AppState;
use crate::user::errors::FullNameError;
use crate::user::errors::UsernameError;
use crate::user::models::FullName;
use crate::user::models::Username;

pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let Json(body) = payload?;

    state
        .auth_service
        .signup(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, user.into()))
}

/// HTTP request body for registering an account (raw JSON).
///
/// Missing fields deserialize as empty strings so they fail validation
/// with a readable message instead of a parse error.
#[derive(Default, Deserialize)]
#[serde(default)]
pub struct SignupRequest {
    username: String,
    fullname: String,
    password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseSignupRequestError {
    #[error("Invalid username: {0}")]
    Username(#[from] UsernameError),

    #[error("Invalid full name: {0}")]
    FullName(#[from] FullNameError),

    #[error("Invalid password: {0}")]
    Password(#[from] PasswordPolicyError),
}

impl SignupRequest {
    fn try_into_command(self) -> Result<SignupCommand, ParseSignupRequestError> {
        let username = Username::new(self.username)?;
        let fullname = FullName::new(self.fullname)?;
        let password = Password::new(self.password)?;
        Ok(SignupCommand::new(username, fullname, password))
    }
}

impl From<ParseSignupRequestError> for ApiError {
    fn from(err: ParseSignupRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}
