use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::AuthSessionData;
use super::FieldErrors;
use crate::domain::errors::AppError;
use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::models::LoginCommand;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<ApiSuccess<AuthSessionData>, ApiError> {
    let Json(body) = payload?;

    state
        .auth_service
        .login(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref session| ApiSuccess::new(StatusCode::OK, session.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

impl LoginRequest {
    fn try_into_command(self) -> Result<LoginCommand, AppError> {
        let mut errors = FieldErrors::default();

        let email = if errors.require("email", &self.email) {
            EmailAddress::new(self.email)
                .map_err(|_| errors.add("email", "Invalid email format"))
                .ok()
        } else {
            None
        };

        // Any non-empty password is acceptable here; rules apply at registration only.
        errors.require("password", &self.password);

        match email {
            Some(email) if errors.is_empty() => Ok(LoginCommand::new(email, self.password)),
            _ => Err(errors.into_error()),
        }
    }
}
