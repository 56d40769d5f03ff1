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
use crate::domain::identity::models::NewProfile;
use crate::domain::identity::models::RegisterCommand;
use crate::inbound::http::router::AppState;

const MIN_PASSWORD_LEN: usize = 8;
// Column widths of the credentials and profiles tables.
const MAX_EMAIL_LEN: usize = 255;
const MAX_NAME_LEN: usize = 100;
const MAX_PHONE_LEN: usize = 32;

pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<ApiSuccess<AuthSessionData>, ApiError> {
    let Json(body) = payload?;

    state
        .auth_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref session| ApiSuccess::new(StatusCode::CREATED, session.into()))
}

/// HTTP request body for registration (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    confirm_password: String,
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    #[serde(default)]
    phone: String,
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterCommand, AppError> {
        let mut errors = FieldErrors::default();

        let email = if errors.require("email", &self.email)
            && errors.max_len("email", &self.email, MAX_EMAIL_LEN)
        {
            EmailAddress::new(self.email)
                .map_err(|_| errors.add("email", "Invalid email format"))
                .ok()
        } else {
            None
        };

        if errors.require("password", &self.password) {
            if self.password.chars().count() < MIN_PASSWORD_LEN {
                errors.add(
                    "password",
                    format!("password must be at least {} characters", MIN_PASSWORD_LEN),
                );
            }
            if !is_complex_enough(&self.password) {
                errors.add(
                    "password",
                    "Password must contain at least one lowercase, one uppercase, and one number",
                );
            }
        }

        if errors.require("confirmPassword", &self.confirm_password)
            && self.confirm_password != self.password
        {
            errors.add("confirmPassword", "Passwords do not match");
        }

        if errors.require("firstName", &self.first_name) {
            errors.max_len("firstName", &self.first_name, MAX_NAME_LEN);
        }
        if errors.require("lastName", &self.last_name) {
            errors.max_len("lastName", &self.last_name, MAX_NAME_LEN);
        }
        if errors.require("phone", &self.phone) {
            errors.max_len("phone", &self.phone, MAX_PHONE_LEN);
        }

        match email {
            Some(email) if errors.is_empty() => Ok(RegisterCommand::new(
                email,
                self.password,
                NewProfile {
                    first_name: self.first_name,
                    last_name: self.last_name,
                    phone: self.phone,
                },
            )),
            _ => Err(errors.into_error()),
        }
    }
}

fn is_complex_enough(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
}
