use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use super::status::status_for_code;
use crate::domain::errors::AppError;
use crate::domain::errors::ValidationDetails;
use crate::domain::identity::models::AuthSession;

pub mod change_role;
pub mod current_identity;
pub mod health;
pub mod login;
pub mod register;

const INTERNAL_ERROR_MESSAGE: &str = "An unexpected error occurred";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// Boundary wrapper that renders an [`AppError`] through the code registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError(AppError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        status_for_code(self.0.code())
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        Self(AppError::validation(
            "Invalid request body",
            ValidationDetails::new(),
        ))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(code = self.0.code(), "Request failed: {}", self.0);
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            self.0.message().to_string()
        };

        let details = self.0.details().filter(|d| !d.is_empty()).cloned();

        (
            status,
            Json(ApiErrorBody {
                success: false,
                error: ApiErrorData {
                    code: self.0.code().to_string(),
                    message,
                    details,
                },
            }),
        )
            .into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    success: bool,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    success: bool,
    error: ApiErrorData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<ValidationDetails>,
}

/// Response data shared by register and login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSessionData {
    pub user_id: String,
    pub token: String,
}

impl From<&AuthSession> for AuthSessionData {
    fn from(session: &AuthSession) -> Self {
        Self {
            user_id: session.identity_id.to_string(),
            token: session.token.clone(),
        }
    }
}

/// Collects per-field validation messages for a request body.
#[derive(Debug, Default)]
pub(crate) struct FieldErrors(ValidationDetails);

impl FieldErrors {
    pub(crate) fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub(crate) fn require(&mut self, field: &str, value: &str) -> bool {
        if value.trim().is_empty() {
            self.add(field, format!("{} is required", field));
            return false;
        }
        true
    }

    pub(crate) fn max_len(&mut self, field: &str, value: &str, max: usize) -> bool {
        if value.chars().count() > max {
            self.add(field, format!("{} must be at most {} characters", field, max));
            return false;
        }
        true
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn into_error(self) -> AppError {
        AppError::validation("Validation failed", self.0)
    }
}
