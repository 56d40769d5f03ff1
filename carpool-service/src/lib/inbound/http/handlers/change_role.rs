use auth::Role;
use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::FieldErrors;
use crate::domain::errors::AppError;
use crate::domain::identity::models::ProfileId;
use crate::inbound::http::router::AppState;

/// Promote or demote the credential behind a profile. Admin only.
pub async fn change_role(
    State(state): State<AppState>,
    Path(profile_id): Path<String>,
    payload: Result<Json<ChangeRoleRequest>, JsonRejection>,
) -> Result<ApiSuccess<ChangeRoleResponseData>, ApiError> {
    let Json(body) = payload?;
    let (profile_id, role) = body.try_into_parts(&profile_id)?;

    state
        .auth_service
        .change_role(&profile_id, role)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ChangeRoleResponseData {
            user_id: profile_id.to_string(),
            role: role.to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChangeRoleRequest {
    #[serde(default)]
    role: String,
}

impl ChangeRoleRequest {
    fn try_into_parts(self, profile_id: &str) -> Result<(ProfileId, Role), AppError> {
        let mut errors = FieldErrors::default();

        let profile_id = ProfileId::from_string(profile_id)
            .map_err(|e| errors.add("id", e.to_string()))
            .ok();

        let role = self
            .role
            .parse::<Role>()
            .map_err(|e| errors.add("role", e.to_string()))
            .ok();

        match (profile_id, role) {
            (Some(profile_id), Some(role)) => Ok((profile_id, role)),
            _ => Err(errors.into_error()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRoleResponseData {
    pub user_id: String,
    pub role: String,
}
