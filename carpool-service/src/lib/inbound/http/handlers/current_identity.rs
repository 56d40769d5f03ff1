use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedIdentity;

pub async fn current_identity(
    Extension(identity): Extension<AuthenticatedIdentity>,
) -> Result<ApiSuccess<CurrentIdentityData>, ApiError> {
    Ok(ApiSuccess::new(
        StatusCode::OK,
        CurrentIdentityData {
            user_id: identity.identity_id,
            role: identity.role,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentIdentityData {
    pub user_id: String,
    pub role: String,
}
