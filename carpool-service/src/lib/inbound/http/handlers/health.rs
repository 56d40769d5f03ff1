use axum::Json;
use chrono::SecondsFormat;
use chrono::Utc;
use serde::Serialize;

/// Liveness probe. Not wrapped in the API envelope.
pub async fn health() -> Json<HealthData> {
    Json(HealthData {
        status: "ok",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthData {
    pub status: &'static str,
    pub timestamp: String,
}
