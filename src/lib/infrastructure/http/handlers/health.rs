//! Health check handler

use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always `ok` while the process is serving requests
    #[schema(example = "ok")]
    pub status: String,

    /// The service name
    #[schema(example = "gmail-api-service")]
    pub service: String,
}

/// Report that the service is up
#[utoipa::path(
    get,
    operation_id = "health",
    tag = "System",
    path = "/health",
    responses(
        (status = StatusCode::OK, description = "Service is up", body = HealthResponse),
    )
)]
pub async fn handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: "gmail-api-service".to_string(),
    })
}
