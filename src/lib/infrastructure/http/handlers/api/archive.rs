//! Archive message handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    domain::mail::{AccessToken, ArchiveRequest, MailService},
    infrastructure::http::{
        errors::ApiError,
        handlers::{json_body, present},
        state::AppState,
    },
};

/// Archive request body
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct ArchiveBody {
    /// The Gmail message id
    #[schema(example = "18c2f0a4b5d6e7f8")]
    gmail_id: Option<String>,

    /// The caller's OAuth access token
    access_token: Option<String>,
}

impl TryFrom<ArchiveBody> for ArchiveRequest {
    type Error = ApiError;

    fn try_from(body: ArchiveBody) -> Result<Self, Self::Error> {
        match (present(body.gmail_id), present(body.access_token)) {
            (Some(message_id), Some(access_token)) => Ok(Self {
                message_id,
                access_token: AccessToken::new(access_token),
            }),
            _ => Err(ApiError::new_400(
                "Missing required fields: gmail_id and access_token",
            )),
        }
    }
}

/// Archive response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ArchiveResponse {
    success: bool,

    #[schema(example = "Email archived successfully")]
    message: String,

    #[schema(example = "18c2f0a4b5d6e7f8")]
    gmail_id: String,
}

/// Archive a message by removing it from the inbox
#[utoipa::path(
    post,
    operation_id = "archive_message",
    tag = "Mail",
    path = "/api/archive",
    request_body = ArchiveBody,
    responses(
        (status = StatusCode::OK, description = "Message archived", body = ArchiveResponse),
        (status = StatusCode::BAD_REQUEST, description = "Missing required fields", body = ErrorResponse),
        (status = StatusCode::INTERNAL_SERVER_ERROR, description = "Upstream failure", body = ErrorResponse),
    )
)]
pub async fn handler<M: MailService>(
    State(state): State<AppState<M>>,
    request: Result<Json<ArchiveBody>, JsonRejection>,
) -> Result<Json<ArchiveResponse>, ApiError> {
    let request = json_body(request)?;
    let request: ArchiveRequest = request.try_into()?;

    state.mail.archive_message(&request).await?;

    Ok(Json(ArchiveResponse {
        success: true,
        message: "Email archived successfully".to_string(),
        gmail_id: request.message_id,
    }))
}
