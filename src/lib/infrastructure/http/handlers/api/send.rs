//! Send message handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use utoipa::ToSchema;

use crate::{
    domain::mail::{AccessToken, MailService, SendRequest},
    infrastructure::http::{
        errors::ApiError,
        handlers::{json_body, present},
        state::AppState,
    },
};

/// Send message request body
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct SendEmailBody {
    /// The recipient
    #[schema(example = "friend@example.com")]
    to: Option<String>,

    /// The subject line
    #[schema(example = "Hello")]
    subject: Option<String>,

    /// The plain-text body; newlines become `<br>`
    #[schema(example = "Hi there,\nSee you soon")]
    body: Option<String>,

    /// The caller's OAuth access token
    access_token: Option<String>,

    /// Display name for the From header, overriding the account's own. Anything other
    /// than a string is ignored.
    #[schema(value_type = Option<String>, example = "Jane Doe")]
    from_name: Option<Value>,
}

impl TryFrom<SendEmailBody> for SendRequest {
    type Error = ApiError;

    fn try_from(body: SendEmailBody) -> Result<Self, Self::Error> {
        match (
            present(body.to),
            present(body.subject),
            present(body.body),
            present(body.access_token),
        ) {
            (Some(recipient), Some(subject), Some(body_text), Some(access_token)) => Ok(Self {
                recipient,
                subject,
                body_text,
                access_token: AccessToken::new(access_token),
                display_name_override: body
                    .from_name
                    .as_ref()
                    .and_then(Value::as_str)
                    .map(str::to_string),
            }),
            _ => Err(ApiError::new_400(
                "Missing required fields: to, subject, body, and access_token",
            )),
        }
    }
}

/// Send message response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SendEmailResponse {
    success: bool,

    #[schema(example = "Email sent successfully")]
    message: String,

    /// The Gmail id of the sent message
    #[serde(rename = "messageId")]
    #[schema(example = "18c2f0a4b5d6e7f8")]
    message_id: String,
}

/// Send a message from the token owner's account
#[utoipa::path(
    post,
    operation_id = "send_message",
    tag = "Mail",
    path = "/api/send",
    request_body = SendEmailBody,
    responses(
        (status = StatusCode::OK, description = "Message sent", body = SendEmailResponse),
        (status = StatusCode::BAD_REQUEST, description = "Missing required fields", body = ErrorResponse),
        (status = StatusCode::INTERNAL_SERVER_ERROR, description = "Upstream failure", body = ErrorResponse, example = json!({"error": "Failed to send email", "details": "Invalid Credentials"})),
    )
)]
pub async fn handler<M: MailService>(
    State(state): State<AppState<M>>,
    request: Result<Json<SendEmailBody>, JsonRejection>,
) -> Result<Json<SendEmailResponse>, ApiError> {
    let request = json_body(request)?;
    let request: SendRequest = request.try_into()?;

    info!(
        to = %request.recipient,
        body_length = request.body_text.len(),
        from_name = ?request.display_name_override,
        "sending email"
    );

    let message_id = state.mail.send_message(&request).await?;

    Ok(Json(SendEmailResponse {
        success: true,
        message: "Email sent successfully".to_string(),
        message_id: message_id.into(),
    }))
}
