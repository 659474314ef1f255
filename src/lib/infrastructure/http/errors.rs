//! API error-handling module

use std::fmt;

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::mail::errors::{
    ArchiveError, FetchContactsError, FetchSignaturesError, SendEmailError, UpstreamError,
};

/// An error response
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// The error message
    #[schema(example = "Failed to send email")]
    pub error: String,

    /// The upstream provider's explanation, if the failure happened upstream
    #[schema(example = "Invalid Credentials")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// An error raised in the API
#[derive(Debug, Deserialize, ToSchema)]
pub struct ApiError {
    /// The status code
    #[schema(example = 500, value_type = u16)]
    #[serde(with = "http_serde::status_code")]
    pub status: StatusCode,

    /// The error message
    #[schema(example = "Failed to send email")]
    pub message: String,

    /// Upstream details
    pub details: Option<String>,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status: StatusCode, message: &str) -> Self {
        Self {
            status,
            message: message.to_string(),
            details: None,
        }
    }

    /// Create a new bad request error
    pub fn new_400(message: &str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Create a new unauthorized error
    pub fn new_401(message: &str) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    /// Create new internal server error
    pub fn new_500(message: &str) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Attach upstream details
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.details {
            Some(details) => write!(f, "{}: {}", self.message, details),
            None => write!(f, "{}", self.message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
                details: self.details,
            }),
        )
            .into_response()
    }
}

impl From<ArchiveError> for ApiError {
    fn from(err: ArchiveError) -> Self {
        match err {
            ArchiveError::Upstream(err) => upstream_error("Failed to archive email", err),
        }
    }
}

impl From<SendEmailError> for ApiError {
    fn from(err: SendEmailError) -> Self {
        match err {
            SendEmailError::Upstream(err) => upstream_error("Failed to send email", err),
        }
    }
}

impl From<FetchContactsError> for ApiError {
    fn from(err: FetchContactsError) -> Self {
        match err {
            FetchContactsError::Upstream(err) => upstream_error("Failed to fetch contacts", err),
        }
    }
}

impl From<FetchSignaturesError> for ApiError {
    fn from(err: FetchSignaturesError) -> Self {
        match err {
            FetchSignaturesError::Upstream(err) => {
                upstream_error("Failed to fetch signatures", err)
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::new(rejection.status(), &rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::new(rejection.status(), &rejection.body_text())
    }
}

fn upstream_error(message: &str, err: UpstreamError) -> ApiError {
    match &err {
        UpstreamError::Rejected { status, .. } => {
            error!(upstream_status = status, "{message}: {err}")
        }
        UpstreamError::UnknownError(source) => error!("{message}: {source:?}"),
    }

    ApiError::new_500(message).with_details(err.to_string())
}
