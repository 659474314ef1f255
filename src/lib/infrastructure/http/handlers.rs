//! API handler modules

use std::any::Any;

use axum::{
    body::Body,
    extract::rejection::JsonRejection,
    http::{Response, StatusCode},
    response::IntoResponse,
    Json,
};
use tracing::error;

use super::errors::{ApiError, ErrorResponse};

pub mod api;
pub mod contacts;
pub mod health;

/// Catch panics and return a 500 error
pub fn panic_handler(err: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Internal server error".to_string()
    };

    error!("handler panicked: {details}");

    let error = ErrorResponse {
        error: details,
        details: None,
    };

    (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
}

/// Treats empty strings the same as missing fields
pub(crate) fn present(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

/// Unwraps a JSON body. A request without a JSON content type has an empty body, so its
/// fields are reported as missing rather than as an unsupported media type.
pub(crate) fn json_body<T: Default>(
    request: Result<Json<T>, JsonRejection>,
) -> Result<T, ApiError> {
    match request {
        Ok(Json(body)) => Ok(body),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(T::default()),
        Err(rejection) => Err(rejection.into()),
    }
}
