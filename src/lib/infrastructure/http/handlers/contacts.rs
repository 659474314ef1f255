//! Contacts handler

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header::AUTHORIZATION, HeaderMap},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use crate::{
    domain::mail::{AccessToken, ContactList, MailService},
    infrastructure::http::{errors::ApiError, handlers::present, state::AppState},
};

/// Contacts query parameters
#[derive(Debug, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ContactsParams {
    /// The caller's OAuth access token
    access_token: Option<String>,
}

/// Contacts response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactsResponse {
    success: bool,

    /// People API person resources, passed through unchanged
    #[schema(value_type = Vec<Object>)]
    contacts: Vec<Value>,

    /// The total number of contacts
    #[schema(example = 1)]
    total_results: u64,
}

impl From<ContactList> for ContactsResponse {
    fn from(list: ContactList) -> Self {
        Self {
            success: true,
            contacts: list.contacts,
            total_results: list.total_results,
        }
    }
}

/// Fetch the caller's contacts
#[utoipa::path(
    get,
    operation_id = "list_contacts",
    tag = "Contacts",
    path = "/contacts",
    params(
        ("Authorization" = String, Header, description = "Must be present"),
        ContactsParams,
    ),
    responses(
        (status = StatusCode::OK, description = "Contacts", body = ContactsResponse),
        (status = StatusCode::BAD_REQUEST, description = "Missing access token", body = ErrorResponse),
        (status = StatusCode::UNAUTHORIZED, description = "Missing authorization header", body = ErrorResponse),
        (status = StatusCode::INTERNAL_SERVER_ERROR, description = "Upstream failure", body = ErrorResponse),
    )
)]
pub async fn handler<M: MailService>(
    State(state): State<AppState<M>>,
    headers: HeaderMap,
    query: Result<Query<ContactsParams>, QueryRejection>,
) -> Result<Json<ContactsResponse>, ApiError> {
    if headers
        .get(AUTHORIZATION)
        .filter(|value| !value.is_empty())
        .is_none()
    {
        return Err(ApiError::new_401("Missing authorization header"));
    }

    let Query(params) = query?;

    let access_token = present(params.access_token)
        .map(AccessToken::new)
        .ok_or_else(|| ApiError::new_400("Missing access_token query parameter"))?;

    let contacts = state.mail.list_contacts(&access_token).await?;

    Ok(Json(contacts.into()))
}
