//! Signatures handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    domain::mail::{AccessToken, MailService, Signature},
    infrastructure::http::{
        errors::ApiError,
        handlers::{json_body, present},
        state::AppState,
    },
};

/// Signatures request body
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct SignaturesBody {
    /// The caller's OAuth access token
    access_token: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignatureResponse {
    #[schema(example = "me@example.com")]
    email: String,

    #[schema(example = "Jane Doe")]
    display_name: String,

    #[schema(example = "<div>Jane</div>")]
    signature: String,

    is_default: bool,
    is_primary: bool,
}

impl From<Signature> for SignatureResponse {
    fn from(signature: Signature) -> Self {
        Self {
            email: signature.email,
            display_name: signature.display_name,
            signature: signature.signature,
            is_default: signature.is_default,
            is_primary: signature.is_primary,
        }
    }
}

/// Signatures response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SignaturesResponse {
    success: bool,
    signatures: Vec<SignatureResponse>,
}

/// List the send-as aliases and their signatures
#[utoipa::path(
    post,
    operation_id = "list_signatures",
    tag = "Mail",
    path = "/api/signatures",
    request_body = SignaturesBody,
    responses(
        (status = StatusCode::OK, description = "Signatures", body = SignaturesResponse),
        (status = StatusCode::BAD_REQUEST, description = "Missing access token", body = ErrorResponse),
        (status = StatusCode::INTERNAL_SERVER_ERROR, description = "Upstream failure", body = ErrorResponse),
    )
)]
pub async fn handler<M: MailService>(
    State(state): State<AppState<M>>,
    request: Result<Json<SignaturesBody>, JsonRejection>,
) -> Result<Json<SignaturesResponse>, ApiError> {
    let request = json_body(request)?;

    let access_token = present(request.access_token)
        .map(AccessToken::new)
        .ok_or_else(|| ApiError::new_400("Missing required field: access_token"))?;

    let signatures = state.mail.list_signatures(&access_token).await?;

    Ok(Json(SignaturesResponse {
        success: true,
        signatures: signatures.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;
    use testresult::TestResult;

    use crate::{
        domain::mail::{
            errors::{FetchSignaturesError, UpstreamError},
            tests::MockMailService,
            Signature,
        },
        infrastructure::http::{errors::ErrorResponse, router, state::tests::test_state},
    };

    #[tokio::test]
    async fn test_signatures_success() -> TestResult {
        let mut mail = MockMailService::new();

        mail.expect_list_signatures()
            .times(1)
            .withf(|token| token.expose() == "tok")
            .returning(|_| {
                Ok(vec![
                    Signature {
                        email: "me@example.com".to_string(),
                        display_name: "Jane Doe".to_string(),
                        signature: "<b>Jane</b>".to_string(),
                        is_default: true,
                        is_primary: true,
                    },
                    Signature {
                        email: "alias@example.com".to_string(),
                        display_name: String::new(),
                        signature: String::new(),
                        is_default: false,
                        is_primary: false,
                    },
                ])
            });

        let response = TestServer::new(router(test_state(Some(mail))))?
            .post("/api/signatures")
            .json(&json!({ "access_token": "tok" }))
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({
            "success": true,
            "signatures": [
                {
                    "email": "me@example.com",
                    "displayName": "Jane Doe",
                    "signature": "<b>Jane</b>",
                    "isDefault": true,
                    "isPrimary": true
                },
                {
                    "email": "alias@example.com",
                    "displayName": "",
                    "signature": "",
                    "isDefault": false,
                    "isPrimary": false
                }
            ]
        }));

        Ok(())
    }

    #[tokio::test]
    async fn test_signatures_missing_access_token() -> TestResult {
        let mut mail = MockMailService::new();

        mail.expect_list_signatures().never();

        let response = TestServer::new(router(test_state(Some(mail))))?
            .post("/api/signatures")
            .json(&json!({}))
            .await;

        let json = response.json::<ErrorResponse>();

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(json.error, "Missing required field: access_token");

        Ok(())
    }

    #[tokio::test]
    async fn test_signatures_without_json_body_reports_missing_fields() -> TestResult {
        let mut mail = MockMailService::new();

        mail.expect_list_signatures().never();

        let response = TestServer::new(router(test_state(Some(mail))))?
            .post("/api/signatures")
            .await;

        let json = response.json::<ErrorResponse>();

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(json.error, "Missing required field: access_token");

        Ok(())
    }

    #[tokio::test]
    async fn test_signatures_upstream_failure() -> TestResult {
        let mut mail = MockMailService::new();

        mail.expect_list_signatures().returning(|_| {
            Err(FetchSignaturesError::Upstream(UpstreamError::Rejected {
                status: 403,
                message: "Insufficient Permission".to_string(),
            }))
        });

        let response = TestServer::new(router(test_state(Some(mail))))?
            .post("/api/signatures")
            .json(&json!({ "access_token": "tok" }))
            .await;

        let json = response.json::<ErrorResponse>();

        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json.error, "Failed to fetch signatures");
        assert_eq!(json.details.as_deref(), Some("Insufficient Permission"));

        Ok(())
    }
}
