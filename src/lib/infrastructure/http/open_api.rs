//! OpenAPI module

use utoipa::OpenApi;

use crate::infrastructure::http::{
    errors::ErrorResponse,
    handlers::{api::*, contacts, health},
};

#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "Gmail API Service"),
    paths(
        health::handler,
        contacts::handler,
        archive::handler,
        send::handler,
        signatures::handler
    ),
    components(schemas(
        health::HealthResponse,
        contacts::ContactsResponse,
        archive::ArchiveBody,
        archive::ArchiveResponse,
        send::SendEmailBody,
        send::SendEmailResponse,
        signatures::SignaturesBody,
        signatures::SignatureResponse,
        signatures::SignaturesResponse,
        ErrorResponse,
    ))
)]
pub struct ApiDocs;

#[cfg(test)]
mod tests {
    use axum_test::TestServer;
    use serde_json::Value;
    use testresult::TestResult;

    use crate::infrastructure::http::{router, state::tests::test_state};

    #[tokio::test]
    async fn test_openapi_document_lists_routes() -> TestResult {
        let response = TestServer::new(router(test_state(None)))?
            .get("/openapi.json")
            .await;

        response.assert_status_ok();

        let json = response.json::<Value>();

        for path in [
            "/health",
            "/contacts",
            "/api/archive",
            "/api/send",
            "/api/signatures",
        ] {
            assert!(json["paths"].get(path).is_some(), "missing {path}");
        }

        Ok(())
    }
}
