//! `/api` routes

use axum::{routing::post, Router};

use crate::{domain::mail::MailService, infrastructure::http::state::AppState};

pub mod archive;
pub mod send;
pub mod signatures;

/// Routes nested under `/api`
pub fn router<M: MailService>() -> Router<AppState<M>> {
    Router::new()
        .route("/archive", post(archive::handler::<M>))
        .route("/send", post(send::handler::<M>))
        .route("/signatures", post(signatures::handler::<M>))
}
