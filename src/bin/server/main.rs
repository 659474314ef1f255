#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Gmail relay HTTP server

use anyhow::Result;
use clap::Parser;
use gmail_api_service::{
    domain::mail::MailServiceImpl,
    infrastructure::{
        google::{GoogleApiConfig, GoogleMailboxFactory},
        http::{HttpServer, HttpServerConfig},
    },
};

/// Command-line arguments / environment variables
#[derive(Debug, Parser)]
pub struct Args {
    /// The HTTP server configuration
    #[clap(flatten)]
    pub server: HttpServerConfig,

    /// The Google API endpoints
    #[clap(flatten)]
    pub google: GoogleApiConfig,
}

#[mutants::skip]
#[tokio::main]
async fn main() -> Result<()> {
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    if let Err(e) = dotenv {
        tracing::debug!("no .env file loaded: {e}");
    }

    let args = Args::parse();

    let mailboxes = GoogleMailboxFactory::new(args.google)?;

    HttpServer::new(MailServiceImpl::new(mailboxes), args.server)
        .await?
        .run()
        .await
}
