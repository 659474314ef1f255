//! Google Gmail and People API mailbox

use std::sync::Arc;

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use clap::Parser;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::mail::{
    errors::UpstreamError, AccessToken, ContactList, EncodedPayload, LabelChange, Mailbox,
    MailboxFactory, MessageId, SendAsAlias,
};

mod wire;

const CONTACTS_PAGE_SIZE: &str = "1000";
const CONTACT_PERSON_FIELDS: &str = "names,emailAddresses,phoneNumbers,photos";

/// Google API configuration
#[derive(Clone, Debug, PartialEq, Eq, Parser)]
pub struct GoogleApiConfig {
    /// Base URL of the Gmail API
    #[arg(
        long,
        env = "GMAIL_API_URL",
        default_value = "https://gmail.googleapis.com"
    )]
    pub gmail_api_url: String,

    /// Base URL of the People API
    #[arg(
        long,
        env = "PEOPLE_API_URL",
        default_value = "https://people.googleapis.com"
    )]
    pub people_api_url: String,
}

/// Creates [`GoogleMailbox`]es sharing one connection pool
#[derive(Clone, Debug)]
pub struct GoogleMailboxFactory {
    client: Client,
    config: Arc<GoogleApiConfig>,
}

impl GoogleMailboxFactory {
    /// Create a new factory
    pub fn new(config: GoogleApiConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }
}

impl MailboxFactory for GoogleMailboxFactory {
    type Mailbox = GoogleMailbox;

    fn mailbox(&self, access_token: &AccessToken) -> GoogleMailbox {
        GoogleMailbox {
            client: self.client.clone(),
            config: self.config.clone(),
            access_token: access_token.clone(),
        }
    }
}

/// A mailbox backed by the Gmail and People REST APIs
#[derive(Clone, Debug)]
pub struct GoogleMailbox {
    client: Client,
    config: Arc<GoogleApiConfig>,
    access_token: AccessToken,
}

impl GoogleMailbox {
    fn gmail(&self, segments: &[&str]) -> Result<Url, UpstreamError> {
        endpoint(&self.config.gmail_api_url, "gmail/v1/users/me", segments)
    }

    fn people(&self, segments: &[&str]) -> Result<Url, UpstreamError> {
        endpoint(&self.config.people_api_url, "v1/people/me", segments)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, UpstreamError> {
        let response = request
            .bearer_auth(self.access_token.expose())
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(status, &body);

            debug!(%status, %message, "upstream request rejected");

            return Err(UpstreamError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl Mailbox for GoogleMailbox {
    async fn profile_email(&self) -> Result<String, UpstreamError> {
        let url = self.gmail(&["profile"])?;
        let profile: wire::Profile = self.execute(self.client.get(url)).await?;

        Ok(profile.email_address)
    }

    async fn send_as_aliases(&self) -> Result<Vec<SendAsAlias>, UpstreamError> {
        let url = self.gmail(&["settings", "sendAs"])?;
        let list: wire::SendAsList = self.execute(self.client.get(url)).await?;

        Ok(list.send_as.into_iter().map(SendAsAlias::from).collect())
    }

    async fn profile_names(&self) -> Result<Vec<Option<String>>, UpstreamError> {
        let url = self.people(&[])?;
        let person: wire::Person = self
            .execute(self.client.get(url).query(&[("personFields", "names")]))
            .await?;

        Ok(person
            .names
            .into_iter()
            .map(|name| name.display_name)
            .collect())
    }

    async fn send_raw(&self, payload: &EncodedPayload) -> Result<MessageId, UpstreamError> {
        let url = self.gmail(&["messages", "send"])?;
        let message: wire::Message = self
            .execute(self.client.post(url).json(&wire::SendMessage {
                raw: payload.as_str(),
            }))
            .await?;

        Ok(MessageId::new(message.id))
    }

    async fn modify_labels(
        &self,
        message_id: &str,
        change: &LabelChange,
    ) -> Result<(), UpstreamError> {
        let url = self.gmail(&["messages", message_id, "modify"])?;
        let body = wire::ModifyMessage {
            add_label_ids: change.add.iter().map(|label| label.as_str()).collect(),
            remove_label_ids: change.remove.iter().map(|label| label.as_str()).collect(),
        };

        let _: wire::Message = self.execute(self.client.post(url).json(&body)).await?;

        Ok(())
    }

    async fn connections(&self) -> Result<ContactList, UpstreamError> {
        let url = self.people(&["connections"])?;
        let connections: wire::Connections = self
            .execute(self.client.get(url).query(&[
                ("pageSize", CONTACTS_PAGE_SIZE),
                ("personFields", CONTACT_PERSON_FIELDS),
            ]))
            .await?;

        Ok(connections.into())
    }
}

/// Joins `prefix` and `segments` onto `base`, percent-encoding each segment
fn endpoint(base: &str, prefix: &str, segments: &[&str]) -> Result<Url, UpstreamError> {
    let mut url = Url::parse(base).with_context(|| format!("invalid API URL {base}"))?;

    url.path_segments_mut()
        .map_err(|_| anyhow!("{base} cannot be used as a base URL"))?
        .pop_if_empty()
        .extend(prefix.split('/'))
        .extend(segments);

    Ok(url)
}

/// Extracts a human-readable message from an upstream error response
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(envelope) = serde_json::from_str::<wire::ErrorEnvelope>(body) {
        return envelope.error.message;
    }

    let body = body.trim();

    if body.is_empty() {
        status.to_string()
    } else {
        body.to_string()
    }
}
