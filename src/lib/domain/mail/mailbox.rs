//! Upstream mailbox port

use async_trait::async_trait;

#[cfg(test)]
use mockall::mock;

use crate::domain::mail::{
    errors::UpstreamError, AccessToken, ContactList, EncodedPayload, LabelChange, MessageId,
    SendAsAlias,
};

/// A credential-scoped view of the caller's mail and contacts provider
#[async_trait]
pub trait Mailbox: Send + Sync + 'static {
    /// Fetches the authenticated account's own address.
    async fn profile_email(&self) -> Result<String, UpstreamError>;

    /// Lists the account's send-as aliases.
    async fn send_as_aliases(&self) -> Result<Vec<SendAsAlias>, UpstreamError>;

    /// Fetches the display names on the account's profile, in upstream order.
    ///
    /// Entries without a display name are returned as [`None`].
    async fn profile_names(&self) -> Result<Vec<Option<String>>, UpstreamError>;

    /// Sends a pre-encoded message.
    ///
    /// # Arguments
    /// * `payload` - The URL-safe base64 encoded RFC 2822 message.
    ///
    /// # Returns
    /// The [`MessageId`] assigned upstream.
    async fn send_raw(&self, payload: &EncodedPayload) -> Result<MessageId, UpstreamError>;

    /// Adds and removes labels on a message.
    async fn modify_labels(
        &self,
        message_id: &str,
        change: &LabelChange,
    ) -> Result<(), UpstreamError>;

    /// Lists the account's contacts.
    async fn connections(&self) -> Result<ContactList, UpstreamError>;
}

#[cfg(test)]
mock! {
    pub Mailbox {}

    #[async_trait]
    impl Mailbox for Mailbox {
        async fn profile_email(&self) -> Result<String, UpstreamError>;
        async fn send_as_aliases(&self) -> Result<Vec<SendAsAlias>, UpstreamError>;
        async fn profile_names(&self) -> Result<Vec<Option<String>>, UpstreamError>;
        async fn send_raw(&self, payload: &EncodedPayload) -> Result<MessageId, UpstreamError>;
        async fn modify_labels(&self, message_id: &str, change: &LabelChange) -> Result<(), UpstreamError>;
        async fn connections(&self) -> Result<ContactList, UpstreamError>;
    }
}

/// Creates a [`Mailbox`] for each access token
pub trait MailboxFactory: Clone + Send + Sync + 'static {
    /// The mailbox type produced
    type Mailbox: Mailbox;

    /// Returns a mailbox that authenticates upstream with `access_token`.
    fn mailbox(&self, access_token: &AccessToken) -> Self::Mailbox;
}

impl<F, M> MailboxFactory for F
where
    F: Fn(&AccessToken) -> M + Clone + Send + Sync + 'static,
    M: Mailbox,
{
    type Mailbox = M;

    fn mailbox(&self, access_token: &AccessToken) -> M {
        self(access_token)
    }
}
