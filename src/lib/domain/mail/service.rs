//! Mail service module

use async_trait::async_trait;
use tracing::{debug, info, warn};

#[cfg(test)]
use mockall::mock;

use crate::domain::mail::{
    compose_message,
    errors::{ArchiveError, FetchContactsError, FetchSignaturesError, SendEmailError},
    resolve_sender, AccessToken, ArchiveRequest, ContactList, Label, LabelChange, Mailbox,
    MailboxFactory, MessageId, Outcome, SendRequest, Signature,
};

/// Mail relay operations
#[async_trait]
pub trait MailService: Clone + Send + Sync + 'static {
    /// Archives a message by removing it from the inbox.
    ///
    /// # Arguments
    /// * `request` - The [`ArchiveRequest`] naming the message and credential.
    ///
    /// # Returns
    /// A [`Result`] which is [`Ok`] if the message was archived,
    /// or an [`Err`] containing an [`ArchiveError`] if the upstream call failed.
    async fn archive_message(&self, request: &ArchiveRequest) -> Result<(), ArchiveError>;

    /// Composes and sends a message, then labels it as sent.
    ///
    /// Failing to apply the sent label does not fail the send.
    ///
    /// # Arguments
    /// * `request` - The [`SendRequest`] to send.
    ///
    /// # Returns
    /// A [`Result`] which is [`Ok`] containing the upstream [`MessageId`],
    /// or an [`Err`] containing a [`SendEmailError`] if the sender address could not be
    /// fetched or the message could not be sent.
    async fn send_message(&self, request: &SendRequest) -> Result<MessageId, SendEmailError>;

    /// Lists the caller's contacts.
    async fn list_contacts(
        &self,
        access_token: &AccessToken,
    ) -> Result<ContactList, FetchContactsError>;

    /// Lists the signatures configured on the caller's send-as aliases.
    async fn list_signatures(
        &self,
        access_token: &AccessToken,
    ) -> Result<Vec<Signature>, FetchSignaturesError>;
}

#[cfg(test)]
mock! {
    pub MailService {}

    impl Clone for MailService {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl MailService for MailService {
        async fn archive_message(&self, request: &ArchiveRequest) -> Result<(), ArchiveError>;
        async fn send_message(&self, request: &SendRequest) -> Result<MessageId, SendEmailError>;
        async fn list_contacts(&self, access_token: &AccessToken) -> Result<ContactList, FetchContactsError>;
        async fn list_signatures(&self, access_token: &AccessToken) -> Result<Vec<Signature>, FetchSignaturesError>;
    }
}

/// Mail service implementation
#[derive(Debug, Clone)]
pub struct MailServiceImpl<F>
where
    F: MailboxFactory,
{
    mailboxes: F,
}

impl<F> MailServiceImpl<F>
where
    F: MailboxFactory,
{
    /// Create a new mail service using `mailboxes` to reach the provider
    pub fn new(mailboxes: F) -> Self {
        Self { mailboxes }
    }
}

#[async_trait]
impl<F> MailService for MailServiceImpl<F>
where
    F: MailboxFactory,
{
    async fn archive_message(&self, request: &ArchiveRequest) -> Result<(), ArchiveError> {
        let mailbox = self.mailboxes.mailbox(&request.access_token);

        mailbox
            .modify_labels(&request.message_id, &LabelChange::remove(Label::Inbox))
            .await?;

        info!(message_id = %request.message_id, "archived message");

        Ok(())
    }

    async fn send_message(&self, request: &SendRequest) -> Result<MessageId, SendEmailError> {
        let mailbox = self.mailboxes.mailbox(&request.access_token);

        let sender = resolve_sender(&mailbox, request.display_name_override.as_deref()).await?;
        let message = compose_message(&sender, request);

        debug!(
            from = message.header("From").unwrap_or_default(),
            to = %request.recipient,
            body_length = request.body_text.len(),
            "composed message"
        );

        let message_id = mailbox.send_raw(&message.encode_payload()).await?;

        info!(%message_id, "sent message");

        let labelled: Outcome<()> = mailbox
            .modify_labels(&message_id.to_string(), &LabelChange::add(Label::Sent))
            .await
            .into();

        if let Outcome::Degraded(reason) = labelled {
            warn!(%message_id, "could not add the SENT label: {reason}");
        }

        Ok(message_id)
    }

    async fn list_contacts(
        &self,
        access_token: &AccessToken,
    ) -> Result<ContactList, FetchContactsError> {
        let contacts = self.mailboxes.mailbox(access_token).connections().await?;

        debug!(total_results = contacts.total_results, "fetched contacts");

        Ok(contacts)
    }

    async fn list_signatures(
        &self,
        access_token: &AccessToken,
    ) -> Result<Vec<Signature>, FetchSignaturesError> {
        let aliases = self.mailboxes.mailbox(access_token).send_as_aliases().await?;

        Ok(aliases.into_iter().map(Signature::from).collect())
    }
}
