//! Mail relay module.
//!
//! Everything here is request-scoped: a [`Mailbox`] is created per access token by a
//! [`MailboxFactory`], used for a single operation and dropped.

mod composer;
mod mailbox;
mod models;
mod outcome;
mod sender;
mod service;

pub mod errors;

pub use composer::{compose_message, format_header_value, ComposedMessage, EncodedPayload};
pub use mailbox::{Mailbox, MailboxFactory};
pub use models::{
    AccessToken, ArchiveRequest, ContactList, Label, LabelChange, MessageId, SendAsAlias,
    SendRequest, Signature,
};
pub use outcome::Outcome;
pub use sender::{resolve_sender, DisplayNameSource, ResolvedSender};
pub use service::{MailService, MailServiceImpl};

#[cfg(test)]
pub mod tests {
    pub use super::mailbox::MockMailbox;
    pub use super::service::MockMailService;
}
