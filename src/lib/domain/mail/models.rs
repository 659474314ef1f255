//! Request-scoped mail models

use std::fmt;

use serde_json::Value;

/// An opaque OAuth bearer token supplied by the caller.
///
/// The token is passed upstream as-is and is never issued, refreshed or validated here.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap a raw bearer token
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw token, for use in an `Authorization` header
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// A request to send a message on behalf of the token's owner
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SendRequest {
    /// The recipient, used verbatim in the `To` header
    pub recipient: String,

    /// The subject line
    pub subject: String,

    /// The plain-text body
    pub body_text: String,

    /// The caller's credential
    pub access_token: AccessToken,

    /// A display name that takes precedence over any upstream lookup
    pub display_name_override: Option<String>,
}

/// A request to archive a message
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchiveRequest {
    /// The upstream message id
    pub message_id: String,

    /// The caller's credential
    pub access_token: AccessToken,
}

/// The upstream id of a sent message
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageId(String);

impl MessageId {
    /// Create a new message id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<MessageId> for String {
    fn from(id: MessageId) -> Self {
        id.0
    }
}

/// System labels touched by the relay
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Label {
    /// The inbox; removing it archives a message
    Inbox,

    /// Sent mail
    Sent,
}

impl Label {
    /// The upstream label identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inbox => "INBOX",
            Self::Sent => "SENT",
        }
    }
}

/// Labels to add to and remove from a message
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabelChange {
    /// Labels to add
    pub add: Vec<Label>,

    /// Labels to remove
    pub remove: Vec<Label>,
}

impl LabelChange {
    /// A change that only adds `label`
    pub fn add(label: Label) -> Self {
        Self {
            add: vec![label],
            remove: vec![],
        }
    }

    /// A change that only removes `label`
    pub fn remove(label: Label) -> Self {
        Self {
            add: vec![],
            remove: vec![label],
        }
    }
}

/// An upstream send-as identity
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SendAsAlias {
    /// The alias address
    pub send_as_email: String,

    /// The display name configured for the alias
    pub display_name: Option<String>,

    /// The HTML signature configured for the alias
    pub signature: Option<String>,

    /// Whether this alias is used by default when composing
    pub is_default: bool,

    /// Whether this alias is the account's own address
    pub is_primary: bool,
}

/// A signature as reported to callers
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    /// The alias address
    pub email: String,

    /// The alias display name, empty if unset
    pub display_name: String,

    /// The signature HTML, empty if unset
    pub signature: String,

    /// Whether the alias is the default
    pub is_default: bool,

    /// Whether the alias is the primary address
    pub is_primary: bool,
}

impl From<SendAsAlias> for Signature {
    fn from(alias: SendAsAlias) -> Self {
        Self {
            email: alias.send_as_email,
            display_name: alias.display_name.unwrap_or_default(),
            signature: alias.signature.unwrap_or_default(),
            is_default: alias.is_default,
            is_primary: alias.is_primary,
        }
    }
}

/// The caller's contacts, passed through as upstream person resources
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContactList {
    /// Person resources, untouched
    pub contacts: Vec<Value>,

    /// The total number of contacts reported upstream
    pub total_results: u64,
}
