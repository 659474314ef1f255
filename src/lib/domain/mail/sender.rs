//! Sender resolution

use std::fmt;

use tracing::{debug, warn};

use crate::domain::mail::{errors::UpstreamError, Mailbox, Outcome, SendAsAlias};

/// The address and optional display name a message is sent from
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedSender {
    email_address: String,
    display_name: Option<String>,
}

impl ResolvedSender {
    /// Create a new resolved sender
    pub fn new(email_address: impl Into<String>, display_name: Option<String>) -> Self {
        Self {
            email_address: email_address.into(),
            display_name,
        }
    }

    /// The account's own address
    pub fn email_address(&self) -> &str {
        &self.email_address
    }

    /// The display name, if one was found
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }
}

/// A place a display name can come from, tried in order until one yields a name
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DisplayNameSource {
    /// A name supplied with the request
    Override(String),

    /// The primary, or else default, send-as alias
    SendAsAlias,

    /// The first name on the account's profile
    Profile,
}

impl DisplayNameSource {
    /// The resolution order for a request
    pub fn strategies(display_name_override: Option<&str>) -> Vec<Self> {
        let mut sources = Vec::with_capacity(3);

        if let Some(name) = display_name_override {
            sources.push(Self::Override(name.to_string()));
        }

        sources.push(Self::SendAsAlias);
        sources.push(Self::Profile);

        sources
    }

    /// Looks up a display name from this source.
    ///
    /// # Returns
    /// - [`Outcome::Ok`] with [`Some`] name if the source has a non-blank one.
    /// - [`Outcome::Ok`] with [`None`] if the source has nothing to offer.
    /// - [`Outcome::Degraded`] if the upstream lookup failed.
    pub async fn lookup<M: Mailbox + ?Sized>(&self, mailbox: &M) -> Outcome<Option<String>> {
        match self {
            Self::Override(name) => Outcome::Ok(non_blank(name)),
            Self::SendAsAlias => mailbox
                .send_as_aliases()
                .await
                .map(|aliases| {
                    preferred_alias(&aliases)
                        .and_then(|alias| alias.display_name.as_deref())
                        .and_then(non_blank)
                })
                .into(),
            Self::Profile => mailbox
                .profile_names()
                .await
                .map(|names| names.into_iter().next().flatten().as_deref().and_then(non_blank))
                .into(),
        }
    }
}

impl fmt::Display for DisplayNameSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Override(_) => write!(f, "request override"),
            Self::SendAsAlias => write!(f, "send-as alias"),
            Self::Profile => write!(f, "profile"),
        }
    }
}

fn preferred_alias(aliases: &[SendAsAlias]) -> Option<&SendAsAlias> {
    aliases
        .iter()
        .find(|alias| alias.is_primary)
        .or_else(|| aliases.iter().find(|alias| alias.is_default))
}

fn non_blank(name: &str) -> Option<String> {
    let trimmed = name.trim();

    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Resolves who a message is sent from.
///
/// The account's own address is always fetched first and a failure there is returned as
/// an error. Display name lookups that fail are logged and skipped.
pub async fn resolve_sender<M: Mailbox + ?Sized>(
    mailbox: &M,
    display_name_override: Option<&str>,
) -> Result<ResolvedSender, UpstreamError> {
    let email_address = mailbox.profile_email().await?;

    debug!(%email_address, "fetched sender address");

    for source in DisplayNameSource::strategies(display_name_override) {
        match source.lookup(mailbox).await {
            Outcome::Ok(Some(display_name)) => {
                debug!("using display name from {source}");

                return Ok(ResolvedSender::new(email_address, Some(display_name)));
            }
            Outcome::Ok(None) => debug!("no display name from {source}"),
            Outcome::Degraded(reason) => {
                warn!("could not fetch display name from {source}: {reason}")
            }
        }
    }

    debug!("no display name available, using bare address");

    Ok(ResolvedSender::new(email_address, None))
}
