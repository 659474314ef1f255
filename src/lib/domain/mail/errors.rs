//! Error types for mail relay operations

use thiserror::Error;
use tracing::debug;

/// A failure reported by, or while talking to, the upstream provider
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The provider answered with a non-success status
    #[error("{message}")]
    Rejected {
        /// The HTTP status returned upstream
        status: u16,

        /// The provider's error message
        message: String,
    },

    /// Transport or decoding failure
    #[error(transparent)]
    UnknownError(#[from] anyhow::Error),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        debug!("reqwest::Error -> UpstreamError: {:?}", err);

        UpstreamError::UnknownError(err.into())
    }
}

/// Errors that can occur when archiving a message
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The modify call failed
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

/// Errors that can occur when sending a message
#[derive(Debug, Error)]
pub enum SendEmailError {
    /// Fetching the sender address or sending the message failed
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

/// Errors that can occur when listing contacts
#[derive(Debug, Error)]
pub enum FetchContactsError {
    /// The connections call failed
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

/// Errors that can occur when listing signatures
#[derive(Debug, Error)]
pub enum FetchSignaturesError {
    /// The send-as listing failed
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;

    use super::*;

    #[test]
    fn test_rejected_displays_upstream_message() {
        let err = UpstreamError::Rejected {
            status: 401,
            message: "Invalid Credentials".to_string(),
        };

        assert_eq!(err.to_string(), "Invalid Credentials");
    }

    #[test]
    fn test_operation_errors_are_transparent() {
        let err = SendEmailError::from(UpstreamError::from(anyhow!("connection reset")));

        assert_eq!(err.to_string(), "connection reset");
    }
}
