//! Application state module

use std::{fmt, sync::Arc};

use crate::domain::mail::MailService;

/// Global application state
#[derive(Clone)]
pub struct AppState<M: MailService> {
    /// Mail service
    pub mail: Arc<M>,
}

impl<M: MailService> AppState<M> {
    /// Create a new application state
    pub fn new(mail: M) -> Self {
        Self {
            mail: Arc::new(mail),
        }
    }
}

impl<M: MailService> fmt::Debug for AppState<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("mail", &"MailService")
            .finish()
    }
}
