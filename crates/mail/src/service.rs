//! PreviewService facade
//!
//! The caller-facing "fetch inbox preview" operation: resolve the session's
//! credential, then run the inbox pipeline with it.

use anyhow::Result;
use log::debug;
use std::sync::Arc;

use crate::auth::{CredentialStore, FileCredentialStore, TokenResolver};
use crate::config::PreviewConfig;
use crate::gmail::{GmailClient, MailProvider};
use crate::inbox::fetch_inbox;
use crate::models::{EmailRecord, SessionIdentity};

/// Entry point for UI code
///
/// Holds no per-user state, so one instance can serve concurrent sessions.
pub struct PreviewService {
    resolver: TokenResolver,
    provider: Arc<dyn MailProvider>,
}

impl PreviewService {
    pub fn new(store: Arc<dyn CredentialStore>, provider: Arc<dyn MailProvider>) -> Self {
        Self {
            resolver: TokenResolver::new(store),
            provider,
        }
    }

    /// Build a service from settings: file-backed credentials and the Gmail API
    pub fn from_config(config: &PreviewConfig) -> Result<Self> {
        let store = match &config.credentials_path {
            Some(path) => FileCredentialStore::new(path),
            None => FileCredentialStore::open_default()?,
        };
        debug!("Using credentials file {}", store.path().display());

        let client = GmailClient::with_base_url(&config.api_base_url);
        Ok(Self::new(Arc::new(store), Arc::new(client)))
    }

    /// Fetch the inbox preview for the signed-in user
    ///
    /// Empty when nobody is signed in, no token is stored, or the provider
    /// fails; check the logs to tell those apart.
    pub fn fetch_inbox_preview(&self, session: Option<&SessionIdentity>) -> Vec<EmailRecord> {
        match self.resolver.resolve(session) {
            Some(credential) => fetch_inbox(self.provider.as_ref(), &credential),
            None => Vec::new(),
        }
    }
}
