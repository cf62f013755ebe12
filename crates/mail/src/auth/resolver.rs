//! Token resolver: session identity -> access credential

use chrono::Utc;
use log::{debug, warn};
use std::sync::Arc;

use super::CredentialStore;
use crate::models::{Credential, SessionIdentity};

/// Looks up the stored access token for an authenticated session
///
/// Pure lookup: no network I/O and no refresh. An expired token is still
/// returned; the provider will reject it and the fetch degrades to empty.
#[derive(Clone)]
pub struct TokenResolver {
    store: Arc<dyn CredentialStore>,
}

impl TokenResolver {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// Resolve the credential for `session`
    ///
    /// Returns `None` when nobody is signed in or no usable token is stored.
    pub fn resolve(&self, session: Option<&SessionIdentity>) -> Option<Credential> {
        let session = session?;

        let token = match self.store.get(&session.user_id) {
            Ok(Some(token)) => token,
            Ok(None) => {
                debug!("No stored credential for user {}", session.user_id);
                return None;
            }
            Err(e) => {
                warn!(
                    "Failed to read credential for user {}: {:#}",
                    session.user_id, e
                );
                return None;
            }
        };

        if token.access_token.is_empty() {
            debug!("Stored credential for user {} is empty", session.user_id);
            return None;
        }

        if token.is_expired(Utc::now()) {
            debug!(
                "Stored credential for user {} is past its expiry",
                session.user_id
            );
        }

        Some(Credential::new(token.access_token))
    }
}
