//! Credential store trait and in-memory implementation

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;

use crate::models::UserId;

/// Token record written by the identity provider after sign-in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredToken {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Expiry in milliseconds since epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
}

impl StoredToken {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: None,
            expires_at: None,
        }
    }

    pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
        self.refresh_token = Some(refresh_token.into());
        self
    }

    pub fn with_expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at.timestamp_millis());
        self
    }

    /// Whether the recorded expiry has passed. Tokens without one never expire.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at
            .is_some_and(|expires_at| expires_at <= now.timestamp_millis())
    }
}

/// Storage of tokens keyed by user
///
/// Implementations must be safe to share between concurrent fetches.
pub trait CredentialStore: Send + Sync {
    /// Look up the token stored for a user
    fn get(&self, user_id: &UserId) -> Result<Option<StoredToken>>;

    /// Insert or replace the token for a user
    fn put(&self, user_id: UserId, token: StoredToken) -> Result<()>;

    /// Forget a user's token
    fn remove(&self, user_id: &UserId) -> Result<()>;
}

/// In-memory implementation of CredentialStore
#[derive(Default)]
pub struct InMemoryCredentialStore {
    tokens: RwLock<HashMap<UserId, StoredToken>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn get(&self, user_id: &UserId) -> Result<Option<StoredToken>> {
        let tokens = self
            .tokens
            .read()
            .map_err(|_| anyhow!("credential store lock poisoned"))?;
        Ok(tokens.get(user_id).cloned())
    }

    fn put(&self, user_id: UserId, token: StoredToken) -> Result<()> {
        let mut tokens = self
            .tokens
            .write()
            .map_err(|_| anyhow!("credential store lock poisoned"))?;
        tokens.insert(user_id, token);
        Ok(())
    }

    fn remove(&self, user_id: &UserId) -> Result<()> {
        let mut tokens = self
            .tokens
            .write()
            .map_err(|_| anyhow!("credential store lock poisoned"))?;
        tokens.remove(user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_put_get_remove() {
        let store = InMemoryCredentialStore::new();
        let user = UserId::new("u1");

        assert_eq!(store.get(&user).unwrap(), None);

        store.put(user.clone(), StoredToken::new("tok")).unwrap();
        assert_eq!(store.get(&user).unwrap(), Some(StoredToken::new("tok")));

        store.remove(&user).unwrap();
        assert_eq!(store.get(&user).unwrap(), None);
    }

    #[test]
    fn test_put_replaces() {
        let store = InMemoryCredentialStore::new();
        store.put(UserId::new("u1"), StoredToken::new("old")).unwrap();
        store.put(UserId::new("u1"), StoredToken::new("new")).unwrap();
        assert_eq!(
            store.get(&UserId::new("u1")).unwrap().unwrap().access_token,
            "new"
        );
    }

    #[test]
    fn test_is_expired() {
        let now = Utc::now();
        assert!(!StoredToken::new("t").is_expired(now));
        assert!(
            StoredToken::new("t")
                .with_expires_at(now - Duration::minutes(1))
                .is_expired(now)
        );
        assert!(
            !StoredToken::new("t")
                .with_expires_at(now + Duration::minutes(1))
                .is_expired(now)
        );
    }

    #[test]
    fn test_stored_token_json_shape() {
        let json = r#"{"access_token":"a","refresh_token":"r","expires_at":1700000000000}"#;
        let token: StoredToken = serde_json::from_str(json).unwrap();
        assert_eq!(token.access_token, "a");
        assert_eq!(token.refresh_token.as_deref(), Some("r"));
        assert_eq!(token.expires_at, Some(1_700_000_000_000));

        let minimal: StoredToken = serde_json::from_str(r#"{"access_token":"a"}"#).unwrap();
        assert_eq!(minimal, StoredToken::new("a"));
    }
}
