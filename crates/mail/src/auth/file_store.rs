//! JSON-file credential store
//!
//! Layout: `{ "<user id>": { "access_token": ..., ... } }`.

use anyhow::{anyhow, Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{CredentialStore, StoredToken};
use crate::models::UserId;

/// Default credentials filename in the config directory
pub const CREDENTIALS_FILE: &str = "credentials.json";

type TokenMap = BTreeMap<UserId, StoredToken>;

/// Credential store backed by a single JSON file
pub struct FileCredentialStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Store at `~/.config/inbox-preview/credentials.json`
    pub fn open_default() -> Result<Self> {
        let path = config::config_path(CREDENTIALS_FILE)
            .context("Could not determine config directory")?;
        Ok(Self::new(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file is an empty store
    fn load(&self) -> Result<TokenMap> {
        if !self.path.exists() {
            return Ok(TokenMap::new());
        }
        config::load_json_file(&self.path)
    }

    fn save(&self, tokens: &TokenMap) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(tokens)?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write {}", self.path.display()))
    }

    fn update(&self, f: impl FnOnce(&mut TokenMap)) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| anyhow!("credential file lock poisoned"))?;
        let mut tokens = self.load()?;
        f(&mut tokens);
        self.save(&tokens)
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self, user_id: &UserId) -> Result<Option<StoredToken>> {
        Ok(self.load()?.remove(user_id))
    }

    fn put(&self, user_id: UserId, token: StoredToken) -> Result<()> {
        self.update(|tokens| {
            tokens.insert(user_id, token);
        })
    }

    fn remove(&self, user_id: &UserId) -> Result<()> {
        self.update(|tokens| {
            tokens.remove(user_id);
        })
    }
}
