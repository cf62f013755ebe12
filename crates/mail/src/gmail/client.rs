//! Gmail API HTTP client
//!
//! Provides the two read-only calls the inbox preview needs.
//! Uses synchronous HTTP (ureq) to be executor-agnostic.

use log::debug;
use url::Url;

use super::api::{ListMessagesResponse, MessageMetadata};
use super::MailProvider;
use crate::error::ProviderError;
use crate::models::{Credential, MessageId};

/// Gmail API client for fetching inbox metadata
pub struct GmailClient {
    agent: ureq::Agent,
    base_url: String,
}

impl GmailClient {
    /// Gmail API base URL for the authenticated user
    pub const DEFAULT_BASE_URL: &'static str = "https://gmail.googleapis.com/gmail/v1/users/me";

    /// Create a client against the public Gmail API
    pub fn new() -> Self {
        Self::with_base_url(Self::DEFAULT_BASE_URL)
    }

    /// Create a client against another base URL (e.g. a local stub)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            agent: ureq::Agent::new_with_defaults(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn messages_url(&self) -> Result<Url, ProviderError> {
        Ok(Url::parse(&format!("{}/messages", self.base_url))?)
    }

    fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &Url,
        credential: &Credential,
    ) -> Result<T, ProviderError> {
        debug!("GET {}", url.path());

        let mut response = self
            .agent
            .get(url.as_str())
            .header("Authorization", &credential.bearer())
            .call()?;

        Ok(response.body_mut().read_json()?)
    }
}

impl Default for GmailClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MailProvider for GmailClient {
    fn list_messages(
        &self,
        credential: &Credential,
        label: &str,
        max_results: usize,
    ) -> Result<ListMessagesResponse, ProviderError> {
        let mut url = self.messages_url()?;
        url.query_pairs_mut()
            .append_pair("maxResults", &max_results.min(500).to_string())
            .append_pair("labelIds", label);

        self.get_json(&url, credential)
    }

    fn get_message_metadata(
        &self,
        credential: &Credential,
        id: &MessageId,
        headers: &[&str],
    ) -> Result<MessageMetadata, ProviderError> {
        let mut url = self.messages_url()?;
        url.path_segments_mut()
            .map_err(|_| ProviderError::InvalidUrl(self.base_url.clone()))?
            .push(id.as_str());
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("format", "metadata");
            for header in headers {
                query.append_pair("metadataHeaders", header);
            }
        }

        self.get_json(&url, credential)
    }
}
