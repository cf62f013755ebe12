//! Gmail API integration
//!
//! This module provides:
//! - Wire types for the messages list and metadata endpoints
//! - The `MailProvider` seam used by the inbox pipeline
//! - A blocking Gmail API client
//! - Normalization of metadata responses into `EmailRecord`s

mod client;
mod normalize;
mod provider;

pub use client::GmailClient;
pub use normalize::{extract_header, normalize_message};
pub use provider::{MailProvider, INBOX_LABEL, METADATA_HEADERS, PAGE_SIZE};

/// Gmail API response types
pub mod api {
    use serde::{Deserialize, Serialize};

    /// Response from listing messages
    #[derive(Debug, Default, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ListMessagesResponse {
        pub messages: Option<Vec<MessageRef>>,
        pub next_page_token: Option<String>,
        pub result_size_estimate: Option<u32>,
    }

    /// Reference to a message (just ID and thread ID)
    #[derive(Debug, Clone, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MessageRef {
        pub id: String,
        #[serde(default)]
        pub thread_id: String,
    }

    /// Message returned by `format=metadata`
    #[derive(Debug, Clone, Default, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MessageMetadata {
        pub id: String,
        pub thread_id: Option<String>,
        pub snippet: Option<String>,
        pub payload: Option<MessagePayload>,
        pub internal_date: Option<String>,
    }

    /// Payload carrying the requested headers
    #[derive(Debug, Clone, Default, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MessagePayload {
        pub headers: Option<Vec<Header>>,
        pub mime_type: Option<String>,
    }

    /// Email header (name-value pair)
    #[derive(Debug, Clone, Deserialize, Serialize)]
    pub struct Header {
        pub name: String,
        pub value: String,
    }

    impl Header {
        pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
            Self {
                name: name.into(),
                value: value.into(),
            }
        }
    }
}
