//! Seam between the inbox pipeline and the remote mail API

use super::api::{ListMessagesResponse, MessageMetadata};
use crate::error::ProviderError;
use crate::models::{Credential, MessageId};

/// Number of messages requested by the list stage
pub const PAGE_SIZE: usize = 20;

/// Label the list stage is scoped to
pub const INBOX_LABEL: &str = "INBOX";

/// Headers requested by the detail stage
pub const METADATA_HEADERS: [&str; 3] = ["From", "Subject", "Date"];

/// Read-only access to a remote mailbox
///
/// Every call is authenticated with the credential passed in; implementations
/// hold no per-user state.
pub trait MailProvider: Send + Sync {
    /// List message references carrying `label`, at most `max_results` of them
    fn list_messages(
        &self,
        credential: &Credential,
        label: &str,
        max_results: usize,
    ) -> Result<ListMessagesResponse, ProviderError>;

    /// Fetch the snippet and the named headers of one message
    fn get_message_metadata(
        &self,
        credential: &Credential,
        id: &MessageId,
        headers: &[&str],
    ) -> Result<MessageMetadata, ProviderError>;
}
