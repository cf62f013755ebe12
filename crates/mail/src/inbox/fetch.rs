//! Inbox fetch implementation
//!
//! One list call, then one metadata call per listed message, in order.
//! Nothing here returns an error: failures collapse to fewer (or zero)
//! records and a log line.

use chrono::{DateTime, Local, TimeZone};
use log::{error, info, warn};
use std::fmt::Display;

use crate::gmail::{INBOX_LABEL, METADATA_HEADERS, MailProvider, PAGE_SIZE, normalize_message};
use crate::models::{Credential, EmailRecord, MessageId};

/// Statistics from one fetch
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FetchStats {
    /// Message references returned by the list stage
    pub messages_listed: usize,
    /// Records produced
    pub messages_normalized: usize,
    /// Messages dropped because their detail call failed
    pub messages_skipped: usize,
    /// Whether the list stage itself failed
    pub list_failed: bool,
    /// Duration of the fetch
    pub duration_ms: u64,
}

/// Fetch and normalize the newest inbox messages, dated against the local clock
pub fn fetch_inbox(provider: &dyn MailProvider, credential: &Credential) -> Vec<EmailRecord> {
    fetch_inbox_at(provider, credential, &Local::now())
}

/// Fetch and normalize the newest inbox messages, dated against `now`
pub fn fetch_inbox_at<Tz>(
    provider: &dyn MailProvider,
    credential: &Credential,
    now: &DateTime<Tz>,
) -> Vec<EmailRecord>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    fetch_inbox_with_stats(provider, credential, now).0
}

/// Fetch and normalize, also reporting what happened along the way
///
/// Records keep the order of the list stage. A failed list call yields no
/// records and no detail calls; a failed detail call drops only that message.
pub fn fetch_inbox_with_stats<Tz>(
    provider: &dyn MailProvider,
    credential: &Credential,
    now: &DateTime<Tz>,
) -> (Vec<EmailRecord>, FetchStats)
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let start = std::time::Instant::now();
    let mut stats = FetchStats::default();

    // 1. List message IDs in the inbox
    let message_refs = match provider.list_messages(credential, INBOX_LABEL, PAGE_SIZE) {
        Ok(list) => list.messages.unwrap_or_default(),
        Err(e) => {
            error!("Failed to fetch email list: {}", e);
            stats.list_failed = true;
            stats.duration_ms = start.elapsed().as_millis() as u64;
            return (Vec::new(), stats);
        }
    };
    stats.messages_listed = message_refs.len();

    if message_refs.is_empty() {
        stats.duration_ms = start.elapsed().as_millis() as u64;
        return (Vec::new(), stats);
    }

    // 2. Fetch metadata for each message, one at a time
    let mut records = Vec::with_capacity(message_refs.len());
    for msg_ref in &message_refs {
        let id = MessageId::new(&msg_ref.id);

        match provider.get_message_metadata(credential, &id, &METADATA_HEADERS) {
            // 3. Normalize
            Ok(detail) => {
                records.push(normalize_message(&id, &detail, now));
                stats.messages_normalized += 1;
            }
            Err(e) => {
                warn!("Failed to fetch message {}: {}", id.as_str(), e);
                stats.messages_skipped += 1;
            }
        }
    }

    stats.duration_ms = start.elapsed().as_millis() as u64;
    info!(
        "Fetched inbox: {} listed, {} normalized, {} skipped in {}ms",
        stats.messages_listed, stats.messages_normalized, stats.messages_skipped, stats.duration_ms
    );

    (records, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use crate::gmail::api::{Header, ListMessagesResponse, MessageMetadata, MessagePayload, MessageRef};
    use chrono::Utc;
    use std::sync::Mutex;

    /// Provider that serves a fixed list and records every call
    struct StubProvider {
        ids: Option<Vec<&'static str>>,
        fail_list: bool,
        fail_ids: Vec<&'static str>,
        calls: Mutex<Vec<String>>,
    }

    impl StubProvider {
        fn new(ids: Vec<&'static str>) -> Self {
            Self {
                ids: Some(ids),
                fail_list: false,
                fail_ids: Vec::new(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl MailProvider for StubProvider {
        fn list_messages(
            &self,
            _credential: &Credential,
            label: &str,
            max_results: usize,
        ) -> Result<ListMessagesResponse, ProviderError> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("list:{}:{}", label, max_results));
            if self.fail_list {
                return Err(ProviderError::Status { status: 500 });
            }
            Ok(ListMessagesResponse {
                messages: self.ids.as_ref().map(|ids| {
                    ids.iter()
                        .map(|id| MessageRef {
                            id: id.to_string(),
                            thread_id: format!("t-{}", id),
                        })
                        .collect()
                }),
                ..Default::default()
            })
        }

        fn get_message_metadata(
            &self,
            _credential: &Credential,
            id: &MessageId,
            headers: &[&str],
        ) -> Result<MessageMetadata, ProviderError> {
            assert_eq!(headers, ["From", "Subject", "Date"]);
            self.calls.lock().unwrap().push(format!("get:{}", id.as_str()));
            if self.fail_ids.iter().any(|f| *f == id.as_str()) {
                return Err(ProviderError::Transport("connection reset".to_string()));
            }
            Ok(MessageMetadata {
                id: id.as_str().to_string(),
                snippet: Some(format!("snippet {}", id.as_str())),
                payload: Some(MessagePayload {
                    headers: Some(vec![Header::new("Subject", format!("Subject {}", id.as_str()))]),
                    mime_type: None,
                }),
                ..Default::default()
            })
        }
    }

    #[test]
    fn test_list_uses_inbox_page() {
        let provider = StubProvider::new(vec![]);
        fetch_inbox_at(&provider, &Credential::new("t"), &Utc::now());
        assert_eq!(provider.calls(), vec!["list:INBOX:20"]);
    }

    #[test]
    fn test_missing_messages_field_is_empty() {
        let provider = StubProvider {
            ids: None,
            ..StubProvider::new(vec![])
        };
        let (records, stats) = fetch_inbox_with_stats(&provider, &Credential::new("t"), &Utc::now());
        assert!(records.is_empty());
        assert!(!stats.list_failed);
        assert_eq!(provider.calls().len(), 1);
    }

    #[test]
    fn test_stats_count_skips() {
        let provider = StubProvider {
            fail_ids: vec!["b"],
            ..StubProvider::new(vec!["a", "b", "c"])
        };
        let (records, stats) = fetch_inbox_with_stats(&provider, &Credential::new("t"), &Utc::now());
        assert_eq!(records.len(), 2);
        assert_eq!(stats.messages_listed, 3);
        assert_eq!(stats.messages_normalized, 2);
        assert_eq!(stats.messages_skipped, 1);
    }

    #[test]
    fn test_list_failure_sets_flag() {
        let provider = StubProvider {
            fail_list: true,
            ..StubProvider::new(vec!["a"])
        };
        let (records, stats) = fetch_inbox_with_stats(&provider, &Credential::new("t"), &Utc::now());
        assert!(records.is_empty());
        assert!(stats.list_failed);
        assert_eq!(provider.calls(), vec!["list:INBOX:20"]);
    }
}
