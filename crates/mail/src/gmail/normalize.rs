//! Gmail API response normalization
//!
//! Converts metadata responses to UI-ready `EmailRecord`s.

use chrono::{DateTime, TimeZone};
use std::fmt::Display;

use super::api::MessageMetadata;
use crate::format::format_relative_date;
use crate::models::{EmailAddress, EmailRecord, MessageId, NO_SUBJECT};

/// Normalize one metadata response into an `EmailRecord`
///
/// `id` is the reference from the list stage; the record carries it rather
/// than whatever the detail response echoes back.
pub fn normalize_message<Tz>(id: &MessageId, detail: &MessageMetadata, now: &DateTime<Tz>) -> EmailRecord
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let from = extract_header(detail, "From").unwrap_or_default();
    let subject = extract_header(detail, "Subject").unwrap_or(NO_SUBJECT);
    let date = extract_header(detail, "Date").unwrap_or_default();

    let sender = EmailAddress::parse(from);

    EmailRecord {
        id: id.as_str().to_string(),
        name: sender.name,
        email: sender.email,
        subject: subject.to_string(),
        date: format_relative_date(date, now),
        teaser: detail.snippet.clone().unwrap_or_default(),
    }
}

/// Value of the first header named exactly `name`
///
/// Matching is case-sensitive, as the provider sends canonical casing.
/// An empty value counts as missing.
pub fn extract_header<'a>(detail: &'a MessageMetadata, name: &str) -> Option<&'a str> {
    detail
        .payload
        .as_ref()?
        .headers
        .as_ref()?
        .iter()
        .find(|h| h.name == name)
        .map(|h| h.value.as_str())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gmail::api::{Header, MessagePayload};
    use chrono::{Duration, Utc};

    fn make_detail(headers: Vec<(&str, &str)>, snippet: Option<&str>) -> MessageMetadata {
        MessageMetadata {
            id: "m1".to_string(),
            thread_id: Some("t1".to_string()),
            snippet: snippet.map(str::to_string),
            payload: Some(MessagePayload {
                headers: Some(headers.into_iter().map(|(n, v)| Header::new(n, v)).collect()),
                mime_type: None,
            }),
            internal_date: Some("0".to_string()),
        }
    }

    #[test]
    fn test_extract_header() {
        let detail = make_detail(
            vec![("From", "test@example.com"), ("Subject", "Test Subject")],
            None,
        );

        assert_eq!(extract_header(&detail, "From"), Some("test@example.com"));
        assert_eq!(extract_header(&detail, "Subject"), Some("Test Subject"));
        assert_eq!(extract_header(&detail, "Date"), None);
    }

    #[test]
    fn test_extract_header_is_case_sensitive() {
        let detail = make_detail(vec![("FROM", "test@example.com")], None);
        assert_eq!(extract_header(&detail, "From"), None);
    }

    #[test]
    fn test_extract_header_first_match_wins() {
        let detail = make_detail(vec![("Subject", "first"), ("Subject", "second")], None);
        assert_eq!(extract_header(&detail, "Subject"), Some("first"));
    }

    #[test]
    fn test_normalize_full_message() {
        let now = Utc::now();
        let date = (now - Duration::days(3)).to_rfc2822();
        let detail = make_detail(
            vec![
                ("From", "\"Jane Doe\" <jane@x.com>"),
                ("Subject", "Quarterly report"),
                ("Date", date.as_str()),
            ],
            Some("Numbers are in"),
        );

        let record = normalize_message(&MessageId::new("m1"), &detail, &now);
        assert_eq!(record.id, "m1");
        assert_eq!(record.name, "Jane Doe");
        assert_eq!(record.email, "jane@x.com");
        assert_eq!(record.subject, "Quarterly report");
        assert_eq!(record.date, "3 days ago");
        assert_eq!(record.teaser, "Numbers are in");
    }

    #[test]
    fn test_normalize_defaults() {
        let detail = make_detail(vec![], None);
        let record = normalize_message(&MessageId::new("m9"), &detail, &Utc::now());
        assert_eq!(record.id, "m9");
        assert_eq!(record.name, "");
        assert_eq!(record.email, "");
        assert_eq!(record.subject, "(No Subject)");
        assert_eq!(record.date, "");
        assert_eq!(record.teaser, "");
    }

    #[test]
    fn test_empty_subject_uses_placeholder() {
        let detail = make_detail(vec![("Subject", "")], None);
        let record = normalize_message(&MessageId::new("m1"), &detail, &Utc::now());
        assert_eq!(record.subject, "(No Subject)");
    }

    #[test]
    fn test_missing_payload() {
        let detail = MessageMetadata {
            id: "m2".to_string(),
            snippet: Some("hi".to_string()),
            ..Default::default()
        };
        let record = normalize_message(&MessageId::new("m2"), &detail, &Utc::now());
        assert_eq!(record.subject, "(No Subject)");
        assert_eq!(record.teaser, "hi");
    }

    #[test]
    fn test_record_uses_list_stage_id() {
        let detail = make_detail(vec![], None);
        let record = normalize_message(&MessageId::new("from-list"), &detail, &Utc::now());
        assert_eq!(record.id, "from-list");
    }
}
