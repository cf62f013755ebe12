//! UI-facing inbox record

use serde::{Deserialize, Serialize};

/// Subject shown when a message has no `Subject` header
pub const NO_SUBJECT: &str = "(No Subject)";

/// One normalized inbox row, ready for display
///
/// Built fresh on every fetch and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailRecord {
    /// Gmail message ID
    pub id: String,
    /// Sender display name
    pub name: String,
    /// Sender email address
    pub email: String,
    /// Subject line, or `(No Subject)`
    pub subject: String,
    /// Relative date ("Yesterday", "3 days ago", ...)
    pub date: String,
    /// Snippet text supplied by the provider
    pub teaser: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, email: &str) -> EmailRecord {
        EmailRecord {
            id: "m1".to_string(),
            name: name.to_string(),
            email: email.to_string(),
            subject: NO_SUBJECT.to_string(),
            date: "Yesterday".to_string(),
            teaser: String::new(),
        }
    }

    #[test]
    fn test_serializes_with_flat_string_fields() {
        let json = serde_json::to_value(record("Jane", "jane@x.com")).unwrap();
        assert_eq!(json["id"], "m1");
        assert_eq!(json["name"], "Jane");
        assert_eq!(json["email"], "jane@x.com");
        assert_eq!(json["subject"], "(No Subject)");
        assert_eq!(json["date"], "Yesterday");
        assert_eq!(json["teaser"], "");
    }
}
