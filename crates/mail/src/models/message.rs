//! Message identity and sender address models

use serde::{Deserialize, Serialize};

/// Unique identifier for a message (Gmail message ID)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

impl MessageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for MessageId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for MessageId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Sender of a message, split into display name and address
///
/// Both fields are always populated: when a `From` header cannot be split,
/// each falls back to the raw header text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAddress {
    /// Display name (e.g., "Jane Doe"), or the address when no name is present
    pub name: String,
    /// Email address (e.g., "jane@example.com")
    pub email: String,
}

/// Raw captures from a `From` header before fallbacks are applied
#[derive(Debug, PartialEq)]
struct FromParts<'a> {
    name: Option<&'a str>,
    address: &'a str,
}

impl EmailAddress {
    /// Create an address whose display name is the address itself
    pub fn new(email: impl Into<String>) -> Self {
        let email = email.into();
        Self {
            name: email.clone(),
            email,
        }
    }

    /// Create an address with a display name
    pub fn with_name(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Parse a `From` header value such as `"Jane Doe" <jane@example.com>`
    ///
    /// Three shapes are recognised, tried in order:
    /// 1. a display name (optionally quoted) followed by whitespace and an address
    /// 2. an address in angle brackets
    /// 3. a bare address
    ///
    /// `name` prefers the display name, then the address, then the raw header.
    /// `email` prefers the address, then the raw header. Both are trimmed.
    pub fn parse(raw: &str) -> Self {
        let parts = parse_from_parts(raw);
        let address = parts.as_ref().map(|p| p.address);

        let name = parts
            .as_ref()
            .and_then(|p| p.name)
            .filter(|n| !n.is_empty())
            .or(address)
            .unwrap_or(raw);
        let email = address.unwrap_or(raw);

        Self {
            name: name.trim_matches(is_header_space).to_string(),
            email: email.trim_matches(is_header_space).to_string(),
        }
    }
}

fn parse_from_parts(raw: &str) -> Option<FromParts<'_>> {
    parse_named(raw).or_else(|| {
        address_part(raw).map(|address| FromParts {
            name: None,
            address,
        })
    })
}

/// Display name + whitespace + address. The rightmost workable split wins,
/// so the longest possible name is kept.
fn parse_named(raw: &str) -> Option<FromParts<'_>> {
    raw.char_indices()
        .rev()
        .filter(|(_, c)| is_header_space(*c))
        .find_map(|(i, c)| {
            let name = display_name(&raw[..i])?;
            let address = address_part(&raw[i + c.len_utf8()..])?;
            Some(FromParts {
                name: Some(name),
                address,
            })
        })
}

/// Whitespace as browsers see it: Unicode white space plus the BOM, minus NEL.
fn is_header_space(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

/// A display name may be wrapped in quotes but never contains one.
fn display_name(s: &str) -> Option<&str> {
    let s = s.strip_prefix('"').unwrap_or(s);
    let s = s.strip_suffix('"').unwrap_or(s);
    if s.contains('"') { None } else { Some(s) }
}

fn address_part(s: &str) -> Option<&str> {
    parse_angle(s).or_else(|| parse_bare(s))
}

/// `<addr>` or `<addr` with a non-empty address
fn parse_angle(s: &str) -> Option<&str> {
    let body = s.strip_suffix('>').unwrap_or(s);
    if body.contains('>') {
        return None;
    }
    body.strip_prefix('<').filter(|addr| !addr.is_empty())
}

/// Anything non-empty without a `>` except an optional trailing one
fn parse_bare(s: &str) -> Option<&str> {
    let body = s.strip_suffix('>').unwrap_or(s);
    if body.is_empty() || body.contains('>') {
        None
    } else {
        Some(body)
    }
}
