//! Mail crate - inbox preview logic
//!
//! This crate provides the non-UI half of the inbox preview:
//! - Domain models (EmailRecord, EmailAddress, Credential)
//! - Credential lookup for authenticated sessions
//! - Gmail API client and response normalization
//! - Relative date formatting
//! - The inbox fetch-and-normalize pipeline
//!
//! This crate has zero UI dependencies.

pub mod auth;
pub mod config;
pub mod error;
pub mod format;
pub mod gmail;
pub mod inbox;
pub mod models;
pub mod service;

pub use auth::{CredentialStore, FileCredentialStore, InMemoryCredentialStore, StoredToken, TokenResolver};
pub use config::PreviewConfig;
pub use error::ProviderError;
pub use format::{DateBucket, format_email_date, format_relative_date};
pub use gmail::{GmailClient, MailProvider};
pub use inbox::{FetchStats, fetch_inbox, fetch_inbox_at, fetch_inbox_with_stats};
pub use models::{Credential, EmailAddress, EmailRecord, MessageId, SessionIdentity, UserId};
pub use service::PreviewService;
