//! Inbox fetch-and-normalize pipeline

mod fetch;

pub use fetch::{FetchStats, fetch_inbox, fetch_inbox_at, fetch_inbox_with_stats};
