//! Credential lookup for authenticated sessions
//!
//! Tokens are issued and refreshed by the identity provider; this module
//! only reads what it stored.

mod file_store;
mod resolver;
mod store;

pub use file_store::FileCredentialStore;
pub use resolver::TokenResolver;
pub use store::{CredentialStore, InMemoryCredentialStore, StoredToken};
