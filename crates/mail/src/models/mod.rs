//! Domain models for inbox previews

mod message;
mod record;
mod session;

pub use message::{EmailAddress, MessageId};
pub use record::{EmailRecord, NO_SUBJECT};
pub use session::{Credential, SessionIdentity, UserId};
