//! Error types for mail provider calls

/// Failure of a single call to the mail provider
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// The provider answered with a non-success HTTP status
    #[error("provider returned HTTP {status}")]
    Status { status: u16 },

    /// The request never produced a response
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body was not the expected JSON
    #[error("malformed response: {0}")]
    Decode(String),

    /// The request URL could not be built
    #[error("invalid request url: {0}")]
    InvalidUrl(String),
}

impl From<ureq::Error> for ProviderError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(status) => ProviderError::Status { status },
            ureq::Error::Json(e) => ProviderError::Decode(e.to_string()),
            other => ProviderError::Transport(other.to_string()),
        }
    }
}

impl From<url::ParseError> for ProviderError {
    fn from(err: url::ParseError) -> Self {
        ProviderError::InvalidUrl(err.to_string())
    }
}
