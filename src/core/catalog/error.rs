//! Upstream fetch errors.

/// Why a catalog fetch produced nothing.
///
/// Timeouts surface as `Transport`, the same as refused connections.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("upstream returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid catalog payload: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// True when the request timed out before a response arrived.
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Transport(e) if e.is_timeout())
    }
}

/// Why a catalog client could not be constructed.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Config(#[from] crate::core::config::ConfigError),
    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}
