use thiserror::Error;

/// Errors talking to the remote persistence store.
#[derive(Debug, Error)]
pub enum CloudError {
    /// URL or key missing; the game keeps working offline.
    #[error("Cloud sync not configured: {reason}")]
    NotConfigured { reason: String },

    #[error("Invalid cloud URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Connection to '{table}' failed: {source}")]
    Connection {
        table: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to '{table}' timed out")]
    Timeout { table: &'static str },

    /// The store answered with a non-2xx status.
    #[error("'{table}' returned {status}: {message}")]
    Status {
        table: &'static str,
        status: u16,
        message: String,
    },

    #[error("Failed to decode '{table}' response: {source}")]
    Decode {
        table: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("Player profile '{name}' was not returned after insert")]
    MissingProfile { name: String },
}

impl CloudError {
    pub(crate) fn transport(table: &'static str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            CloudError::Timeout { table }
        } else {
            CloudError::Connection { table, source }
        }
    }
}
