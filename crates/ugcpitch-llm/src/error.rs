use thiserror::Error;

/// Errors returned by a text generator.
#[derive(Debug, Error)]
pub enum LlmError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success HTTP status.
    #[error("API request failed: {status}")]
    RequestFailure { status: u16 },

    /// The response body did not match the expected shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// A [`crate::ScriptedGenerator`] was called more times than it had replies.
    #[error("scripted generator has no reply left (call {call})")]
    ScriptExhausted { call: usize },
}

impl LlmError {
    /// HTTP status carried by the error, if the service produced one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            LlmError::RequestFailure { status } => Some(*status),
            LlmError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
