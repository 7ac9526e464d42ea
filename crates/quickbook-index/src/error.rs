/// Error `type` OpenSearch reports when the index name is already taken.
pub const ALREADY_EXISTS_ERROR: &str = "resource_already_exists_exception";

#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("collection lookup failed: {0}")]
    Lookup(String),

    #[error("collection '{name}' not found")]
    CollectionNotFound { name: String },

    #[error("invalid collection endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("failed to resolve AWS credentials: {0}")]
    Credentials(String),

    #[error("request signing failed: {0}")]
    Signing(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization/deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),

    #[error("index API error (HTTP {status}) {error_type}: {reason}")]
    Api {
        status: u16,
        error_type: String,
        reason: String,
    },
}

impl IndexError {
    /// Whether the service rejected the request because the index already exists.
    #[must_use]
    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::Api { error_type, .. } if error_type == ALREADY_EXISTS_ERROR)
    }
}
