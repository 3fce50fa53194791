use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid store list: {reason}")]
    InvalidStoreList { reason: String },

    #[error("empty store list")]
    EmptyStoreList,

    #[error("malformed availability response for store {store_id}: {reason}")]
    MalformedAvailability { store_id: String, reason: String },

    #[error("invalid endpoint URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl ClientError {
    /// `true` for failures that happened before a response body was available
    /// (network, TLS, timeouts, non-2xx status).
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ClientError::Http(_) | ClientError::UnexpectedStatus { .. }
        )
    }
}

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cache entry serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
