use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlacesError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("API quota exceeded (retry after {retry_after_secs}s)")]
    QuotaExceeded { retry_after_secs: u64 },

    #[error("authentication error (HTTP {status}): {message}")]
    Auth { status: u16, message: String },

    #[error("invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
