use pricescout_core::ProviderError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SerpApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("no SerpApi key configured")]
    MissingApiKey,

    #[error("invalid SerpApi base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// HTTP 401/403: the key is wrong, revoked, or lacks access.
    #[error("SerpApi rejected the API key: {0}")]
    Unauthorized(String),

    /// HTTP 429: the account is out of searches or over its hourly cap.
    #[error("SerpApi quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("SerpApi rejected the request: {0}")]
    BadRequest(String),

    #[error("unexpected HTTP status {status} from SerpApi: {message}")]
    Upstream { status: u16, message: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

impl From<SerpApiError> for ProviderError {
    fn from(err: SerpApiError) -> Self {
        match err {
            SerpApiError::MissingApiKey => ProviderError::Unauthorized(err.to_string()),
            SerpApiError::Unauthorized(msg) => ProviderError::Unauthorized(msg),
            SerpApiError::QuotaExceeded(msg) => ProviderError::QuotaExceeded(msg),
            SerpApiError::BadRequest(msg) => ProviderError::BadRequest(msg),
            SerpApiError::Upstream { status, message } => {
                ProviderError::Upstream { status, message }
            }
            SerpApiError::Http(e) => ProviderError::Transport(e.to_string()),
            SerpApiError::InvalidBaseUrl { .. } => ProviderError::BadRequest(err.to_string()),
            SerpApiError::Deserialize { .. } => ProviderError::InvalidResponse(err.to_string()),
        }
    }
}
