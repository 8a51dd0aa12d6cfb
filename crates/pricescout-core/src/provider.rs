//! Capability interface for offer backends.

use async_trait::async_trait;
use thiserror::Error;

use crate::offers::RawOffer;
use crate::region::Region;

/// A genuine provider failure. "No results" is never an error: providers
/// return `Ok(vec![])` for that.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("provider rejected credentials: {0}")]
    Unauthorized(String),

    #[error("provider quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("provider rejected request: {0}")]
    BadRequest(String),

    #[error("provider returned HTTP {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("provider transport failure: {0}")]
    Transport(String),

    #[error("provider response could not be decoded: {0}")]
    InvalidResponse(String),
}

/// A backend that turns a query into raw offers.
///
/// Implementations own their transport concerns (timeouts, retries,
/// cancellation). Callers treat every `Err` as terminal.
#[async_trait]
pub trait OfferProvider: Send + Sync {
    /// Short identifier used in logs, e.g. `"serpapi:google_shopping"`.
    fn name(&self) -> &str;

    /// Whether the provider has the credentials it needs to run.
    fn is_configured(&self) -> bool {
        true
    }

    /// Runs one query against the backend.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] for authentication, quota, request, transport
    /// or decoding failures. An empty result set is `Ok(vec![])`.
    async fn fetch(&self, query_text: &str, region: Region)
        -> Result<Vec<RawOffer>, ProviderError>;
}
