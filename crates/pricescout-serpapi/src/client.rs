//! HTTP client for SerpApi's `search.json` endpoint.

use std::time::Duration;

use pricescout_core::{AppConfig, RawOffer, Region, SerpApiEngine};
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;

use crate::error::SerpApiError;
use crate::normalize::{organic_offers, shopping_offers};
use crate::retry::retry_with_backoff;
use crate::types::SerpApiResponse;

const DEFAULT_BASE_URL: &str = "https://serpapi.com/";

/// Marker SerpApi uses when Google simply had nothing for the query.
const NO_RESULTS_MARKER: &str = "hasn't returned any results";

/// Client for SerpApi's Google Shopping and Google Search engines.
///
/// Use [`SerpApiClient::new`] for production or
/// [`SerpApiClient::with_base_url`] to point at a mock server in tests.
/// A client without an API key can be built; it reports itself as
/// unconfigured and refuses to send requests.
pub struct SerpApiClient {
    client: Client,
    api_key: Option<String>,
    base_url: Url,
    pub(crate) engine: SerpApiEngine,
    language: String,
    result_limit: u32,
    max_retries: u32,
    backoff_base_secs: u64,
    pub(crate) name: String,
}

/// Error body SerpApi returns on non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<String>,
}

impl SerpApiClient {
    /// Creates a client pointed at the production SerpApi host.
    ///
    /// # Errors
    ///
    /// Returns [`SerpApiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: Option<&str>,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, SerpApiError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SerpApiError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`SerpApiError::InvalidBaseUrl`] if `base_url` does
    /// not parse.
    pub fn with_base_url(
        api_key: Option<&str>,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, SerpApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so `join("search.json")` appends instead
        // of replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| SerpApiError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        let engine = SerpApiEngine::GoogleShopping;
        Ok(Self {
            client,
            api_key: api_key
                .map(str::trim)
                .filter(|k| !k.is_empty() && *k != pricescout_core::SERPAPI_KEY_PLACEHOLDER)
                .map(str::to_owned),
            base_url,
            engine,
            language: "en".to_owned(),
            result_limit: 20,
            max_retries: 0,
            backoff_base_secs: 0,
            name: format!("serpapi:{engine}"),
        })
    }

    /// Builds a client from the application configuration.
    ///
    /// # Errors
    ///
    /// Same as [`SerpApiClient::with_base_url`].
    pub fn from_app_config(config: &AppConfig) -> Result<Self, SerpApiError> {
        Ok(Self::with_base_url(
            config.serpapi_key.as_deref(),
            config.provider_timeout_secs,
            &config.provider_user_agent,
            &config.serpapi_base_url,
        )?
        .with_engine(config.serpapi_engine)
        .with_language(&config.language)
        .with_result_limit(config.result_limit)
        .with_retries(config.provider_max_retries, config.provider_backoff_base_secs))
    }

    #[must_use]
    pub fn with_engine(mut self, engine: SerpApiEngine) -> Self {
        self.engine = engine;
        self.name = format!("serpapi:{engine}");
        self
    }

    #[must_use]
    pub fn with_language(mut self, language: &str) -> Self {
        language.clone_into(&mut self.language);
        self
    }

    #[must_use]
    pub fn with_result_limit(mut self, result_limit: u32) -> Self {
        self.result_limit = result_limit;
        self
    }

    /// `max_retries` extra attempts for network failures and 5xx responses,
    /// waiting `backoff_base_secs * 2^attempt` seconds between them.
    #[must_use]
    pub fn with_retries(mut self, max_retries: u32, backoff_base_secs: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_secs = backoff_base_secs;
        self
    }

    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Runs one query and maps the engine's result list into raw offers.
    ///
    /// An empty `Vec` means SerpApi answered but had nothing for the query.
    ///
    /// # Errors
    ///
    /// - [`SerpApiError::MissingApiKey`] if no key is configured (nothing is sent).
    /// - [`SerpApiError::Unauthorized`] on HTTP 401/403.
    /// - [`SerpApiError::QuotaExceeded`] on HTTP 429.
    /// - [`SerpApiError::BadRequest`] on other 4xx or an `error` in a 2xx body.
    /// - [`SerpApiError::Upstream`] on 5xx after retries are exhausted.
    /// - [`SerpApiError::Http`] on network failure after retries are exhausted.
    /// - [`SerpApiError::Deserialize`] if a 2xx body is not the expected JSON.
    pub async fn search(&self, query: &str, region: Region) -> Result<Vec<RawOffer>, SerpApiError> {
        let api_key = self.api_key.as_deref().ok_or(SerpApiError::MissingApiKey)?;
        let url = self.build_url(api_key, query, region)?;

        let response = retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let url = url.clone();
            async move { self.request(url, query).await }
        })
        .await?;

        if let Some(message) = response.error {
            if is_no_results(&message) {
                return Ok(Vec::new());
            }
            return Err(SerpApiError::BadRequest(message));
        }

        let offers = match self.engine {
            SerpApiEngine::GoogleShopping => shopping_offers(response.shopping_results),
            SerpApiEngine::Google => organic_offers(response.organic_results),
        };
        Ok(offers)
    }

    /// Builds the request URL with percent-encoded query parameters.
    fn build_url(&self, api_key: &str, query: &str, region: Region) -> Result<Url, SerpApiError> {
        let mut url =
            self.base_url
                .join("search.json")
                .map_err(|e| SerpApiError::InvalidBaseUrl {
                    url: self.base_url.to_string(),
                    reason: e.to_string(),
                })?;
        url.query_pairs_mut()
            .append_pair("engine", self.engine.as_str())
            .append_pair("q", query)
            .append_pair("api_key", api_key)
            .append_pair("gl", region.provider_code())
            .append_pair("hl", &self.language)
            .append_pair("num", &self.result_limit.to_string());
        Ok(url)
    }

    /// Sends one GET and classifies the response by status code.
    async fn request(&self, url: Url, query: &str) -> Result<SerpApiResponse, SerpApiError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            return serde_json::from_str::<SerpApiResponse>(&body).map_err(|e| {
                SerpApiError::Deserialize {
                    context: format!("{} results for \"{query}\"", self.engine),
                    source: e,
                }
            });
        }

        let message = serde_json::from_str::<ErrorEnvelope>(&body)
            .ok()
            .and_then(|env| env.error)
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));

        // Some SerpApi deployments send the empty-result marker with a 4xx.
        if is_no_results(&message) {
            return Ok(SerpApiResponse {
                error: Some(message),
                ..SerpApiResponse::default()
            });
        }

        Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => SerpApiError::Unauthorized(message),
            StatusCode::TOO_MANY_REQUESTS => SerpApiError::QuotaExceeded(message),
            s if s.is_client_error() => SerpApiError::BadRequest(message),
            s => SerpApiError::Upstream {
                status: s.as_u16(),
                message,
            },
        })
    }
}

fn is_no_results(message: &str) -> bool {
    message.to_lowercase().contains(NO_RESULTS_MARKER)
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
