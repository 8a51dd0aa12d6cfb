use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// SerpApi engine used for offer lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerpApiEngine {
    /// `engine=google_shopping`; reads `shopping_results`.
    GoogleShopping,
    /// `engine=google`; reads prices out of `organic_results` rich snippets.
    Google,
}

impl SerpApiEngine {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SerpApiEngine::GoogleShopping => "google_shopping",
            SerpApiEngine::Google => "google",
        }
    }
}

impl std::fmt::Display for SerpApiEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the search does when the wholesale-biased tier finds offers but none
/// of them look wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// Re-query the provider with the unmodified query.
    #[default]
    Requery,
    /// Select among all usable tier-1 offers without a second provider call.
    ReuseTierOne,
}

impl std::fmt::Display for FallbackPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FallbackPolicy::Requery => write!(f, "requery"),
            FallbackPolicy::ReuseTierOne => write!(f, "reuse_tier1"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// `None` when unset, blank, or still the placeholder value.
    pub serpapi_key: Option<String>,
    pub serpapi_base_url: String,
    pub serpapi_engine: SerpApiEngine,
    pub language: String,
    pub result_limit: u32,
    pub provider_timeout_secs: u64,
    pub provider_user_agent: String,
    pub provider_max_retries: u32,
    pub provider_backoff_base_secs: u64,
    pub fallback_policy: FallbackPolicy,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("serpapi_key", &self.serpapi_key.as_ref().map(|_| "[redacted]"))
            .field("serpapi_base_url", &self.serpapi_base_url)
            .field("serpapi_engine", &self.serpapi_engine)
            .field("language", &self.language)
            .field("result_limit", &self.result_limit)
            .field("provider_timeout_secs", &self.provider_timeout_secs)
            .field("provider_user_agent", &self.provider_user_agent)
            .field("provider_max_retries", &self.provider_max_retries)
            .field(
                "provider_backoff_base_secs",
                &self.provider_backoff_base_secs,
            )
            .field("fallback_policy", &self.fallback_policy)
            .finish()
    }
}
