mod app_config;
mod config;
pub mod offers;
pub mod provider;
pub mod region;
pub mod search;

use thiserror::Error;

pub use app_config::{AppConfig, Environment, FallbackPolicy, SerpApiEngine};
pub use config::{load_app_config, load_app_config_from_env, SERPAPI_KEY_PLACEHOLDER};
pub use offers::{Offer, RawOffer, RawPrice};
pub use provider::{OfferProvider, ProviderError};
pub use region::Region;
pub use search::{LedgerEntry, SearchMode, SearchResult, SearchStatus};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
