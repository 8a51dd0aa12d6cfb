use std::sync::Arc;

use pricescout_core::{AppConfig, FallbackPolicy, Region, SearchStatus};
use pricescout_engine::{ActivityLedger, SearchEngine};
use pricescout_serpapi::SerpApiClient;

/// Runs a single search against SerpApi and prints the `SearchResult` as
/// pretty JSON on stdout.
///
/// Non-OK statuses are printed like any other result; only a provider
/// failure makes the command exit non-zero.
///
/// # Errors
///
/// Returns an error if the SerpApi client cannot be constructed, the result
/// cannot be serialized, or the provider reported a hard failure.
pub(crate) async fn run_search(
    config: &AppConfig,
    query: &str,
    region: &str,
    reuse_tier1: bool,
) -> anyhow::Result<()> {
    let query = query.trim();
    if query.is_empty() {
        anyhow::bail!("query must not be empty");
    }

    let region = Region::parse(region);
    let fallback = if reuse_tier1 {
        FallbackPolicy::ReuseTierOne
    } else {
        config.fallback_policy
    };

    let provider = SerpApiClient::from_app_config(config)?;
    let engine = SearchEngine::new(Arc::new(provider), Arc::new(ActivityLedger::new()))
        .with_fallback_policy(fallback);

    tracing::info!(query, region = %region, fallback = %fallback, "running search");
    let result = engine.search(query, region).await;
    println!("{}", serde_json::to_string_pretty(&result)?);

    if result.status == SearchStatus::ProviderError {
        anyhow::bail!(
            "provider error: {}",
            result.error.as_deref().unwrap_or("unknown")
        );
    }
    Ok(())
}
