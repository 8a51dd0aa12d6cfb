//! Two-tier cheapest-offer search.
//!
//! Tier 1 asks the provider for bulk/trade listings and keeps only offers
//! that look wholesale. When none qualify, tier 2 re-asks with the plain query
//! and accepts any usable offer. A provider "no results" answer in tier 1 is
//! expected and simply triggers tier 2; a provider error in either tier ends
//! the search.

use std::sync::Arc;

use pricescout_core::{
    FallbackPolicy, LedgerEntry, Offer, OfferProvider, ProviderError, RawOffer, Region,
    SearchMode, SearchResult,
};

use crate::classify::looks_wholesale;
use crate::ledger::ActivityLedger;
use crate::price::parse_raw_price;

/// Appended to the caller's query for the wholesale-biased tier.
pub const WHOLESALE_QUERY_SUFFIX: &str = " wholesale bulk trade b2b case pack";

#[must_use]
pub fn wholesale_query(query: &str) -> String {
    format!("{query}{WHOLESALE_QUERY_SUFFIX}")
}

/// One provider invocation within a search. Created and dropped inside
/// [`SearchEngine::search`].
#[derive(Debug)]
struct SearchTier {
    query_text: String,
    region: Region,
    offers: Vec<Offer>,
    mode: SearchMode,
}

impl SearchTier {
    fn usable(&self) -> Vec<Offer> {
        self.offers.iter().filter(|o| o.is_usable()).cloned().collect()
    }

    fn usable_wholesale(&self) -> Vec<Offer> {
        self.offers
            .iter()
            .filter(|o| o.is_usable() && o.is_wholesale == Some(true))
            .cloned()
            .collect()
    }

    fn log_completed(&self, provider: &str) {
        tracing::debug!(
            provider,
            query = %self.query_text,
            region = %self.region,
            tier = %self.mode,
            count = self.offers.len(),
            "provider tier completed"
        );
    }
}

/// Runs the tiered search against one provider and records successful
/// selections in a shared [`ActivityLedger`].
pub struct SearchEngine {
    provider: Arc<dyn OfferProvider>,
    ledger: Arc<ActivityLedger>,
    fallback: FallbackPolicy,
}

impl SearchEngine {
    /// Creates an engine using [`FallbackPolicy::Requery`].
    #[must_use]
    pub fn new(provider: Arc<dyn OfferProvider>, ledger: Arc<ActivityLedger>) -> Self {
        Self {
            provider,
            ledger,
            fallback: FallbackPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_fallback_policy(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }

    #[must_use]
    pub fn ledger(&self) -> &Arc<ActivityLedger> {
        &self.ledger
    }

    #[must_use]
    pub fn provider(&self) -> &Arc<dyn OfferProvider> {
        &self.provider
    }

    /// Finds the cheapest usable offer for `query` in `region`.
    ///
    /// Never fails: every outcome, including provider errors, is reported
    /// through [`SearchResult::status`].
    pub async fn search(&self, query: &str, region: Region) -> SearchResult {
        if !self.provider.is_configured() {
            tracing::warn!(
                provider = self.provider.name(),
                "provider has no credentials; skipping search"
            );
            return SearchResult::missing_config(query, region);
        }

        let tier_one = match self
            .run_tier(wholesale_query(query), region, SearchMode::WholesalePriority)
            .await
        {
            Ok(tier) => tier,
            Err(e) => {
                return Self::provider_failure(query, region, SearchMode::WholesalePriority, &e);
            }
        };

        let wholesale = tier_one.usable_wholesale();
        if let Some(best) = cheapest(&wholesale).cloned() {
            return self
                .select(query, region, SearchMode::WholesalePriority, best, wholesale)
                .await;
        }

        if self.fallback == FallbackPolicy::ReuseTierOne {
            let usable = tier_one.usable();
            if let Some(best) = cheapest(&usable).cloned() {
                tracing::debug!(
                    query,
                    count = usable.len(),
                    "no wholesale offers; reusing tier-1 results"
                );
                return self
                    .select(query, region, SearchMode::RetailFallback, best, usable)
                    .await;
            }
        }

        tracing::debug!(
            query,
            tier_one_offers = tier_one.offers.len(),
            "no wholesale offers; falling back to retail query"
        );

        let tier_two = match self
            .run_tier(query.to_owned(), region, SearchMode::RetailFallback)
            .await
        {
            Ok(tier) => tier,
            Err(e) => {
                return Self::provider_failure(query, region, SearchMode::RetailFallback, &e);
            }
        };

        if tier_two.offers.is_empty() {
            return SearchResult::no_results(query, region);
        }

        let usable = tier_two.usable();
        let Some(best) = cheapest(&usable).cloned() else {
            tracing::debug!(
                query,
                count = tier_two.offers.len(),
                "retail offers returned but none had a usable price"
            );
            return SearchResult::no_price_parsed(query, region, tier_two.offers);
        };

        self.select(query, region, SearchMode::RetailFallback, best, usable)
            .await
    }

    async fn run_tier(
        &self,
        query_text: String,
        region: Region,
        mode: SearchMode,
    ) -> Result<SearchTier, ProviderError> {
        let raw = self.provider.fetch(&query_text, region).await?;
        let classify = mode == SearchMode::WholesalePriority;
        let offers: Vec<Offer> = raw
            .into_iter()
            .filter_map(|r| prepare_offer(r, classify))
            .collect();

        let tier = SearchTier {
            query_text,
            region,
            offers,
            mode,
        };
        tier.log_completed(self.provider.name());
        Ok(tier)
    }

    async fn select(
        &self,
        query: &str,
        region: Region,
        mode: SearchMode,
        best: Offer,
        results: Vec<Offer>,
    ) -> SearchResult {
        tracing::info!(
            query,
            region = %region,
            mode = %mode,
            price = ?best.price_value,
            title = %best.title,
            "selected best offer"
        );

        match LedgerEntry::from_selection(query, region, mode, &best) {
            Some(entry) => self.ledger.append(entry).await,
            None => tracing::debug!(query, "selected offer had no price; ledger entry skipped"),
        }

        SearchResult::ok(query, region, mode, best, results)
    }

    fn provider_failure(
        query: &str,
        region: Region,
        mode: SearchMode,
        error: &ProviderError,
    ) -> SearchResult {
        tracing::warn!(
            query,
            region = %region,
            tier = %mode,
            error = %error,
            "provider error; aborting search"
        );
        SearchResult::provider_error(query, region, error.to_string())
    }
}

/// Normalizes, prices and (for tier 1) classifies one raw offer.
fn prepare_offer(raw: RawOffer, classify: bool) -> Option<Offer> {
    let price_value = parse_raw_price(&raw.price);
    let mut offer = Offer::from_raw(raw)?;
    offer.price_value = price_value;
    if classify {
        offer.is_wholesale = Some(looks_wholesale(&offer));
    }
    Some(offer)
}

/// Cheapest usable offer; ties go to the earliest in provider order.
fn cheapest(offers: &[Offer]) -> Option<&Offer> {
    offers
        .iter()
        .filter(|o| o.is_usable())
        .min_by(|a, b| price_key(a).total_cmp(&price_key(b)))
}

fn price_key(offer: &Offer) -> f64 {
    offer.price_value.unwrap_or(f64::INFINITY)
}
