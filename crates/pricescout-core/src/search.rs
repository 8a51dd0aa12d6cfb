use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::offers::Offer;
use crate::region::Region;

/// Which tier of the search strategy produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    WholesalePriority,
    RetailFallback,
}

impl std::fmt::Display for SearchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchMode::WholesalePriority => write!(f, "wholesale_priority"),
            SearchMode::RetailFallback => write!(f, "retail_fallback"),
        }
    }
}

/// Outcome of one search call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    Ok,
    /// No provider credential is available.
    MissingConfig,
    /// The provider reported a genuine failure (auth, quota, bad request).
    ProviderError,
    /// The final query legitimately returned zero offers.
    NoResults,
    /// Offers existed but none carried a positive price and a link.
    NoPriceParsed,
}

impl std::fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchStatus::Ok => write!(f, "ok"),
            SearchStatus::MissingConfig => write!(f, "missing_config"),
            SearchStatus::ProviderError => write!(f, "provider_error"),
            SearchStatus::NoResults => write!(f, "no_results"),
            SearchStatus::NoPriceParsed => write!(f, "no_price_parsed"),
        }
    }
}

/// Response payload of a price search.
///
/// `best` is `Some` exactly when `status` is [`SearchStatus::Ok`]; build
/// values through the constructors to keep that true.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub query: String,
    pub region: Region,
    #[serde(rename = "message")]
    pub status: SearchStatus,
    pub best: Option<Offer>,
    pub results: Vec<Offer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<SearchMode>,
    /// Provider failure detail, only for [`SearchStatus::ProviderError`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchResult {
    fn empty(query: &str, region: Region, status: SearchStatus) -> Self {
        Self {
            query: query.to_owned(),
            region,
            status,
            best: None,
            results: Vec::new(),
            mode: None,
            error: None,
        }
    }

    #[must_use]
    pub fn missing_config(query: &str, region: Region) -> Self {
        Self::empty(query, region, SearchStatus::MissingConfig)
    }

    #[must_use]
    pub fn provider_error(query: &str, region: Region, detail: impl Into<String>) -> Self {
        Self {
            error: Some(detail.into()),
            ..Self::empty(query, region, SearchStatus::ProviderError)
        }
    }

    #[must_use]
    pub fn no_results(query: &str, region: Region) -> Self {
        Self::empty(query, region, SearchStatus::NoResults)
    }

    /// Keeps the unusable offers so callers can inspect what came back.
    #[must_use]
    pub fn no_price_parsed(query: &str, region: Region, results: Vec<Offer>) -> Self {
        Self {
            results,
            ..Self::empty(query, region, SearchStatus::NoPriceParsed)
        }
    }

    #[must_use]
    pub fn ok(
        query: &str,
        region: Region,
        mode: SearchMode,
        best: Offer,
        results: Vec<Offer>,
    ) -> Self {
        Self {
            query: query.to_owned(),
            region,
            status: SearchStatus::Ok,
            best: Some(best),
            results,
            mode: Some(mode),
            error: None,
        }
    }
}

/// Snapshot of one successful selection, kept in the activity ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub timestamp: DateTime<Utc>,
    pub query: String,
    pub region: Region,
    pub mode: SearchMode,
    pub title: String,
    pub price_value: f64,
    pub price_raw: String,
    pub source: Option<String>,
}

impl LedgerEntry {
    /// Builds an entry for the selected offer, stamped with the current time.
    ///
    /// Returns `None` if the offer carries no parsed price.
    #[must_use]
    pub fn from_selection(
        query: &str,
        region: Region,
        mode: SearchMode,
        offer: &Offer,
    ) -> Option<Self> {
        let price_value = offer.price_value?;
        Some(Self {
            timestamp: Utc::now(),
            query: query.to_owned(),
            region,
            mode,
            title: offer.title.clone(),
            price_value,
            price_raw: offer.price_raw.clone(),
            source: offer.source.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offer(price_value: Option<f64>) -> Offer {
        Offer {
            title: "Wholesale Dog Treats Case of 24".to_string(),
            price_raw: "£4.50".to_string(),
            price_value,
            source: Some("Trade Pet Co".to_string()),
            snippet: None,
            link: "https://trade.example/treats".to_string(),
            is_wholesale: Some(true),
        }
    }

    #[test]
    fn status_serializes_as_message() {
        let result = SearchResult::no_results("dog treats", Region::Uk);
        let json = serde_json::to_value(&result).expect("json");
        assert_eq!(json["message"], "no_results");
        assert!(json["best"].is_null());
        assert!(json.get("mode").is_none());
        assert!(json.get("error").is_none());
    }

    #[test]
    fn ok_result_carries_best_and_mode() {
        let best = offer(Some(4.5));
        let result = SearchResult::ok(
            "dog treats",
            Region::Uk,
            SearchMode::WholesalePriority,
            best.clone(),
            vec![best],
        );
        let json = serde_json::to_value(&result).expect("json");
        assert_eq!(json["message"], "ok");
        assert_eq!(json["mode"], "wholesale_priority");
        assert_eq!(json["best"]["price_value"].as_f64(), Some(4.5));
        assert_eq!(json["region"], "uk");
    }

    #[test]
    fn provider_error_surfaces_detail() {
        let result = SearchResult::provider_error("x", Region::Us, "invalid api key");
        assert_eq!(result.status, SearchStatus::ProviderError);
        assert_eq!(result.error.as_deref(), Some("invalid api key"));
        assert!(result.best.is_none());
        assert!(result.results.is_empty());
    }

    #[test]
    fn ledger_entry_requires_price() {
        assert!(LedgerEntry::from_selection(
            "dog treats",
            Region::Uk,
            SearchMode::RetailFallback,
            &offer(None)
        )
        .is_none());

        let entry = LedgerEntry::from_selection(
            "dog treats",
            Region::Uk,
            SearchMode::RetailFallback,
            &offer(Some(4.5)),
        )
        .expect("entry");
        assert_eq!(entry.price_value, 4.5);
        assert_eq!(entry.price_raw, "£4.50");
        assert_eq!(entry.source.as_deref(), Some("Trade Pet Co"));
    }

    #[test]
    fn display_matches_serialized_names() {
        assert_eq!(SearchStatus::NoPriceParsed.to_string(), "no_price_parsed");
        assert_eq!(SearchMode::RetailFallback.to_string(), "retail_fallback");
    }
}
