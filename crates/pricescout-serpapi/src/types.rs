//! SerpApi `search.json` response shapes.
//!
//! Only the fields the offer mapping reads are modelled; everything else is
//! ignored. Every field is optional or defaulted because SerpApi omits keys
//! rather than sending `null` when Google has nothing for them.
//!
//! ### `error`
//! Present on failures. A query with no matches comes back as
//! `"Google hasn't returned any results for this query."`, which is a valid
//! empty outcome rather than a failure.
//!
//! ### `shopping_results[].price`
//! Display string including the currency symbol (`"£9.99"`). The numeric
//! `extracted_price` sits alongside it and is used when `price` is missing.
//!
//! ### `organic_results[].rich_snippet`
//! Product pages sometimes expose a price under
//! `rich_snippet.{top,bottom}.detected_extensions.price` as a number, and the
//! display text under `.extensions`.

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct SerpApiResponse {
    #[serde(default)]
    pub error: Option<String>,

    #[serde(default)]
    pub shopping_results: Vec<ShoppingResult>,

    #[serde(default)]
    pub organic_results: Vec<OrganicResult>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShoppingResult {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub extracted_price: Option<f64>,
    /// Merchant name, e.g. `"Pets at Home"`.
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    /// Google Shopping comparison page; used when `link` is absent.
    #[serde(default)]
    pub product_link: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
    /// Short badges such as `"Bulk"` or `"Free delivery"`.
    #[serde(default)]
    pub extensions: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrganicResult {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub displayed_link: Option<String>,
    #[serde(default)]
    pub rich_snippet: Option<RichSnippet>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RichSnippet {
    #[serde(default)]
    pub top: Option<RichSnippetSection>,
    #[serde(default)]
    pub bottom: Option<RichSnippetSection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RichSnippetSection {
    #[serde(default)]
    pub detected_extensions: Option<DetectedExtensions>,
    #[serde(default)]
    pub extensions: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DetectedExtensions {
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
}
