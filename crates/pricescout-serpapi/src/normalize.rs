//! Mapping from SerpApi result items to provider-neutral [`RawOffer`]s.
//!
//! Items without a title or without any price are skipped here; link and
//! price validity are judged later by the engine.

use pricescout_core::{RawOffer, RawPrice};

use crate::types::{OrganicResult, RichSnippetSection, ShoppingResult};

const CURRENCY_MARKERS: &[char] = &['£', '$', '€'];

/// Converts `shopping_results` items, preserving provider order.
#[must_use]
pub fn shopping_offers(items: Vec<ShoppingResult>) -> Vec<RawOffer> {
    items.into_iter().filter_map(shopping_offer).collect()
}

/// Converts `organic_results` items that carry a detectable price.
#[must_use]
pub fn organic_offers(items: Vec<OrganicResult>) -> Vec<RawOffer> {
    items.into_iter().filter_map(organic_offer).collect()
}

fn shopping_offer(item: ShoppingResult) -> Option<RawOffer> {
    let title = non_empty(item.title)?;

    let price = match (non_empty(item.price), item.extracted_price) {
        (Some(text), _) => RawPrice::Text(text),
        (None, Some(value)) => RawPrice::Number(value),
        (None, None) => return None,
    };

    // Badges like "Bulk" or "Trade price" are the only descriptive text many
    // shopping items have.
    let snippet = non_empty(item.snippet).or_else(|| {
        let joined = item.extensions.join(", ");
        (!joined.trim().is_empty()).then_some(joined)
    });

    Some(RawOffer {
        title,
        price,
        source: non_empty(item.source),
        snippet,
        link: non_empty(item.link).or_else(|| non_empty(item.product_link)),
    })
}

fn organic_offer(item: OrganicResult) -> Option<RawOffer> {
    let title = non_empty(item.title)?;
    let rich = item.rich_snippet.unwrap_or_default();
    let price = [rich.top.as_ref(), rich.bottom.as_ref()]
        .into_iter()
        .flatten()
        .find_map(section_price)?;

    Some(RawOffer {
        title,
        price,
        source: non_empty(item.source).or_else(|| non_empty(item.displayed_link)),
        snippet: non_empty(item.snippet),
        link: non_empty(item.link),
    })
}

/// Structured price first, then the first display extension that looks like
/// money.
fn section_price(section: &RichSnippetSection) -> Option<RawPrice> {
    if let Some(detected) = &section.detected_extensions {
        if let Some(value) = detected.price {
            return Some(match detected.currency.as_deref() {
                Some(currency) if !currency.is_empty() => {
                    RawPrice::Text(format!("{value} {currency}"))
                }
                _ => RawPrice::Number(value),
            });
        }
    }

    section
        .extensions
        .iter()
        .find(|ext| ext.contains(CURRENCY_MARKERS) && ext.chars().any(|c| c.is_ascii_digit()))
        .map(|ext| RawPrice::Text(ext.clone()))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
