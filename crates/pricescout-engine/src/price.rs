//! Price-token normalization.
//!
//! Only the first decimal number in the token is used; currency symbols,
//! codes and surrounding words are ignored. No currency conversion happens
//! here, so `"9.99"` means 9.99 whether the token said `£`, `$` or `EUR`.
//! Callers must not compare amounts across currencies without normalizing
//! upstream.

use std::sync::LazyLock;

use pricescout_core::RawPrice;
use regex::Regex;

// ASCII digits only: `\d` would also match non-ASCII digits that `f64`
// parsing rejects.
static PRICE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+(?:\.[0-9]{1,2})?").expect("valid price regex"));

/// Extracts the first unsigned amount with up to two fractional digits.
///
/// A digit run too long for `f64` overflows to infinity and is rejected.
///
/// `"£9.99"` → `Some(9.99)`, `"9.99 GBP"` → `Some(9.99)`,
/// `"no digits here"` → `None`.
#[must_use]
pub fn parse_price(raw: &str) -> Option<f64> {
    let found = PRICE_PATTERN.find(raw)?;
    found
        .as_str()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Parses a provider price field, stringifying numeric values first.
#[must_use]
pub fn parse_raw_price(raw: &RawPrice) -> Option<f64> {
    parse_price(&raw.as_text())
}
