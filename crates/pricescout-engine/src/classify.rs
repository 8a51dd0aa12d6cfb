use pricescout_core::Offer;

/// Substrings that mark a listing as bulk or trade.
///
/// Matching is plain substring, not word-boundary: `"case"` also matches
/// `"showcase"`. Tightening this changes which offers win tier 1.
pub const WHOLESALE_KEYWORDS: &[&str] = &[
    "wholesale",
    "bulk",
    "case of",
    "case",
    "carton",
    "box of",
    "pack of",
    "trade",
    "b2b",
    "pack x",
    "x10",
    "x12",
    "x24",
    "x48",
];

/// Returns `true` if the offer's title, source or snippet mentions any
/// wholesale keyword, case-insensitively.
#[must_use]
pub fn looks_wholesale(offer: &Offer) -> bool {
    let haystack = format!(
        "{} {} {}",
        offer.title,
        offer.source.as_deref().unwrap_or_default(),
        offer.snippet.as_deref().unwrap_or_default()
    )
    .to_lowercase();

    WHOLESALE_KEYWORDS.iter().any(|kw| haystack.contains(kw))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offer(title: &str, source: Option<&str>, snippet: Option<&str>) -> Offer {
        Offer {
            title: title.to_string(),
            price_raw: "£1.00".to_string(),
            price_value: Some(1.0),
            source: source.map(str::to_string),
            snippet: snippet.map(str::to_string),
            link: "https://shop.example/item".to_string(),
            is_wholesale: None,
        }
    }

    #[test]
    fn wholesale_title_matches() {
        assert!(looks_wholesale(&offer(
            "Wholesale Dog Treats Case of 24",
            None,
            None
        )));
    }

    #[test]
    fn retail_title_does_not_match() {
        assert!(!looks_wholesale(&offer("Premium Dog Treats 200g", None, None)));
        assert!(!looks_wholesale(&offer(
            "Premium Dog Treats 200g",
            Some(""),
            Some("")
        )));
    }

    #[test]
    fn match_is_case_insensitive() {
        assert!(looks_wholesale(&offer("DOG TREATS BULK BUY", None, None)));
    }

    #[test]
    fn source_and_snippet_are_considered() {
        assert!(looks_wholesale(&offer(
            "Dog Treats",
            Some("Booker Trade Centre"),
            None
        )));
        assert!(looks_wholesale(&offer(
            "Dog Treats",
            None,
            Some("Sold as a carton, 12 units")
        )));
    }

    #[test]
    fn multipack_markers_match() {
        assert!(looks_wholesale(&offer("Dog Chews x24", None, None)));
        assert!(looks_wholesale(&offer("Dog Chews Pack of 6", None, None)));
    }

    #[test]
    fn substring_match_is_not_word_bounded() {
        assert!(looks_wholesale(&offer("Treat showcase tin", None, None)));
    }
}
