use serde::{Deserialize, Serialize};

/// Price field exactly as a provider hands it over.
///
/// Shopping APIs return either a display string (`"£9.99"`) or an already
/// extracted number (`9.99`); both are accepted and stringified before
/// parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawPrice {
    Text(String),
    Number(f64),
}

impl RawPrice {
    /// Returns the price as text. Numbers are rendered with `Display`.
    #[must_use]
    pub fn as_text(&self) -> String {
        match self {
            RawPrice::Text(s) => s.clone(),
            RawPrice::Number(n) => n.to_string(),
        }
    }
}

impl From<&str> for RawPrice {
    fn from(value: &str) -> Self {
        RawPrice::Text(value.to_owned())
    }
}

impl From<f64> for RawPrice {
    fn from(value: f64) -> Self {
        RawPrice::Number(value)
    }
}

/// A listing as returned by an [`crate::OfferProvider`], before any
/// normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawOffer {
    pub title: String,
    pub price: RawPrice,
    pub source: Option<String>,
    /// Descriptive text used only for wholesale classification.
    pub snippet: Option<String>,
    pub link: Option<String>,
}

/// One candidate product listing after normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub title: String,
    /// Original price text, e.g. `"£9.99"`.
    pub price_raw: String,
    /// Parsed amount. `None` until parsed, and `None` when unparsable.
    pub price_value: Option<f64>,
    pub source: Option<String>,
    pub snippet: Option<String>,
    /// Canonical URL. Empty when the provider gave none.
    pub link: String,
    /// Set by the wholesale classifier; absent before classification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_wholesale: Option<bool>,
}

impl Offer {
    /// Converts a provider listing into an unpriced, unclassified `Offer`.
    ///
    /// Returns `None` when the title is empty after trimming.
    #[must_use]
    pub fn from_raw(raw: RawOffer) -> Option<Self> {
        let title = raw.title.trim();
        if title.is_empty() {
            return None;
        }

        Some(Self {
            title: title.to_owned(),
            price_raw: raw.price.as_text(),
            price_value: None,
            source: raw.source,
            snippet: raw.snippet,
            link: raw.link.unwrap_or_default().trim().to_owned(),
            is_wholesale: None,
        })
    }

    /// An offer is eligible for selection when it has a positive price and a
    /// link.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.price_value.is_some_and(|p| p.is_finite() && p > 0.0) && !self.link.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(title: &str, price: RawPrice, link: Option<&str>) -> RawOffer {
        RawOffer {
            title: title.to_string(),
            price,
            source: Some("Pet Supplies Direct".to_string()),
            snippet: None,
            link: link.map(str::to_string),
        }
    }

    fn priced(price_value: Option<f64>, link: &str) -> Offer {
        Offer {
            title: "Dog Treats".to_string(),
            price_raw: "£1.00".to_string(),
            price_value,
            source: None,
            snippet: None,
            link: link.to_string(),
            is_wholesale: None,
        }
    }

    #[test]
    fn raw_price_number_is_stringified() {
        assert_eq!(RawPrice::Number(12.5).as_text(), "12.5");
        assert_eq!(RawPrice::from("£9.99").as_text(), "£9.99");
    }

    #[test]
    fn raw_price_deserializes_string_or_number() {
        let text: RawPrice = serde_json::from_str("\"£4.50\"").expect("text price");
        let number: RawPrice = serde_json::from_str("4.5").expect("numeric price");
        assert_eq!(text, RawPrice::Text("£4.50".to_string()));
        assert_eq!(number, RawPrice::Number(4.5));
    }

    #[test]
    fn from_raw_trims_title_and_keeps_price_text() {
        let offer = Offer::from_raw(raw(
            "  Dog Treats 200g ",
            RawPrice::from("£2.99"),
            Some("https://shop.example/treats"),
        ))
        .expect("offer");
        assert_eq!(offer.title, "Dog Treats 200g");
        assert_eq!(offer.price_raw, "£2.99");
        assert!(offer.price_value.is_none());
        assert!(offer.is_wholesale.is_none());
    }

    #[test]
    fn from_raw_rejects_blank_title() {
        assert!(Offer::from_raw(raw("   ", RawPrice::from("£2.99"), None)).is_none());
    }

    #[test]
    fn from_raw_missing_link_becomes_empty() {
        let offer = Offer::from_raw(raw("Treats", RawPrice::Number(3.0), None)).expect("offer");
        assert_eq!(offer.link, "");
    }

    #[test]
    fn usable_requires_positive_price_and_link() {
        assert!(priced(Some(1.0), "https://a.example").is_usable());
        assert!(!priced(Some(0.0), "https://a.example").is_usable());
        assert!(!priced(None, "https://a.example").is_usable());
        assert!(!priced(Some(1.0), "").is_usable());
    }

    #[test]
    fn non_finite_price_is_not_usable() {
        assert!(!priced(Some(f64::INFINITY), "https://a.example").is_usable());
        assert!(!priced(Some(f64::NAN), "https://a.example").is_usable());
    }

    #[test]
    fn unclassified_offer_omits_is_wholesale_when_serialized() {
        let json = serde_json::to_value(priced(Some(1.0), "https://a.example")).expect("json");
        assert!(json.get("is_wholesale").is_none());
        assert_eq!(json["price_value"].as_f64(), Some(1.0));
    }
}
