use serde::{Deserialize, Deserializer, Serialize};

/// Shopping region requested by a caller.
///
/// The set is intentionally small; each variant maps to the country code the
/// upstream search provider expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    #[default]
    Uk,
    Us,
    Eu,
    Au,
}

impl Region {
    /// Parses a request code case-insensitively. Unknown codes map to
    /// [`Region::Uk`].
    #[must_use]
    pub fn parse(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "us" => Region::Us,
            "eu" => Region::Eu,
            "au" => Region::Au,
            _ => Region::Uk,
        }
    }

    /// Country code sent to the provider (`gl` for Google-backed engines).
    #[must_use]
    pub fn provider_code(self) -> &'static str {
        match self {
            Region::Uk => "uk",
            Region::Us => "us",
            Region::Eu => "de",
            Region::Au => "au",
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Region::Uk => "uk",
            Region::Us => "us",
            Region::Eu => "eu",
            Region::Au => "au",
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// Lenient on input: an unknown code is a default, not a rejected request.
impl<'de> Deserialize<'de> for Region {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Region::parse(&raw))
    }
}
