use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stable listing identifier; the data file uses both numbers and strings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(untagged)]
pub enum ListingId {
    Number(u64),
    Text(String),
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListingId::Number(n) => write!(f, "{}", n),
            ListingId::Text(s) => f.write_str(s),
        }
    }
}

/// Transaction type a listing is offered under
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    #[default]
    Lease,
    Buy,
    PreLeased,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Lease => "lease",
            Mode::Buy => "buy",
            Mode::PreLeased => "pre-leased",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lease" => Ok(Mode::Lease),
            "buy" => Ok(Mode::Buy),
            "pre-leased" | "preleased" => Ok(Mode::PreLeased),
            other => Err(format!("unknown mode '{}'", other)),
        }
    }
}

/// Core property listing, as stored in the bundled data file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyListing {
    pub id: ListingId,
    pub name: String,
    pub location: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub listing_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub size: String,
    #[serde(default)]
    pub available_for: Vec<Mode>,
    #[serde(default)]
    pub image: String,
}

impl PropertyListing {
    /// True when either `type` or `category` names the given type.
    pub fn is_of_type(&self, target: &str) -> bool {
        self.listing_type.as_deref() == Some(target) || self.category.as_deref() == Some(target)
    }

    pub fn is_available_for(&self, mode: Mode) -> bool {
        self.available_for.contains(&mode)
    }

    /// Numeric sort key for `size`, see [`parse_size`].
    pub fn size_value(&self) -> u64 {
        parse_size(&self.size)
    }
}

/// Extract the leading magnitude of a size string such as "1,00,000 sqft".
///
/// Skips anything before the first digit, then reads digits and `,`
/// separators. Strings without digits, or whose magnitude overflows, give 0.
pub fn parse_size(size: &str) -> u64 {
    let digits: String = size
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit() || *c == ',')
        .filter(|c| c.is_ascii_digit())
        .collect();

    digits.parse().unwrap_or(0)
}
