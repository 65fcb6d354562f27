use crate::models::Mode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Active filter constraints for one screen
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Accepted locations; empty accepts any
    pub locations: BTreeSet<String>,
    /// Accepted size strings, matched exactly; empty accepts any
    pub sizes: BTreeSet<String>,
    /// Required `type` or `category`
    pub listing_type: Option<String>,
    pub mode: Mode,
    /// Combined screens only show listings when both a location and a type are set
    pub require_location_and_type: bool,
}

impl FilterCriteria {
    pub fn for_mode(mode: Mode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.locations.insert(location.into());
        self
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.sizes.insert(size.into());
        self
    }

    pub fn with_type(mut self, listing_type: impl Into<String>) -> Self {
        self.listing_type = Some(listing_type.into());
        self
    }

    /// Whether any user-removable constraint is set
    pub fn has_selections(&self) -> bool {
        !self.locations.is_empty() || !self.sizes.is_empty() || self.listing_type.is_some()
    }
}

/// Sort orders offered by the sort menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Keep the filtered order.
    #[default]
    Default,
    NameAsc,
    NameDesc,
    LocationAsc,
    LocationDesc,
    /// Smallest area first.
    SizeAsc,
    /// Largest area first.
    SizeDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 7] = [
        SortKey::Default,
        SortKey::NameAsc,
        SortKey::NameDesc,
        SortKey::LocationAsc,
        SortKey::LocationDesc,
        SortKey::SizeAsc,
        SortKey::SizeDesc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Default => "default",
            SortKey::NameAsc => "name-asc",
            SortKey::NameDesc => "name-desc",
            SortKey::LocationAsc => "location-asc",
            SortKey::LocationDesc => "location-desc",
            SortKey::SizeAsc => "size-asc",
            SortKey::SizeDesc => "size-desc",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| format!("unknown sort key '{}'", s))
    }
}

/// How a screen pages its results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pagination {
    /// Numbered pages of a fixed size.
    Pages { page_size: usize },
    /// A growing window: starts at `step` items, grows by `step`.
    LoadMore { step: usize },
}

impl Pagination {
    /// Page size of the all-properties screen
    pub const ALL_PROPERTIES: Pagination = Pagination::Pages { page_size: 10 };
    /// Load-more step of the gallery screens
    pub const GALLERY: Pagination = Pagination::LoadMore { step: 6 };
}
