use crate::models::{ListingId, PropertyListing};
use anyhow::{bail, Context, Result};
use std::collections::{BTreeSet, HashSet};
use std::path::Path;
use tracing::{debug, info};

/// Listings compiled into the binary
const BUNDLED_LISTINGS: &str = include_str!("../../data/listings.json");

/// Most suggestions the search box shows at once
pub const MAX_SUGGESTIONS: usize = 5;

/// Read-only listing collection, loaded once at startup
#[derive(Debug, Clone)]
pub struct ListingStore {
    listings: Vec<PropertyListing>,
}

impl ListingStore {
    /// Load the listings bundled with the binary
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_LISTINGS).context("Failed to parse bundled listings")
    }

    /// Load listings from a JSON file on disk
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read listings from {}", path.display()))?;
        let store = Self::from_json(&json)
            .with_context(|| format!("Failed to parse listings from {}", path.display()))?;
        info!("Loaded {} listings from {}", store.len(), path.display());
        Ok(store)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let listings: Vec<PropertyListing> = serde_json::from_str(json)?;
        Self::new(listings)
    }

    /// Build a store, rejecting reused ids
    pub fn new(listings: Vec<PropertyListing>) -> Result<Self> {
        {
            let mut seen: HashSet<&ListingId> = HashSet::with_capacity(listings.len());
            for listing in &listings {
                if !seen.insert(&listing.id) {
                    bail!("Duplicate listing id {}", listing.id);
                }
            }
        }

        debug!("Listing store holds {} records", listings.len());
        Ok(Self { listings })
    }

    pub fn listings(&self) -> &[PropertyListing] {
        &self.listings
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn get(&self, id: &ListingId) -> Option<&PropertyListing> {
        self.listings.iter().find(|l| &l.id == id)
    }

    /// Look a listing up by the textual form of its id, as typed on a command line
    pub fn find_by_id_str(&self, id: &str) -> Option<&PropertyListing> {
        self.listings.iter().find(|l| l.id.to_string() == id)
    }

    /// Distinct locations, sorted
    pub fn locations(&self) -> Vec<&str> {
        let set: BTreeSet<&str> = self.listings.iter().map(|l| l.location.as_str()).collect();
        set.into_iter().collect()
    }

    /// Distinct `type` values, sorted
    pub fn types(&self) -> Vec<&str> {
        let set: BTreeSet<&str> = self
            .listings
            .iter()
            .filter_map(|l| l.listing_type.as_deref())
            .collect();
        set.into_iter().collect()
    }

    pub fn is_known_location(&self, location: &str) -> bool {
        self.listings.iter().any(|l| l.location == location)
    }

    /// Locations containing `query`, ignoring case. Blank queries suggest nothing.
    pub fn suggest_locations(&self, query: &str) -> Vec<&str> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        self.locations()
            .into_iter()
            .filter(|loc| loc.to_lowercase().contains(&needle))
            .take(MAX_SUGGESTIONS)
            .collect()
    }
}
