use crate::listings::types::FilterCriteria;
use crate::models::PropertyListing;
use std::collections::BTreeSet;

/// Whether a single listing satisfies every active constraint.
pub fn matches(listing: &PropertyListing, criteria: &FilterCriteria) -> bool {
    if criteria.require_location_and_type
        && (criteria.locations.is_empty() || criteria.listing_type.is_none())
    {
        return false;
    }

    if !listing.is_available_for(criteria.mode) {
        return false;
    }

    if let Some(target) = criteria.listing_type.as_deref() {
        if !listing.is_of_type(target) {
            return false;
        }
    }

    if !criteria.locations.is_empty() && !criteria.locations.contains(&listing.location) {
        return false;
    }

    if !criteria.sizes.is_empty() && !criteria.sizes.contains(&listing.size) {
        return false;
    }

    true
}

/// Listings matching `criteria`, in input order.
pub fn filter_listings<'a, I>(listings: I, criteria: &FilterCriteria) -> Vec<&'a PropertyListing>
where
    I: IntoIterator<Item = &'a PropertyListing>,
{
    listings
        .into_iter()
        .filter(|listing| matches(listing, criteria))
        .collect()
}

/// Choices for the location and size menus of a screen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub locations: Vec<String>,
    pub sizes: Vec<String>,
}

impl FilterOptions {
    /// Distinct locations and sizes of `listings`, sorted
    pub fn from_listings<'a, I>(listings: I) -> Self
    where
        I: IntoIterator<Item = &'a PropertyListing>,
    {
        let mut locations = BTreeSet::new();
        let mut sizes = BTreeSet::new();
        for listing in listings {
            locations.insert(listing.location.clone());
            sizes.insert(listing.size.clone());
        }

        Self {
            locations: locations.into_iter().collect(),
            sizes: sizes.into_iter().collect(),
        }
    }
}
