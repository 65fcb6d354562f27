use crate::listings::types::SortKey;
use crate::models::PropertyListing;
use std::cmp::Ordering;

/// Case-insensitive ordering with the exact text as tie-break, so "sector 9"
/// and "Sector 9" sit together but still order deterministically.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Order listings by `key`, returning a new vector.
///
/// The sort is stable: listings with equal keys keep their input order, in
/// both ascending and descending directions.
pub fn sort_listings<'a>(listings: &[&'a PropertyListing], key: SortKey) -> Vec<&'a PropertyListing> {
    let mut sorted = listings.to_vec();

    match key {
        SortKey::Default => {}
        SortKey::NameAsc => sorted.sort_by(|a, b| locale_compare(&a.name, &b.name)),
        SortKey::NameDesc => sorted.sort_by(|a, b| locale_compare(&b.name, &a.name)),
        SortKey::LocationAsc => sorted.sort_by(|a, b| locale_compare(&a.location, &b.location)),
        SortKey::LocationDesc => sorted.sort_by(|a, b| locale_compare(&b.location, &a.location)),
        SortKey::SizeAsc => sorted.sort_by_key(|l| l.size_value()),
        SortKey::SizeDesc => sorted.sort_by(|a, b| b.size_value().cmp(&a.size_value())),
    }

    sorted
}
