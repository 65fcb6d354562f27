use crate::listings::filter::{filter_listings, FilterOptions};
use crate::listings::paginate::{paginate, total_pages, visible_window};
use crate::listings::routes::Route;
use crate::listings::sort::sort_listings;
use crate::listings::types::{FilterCriteria, Pagination, SortKey};
use crate::models::{Mode, PropertyListing};
use crate::store::ListingStore;
use tracing::debug;

/// How the user gets out of an empty result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// Drop the user's selections and show the screen preset again.
    ClearFilters,
    /// Go back to the unfiltered all-properties screen.
    ViewAllProperties,
}

/// What a screen renders
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered<'a> {
    Listings {
        items: Vec<&'a PropertyListing>,
        /// Matches across all pages
        total_matches: usize,
        /// 1-based page, or the number of load-more steps taken
        page: usize,
        /// Total pages, or steps needed to show everything
        total_pages: usize,
        has_more: bool,
    },
    Empty { recovery: Recovery },
}

/// Per-screen listing state: criteria, sort key and page cursor.
///
/// Every change to the criteria or the sort key sends the cursor back to the
/// first page (or the first load-more window), so a shrunk result set never
/// shows a stale, out-of-range page.
#[derive(Debug, Clone)]
pub struct ListingView {
    preset: FilterCriteria,
    criteria: FilterCriteria,
    sort: SortKey,
    pagination: Pagination,
    page: usize,
}

impl ListingView {
    pub fn new(criteria: FilterCriteria, pagination: Pagination) -> Self {
        Self {
            preset: criteria.clone(),
            criteria,
            sort: SortKey::Default,
            pagination,
            page: 1,
        }
    }

    /// View for a screen, seeded from its query parameters
    pub fn for_route(route: &Route, store: &ListingStore) -> Self {
        Self::new(route.criteria(store), route.pagination())
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort
    }

    /// Current page, or the number of load-more steps taken
    pub fn page(&self) -> usize {
        self.page
    }

    fn reset_page(&mut self) {
        self.page = 1;
    }

    pub fn toggle_location(&mut self, location: &str) {
        if !self.criteria.locations.remove(location) {
            self.criteria.locations.insert(location.to_string());
        }
        self.reset_page();
    }

    /// Single-select location menu; `None` is "All Locations"
    pub fn select_location(&mut self, location: Option<&str>) {
        self.criteria.locations.clear();
        self.criteria.locations.extend(location.map(str::to_string));
        self.reset_page();
    }

    pub fn toggle_size(&mut self, size: &str) {
        if !self.criteria.sizes.remove(size) {
            self.criteria.sizes.insert(size.to_string());
        }
        self.reset_page();
    }

    pub fn select_type(&mut self, listing_type: Option<&str>) {
        self.criteria.listing_type = listing_type.map(str::to_string);
        self.reset_page();
    }

    pub fn select_mode(&mut self, mode: Mode) {
        self.criteria.mode = mode;
        self.reset_page();
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
        self.reset_page();
    }

    /// Back to the screen's preset criteria and default order
    pub fn clear_filters(&mut self) {
        self.criteria = self.preset.clone();
        self.sort = SortKey::Default;
        self.reset_page();
    }

    /// Jump to a page; out-of-range pages clamp when rendered
    pub fn go_to_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn next_page(&mut self) {
        self.page += 1;
    }

    pub fn previous_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    /// Grow a load-more gallery by one step
    pub fn load_more(&mut self) {
        self.page += 1;
    }

    /// Locations and sizes selectable on this screen, drawn from the preset matches
    pub fn options(&self, store: &ListingStore) -> FilterOptions {
        FilterOptions::from_listings(filter_listings(store.listings(), &self.preset))
    }

    /// Filter, sort and page the store for the current state
    pub fn render<'a>(&self, store: &'a ListingStore) -> Rendered<'a> {
        let filtered = filter_listings(store.listings(), &self.criteria);
        if filtered.is_empty() {
            let recovery = if self.criteria != self.preset {
                Recovery::ClearFilters
            } else {
                Recovery::ViewAllProperties
            };
            debug!("No listings match {:?}", self.criteria);
            return Rendered::Empty { recovery };
        }

        let sorted = sort_listings(&filtered, self.sort);
        let total_matches = sorted.len();

        match self.pagination {
            Pagination::Pages { page_size } => {
                let page = paginate(&sorted, self.page, page_size);
                Rendered::Listings {
                    items: page.items.to_vec(),
                    total_matches,
                    page: page.page,
                    total_pages: page.total_pages,
                    has_more: page.has_next(),
                }
            }
            Pagination::LoadMore { step } => {
                let steps = total_pages(total_matches, step);
                let page = self.page.min(steps);
                let window = visible_window(&sorted, page * step);
                Rendered::Listings {
                    items: window.items.to_vec(),
                    total_matches,
                    page,
                    total_pages: steps,
                    has_more: window.has_more(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listings::test_support::{ids, listing};

    /// 25 Sector 62 listings and 5 in Sector 18, all for lease
    fn store() -> ListingStore {
        let listings = (1..=30)
            .map(|i| {
                let location = if i <= 25 { "Sector 62" } else { "Sector 18" };
                let size = format!("{},000 sqft", 31 - i);
                listing(i, &format!("Tower {:02}", i), location, Some("Office Spaces"), None, &size, &[Mode::Lease])
            })
            .collect();
        ListingStore::new(listings).unwrap()
    }

    fn unwrap_listings<'a>(rendered: Rendered<'a>) -> (Vec<&'a PropertyListing>, usize, usize, usize) {
        match rendered {
            Rendered::Listings {
                items,
                total_matches,
                page,
                total_pages,
                ..
            } => (items, total_matches, page, total_pages),
            Rendered::Empty { .. } => panic!("expected listings"),
        }
    }

    #[test]
    fn pages_through_all_properties() {
        let store = store();
        let mut view = ListingView::new(FilterCriteria::default(), Pagination::ALL_PROPERTIES);

        let (items, total, page, pages) = unwrap_listings(view.render(&store));
        assert_eq!((items.len(), total, page, pages), (10, 30, 1, 3));

        view.go_to_page(3);
        let (items, _, page, _) = unwrap_listings(view.render(&store));
        assert_eq!(page, 3);
        assert_eq!(ids(&items), (21..=30u64).collect::<Vec<_>>());
    }

    #[test]
    fn new_filter_resets_to_first_page() {
        let store = store();
        let mut view = ListingView::new(FilterCriteria::default(), Pagination::ALL_PROPERTIES);
        view.go_to_page(3);
        assert_eq!(view.page(), 3);

        view.select_location(Some("Sector 18"));
        assert_eq!(view.page(), 1);

        let (items, total, page, pages) = unwrap_listings(view.render(&store));
        assert_eq!((items.len(), total, page, pages), (5, 5, 1, 1));
    }

    #[test]
    fn new_sort_resets_load_more_window() {
        let store = store();
        let mut view = ListingView::new(FilterCriteria::default(), Pagination::GALLERY);
        view.load_more();
        view.load_more();
        let (items, _, _, _) = unwrap_listings(view.render(&store));
        assert_eq!(items.len(), 18);

        view.set_sort(SortKey::SizeAsc);
        let (items, _, page, _) = unwrap_listings(view.render(&store));
        assert_eq!(page, 1);
        assert_eq!(ids(&items), vec![30, 29, 28, 27, 26, 25]);
    }

    #[test]
    fn load_more_stops_at_the_end() {
        let store = store();
        let mut view = ListingView::new(FilterCriteria::default(), Pagination::GALLERY);
        for _ in 0..10 {
            view.load_more();
        }
        match view.render(&store) {
            Rendered::Listings { items, has_more, page, total_pages, .. } => {
                assert_eq!(items.len(), 30);
                assert!(!has_more);
                assert_eq!(page, total_pages);
            }
            Rendered::Empty { .. } => panic!("expected listings"),
        }
    }

    #[test]
    fn empty_results_offer_a_way_back() {
        let store = store();
        let mut view = ListingView::new(FilterCriteria::default(), Pagination::GALLERY);
        view.toggle_size("1 sqft");
        assert_eq!(
            view.render(&store),
            Rendered::Empty {
                recovery: Recovery::ClearFilters
            }
        );

        view.clear_filters();
        assert!(matches!(view.render(&store), Rendered::Listings { .. }));

        let strict = FilterCriteria {
            require_location_and_type: true,
            ..FilterCriteria::default().with_location("Sector 62")
        };
        let combined = ListingView::new(strict, Pagination::GALLERY);
        assert_eq!(
            combined.render(&store),
            Rendered::Empty {
                recovery: Recovery::ViewAllProperties
            }
        );
    }

    #[test]
    fn sorting_an_empty_screen_does_not_offer_clearing() {
        let store = store();
        let strict = FilterCriteria {
            require_location_and_type: true,
            ..FilterCriteria::default()
        };
        let mut view = ListingView::new(strict, Pagination::GALLERY);
        view.set_sort(SortKey::NameDesc);
        assert_eq!(
            view.render(&store),
            Rendered::Empty {
                recovery: Recovery::ViewAllProperties
            }
        );
    }

    #[test]
    fn toggles_add_and_remove_selections() {
        let mut view = ListingView::new(FilterCriteria::default(), Pagination::GALLERY);
        view.toggle_location("Sector 18");
        view.toggle_location("Sector 62");
        view.toggle_location("Sector 18");
        assert_eq!(view.criteria().locations.len(), 1);
        assert!(view.criteria().locations.contains("Sector 62"));
    }

    #[test]
    fn options_come_from_the_preset() {
        let store = store();
        let mut view = ListingView::new(FilterCriteria::default(), Pagination::GALLERY);
        view.toggle_location("Sector 18");
        let options = view.options(&store);
        assert_eq!(options.locations, vec!["Sector 18", "Sector 62"]);
        assert_eq!(options.sizes.len(), 30);
    }
}
