pub mod filter;
pub mod paginate;
pub mod routes;
pub mod sort;
pub mod types;
pub mod view;

pub use filter::{filter_listings, FilterOptions};
pub use routes::{HeroSearch, Route, RouteError};
pub use sort::sort_listings;
pub use types::{FilterCriteria, Pagination, SortKey};
pub use view::{ListingView, Recovery, Rendered};
