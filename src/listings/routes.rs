use crate::listings::types::{FilterCriteria, Pagination};
use crate::models::Mode;
use crate::store::ListingStore;
use thiserror::Error;
use tracing::warn;
use url::form_urlencoded;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("unknown route '{0}'")]
    UnknownPath(String),
    #[error("route {path} needs a '{param}' parameter")]
    MissingParameter { path: &'static str, param: &'static str },
}

/// A listing screen together with the filter state carried in its query string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/properties`
    Properties { mode: Mode },
    /// `/filtered-location`
    ByLocation { location: String, mode: Mode },
    /// `/filtered-type`
    ByType { listing_type: String, mode: Mode },
    /// `/filtered-combined`; both parts are needed for any result
    Combined {
        location: Option<String>,
        listing_type: Option<String>,
        mode: Mode,
    },
    /// `/search`, free text matched against location names
    Search { query: String, mode: Mode },
}

impl Route {
    pub const PROPERTIES: &'static str = "/properties";
    pub const BY_LOCATION: &'static str = "/filtered-location";
    pub const BY_TYPE: &'static str = "/filtered-type";
    pub const COMBINED: &'static str = "/filtered-combined";
    pub const SEARCH: &'static str = "/search";

    /// Parse a path with optional query string, e.g. `/filtered-type?type=Warehouses&mode=buy`
    pub fn parse(target: &str) -> Result<Self, RouteError> {
        let (path, query) = target.split_once('?').unwrap_or((target, ""));
        let params = QueryParams::parse(query);
        let mode = params.mode();

        match path.trim_end_matches('/') {
            Self::PROPERTIES => Ok(Route::Properties { mode }),
            Self::BY_LOCATION => Ok(Route::ByLocation {
                location: params.required(Self::BY_LOCATION, "location")?,
                mode,
            }),
            Self::BY_TYPE => Ok(Route::ByType {
                listing_type: params.required(Self::BY_TYPE, "type")?,
                mode,
            }),
            Self::COMBINED => Ok(Route::Combined {
                location: params.get("location"),
                listing_type: params.get("type"),
                mode,
            }),
            Self::SEARCH => Ok(Route::Search {
                query: params.required(Self::SEARCH, "q")?,
                mode,
            }),
            _ => Err(RouteError::UnknownPath(path.to_string())),
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            Route::Properties { mode }
            | Route::ByLocation { mode, .. }
            | Route::ByType { mode, .. }
            | Route::Combined { mode, .. }
            | Route::Search { mode, .. } => *mode,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Properties { .. } => Self::PROPERTIES,
            Route::ByLocation { .. } => Self::BY_LOCATION,
            Route::ByType { .. } => Self::BY_TYPE,
            Route::Combined { .. } => Self::COMBINED,
            Route::Search { .. } => Self::SEARCH,
        }
    }

    /// Path and query string for this route
    pub fn to_target(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        match self {
            Route::Properties { .. } => {}
            Route::ByLocation { location, .. } => {
                query.append_pair("location", location);
            }
            Route::ByType { listing_type, .. } => {
                query.append_pair("type", listing_type);
            }
            Route::Combined {
                location,
                listing_type,
                ..
            } => {
                if let Some(location) = location {
                    query.append_pair("location", location);
                }
                if let Some(listing_type) = listing_type {
                    query.append_pair("type", listing_type);
                }
            }
            Route::Search { query: q, .. } => {
                query.append_pair("q", q);
            }
        }
        query.append_pair("mode", self.mode().as_str());

        format!("{}?{}", self.path(), query.finish())
    }

    pub fn pagination(&self) -> Pagination {
        match self {
            Route::Properties { .. } => Pagination::ALL_PROPERTIES,
            _ => Pagination::GALLERY,
        }
    }

    /// Initial filter state of the screen
    pub fn criteria(&self, store: &ListingStore) -> FilterCriteria {
        let mut criteria = FilterCriteria::for_mode(self.mode());

        match self {
            Route::Properties { .. } => {}
            Route::ByLocation { location, .. } => {
                criteria.locations.insert(location.clone());
            }
            Route::ByType { listing_type, .. } => {
                criteria.listing_type = Some(listing_type.clone());
            }
            Route::Combined {
                location,
                listing_type,
                ..
            } => {
                criteria.require_location_and_type = true;
                criteria.locations.extend(location.clone());
                criteria.listing_type = listing_type.clone();
            }
            Route::Search { query, .. } => {
                let needle = query.trim().to_lowercase();
                // An empty set would accept everything; a blank or unmatched
                // query pins it to the raw text so nothing matches instead.
                criteria.locations = store
                    .locations()
                    .into_iter()
                    .filter(|loc| !needle.is_empty() && loc.to_lowercase().contains(&needle))
                    .map(str::to_string)
                    .collect();
                if criteria.locations.is_empty() {
                    criteria.locations.insert(query.clone());
                }
            }
        }

        criteria
    }
}

struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    fn parse(query: &str) -> Self {
        Self(form_urlencoded::parse(query.as_bytes()).into_owned().collect())
    }

    /// First non-blank value for `key`
    fn get(&self, key: &str) -> Option<String> {
        self.0
            .iter()
            .find(|(k, v)| k == key && !v.trim().is_empty())
            .map(|(_, v)| v.trim().to_string())
    }

    fn required(&self, path: &'static str, key: &'static str) -> Result<String, RouteError> {
        self.get(key)
            .ok_or(RouteError::MissingParameter { path, param: key })
    }

    fn mode(&self) -> Mode {
        match self.get("mode") {
            None => Mode::default(),
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                warn!("{}, falling back to {}", e, Mode::default());
                Mode::default()
            }),
        }
    }
}

/// Mode tabs, dropdowns and free-text box of the home page search bar
#[derive(Debug, Clone, Default)]
pub struct HeroSearch {
    pub mode: Mode,
    pub location: Option<String>,
    pub listing_type: Option<String>,
    pub text: String,
}

impl HeroSearch {
    /// Screen the search bar navigates to.
    ///
    /// A typed location that exists in the store wins. Otherwise typed text
    /// stands in for the location when the location dropdown is unset.
    pub fn route(&self, store: &ListingStore) -> Route {
        let mode = self.mode;
        let text = self.text.trim();
        let location = non_blank(self.location.as_deref()).or(non_blank(Some(text)));
        let listing_type = non_blank(self.listing_type.as_deref());

        if !text.is_empty() && store.is_known_location(text) {
            return Route::ByLocation {
                location: text.to_string(),
                mode,
            };
        }

        match (location, listing_type) {
            (Some(location), Some(listing_type)) => Route::Combined {
                location: Some(location.to_string()),
                listing_type: Some(listing_type.to_string()),
                mode,
            },
            (Some(location), None) => Route::ByLocation {
                location: location.to_string(),
                mode,
            },
            (None, Some(listing_type)) => Route::ByType {
                listing_type: listing_type.to_string(),
                mode,
            },
            (None, None) => Route::Properties { mode },
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> ListingStore {
        ListingStore::bundled().unwrap()
    }

    #[test]
    fn parses_query_parameters() {
        let route = Route::parse("/filtered-combined?location=Sector%2062&type=Office+Spaces&mode=buy").unwrap();
        assert_eq!(
            route,
            Route::Combined {
                location: Some("Sector 62".to_string()),
                listing_type: Some("Office Spaces".to_string()),
                mode: Mode::Buy,
            }
        );
    }

    #[test]
    fn mode_defaults_to_lease() {
        assert_eq!(
            Route::parse("/properties").unwrap(),
            Route::Properties { mode: Mode::Lease }
        );
        assert_eq!(Route::parse("/properties?mode=rent").unwrap().mode(), Mode::Lease);
        assert_eq!(
            Route::parse("/filtered-type?type=Warehouses&mode=pre-leased").unwrap().mode(),
            Mode::PreLeased
        );
    }

    #[test]
    fn rejects_unknown_paths_and_missing_presets() {
        assert_eq!(
            Route::parse("/about"),
            Err(RouteError::UnknownPath("/about".to_string()))
        );
        assert_eq!(
            Route::parse("/filtered-type?mode=lease"),
            Err(RouteError::MissingParameter {
                path: Route::BY_TYPE,
                param: "type"
            })
        );
    }

    #[test]
    fn targets_parse_back_to_the_same_route() {
        let route = Route::ByType {
            listing_type: "Retail Leasing".to_string(),
            mode: Mode::Buy,
        };
        assert_eq!(route.to_target(), "/filtered-type?type=Retail+Leasing&mode=buy");
        assert_eq!(Route::parse(&route.to_target()).unwrap(), route);
    }

    #[test]
    fn combined_route_is_strict() {
        let route = Route::parse("/filtered-combined?location=Sector%2062").unwrap();
        let criteria = route.criteria(&store());
        assert!(criteria.require_location_and_type);
        assert!(criteria.listing_type.is_none());
    }

    #[test]
    fn search_route_expands_to_matching_locations() {
        let store = store();
        let criteria = Route::parse("/search?q=ecotech").unwrap().criteria(&store);
        assert_eq!(criteria.locations.into_iter().collect::<Vec<_>>(), vec!["Ecotech III"]);

        let nowhere = Route::parse("/search?q=Gurgaon").unwrap().criteria(&store);
        assert_eq!(nowhere.locations.len(), 1);
        assert!(nowhere.locations.contains("Gurgaon"));
    }

    #[test]
    fn blank_search_query_is_rejected() {
        let missing = Err(RouteError::MissingParameter {
            path: Route::SEARCH,
            param: "q",
        });
        assert_eq!(Route::parse("/search?q=%20%20&mode=buy"), missing);
        assert_eq!(Route::parse("/search"), missing);

        let built = Route::Search {
            query: " ".to_string(),
            mode: Mode::Lease,
        };
        assert_eq!(built.criteria(&store()).locations.len(), 1);
    }

    #[test]
    fn hero_search_precedence() {
        let store = store();

        let typed = HeroSearch {
            text: "Sector 62".to_string(),
            listing_type: Some("Office Spaces".to_string()),
            ..Default::default()
        };
        assert_eq!(typed.route(&store).path(), Route::BY_LOCATION);

        let both = HeroSearch {
            mode: Mode::Buy,
            location: Some("Sector 18".to_string()),
            listing_type: Some("Retail Leasing".to_string()),
            ..Default::default()
        };
        assert_eq!(
            both.route(&store).to_target(),
            "/filtered-combined?location=Sector+18&type=Retail+Leasing&mode=buy"
        );

        let type_only = HeroSearch {
            listing_type: Some("Warehouses".to_string()),
            ..Default::default()
        };
        assert_eq!(type_only.route(&store).path(), Route::BY_TYPE);

        let free_text = HeroSearch {
            text: "techzone".to_string(),
            ..Default::default()
        };
        assert_eq!(
            free_text.route(&store),
            Route::ByLocation {
                location: "techzone".to_string(),
                mode: Mode::Lease
            }
        );

        let dropdown_wins = HeroSearch {
            location: Some("Sector 18".to_string()),
            text: "techzone".to_string(),
            ..Default::default()
        };
        assert_eq!(
            dropdown_wins.route(&store),
            Route::ByLocation {
                location: "Sector 18".to_string(),
                mode: Mode::Lease
            }
        );

        let nothing = HeroSearch {
            mode: Mode::PreLeased,
            ..Default::default()
        };
        assert_eq!(nothing.route(&store), Route::Properties { mode: Mode::PreLeased });
    }

    #[test]
    fn typed_text_with_a_type_keeps_the_location() {
        let store = store();
        let search = HeroSearch {
            text: "sector 62".to_string(),
            listing_type: Some("Warehouses".to_string()),
            ..Default::default()
        };
        let route = search.route(&store);
        assert_eq!(
            route.to_target(),
            "/filtered-combined?location=sector+62&type=Warehouses&mode=lease"
        );

        let view = crate::listings::ListingView::for_route(&route, &store);
        assert!(matches!(view.render(&store), crate::listings::Rendered::Empty { .. }));
    }
}
