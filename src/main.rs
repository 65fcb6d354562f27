use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use office_scout::config::AppConfig;
use office_scout::enquiry::{EmailJsRelay, EnquiryForm, EnquiryRequest, EnquirySource, Outcome, SubmitError};
use office_scout::listings::{HeroSearch, ListingView, Pagination, Recovery, Rendered, Route, SortKey};
use office_scout::models::{Mode, PropertyListing};
use office_scout::store::ListingStore;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "office-scout", version, about = "Commercial property listings and enquiries")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show a listing screen, e.g. `/filtered-type?type=Warehouses&mode=lease`
    List {
        #[arg(long, default_value = "/properties")]
        route: String,
        /// Add a location to the filter (repeatable)
        #[arg(long = "location")]
        locations: Vec<String>,
        /// Add an exact size to the filter (repeatable)
        #[arg(long = "size")]
        sizes: Vec<String>,
        #[arg(long = "type")]
        listing_type: Option<String>,
        #[arg(long)]
        mode: Option<Mode>,
        #[arg(long, default_value_t = SortKey::Default)]
        sort: SortKey,
        /// Page number, or load-more steps on gallery screens
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Also print the filter menu choices of the screen
        #[arg(long)]
        options: bool,
    },
    /// Suggest locations for the search box
    Suggest { query: String },
    /// Run the home page search bar and show the screen it leads to
    Search {
        #[arg(long, default_value_t = Mode::Lease)]
        mode: Mode,
        #[arg(long)]
        location: Option<String>,
        #[arg(long = "type")]
        listing_type: Option<String>,
        #[arg(default_value = "")]
        text: String,
    },
    /// Send an enquiry to the sales team
    Enquire {
        #[arg(long, default_value_t = EnquirySource::EnquirySection)]
        source: EnquirySource,
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        message: Option<String>,
        #[arg(long)]
        subject: Option<String>,
        #[arg(long)]
        property_type: Option<String>,
        /// Visit date, for site visits
        #[arg(long)]
        date: Option<String>,
        /// Visit time, for site visits
        #[arg(long)]
        time: Option<String>,
        #[arg(long)]
        request_type: Option<String>,
        /// Id of the listing the enquiry is about
        #[arg(long)]
        listing: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load()?;

    let store = match &config.listings_path {
        Some(path) => ListingStore::from_path(path)?,
        None => ListingStore::bundled()?,
    };
    debug!("🏢 {} listings across {} locations", store.len(), store.locations().len());

    match cli.command {
        Command::List {
            route,
            locations,
            sizes,
            listing_type,
            mode,
            sort,
            page,
            options,
        } => {
            let route = Route::parse(&route)?;
            let mut view = ListingView::for_route(&route, &store);

            for location in &locations {
                if !view.criteria().locations.contains(location) {
                    view.toggle_location(location);
                }
            }
            for size in &sizes {
                if !view.criteria().sizes.contains(size) {
                    view.toggle_size(size);
                }
            }
            if listing_type.is_some() {
                view.select_type(listing_type.as_deref());
            }
            if let Some(mode) = mode {
                view.select_mode(mode);
            }
            view.set_sort(sort);
            turn_to(&mut view, route.pagination(), page);

            if options {
                print_options(&view, &store);
            }
            print_rendered(&route, view.render(&store));
        }
        Command::Suggest { query } => {
            let suggestions = store.suggest_locations(&query);
            if suggestions.is_empty() {
                println!("No locations match '{}'", query.trim());
            }
            for suggestion in suggestions {
                println!("{}", suggestion);
            }
        }
        Command::Search {
            mode,
            location,
            listing_type,
            text,
        } => {
            let search = HeroSearch {
                mode,
                location,
                listing_type,
                text,
            };
            let route = search.route(&store);
            info!("Navigating to: {}", route.to_target());

            let view = ListingView::for_route(&route, &store);
            print_rendered(&route, view.render(&store));
        }
        Command::Enquire {
            source,
            name,
            phone,
            email,
            message,
            subject,
            property_type,
            date,
            time,
            request_type,
            listing,
        } => {
            let mut request = EnquiryRequest::new(source, name, phone);
            request.email = email;
            request.message = message;
            request.subject = subject;
            request.property_type = property_type;
            request.visit_date = date;
            request.visit_time = time;
            request.request_type = request_type;
            if let Some(id) = listing {
                let listing = store
                    .find_by_id_str(&id)
                    .with_context(|| format!("No listing with id {}", id))?;
                request = request.about(listing);
            }

            let relay = EmailJsRelay::new(config.require_relay()?)?;
            let form = EnquiryForm::with_status_ttl(relay, config.status_clear);

            match form.submit(request).await {
                Ok(outcome) => {
                    if let Some(status) = form.status() {
                        println!("{}", status.text);
                    }
                    if outcome == Outcome::Failed {
                        bail!("Enquiry was not delivered");
                    }
                }
                Err(SubmitError::Invalid(errors)) => {
                    for error in &errors {
                        eprintln!("{}: {}", error.field(), error);
                    }
                    bail!("Enquiry not sent: {} field(s) need attention", errors.len());
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    Ok(())
}

/// Move a fresh view to the requested page or load-more step
fn turn_to(view: &mut ListingView, pagination: Pagination, page: usize) {
    match pagination {
        Pagination::Pages { .. } => view.go_to_page(page),
        Pagination::LoadMore { .. } => {
            for _ in 1..page {
                view.load_more();
            }
        }
    }
}

fn print_options(view: &ListingView, store: &ListingStore) {
    let options = view.options(store);
    println!("Types: {}", store.types().join(", "));
    println!("Locations: {}", options.locations.join(", "));
    println!("Sizes: {}", options.sizes.join(", "));
    println!(
        "Sort: {}",
        SortKey::ALL.iter().map(SortKey::as_str).collect::<Vec<_>>().join(", ")
    );
    println!();
}

fn print_rendered(route: &Route, rendered: Rendered<'_>) {
    match rendered {
        Rendered::Listings {
            items,
            total_matches,
            page,
            total_pages,
            has_more,
        } => {
            info!("✅ {} matching {}", total_matches, if total_matches == 1 { "property" } else { "properties" });
            for (i, listing) in items.iter().enumerate() {
                print_listing(i + 1, listing);
            }
            match route.pagination() {
                Pagination::Pages { .. } => println!("Page {} of {}", page, total_pages),
                Pagination::LoadMore { .. } if has_more => {
                    println!("Showing {} of {}; pass --page {} to load more", items.len(), total_matches, page + 1)
                }
                Pagination::LoadMore { .. } => println!("Showing all {}", total_matches),
            }
        }
        Rendered::Empty { recovery } => {
            println!("We couldn't find any properties matching your criteria.");
            match recovery {
                Recovery::ClearFilters => println!("Try clearing your filters."),
                Recovery::ViewAllProperties => println!(
                    "Browse all properties: {}",
                    Route::Properties { mode: route.mode() }.to_target()
                ),
            }
        }
    }
}

fn print_listing(n: usize, listing: &PropertyListing) {
    println!("{}. {} ({})", n, listing.name, listing.size);
    println!("   {}, Noida", listing.location);
    let kind = listing
        .listing_type
        .as_deref()
        .or(listing.category.as_deref())
        .unwrap_or("Commercial");
    let modes: Vec<&str> = listing.available_for.iter().map(Mode::as_str).collect();
    println!("   {} · {}", kind, modes.join(", "));
    println!("   ID: {}", listing.id);
    println!();
}
