//! Listing search and lead capture for a commercial property brokerage.
//!
//! Listings come from a static bundled file and are filtered, sorted and paged
//! per screen by [`listings::ListingView`]. Enquiry forms validate locally and
//! forward leads to an email relay through [`enquiry::EnquiryForm`].

pub mod config;
pub mod enquiry;
pub mod listings;
pub mod models;
pub mod store;
