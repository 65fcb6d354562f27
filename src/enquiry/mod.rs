pub mod emailjs;
pub mod form;
pub mod traits;
pub mod types;
pub mod validate;

pub use emailjs::EmailJsRelay;
pub use form::{EnquiryForm, Outcome, StatusMessage, SubmitError};
pub use traits::{EmailRelay, RelayError};
pub use types::{EnquiryRequest, EnquirySource, ListingRef, TemplateParams};
pub use validate::{validate, ValidationError};
