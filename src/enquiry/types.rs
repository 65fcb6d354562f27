use crate::models::{ListingId, PropertyListing};
use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Banner text after a delivered enquiry, for forms without their own wording
pub const SUCCESS_MESSAGE: &str = "Thank you! Your enquiry has been sent. We will contact you soon.";
/// Banner text after a failed enquiry, for forms without their own wording
pub const FAILURE_MESSAGE: &str = "Failed to send your enquiry. Please try again or contact us directly.";

/// Flat placeholder map handed to the relay's email template
pub type TemplateParams = BTreeMap<String, String>;

/// Whether a form asks for an email address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailPolicy {
    NotCollected,
    Optional,
    Required,
}

/// The form an enquiry was sent from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnquirySource {
    /// "Get a callback" dialog on the home page banner.
    HeroCallback,
    /// Enquiry dialog opened from a project card.
    ProjectCard,
    /// Enquiry section on the home page.
    EnquirySection,
    /// Sidebar form of the all-properties screen.
    PropertiesList,
    /// Contact page.
    ContactPage,
    /// "Schedule a visit" dialog on the about page.
    SiteVisit,
    /// Enquire dialog on the about page.
    AboutEnquiry,
    /// Callback dialog of the "why choose us" section.
    WhyChooseUs,
    /// Enquiry dialog opened from a featured property card.
    FeaturedProperty,
}

impl EnquirySource {
    pub const ALL: [EnquirySource; 9] = [
        EnquirySource::HeroCallback,
        EnquirySource::ProjectCard,
        EnquirySource::EnquirySection,
        EnquirySource::PropertiesList,
        EnquirySource::ContactPage,
        EnquirySource::SiteVisit,
        EnquirySource::AboutEnquiry,
        EnquirySource::WhyChooseUs,
        EnquirySource::FeaturedProperty,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EnquirySource::HeroCallback => "hero-callback",
            EnquirySource::ProjectCard => "project-card",
            EnquirySource::EnquirySection => "enquiry-section",
            EnquirySource::PropertiesList => "properties-list",
            EnquirySource::ContactPage => "contact-page",
            EnquirySource::SiteVisit => "site-visit",
            EnquirySource::AboutEnquiry => "about-enquiry",
            EnquirySource::WhyChooseUs => "why-choose-us",
            EnquirySource::FeaturedProperty => "featured-property",
        }
    }

    /// Team named as the recipient in the email
    pub fn recipient(&self) -> &'static str {
        match self {
            EnquirySource::HeroCallback
            | EnquirySource::ProjectCard
            | EnquirySource::SiteVisit
            | EnquirySource::AboutEnquiry
            | EnquirySource::WhyChooseUs
            | EnquirySource::FeaturedProperty => "Property Team",
            EnquirySource::EnquirySection => "Office Search Team",
            EnquirySource::PropertiesList => "Sales Team",
            EnquirySource::ContactPage => "Commercial Real Estate Team",
        }
    }

    pub fn email_policy(&self) -> EmailPolicy {
        match self {
            EnquirySource::HeroCallback
            | EnquirySource::ProjectCard
            | EnquirySource::AboutEnquiry
            | EnquirySource::WhyChooseUs
            | EnquirySource::FeaturedProperty => EmailPolicy::NotCollected,
            EnquirySource::EnquirySection => EmailPolicy::Optional,
            EnquirySource::PropertiesList | EnquirySource::ContactPage | EnquirySource::SiteVisit => {
                EmailPolicy::Required
            }
        }
    }

    /// Site visits also need a date, a time and a property type
    pub fn requires_visit_details(&self) -> bool {
        matches!(self, EnquirySource::SiteVisit)
    }

    /// Fixed `request_type` the form tags its emails with
    pub fn request_type(&self) -> Option<&'static str> {
        match self {
            EnquirySource::WhyChooseUs => Some("Why Choose Us"),
            _ => None,
        }
    }

    /// Banner text after the relay accepted the enquiry
    pub fn success_message(&self) -> &'static str {
        match self {
            EnquirySource::SiteVisit => "Visit scheduled successfully! We will contact you soon.",
            EnquirySource::AboutEnquiry => "Enquiry submitted successfully! We will contact you soon.",
            EnquirySource::WhyChooseUs => "Thank you! We will call you shortly.",
            _ => SUCCESS_MESSAGE,
        }
    }

    /// Banner text after the relay failed
    pub fn failure_message(&self) -> &'static str {
        match self {
            EnquirySource::SiteVisit => "Failed to schedule visit. Please try again.",
            EnquirySource::AboutEnquiry => "Failed to submit enquiry. Please try again.",
            EnquirySource::WhyChooseUs => "Failed to send. Please try again.",
            _ => FAILURE_MESSAGE,
        }
    }
}

impl fmt::Display for EnquirySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnquirySource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EnquirySource::ALL
            .into_iter()
            .find(|source| source.as_str() == s)
            .ok_or_else(|| format!("unknown enquiry source '{}'", s))
    }
}

/// The listing an enquiry is about
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRef {
    pub id: ListingId,
    pub name: String,
    pub location: String,
    pub size: String,
    /// `type`, or `category` when the listing has no type
    pub listing_type: Option<String>,
}

impl From<&PropertyListing> for ListingRef {
    fn from(listing: &PropertyListing) -> Self {
        Self {
            id: listing.id.clone(),
            name: listing.name.clone(),
            location: listing.location.clone(),
            size: listing.size.clone(),
            listing_type: listing.listing_type.clone().or_else(|| listing.category.clone()),
        }
    }
}

/// One form submission; dropped once the relay has answered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnquiryRequest {
    pub source: EnquirySource,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub message: Option<String>,
    pub subject: Option<String>,
    pub property_type: Option<String>,
    /// Requested visit date, as entered
    pub visit_date: Option<String>,
    /// Requested visit time, as entered
    pub visit_time: Option<String>,
    /// Overrides the source's own request type
    pub request_type: Option<String>,
    pub listing: Option<ListingRef>,
}

impl EnquiryRequest {
    pub fn new(source: EnquirySource, name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            source,
            name: name.into(),
            phone: phone.into(),
            email: None,
            message: None,
            subject: None,
            property_type: None,
            visit_date: None,
            visit_time: None,
            request_type: None,
            listing: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_property_type(mut self, property_type: impl Into<String>) -> Self {
        self.property_type = Some(property_type.into());
        self
    }

    pub fn with_visit(mut self, date: impl Into<String>, time: impl Into<String>) -> Self {
        self.visit_date = Some(date.into());
        self.visit_time = Some(time.into());
        self
    }

    pub fn with_request_type(mut self, request_type: impl Into<String>) -> Self {
        self.request_type = Some(request_type.into());
        self
    }

    pub fn about(mut self, listing: &PropertyListing) -> Self {
        self.listing = Some(ListingRef::from(listing));
        self
    }

    /// Placeholder values for the email template. Blank values are left out.
    pub fn template_params(&self, submitted_at: DateTime<Utc>) -> TemplateParams {
        let mut params = TemplateParams::new();
        let phone = self.phone.trim();
        let generated;
        let message = match (self.source, non_blank(self.message.as_deref())) {
            (_, Some(message)) => Some(message),
            (EnquirySource::HeroCallback, None) => {
                generated = format!("New enquiry from {}. Mobile: {}", self.name.trim(), phone);
                Some(generated.as_str())
            }
            (EnquirySource::WhyChooseUs, None) => {
                generated = format!(
                    "Why Choose Us Enquiry\nName: {}\nPhone: {}\nTime: {}",
                    self.name.trim(),
                    phone,
                    india_time(submitted_at)
                );
                Some(generated.as_str())
            }
            _ => None,
        };
        let request_type = non_blank(self.request_type.as_deref()).or(self.source.request_type());
        let email = match self.source.email_policy() {
            EmailPolicy::NotCollected => None,
            _ => self.email.as_deref(),
        };

        put(&mut params, "from_name", Some(self.name.as_str()));
        put(&mut params, "phone", Some(phone));
        put(&mut params, "from_email", email);
        put(&mut params, "message", message);
        put(&mut params, "subject", self.subject.as_deref());
        put(&mut params, "property_type", self.property_type.as_deref());
        put(&mut params, "visit_date", self.visit_date.as_deref());
        put(&mut params, "visit_time", self.visit_time.as_deref());
        put(&mut params, "request_type", request_type);
        put(&mut params, "to_name", Some(self.source.recipient()));
        put(&mut params, "page", Some(self.source.as_str()));
        if let Some(listing) = &self.listing {
            put(&mut params, "project_id", Some(listing.id.to_string().as_str()));
            put(&mut params, "project_name", Some(listing.name.as_str()));
            put(&mut params, "project_location", Some(listing.location.as_str()));
            put(&mut params, "project_size", Some(listing.size.as_str()));
            put(&mut params, "project_type", listing.listing_type.as_deref());
        }
        let stamp = submitted_at.to_rfc3339_opts(SecondsFormat::Secs, true);
        put(&mut params, "submitted_at", Some(stamp.as_str()));

        params
    }
}

/// UTC+05:30
const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// Local time in India, e.g. "1/3/2024, 3:00:00 pm"
fn india_time(at: DateTime<Utc>) -> String {
    const FORMAT: &str = "%-d/%-m/%Y, %-I:%M:%S %P";
    match FixedOffset::east_opt(IST_OFFSET_SECS) {
        Some(ist) => at.with_timezone(&ist).format(FORMAT).to_string(),
        None => at.format(FORMAT).to_string(),
    }
}

fn put(params: &mut TemplateParams, key: &str, value: Option<&str>) {
    if let Some(value) = non_blank(value) {
        params.insert(key.to_string(), value.to_string());
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
