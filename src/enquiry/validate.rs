use crate::enquiry::types::{EmailPolicy, EnquiryRequest};
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// A field-level problem with a form, shown next to the field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter your name")]
    MissingName,
    #[error("Please enter your mobile number")]
    MissingPhone,
    #[error("Mobile number must be exactly 10 digits")]
    InvalidPhone,
    #[error("Please enter your email address")]
    MissingEmail,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Please pick a date for the visit")]
    MissingVisitDate,
    #[error("Please pick a time for the visit")]
    MissingVisitTime,
    #[error("Please choose a property type")]
    MissingPropertyType,
}

impl ValidationError {
    /// Form field the message belongs to
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingName => "name",
            ValidationError::MissingPhone | ValidationError::InvalidPhone => "phone",
            ValidationError::MissingEmail | ValidationError::InvalidEmail => "email",
            ValidationError::MissingVisitDate => "date",
            ValidationError::MissingVisitTime => "time",
            ValidationError::MissingPropertyType => "property_type",
        }
    }
}

fn phone_pattern() -> &'static Regex {
    static PHONE: OnceLock<Regex> = OnceLock::new();
    PHONE.get_or_init(|| Regex::new(r"^[0-9]{10}$").expect("phone pattern is valid"))
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid"))
}

pub fn is_valid_phone(phone: &str) -> bool {
    phone_pattern().is_match(phone.trim())
}

pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email.trim())
}

/// Check a request before anything is sent; returns every failing field.
pub fn validate(request: &EnquiryRequest) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if request.name.trim().is_empty() {
        errors.push(ValidationError::MissingName);
    }

    let phone = request.phone.trim();
    if phone.is_empty() {
        errors.push(ValidationError::MissingPhone);
    } else if !is_valid_phone(phone) {
        errors.push(ValidationError::InvalidPhone);
    }

    if request.source.email_policy() == EmailPolicy::Required {
        match request.email.as_deref().map(str::trim) {
            None | Some("") => errors.push(ValidationError::MissingEmail),
            Some(email) if !is_valid_email(email) => errors.push(ValidationError::InvalidEmail),
            Some(_) => {}
        }
    }

    if request.source.requires_visit_details() {
        if is_blank(request.visit_date.as_deref()) {
            errors.push(ValidationError::MissingVisitDate);
        }
        if is_blank(request.visit_time.as_deref()) {
            errors.push(ValidationError::MissingVisitTime);
        }
        if is_blank(request.property_type.as_deref()) {
            errors.push(ValidationError::MissingPropertyType);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enquiry::types::EnquirySource;

    #[test]
    fn short_phone_is_rejected() {
        let request = EnquiryRequest::new(EnquirySource::HeroCallback, "Asha", "12345");
        assert_eq!(validate(&request), Err(vec![ValidationError::InvalidPhone]));
    }

    #[test]
    fn phone_must_be_ten_digits_only() {
        assert!(is_valid_phone("9876543210"));
        assert!(is_valid_phone(" 9876543210 "));
        assert!(!is_valid_phone("98765 43210"));
        assert!(!is_valid_phone("+919876543210"));
        assert!(!is_valid_phone("98765432101"));
        assert!(!is_valid_phone("98765abcde"));
    }

    #[test]
    fn reports_every_failing_field() {
        let request = EnquiryRequest::new(EnquirySource::ContactPage, "  ", "");
        let errors = validate(&request).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::MissingName,
                ValidationError::MissingPhone,
                ValidationError::MissingEmail
            ]
        );
        let fields: Vec<_> = errors.iter().map(ValidationError::field).collect();
        assert_eq!(fields, vec!["name", "phone", "email"]);
    }

    #[test]
    fn email_is_only_checked_where_required() {
        let loose = EnquiryRequest::new(EnquirySource::EnquirySection, "Ravi", "9876543210")
            .with_email("not-an-email");
        assert_eq!(validate(&loose), Ok(()));

        let strict = EnquiryRequest::new(EnquirySource::ContactPage, "Ravi", "9876543210")
            .with_email("not-an-email");
        assert_eq!(validate(&strict), Err(vec![ValidationError::InvalidEmail]));

        let good = strict.with_email("ravi@example.co.in");
        assert_eq!(validate(&good), Ok(()));
    }

    #[test]
    fn site_visit_needs_date_time_and_type() {
        let request = EnquiryRequest::new(EnquirySource::SiteVisit, "Kabir", "9988776655")
            .with_email("kabir@example.com");
        let errors = validate(&request).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::MissingVisitDate,
                ValidationError::MissingVisitTime,
                ValidationError::MissingPropertyType
            ]
        );

        let complete = request
            .with_visit("2024-03-05", "11:30")
            .with_property_type("Warehouses");
        assert_eq!(validate(&complete), Ok(()));

        let no_email = EnquiryRequest::new(EnquirySource::SiteVisit, "Kabir", "9988776655")
            .with_visit("2024-03-05", "11:30")
            .with_property_type("Warehouses");
        assert_eq!(validate(&no_email), Err(vec![ValidationError::MissingEmail]));
    }
}
