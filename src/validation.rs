//! Boundary validation of request payloads.
//!
//! A single `RequestValidator` is constructed at process start and carried
//! in the application state; handlers call it before touching the store.
//! Failures accumulate into the `details` array of a 400 response.

use crate::database::models::DestinationType;
use crate::error::{ApiError, FieldError};
use crate::handlers::auth::{LoginRequest, RegisterRequest};
use crate::handlers::destinations::{CreateDestinationRequest, UpdateDestinationRequest};

pub const NAME_MIN: usize = 2;
pub const NAME_MAX: usize = 100;
pub const DESCRIPTION_MIN: usize = 10;
pub const DESCRIPTION_MAX: usize = 500;
pub const PASSWORD_MIN: usize = 6;

pub struct RequestValidator;

impl RequestValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn register(&self, req: &RegisterRequest) -> Result<(), ApiError> {
        let mut errors = Vec::new();

        if !is_valid_email(&req.email) {
            errors.push(FieldError::new("email", "Email must be a valid address"));
        }
        if req.password.len() < PASSWORD_MIN {
            errors.push(FieldError::new(
                "password",
                format!("Password must be at least {PASSWORD_MIN} characters"),
            ));
        }
        if req.name.trim().chars().count() < NAME_MIN {
            errors.push(FieldError::new(
                "name",
                format!("Name must be at least {NAME_MIN} characters"),
            ));
        }

        finish(errors)
    }

    pub fn login(&self, req: &LoginRequest) -> Result<(), ApiError> {
        let mut errors = Vec::new();

        if !is_valid_email(&req.email) {
            errors.push(FieldError::new("email", "Email must be a valid address"));
        }
        if req.password.is_empty() {
            errors.push(FieldError::new("password", "Password is required"));
        }

        finish(errors)
    }

    pub fn create_destination(&self, req: &CreateDestinationRequest) -> Result<(), ApiError> {
        let mut errors = Vec::new();

        check_name(&mut errors, &req.name);
        check_description(&mut errors, &req.description);
        check_country_code(&mut errors, &req.country_code);
        check_kind(&mut errors, &req.kind);

        finish(errors)
    }

    /// Partial update: only the provided fields are checked.
    pub fn update_destination(&self, req: &UpdateDestinationRequest) -> Result<(), ApiError> {
        let mut errors = Vec::new();

        if let Some(name) = &req.name {
            check_name(&mut errors, name);
        }
        if let Some(description) = &req.description {
            check_description(&mut errors, description);
        }
        if let Some(country_code) = &req.country_code {
            check_country_code(&mut errors, country_code);
        }
        if let Some(kind) = &req.kind {
            check_kind(&mut errors, kind);
        }

        finish(errors)
    }
}

impl Default for RequestValidator {
    fn default() -> Self {
        Self::new()
    }
}

fn finish(errors: Vec<FieldError>) -> Result<(), ApiError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::validation(errors))
    }
}

fn check_name(errors: &mut Vec<FieldError>, name: &str) {
    let len = name.trim().chars().count();
    if !(NAME_MIN..=NAME_MAX).contains(&len) {
        errors.push(FieldError::new(
            "name",
            format!("Name must be between {NAME_MIN} and {NAME_MAX} characters"),
        ));
    }
}

fn check_description(errors: &mut Vec<FieldError>, description: &str) {
    let len = description.trim().chars().count();
    if !(DESCRIPTION_MIN..=DESCRIPTION_MAX).contains(&len) {
        errors.push(FieldError::new(
            "description",
            format!("Description must be between {DESCRIPTION_MIN} and {DESCRIPTION_MAX} characters"),
        ));
    }
}

pub fn is_valid_country_code(code: &str) -> bool {
    code.len() == 2 && code.chars().all(|c| c.is_ascii_uppercase())
}

fn check_country_code(errors: &mut Vec<FieldError>, code: &str) {
    if !is_valid_country_code(code) {
        errors.push(FieldError::new(
            "countryCode",
            "Country code must be exactly 2 uppercase letters",
        ));
    }
}

fn check_kind(errors: &mut Vec<FieldError>, kind: &str) {
    if kind.parse::<DestinationType>().is_err() {
        errors.push(FieldError::new(
            "type",
            "Type must be one of: Beach, Mountain, City, Cultural, Adventure",
        ));
    }
}

/// Minimal email shape check: one `@` with a non-empty local part and a
/// dotted domain.
pub fn is_valid_email(email: &str) -> bool {
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty()
                && !domain.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details(err: ApiError) -> Vec<String> {
        match err {
            ApiError::ValidationError { details } => {
                details.into_iter().map(|d| d.field).collect()
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    fn create_request() -> CreateDestinationRequest {
        CreateDestinationRequest {
            name: "Foo Bar".into(),
            description: "A nice long description here".into(),
            country_code: "MX".into(),
            kind: "Beach".into(),
        }
    }

    #[test]
    fn valid_create_request_passes() {
        assert!(RequestValidator::new()
            .create_destination(&create_request())
            .is_ok());
    }

    #[test]
    fn boundary_lengths_are_accepted() {
        let mut req = create_request();
        req.name = "ab".into();
        req.description = "x".repeat(500);
        assert!(RequestValidator::new().create_destination(&req).is_ok());
    }

    #[test]
    fn short_name_and_description_are_rejected() {
        let mut req = create_request();
        req.name = "a".into();
        req.description = "too short".into();
        let fields = details(
            RequestValidator::new()
                .create_destination(&req)
                .unwrap_err(),
        );
        assert_eq!(fields, vec!["name", "description"]);
    }

    #[test]
    fn oversized_fields_are_rejected() {
        let mut req = create_request();
        req.name = "x".repeat(101);
        req.description = "y".repeat(501);
        let fields = details(
            RequestValidator::new()
                .create_destination(&req)
                .unwrap_err(),
        );
        assert_eq!(fields, vec!["name", "description"]);
    }

    #[test]
    fn country_code_must_be_two_uppercase_letters() {
        assert!(is_valid_country_code("MX"));
        assert!(!is_valid_country_code("mx"));
        assert!(!is_valid_country_code("MEX"));
        assert!(!is_valid_country_code("M"));
        assert!(!is_valid_country_code("M1"));
    }

    #[test]
    fn unknown_type_is_rejected() {
        let mut req = create_request();
        req.kind = "Desert".into();
        let fields = details(
            RequestValidator::new()
                .create_destination(&req)
                .unwrap_err(),
        );
        assert_eq!(fields, vec!["type"]);
    }

    #[test]
    fn partial_update_skips_absent_fields() {
        let req = UpdateDestinationRequest {
            name: None,
            description: None,
            country_code: Some("BR".into()),
            kind: None,
        };
        assert!(RequestValidator::new().update_destination(&req).is_ok());
    }

    #[test]
    fn partial_update_still_checks_present_fields() {
        let req = UpdateDestinationRequest {
            name: Some("a".into()),
            description: None,
            country_code: None,
            kind: None,
        };
        let fields = details(RequestValidator::new().update_destination(&req).unwrap_err());
        assert_eq!(fields, vec!["name"]);
    }

    #[test]
    fn register_requires_email_password_and_name() {
        let req = RegisterRequest {
            email: "not-an-email".into(),
            password: "short".into(),
            name: "A".into(),
        };
        let fields = details(RequestValidator::new().register(&req).unwrap_err());
        assert_eq!(fields, vec!["email", "password", "name"]);
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("a@x.com"));
        assert!(!is_valid_email("a@x"));
        assert!(!is_valid_email("@x.com"));
        assert!(!is_valid_email("a@"));
        assert!(!is_valid_email("a@b@c.com"));
        assert!(!is_valid_email("a@.com"));
    }
}
