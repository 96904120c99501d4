use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{AppError, FieldError};

static EMAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));
static URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^https?://[^\s/$.?#][^\s]*$").expect("url pattern"));

pub fn is_valid_email(value: &str) -> bool {
    EMAIL.is_match(value.trim())
}

pub fn is_valid_url(value: &str) -> bool {
    URL.is_match(value.trim())
}

/// Trims, and turns blank form inputs into `None`.
pub fn blank_to_none(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Collects per-field failures so a form reports every problem at once.
#[derive(Debug, Default)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: &str) {
        self.0.push(FieldError { field: field.to_string(), message: message.to_string() });
    }

    pub fn min_len(&mut self, field: &str, value: &str, min: usize, message: &str) -> &mut Self {
        if value.trim().chars().count() < min {
            self.push(field, message);
        }
        self
    }

    pub fn email(&mut self, field: &str, value: &str) -> &mut Self {
        if !is_valid_email(value) {
            self.push(field, "Invalid email address");
        }
        self
    }

    pub fn optional_email(&mut self, field: &str, value: Option<&str>) -> &mut Self {
        match value {
            Some(v) if !v.trim().is_empty() => self.email(field, v),
            _ => self,
        }
    }

    pub fn optional_url(&mut self, field: &str, value: Option<&str>) -> &mut Self {
        if let Some(v) = value.filter(|v| !v.trim().is_empty()) {
            if !is_valid_url(v) {
                self.push(field, "Invalid URL");
            }
        }
        self
    }

    pub fn finish(&mut self) -> Result<(), AppError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(AppError::InvalidFields(std::mem::take(&mut self.0)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("jane@agency.io"));
        assert!(is_valid_email("  jane@agency.io "));
        assert!(!is_valid_email("jane@agency"));
        assert!(!is_valid_email("jane agency@x.io"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn url_requires_http_scheme() {
        assert!(is_valid_url("https://acme.com"));
        assert!(is_valid_url("http://acme.com/path?q=1"));
        assert!(!is_valid_url("acme.com"));
        assert!(!is_valid_url("ftp://acme.com"));
        assert!(!is_valid_url("https://"));
    }

    #[test]
    fn collects_every_failure_in_order() {
        let err = FieldErrors::new()
            .min_len("name", "J", 2, "Name must be at least 2 characters")
            .email("email", "nope")
            .min_len("password", "short", 8, "Password must be at least 8 characters")
            .finish()
            .unwrap_err();

        match err {
            AppError::InvalidFields(fields) => {
                let names: Vec<&str> = fields.iter().map(|f| f.field.as_str()).collect();
                assert_eq!(names, vec!["name", "email", "password"]);
                assert_eq!(fields[0].message, "Name must be at least 2 characters");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn optional_fields_accept_blanks() {
        assert!(FieldErrors::new()
            .optional_email("email", Some(""))
            .optional_url("website", None)
            .optional_url("website", Some("  "))
            .finish()
            .is_ok());
        assert_eq!(blank_to_none(Some("  ".into())), None);
        assert_eq!(blank_to_none(Some(" acme ".into())), Some("acme".into()));
    }
}
