//! Form validation run before any contact is sent to the service.
//!
//! The checks are deliberately loose: an email only has to look like
//! `local@domain.tld` and a phone number only has to be digits.

use regex::Regex;

use crate::models::ContactDraft;

pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
pub const PHONE_PATTERN: &str = r"^[0-9]+$";

/// Form field a validation message is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Phone,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
        }
    }
}

/// A single field-level validation message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

/// All validation messages for one submission, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: Field, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// First message recorded for `field`.
    pub fn message_for(&self, field: Field) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field.label(), e.message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Policy deciding whether a draft may be submitted.
pub trait ContactValidator {
    fn validate(&self, draft: &ContactDraft) -> Result<(), ValidationErrors>;
}

/// Default policy: required fields plus the email and phone patterns.
pub struct RegexValidator {
    email: Regex,
    phone: Regex,
}

impl RegexValidator {
    pub fn new() -> Self {
        Self {
            email: Regex::new(EMAIL_PATTERN).expect("email pattern compiles"),
            phone: Regex::new(PHONE_PATTERN).expect("phone pattern compiles"),
        }
    }

    /// Use custom patterns in place of the built-in ones.
    pub fn with_patterns(email: &str, phone: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            email: Regex::new(email)?,
            phone: Regex::new(phone)?,
        })
    }

    pub fn is_valid_email(&self, email: &str) -> bool {
        self.email.is_match(email)
    }

    pub fn is_valid_phone(&self, phone: &str) -> bool {
        self.phone.is_match(phone)
    }
}

impl Default for RegexValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactValidator for RegexValidator {
    fn validate(&self, draft: &ContactDraft) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if draft.name.trim().is_empty() {
            errors.add(Field::Name, "Name is required");
        }

        if draft.email.trim().is_empty() {
            errors.add(Field::Email, "Email is required");
        } else if !self.is_valid_email(&draft.email) {
            errors.add(Field::Email, "Enter a valid email address");
        }

        if draft.phone.trim().is_empty() {
            errors.add(Field::Phone, "Phone is required");
        } else if !self.is_valid_phone(&draft.phone) {
            errors.add(Field::Phone, "Phone must contain digits only");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
