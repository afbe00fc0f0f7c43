//! Sign-in validation schema.
//!
//! Pure functions only: `validate_credentials` can be called from tests or the
//! form controller without any UI around it.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::sync::LazyLock;

use regex::Regex;

use thiserror::Error;

use crate::{CredentialPayload, FieldKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    Required,
    InvalidFormat,
}

impl Display for ValidationErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Required => f.write_str("is required"),
            Self::InvalidFormat => f.write_str("must be a valid email address"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{field} {kind}")]
pub struct ValidationError {
    pub field: FieldKey,
    pub kind: ValidationErrorKind,
}

/// Per-field outcome of one validation run. A missing entry means the field is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: BTreeMap<FieldKey, ValidationError>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error(&self, key: FieldKey) -> Option<&ValidationError> {
        self.errors.get(&key)
    }

    pub fn message(&self, key: FieldKey) -> Option<String> {
        self.error(key).map(ToString::to_string)
    }

    pub fn clear(&mut self, key: FieldKey) {
        self.errors.remove(&key);
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.values()
    }

    fn reject(&mut self, field: FieldKey, kind: ValidationErrorKind) {
        self.errors.insert(field, ValidationError { field, kind });
    }
}

pub fn validate_credentials(payload: &CredentialPayload) -> ValidationResult {
    let mut result = ValidationResult::default();

    if payload.email.is_empty() {
        result.reject(FieldKey::Email, ValidationErrorKind::Required);
    } else if !is_valid_email(&payload.email) {
        result.reject(FieldKey::Email, ValidationErrorKind::InvalidFormat);
    }

    // Strength rules belong to the backend; only presence is checked here.
    if payload.password.is_empty() {
        result.reject(FieldKey::Password, ValidationErrorKind::Required);
    }

    result
}

// Local part: letters, digits and `_'+-.`, ending on anything but `'` or `.`.
// Domain: one or more `label.` groups followed by a letters-only top-level
// label of length >= 2. The leading-dot and `..` rules sit outside the pattern
// because `regex` has no lookahead.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .expect("EMAIL_REGEX: invalid regex pattern")
});

pub fn is_valid_email(email: &str) -> bool {
    !email.starts_with('.') && !email.contains("..") && EMAIL_REGEX.is_match(email)
}
