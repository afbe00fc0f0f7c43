//! Credential payload and the ordered list of sign-in fields.
//!
//! `LOGIN_FIELDS` drives both the validation wiring and the render order of the
//! sign-in page; every [`FieldKey`] appears in it exactly once.

use std::fmt::{Debug, Display, Formatter};

use serde::Serialize;

/// Which credential a form field edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldKey {
    Email,
    Password,
}

impl FieldKey {
    pub const ALL: [Self; 2] = [Self::Email, Self::Password];

    pub fn label(self) -> &'static str {
        match self {
            Self::Email => "Email",
            Self::Password => "Password",
        }
    }
}

impl Display for FieldKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
    Text,
    Password,
}

impl InputType {
    /// Whether the rendered input should mask its content.
    pub fn is_masked(self) -> bool {
        matches!(self, Self::Password)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Stable widget id.
    pub id: &'static str,
    /// Credential this field edits.
    pub key: FieldKey,
    /// Text shown above the input.
    pub label: &'static str,
    /// Plain or masked input.
    pub input_type: InputType,
    /// Render position, lowest first.
    pub order: u8,
}

pub const LOGIN_FIELDS: [FieldDescriptor; 2] = [
    FieldDescriptor {
        id: "email",
        key: FieldKey::Email,
        label: "Email",
        input_type: InputType::Text,
        order: 0,
    },
    FieldDescriptor {
        id: "password",
        key: FieldKey::Password,
        label: "Password",
        input_type: InputType::Password,
        order: 1,
    },
];

/// Sign-in fields in render order.
pub fn login_fields() -> impl Iterator<Item = &'static FieldDescriptor> {
    let mut fields: Vec<&'static FieldDescriptor> = LOGIN_FIELDS.iter().collect();
    fields.sort_by_key(|field| field.order);
    fields.into_iter()
}

/// The email/password pair sent to the authentication service.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
pub struct CredentialPayload {
    /// Address as typed, never trimmed.
    pub email: String,
    /// Plaintext password, redacted from `Debug` output.
    pub password: String,
}

impl CredentialPayload {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn get(&self, key: FieldKey) -> &str {
        match key {
            FieldKey::Email => &self.email,
            FieldKey::Password => &self.password,
        }
    }

    pub fn set(&mut self, key: FieldKey, value: impl Into<String>) {
        match key {
            FieldKey::Email => self.email = value.into(),
            FieldKey::Password => self.password = value.into(),
        }
    }
}

impl Debug for CredentialPayload {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialPayload")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
