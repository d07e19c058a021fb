//! Synchronous credential validation shared by the login and register forms.
//!
//! Validation runs against the current field values and is re-evaluated on
//! every change. The result is a field → message map; an absent entry means
//! the field is valid, and submission is permitted only when the map is
//! empty.

use std::collections::BTreeMap;
use std::fmt;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Form fields that can carry a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Email,
    Password,
    ConfirmPassword,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Email => "email",
            Field::Password => "password",
            Field::ConfirmPassword => "confirmPassword",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field → message mapping produced by a validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<Field, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    /// The error message for `field`, if any.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterate over (field, message) pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.errors {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

/// Validate login fields.
pub fn validate_login(email: &str, password: &str) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    validate_email(email, &mut errors);
    validate_password(password, &mut errors);
    errors
}

/// Validate registration fields.
pub fn validate_registration(
    email: &str,
    password: &str,
    confirm_password: &str,
) -> ValidationErrors {
    let mut errors = validate_login(email, password);

    if confirm_password.is_empty() {
        errors.insert(Field::ConfirmPassword, "Confirm password is required");
    } else if confirm_password != password {
        errors.insert(Field::ConfirmPassword, "Passwords do not match");
    }

    errors
}

fn validate_email(email: &str, errors: &mut ValidationErrors) {
    if email.is_empty() {
        errors.insert(Field::Email, "Email is required");
    } else if !has_email_shape(email) {
        errors.insert(Field::Email, "Invalid email address");
    }
}

fn validate_password(password: &str, errors: &mut ValidationErrors) {
    if password.is_empty() {
        errors.insert(Field::Password, "Password is required");
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        errors.insert(
            Field::Password,
            "Password must be at least 6 characters",
        );
    }
}

/// Accepts any string containing a run of non-whitespace, `@`, non-whitespace,
/// `.`, non-whitespace. Deliberately loose; the backend is the authority on
/// address validity.
fn has_email_shape(input: &str) -> bool {
    let chars: Vec<char> = input.chars().collect();

    for (i, &c) in chars.iter().enumerate() {
        if c != '@' {
            continue;
        }
        // at least one non-space character before the '@'
        if i == 0 || chars[i - 1].is_whitespace() {
            continue;
        }
        // within the non-space run after the '@', a '.' preceded by at least
        // one character and followed by a non-space character
        let mut seen_after_at = false;
        let mut j = i + 1;
        while j < chars.len() && !chars[j].is_whitespace() {
            if chars[j] == '.'
                && seen_after_at
                && j + 1 < chars.len()
                && !chars[j + 1].is_whitespace()
            {
                return true;
            }
            seen_after_at = true;
            j += 1;
        }
    }

    false
}
