//! Login and registration form state machines.
//!
//! Each form mirrors the lifecycle of its on-screen counterpart:
//!
//! ```text
//! Editing -> (field change) -> Editing (errors recomputed)
//!         -> (submit, valid) -> Submitting -> Succeeded
//!                                          -> Failed (message shown,
//!                                             editing resumes)
//! ```
//!
//! Validation is re-evaluated on every field change, not only on submit, and
//! submission is refused while any error is present. Because `submit` takes
//! `&mut self`, overlapping submits of one form are structurally impossible.

use crate::error::{AuthError, Result};
use crate::session::{SessionManager, LOGIN_FAILED_MESSAGE, REGISTRATION_FAILED_MESSAGE};
use crate::types::{Credentials, Registration};
use crate::validation::{validate_login, validate_registration, ValidationErrors};
use tracing::debug;

/// Lifecycle phase of a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPhase {
    /// Fields are being edited; errors reflect the current values.
    Editing,
    /// A submission is in flight.
    Submitting,
    /// Submission succeeded; the host navigates away.
    Succeeded,
    /// Submission failed; editing resumes with a user-visible message.
    Failed { message: String },
}

impl FormPhase {
    pub fn is_submitting(&self) -> bool {
        matches!(self, FormPhase::Submitting)
    }

    pub fn is_succeeded(&self) -> bool {
        matches!(self, FormPhase::Succeeded)
    }
}

/// Login form state.
#[derive(Debug, Clone)]
pub struct LoginForm {
    email: String,
    password: String,
    errors: ValidationErrors,
    phase: FormPhase,
}

impl LoginForm {
    pub fn new() -> Self {
        let mut form = Self {
            email: String::new(),
            password: String::new(),
            errors: ValidationErrors::new(),
            phase: FormPhase::Editing,
        };
        form.revalidate();
        form
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.email = value.into();
        self.phase = FormPhase::Editing;
        self.revalidate();
    }

    pub fn set_password(&mut self, value: impl Into<String>) {
        self.password = value.into();
        self.phase = FormPhase::Editing;
        self.revalidate();
    }

    /// Current field errors. Empty means every field is valid.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn phase(&self) -> &FormPhase {
        &self.phase
    }

    /// The message to show after a failed submission, if any.
    pub fn failure_message(&self) -> Option<&str> {
        match &self.phase {
            FormPhase::Failed { message } => Some(message),
            _ => None,
        }
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        self.errors.is_empty() && !self.phase.is_submitting()
    }

    fn revalidate(&mut self) {
        self.errors = validate_login(&self.email, &self.password);
    }

    /// Submit the form through the session manager.
    ///
    /// Validation is re-run first; a non-empty error map refuses submission
    /// with [`AuthError::Validation`]. On success the fields are cleared and
    /// the phase becomes `Succeeded`.
    pub async fn submit(&mut self, session: &SessionManager) -> Result<()> {
        self.revalidate();
        if !self.errors.is_empty() {
            debug!(errors = %self.errors, "Login submission blocked by validation");
            return Err(AuthError::Validation(self.errors.clone()));
        }

        self.phase = FormPhase::Submitting;
        let credentials = Credentials {
            email: self.email.clone(),
            password: self.password.clone(),
        };

        match session.login(&credentials).await {
            Ok(()) => {
                self.email.clear();
                self.password.clear();
                self.phase = FormPhase::Succeeded;
                Ok(())
            }
            Err(err) => {
                self.phase = FormPhase::Failed {
                    message: LOGIN_FAILED_MESSAGE.to_string(),
                };
                Err(err)
            }
        }
    }
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}

/// Registration form state.
#[derive(Debug, Clone)]
pub struct RegisterForm {
    email: String,
    password: String,
    confirm_password: String,
    errors: ValidationErrors,
    phase: FormPhase,
}

impl RegisterForm {
    pub fn new() -> Self {
        let mut form = Self {
            email: String::new(),
            password: String::new(),
            confirm_password: String::new(),
            errors: ValidationErrors::new(),
            phase: FormPhase::Editing,
        };
        form.revalidate();
        form
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn confirm_password(&self) -> &str {
        &self.confirm_password
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.email = value.into();
        self.phase = FormPhase::Editing;
        self.revalidate();
    }

    pub fn set_password(&mut self, value: impl Into<String>) {
        self.password = value.into();
        self.phase = FormPhase::Editing;
        self.revalidate();
    }

    pub fn set_confirm_password(&mut self, value: impl Into<String>) {
        self.confirm_password = value.into();
        self.phase = FormPhase::Editing;
        self.revalidate();
    }

    /// Current field errors. Empty means every field is valid.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn phase(&self) -> &FormPhase {
        &self.phase
    }

    /// The message to show after a failed submission, if any.
    pub fn failure_message(&self) -> Option<&str> {
        match &self.phase {
            FormPhase::Failed { message } => Some(message),
            _ => None,
        }
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        self.errors.is_empty() && !self.phase.is_submitting()
    }

    fn revalidate(&mut self) {
        self.errors = validate_registration(&self.email, &self.password, &self.confirm_password);
    }

    /// Submit the form through the session manager.
    ///
    /// On success all fields (including the confirmation) are discarded and
    /// the phase becomes `Succeeded`; the host redirects to the login form.
    pub async fn submit(&mut self, session: &SessionManager) -> Result<()> {
        self.revalidate();
        if !self.errors.is_empty() {
            debug!(errors = %self.errors, "Registration submission blocked by validation");
            return Err(AuthError::Validation(self.errors.clone()));
        }

        self.phase = FormPhase::Submitting;
        let registration = Registration {
            email: self.email.clone(),
            password: self.password.clone(),
            confirm_password: self.confirm_password.clone(),
        };

        match session.register(&registration).await {
            Ok(()) => {
                self.email.clear();
                self.password.clear();
                self.confirm_password.clear();
                self.phase = FormPhase::Succeeded;
                Ok(())
            }
            Err(err) => {
                self.phase = FormPhase::Failed {
                    message: REGISTRATION_FAILED_MESSAGE.to_string(),
                };
                Err(err)
            }
        }
    }
}

impl Default for RegisterForm {
    fn default() -> Self {
        Self::new()
    }
}
