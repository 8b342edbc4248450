//! Signup input validation.
//!
//! Mirrors the backend's registration rules so obviously invalid
//! submissions fail fast, before any network call. The backend remains
//! authoritative; anything that slips through comes back as a 422.

use crate::error::{SessionError, SignupValidationFailure};

use once_cell::sync::Lazy;
use regex::Regex;

/// Conservative email shape check: something@something.tld, no whitespace.
static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid"));

/// Validation rules for credentials submitted through the signup form.
#[derive(Debug, Clone)]
pub struct CredentialRules {
    /// Minimum password length. The backend rejects anything shorter with
    /// a 422.
    min_password: usize,
    /// Upper bound to catch pasted garbage before it crosses the wire.
    max_password: usize,
}

impl Default for CredentialRules {
    fn default() -> Self {
        Self {
            min_password: 8,
            max_password: 128,
        }
    }
}

impl CredentialRules {
    /// Validate a signup submission.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Validation`] with the specific failure
    /// reason; nothing is sent to the backend in that case.
    #[track_caller]
    pub fn validate_signup(
        &self,
        email: &str,
        password: &str,
        gdpr_consent: bool,
    ) -> Result<(), SessionError> {
        if let Some(reason) = self.check_email(email) {
            return Err(SessionError::validation(reason));
        }

        if let Some(reason) = self.check_password(password) {
            return Err(SessionError::validation(reason));
        }

        if !gdpr_consent {
            return Err(SessionError::validation(
                SignupValidationFailure::ConsentRequired,
            ));
        }

        Ok(())
    }

    fn check_email(&self, email: &str) -> Option<SignupValidationFailure> {
        let trimmed = email.trim();

        if trimmed.is_empty() {
            return Some(SignupValidationFailure::EmptyEmail);
        }

        if !EMAIL_PATTERN.is_match(trimmed) {
            return Some(SignupValidationFailure::InvalidEmail);
        }

        None
    }

    fn check_password(&self, password: &str) -> Option<SignupValidationFailure> {
        if password.len() < self.min_password {
            return Some(SignupValidationFailure::PasswordTooShort {
                min: self.min_password,
                actual: password.len(),
            });
        }

        if password.len() > self.max_password {
            return Some(SignupValidationFailure::PasswordTooLong {
                max: self.max_password,
                actual: password.len(),
            });
        }

        None
    }
}
