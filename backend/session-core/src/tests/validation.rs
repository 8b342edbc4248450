// Unit tests for signup prevalidation

use crate::error::{SessionError, SignupValidationFailure};
use crate::session::validation::CredentialRules;

fn failure_of(result: Result<(), SessionError>) -> SignupValidationFailure {
    match result {
        Err(SessionError::Validation { reason, .. }) => reason,
        other => panic!("Expected validation failure, got {:?}", other),
    }
}

#[test]
fn given_valid_input_when_validated_then_passes() {
    let rules = CredentialRules::default();
    assert!(
        rules
            .validate_signup("anna@example.com", "s3cure-pass", true)
            .is_ok()
    );
}

#[test]
fn given_empty_email_when_validated_then_fails_with_empty_email() {
    let rules = CredentialRules::default();
    let reason = failure_of(rules.validate_signup("   ", "s3cure-pass", true));
    assert_eq!(reason, SignupValidationFailure::EmptyEmail);
}

#[test]
fn given_malformed_email_when_validated_then_fails_with_invalid_email() {
    let rules = CredentialRules::default();

    for email in ["not-an-email", "missing@tld", "two words@example.com"] {
        let reason = failure_of(rules.validate_signup(email, "s3cure-pass", true));
        assert_eq!(
            reason,
            SignupValidationFailure::InvalidEmail,
            "expected rejection for {:?}",
            email
        );
    }
}

/// The backend rejects passwords under 8 chars with a 422; prevalidation
/// reports the same bound with the observed length.
#[test]
fn given_short_password_when_validated_then_reports_minimum() {
    let rules = CredentialRules::default();
    let reason = failure_of(rules.validate_signup("anna@example.com", "seven77", true));
    assert_eq!(
        reason,
        SignupValidationFailure::PasswordTooShort { min: 8, actual: 7 }
    );
}

#[test]
fn given_oversized_password_when_validated_then_reports_maximum() {
    let rules = CredentialRules::default();
    let long = "x".repeat(129);
    let reason = failure_of(rules.validate_signup("anna@example.com", &long, true));
    assert_eq!(
        reason,
        SignupValidationFailure::PasswordTooLong {
            max: 128,
            actual: 129
        }
    );
}

#[test]
fn given_missing_consent_when_validated_then_fails_with_consent_required() {
    let rules = CredentialRules::default();
    let reason = failure_of(rules.validate_signup("anna@example.com", "s3cure-pass", false));
    assert_eq!(reason, SignupValidationFailure::ConsentRequired);
}

#[test]
fn given_email_with_surrounding_whitespace_when_validated_then_passes() {
    let rules = CredentialRules::default();
    assert!(
        rules
            .validate_signup("  anna@example.com  ", "s3cure-pass", true)
            .is_ok()
    );
}
