// Unit tests for the profile module
// Covers the subscription derivation across every status the backend can
// report, and the wire shape of /auth/me.

use crate::session::profile::{SubscriptionStatus, UserProfile};

/// **VALUE**: Verifies `is_subscribed` across all five statuses the backend
/// can report.
///
/// **WHY THIS MATTERS**: Subscriber-only features key off this single
/// boolean. `trialing` must count as subscribed (trial users see matches),
/// `past_due` and `canceled` must not.
///
/// **BUG THIS CATCHES**: Would catch a new status being added to the match
/// arm on the wrong side, or `trialing` being dropped from the subscribed
/// set.
#[test]
fn given_every_status_when_is_subscribed_then_only_trialing_and_active_qualify() {
    assert!(!SubscriptionStatus::None.is_subscribed());
    assert!(SubscriptionStatus::Trialing.is_subscribed());
    assert!(SubscriptionStatus::Active.is_subscribed());
    assert!(!SubscriptionStatus::PastDue.is_subscribed());
    assert!(!SubscriptionStatus::Canceled.is_subscribed());
}

#[test]
fn given_snake_case_wire_names_when_deserialized_then_statuses_map() {
    let parsed: SubscriptionStatus = serde_json::from_str("\"past_due\"").unwrap();
    assert_eq!(parsed, SubscriptionStatus::PastDue);

    let parsed: SubscriptionStatus = serde_json::from_str("\"canceled\"").unwrap();
    assert_eq!(parsed, SubscriptionStatus::Canceled);

    let parsed: SubscriptionStatus = serde_json::from_str("\"none\"").unwrap();
    assert_eq!(parsed, SubscriptionStatus::None);
}

/// Full /auth/me payload as the backend emits it, nullable fields included.
#[test]
fn given_auth_me_payload_when_deserialized_then_profile_fields_map() {
    let payload = serde_json::json!({
        "id": "7f0c0e6a-9a3e-4bb0-8ef6-3c35ea10c3a7",
        "email": "anna@example.com",
        "full_name": null,
        "auth_provider": "password",
        "subscription_status": "trialing",
        "trial_ends_at": "2025-08-01T00:00:00+00:00",
        "telegram_chat_id": null,
        "is_admin": false,
        "gdpr_consent_at": "2025-07-01T12:00:00+00:00",
        "created_at": "2025-07-01T12:00:00+00:00"
    });

    let profile: UserProfile = serde_json::from_value(payload).unwrap();

    assert_eq!(profile.email, "anna@example.com");
    assert_eq!(profile.full_name, None);
    assert_eq!(profile.subscription_status, SubscriptionStatus::Trialing);
    assert!(profile.subscription_status.is_subscribed());
    assert!(!profile.is_admin);
}

#[test]
fn given_missing_status_when_deserialized_then_defaults_to_none() {
    let payload = serde_json::json!({
        "id": "7f0c0e6a-9a3e-4bb0-8ef6-3c35ea10c3a7",
        "email": "anna@example.com",
        "full_name": "Anna",
        "auth_provider": "password",
        "trial_ends_at": null,
        "telegram_chat_id": null,
        "gdpr_consent_at": null,
        "created_at": "2025-07-01T12:00:00+00:00"
    });

    let profile: UserProfile = serde_json::from_value(payload).unwrap();
    assert_eq!(profile.subscription_status, SubscriptionStatus::None);
    assert!(!profile.subscription_status.is_subscribed());
}
