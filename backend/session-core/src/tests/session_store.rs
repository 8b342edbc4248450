// Unit tests for the session store
// The invariant under test throughout: a profile is present only while a
// credential is present.

use crate::session::profile::{SubscriptionStatus, UserProfile};
use crate::session::store::SessionStore;

use common::RedactedAccessToken;

fn profile_with_status(status: SubscriptionStatus) -> UserProfile {
    UserProfile {
        id: uuid::Uuid::new_v4(),
        email: "anna@example.com".to_string(),
        full_name: Some("Anna".to_string()),
        auth_provider: "password".to_string(),
        subscription_status: status,
        trial_ends_at: None,
        telegram_chat_id: None,
        is_admin: false,
        gdpr_consent_at: None,
        created_at: "2025-07-01T12:00:00+00:00".to_string(),
    }
}

#[tokio::test]
async fn given_new_store_when_inspected_then_session_is_empty() {
    let store = SessionStore::new();

    assert!(!store.is_authenticated().await);
    assert!(!store.is_subscribed().await);
    assert!(!store.is_loading().await);
    assert!(store.access_token().await.is_none());
    assert!(store.profile().await.is_none());
}

#[tokio::test]
async fn given_token_set_when_inspected_then_authenticated() {
    let store = SessionStore::new();

    store
        .set_access_token(RedactedAccessToken::new("tok1".to_string()))
        .await;

    assert!(store.is_authenticated().await);
    assert_eq!(store.access_token().await.unwrap().as_str(), "tok1");
}

/// **VALUE**: Verifies the store refuses a profile when no credential is
/// held.
///
/// **WHY THIS MATTERS**: The session invariant is "profile present only if
/// credential present". The service normally upholds it, but the store is
/// the last line of defense against any interleaving that would leave a
/// profile behind without its credential.
///
/// **BUG THIS CATCHES**: Would catch the guard clause in `set_profile`
/// being removed.
#[tokio::test]
async fn given_no_credential_when_set_profile_then_profile_is_discarded() {
    let store = SessionStore::new();

    store
        .set_profile(profile_with_status(SubscriptionStatus::Active))
        .await;

    assert!(store.profile().await.is_none());
    assert!(!store.is_subscribed().await);
}

#[tokio::test]
async fn given_credential_and_profile_when_cleared_then_both_are_gone() {
    let store = SessionStore::new();

    store
        .set_access_token(RedactedAccessToken::new("tok1".to_string()))
        .await;
    store
        .set_profile(profile_with_status(SubscriptionStatus::Trialing))
        .await;
    assert!(store.is_authenticated().await);
    assert!(store.is_subscribed().await);

    store.clear().await;

    assert!(!store.is_authenticated().await);
    assert!(!store.is_subscribed().await);
    assert!(store.access_token().await.is_none());
    assert!(store.profile().await.is_none());
}

#[tokio::test]
async fn given_subscription_statuses_when_stored_then_is_subscribed_follows_derivation() {
    for (status, expected) in [
        (SubscriptionStatus::None, false),
        (SubscriptionStatus::Trialing, true),
        (SubscriptionStatus::Active, true),
        (SubscriptionStatus::PastDue, false),
        (SubscriptionStatus::Canceled, false),
    ] {
        let store = SessionStore::new();
        store
            .set_access_token(RedactedAccessToken::new("tok1".to_string()))
            .await;
        store.set_profile(profile_with_status(status)).await;

        assert_eq!(
            store.is_subscribed().await,
            expected,
            "unexpected derivation for {:?}",
            status
        );
    }
}

#[tokio::test]
async fn given_clones_when_one_writes_then_all_observe() {
    let store = SessionStore::new();
    let other = store.clone();

    store
        .set_access_token(RedactedAccessToken::new("tok1".to_string()))
        .await;

    assert!(other.is_authenticated().await);

    other.clear().await;
    assert!(!store.is_authenticated().await);
}

#[tokio::test]
async fn given_loading_toggled_when_snapshot_taken_then_flag_is_visible() {
    let store = SessionStore::new();

    store.set_loading(true).await;
    let snapshot = store.snapshot().await;
    assert!(snapshot.loading);
    assert!(!snapshot.is_authenticated);

    store.set_loading(false).await;
    assert!(!store.snapshot().await.loading);
}
