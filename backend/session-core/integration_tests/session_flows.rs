//! Session service flows: login, register, profile collapse, refresh,
//! logout.

use crate::helpers::{TEST_EMAIL, TEST_PASSWORD, profile_json, session_against, token_json};

use common::RedactedAccessToken;
use session_core::error::SessionError;
use session_core::session::RefreshOutcome;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn given_valid_credentials_when_logging_in_then_session_is_established() {
    let server = MockServer::start().await;
    let (store, service) = session_against(&server);

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({
            "email": TEST_EMAIL,
            "password": TEST_PASSWORD,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_json("tok1")))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .and(header("authorization", "Bearer tok1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_json("trialing")))
        .expect(1)
        .mount(&server)
        .await;

    service
        .login(TEST_EMAIL, TEST_PASSWORD)
        .await
        .expect("login succeeds");

    let snapshot = store.snapshot().await;
    assert!(snapshot.is_authenticated);
    assert!(snapshot.is_subscribed);
    assert!(!snapshot.loading);
    assert_eq!(snapshot.profile.unwrap().email, TEST_EMAIL);
}

#[tokio::test]
async fn given_wrong_password_when_logging_in_then_invalid_credentials_and_session_untouched() {
    let server = MockServer::start().await;
    let (store, service) = session_against(&server);

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Invalid email or password"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let result = service.login(TEST_EMAIL, "wrong-password").await;

    assert!(matches!(
        result,
        Err(SessionError::InvalidCredentials { .. })
    ));
    assert!(!store.is_authenticated().await);
    assert!(!store.is_loading().await);
}

#[tokio::test]
async fn given_valid_signup_when_registering_then_only_access_token_is_kept() {
    let server = MockServer::start().await;
    let (store, service) = session_against(&server);

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .and(body_json(json!({
            "email": TEST_EMAIL,
            "password": TEST_PASSWORD,
            "full_name": "Anna",
            "gdpr_consent": true,
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "7f0c0e6a-9a3e-4bb0-8ef6-3c35ea10c3a7",
            "email": TEST_EMAIL,
            "access_token": "tok1",
            // The body echoes the refresh token; the client must rely on
            // the cookie alone and never store this copy.
            "refresh_token": "rt-abc",
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_json("none")))
        .expect(1)
        .mount(&server)
        .await;

    service
        .register(TEST_EMAIL, TEST_PASSWORD, Some("Anna"), true)
        .await
        .expect("registration succeeds");

    assert_eq!(store.access_token().await.unwrap().as_str(), "tok1");
    assert!(store.is_authenticated().await);
    assert!(!store.is_subscribed().await);
}

#[tokio::test]
async fn given_duplicate_email_when_registering_then_backend_detail_is_surfaced() {
    let server = MockServer::start().await;
    let (store, service) = session_against(&server);

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({"detail": "Email already registered"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let result = service
        .register(TEST_EMAIL, TEST_PASSWORD, Some("Anna"), true)
        .await;

    match result {
        Err(SessionError::Rejected {
            status_code,
            detail,
            ..
        }) => {
            assert_eq!(status_code.0, 409);
            assert_eq!(detail, "Email already registered");
        }
        other => panic!("Expected Rejected, got {:?}", other),
    }
    assert!(!store.is_authenticated().await);
}

#[tokio::test]
async fn given_invalid_signup_input_when_registering_then_no_request_is_made() {
    let server = MockServer::start().await;
    let (_store, service) = session_against(&server);

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .named("register must not fire")
        .mount(&server)
        .await;

    let result = service.register(TEST_EMAIL, "short", Some("Anna"), true).await;
    assert!(matches!(result, Err(SessionError::Validation { .. })));

    let result = service.register(TEST_EMAIL, TEST_PASSWORD, None, false).await;
    assert!(matches!(result, Err(SessionError::Validation { .. })));
}

/// **VALUE**: Verifies the session invariant end to end: a failed profile
/// fetch collapses the whole session, credential included.
///
/// **WHY THIS MATTERS**: Without the collapse there is a state where a
/// stale profile exists with no (or a bad) credential behind it, and the
/// UI renders a user that cannot actually do anything.
#[tokio::test]
async fn given_profile_fetch_fails_then_credential_is_cleared_too() {
    let server = MockServer::start().await;
    let (store, service) = session_against(&server);

    store
        .set_access_token(RedactedAccessToken::new("tok1".to_string()))
        .await;

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    // The collapse notifies the backend, best-effort.
    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let result = service.fetch_profile().await;

    assert!(matches!(
        result,
        Err(SessionError::ProfileUnavailable { .. })
    ));
    assert!(!store.is_authenticated().await);
    assert!(store.profile().await.is_none());
}

#[tokio::test]
async fn given_no_credential_when_fetching_profile_then_noop() {
    let server = MockServer::start().await;
    let (store, service) = session_against(&server);

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_json("active")))
        .expect(0)
        .named("me must not fire")
        .mount(&server)
        .await;

    service.fetch_profile().await.expect("no-op succeeds");
    assert!(!store.is_authenticated().await);
}

/// **VALUE**: Verifies refresh failure is non-destructive: no prior
/// credential, rejected refresh, and the session is exactly as before - no
/// exception, no state change.
#[tokio::test]
async fn given_empty_session_when_refresh_rejected_then_nothing_changes() {
    let server = MockServer::start().await;
    let (store, service) = session_against(&server);

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "No refresh token"})))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = service.try_refresh().await;

    assert_eq!(outcome, RefreshOutcome::Rejected);
    assert!(!store.is_authenticated().await);
}

#[tokio::test]
async fn given_existing_credential_when_refresh_rejected_then_credential_survives() {
    let server = MockServer::start().await;
    let (store, service) = session_against(&server);

    store
        .set_access_token(RedactedAccessToken::new("tok1".to_string()))
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = service.try_refresh().await;

    assert_eq!(outcome, RefreshOutcome::Rejected);
    assert_eq!(store.access_token().await.unwrap().as_str(), "tok1");
}

#[tokio::test]
async fn given_refresh_succeeds_but_profile_fails_then_session_collapses() {
    let server = MockServer::start().await;
    let (store, service) = session_against(&server);

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_json("tok1")))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let outcome = service.try_refresh().await;

    assert_eq!(outcome, RefreshOutcome::ProfileUnavailable);
    assert!(!store.is_authenticated().await);
}

#[tokio::test]
async fn given_active_session_when_logging_out_then_state_clears_and_backend_is_notified() {
    let server = MockServer::start().await;
    let (store, service) = session_against(&server);

    store
        .set_access_token(RedactedAccessToken::new("tok1".to_string()))
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    service.logout().await;

    assert!(!store.is_authenticated().await);
    assert!(store.profile().await.is_none());
}

#[tokio::test]
async fn given_logout_notification_fails_then_session_is_still_destroyed() {
    let server = MockServer::start().await;
    let (store, service) = session_against(&server);

    store
        .set_access_token(RedactedAccessToken::new("tok1".to_string()))
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    service.logout().await;

    assert!(!store.is_authenticated().await);
}
