//! The client wrapper's credential attachment and refresh-and-retry
//! protocol, driven against a wiremock backend.

use crate::helpers::{NoAuthorizationHeader, profile_json, session_against, token_json};

use common::RedactedAccessToken;
use session_core::error::ApiError;

use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Verifies the bearer credential is read from the store and
/// attached to an ordinary request.
///
/// **WHY THIS MATTERS**: Every call site is credential-agnostic; if the
/// wrapper stops injecting the header, every authenticated endpoint breaks
/// at once.
#[tokio::test]
async fn given_held_credential_when_request_sent_then_bearer_header_is_attached() {
    let server = MockServer::start().await;
    let (store, service) = session_against(&server);

    store
        .set_access_token(RedactedAccessToken::new("tok1".to_string()))
        .await;

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .and(header("authorization", "Bearer tok1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_json("active")))
        .expect(1)
        .mount(&server)
        .await;

    service.fetch_profile().await.expect("profile fetch succeeds");
    assert!(store.is_subscribed().await);
}

#[tokio::test]
async fn given_no_credential_when_request_sent_then_it_proceeds_bare() {
    let server = MockServer::start().await;
    let (_store, service) = session_against(&server);

    Mock::given(method("GET"))
        .and(path("/listings"))
        .and(NoAuthorizationHeader)
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"items": []})))
        .expect(1)
        .mount(&server)
        .await;

    let response = service.api().get("listings").await.expect("request succeeds");
    assert_eq!(response.status().as_u16(), 200);
}

/// **VALUE**: Verifies retry-once correctness: 401, one refresh, one
/// re-issue with the new credential, and the retried response - not the
/// refresh's - returned to the caller.
///
/// **WHY THIS MATTERS**: This is the whole point of the wrapper. The
/// original caller must see silent recovery, and the store must hold the
/// fresh token afterwards.
///
/// **BUG THIS CATCHES**: Would catch the retry being issued with the stale
/// header, the store not being updated, or the refresh response leaking
/// through to the caller.
#[tokio::test]
async fn given_expired_credential_when_request_401s_then_refreshed_and_retried_once() {
    let server = MockServer::start().await;
    let (store, service) = session_against(&server);

    store
        .set_access_token(RedactedAccessToken::new("tok1".to_string()))
        .await;

    // First attempt with the stale token is rejected...
    Mock::given(method("GET"))
        .and(path("/matches"))
        .and(header("authorization", "Bearer tok1"))
        .respond_with(ResponseTemplate::new(401))
        .up_to_n_times(1)
        .expect(1)
        .named("stale request")
        .mount(&server)
        .await;

    // ...exactly one refresh mints tok2...
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_json("tok2")))
        .expect(1)
        .named("refresh")
        .mount(&server)
        .await;

    // ...and the single retry carries it.
    Mock::given(method("GET"))
        .and(path("/matches"))
        .and(header("authorization", "Bearer tok2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"retried": true})),
        )
        .expect(1)
        .named("retried request")
        .mount(&server)
        .await;

    let response = service.api().get("matches").await.expect("request recovers");

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["retried"], true);
    assert_eq!(store.access_token().await.unwrap().as_str(), "tok2");
}

/// **VALUE**: Verifies the loop guard: a rejected refresh means exactly one
/// refresh attempt, then a hard failure - never a second automatic retry.
///
/// **WHY THIS MATTERS**: This is the single most important correctness
/// property of the component. Without it an expired refresh cookie turns
/// every 401 into an infinite request storm.
#[tokio::test]
async fn given_rejected_refresh_when_request_401s_then_exactly_one_attempt_and_session_expired() {
    let server = MockServer::start().await;
    let (store, service) = session_against(&server);

    store
        .set_access_token(RedactedAccessToken::new("tok1".to_string()))
        .await;

    Mock::given(method("GET"))
        .and(path("/matches"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .named("refresh, rejected")
        .mount(&server)
        .await;

    let expired = service.api().session_expired();
    assert_eq!(*expired.borrow(), 0);

    let result = service.api().get("matches").await;

    assert!(matches!(result, Err(ApiError::SessionExpired { .. })));
    // The host watches this channel to drive the full navigation to login.
    assert_eq!(*expired.borrow(), 1);
}

#[tokio::test]
async fn given_retry_also_401s_then_failure_propagates_without_second_refresh() {
    let server = MockServer::start().await;
    let (store, service) = session_against(&server);

    store
        .set_access_token(RedactedAccessToken::new("tok1".to_string()))
        .await;

    // Both the original and the retried request are rejected.
    Mock::given(method("GET"))
        .and(path("/matches"))
        .respond_with(ResponseTemplate::new(401))
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_json("tok2")))
        .expect(1)
        .named("single refresh")
        .mount(&server)
        .await;

    let response = service.api().get("matches").await.expect("response passes through");

    // The second 401 is the caller's problem; recovery ran at most once.
    assert_eq!(response.status().as_u16(), 401);
    assert_eq!(store.access_token().await.unwrap().as_str(), "tok2");
}

#[tokio::test]
async fn given_non_401_failure_when_request_sent_then_no_refresh_is_attempted() {
    let server = MockServer::start().await;
    let (store, service) = session_against(&server);

    store
        .set_access_token(RedactedAccessToken::new("tok1".to_string()))
        .await;

    Mock::given(method("GET"))
        .and(path("/matches"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_json("tok2")))
        .expect(0)
        .named("refresh must not fire")
        .mount(&server)
        .await;

    let response = service.api().get("matches").await.expect("passes through");
    assert_eq!(response.status().as_u16(), 503);
    assert_eq!(store.access_token().await.unwrap().as_str(), "tok1");
}

/// The refresh cookie set at login must travel with the refresh call: the
/// transport carries the ambient credential automatically.
#[tokio::test]
async fn given_cookie_from_login_when_refreshing_then_cookie_is_presented() {
    let server = MockServer::start().await;
    let (store, service) = session_against(&server);

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(token_json("tok1"))
                .insert_header("set-cookie", "refresh_token=rt-abc; HttpOnly; Path=/"),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_json("active")))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .and(header("cookie", "refresh_token=rt-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_json("tok2")))
        .expect(1)
        .named("cookie-bearing refresh")
        .mount(&server)
        .await;

    service
        .login(crate::helpers::TEST_EMAIL, crate::helpers::TEST_PASSWORD)
        .await
        .expect("login succeeds");

    let outcome = service.try_refresh().await;
    assert!(outcome.is_refreshed());
    assert_eq!(store.access_token().await.unwrap().as_str(), "tok2");
}
