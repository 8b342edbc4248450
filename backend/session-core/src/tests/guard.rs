// Unit tests for the route guard paths that resolve without touching the
// network. Refresh-driven navigations are covered by the integration tests.

use crate::api_client::ApiClient;
use crate::router::{GuardDecision, GuardState, Route, RouteGuard};
use crate::session::{SessionService, SessionStore};

use common::RedactedAccessToken;

/// Guard wired to an unroutable backend: any network attempt would fail,
/// which is the point - these paths must not make one.
fn offline_guard(store: SessionStore) -> RouteGuard {
    let api = ApiClient::new("http://127.0.0.1:9", store.clone()).expect("client builds");
    RouteGuard::new(SessionService::new(store, api))
}

#[tokio::test]
async fn given_public_route_when_checked_then_allowed_without_state_change() {
    let guard = offline_guard(SessionStore::new());

    for route in [Route::Landing, Route::Signup, Route::Login, Route::Privacy] {
        assert_eq!(guard.check(route).await, GuardDecision::Allow);
    }

    // Public navigations never enter the checking/resolved machine.
    assert_eq!(guard.state().await, GuardState::Idle);
}

#[tokio::test]
async fn given_authenticated_session_when_protected_route_checked_then_allowed_immediately() {
    let store = SessionStore::new();
    store
        .set_access_token(RedactedAccessToken::new("tok1".to_string()))
        .await;
    let guard = offline_guard(store);

    assert_eq!(guard.check(Route::Dashboard).await, GuardDecision::Allow);
    assert_eq!(
        guard.state().await,
        GuardState::Resolved(GuardDecision::Allow)
    );
}
