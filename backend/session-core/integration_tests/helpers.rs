//! Test helpers for session integration tests.
//!
//! Everything runs against a wiremock backend; these utilities build the
//! store/client/service triple in the documented construction order and
//! provide canonical response bodies.

use serde_json::json;
use wiremock::{Match, MockServer, Request};

use session_core::api_client::ApiClient;
use session_core::router::RouteGuard;
use session_core::session::{SessionService, SessionStore};

pub const TEST_EMAIL: &str = "anna@example.com";
pub const TEST_PASSWORD: &str = "s3cure-pass";

/// Build the DI pair against a mock backend: store first, client over it,
/// service over both.
pub fn session_against(server: &MockServer) -> (SessionStore, SessionService) {
    let store = SessionStore::new();
    let api = ApiClient::new(&server.uri(), store.clone()).expect("client builds");
    let service = SessionService::new(store.clone(), api);
    (store, service)
}

/// Same triple, wrapped in a route guard.
pub fn guard_against(server: &MockServer) -> (SessionStore, RouteGuard) {
    let (store, service) = session_against(server);
    (store, RouteGuard::new(service))
}

/// Canonical `/auth/me` payload with the given subscription status.
pub fn profile_json(status: &str) -> serde_json::Value {
    json!({
        "id": "7f0c0e6a-9a3e-4bb0-8ef6-3c35ea10c3a7",
        "email": TEST_EMAIL,
        "full_name": "Anna",
        "auth_provider": "password",
        "subscription_status": status,
        "trial_ends_at": null,
        "telegram_chat_id": null,
        "is_admin": false,
        "gdpr_consent_at": "2025-07-01T12:00:00+00:00",
        "created_at": "2025-07-01T12:00:00+00:00"
    })
}

/// Token body as the auth endpoints return it.
pub fn token_json(token: &str) -> serde_json::Value {
    json!({ "access_token": token, "token_type": "bearer" })
}

/// Matches only requests that carry no Authorization header at all.
pub struct NoAuthorizationHeader;

impl Match for NoAuthorizationHeader {
    fn matches(&self, request: &Request) -> bool {
        !request.headers.contains_key("authorization")
    }
}
