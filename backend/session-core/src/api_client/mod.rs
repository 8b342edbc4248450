//! HTTP client wrapper: credential attachment and expiry recovery.
//!
//! Every call site stays credential-agnostic. The wrapper reads the current
//! bearer token from the [`SessionStore`] on each outgoing request, and a
//! 401 answer triggers exactly one refresh-and-retry cycle before the
//! failure is surfaced. The refresh call itself goes straight through the
//! underlying transport, so it can never re-enter the recovery path.

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::session::SessionStore;

use common::{HttpStatusCode, RedactedAccessToken};

use std::time::Duration;

use log::{debug, info, warn};
use reqwest::{Client, Method, Response};
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::watch;
use url::Url;

const DEFAULT_TIMEOUT_DURATION: Duration = Duration::from_secs(30);

const AUTH_REFRESH_ENDPOINT: &str = "auth/refresh";

/// Successful token response from the auth endpoints.
///
/// Register's 201 body also echoes the refresh token; it is deliberately
/// not deserialized here - the refresh credential lives only in the
/// backend-set HTTP-only cookie.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
}

/// The shared HTTP client wrapper.
///
/// `Clone` is cheap: all clones share the underlying connection pool, the
/// cookie store carrying the refresh credential, and the expiry channel.
///
/// Construction order is explicit - build the [`SessionStore`] first, then
/// this client over it. There is no lazy cross-reference.
#[derive(Clone)]
pub struct ApiClient {
    base_url: Url,
    http: Client,
    store: SessionStore,
    expired_tx: watch::Sender<u64>,
    expired_rx: watch::Receiver<u64>,
}

impl ApiClient {
    /// Build a client against `base_url`, reading credentials from `store`.
    pub fn new(base_url: &str, store: SessionStore) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, store, DEFAULT_TIMEOUT_DURATION)
    }

    /// Build a client from a loaded [`AppConfig`].
    pub fn from_config(config: &AppConfig, store: SessionStore) -> Result<Self, ApiError> {
        Self::with_timeout(
            &config.api.base_url,
            store,
            Duration::from_secs(config.api.timeout_secs),
        )
    }

    fn with_timeout(
        base_url: &str,
        store: SessionStore,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)?;

        // The cookie store carries the backend-held refresh credential
        // across login/register/refresh automatically.
        let http = Client::builder()
            .timeout(timeout)
            .cookie_store(true)
            .build()?;

        let (expired_tx, expired_rx) = watch::channel(0u64);

        Ok(Self {
            base_url,
            http,
            store,
            expired_tx,
            expired_rx,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Subscribe to unrecoverable-expiry notifications.
    ///
    /// The value increments each time a refresh is rejected during
    /// recovery. The in-memory client state may be inconsistent at that
    /// point, so the host application should respond with a full
    /// navigation to the login view, not a client-side route transition.
    pub fn session_expired(&self) -> watch::Receiver<u64> {
        self.expired_rx.clone()
    }

    /// GET with credential attachment and expiry recovery.
    pub async fn get(&self, path: &str) -> Result<Response, ApiError> {
        self.execute(Method::GET, path, None).await
    }

    /// POST with credential attachment and expiry recovery.
    pub async fn post(&self, path: &str, body: &Value) -> Result<Response, ApiError> {
        self.execute(Method::POST, path, Some(body)).await
    }

    /// Issue a request, recovering once from credential expiry.
    ///
    /// Non-401 responses are returned unchanged. A 401 triggers a single
    /// refresh; the original request is then re-issued once with the fresh
    /// credential and that response is returned whatever its status. A
    /// second 401 propagates to the caller - never another refresh.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Response, ApiError> {
        let url = self.base_url.join(path)?;

        let token = self.store.access_token().await;
        let response = self
            .send(method.clone(), url.clone(), body, token.as_ref())
            .await?;

        if !HttpStatusCode::from(response.status().as_u16()).is_unauthorized() {
            return Ok(response);
        }

        debug!("{} {} answered 401, attempting credential refresh", method, url);

        let fresh = match self.refresh_access_token().await {
            Ok(token) => token,
            Err(e) => {
                warn!(
                    "Credential refresh rejected ({}), session is unrecoverable",
                    e.error_category()
                );
                self.expired_tx.send_modify(|n| *n += 1);
                return Err(ApiError::session_expired());
            }
        };

        self.store.set_access_token(fresh.clone()).await;

        // One retry with the patched credential; whatever comes back is final.
        self.send(method, url, body, Some(&fresh)).await
    }

    /// Single-attempt request without expiry recovery.
    ///
    /// The auth endpoints themselves go through here: a 401 from login
    /// means bad credentials, and recovering during logout would hand a
    /// fresh credential to a store that was just cleared on purpose.
    pub(crate) async fn execute_once(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Response, ApiError> {
        let url = self.base_url.join(path)?;
        let token = self.store.access_token().await;
        self.send(method, url, body, token.as_ref()).await
    }

    /// Request a fresh access token using the ambient refresh cookie.
    ///
    /// Concurrent 401s each run their own refresh - attempts are not
    /// deduplicated, matching the at-most-once-per-failing-request
    /// guarantee without cross-request coordination.
    pub(crate) async fn refresh_access_token(&self) -> Result<RedactedAccessToken, ApiError> {
        let url = self.base_url.join(AUTH_REFRESH_ENDPOINT)?;
        let response = self.http.post(url).send().await?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let token: TokenResponse = response.json().await?;
        info!("Access token refreshed");
        Ok(RedactedAccessToken::new(token.access_token))
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<&Value>,
        token: Option<&RedactedAccessToken>,
    ) -> Result<Response, ApiError> {
        let mut request = self.http.request(method, url);

        if let Some(token) = token {
            request = request.bearer_auth(token.as_str());
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        Ok(request.send().await?)
    }
}

/// Convert a non-2xx response into [`ApiError::Status`], extracting the
/// backend's `{"detail": …}` message when present.
pub(crate) async fn status_error(response: Response) -> ApiError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();

    let detail = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| v.get("detail").and_then(Value::as_str).map(str::to_owned))
        .unwrap_or(body);

    ApiError::from_http_response(status, detail)
}

/// Deserialize a JSON body, converting non-2xx answers into
/// [`ApiError::Status`] first.
pub(crate) async fn parse_json<T: serde::de::DeserializeOwned>(
    response: Response,
) -> Result<T, ApiError> {
    if !response.status().is_success() {
        return Err(status_error(response).await);
    }

    Ok(response.json().await?)
}
