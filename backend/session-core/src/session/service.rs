//! Session-mutating operations: login, register, refresh, profile, logout.
//!
//! The service owns no state of its own - it drives the [`SessionStore`]
//! through the [`ApiClient`] and reports every outcome explicitly, so
//! callers can tell "recovered transparently" from "failed".

use crate::api_client::{ApiClient, TokenResponse, parse_json, status_error};
use crate::error::{ApiError, SessionError};
use crate::session::profile::UserProfile;
use crate::session::store::SessionStore;
use crate::session::validation::CredentialRules;

use common::{HttpStatusCode, RedactedAccessToken};

use log::{debug, info, warn};
use reqwest::Method;
use serde_json::json;

const AUTH_LOGIN_ENDPOINT: &str = "auth/login";
const AUTH_REGISTER_ENDPOINT: &str = "auth/register";
const AUTH_ME_ENDPOINT: &str = "auth/me";
const AUTH_LOGOUT_ENDPOINT: &str = "auth/logout";

/// Outcome of a [`SessionService::try_refresh`] attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// A fresh credential was obtained and the profile loaded.
    Refreshed,
    /// The backend rejected the refresh; prior session state is untouched.
    Rejected,
    /// A credential was minted but the profile fetch failed; the session
    /// has been cleared.
    ProfileUnavailable,
}

impl RefreshOutcome {
    pub fn is_refreshed(&self) -> bool {
        matches!(self, RefreshOutcome::Refreshed)
    }
}

/// Session operations over the store/client pair.
///
/// Construction order is explicit: build the [`SessionStore`] first, the
/// [`ApiClient`] over it, then this service over both. The same pair is
/// handed to the route guard.
#[derive(Clone)]
pub struct SessionService {
    store: SessionStore,
    api: ApiClient,
    rules: CredentialRules,
}

impl SessionService {
    pub fn new(store: SessionStore, api: ApiClient) -> Self {
        Self {
            store,
            api,
            rules: CredentialRules::default(),
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Exchange credentials for a session.
    ///
    /// Sets the loading flag for the duration of the call. A 401 maps to
    /// [`SessionError::InvalidCredentials`]; other rejections keep the
    /// backend's status and detail for display. The session is untouched
    /// on any failure of the login call itself.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), SessionError> {
        self.store.set_loading(true).await;
        let result = self.login_inner(email, password).await;
        self.store.set_loading(false).await;
        result
    }

    async fn login_inner(&self, email: &str, password: &str) -> Result<(), SessionError> {
        let body = json!({ "email": email, "password": password });
        let response = self
            .api
            .execute_once(Method::POST, AUTH_LOGIN_ENDPOINT, Some(&body))
            .await?;

        if HttpStatusCode::from(response.status().as_u16()).is_unauthorized() {
            debug!("Login rejected");
            return Err(SessionError::invalid_credentials());
        }

        if !response.status().is_success() {
            return Err(SessionError::from_rejection(status_error(response).await));
        }

        let token: TokenResponse = parse_json(response).await?;
        self.store
            .set_access_token(RedactedAccessToken::new(token.access_token))
            .await;
        info!("Logged in");

        self.fetch_profile().await
    }

    /// Create an account and establish a session.
    ///
    /// Input is prevalidated client-side (email shape, password length,
    /// GDPR consent); backend rejections (409 duplicate, 422 validation)
    /// come back as [`SessionError::Rejected`] with the backend's detail.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        full_name: Option<&str>,
        gdpr_consent: bool,
    ) -> Result<(), SessionError> {
        self.rules.validate_signup(email, password, gdpr_consent)?;

        self.store.set_loading(true).await;
        let result = self
            .register_inner(email, password, full_name, gdpr_consent)
            .await;
        self.store.set_loading(false).await;
        result
    }

    async fn register_inner(
        &self,
        email: &str,
        password: &str,
        full_name: Option<&str>,
        gdpr_consent: bool,
    ) -> Result<(), SessionError> {
        let body = json!({
            "email": email,
            "password": password,
            "full_name": full_name,
            "gdpr_consent": gdpr_consent,
        });
        let response = self
            .api
            .execute_once(Method::POST, AUTH_REGISTER_ENDPOINT, Some(&body))
            .await?;

        if !response.status().is_success() {
            return Err(SessionError::from_rejection(status_error(response).await));
        }

        let token: TokenResponse = parse_json(response).await?;
        self.store
            .set_access_token(RedactedAccessToken::new(token.access_token))
            .await;
        info!("Account registered");

        self.fetch_profile().await
    }

    /// Fetch the authenticated profile; a no-op without a credential.
    ///
    /// Any failure here is fatal to the session: a profile must never
    /// outlive a bad credential, so the store is cleared (and the backend
    /// notified) before the error is returned.
    pub async fn fetch_profile(&self) -> Result<(), SessionError> {
        if !self.store.is_authenticated().await {
            debug!("Profile fetch skipped: no credential held");
            return Ok(());
        }

        match self.profile_request().await {
            Ok(profile) => {
                self.store.set_profile(profile).await;
                Ok(())
            }
            Err(e) => {
                warn!(
                    "Profile fetch failed ({}), clearing session",
                    e.error_category()
                );
                let message = e.to_string();
                self.logout().await;
                Err(SessionError::profile_unavailable(message))
            }
        }
    }

    async fn profile_request(&self) -> Result<UserProfile, ApiError> {
        let response = self.api.get(AUTH_ME_ENDPOINT).await?;
        parse_json(response).await
    }

    /// Attempt to re-establish the session from the backend-held refresh
    /// credential.
    ///
    /// Exactly one attempt. A rejected refresh leaves the session exactly
    /// as it was - in particular it never clears an existing credential.
    pub async fn try_refresh(&self) -> RefreshOutcome {
        let token = match self.api.refresh_access_token().await {
            Ok(token) => token,
            Err(e) => {
                debug!("Refresh rejected ({})", e.error_category());
                return RefreshOutcome::Rejected;
            }
        };

        self.store.set_access_token(token).await;

        match self.fetch_profile().await {
            Ok(()) => RefreshOutcome::Refreshed,
            Err(_) => RefreshOutcome::ProfileUnavailable,
        }
    }

    /// Destroy the session.
    ///
    /// The store is cleared before any network activity; the backend
    /// notification is best-effort and its outcome is ignored. It bypasses
    /// expiry recovery - refreshing after an intentional logout would hand
    /// the cleared store a fresh credential.
    pub async fn logout(&self) {
        self.store.clear().await;

        match self
            .api
            .execute_once(Method::POST, AUTH_LOGOUT_ENDPOINT, None)
            .await
        {
            Ok(response) => debug!(
                "Logout notification answered HTTP {}",
                response.status().as_u16()
            ),
            Err(e) => debug!("Logout notification failed: {}", e),
        }
    }
}
