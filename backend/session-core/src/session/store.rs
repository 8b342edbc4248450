//! Shared session state.
//!
//! The store is the single holder of the bearer credential. Reads go
//! through cloneable handles backed by `Arc<RwLock<T>>`; the credential
//! slot is written only by [`SessionStore::set_access_token`] and
//! [`SessionStore::clear`].

use crate::session::profile::UserProfile;

use common::RedactedAccessToken;

use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct SessionState {
    access_token: Option<RedactedAccessToken>,
    profile: Option<UserProfile>,
    loading: bool,
}

/// Read-only view of the session for UI consumption.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub is_authenticated: bool,
    pub is_subscribed: bool,
    pub loading: bool,
    pub profile: Option<UserProfile>,
}

/// Shared session store.
///
/// # Thread Safety
///
/// This type is `Clone` and can be shared across tasks. All clones share
/// the same underlying state.
#[derive(Clone, Default)]
pub struct SessionStore {
    state: Arc<RwLock<SessionState>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the held credential. No validation is performed; the backend
    /// decides whether the token is any good.
    pub async fn set_access_token(&self, token: RedactedAccessToken) {
        let mut state = self.state.write().await;
        if state.access_token.is_some() {
            debug!("Replacing access token ({} chars)", token.len());
        } else {
            info!("Access token set ({} chars)", token.len());
        }
        state.access_token = Some(token);
    }

    /// Store the fetched profile.
    ///
    /// Refused when no credential is held: a profile must never exist
    /// without the credential it was fetched with.
    pub async fn set_profile(&self, profile: UserProfile) {
        let mut state = self.state.write().await;
        if state.access_token.is_none() {
            warn!("Discarding profile: no credential held");
            return;
        }
        debug!("Profile stored for user {}", profile.id);
        state.profile = Some(profile);
    }

    /// Flag an in-flight login/register call for the UI. Not a concurrency
    /// primitive - duplicate submissions are the caller's problem.
    pub async fn set_loading(&self, loading: bool) {
        self.state.write().await.loading = loading;
    }

    /// Drop credential and profile together, under one write lock.
    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        if state.access_token.is_some() {
            info!("Session cleared");
        } else {
            debug!("Session clear requested but no credential was held");
        }
        state.access_token = None;
        state.profile = None;
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.access_token.is_some()
    }

    pub async fn is_subscribed(&self) -> bool {
        self.state
            .read()
            .await
            .profile
            .as_ref()
            .is_some_and(|p| p.subscription_status.is_subscribed())
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    /// Current credential, if any. Cloned out so the lock is never held
    /// across a network call.
    pub async fn access_token(&self) -> Option<RedactedAccessToken> {
        self.state.read().await.access_token.clone()
    }

    pub async fn profile(&self) -> Option<UserProfile> {
        self.state.read().await.profile.clone()
    }

    /// Consistent view of the whole session under a single read lock.
    pub async fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.read().await;
        SessionSnapshot {
            is_authenticated: state.access_token.is_some(),
            is_subscribed: state
                .profile
                .as_ref()
                .is_some_and(|p| p.subscription_status.is_subscribed()),
            loading: state.loading,
            profile: state.profile.clone(),
        }
    }
}
