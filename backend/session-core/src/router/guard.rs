//! Pre-navigation check gating protected views.

use crate::router::Route;
use crate::session::SessionService;

use std::sync::Arc;

use log::{debug, info};
use tokio::sync::RwLock;

/// Decision for a single navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Proceed to the requested view.
    Allow,
    /// Abandon the navigation and go to the login view instead.
    RedirectToLogin,
}

/// Guard progress for the current protected navigation, visible to the UI
/// while a refresh is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// No protected navigation has been checked yet.
    Idle,
    Checking,
    Resolved(GuardDecision),
}

/// Pre-navigation guard over the session service.
///
/// `Clone` shares the underlying state; the same guard instance serves
/// every navigation.
#[derive(Clone)]
pub struct RouteGuard {
    session: SessionService,
    state: Arc<RwLock<GuardState>>,
}

impl RouteGuard {
    pub fn new(session: SessionService) -> Self {
        Self {
            session,
            state: Arc::new(RwLock::new(GuardState::Idle)),
        }
    }

    /// State of the most recent protected navigation.
    pub async fn state(&self) -> GuardState {
        *self.state.read().await
    }

    /// Decide whether navigation to `route` may proceed.
    ///
    /// Public routes pass immediately and do not touch the guard state.
    /// For protected routes an already-authenticated session is allowed
    /// through; otherwise a single refresh attempt decides. No retries
    /// beyond that one refresh.
    pub async fn check(&self, route: Route) -> GuardDecision {
        if !route.requires_auth() {
            return GuardDecision::Allow;
        }

        *self.state.write().await = GuardState::Checking;

        if self.session.store().is_authenticated().await {
            return self.resolve(GuardDecision::Allow).await;
        }

        let outcome = self.session.try_refresh().await;
        debug!("Guard refresh for {}: {:?}", route.path(), outcome);

        if self.session.store().is_authenticated().await {
            self.resolve(GuardDecision::Allow).await
        } else {
            info!("Redirecting {} to {}", route.path(), Route::Login.path());
            self.resolve(GuardDecision::RedirectToLogin).await
        }
    }

    async fn resolve(&self, decision: GuardDecision) -> GuardDecision {
        *self.state.write().await = GuardState::Resolved(decision);
        decision
    }
}
