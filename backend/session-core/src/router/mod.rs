//! Route table for the rentwatch views.
//!
//! Only what the guard consumes lives here: the path of each view and
//! whether entering it requires an authenticated session. Rendering is the
//! host application's concern.

pub mod guard;

pub use guard::{GuardDecision, GuardState, RouteGuard};

/// Application views, public and protected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Landing,
    Signup,
    Login,
    Dashboard,
    Preferences,
    Privacy,
    NotFound,
}

impl Route {
    /// All addressable routes, in matching order.
    pub const ALL: [Route; 7] = [
        Route::Landing,
        Route::Signup,
        Route::Login,
        Route::Dashboard,
        Route::Preferences,
        Route::Privacy,
        Route::NotFound,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::Signup => "/signup",
            Route::Login => "/login",
            Route::Dashboard => "/dashboard",
            Route::Preferences => "/preferences",
            Route::Privacy => "/privacy",
            Route::NotFound => "/404",
        }
    }

    /// Does entering this view require an authenticated session?
    ///
    /// The login view is never flagged - the guard must not loop back into
    /// itself when it redirects there.
    pub fn requires_auth(&self) -> bool {
        matches!(self, Route::Dashboard | Route::Preferences)
    }

    /// Resolve a path to a route; anything unknown is the catch-all.
    pub fn from_path(path: &str) -> Route {
        Route::ALL
            .into_iter()
            .find(|route| route.path() == path)
            .unwrap_or(Route::NotFound)
    }
}
