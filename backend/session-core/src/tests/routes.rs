// Unit tests for the route table

use crate::router::Route;

#[test]
fn given_route_table_when_paths_read_then_they_match_the_views() {
    assert_eq!(Route::Landing.path(), "/");
    assert_eq!(Route::Signup.path(), "/signup");
    assert_eq!(Route::Login.path(), "/login");
    assert_eq!(Route::Dashboard.path(), "/dashboard");
    assert_eq!(Route::Preferences.path(), "/preferences");
    assert_eq!(Route::Privacy.path(), "/privacy");
}

/// **VALUE**: Verifies exactly which views are protected.
///
/// **WHY THIS MATTERS**: The guard consults this flag before every
/// navigation. Flagging the login view would send the guard's own redirect
/// target back through the guard - an infinite loop.
///
/// **BUG THIS CATCHES**: Would catch Login (or any public view) being
/// added to the protected set, or Dashboard/Preferences falling out of it.
#[test]
fn given_route_table_when_flags_read_then_only_dashboard_and_preferences_are_protected() {
    assert!(Route::Dashboard.requires_auth());
    assert!(Route::Preferences.requires_auth());

    assert!(!Route::Landing.requires_auth());
    assert!(!Route::Signup.requires_auth());
    assert!(!Route::Login.requires_auth());
    assert!(!Route::Privacy.requires_auth());
    assert!(!Route::NotFound.requires_auth());
}

#[test]
fn given_known_paths_when_resolved_then_routes_round_trip() {
    for route in Route::ALL {
        assert_eq!(Route::from_path(route.path()), route);
    }
}

#[test]
fn given_unknown_path_when_resolved_then_catch_all_matches() {
    assert_eq!(Route::from_path("/listings/42"), Route::NotFound);
    assert_eq!(Route::from_path(""), Route::NotFound);
    assert_eq!(Route::from_path("/dashboard/"), Route::NotFound);
}
