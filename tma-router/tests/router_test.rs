//! Integration tests for [`tma_router::Router`].
//!
//! Covers: resolution of every declared route, parameter forwarding, the `/profile/` boundary,
//! not-found leaving state untouched, base-prefixed history, back/forward, and href building.

use tma_core::RouteError;
use tma_router::{RouteDescriptor, RouteParams, RouteTable, Router};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
    Birthdate,
    Profile,
}

fn create_router(base: &str) -> Router<Page> {
    let table = RouteTable::new(vec![
        RouteDescriptor::new("/", "BirthdateView", Page::Birthdate).unwrap(),
        RouteDescriptor::new("/profile/:user_id", "ProfileView", Page::Profile)
            .unwrap()
            .with_props(true),
    ])
    .unwrap();
    Router::new(table, base)
}

/// **Test: Every declared path activates exactly its bound component.**
#[test]
fn test_each_route_activates_bound_component() {
    let router = create_router("/");
    for (path, page, name) in [
        ("/", Page::Birthdate, "BirthdateView"),
        ("/profile/1", Page::Profile, "ProfileView"),
    ] {
        let resolved = router.resolve(path).unwrap();
        assert_eq!(resolved.component, page);
        assert_eq!(resolved.name, name);
    }
}

/// **Test: `/profile/42` forwards `user_id = "42"`; `/` forwards nothing.**
#[test]
fn test_profile_forwards_user_id() {
    let router = create_router("/");
    let profile = router.resolve("/profile/42").unwrap();
    assert_eq!(profile.inputs.get("user_id"), Some("42"));
    assert_eq!(profile.inputs.len(), 1);

    let root = router.resolve("/").unwrap();
    assert!(root.inputs.is_empty());
}

/// **Test: `/profile/` has no user segment and resolves to nothing.**
#[test]
fn test_profile_without_segment_is_not_found() {
    let router = create_router("/");
    assert_eq!(
        router.resolve("/profile/").unwrap_err(),
        RouteError::NotFound("/profile/".to_string())
    );
}

/// **Test: Unknown path is rejected once and nothing is activated.**
///
/// **Setup:** Router already on `/`.
/// **Action:** `push("/does-not-exist")`.
/// **Expected:** NotFound; current route, location and history length unchanged.
#[test]
fn test_not_found_leaves_state_untouched() {
    let mut router = create_router("/");
    router.push("/").unwrap();

    let err = router.push("/does-not-exist").unwrap_err();
    assert_eq!(err, RouteError::NotFound("/does-not-exist".to_string()));
    assert_eq!(router.current().unwrap().name, "BirthdateView");
    assert_eq!(router.current_location(), Some("/"));
    assert_eq!(router.history_len(), 1);
}

/// **Test: Base is stripped from host locations and applied to history entries.**
#[test]
fn test_base_prefix_round_trip() {
    let mut router = create_router("/tma/");
    let resolved = router.push("/tma/profile/7").unwrap();
    assert_eq!(resolved.path, "/profile/7");
    assert_eq!(router.current_location(), Some("/tma/profile/7"));

    let mut params = RouteParams::new();
    params.insert("user_id".to_string(), "7".to_string());
    assert_eq!(router.href("ProfileView", &params).unwrap(), "/tma/profile/7");
    assert_eq!(router.href("BirthdateView", &params).unwrap(), "/tma/");
}

/// **Test: back/forward re-activate previous entries; out of range is Ok(None).**
#[test]
fn test_back_and_forward() {
    let mut router = create_router("/");
    router.push("/").unwrap();
    router.push("/profile/5").unwrap();

    assert_eq!(router.back().unwrap().unwrap().name, "BirthdateView");
    assert!(router.back().unwrap().is_none());
    assert_eq!(router.forward().unwrap().unwrap().inputs.get("user_id"), Some("5"));
    assert!(router.forward().unwrap().is_none());
}

/// **Test: replace swaps the current entry without growing history.**
#[test]
fn test_replace_keeps_history_length() {
    let mut router = create_router("/");
    router.push("/").unwrap();
    router.replace("/profile/9").unwrap();
    assert_eq!(router.history_len(), 1);
    assert_eq!(router.current_location(), Some("/profile/9"));
}

/// **Test: Two independently built routers resolve identically.**
#[test]
fn test_construction_is_idempotent() {
    let a = create_router("/");
    let b = create_router("/");
    for path in ["/", "/profile/42", "/profile/", "/x"] {
        assert_eq!(a.resolve(path), b.resolve(path));
    }
}
