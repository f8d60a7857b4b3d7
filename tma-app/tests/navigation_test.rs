//! Integration tests for navigation on a mounted [`tma_app::Application`].
//!
//! Covers: the two routes, `/profile/` and unknown paths failing without partial activation,
//! the birthdate submit flow, back/forward, and a non-root base URL.

use std::sync::Arc;

use tma_app::{birthdate_key, build_application, AppConfig, Application, HostDocument, InMemoryDocument, ViewKind};
use tma_core::{RouteError, TmaError};
use tma_telegram::{InitData, LaunchParams, RecordingSink};

const ADA: &str = "user=%7B%22id%22%3A42%2C%22first_name%22%3A%22Ada%22%2C%22last_name%22%3A%22Lovelace%22%7D&auth_date=1662771648&hash=abc";

fn mount(config: &AppConfig, location: &str) -> (Application, Arc<InMemoryDocument>) {
    let document = Arc::new(InMemoryDocument::with_anchor(location));
    let app = build_application(config, document.clone(), Arc::new(RecordingSink::new())).unwrap();
    (app, document)
}

fn ada_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.telegram.launch_params = LaunchParams {
        init_data: Some(InitData::parse(ADA).unwrap()),
        ..LaunchParams::default()
    };
    config
}

/// **Test: `/profile/42` activates ProfileView with user_id 42.**
#[test]
fn test_navigate_to_profile() {
    let (mut app, document) = mount(&AppConfig::default(), "/");

    let rendered = app.navigate("/profile/42").unwrap();
    assert_eq!(rendered.view, "ProfileView");
    assert!(rendered.markup.contains("Profile 42"));
    assert!(rendered.markup.contains("No birthdate saved yet"));

    let route = app.current_route().unwrap();
    assert_eq!(route.component, ViewKind::Profile);
    assert_eq!(route.inputs.get("user_id"), Some("42"));
    assert_eq!(document.location(), "/profile/42");
}

/// **Test: Unknown locations and `/profile/` fail with NotFound; nothing changes.**
///
/// **Setup:** App mounted at `/profile/42`.
/// **Action:** navigate to `/does-not-exist`, then `/profile/`.
/// **Expected:** NotFound each time; view, anchor content, location and history length unchanged.
#[test]
fn test_navigate_not_found_leaves_state() {
    let (mut app, document) = mount(&AppConfig::default(), "/profile/42");
    let before_content = document.content("app");
    let before_rendered = app.rendered().cloned();
    let before_len = app.router().history_len();

    for location in ["/does-not-exist", "/profile/", "/profile/42/extra"] {
        let err = app.navigate(location).unwrap_err();
        assert!(
            matches!(err, TmaError::Route(RouteError::NotFound(_))),
            "{}: {:?}",
            location,
            err
        );
        assert_eq!(document.content("app"), before_content);
        assert_eq!(document.location(), "/profile/42");
        assert_eq!(app.rendered().cloned(), before_rendered);
        assert_eq!(app.router().history_len(), before_len);
        assert_eq!(app.current_route().unwrap().component, ViewKind::Profile);
    }
}

/// **Test: Saving a birthdate opens the user's profile showing it.**
///
/// **Setup:** init data for user 42 (Ada Lovelace).
/// **Action:** `submit_birthdate(10, 12, 1990)`, then back to `/`.
/// **Expected:** store holds 1990-12-10; profile shows "Birthday: 10 December" and ownership; BirthdateView greets Ada.
#[test]
fn test_submit_birthdate_flow() {
    let (mut app, document) = mount(&ada_config(), "/");
    assert!(document.content("app").unwrap().contains("Hello, Ada Lovelace!"));

    let rendered = app.submit_birthdate(10, 12, 1990).unwrap();
    assert!(rendered.markup.contains("Birthday: 10 December"));
    assert!(rendered.markup.contains("This is your profile"));
    assert_eq!(document.location(), "/profile/42");

    let saved: Option<chrono::NaiveDate> = app.store().get(&birthdate_key("42")).unwrap();
    assert_eq!(saved, chrono::NaiveDate::from_ymd_opt(1990, 12, 10));

    let back = app.back().unwrap().unwrap();
    assert_eq!(back.view, "BirthdateView");
    assert_eq!(document.location(), "/");
}

/// **Test: Invalid dates and anonymous submits are rejected without navigating.**
#[test]
fn test_submit_birthdate_rejected() {
    let (mut app, document) = mount(&ada_config(), "/");
    for (day, month, year) in [(31, 2, 1990), (1, 1, 1899), (1, 13, 2000), (1, 1, 9999)] {
        let err = app.submit_birthdate(day, month, year).unwrap_err();
        assert!(matches!(err, TmaError::View(_)), "{:?}", err);
    }
    assert_eq!(document.location(), "/");
    assert!(app.store().is_empty());

    let (mut anonymous, _) = mount(&AppConfig::default(), "/");
    assert!(matches!(
        anonymous.submit_birthdate(1, 1, 2000),
        Err(TmaError::View(_))
    ));
}

/// **Test: back/forward walk history; out of range returns None.**
#[test]
fn test_back_and_forward() {
    let (mut app, document) = mount(&AppConfig::default(), "/");
    app.navigate("/profile/1").unwrap();
    app.navigate("/profile/2").unwrap();

    assert!(app.back().unwrap().unwrap().markup.contains("Profile 1"));
    assert_eq!(document.location(), "/profile/1");
    assert_eq!(app.back().unwrap().unwrap().view, "BirthdateView");
    assert!(app.back().unwrap().is_none());
    assert_eq!(document.location(), "/");

    assert!(app.forward().unwrap().unwrap().markup.contains("Profile 1"));

    // push after back drops the forward entry
    app.navigate("/profile/3").unwrap();
    assert!(app.forward().unwrap().is_none());
    assert_eq!(app.router().history_len(), 3);
}

/// **Test: With base `/tma/`, locations carry the base and hrefs include it.**
#[test]
fn test_navigation_under_base_url() {
    let config = AppConfig {
        base_url: "/tma/".to_string(),
        ..AppConfig::default()
    };
    let (mut app, document) = mount(&config, "/tma/");
    assert_eq!(app.current_route().unwrap().component, ViewKind::Birthdate);
    assert_eq!(document.location(), "/tma/");

    app.navigate("/tma/profile/9").unwrap();
    assert_eq!(document.location(), "/tma/profile/9");
    assert_eq!(app.profile_href("9").unwrap(), "/tma/profile/9");
    assert_eq!(app.current_route().unwrap().path, "/profile/9");
}

/// **Test: Percent-encoded user ids are decoded for the view and encoded in hrefs.**
#[test]
fn test_profile_param_decoding() {
    let (mut app, _) = mount(&AppConfig::default(), "/");
    app.navigate("/profile/a%20b").unwrap();
    assert_eq!(app.current_route().unwrap().inputs.get("user_id"), Some("a b"));
    assert_eq!(app.profile_href("a b").unwrap(), "/profile/a%20b");
}

/// **Test: teardown clears the store.**
#[test]
fn test_teardown_clears_store() {
    let (mut app, _) = mount(&ada_config(), "/");
    app.submit_birthdate(1, 1, 2000).unwrap();
    let store = app.store().clone();
    assert!(!store.is_empty());
    app.teardown();
    assert!(store.is_empty());
}
