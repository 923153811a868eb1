//! End-to-end tests of the coordinator tree: onboarding gate, flow
//! transitions, tab configuration and deferred deep links

mod common;

use arrhub_navigator::*;
use common::{started_app, test_services};
use rstest::{fixture, rstest};

const ALL_TABS: &[&str] = &["dashboard", "calendar", "search", "services", "settings"];

#[fixture]
fn new_user() -> common::TestServices {
    test_services(false, ALL_TABS)
}

#[fixture]
fn returning_user() -> common::TestServices {
    test_services(true, ALL_TABS)
}

#[rstest]
fn test_onboarding_gate_for_new_user(new_user: common::TestServices) {
    let app = started_app(&new_user);

    assert_eq!(app.navigation_path(), &[AppRoute::Onboarding]);
    assert_eq!(app.child_coordinators().len(), 1);
    let child = &app.child_coordinators()[0];
    assert_eq!(child.kind(), CoordinatorKind::Onboarding);
    assert!(child.as_onboarding().is_some());
    assert_eq!(child.parent(), Some(app.id()));
}

#[rstest]
fn test_onboarding_gate_for_returning_user(returning_user: common::TestServices) {
    let app = started_app(&returning_user);

    assert_eq!(app.navigation_path(), &[AppRoute::Main]);
    assert_eq!(app.child_coordinators().len(), 1);
    assert_eq!(app.child_coordinators()[0].kind(), CoordinatorKind::Tab);
}

#[rstest]
fn test_full_onboarding_then_navigation(new_user: common::TestServices) {
    let mut app = started_app(&new_user);

    app.update_onboarding(|onboarding| {
        onboarding.show_create_profile();
        onboarding.show_add_service();
        onboarding.show_completion();
        onboarding.complete();
    });

    assert!(new_user.preferences.onboarding_completed());
    assert_eq!(app.state(), AppState::Main);
    assert!(app.onboarding().is_none());

    app.update_tabs(|tabs| {
        tabs.select(TabRoute::Settings);
        tabs.settings_mut().unwrap().show_edit_profile("profile-123");
    });
    let settings = app.tabs().unwrap().settings().unwrap();
    assert_eq!(settings.navigation_path().len(), 2);
    assert_eq!(
        settings.current_route(),
        Some(&SettingsRoute::edit_profile("profile-123"))
    );
}

#[rstest]
fn test_restart_after_onboarding_goes_to_main(new_user: common::TestServices) {
    let mut app = started_app(&new_user);
    assert!(app.skip_onboarding());

    let relaunched = started_app(&new_user);
    assert_eq!(relaunched.state(), AppState::Main);
}

#[rstest]
fn test_deferred_link_replayed_once(new_user: common::TestServices) {
    let mut app = started_app(&new_user);

    assert!(!app.handle_deep_link("arrhub://dashboard/service/radarr-1"));
    assert!(!app.handle_deep_link("arrhub://services/test/sonarr"));
    assert_eq!(app.pending_deep_link(), Some("arrhub://services/test/sonarr"));

    assert!(app.complete_onboarding());
    let tabs = app.tabs().unwrap();
    assert_eq!(tabs.selected_tab(), TabRoute::Services);
    assert_eq!(tabs.dashboard().unwrap().navigation_path(), &[DashboardRoute::Home]);
    assert_eq!(
        tabs.services().unwrap().navigation_path(),
        &[ServicesRoute::List, ServicesRoute::test_connection("sonarr")]
    );

    app.reset_onboarding();
    assert!(app.skip_onboarding());
    assert_eq!(
        app.tabs().unwrap().services().unwrap().navigation_path(),
        &[ServicesRoute::List]
    );
}

#[test]
fn test_disabled_tabs_have_no_coordinator() {
    let services = test_services(true, &["dashboard", "calendar", "settings"]);
    let mut app = started_app(&services);

    let tabs = app.tabs().unwrap();
    assert_eq!(
        tabs.enabled_tabs(),
        &[TabRoute::Dashboard, TabRoute::Calendar, TabRoute::Settings]
    );
    assert_eq!(tabs.child_coordinators().len(), 2);
    assert!(!app.handle_deep_link("arrhub://services/add"));
}

#[test]
fn test_reload_tabs_applies_stored_changes() {
    let services = test_services(true, ALL_TABS);
    let mut app = started_app(&services);
    app.update_tabs(|tabs| tabs.select(TabRoute::Services));

    services.tab_store.save(&TabPreferences {
        enabled_tab_ids: vec!["settings".into(), "dashboard".into()],
        automatic_ordering: false,
    });
    assert!(app.reload_tabs());

    let tabs = app.tabs().unwrap();
    assert_eq!(tabs.enabled_tabs(), &[TabRoute::Settings, TabRoute::Dashboard]);
    assert!(tabs.services().is_none());
    assert_eq!(tabs.selected_tab(), TabRoute::Dashboard);
    assert_eq!(
        services.tab_configuration.read().unwrap().ordered_tab_ids(),
        vec!["settings", "dashboard"]
    );
}

#[test]
fn test_automatic_ordering_drives_tab_order() {
    let services = test_services(true, ALL_TABS);
    services
        .tab_configuration
        .write()
        .unwrap()
        .set_automatic_ordering(true);
    let app = started_app(&services);

    assert_eq!(
        app.tabs().unwrap().enabled_tabs(),
        &[
            TabRoute::Calendar,
            TabRoute::Dashboard,
            TabRoute::Search,
            TabRoute::Services,
            TabRoute::Settings,
        ]
    );
}

#[test]
fn test_required_tab_cannot_be_disabled() {
    let services = test_services(true, ALL_TABS);
    let mut configuration = services.tab_configuration.write().unwrap();

    assert!(!configuration.toggle_tab_enabled("dashboard"));
    assert!(configuration.is_enabled(TabRoute::Dashboard));
    assert!(configuration.toggle_tab_enabled("search"));
    assert!(!configuration.is_enabled(TabRoute::Search));
    assert!(!services.tab_store.load().enabled_tab_ids.contains(&"search".to_string()));
}
