//! Test utilities for coordinator and deep-link tests
//!
//! Provides fixtures and builders shared by the integration test crates.

#![allow(dead_code)]

use arrhub_navigator::*;
use std::sync::{Arc, RwLock};

/// Services a test app is built from, kept so tests can poke at them.
pub struct TestServices {
    pub container: ServiceContainer,
    pub preferences: Arc<InMemoryPreferences>,
    pub tab_store: Arc<InMemoryTabPreferenceStore>,
    pub tab_configuration: Arc<RwLock<TabConfiguration>>,
}

/// Container with preferences and a tab configuration registered.
pub fn test_services(onboarded: bool, enabled_tab_ids: &[&str]) -> TestServices {
    let preferences = Arc::new(if onboarded {
        InMemoryPreferences::onboarded()
    } else {
        InMemoryPreferences::new()
    });
    let tab_store = Arc::new(InMemoryTabPreferenceStore::new(TabPreferences {
        enabled_tab_ids: enabled_tab_ids.iter().map(|id| id.to_string()).collect(),
        automatic_ordering: false,
    }));
    let tab_configuration = Arc::new(RwLock::new(TabConfiguration::new(tab_store.clone())));

    let mut container = ServiceContainer::new();
    container.register_instance::<dyn UserPreferences>(preferences.clone());
    container.register_instance(tab_configuration.clone());

    TestServices {
        container,
        preferences,
        tab_store,
        tab_configuration,
    }
}

/// Started app over `services`.
pub fn started_app(services: &TestServices) -> AppCoordinator {
    let mut app = AppCoordinator::new(&services.container).unwrap();
    app.start();
    app
}

/// Started tab coordinator with every tab enabled.
pub fn started_tabs() -> TabCoordinator {
    let mut tabs = TabCoordinator::new(TabRoute::ALL);
    tabs.start();
    tabs
}

/// Every route shape of every section, including awkward identifiers.
pub fn all_deep_links() -> Vec<DeepLink> {
    let ids = ["radarr-1", "", "a b", "with/slash", "ünïcødé", "50%", "?#&=", "."];
    let mut links = vec![
        DeepLink::Dashboard(DashboardRoute::Home),
        DeepLink::Services(ServicesRoute::List),
        DeepLink::Services(ServicesRoute::AddService),
        DeepLink::Settings(SettingsRoute::Main),
        DeepLink::Settings(SettingsRoute::Profiles),
        DeepLink::Settings(SettingsRoute::AddProfile),
        DeepLink::Settings(SettingsRoute::Appearance),
        DeepLink::Settings(SettingsRoute::Notifications),
        DeepLink::Settings(SettingsRoute::About),
        DeepLink::Settings(SettingsRoute::Logs),
    ];
    for id in ids {
        links.push(DashboardRoute::service_detail(id).into());
        links.push(DashboardRoute::media_detail(id, id).into());
        links.push(ServicesRoute::service_configuration(id).into());
        links.push(ServicesRoute::test_connection(id).into());
        links.push(SettingsRoute::edit_profile(id).into());
    }
    links
}

/// Depth of every feature stack, in dashboard, services, settings order.
pub fn stack_depths(tabs: &TabCoordinator) -> [usize; 3] {
    [
        tabs.dashboard().map_or(0, |c| c.navigation_path().len()),
        tabs.services().map_or(0, |c| c.navigation_path().len()),
        tabs.settings().map_or(0, |c| c.navigation_path().len()),
    ]
}
