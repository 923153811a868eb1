//! Deep Link Demo
//!
//! Builds the coordinator tree for a first-run user, feeds it a handful of
//! URLs and prints the resulting navigation state.
//!
//! ```text
//! RUST_LOG=debug cargo run --example deep_link_demo
//! ```

use arrhub_navigator::{
    AppCoordinator, Coordinator, DeepLinkConfig, InMemoryPreferences, ServiceContainer,
    TabCoordinator, UserPreferences,
};
use std::sync::Arc;

fn main() {
    env_logger::init();

    let mut container = ServiceContainer::new();
    let preferences: Arc<dyn UserPreferences> = Arc::new(InMemoryPreferences::new());
    container.register_instance(preferences);
    container.register_instance(Arc::new(DeepLinkConfig::new()));

    let mut app = match AppCoordinator::new(&container) {
        Ok(app) => app,
        Err(err) => {
            eprintln!("Cannot build app: {err}");
            return;
        }
    };
    app.start();
    println!("Started in {:?}", app.state());

    // Arrives while onboarding is showing, opened once it finishes
    let handled = app.handle_deep_link("arrhub://dashboard/media/12345/radarr");
    println!("Link during onboarding handled now: {handled}");

    app.update_onboarding(|onboarding| {
        onboarding.show_create_profile();
        onboarding.show_add_service();
        onboarding.complete();
    });
    println!("After onboarding: {:?}", app.state());

    for url in [
        "arrhub://services/add",
        "arrhub://settings/profiles/edit/profile-123",
        "arrhub://invalid/path",
        "arrhub://calendar",
    ] {
        let handled = app.handle_deep_link(url);
        println!("{url:<48} -> {handled}");
    }

    if let Some(tabs) = app.tabs() {
        print_tabs(tabs);
    }
}

fn print_tabs(tabs: &TabCoordinator) {
    println!("Selected tab: {}", tabs.selected_tab());
    if let Some(dashboard) = tabs.dashboard() {
        println!("  dashboard: {:?}", dashboard.navigation_path());
    }
    if let Some(services) = tabs.services() {
        println!("  services:  {:?}", services.navigation_path());
    }
    if let Some(settings) = tabs.settings() {
        println!("  settings:  {:?}", settings.navigation_path());
    }
}
