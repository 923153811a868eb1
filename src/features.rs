//! Feature coordinators, one per deep-linkable tab.
//!
//! All three share one implementation, [`FeatureCoordinator`], parameterised
//! by the section's route type. Starting one pushes the section root; the
//! `show_*` methods are named shortcuts for [`push`](Coordinator::push).
//!
//! ```
//! use arrhub_navigator::{Coordinator, SettingsCoordinator, SettingsRoute};
//!
//! let mut settings = SettingsCoordinator::new();
//! settings.start();
//! settings.show_edit_profile("profile-123");
//!
//! assert_eq!(settings.navigation_path().len(), 2);
//! assert_eq!(settings.current_route(), Some(&SettingsRoute::edit_profile("profile-123")));
//! ```

use crate::coordinator::{Coordinator, CoordinatorCore, CoordinatorKind};
use crate::deep_link::DeepLinkRoute;
use crate::routes::{DashboardRoute, ServicesRoute, SettingsRoute};
use crate::trace_log;
use std::fmt;

/// Leaf coordinator owning the stack of one tab.
pub struct FeatureCoordinator<R> {
    core: CoordinatorCore<R>,
}

pub type DashboardCoordinator = FeatureCoordinator<DashboardRoute>;
pub type ServicesCoordinator = FeatureCoordinator<ServicesRoute>;
pub type SettingsCoordinator = FeatureCoordinator<SettingsRoute>;

impl<R: DeepLinkRoute> FeatureCoordinator<R> {
    /// Create a coordinator with an empty stack.
    pub fn new() -> Self {
        Self {
            core: CoordinatorCore::new(CoordinatorKind::Feature(R::TAB)),
        }
    }
}

impl<R: DeepLinkRoute> Default for FeatureCoordinator<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: DeepLinkRoute> Coordinator for FeatureCoordinator<R> {
    type Route = R;

    fn core(&self) -> &CoordinatorCore<R> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut CoordinatorCore<R> {
        &mut self.core
    }

    /// Push the section root. Does nothing if the stack is already in use.
    fn start(&mut self) {
        if self.is_at_root() {
            self.push(R::root());
        } else {
            trace_log!("[{}] already started", self.kind());
        }
    }
}

impl<R: fmt::Debug> fmt::Debug for FeatureCoordinator<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeatureCoordinator")
            .field("core", &self.core)
            .finish()
    }
}

// ============================================================================
// Dashboard
// ============================================================================

impl FeatureCoordinator<DashboardRoute> {
    /// Push the detail screen of a service.
    pub fn show_service_detail(&mut self, service_id: impl Into<String>) {
        self.push(DashboardRoute::service_detail(service_id));
    }

    /// Push the detail screen of a media item.
    pub fn show_media_detail(
        &mut self,
        media_id: impl Into<String>,
        service_type: impl Into<String>,
    ) {
        self.push(DashboardRoute::media_detail(media_id, service_type));
    }
}

// ============================================================================
// Services
// ============================================================================

impl FeatureCoordinator<ServicesRoute> {
    /// Push the add-service form.
    pub fn show_add_service(&mut self) {
        self.push(ServicesRoute::AddService);
    }

    /// Push the configuration screen of a service.
    pub fn show_service_configuration(&mut self, service_id: impl Into<String>) {
        self.push(ServicesRoute::service_configuration(service_id));
    }

    /// Push the connection test of a service.
    pub fn show_test_connection(&mut self, service_id: impl Into<String>) {
        self.push(ServicesRoute::test_connection(service_id));
    }
}

// ============================================================================
// Settings
// ============================================================================

impl FeatureCoordinator<SettingsRoute> {
    /// Push the profile list.
    pub fn show_profiles(&mut self) {
        self.push(SettingsRoute::Profiles);
    }

    /// Push the new-profile form.
    pub fn show_add_profile(&mut self) {
        self.push(SettingsRoute::AddProfile);
    }

    /// Push the editor of a profile.
    pub fn show_edit_profile(&mut self, profile_id: impl Into<String>) {
        self.push(SettingsRoute::edit_profile(profile_id));
    }

    /// Push the appearance settings.
    pub fn show_appearance(&mut self) {
        self.push(SettingsRoute::Appearance);
    }

    /// Push the notification settings.
    pub fn show_notifications(&mut self) {
        self.push(SettingsRoute::Notifications);
    }

    /// Push the about screen.
    pub fn show_about(&mut self) {
        self.push(SettingsRoute::About);
    }

    /// Push the log viewer.
    pub fn show_logs(&mut self) {
        self.push(SettingsRoute::Logs);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tab_config::TabRoute;

    #[test]
    fn test_start_pushes_root() {
        let mut dashboard = DashboardCoordinator::new();
        assert!(dashboard.is_at_root());
        dashboard.start();
        assert_eq!(dashboard.navigation_path(), &[DashboardRoute::Home]);

        let mut services = ServicesCoordinator::new();
        services.start();
        assert_eq!(services.navigation_path(), &[ServicesRoute::List]);

        let mut settings = SettingsCoordinator::new();
        settings.start();
        assert_eq!(settings.navigation_path(), &[SettingsRoute::Main]);
    }

    #[test]
    fn test_start_twice_keeps_stack() {
        let mut settings = SettingsCoordinator::new();
        settings.start();
        settings.show_profiles();
        settings.start();
        assert_eq!(
            settings.navigation_path(),
            &[SettingsRoute::Main, SettingsRoute::Profiles]
        );
    }

    #[test]
    fn test_kind_follows_section() {
        assert_eq!(
            ServicesCoordinator::new().kind(),
            CoordinatorKind::Feature(TabRoute::Services)
        );
    }

    #[test]
    fn test_dashboard_navigation() {
        let mut dashboard = DashboardCoordinator::new();
        dashboard.start();
        dashboard.show_service_detail("radarr-1");
        dashboard.show_media_detail("12345", "radarr");

        assert_eq!(
            dashboard.navigation_path(),
            &[
                DashboardRoute::Home,
                DashboardRoute::service_detail("radarr-1"),
                DashboardRoute::media_detail("12345", "radarr"),
            ]
        );

        assert_eq!(
            dashboard.pop(),
            Some(DashboardRoute::media_detail("12345", "radarr"))
        );
        assert_eq!(
            dashboard.current_route(),
            Some(&DashboardRoute::service_detail("radarr-1"))
        );
    }

    #[test]
    fn test_services_navigation() {
        let mut services = ServicesCoordinator::new();
        services.start();
        services.show_add_service();
        services.show_service_configuration("sonarr");
        services.show_test_connection("sonarr");

        assert_eq!(services.navigation_path().len(), 4);
        assert_eq!(
            services.current_route(),
            Some(&ServicesRoute::test_connection("sonarr"))
        );

        services.pop_to_root();
        assert!(services.is_at_root());
    }

    #[test]
    fn test_settings_edit_profile() {
        let mut settings = SettingsCoordinator::new();
        settings.start();
        settings.show_edit_profile("profile-123");

        assert_eq!(settings.navigation_path().len(), 2);
        assert_eq!(
            settings.current_route(),
            Some(&SettingsRoute::edit_profile("profile-123"))
        );
    }

    #[test]
    fn test_settings_all_destinations() {
        let mut settings = SettingsCoordinator::new();
        settings.start();
        settings.show_profiles();
        settings.show_add_profile();
        settings.show_appearance();
        settings.show_notifications();
        settings.show_about();
        settings.show_logs();

        assert_eq!(
            settings.navigation_path(),
            &[
                SettingsRoute::Main,
                SettingsRoute::Profiles,
                SettingsRoute::AddProfile,
                SettingsRoute::Appearance,
                SettingsRoute::Notifications,
                SettingsRoute::About,
                SettingsRoute::Logs,
            ]
        );
    }

    #[test]
    fn test_pop_on_empty_stack() {
        let mut dashboard = DashboardCoordinator::new();
        assert_eq!(dashboard.pop(), None);
        assert!(dashboard.is_at_root());
    }
}
