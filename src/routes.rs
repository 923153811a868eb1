//! Route values for every coordinator.
//!
//! Each section has a closed set of screens. Routes compare structurally, so
//! two `EditProfile` routes are equal exactly when their profile ids are.
//!
//! | Section   | Path                     | Route                            |
//! |-----------|--------------------------|----------------------------------|
//! | dashboard | *(empty)*                | [`DashboardRoute::Home`]         |
//! | dashboard | `/service/{id}`          | [`DashboardRoute::ServiceDetail`]|
//! | dashboard | `/media/{id}/{type}`     | [`DashboardRoute::MediaDetail`]  |
//! | services  | *(empty)*                | [`ServicesRoute::List`]          |
//! | services  | `/add`                   | [`ServicesRoute::AddService`]    |
//! | services  | `/configure/{id}`        | [`ServicesRoute::ServiceConfiguration`] |
//! | services  | `/test/{id}`             | [`ServicesRoute::TestConnection`]|
//! | settings  | *(empty)*                | [`SettingsRoute::Main`]          |
//! | settings  | `/profiles`              | [`SettingsRoute::Profiles`]      |
//! | settings  | `/profiles/add`          | [`SettingsRoute::AddProfile`]    |
//! | settings  | `/profiles/edit/{id}`    | [`SettingsRoute::EditProfile`]   |
//! | settings  | `/appearance`            | [`SettingsRoute::Appearance`]    |
//! | settings  | `/notifications`         | [`SettingsRoute::Notifications`] |
//! | settings  | `/about`                 | [`SettingsRoute::About`]         |
//! | settings  | `/logs`                  | [`SettingsRoute::Logs`]          |
//!
//! [`AppRoute`] and [`OnboardingRoute`] are not reachable by deep link.

use crate::deep_link::DeepLinkRoute;
use crate::tab_config::TabRoute;

// ============================================================================
// Dashboard
// ============================================================================

/// Screens of the dashboard tab.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DashboardRoute {
    Home,
    ServiceDetail {
        service_id: String,
    },
    MediaDetail {
        media_id: String,
        service_type: String,
    },
}

impl DashboardRoute {
    /// Create a service detail route
    pub fn service_detail(service_id: impl Into<String>) -> Self {
        Self::ServiceDetail {
            service_id: service_id.into(),
        }
    }

    /// Create a media detail route
    pub fn media_detail(media_id: impl Into<String>, service_type: impl Into<String>) -> Self {
        Self::MediaDetail {
            media_id: media_id.into(),
            service_type: service_type.into(),
        }
    }
}

impl DeepLinkRoute for DashboardRoute {
    const TAB: TabRoute = TabRoute::Dashboard;

    fn root() -> Self {
        Self::Home
    }

    fn from_segments(segments: &[&str]) -> Option<Self> {
        match segments {
            [] => Some(Self::Home),
            ["service", id] => Some(Self::service_detail(*id)),
            ["media", id, kind] => Some(Self::media_detail(*id, *kind)),
            _ => None,
        }
    }

    fn segments(&self) -> Vec<&str> {
        match self {
            Self::Home => vec![],
            Self::ServiceDetail { service_id } => vec!["service", service_id.as_str()],
            Self::MediaDetail {
                media_id,
                service_type,
            } => vec!["media", media_id.as_str(), service_type.as_str()],
        }
    }
}

// ============================================================================
// Services
// ============================================================================

/// Screens of the services tab.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ServicesRoute {
    List,
    AddService,
    ServiceConfiguration { service_id: String },
    TestConnection { service_id: String },
}

impl ServicesRoute {
    /// Create a service configuration route
    pub fn service_configuration(service_id: impl Into<String>) -> Self {
        Self::ServiceConfiguration {
            service_id: service_id.into(),
        }
    }

    /// Create a connection test route
    pub fn test_connection(service_id: impl Into<String>) -> Self {
        Self::TestConnection {
            service_id: service_id.into(),
        }
    }
}

impl DeepLinkRoute for ServicesRoute {
    const TAB: TabRoute = TabRoute::Services;

    fn root() -> Self {
        Self::List
    }

    fn from_segments(segments: &[&str]) -> Option<Self> {
        match segments {
            [] => Some(Self::List),
            ["add"] => Some(Self::AddService),
            ["configure", id] => Some(Self::service_configuration(*id)),
            ["test", id] => Some(Self::test_connection(*id)),
            _ => None,
        }
    }

    fn segments(&self) -> Vec<&str> {
        match self {
            Self::List => vec![],
            Self::AddService => vec!["add"],
            Self::ServiceConfiguration { service_id } => vec!["configure", service_id.as_str()],
            Self::TestConnection { service_id } => vec!["test", service_id.as_str()],
        }
    }
}

// ============================================================================
// Settings
// ============================================================================

/// Screens of the settings tab.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SettingsRoute {
    Main,
    Profiles,
    AddProfile,
    EditProfile { profile_id: String },
    Appearance,
    Notifications,
    About,
    Logs,
}

impl SettingsRoute {
    /// Create a profile editor route
    pub fn edit_profile(profile_id: impl Into<String>) -> Self {
        Self::EditProfile {
            profile_id: profile_id.into(),
        }
    }
}

impl DeepLinkRoute for SettingsRoute {
    const TAB: TabRoute = TabRoute::Settings;

    fn root() -> Self {
        Self::Main
    }

    fn from_segments(segments: &[&str]) -> Option<Self> {
        match segments {
            [] => Some(Self::Main),
            ["profiles"] => Some(Self::Profiles),
            ["profiles", "add"] => Some(Self::AddProfile),
            ["profiles", "edit", id] => Some(Self::edit_profile(*id)),
            ["appearance"] => Some(Self::Appearance),
            ["notifications"] => Some(Self::Notifications),
            ["about"] => Some(Self::About),
            ["logs"] => Some(Self::Logs),
            _ => None,
        }
    }

    fn segments(&self) -> Vec<&str> {
        match self {
            Self::Main => vec![],
            Self::Profiles => vec!["profiles"],
            Self::AddProfile => vec!["profiles", "add"],
            Self::EditProfile { profile_id } => vec!["profiles", "edit", profile_id.as_str()],
            Self::Appearance => vec!["appearance"],
            Self::Notifications => vec!["notifications"],
            Self::About => vec!["about"],
            Self::Logs => vec!["logs"],
        }
    }
}

// ============================================================================
// App and onboarding
// ============================================================================

/// Top-level flow shown by the [`AppCoordinator`](crate::app::AppCoordinator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AppRoute {
    Onboarding,
    Main,
}

/// Steps of the first-run flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OnboardingRoute {
    Welcome,
    CreateProfile,
    AddService,
    Complete,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_service_detail_scenario() {
        let route = DashboardRoute::parse("scheme://dashboard/service/radarr-1").unwrap();
        assert_eq!(route, DashboardRoute::service_detail("radarr-1"));
        assert_eq!(route.path(), "/service/radarr-1");
    }

    #[test]
    fn test_dashboard_media_detail_scenario() {
        let route = DashboardRoute::parse("scheme://dashboard/media/12345/radarr").unwrap();
        assert_eq!(route, DashboardRoute::media_detail("12345", "radarr"));
    }

    #[test]
    fn test_section_root_paths() {
        assert_eq!(DashboardRoute::parse("x://dashboard"), Some(DashboardRoute::Home));
        assert_eq!(ServicesRoute::parse("x://services/"), Some(ServicesRoute::List));
        assert_eq!(SettingsRoute::parse("x://settings"), Some(SettingsRoute::Main));
    }

    #[test]
    fn test_wrong_host_for_route_type() {
        assert_eq!(DashboardRoute::parse("x://settings/about"), None);
        assert_eq!(SettingsRoute::parse("x://nowhere"), None);
    }

    #[test]
    fn test_extra_or_missing_segments_rejected() {
        assert_eq!(DashboardRoute::parse("x://dashboard/service"), None);
        assert_eq!(DashboardRoute::parse("x://dashboard/media/1"), None);
        assert_eq!(ServicesRoute::parse("x://services/add/extra"), None);
        assert_eq!(SettingsRoute::parse("x://settings/profiles/edit"), None);
        assert_eq!(SettingsRoute::parse("x://settings/profiles/"), None);
    }

    #[test]
    fn test_identifiers_are_opaque() {
        assert_eq!(
            ServicesRoute::parse("x://services/configure/not%20validated%2Fat-all"),
            Some(ServicesRoute::service_configuration("not validated/at-all"))
        );
    }

    #[test]
    fn test_empty_identifier_round_trips() {
        let route = SettingsRoute::edit_profile("");
        assert_eq!(route.to_url(), "arrhub://settings/profiles/edit/");
        assert_eq!(SettingsRoute::parse(&route.to_url()), Some(route));
    }

    #[test]
    fn test_root_routes() {
        assert_eq!(DashboardRoute::root(), DashboardRoute::Home);
        assert_eq!(ServicesRoute::root(), ServicesRoute::List);
        assert_eq!(SettingsRoute::root(), SettingsRoute::Main);
    }
}
