//! Coordinator-based navigation for the ArrHub client.
//!
//! The crate decides which screen is showing. It does not render anything;
//! a UI layer observes the coordinators' stacks and draws them.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`coordinator`] | [`Coordinator`] trait, [`CoordinatorCore`], [`ChildCoordinator`] |
//! | [`app`] | [`AppCoordinator`], choosing onboarding or the main flow |
//! | [`onboarding`] | [`OnboardingCoordinator`] |
//! | [`tab`] | [`TabCoordinator`] and deep-link dispatch |
//! | [`features`] | dashboard, services and settings coordinators |
//! | [`routes`] | route enums for every stack |
//! | [`deep_link`] | URL parsing and generation |
//! | [`tab_config`] | tab catalogue, enabled set and ordering |
//! | [`container`] | [`ServiceContainer`] |
//! | [`preferences`] | [`UserPreferences`] |
//! | [`cache`] | LRU cache of parsed deep links (feature `cache`) |
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use arrhub_navigator::{
//!     AppCoordinator, Coordinator, InMemoryPreferences, ServiceContainer, ServicesRoute,
//!     TabRoute, UserPreferences,
//! };
//!
//! let mut container = ServiceContainer::new();
//! let prefs: Arc<dyn UserPreferences> = Arc::new(InMemoryPreferences::onboarded());
//! container.register_instance(prefs);
//!
//! let mut app = AppCoordinator::new(&container).unwrap();
//! app.start();
//!
//! assert!(app.handle_deep_link("arrhub://services/test/sonarr-1"));
//! let tabs = app.tabs().unwrap();
//! assert_eq!(tabs.selected_tab(), TabRoute::Services);
//! assert_eq!(
//!     tabs.services().unwrap().current_route(),
//!     Some(&ServicesRoute::test_connection("sonarr-1"))
//! );
//! ```
//!
//! # Features
//!
//! - `log` (default): log through the `log` crate
//! - `tracing`: log through the `tracing` crate instead
//! - `cache` (default): cache parsed deep links in the tab coordinator
//! - `serde`: `Serialize`/`Deserialize` for routes, tabs and tab preferences

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod logging;

pub mod app;
#[cfg(feature = "cache")]
#[cfg_attr(docsrs, doc(cfg(feature = "cache")))]
pub mod cache;
pub mod container;
pub mod coordinator;
pub mod deep_link;
pub mod error;
pub mod features;
pub mod onboarding;
pub mod preferences;
pub mod routes;
pub mod tab;
pub mod tab_config;

pub use app::{AppCoordinator, AppState};
pub use container::ServiceContainer;
pub use coordinator::{
    ChildCoordinator, Coordinator, CoordinatorCore, CoordinatorId, CoordinatorKind,
};
pub use deep_link::{DeepLink, DeepLinkConfig, DeepLinkRoute, DeepLinkScheme, DEFAULT_SCHEME};
pub use error::{DeepLinkError, ResolveError, SchemeError};
pub use features::{
    DashboardCoordinator, FeatureCoordinator, ServicesCoordinator, SettingsCoordinator,
};
pub use onboarding::{OnboardingCoordinator, OnboardingOutcome};
pub use preferences::{InMemoryPreferences, UserPreferences};
pub use routes::{AppRoute, DashboardRoute, OnboardingRoute, ServicesRoute, SettingsRoute};
pub use tab::TabCoordinator;
pub use tab_config::{
    InMemoryTabPreferenceStore, TabConfiguration, TabItem, TabPreferenceStore, TabPreferences,
    TabRoute,
};
