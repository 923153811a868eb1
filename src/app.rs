//! Root coordinator: onboarding or main flow.
//!
//! [`AppCoordinator`] is a small state machine with a single child at a
//! time:
//!
//! | State | Stack | Child |
//! |-------|-------|-------|
//! | [`AppState::Uninitialized`] | `[]` | none |
//! | [`AppState::Onboarding`] | `[Onboarding]` | [`OnboardingCoordinator`] |
//! | [`AppState::Main`] | `[Main]` | [`TabCoordinator`] |
//!
//! Which flow [`start`](Coordinator::start) enters depends on the
//! onboarding flag of the [`UserPreferences`] service.
//!
//! The app adds an observer to every onboarding coordinator it starts. When
//! the flow finishes, by completing or skipping it, the observer sets the
//! flag and records the outcome. Recorded outcomes are applied on the app's
//! next mutating call: the onboarding coordinator is torn down and the main
//! flow is entered. This holds however the child was finished, including
//! through [`core_mut`](Coordinator::core_mut).
//!
//! Deep links that arrive before the main flow is running are kept and
//! opened once it starts.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use arrhub_navigator::{
//!     AppCoordinator, AppState, Coordinator, InMemoryPreferences, ServiceContainer,
//!     UserPreferences,
//! };
//!
//! let prefs = Arc::new(InMemoryPreferences::new());
//! let mut container = ServiceContainer::new();
//! container.register_instance::<dyn UserPreferences>(prefs.clone());
//!
//! let mut app = AppCoordinator::new(&container).unwrap();
//! app.start();
//! assert_eq!(app.state(), AppState::Onboarding);
//!
//! assert!(!app.handle_deep_link("arrhub://settings/about"));
//! assert!(app.complete_onboarding());
//!
//! assert_eq!(app.state(), AppState::Main);
//! assert!(prefs.onboarding_completed());
//! assert_eq!(app.pending_deep_link(), None);
//! ```

use crate::container::ServiceContainer;
use crate::coordinator::{ChildCoordinator, Coordinator, CoordinatorCore, CoordinatorKind};
use crate::deep_link::{DeepLink, DeepLinkConfig};
use crate::error::ResolveError;
use crate::onboarding::{OnboardingCoordinator, OnboardingOutcome};
use crate::preferences::UserPreferences;
use crate::routes::AppRoute;
use crate::tab::TabCoordinator;
use crate::tab_config::{TabConfiguration, TabRoute};
use crate::{debug_log, error_log, info_log, trace_log, warn_log};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::sync::{Arc, PoisonError, RwLock};

/// Which top-level flow is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppState {
    Uninitialized,
    Onboarding,
    Main,
}

pub struct AppCoordinator {
    core: CoordinatorCore<AppRoute>,
    preferences: Arc<dyn UserPreferences>,
    tab_configuration: Option<Arc<RwLock<TabConfiguration>>>,
    deep_link_config: DeepLinkConfig,
    pending_deep_link: Option<String>,
    /// Written by the onboarding observer, drained by the app
    finished_onboarding: Rc<Cell<Option<OnboardingOutcome>>>,
}

impl AppCoordinator {
    /// Build the root coordinator from the app's services.
    ///
    /// `dyn UserPreferences` is required. A `RwLock<TabConfiguration>` and
    /// a [`DeepLinkConfig`] are used when registered; otherwise every tab is
    /// enabled and links use the default configuration.
    pub fn new(container: &ServiceContainer) -> Result<Self, ResolveError> {
        let preferences = container.resolve::<dyn UserPreferences>()?;
        let tab_configuration = container.resolve_optional::<RwLock<TabConfiguration>>();
        let deep_link_config = container
            .resolve_optional::<DeepLinkConfig>()
            .map(|config| (*config).clone())
            .unwrap_or_default();

        Ok(Self {
            core: CoordinatorCore::new(CoordinatorKind::App),
            preferences,
            tab_configuration,
            deep_link_config,
            pending_deep_link: None,
            finished_onboarding: Rc::new(Cell::new(None)),
        })
    }

    /// Get the flow currently showing
    pub fn state(&self) -> AppState {
        match self.current_route() {
            None => AppState::Uninitialized,
            Some(AppRoute::Onboarding) => AppState::Onboarding,
            Some(AppRoute::Main) => AppState::Main,
        }
    }

    /// Get the onboarding coordinator, if onboarding is running
    pub fn onboarding(&self) -> Option<&OnboardingCoordinator> {
        self.core
            .child_of_kind(CoordinatorKind::Onboarding)?
            .as_onboarding()
    }

    /// Get the tab coordinator, if the main flow is running
    pub fn tabs(&self) -> Option<&TabCoordinator> {
        self.core.child_of_kind(CoordinatorKind::Tab)?.as_tab()
    }

    /// Get the tab coordinator mutably, if the main flow is running
    pub fn tabs_mut(&mut self) -> Option<&mut TabCoordinator> {
        self.apply_finished_onboarding();
        self.tab_child_mut()
    }

    /// Run `f` against the tab coordinator, if the main flow is running.
    pub fn update_tabs<F, R>(&mut self, f: F) -> Option<R>
    where
        F: FnOnce(&mut TabCoordinator) -> R,
    {
        self.tabs_mut().map(f)
    }

    /// Run `f` against the onboarding coordinator, if onboarding is running.
    ///
    /// If `f` finishes the flow, the onboarding coordinator is torn down and
    /// the main flow is entered before this returns.
    pub fn update_onboarding<F, R>(&mut self, f: F) -> Option<R>
    where
        F: FnOnce(&mut OnboardingCoordinator) -> R,
    {
        self.apply_finished_onboarding();
        let child = self
            .core
            .child_of_kind_mut(CoordinatorKind::Onboarding)?
            .as_onboarding_mut()?;
        let result = f(child);
        self.apply_finished_onboarding();
        Some(result)
    }

    /// Complete onboarding and enter the main flow.
    ///
    /// Returns `false` if onboarding was not running, including when it was
    /// already finished some other way.
    pub fn complete_onboarding(&mut self) -> bool {
        self.update_onboarding(OnboardingCoordinator::complete)
            .flatten()
            .is_some()
    }

    /// Skip onboarding and enter the main flow.
    ///
    /// Returns `false` if onboarding was not running, including when it was
    /// already finished some other way.
    pub fn skip_onboarding(&mut self) -> bool {
        self.update_onboarding(OnboardingCoordinator::skip)
            .flatten()
            .is_some()
    }

    /// Tear down whatever is running and restart onboarding.
    ///
    /// The persisted onboarding flag is left as it is.
    pub fn reset_onboarding(&mut self) {
        info_log!("Restarting onboarding from {:?}", self.state());
        self.enter_onboarding();
    }

    /// Open a deep link, or keep it for later if the main flow is not
    /// running yet.
    ///
    /// Returns `true` only if the link was opened now. A later link
    /// replaces a pending one; links that cannot parse are dropped.
    pub fn handle_deep_link(&mut self, url: &str) -> bool {
        self.apply_finished_onboarding();
        if self.state() == AppState::Main {
            return match self.tab_child_mut() {
                Some(tabs) => tabs.handle_deep_link(url),
                None => {
                    error_log!("Main flow has no tab coordinator, dropping '{}'", url);
                    false
                }
            };
        }

        match DeepLink::parse_with(url, &self.deep_link_config) {
            Ok(_) => {
                info_log!("Deferring deep link '{}' until the main flow starts", url);
                self.pending_deep_link = Some(url.to_string());
            }
            Err(err) => {
                warn_log!("Deep link '{}' rejected: {}", url, err);
            }
        }
        false
    }

    /// The deep link waiting for the main flow, if any.
    pub fn pending_deep_link(&self) -> Option<&str> {
        self.pending_deep_link.as_deref()
    }

    /// Re-read the tab configuration and apply it to the running tabs.
    ///
    /// Returns `false` if no tab configuration was registered.
    pub fn reload_tabs(&mut self) -> bool {
        self.apply_finished_onboarding();
        let Some(configuration) = self.tab_configuration.clone() else {
            return false;
        };
        configuration
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .reload();
        let configuration = configuration.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(tabs) = self.tab_child_mut() {
            tabs.reconfigure(&configuration);
        }
        true
    }

    /// Tear down a finished onboarding child and enter the main flow.
    ///
    /// Returns `false` if no outcome was recorded since the last call.
    fn apply_finished_onboarding(&mut self) -> bool {
        let Some(outcome) = self.finished_onboarding.take() else {
            return false;
        };
        let finished = self
            .core
            .child_of_kind(CoordinatorKind::Onboarding)
            .map(ChildCoordinator::id);
        if let Some(id) = finished {
            self.core.child_did_finish(id);
        }
        info_log!("Onboarding {:?}, entering main flow", outcome);
        self.enter_main();
        true
    }

    fn tab_child_mut(&mut self) -> Option<&mut TabCoordinator> {
        self.core.child_of_kind_mut(CoordinatorKind::Tab)?.as_tab_mut()
    }

    fn enter_onboarding(&mut self) {
        self.core.remove_all_children();
        self.finished_onboarding.set(None);

        let mut onboarding = OnboardingCoordinator::new();
        let preferences = Arc::clone(&self.preferences);
        let finished = Rc::clone(&self.finished_onboarding);
        onboarding.add_on_complete(move |outcome| {
            preferences.set_onboarding_completed(true);
            finished.set(Some(outcome));
        });

        self.core.add_child(onboarding.into());
        self.core.set_navigation_path(vec![AppRoute::Onboarding]);
        if let Some(child) = self.core.child_of_kind_mut(CoordinatorKind::Onboarding) {
            child.start();
        }
    }

    fn enter_main(&mut self) {
        self.core.remove_all_children();

        let tabs = match &self.tab_configuration {
            Some(configuration) => TabCoordinator::with_configuration(
                &configuration.read().unwrap_or_else(PoisonError::into_inner),
            ),
            None => TabCoordinator::new(TabRoute::ALL),
        }
        .with_deep_link_config(self.deep_link_config.clone());

        self.core.add_child(tabs.into());
        self.core.set_navigation_path(vec![AppRoute::Main]);

        let pending = self.pending_deep_link.take();
        let Some(tabs) = self.tab_child_mut() else {
            return;
        };
        tabs.start();
        if let Some(url) = pending {
            debug_log!("Replaying deferred deep link '{}'", url);
            tabs.handle_deep_link(&url);
        }
    }
}

impl Coordinator for AppCoordinator {
    type Route = AppRoute;

    fn core(&self) -> &CoordinatorCore<AppRoute> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut CoordinatorCore<AppRoute> {
        &mut self.core
    }

    /// Enter onboarding or the main flow, depending on the onboarding flag.
    fn start(&mut self) {
        if self.apply_finished_onboarding() {
            return;
        }
        if self.state() != AppState::Uninitialized {
            trace_log!("App already started in {:?}", self.state());
            return;
        }

        if self.preferences.onboarding_completed() {
            info_log!("Starting app in main flow");
            self.enter_main();
        } else {
            info_log!("Starting app in onboarding");
            self.enter_onboarding();
        }
    }
}

impl fmt::Debug for AppCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppCoordinator")
            .field("core", &self.core)
            .field("tab_configuration", &self.tab_configuration)
            .field("deep_link_config", &self.deep_link_config)
            .field("pending_deep_link", &self.pending_deep_link)
            .field("finished_onboarding", &self.finished_onboarding.get())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
