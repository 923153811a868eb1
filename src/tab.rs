//! Main-flow tab coordinator and deep-link dispatch.
//!
//! [`TabCoordinator`] owns one feature coordinator per enabled section that
//! has one (dashboard, services, settings), tracks the selected tab, and is
//! where incoming deep links are routed.
//!
//! # Deep-link dispatch
//!
//! | Step | On failure |
//! |------|------------|
//! | Split the URL and map the host to a section | [`DeepLinkError::UnknownSection`] |
//! | Parse the path with that section's grammar | [`DeepLinkError::UnrecognizedPath`] |
//! | Find the section's running coordinator | [`DeepLinkError::UnsupportedSection`] |
//! | Select the tab and push the route | cannot fail |
//!
//! Every check happens before anything is mutated, so a rejected link leaves
//! the selection and all stacks untouched. Accepted links append to the
//! section's stack.
//!
//! ```
//! use arrhub_navigator::{Coordinator, ServicesRoute, TabCoordinator, TabRoute};
//!
//! let mut tabs = TabCoordinator::new(TabRoute::ALL);
//! tabs.start();
//!
//! assert!(tabs.handle_deep_link("scheme://services/add"));
//! assert_eq!(tabs.selected_tab(), TabRoute::Services);
//! assert_eq!(
//!     tabs.services().unwrap().navigation_path(),
//!     &[ServicesRoute::List, ServicesRoute::AddService]
//! );
//!
//! assert!(!tabs.handle_deep_link("scheme://invalid/path"));
//! assert_eq!(tabs.selected_tab(), TabRoute::Services);
//! ```

#[cfg(feature = "cache")]
use crate::cache::{CacheStats, DeepLinkCache};
use crate::coordinator::{ChildCoordinator, Coordinator, CoordinatorCore, CoordinatorKind};
use crate::deep_link::{DeepLink, DeepLinkConfig};
use crate::error::DeepLinkError;
use crate::features::{DashboardCoordinator, ServicesCoordinator, SettingsCoordinator};
use crate::tab_config::{TabConfiguration, TabRoute};
use crate::{debug_log, info_log, trace_log, warn_log};

/// Coordinator of the main tabbed area.
///
/// Its own navigation stack is unused; navigation happens inside the
/// feature coordinators.
#[derive(Debug)]
pub struct TabCoordinator {
    core: CoordinatorCore<TabRoute>,
    selected_tab: TabRoute,
    enabled_tabs: Vec<TabRoute>,
    deep_link_config: DeepLinkConfig,
    started: bool,
    #[cfg(feature = "cache")]
    cache: DeepLinkCache,
}

impl TabCoordinator {
    /// Create a coordinator for the given tabs, in display order.
    ///
    /// Duplicates are ignored. The dashboard is selected initially.
    pub fn new(tabs: impl IntoIterator<Item = TabRoute>) -> Self {
        let mut enabled_tabs: Vec<TabRoute> = Vec::new();
        for tab in tabs {
            if !enabled_tabs.contains(&tab) {
                enabled_tabs.push(tab);
            }
        }

        Self {
            core: CoordinatorCore::new(CoordinatorKind::Tab),
            selected_tab: TabRoute::default(),
            enabled_tabs,
            deep_link_config: DeepLinkConfig::default(),
            started: false,
            #[cfg(feature = "cache")]
            cache: DeepLinkCache::new(),
        }
    }

    /// Create a coordinator for the enabled tabs of `configuration`.
    pub fn with_configuration(configuration: &TabConfiguration) -> Self {
        Self::new(configuration.ordered_tabs())
    }

    /// Use `config` when parsing deep links.
    pub fn with_deep_link_config(mut self, config: DeepLinkConfig) -> Self {
        self.set_deep_link_config(config);
        self
    }

    pub fn deep_link_config(&self) -> &DeepLinkConfig {
        &self.deep_link_config
    }

    /// Replace the deep-link configuration, invalidating cached parses.
    pub fn set_deep_link_config(&mut self, config: DeepLinkConfig) {
        if self.deep_link_config != config {
            self.deep_link_config = config;
            #[cfg(feature = "cache")]
            self.cache.clear();
        }
    }

    /// Enabled tabs in display order.
    pub fn enabled_tabs(&self) -> &[TabRoute] {
        &self.enabled_tabs
    }

    pub fn selected_tab(&self) -> TabRoute {
        self.selected_tab
    }

    /// Select a tab. Stacks are left untouched.
    pub fn select(&mut self, tab: TabRoute) {
        if self.selected_tab != tab {
            debug_log!("[tab {}] select {} (was {})", self.id(), tab, self.selected_tab);
        }
        self.selected_tab = tab;
        self.sync_active();
    }

    // ========================================================================
    // Deep links
    // ========================================================================

    /// Parse `url` and check that a running coordinator can take it.
    ///
    /// Nothing is mutated apart from the parse cache.
    pub fn resolve_deep_link(&mut self, url: &str) -> Result<DeepLink, DeepLinkError> {
        #[cfg(feature = "cache")]
        let link = self.cache.get_or_parse(url, &self.deep_link_config)?;
        #[cfg(not(feature = "cache"))]
        let link = DeepLink::parse_with(url, &self.deep_link_config)?;

        if self.coordinator(link.tab()).is_none() {
            return Err(unsupported(link.tab()));
        }
        Ok(link)
    }

    /// Route an already parsed link: select its tab and push its route.
    ///
    /// Fails without mutating anything if the section has no running
    /// coordinator.
    pub fn open(&mut self, link: DeepLink) -> Result<TabRoute, DeepLinkError> {
        let tab = link.tab();
        let child = self
            .core
            .child_of_kind_mut(CoordinatorKind::Feature(tab))
            .ok_or_else(|| unsupported(tab))?;

        match (link, child) {
            (DeepLink::Dashboard(route), ChildCoordinator::Dashboard(c)) => c.push(route),
            (DeepLink::Services(route), ChildCoordinator::Services(c)) => c.push(route),
            (DeepLink::Settings(route), ChildCoordinator::Settings(c)) => c.push(route),
            _ => return Err(unsupported(tab)),
        }

        self.select(tab);
        Ok(tab)
    }

    /// Resolve and open `url`, returning the tab it selected.
    pub fn open_deep_link(&mut self, url: &str) -> Result<TabRoute, DeepLinkError> {
        let result = self
            .resolve_deep_link(url)
            .and_then(|link| self.open(link));
        match &result {
            Ok(tab) => {
                info_log!("Deep link '{}' opened in {}", url, tab);
            }
            Err(err) => {
                warn_log!("Deep link '{}' rejected: {}", url, err);
            }
        }
        result
    }

    /// Open `url`, reporting only whether it was handled.
    ///
    /// On `false` neither the selection nor any stack has changed.
    pub fn handle_deep_link(&mut self, url: &str) -> bool {
        self.open_deep_link(url).is_ok()
    }

    #[cfg(feature = "cache")]
    pub fn cache_stats(&self) -> &CacheStats {
        self.cache.stats()
    }

    // ========================================================================
    // Feature coordinators
    // ========================================================================

    /// The running coordinator backing `tab`, if any.
    pub fn coordinator(&self, tab: TabRoute) -> Option<&ChildCoordinator> {
        self.core.child_of_kind(CoordinatorKind::Feature(tab))
    }

    pub fn coordinator_mut(&mut self, tab: TabRoute) -> Option<&mut ChildCoordinator> {
        self.core.child_of_kind_mut(CoordinatorKind::Feature(tab))
    }

    pub fn dashboard(&self) -> Option<&DashboardCoordinator> {
        self.coordinator(TabRoute::Dashboard)?.as_dashboard()
    }

    pub fn dashboard_mut(&mut self) -> Option<&mut DashboardCoordinator> {
        self.coordinator_mut(TabRoute::Dashboard)?.as_dashboard_mut()
    }

    pub fn services(&self) -> Option<&ServicesCoordinator> {
        self.coordinator(TabRoute::Services)?.as_services()
    }

    pub fn services_mut(&mut self) -> Option<&mut ServicesCoordinator> {
        self.coordinator_mut(TabRoute::Services)?.as_services_mut()
    }

    pub fn settings(&self) -> Option<&SettingsCoordinator> {
        self.coordinator(TabRoute::Settings)?.as_settings()
    }

    pub fn settings_mut(&mut self) -> Option<&mut SettingsCoordinator> {
        self.coordinator_mut(TabRoute::Settings)?.as_settings_mut()
    }

    /// Apply a changed tab configuration.
    ///
    /// Coordinators of tabs that were disabled are torn down, newly enabled
    /// tabs get a started coordinator (if this coordinator is running), and
    /// sections that stay enabled keep their stacks. A disabled selection
    /// falls back to the dashboard.
    pub fn reconfigure(&mut self, configuration: &TabConfiguration) {
        self.enabled_tabs = configuration.ordered_tabs();
        debug_log!("[tab {}] reconfigured: {:?}", self.id(), self.enabled_tabs);

        let stale: Vec<_> = self
            .core
            .children()
            .iter()
            .filter(|child| match child.kind() {
                CoordinatorKind::Feature(tab) => !self.enabled_tabs.contains(&tab),
                _ => false,
            })
            .map(ChildCoordinator::id)
            .collect();
        for id in stale {
            self.core.child_did_finish(id);
        }

        if self.started {
            self.start_feature_coordinators();
        }
        if !self.enabled_tabs.contains(&self.selected_tab) {
            self.selected_tab = TabRoute::default();
        }
        self.sync_active();
    }

    fn start_feature_coordinators(&mut self) {
        for tab in self.enabled_tabs.clone() {
            if !tab.has_coordinator() || self.coordinator(tab).is_some() {
                continue;
            }
            if let Some(child) = feature_coordinator(tab) {
                self.core.add_child(child).start();
            }
        }
    }

    /// Point the active child at the selected tab's coordinator.
    fn sync_active(&mut self) {
        let selected = self.coordinator(self.selected_tab).map(ChildCoordinator::id);
        if let Some(id) = selected {
            self.core.set_active(id);
        }
    }
}

impl Default for TabCoordinator {
    fn default() -> Self {
        Self::new(TabRoute::ALL)
    }
}

impl Coordinator for TabCoordinator {
    type Route = TabRoute;

    fn core(&self) -> &CoordinatorCore<TabRoute> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut CoordinatorCore<TabRoute> {
        &mut self.core
    }

    /// Create and start a coordinator for every enabled section that has
    /// one. Calling it again only fills in missing coordinators.
    fn start(&mut self) {
        if self.started {
            trace_log!("[tab {}] already started", self.id());
        } else {
            info_log!("[tab {}] starting with tabs {:?}", self.id(), self.enabled_tabs);
        }
        self.started = true;
        self.start_feature_coordinators();
        self.sync_active();
    }
}

fn feature_coordinator(tab: TabRoute) -> Option<ChildCoordinator> {
    match tab {
        TabRoute::Dashboard => Some(DashboardCoordinator::new().into()),
        TabRoute::Services => Some(ServicesCoordinator::new().into()),
        TabRoute::Settings => Some(SettingsCoordinator::new().into()),
        TabRoute::Calendar | TabRoute::Search => None,
    }
}

fn unsupported(tab: TabRoute) -> DeepLinkError {
    DeepLinkError::UnsupportedSection {
        section: tab.id().to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================
