//! Tab catalogue and user tab preferences.
//!
//! The set of tabs is fixed at build time ([`TabRoute::ALL`]). What the user
//! controls is which of them are shown and in what order. Those choices live
//! in [`TabPreferences`], loaded from and saved to a [`TabPreferenceStore`].
//!
//! Dashboard and settings are required: they can never be disabled, so the
//! user can always reach the screen that re-enables the others.
//!
//! # Ordering
//!
//! - **Automatic**: enabled tabs sorted by title.
//! - **Manual**: the persisted order, restricted to enabled tabs. Enabled
//!   tabs missing from the persisted order are appended in catalogue order.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use arrhub_navigator::{InMemoryTabPreferenceStore, TabConfiguration};
//!
//! let mut config = TabConfiguration::new(Arc::new(InMemoryTabPreferenceStore::default()));
//! assert!(config.toggle_tab_enabled("calendar"));
//! assert!(!config.toggle_tab_enabled("settings")); // required
//! assert_eq!(
//!     config.ordered_tab_ids(),
//!     vec!["dashboard", "search", "services", "settings"]
//! );
//! ```

use crate::debug_log;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

// ============================================================================
// TabRoute
// ============================================================================

/// The top-level sections reachable from the tab bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TabRoute {
    #[default]
    Dashboard,
    Calendar,
    Search,
    Services,
    Settings,
}

impl TabRoute {
    /// Every tab, in catalogue order.
    pub const ALL: [TabRoute; 5] = [
        TabRoute::Dashboard,
        TabRoute::Calendar,
        TabRoute::Search,
        TabRoute::Services,
        TabRoute::Settings,
    ];

    /// Stable key, also used as the deep-link host.
    pub const fn id(self) -> &'static str {
        match self {
            TabRoute::Dashboard => "dashboard",
            TabRoute::Calendar => "calendar",
            TabRoute::Search => "search",
            TabRoute::Services => "services",
            TabRoute::Settings => "settings",
        }
    }

    /// Look a tab up by id, ignoring ASCII case.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|tab| tab.id().eq_ignore_ascii_case(id))
    }

    pub const fn title(self) -> &'static str {
        match self {
            TabRoute::Dashboard => "Dashboard",
            TabRoute::Calendar => "Calendar",
            TabRoute::Search => "Search",
            TabRoute::Services => "Services",
            TabRoute::Settings => "Settings",
        }
    }

    pub const fn icon_name(self) -> &'static str {
        match self {
            TabRoute::Dashboard => "square.grid.2x2",
            TabRoute::Calendar => "calendar",
            TabRoute::Search => "magnifyingglass",
            TabRoute::Services => "server.rack",
            TabRoute::Settings => "gearshape",
        }
    }

    /// Required tabs return `false`.
    pub const fn can_be_disabled(self) -> bool {
        !matches!(self, TabRoute::Dashboard | TabRoute::Settings)
    }

    /// Whether the tab is backed by its own feature coordinator.
    ///
    /// Calendar and search are plain destinations without a navigation stack.
    pub const fn has_coordinator(self) -> bool {
        matches!(
            self,
            TabRoute::Dashboard | TabRoute::Services | TabRoute::Settings
        )
    }
}

impl fmt::Display for TabRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

// ============================================================================
// TabItem
// ============================================================================

/// One entry of the tab bar as presented to the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TabItem {
    pub tab: TabRoute,
    pub title: String,
    pub icon_name: String,
    pub is_enabled: bool,
    pub can_be_disabled: bool,
}

impl TabItem {
    /// Catalogue entry for `tab`, enabled.
    pub fn new(tab: TabRoute) -> Self {
        Self {
            tab,
            title: tab.title().to_string(),
            icon_name: tab.icon_name().to_string(),
            is_enabled: true,
            can_be_disabled: tab.can_be_disabled(),
        }
    }

    pub fn id(&self) -> &'static str {
        self.tab.id()
    }
}

/// Stable sort by title.
pub fn alphabetical(tabs: &[TabItem]) -> Vec<TabItem> {
    let mut sorted = tabs.to_vec();
    sorted.sort_by(|a, b| a.title.cmp(&b.title));
    sorted
}

/// Keep only enabled tabs, preserving order.
pub fn enabled_only(tabs: &[TabItem]) -> Vec<TabItem> {
    tabs.iter().filter(|tab| tab.is_enabled).cloned().collect()
}

// ============================================================================
// Persistence
// ============================================================================

/// Persisted tab choices.
///
/// `enabled_tab_ids` doubles as the manual order. Ids that are unknown to the
/// catalogue are ignored when applied.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TabPreferences {
    pub enabled_tab_ids: Vec<String>,
    pub automatic_ordering: bool,
}

impl Default for TabPreferences {
    fn default() -> Self {
        Self {
            enabled_tab_ids: TabRoute::ALL.iter().map(|tab| tab.id().to_string()).collect(),
            automatic_ordering: false,
        }
    }
}

/// Where [`TabPreferences`] are kept between launches.
pub trait TabPreferenceStore: Send + Sync {
    /// Read the persisted preferences.
    fn load(&self) -> TabPreferences;

    /// Persist `preferences`, replacing what was stored.
    fn save(&self, preferences: &TabPreferences);
}

/// Store that keeps preferences in memory, for tests and previews.
#[derive(Debug, Default)]
pub struct InMemoryTabPreferenceStore {
    preferences: Mutex<TabPreferences>,
}

impl InMemoryTabPreferenceStore {
    pub fn new(preferences: TabPreferences) -> Self {
        Self {
            preferences: Mutex::new(preferences),
        }
    }
}

impl TabPreferenceStore for InMemoryTabPreferenceStore {
    fn load(&self) -> TabPreferences {
        self.preferences
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn save(&self, preferences: &TabPreferences) {
        *self
            .preferences
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = preferences.clone();
    }
}

// ============================================================================
// TabConfiguration
// ============================================================================

/// The user's tab bar: catalogue entries with enabled flags and ordering.
pub struct TabConfiguration {
    tabs: Vec<TabItem>,
    preferences: TabPreferences,
    store: Arc<dyn TabPreferenceStore>,
}

impl TabConfiguration {
    /// Build the configuration from whatever `store` currently holds.
    pub fn new(store: Arc<dyn TabPreferenceStore>) -> Self {
        let mut config = Self {
            tabs: TabRoute::ALL.into_iter().map(TabItem::new).collect(),
            preferences: TabPreferences::default(),
            store,
        };
        config.reload();
        config
    }

    /// Re-read preferences from the store.
    pub fn reload(&mut self) {
        self.preferences = self.store.load();
        for item in &mut self.tabs {
            item.is_enabled = !item.can_be_disabled
                || self
                    .preferences
                    .enabled_tab_ids
                    .iter()
                    .any(|id| id.eq_ignore_ascii_case(item.id()));
        }
        debug_log!(
            "Loaded tab preferences: enabled={:?} automatic_ordering={}",
            self.preferences.enabled_tab_ids,
            self.preferences.automatic_ordering
        );
    }

    /// All tabs in catalogue order.
    pub fn tabs(&self) -> &[TabItem] {
        &self.tabs
    }

    pub fn is_enabled(&self, tab: TabRoute) -> bool {
        self.tabs
            .iter()
            .any(|item| item.tab == tab && item.is_enabled)
    }

    /// Enabled tabs in catalogue order.
    pub fn enabled_tabs(&self) -> Vec<TabRoute> {
        enabled_only(&self.tabs).into_iter().map(|item| item.tab).collect()
    }

    pub fn automatic_ordering(&self) -> bool {
        self.preferences.automatic_ordering
    }

    pub fn preferences(&self) -> &TabPreferences {
        &self.preferences
    }

    /// Flip a tab's enabled flag and persist the change.
    ///
    /// Returns `false` without changing anything if the id is unknown or the
    /// tab is required.
    pub fn toggle_tab_enabled(&mut self, id: &str) -> bool {
        let Some(item) = self
            .tabs
            .iter_mut()
            .find(|item| item.id().eq_ignore_ascii_case(id))
        else {
            debug_log!("Ignoring toggle for unknown tab '{}'", id);
            return false;
        };
        if !item.can_be_disabled {
            debug_log!("Tab '{}' is required and stays enabled", item.id());
            return false;
        }

        item.is_enabled = !item.is_enabled;
        let tab_id = item.id();
        let enabled = item.is_enabled;

        let ids = &mut self.preferences.enabled_tab_ids;
        ids.retain(|existing| !existing.eq_ignore_ascii_case(tab_id));
        if enabled {
            ids.push(tab_id.to_string());
        }
        self.store.save(&self.preferences);
        debug_log!("Tab '{}' enabled={}", tab_id, enabled);
        true
    }

    /// Switch between automatic (alphabetical) and manual ordering.
    pub fn set_automatic_ordering(&mut self, automatic: bool) {
        if self.preferences.automatic_ordering != automatic {
            self.preferences.automatic_ordering = automatic;
            self.store.save(&self.preferences);
        }
    }

    /// Move a tab within the current order and switch to manual ordering.
    ///
    /// Indices refer to [`ordered_tabs`](Self::ordered_tabs). Returns `false`
    /// if either index is out of range.
    pub fn move_tab(&mut self, from: usize, to: usize) -> bool {
        let mut order = self.ordered_tabs();
        if from >= order.len() || to >= order.len() {
            return false;
        }
        let tab = order.remove(from);
        order.insert(to, tab);

        self.preferences.enabled_tab_ids = order.iter().map(|tab| tab.id().to_string()).collect();
        self.preferences.automatic_ordering = false;
        self.store.save(&self.preferences);
        true
    }

    /// Enabled tabs in display order.
    pub fn ordered_tabs(&self) -> Vec<TabRoute> {
        if self.preferences.automatic_ordering {
            return alphabetical(&enabled_only(&self.tabs))
                .into_iter()
                .map(|item| item.tab)
                .collect();
        }

        let mut order: Vec<TabRoute> = Vec::new();
        for id in &self.preferences.enabled_tab_ids {
            if let Some(tab) = TabRoute::from_id(id) {
                if self.is_enabled(tab) && !order.contains(&tab) {
                    order.push(tab);
                }
            }
        }
        for tab in self.enabled_tabs() {
            if !order.contains(&tab) {
                order.push(tab);
            }
        }
        order
    }

    /// Ids of [`ordered_tabs`](Self::ordered_tabs).
    pub fn ordered_tab_ids(&self) -> Vec<&'static str> {
        self.ordered_tabs().into_iter().map(TabRoute::id).collect()
    }
}

impl fmt::Debug for TabConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TabConfiguration")
            .field("tabs", &self.tabs)
            .field("preferences", &self.preferences)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(
        preferences: TabPreferences,
    ) -> (TabConfiguration, Arc<InMemoryTabPreferenceStore>) {
        let store = Arc::new(InMemoryTabPreferenceStore::new(preferences));
        (TabConfiguration::new(store.clone()), store)
    }

    #[test]
    fn test_tab_route_lookup() {
        assert_eq!(TabRoute::from_id("services"), Some(TabRoute::Services));
        assert_eq!(TabRoute::from_id("SEARCH"), Some(TabRoute::Search));
        assert_eq!(TabRoute::from_id("downloads"), None);
    }

    #[test]
    fn test_required_tabs() {
        assert!(!TabRoute::Dashboard.can_be_disabled());
        assert!(!TabRoute::Settings.can_be_disabled());
        assert!(TabRoute::Calendar.can_be_disabled());
    }

    #[test]
    fn test_alphabetical_is_stable() {
        let mut first = TabItem::new(TabRoute::Search);
        first.title = "Same".to_string();
        let mut second = TabItem::new(TabRoute::Calendar);
        second.title = "Same".to_string();
        let tabs = vec![TabItem::new(TabRoute::Settings), first, second];

        let sorted: Vec<_> = alphabetical(&tabs).into_iter().map(|t| t.tab).collect();
        assert_eq!(
            sorted,
            vec![TabRoute::Search, TabRoute::Calendar, TabRoute::Settings]
        );
    }

    #[test]
    fn test_enabled_only() {
        let mut disabled = TabItem::new(TabRoute::Calendar);
        disabled.is_enabled = false;
        let tabs = vec![TabItem::new(TabRoute::Dashboard), disabled];
        assert_eq!(enabled_only(&tabs).len(), 1);
    }

    #[test]
    fn test_toggle_required_tab_is_noop() {
        let (mut config, store) = config_with(TabPreferences::default());
        assert!(!config.toggle_tab_enabled("dashboard"));
        assert!(config.is_enabled(TabRoute::Dashboard));
        assert_eq!(store.load(), TabPreferences::default());
    }

    #[test]
    fn test_toggle_persists() {
        let (mut config, store) = config_with(TabPreferences::default());
        assert!(config.toggle_tab_enabled("services"));
        assert!(!config.is_enabled(TabRoute::Services));
        assert!(!store.load().enabled_tab_ids.contains(&"services".to_string()));

        assert!(config.toggle_tab_enabled("services"));
        assert!(config.is_enabled(TabRoute::Services));
        assert_eq!(store.load().enabled_tab_ids.last().unwrap(), "services");
    }

    #[test]
    fn test_toggle_unknown_tab() {
        let (mut config, _) = config_with(TabPreferences::default());
        assert!(!config.toggle_tab_enabled("downloads"));
    }

    #[test]
    fn test_required_tabs_enabled_even_if_not_persisted() {
        let (config, _) = config_with(TabPreferences {
            enabled_tab_ids: vec!["services".to_string()],
            automatic_ordering: false,
        });
        assert!(config.is_enabled(TabRoute::Dashboard));
        assert!(config.is_enabled(TabRoute::Settings));
        assert!(!config.is_enabled(TabRoute::Calendar));
        assert_eq!(
            config.ordered_tab_ids(),
            vec!["services", "dashboard", "settings"]
        );
    }

    #[test]
    fn test_automatic_ordering() {
        let (mut config, _) = config_with(TabPreferences::default());
        config.set_automatic_ordering(true);
        config.toggle_tab_enabled("search");
        assert_eq!(
            config.ordered_tab_ids(),
            vec!["calendar", "dashboard", "services", "settings"]
        );
    }

    #[test]
    fn test_manual_ordering_ignores_unknown_and_duplicates() {
        let (config, _) = config_with(TabPreferences {
            enabled_tab_ids: vec![
                "settings".to_string(),
                "bogus".to_string(),
                "settings".to_string(),
                "search".to_string(),
            ],
            automatic_ordering: false,
        });
        assert_eq!(
            config.ordered_tab_ids(),
            vec!["settings", "search", "dashboard"]
        );
    }

    #[test]
    fn test_move_tab() {
        let (mut config, store) = config_with(TabPreferences::default());
        config.set_automatic_ordering(true);
        assert!(config.move_tab(4, 0));
        assert!(!config.automatic_ordering());
        assert_eq!(config.ordered_tabs()[0], TabRoute::Settings);
        assert_eq!(store.load().enabled_tab_ids[0], "settings");
        assert!(!config.move_tab(0, 9));
    }

    #[test]
    fn test_reload_picks_up_external_changes() {
        let (mut config, store) = config_with(TabPreferences::default());
        store.save(&TabPreferences {
            enabled_tab_ids: vec![],
            automatic_ordering: true,
        });
        assert!(config.is_enabled(TabRoute::Calendar));

        config.reload();
        assert!(!config.is_enabled(TabRoute::Calendar));
        assert_eq!(config.enabled_tabs(), vec![TabRoute::Dashboard, TabRoute::Settings]);
    }
}
