//! Coordinator base abstraction.
//!
//! A coordinator owns one slice of the app's navigation: a stack of routes
//! (root first, top last) and the child coordinators it started. The tree of
//! coordinators looks like this once the main flow is running:
//!
//! ```text
//! AppCoordinator            [Main]
//! └── TabCoordinator        selected = services
//!     ├── Dashboard         [Home]
//!     ├── Services          [List, AddService]
//!     └── Settings          [Main]
//! ```
//!
//! # Ownership
//!
//! Parents own their children by value. A child refers to its parent only
//! through a [`CoordinatorId`], a plain handle that keeps nothing alive, so
//! the tree cannot form a cycle. Dropping a parent drops its whole subtree.
//!
//! # Identity
//!
//! Every coordinator gets a unique [`CoordinatorId`] when it is created.
//! [`child_did_finish`](Coordinator::child_did_finish) removes children by
//! id, never by structural comparison, and children are told apart by their
//! [`CoordinatorKind`] tag rather than by inspecting their type.

use crate::features::{DashboardCoordinator, ServicesCoordinator, SettingsCoordinator};
use crate::onboarding::OnboardingCoordinator;
use crate::tab::TabCoordinator;
use crate::tab_config::TabRoute;
use crate::{debug_log, trace_log};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_COORDINATOR_ID: AtomicU64 = AtomicU64::new(1);

// ============================================================================
// Identity and kind
// ============================================================================

/// Unique, non-owning handle to a coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CoordinatorId(u64);

impl CoordinatorId {
    /// Allocate a fresh id.
    pub(crate) fn next() -> Self {
        Self(NEXT_COORDINATOR_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw id value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CoordinatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Closed set of coordinator kinds, used to find children by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoordinatorKind {
    App,
    Onboarding,
    Tab,
    /// A feature coordinator backing one tab
    Feature(TabRoute),
}

impl fmt::Display for CoordinatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordinatorKind::App => f.write_str("app"),
            CoordinatorKind::Onboarding => f.write_str("onboarding"),
            CoordinatorKind::Tab => f.write_str("tab"),
            CoordinatorKind::Feature(tab) => write!(f, "{}", tab),
        }
    }
}

// ============================================================================
// CoordinatorCore
// ============================================================================

/// State shared by every coordinator: identity, stack and children.
///
/// Invariant: `active`, when set, is the id of an entry in `children`.
pub struct CoordinatorCore<R> {
    id: CoordinatorId,
    kind: CoordinatorKind,
    parent: Option<CoordinatorId>,
    navigation_path: Vec<R>,
    children: Vec<ChildCoordinator>,
    active: Option<CoordinatorId>,
}

impl<R: fmt::Debug> CoordinatorCore<R> {
    /// Create an empty core with a fresh id.
    pub fn new(kind: CoordinatorKind) -> Self {
        Self {
            id: CoordinatorId::next(),
            kind,
            parent: None,
            navigation_path: Vec::new(),
            children: Vec::new(),
            active: None,
        }
    }

    /// Get the coordinator id
    pub fn id(&self) -> CoordinatorId {
        self.id
    }

    /// Get the coordinator kind
    pub fn kind(&self) -> CoordinatorKind {
        self.kind
    }

    /// Get the parent handle, if attached
    pub fn parent(&self) -> Option<CoordinatorId> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: Option<CoordinatorId>) {
        self.parent = parent;
    }

    /// Get the back stack, root first
    pub fn navigation_path(&self) -> &[R] {
        &self.navigation_path
    }

    /// Push a route on top of the stack
    pub fn push(&mut self, route: R) {
        debug_log!("[{} {}] push {:?}", self.kind, self.id, route);
        self.navigation_path.push(route);
    }

    /// Pop the top route
    pub fn pop(&mut self) -> Option<R> {
        let popped = self.navigation_path.pop();
        match &popped {
            Some(route) => {
                debug_log!("[{} {}] pop {:?}", self.kind, self.id, route);
            }
            None => {
                trace_log!("[{} {}] pop on empty stack", self.kind, self.id);
            }
        }
        popped
    }

    /// Clear the stack
    pub fn pop_to_root(&mut self) {
        debug_log!(
            "[{} {}] pop to root ({} routes dropped)",
            self.kind,
            self.id,
            self.navigation_path.len()
        );
        self.navigation_path.clear();
    }

    /// Replace the whole stack.
    pub fn set_navigation_path(&mut self, path: Vec<R>) {
        debug_log!("[{} {}] reset stack to {:?}", self.kind, self.id, path);
        self.navigation_path = path;
    }

    /// Get the owned children, oldest first
    pub fn children(&self) -> &[ChildCoordinator] {
        &self.children
    }

    /// Take ownership of `child`, make it the active child and return it.
    pub fn add_child(&mut self, mut child: ChildCoordinator) -> &mut ChildCoordinator {
        child.set_parent(Some(self.id));
        debug_log!(
            "[{} {}] add child {} {}",
            self.kind,
            self.id,
            child.kind(),
            child.id()
        );
        self.active = Some(child.id());
        self.children.push(child);
        let index = self.children.len() - 1;
        &mut self.children[index]
    }

    /// Remove the child with the given id, returning it.
    ///
    /// Clears the active child if it was the one removed. Unknown ids leave
    /// the children untouched.
    pub fn child_did_finish(&mut self, id: CoordinatorId) -> Option<ChildCoordinator> {
        let index = self.children.iter().position(|child| child.id() == id)?;
        let mut child = self.children.remove(index);
        child.set_parent(None);
        if self.active == Some(id) {
            self.active = None;
        }
        debug_log!(
            "[{} {}] child {} {} finished ({} remaining)",
            self.kind,
            self.id,
            child.kind(),
            id,
            self.children.len()
        );
        Some(child)
    }

    /// Remove every child.
    pub fn remove_all_children(&mut self) -> Vec<ChildCoordinator> {
        self.active = None;
        let mut removed = std::mem::take(&mut self.children);
        for child in &mut removed {
            child.set_parent(None);
        }
        removed
    }

    /// Get the active child
    pub fn active_coordinator(&self) -> Option<&ChildCoordinator> {
        let active = self.active?;
        self.child(active)
    }

    /// Mark an existing child as active. Returns `false` for unknown ids.
    pub fn set_active(&mut self, id: CoordinatorId) -> bool {
        if self.child(id).is_some() {
            self.active = Some(id);
            true
        } else {
            false
        }
    }

    /// Find a child by id
    pub fn child(&self, id: CoordinatorId) -> Option<&ChildCoordinator> {
        self.children.iter().find(|child| child.id() == id)
    }

    /// Find a child by id, mutably
    pub fn child_mut(&mut self, id: CoordinatorId) -> Option<&mut ChildCoordinator> {
        self.children.iter_mut().find(|child| child.id() == id)
    }

    /// First child of the given kind.
    pub fn child_of_kind(&self, kind: CoordinatorKind) -> Option<&ChildCoordinator> {
        self.children.iter().find(|child| child.kind() == kind)
    }

    /// First child of the given kind, mutably.
    pub fn child_of_kind_mut(&mut self, kind: CoordinatorKind) -> Option<&mut ChildCoordinator> {
        self.children.iter_mut().find(|child| child.kind() == kind)
    }
}

impl<R: fmt::Debug> fmt::Debug for CoordinatorCore<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoordinatorCore")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("parent", &self.parent)
            .field("navigation_path", &self.navigation_path)
            .field("children", &self.children)
            .field("active", &self.active)
            .finish()
    }
}

// ============================================================================
// Coordinator trait
// ============================================================================

/// Common contract of every coordinator.
///
/// Implementors only provide access to their [`CoordinatorCore`] and a
/// [`start`](Coordinator::start) method; stack and child management are
/// provided.
pub trait Coordinator {
    /// Route type of this coordinator's stack.
    type Route: Clone + PartialEq + fmt::Debug;

    fn core(&self) -> &CoordinatorCore<Self::Route>;

    fn core_mut(&mut self) -> &mut CoordinatorCore<Self::Route>;

    /// Begin the flow: push the root route and/or start initial children.
    fn start(&mut self);

    fn id(&self) -> CoordinatorId {
        self.core().id()
    }

    fn kind(&self) -> CoordinatorKind {
        self.core().kind()
    }

    /// Non-owning handle to the parent, if this coordinator has been added
    /// as a child.
    fn parent(&self) -> Option<CoordinatorId> {
        self.core().parent()
    }

    /// Back stack, root first.
    fn navigation_path(&self) -> &[Self::Route] {
        self.core().navigation_path()
    }

    /// Top of the stack.
    fn current_route(&self) -> Option<&Self::Route> {
        self.core().navigation_path().last()
    }

    /// `true` when the stack is empty.
    fn is_at_root(&self) -> bool {
        self.core().navigation_path().is_empty()
    }

    /// Append a route.
    fn push(&mut self, route: Self::Route) {
        self.core_mut().push(route);
    }

    /// Remove the top route. `None` means there was nothing to pop.
    fn pop(&mut self) -> Option<Self::Route> {
        self.core_mut().pop()
    }

    /// Empty the stack.
    fn pop_to_root(&mut self) {
        self.core_mut().pop_to_root();
    }

    fn child_coordinators(&self) -> &[ChildCoordinator] {
        self.core().children()
    }

    fn active_coordinator(&self) -> Option<&ChildCoordinator> {
        self.core().active_coordinator()
    }

    /// Take ownership of a child and make it active.
    fn add_child(&mut self, child: ChildCoordinator) -> &mut ChildCoordinator {
        self.core_mut().add_child(child)
    }

    /// Tear down the child with the given id.
    fn child_did_finish(&mut self, id: CoordinatorId) -> Option<ChildCoordinator> {
        self.core_mut().child_did_finish(id)
    }
}

// ============================================================================
// ChildCoordinator
// ============================================================================

/// A coordinator owned by another coordinator.
///
/// The variant is the coordinator's kind, so typed access is a match rather
/// than a downcast.
#[derive(Debug)]
pub enum ChildCoordinator {
    Onboarding(OnboardingCoordinator),
    Tab(TabCoordinator),
    Dashboard(DashboardCoordinator),
    Services(ServicesCoordinator),
    Settings(SettingsCoordinator),
}

macro_rules! dispatch {
    ($self:expr, $c:ident => $body:expr) => {
        match $self {
            ChildCoordinator::Onboarding($c) => $body,
            ChildCoordinator::Tab($c) => $body,
            ChildCoordinator::Dashboard($c) => $body,
            ChildCoordinator::Services($c) => $body,
            ChildCoordinator::Settings($c) => $body,
        }
    };
}

impl ChildCoordinator {
    pub fn id(&self) -> CoordinatorId {
        dispatch!(self, c => c.id())
    }

    pub fn kind(&self) -> CoordinatorKind {
        dispatch!(self, c => c.kind())
    }

    pub fn parent(&self) -> Option<CoordinatorId> {
        dispatch!(self, c => c.parent())
    }

    fn set_parent(&mut self, parent: Option<CoordinatorId>) {
        dispatch!(self, c => c.core_mut().set_parent(parent));
    }

    pub fn start(&mut self) {
        dispatch!(self, c => c.start());
    }

    /// Depth of this child's own stack.
    pub fn stack_depth(&self) -> usize {
        dispatch!(self, c => c.navigation_path().len())
    }

    pub fn child_coordinators(&self) -> &[ChildCoordinator] {
        dispatch!(self, c => c.child_coordinators())
    }

    pub fn as_onboarding(&self) -> Option<&OnboardingCoordinator> {
        match self {
            ChildCoordinator::Onboarding(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_onboarding_mut(&mut self) -> Option<&mut OnboardingCoordinator> {
        match self {
            ChildCoordinator::Onboarding(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_tab(&self) -> Option<&TabCoordinator> {
        match self {
            ChildCoordinator::Tab(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_tab_mut(&mut self) -> Option<&mut TabCoordinator> {
        match self {
            ChildCoordinator::Tab(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_dashboard(&self) -> Option<&DashboardCoordinator> {
        match self {
            ChildCoordinator::Dashboard(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_dashboard_mut(&mut self) -> Option<&mut DashboardCoordinator> {
        match self {
            ChildCoordinator::Dashboard(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_services(&self) -> Option<&ServicesCoordinator> {
        match self {
            ChildCoordinator::Services(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_services_mut(&mut self) -> Option<&mut ServicesCoordinator> {
        match self {
            ChildCoordinator::Services(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_settings(&self) -> Option<&SettingsCoordinator> {
        match self {
            ChildCoordinator::Settings(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_settings_mut(&mut self) -> Option<&mut SettingsCoordinator> {
        match self {
            ChildCoordinator::Settings(c) => Some(c),
            _ => None,
        }
    }
}

impl From<OnboardingCoordinator> for ChildCoordinator {
    fn from(coordinator: OnboardingCoordinator) -> Self {
        ChildCoordinator::Onboarding(coordinator)
    }
}

impl From<TabCoordinator> for ChildCoordinator {
    fn from(coordinator: TabCoordinator) -> Self {
        ChildCoordinator::Tab(coordinator)
    }
}

impl From<DashboardCoordinator> for ChildCoordinator {
    fn from(coordinator: DashboardCoordinator) -> Self {
        ChildCoordinator::Dashboard(coordinator)
    }
}

impl From<ServicesCoordinator> for ChildCoordinator {
    fn from(coordinator: ServicesCoordinator) -> Self {
        ChildCoordinator::Services(coordinator)
    }
}

impl From<SettingsCoordinator> for ChildCoordinator {
    fn from(coordinator: SettingsCoordinator) -> Self {
        ChildCoordinator::Settings(coordinator)
    }
}

// ============================================================================
// Tests
// ============================================================================
