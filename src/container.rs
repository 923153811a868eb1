//! Explicit dependency container.
//!
//! The composition root creates one [`ServiceContainer`], registers the
//! app's services and hands it to the
//! [`AppCoordinator`](crate::app::AppCoordinator). Nothing is global, so
//! tests build their own container with fakes.
//!
//! Services are keyed by type, including trait-object types, which lets
//! coordinators depend on `dyn UserPreferences` rather than a concrete store:
//!
//! ```
//! use std::sync::Arc;
//! use arrhub_navigator::{InMemoryPreferences, ServiceContainer, UserPreferences};
//!
//! let mut container = ServiceContainer::new();
//! let prefs: Arc<dyn UserPreferences> = Arc::new(InMemoryPreferences::onboarded());
//! container.register_instance(prefs);
//!
//! let prefs = container.resolve::<dyn UserPreferences>().unwrap();
//! assert!(prefs.onboarding_completed());
//! ```
//!
//! Resolution is backed by a `ferrous_di` [`ServiceProvider`]. A fixed
//! instance is registered as a singleton; a factory is registered as a
//! transient and called fresh on every resolve. `ferrous_di` providers are
//! immutable once built, so the container keeps one registration per type
//! and rebuilds the provider whenever the set changes. Registering a type
//! again therefore replaces the previous registration.

use crate::error::ResolveError;
use crate::{trace_log, warn_log};
use ferrous_di::{Lifetime, Resolver, ServiceCollection, ServiceProvider};
use std::any::{type_name, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Adds one service to a fresh collection.
type Registration = Box<dyn Fn(&mut ServiceCollection)>;

/// Type-keyed registry of shared services.
pub struct ServiceContainer {
    registrations: HashMap<TypeId, (&'static str, Registration)>,
    provider: ServiceProvider,
}

impl ServiceContainer {
    /// Create an empty container.
    pub fn new() -> Self {
        Self {
            registrations: HashMap::new(),
            provider: ServiceCollection::new().build(),
        }
    }

    /// Register a shared instance for `T`, replacing any earlier registration.
    pub fn register_instance<T>(&mut self, instance: Arc<T>)
    where
        T: ?Sized + Send + Sync + 'static,
    {
        trace_log!("Registering singleton for {}", type_name::<T>());
        self.insert::<T>(Box::new(move |services| {
            let instance = Arc::clone(&instance);
            services.add_trait_factory::<T, _>(Lifetime::Singleton, move |_| {
                Arc::clone(&instance)
            });
        }));
    }

    /// Register a factory for `T`, replacing any earlier registration.
    pub fn register_factory<T, F>(&mut self, factory: F)
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn() -> Arc<T> + Send + Sync + 'static,
    {
        trace_log!("Registering transient factory for {}", type_name::<T>());
        let factory = Arc::new(factory);
        self.insert::<T>(Box::new(move |services| {
            let factory = Arc::clone(&factory);
            services.add_trait_factory::<T, _>(Lifetime::Transient, move |_| factory());
        }));
    }

    /// Resolve `T`, failing if it was never registered.
    pub fn resolve<T>(&self) -> Result<Arc<T>, ResolveError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        if !self.is_registered::<T>() {
            warn_log!("No registration for {}", type_name::<T>());
            return Err(ResolveError::NotRegistered {
                type_name: type_name::<T>(),
            });
        }
        self.provider
            .get_trait::<T>()
            .map_err(|err| ResolveError::Failed {
                type_name: type_name::<T>(),
                reason: err.to_string(),
            })
    }

    /// Resolve `T`, returning `None` if it is not available.
    pub fn resolve_optional<T>(&self) -> Option<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        if !self.is_registered::<T>() {
            return None;
        }
        self.provider.get_trait::<T>().ok()
    }

    /// Whether `T` has a registration.
    pub fn is_registered<T: ?Sized + 'static>(&self) -> bool {
        self.registrations.contains_key(&TypeId::of::<T>())
    }

    /// Remove the registration for `T`. Returns `true` if one existed.
    pub fn unregister<T: ?Sized + 'static>(&mut self) -> bool {
        let removed = self.registrations.remove(&TypeId::of::<T>()).is_some();
        if removed {
            self.rebuild();
        }
        removed
    }

    /// Remove every registration.
    pub fn reset(&mut self) {
        self.registrations.clear();
        self.rebuild();
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    fn insert<T: ?Sized + 'static>(&mut self, registration: Registration) {
        self.registrations
            .insert(TypeId::of::<T>(), (type_name::<T>(), registration));
        self.rebuild();
    }

    fn rebuild(&mut self) {
        let mut services = ServiceCollection::new();
        for (_, register) in self.registrations.values() {
            register(&mut services);
        }
        self.provider = services.build();
    }
}

impl Default for ServiceContainer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ServiceContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.registrations.values().map(|(name, _)| *name).collect();
        names.sort_unstable();
        f.debug_struct("ServiceContainer")
            .field("registered", &names)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
