//! User preferences consumed by the coordinators.
//!
//! Only the onboarding flag matters for navigation. The trait takes `&self`
//! so one instance can be shared through the
//! [`ServiceContainer`](crate::container::ServiceContainer) and written by
//! the onboarding flow while the app coordinator reads it. Container
//! services are `Send + Sync`, hence the supertraits.

use std::sync::atomic::{AtomicBool, Ordering};

/// Persisted user choices that affect which flow the app starts in.
pub trait UserPreferences: Send + Sync {
    /// Whether the first-run flow was completed or skipped.
    fn onboarding_completed(&self) -> bool;

    /// Persist the onboarding flag.
    fn set_onboarding_completed(&self, completed: bool);
}

/// Preferences held in memory only.
#[derive(Debug, Default)]
pub struct InMemoryPreferences {
    onboarding_completed: AtomicBool,
}

impl InMemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preferences for a user who already finished onboarding.
    pub fn onboarded() -> Self {
        Self {
            onboarding_completed: AtomicBool::new(true),
        }
    }
}

impl UserPreferences for InMemoryPreferences {
    fn onboarding_completed(&self) -> bool {
        self.onboarding_completed.load(Ordering::Acquire)
    }

    fn set_onboarding_completed(&self, completed: bool) {
        self.onboarding_completed.store(completed, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_preferences() {
        let prefs = InMemoryPreferences::new();
        assert!(!prefs.onboarding_completed());

        prefs.set_onboarding_completed(true);
        assert!(prefs.onboarding_completed());
        assert!(InMemoryPreferences::onboarded().onboarding_completed());
    }
}
