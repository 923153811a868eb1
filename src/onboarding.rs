//! First-run flow.
//!
//! The onboarding coordinator walks the user through welcome, profile and
//! first-service screens. It finishes exactly once, either by
//! [`complete`](OnboardingCoordinator::complete) or
//! [`skip`](OnboardingCoordinator::skip), and reports the outcome to every
//! observer added with
//! [`add_on_complete`](OnboardingCoordinator::add_on_complete). Observers
//! cannot be removed, so whoever owns the flow always hears about it.

use crate::coordinator::{Coordinator, CoordinatorCore, CoordinatorKind};
use crate::routes::OnboardingRoute;
use crate::{debug_log, info_log};
use std::fmt;

/// How the onboarding flow ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OnboardingOutcome {
    Completed,
    Skipped,
}

type CompletionCallback = Box<dyn FnMut(OnboardingOutcome)>;

pub struct OnboardingCoordinator {
    core: CoordinatorCore<OnboardingRoute>,
    on_complete: Vec<CompletionCallback>,
    outcome: Option<OnboardingOutcome>,
}

impl OnboardingCoordinator {
    /// Create a flow that has not started yet.
    pub fn new() -> Self {
        Self {
            core: CoordinatorCore::new(CoordinatorKind::Onboarding),
            on_complete: Vec::new(),
            outcome: None,
        }
    }

    /// Add an observer told when the flow finishes.
    ///
    /// Observers run in the order they were added.
    pub fn add_on_complete(&mut self, callback: impl FnMut(OnboardingOutcome) + 'static) {
        self.on_complete.push(Box::new(callback));
    }

    /// Push the profile creation step.
    pub fn show_create_profile(&mut self) {
        self.push(OnboardingRoute::CreateProfile);
    }

    /// Push the first-service step.
    pub fn show_add_service(&mut self) {
        self.push(OnboardingRoute::AddService);
    }

    /// Push the closing summary step.
    pub fn show_completion(&mut self) {
        self.push(OnboardingRoute::Complete);
    }

    /// Finish the flow normally.
    ///
    /// Returns `None` if the flow had already finished.
    pub fn complete(&mut self) -> Option<OnboardingOutcome> {
        self.finish(OnboardingOutcome::Completed)
    }

    /// Leave the flow without finishing it.
    ///
    /// Returns `None` if the flow had already finished.
    pub fn skip(&mut self) -> Option<OnboardingOutcome> {
        self.finish(OnboardingOutcome::Skipped)
    }

    /// How the flow ended, if it has.
    pub fn outcome(&self) -> Option<OnboardingOutcome> {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    fn finish(&mut self, outcome: OnboardingOutcome) -> Option<OnboardingOutcome> {
        if let Some(previous) = self.outcome {
            debug_log!(
                "[onboarding {}] already finished ({:?}), ignoring {:?}",
                self.id(),
                previous,
                outcome
            );
            return None;
        }

        info_log!("[onboarding {}] finished: {:?}", self.id(), outcome);
        self.outcome = Some(outcome);
        for callback in &mut self.on_complete {
            callback(outcome);
        }
        Some(outcome)
    }
}

impl Default for OnboardingCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl Coordinator for OnboardingCoordinator {
    type Route = OnboardingRoute;

    fn core(&self) -> &CoordinatorCore<OnboardingRoute> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut CoordinatorCore<OnboardingRoute> {
        &mut self.core
    }

    fn start(&mut self) {
        if self.is_at_root() {
            self.push(OnboardingRoute::Welcome);
        }
    }
}

impl fmt::Debug for OnboardingCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OnboardingCoordinator")
            .field("core", &self.core)
            .field("observers", &self.on_complete.len())
            .field("outcome", &self.outcome)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_start_shows_welcome() {
        let mut onboarding = OnboardingCoordinator::new();
        onboarding.start();
        onboarding.start();
        assert_eq!(onboarding.navigation_path(), &[OnboardingRoute::Welcome]);
        assert_eq!(onboarding.kind(), CoordinatorKind::Onboarding);
    }

    #[test]
    fn test_walk_through_steps() {
        let mut onboarding = OnboardingCoordinator::new();
        onboarding.start();
        onboarding.show_create_profile();
        onboarding.show_add_service();
        onboarding.show_completion();

        assert_eq!(
            onboarding.navigation_path(),
            &[
                OnboardingRoute::Welcome,
                OnboardingRoute::CreateProfile,
                OnboardingRoute::AddService,
                OnboardingRoute::Complete,
            ]
        );
    }

    #[test]
    fn test_complete_notifies_once() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut onboarding = OnboardingCoordinator::new();
        let sink = Rc::clone(&seen);
        onboarding.add_on_complete(move |outcome| sink.borrow_mut().push(outcome));

        assert_eq!(onboarding.complete(), Some(OnboardingOutcome::Completed));
        assert_eq!(onboarding.skip(), None);
        assert_eq!(onboarding.complete(), None);

        assert_eq!(*seen.borrow(), vec![OnboardingOutcome::Completed]);
        assert_eq!(onboarding.outcome(), Some(OnboardingOutcome::Completed));
    }

    #[test]
    fn test_skip_notifies() {
        let seen = Rc::new(RefCell::new(None));
        let mut onboarding = OnboardingCoordinator::new();
        let sink = Rc::clone(&seen);
        onboarding.add_on_complete(move |outcome| *sink.borrow_mut() = Some(outcome));

        onboarding.start();
        assert_eq!(onboarding.skip(), Some(OnboardingOutcome::Skipped));
        assert_eq!(*seen.borrow(), Some(OnboardingOutcome::Skipped));
        assert!(onboarding.is_finished());
    }

    #[test]
    fn test_later_observer_does_not_replace_earlier() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut onboarding = OnboardingCoordinator::new();
        let first = Rc::clone(&seen);
        onboarding.add_on_complete(move |_| first.borrow_mut().push("first"));
        let second = Rc::clone(&seen);
        onboarding.add_on_complete(move |_| second.borrow_mut().push("second"));

        onboarding.complete();
        assert_eq!(*seen.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_finish_without_observer() {
        let mut onboarding = OnboardingCoordinator::new();
        assert!(!onboarding.is_finished());
        assert_eq!(onboarding.complete(), Some(OnboardingOutcome::Completed));
    }
}
