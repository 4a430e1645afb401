use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifecycle of a user-facing transaction notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationState {
    /// Nothing shown yet
    Idle,
    /// Transaction submitted, waiting for finality
    Pending,
    /// Transaction finalized
    Succeeded,
    /// Submission or finality failed
    Failed,
}

impl NotificationState {
    /// Returns true once the notification can no longer change
    pub fn is_terminal(&self) -> bool {
        matches!(self, NotificationState::Succeeded | NotificationState::Failed)
    }

    /// Allowed single-step transitions. Forward only, no cycles.
    pub fn can_transition_to(&self, next: NotificationState) -> bool {
        use NotificationState::*;
        matches!(
            (self, next),
            (Idle, Pending) | (Idle, Failed) | (Pending, Succeeded) | (Pending, Failed)
        )
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Invalid notification transition: {from:?} -> {to:?}")]
pub struct InvalidTransition {
    pub from: NotificationState,
    pub to: NotificationState,
}

/// Tracks one notification through its lifecycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationLifecycle {
    state: NotificationState,
}

impl Default for NotificationLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationLifecycle {
    pub fn new() -> Self {
        Self {
            state: NotificationState::Idle,
        }
    }

    pub fn state(&self) -> NotificationState {
        self.state
    }

    pub fn transition(&mut self, next: NotificationState) -> Result<(), InvalidTransition> {
        if !self.state.can_transition_to(next) {
            return Err(InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        self.state = next;
        Ok(())
    }

    pub fn pending(&mut self) -> Result<(), InvalidTransition> {
        self.transition(NotificationState::Pending)
    }

    pub fn succeed(&mut self) -> Result<(), InvalidTransition> {
        self.transition(NotificationState::Succeeded)
    }

    pub fn fail(&mut self) -> Result<(), InvalidTransition> {
        self.transition(NotificationState::Failed)
    }
}
