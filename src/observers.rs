use std::{cell::RefCell, rc::Rc};

use crate::events::Notification;

/// Trait for lending observation
pub trait LendingObserver {
    /// Called after a borrow or return has been applied
    fn on_notification(&self, notification: &Notification);
}

/// Emits every notification through `tracing`
#[derive(Debug, Default)]
pub struct NotificationLogger;

impl LendingObserver for NotificationLogger {
    fn on_notification(&self, notification: &Notification) {
        tracing::info!(title = notification.title(), "{notification}");
    }
}

/// Keeps notifications in memory
///
/// Clones share the same buffer, so a caller can keep one handle and register
/// another with a library.
#[derive(Debug, Clone, Default)]
pub struct NotificationRecorder {
    /// Notifications seen so far, oldest first
    seen: Rc<RefCell<Vec<Notification>>>,
}

impl NotificationRecorder {
    /// Create a recorder with an empty buffer
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.seen.borrow().clone()
    }

    /// Recorded notifications rendered as text
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.seen.borrow().iter().map(ToString::to_string).collect()
    }
}

impl LendingObserver for NotificationRecorder {
    fn on_notification(&self, notification: &Notification) {
        self.seen.borrow_mut().push(notification.clone());
    }
}
