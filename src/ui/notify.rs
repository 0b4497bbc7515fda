//! Transient user-facing notifications

use log::info;
use std::sync::{Mutex, PoisonError};

/// How a notification is styled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Default,
    Destructive,
}

/// A toast shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: Variant,
}

impl Notification {
    pub fn success(description: &str) -> Self {
        Self {
            title: "Success".to_string(),
            description: description.to_string(),
            variant: Variant::Default,
        }
    }

    pub fn error(description: &str) -> Self {
        Self {
            title: "Error".to_string(),
            description: description.to_string(),
            variant: Variant::Destructive,
        }
    }

    pub fn is_error(&self) -> bool {
        self.variant == Variant::Destructive
    }
}

/// Where components send their notifications
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Queues notifications until the UI takes them
#[derive(Debug, Default)]
pub struct NotificationCenter {
    pending: Mutex<Vec<Notification>>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every pending notification, oldest first
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.pending.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Notifier for NotificationCenter {
    fn notify(&self, notification: Notification) {
        info!("{}: {}", notification.title, notification.description);
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}
