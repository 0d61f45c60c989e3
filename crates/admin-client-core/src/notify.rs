use std::{
    fmt::Debug,
    sync::{Arc, Mutex},
};

use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Warning,
    Error,
}

/// A user facing message produced by a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

/// Where user facing messages go, usually a toast in the UI
pub trait NotificationSink: Debug + Send + Sync + 'static {
    fn notify(&self, notification: Notification);
}

/// Only writes notifications to the log, used when no UI is attached
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

/// Keeps every notification it receives. Clones share the same list
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    notifications: Arc<Mutex<Vec<Notification>>>,
}

impl Notification {
    pub fn new<S: Into<String>>(level: NotificationLevel, message: S) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn success<S: Into<String>>(message: S) -> Self {
        Self::new(NotificationLevel::Success, message)
    }

    pub fn error<S: Into<String>>(message: S) -> Self {
        Self::new(NotificationLevel::Error, message)
    }

    pub fn warning<S: Into<String>>(message: S) -> Self {
        Self::new(NotificationLevel::Warning, message)
    }
}

impl NotificationSink for TracingNotifier {
    fn notify(&self, notification: Notification) {
        let Notification { level, message } = notification;
        match level {
            NotificationLevel::Success => info!(message, "notification"),
            NotificationLevel::Warning => warn!(message, "notification"),
            NotificationLevel::Error => error!(message, "notification"),
        }
    }
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().expect("mutex poisoned").clone()
    }

    pub fn len(&self) -> usize {
        self.notifications.lock().expect("mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes and returns everything recorded so far
    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.notifications.lock().expect("mutex poisoned"))
    }
}

impl NotificationSink for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications
            .lock()
            .expect("mutex poisoned")
            .push(notification);
    }
}
