use std::sync::Mutex;

#[cfg(test)]
use mockall::automock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A transient message surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

/// Sink for user-visible success and error messages (toasts in a browser).
#[cfg_attr(test, automock)]
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Writes notifications to the tracing log.
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        tracing::info!(target: "notification", "{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "notification", "{}", message);
    }
}

/// Keeps every notification in order of emission.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .map(|n| n.clone())
            .unwrap_or_default()
    }

    fn push(&self, kind: NotificationKind, message: &str) {
        if let Ok(mut notifications) = self.notifications.lock() {
            notifications.push(Notification {
                kind,
                message: message.to_string(),
            });
        }
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.push(NotificationKind::Success, message);
    }

    fn error(&self, message: &str) {
        self.push(NotificationKind::Error, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_notifier_keeps_order_and_kind() {
        let notifier = RecordingNotifier::new();
        notifier.error("first");
        notifier.success("second");
        assert_eq!(
            notifier.notifications(),
            vec![
                Notification { kind: NotificationKind::Error, message: "first".into() },
                Notification { kind: NotificationKind::Success, message: "second".into() },
            ]
        );
    }
}
