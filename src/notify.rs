//! Notification Sink
//!
//! Port to the host's toast/alert surface. Admin operations report their
//! outcome here, fire-and-forget; nothing in this crate renders anything.

/// Outcome category of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

/// Where operation outcome messages go
pub trait NotificationSink: Send + Sync {
    fn notify(&self, message: &str, kind: NoticeKind);
}

/// Sink that routes notifications to the log facade. Useful for headless
/// hosts and demos.
pub struct LogNotifier;

impl NotificationSink for LogNotifier {
    fn notify(&self, message: &str, kind: NoticeKind) {
        match kind {
            NoticeKind::Success | NoticeKind::Info => log::info!("{}", message),
            NoticeKind::Error => log::error!("{}", message),
        }
    }
}
