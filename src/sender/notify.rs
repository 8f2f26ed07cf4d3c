use tracing::{info, warn};

/// Outcome a notification reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    Success,
    Failure,
}

impl NotificationKind {
    /// Short heading for a prompt or toast.
    pub fn title(self) -> &'static str {
        match self {
            Self::Success => "Sent",
            Self::Failure => "Send failed",
        }
    }
}

/// Host capability used to tell the user how a send went.
///
/// Implemented for any `Fn(NotificationKind, &str)` closure, so a host can pass a
/// modal prompt, a toast or a log line without a dedicated type.
pub trait Notifier: Send + Sync {
    fn notify(&self, kind: NotificationKind, message: &str);
}

impl<F> Notifier for F
where
    F: Fn(NotificationKind, &str) + Send + Sync,
{
    fn notify(&self, kind: NotificationKind, message: &str) {
        self(kind, message)
    }
}

/// Reports notifications as `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, kind: NotificationKind, message: &str) {
        match kind {
            NotificationKind::Success => info!(title = kind.title(), "{message}"),
            NotificationKind::Failure => warn!(title = kind.title(), "{message}"),
        }
    }
}
