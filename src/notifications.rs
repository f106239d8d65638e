use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

/// How long a notification stays up before it is dismissed automatically.
pub const DISMISS_AFTER: Duration = Duration::from_millis(4000);

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

/// A transient user-facing status message.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
}

/// Process-wide broadcaster holding at most one active notification.
///
/// Publishing supersedes whatever is currently shown: the previous
/// auto-dismiss task is aborted and only the newest notification's timer
/// governs dismissal. Handles are cheap to clone and share one state.
#[derive(Clone)]
pub struct NotificationChannel {
    inner: Arc<Inner>,
}

struct Inner {
    dismiss_after: Duration,
    next_id: AtomicU64,
    state: Mutex<State>,
}

struct State {
    current: Option<Notification>,
    timer: Option<JoinHandle<()>>,
}

impl Default for NotificationChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationChannel {
    pub fn new() -> Self {
        Self::with_dismiss_after(DISMISS_AFTER)
    }

    pub fn with_dismiss_after(dismiss_after: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                dismiss_after,
                next_id: AtomicU64::new(1),
                state: Mutex::new(State {
                    current: None,
                    timer: None,
                }),
            }),
        }
    }

    /// Replace the active notification and schedule its auto-dismissal.
    ///
    /// Must be called from within a tokio runtime.
    pub fn publish(&self, message: impl Into<String>, kind: NotificationKind) {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let notification = Notification {
            id,
            kind,
            message: message.into(),
        };

        let mut state = self.inner.state.lock().unwrap();
        if let Some(timer) = state.timer.take() {
            timer.abort();
        }
        state.current = Some(notification);

        let channel = self.clone();
        let dismiss_after = self.inner.dismiss_after;
        state.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(dismiss_after).await;
            channel.dismiss_if_current(id);
        }));
    }

    /// Clear the active notification. Idempotent.
    pub fn dismiss(&self) {
        let mut state = self.inner.state.lock().unwrap();
        if let Some(timer) = state.timer.take() {
            timer.abort();
        }
        state.current = None;
    }

    pub fn current(&self) -> Option<Notification> {
        self.inner.state.lock().unwrap().current.clone()
    }

    // An aborted timer may already be past its sleep; the id check keeps a
    // stale wake-up from clearing a newer notification.
    fn dismiss_if_current(&self, id: u64) {
        let mut state = self.inner.state.lock().unwrap();
        if state.current.as_ref().map(|n| n.id) == Some(id) {
            state.current = None;
            state.timer = None;
        }
    }
}
