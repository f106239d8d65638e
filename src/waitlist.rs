use crate::notifications::{NotificationChannel, NotificationKind};
use crate::sink::{SinkError, WaitlistSink};
use crate::utils::is_empty_or_whitespace;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

pub const SUCCESS_MESSAGE: &str = "Access Granted. You are on the list.";
pub const DUPLICATE_MESSAGE: &str = "You are already on the waitlist.";
pub const REJECTED_FALLBACK_MESSAGE: &str = "Failed to join. Please try again.";
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred.";

/// One waitlist capture form.
///
/// The form owns its input buffer and an in-flight flag, and reports every
/// outcome through the shared [`NotificationChannel`]. It holds no terminal
/// state of its own: after each attempt it is idle again and ready for the
/// next one. The page instantiates one of these per form placement.
pub struct WaitlistForm {
    input: Mutex<String>,
    notifications: NotificationChannel,
    sink: Arc<dyn WaitlistSink>,
    submitting: AtomicBool,
}

impl WaitlistForm {
    pub fn new(sink: Arc<dyn WaitlistSink>, notifications: NotificationChannel) -> Self {
        Self {
            input: Mutex::new(String::new()),
            notifications,
            sink,
            submitting: AtomicBool::new(false),
        }
    }

    /// The email currently held by the form. Cleared on a successful
    /// submission, retained on failure so the visitor can retry.
    pub fn input(&self) -> String {
        self.input.lock().unwrap().clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::SeqCst)
    }

    pub fn notifications(&self) -> &NotificationChannel {
        &self.notifications
    }

    /// Attempt to register `email` on the waitlist.
    ///
    /// Empty input is ignored outright. While a submission is in flight,
    /// further calls are ignored as well; the flag is a re-entrancy guard,
    /// not a queue. Exactly one insert is issued per accepted call and
    /// exactly one notification is published, whatever the outcome.
    #[tracing::instrument(name = "Submitting waitlist request", skip(self, email))]
    pub async fn submit(&self, email: &str) {
        if is_empty_or_whitespace(email) {
            return;
        }
        if self
            .submitting
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::debug!("A submission is already in flight, ignoring.");
            return;
        }
        // Released on every exit path below, including early returns.
        let _guard = SubmitGuard(&self.submitting);

        *self.input.lock().unwrap() = email.to_owned();

        match self.sink.insert_waitlist_email(email).await {
            Ok(()) => {
                self.input.lock().unwrap().clear();
                self.notifications
                    .publish(SUCCESS_MESSAGE, NotificationKind::Success);
            }
            Err(e) if e.is_unique_violation() => {
                tracing::info!("The address is already on the waitlist.");
                self.notifications
                    .publish(DUPLICATE_MESSAGE, NotificationKind::Error);
            }
            Err(SinkError::Rejected { message, .. }) => {
                tracing::warn!(rejection = ?message, "The store rejected the waitlist entry.");
                let message = message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| REJECTED_FALLBACK_MESSAGE.to_owned());
                self.notifications.publish(message, NotificationKind::Error);
            }
            Err(SinkError::UnexpectedError(e)) => {
                tracing::error!(error = ?e, "Failed to reach the waitlist store.");
                self.notifications
                    .publish(UNEXPECTED_ERROR_MESSAGE, NotificationKind::Error);
            }
        }
    }
}

// Clears the in-flight flag when the attempt ends, on every path.
struct SubmitGuard<'a>(&'a AtomicBool);

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
