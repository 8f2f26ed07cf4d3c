//! Ping form controller: draft text, send status, and feedback to the user.
//!
//! [`PingSender`] owns the state behind a single-screen form. It turns the draft
//! into a [`MessageBody`], hands it to a [`PingClient`], reports the outcome
//! through a [`Notifier`], and falls back to [`SendStatus::Idle`] a short while
//! after every settled attempt.

mod notify;
mod view;

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::AbortHandle;
use tracing::{debug, info, warn};

use crate::client::{FALLBACK_ERROR_MESSAGE, PingClient, PingError};
use crate::domain::{
    ApiBase, DraftMessage, MessageBody, SendPingResponse, SendStatus, ValidationError,
};

pub use notify::{NotificationKind, Notifier, TracingNotifier};
pub use view::{FormView, SubmitControl};

/// How long `Ok`/`Error` stay visible before the form returns to `Idle`.
pub const RESET_DELAY: Duration = Duration::from_millis(1200);

/// Success notification text when the relay does not send a `message`.
pub const SUCCESS_FALLBACK_MESSAGE: &str = "SMS successfully queued.";

#[derive(Debug, thiserror::Error)]
/// Why [`PingSender::send`] did not deliver a ping.
pub enum SendError {
    /// The draft is empty after trimming; nothing was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Another send is still in flight.
    #[error("a ping is already being sent")]
    InFlight,

    /// The request was made and failed.
    #[error(transparent)]
    Ping(#[from] PingError),
}

#[derive(Debug, Default)]
struct FormState {
    draft: DraftMessage,
    status: SendStatus,
    error: Option<String>,
}

/// State and behavior of the ping form.
///
/// `send` must be awaited inside a Tokio runtime: the delayed reset to
/// [`SendStatus::Idle`] runs as a spawned task. Dropping the sender aborts a
/// pending reset.
pub struct PingSender {
    client: PingClient,
    notifier: Arc<dyn Notifier>,
    state: Arc<Mutex<FormState>>,
    reset: Mutex<Option<AbortHandle>>,
    reset_delay: Duration,
}

impl std::fmt::Debug for PingSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PingSender")
            .field("client", &self.client)
            .field("state", &*self.state.lock())
            .field("reset_delay", &self.reset_delay)
            .finish_non_exhaustive()
    }
}

impl PingSender {
    /// Create a sender that posts through `client` and reports outcomes to `notifier`.
    pub fn new(client: PingClient, notifier: impl Notifier + 'static) -> Self {
        Self {
            client,
            notifier: Arc::new(notifier),
            state: Arc::new(Mutex::new(FormState::default())),
            reset: Mutex::new(None),
            reset_delay: RESET_DELAY,
        }
    }

    /// Override [`RESET_DELAY`].
    pub fn with_reset_delay(mut self, delay: Duration) -> Self {
        self.reset_delay = delay;
        self
    }

    /// Replace the draft with `text`, capped at [`DraftMessage::MAX_CHARS`].
    pub fn update_draft(&self, text: impl Into<String>) {
        self.state.lock().draft = DraftMessage::new(text);
    }

    /// Current draft text.
    pub fn draft(&self) -> String {
        self.state.lock().draft.as_str().to_owned()
    }

    /// Current send status.
    pub fn status(&self) -> SendStatus {
        self.state.lock().status
    }

    /// Inline error text, if any.
    pub fn error(&self) -> Option<String> {
        self.state.lock().error.clone()
    }

    /// The API base shown in the form footer.
    pub fn api_base(&self) -> &ApiBase {
        self.client.api_base()
    }

    /// Snapshot of the form for rendering.
    pub fn view(&self) -> FormView {
        let state = self.state.lock();
        FormView::new(
            &state.draft,
            state.status,
            state.error.as_deref(),
            self.client.api_base().as_str(),
        )
    }

    /// Send the current draft.
    ///
    /// A blank draft sets the inline error and returns without touching the
    /// status. Otherwise the status moves to `Sending`, then to `Ok` (draft
    /// cleared) or `Error` (inline error set), the notifier is called, and the
    /// status returns to `Idle` after the reset delay.
    ///
    /// Dropping the returned future before it settles counts as a failed
    /// attempt: the status moves to `Error` and the reset is still scheduled.
    pub async fn send(&self) -> Result<SendPingResponse, SendError> {
        let body = {
            let mut state = self.state.lock();
            if state.status == SendStatus::Sending {
                debug!("send ignored: a ping is already in flight");
                return Err(SendError::InFlight);
            }

            let body = match MessageBody::from_draft(&state.draft) {
                Ok(body) => body,
                Err(err) => {
                    debug!(error = %err, "draft rejected");
                    state.error = Some(err.to_string());
                    return Err(SendError::Validation(err));
                }
            };

            state.error = None;
            state.status = SendStatus::Sending;
            body
        };
        self.cancel_reset();
        let mut guard = SettleGuard {
            sender: self,
            settled: false,
        };

        if body.is_truncated() {
            info!(max = MessageBody::MAX_CHARS, "message truncated before sending");
        }

        let result = self.client.send_ping(&body).await;
        guard.settled = true;

        {
            let mut state = self.state.lock();
            match &result {
                Ok(_) => {
                    state.status = SendStatus::Ok;
                    state.draft.clear();
                }
                Err(err) => {
                    state.status = SendStatus::Error;
                    state.error = Some(err.user_message());
                }
            }
        }
        self.schedule_reset();

        match result {
            Ok(response) => {
                info!(sid = ?response.sid, "ping sent");
                let message = response.message().unwrap_or(SUCCESS_FALLBACK_MESSAGE);
                self.notifier.notify(NotificationKind::Success, message);
                Ok(response)
            }
            Err(err) => {
                let message = err.user_message();
                warn!(error = %err, "ping failed");
                self.notifier.notify(NotificationKind::Failure, &message);
                Err(SendError::Ping(err))
            }
        }
    }

    fn schedule_reset(&self) {
        let state = Arc::downgrade(&self.state);
        let delay = self.reset_delay;

        let reset = async move {
            tokio::time::sleep(delay).await;
            let Some(state) = state.upgrade() else {
                return;
            };
            let mut state = state.lock();
            // A newer send owns the status once it has moved to Sending.
            if state.status.is_settled() {
                state.status = SendStatus::Idle;
                debug!("status reset to idle");
            }
        };

        // Without a runtime (e.g. dropped from a plain thread) there is no timer to
        // arm; fall back to Idle right away.
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            let mut state = self.state.lock();
            if state.status.is_settled() {
                state.status = SendStatus::Idle;
            }
            return;
        };
        let task = runtime.spawn(reset);

        if let Some(previous) = self.reset.lock().replace(task.abort_handle()) {
            previous.abort();
        }
    }

    fn cancel_reset(&self) {
        if let Some(pending) = self.reset.lock().take() {
            pending.abort();
        }
    }
}

/// Marks an abandoned send as failed so the form cannot stay in `Sending`.
struct SettleGuard<'a> {
    sender: &'a PingSender,
    settled: bool,
}

impl Drop for SettleGuard<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        warn!("send dropped before the relay answered");
        {
            let mut state = self.sender.state.lock();
            state.status = SendStatus::Error;
            state.error = Some(FALLBACK_ERROR_MESSAGE.to_owned());
        }
        self.sender.schedule_reset();
    }
}

impl Drop for PingSender {
    fn drop(&mut self) {
        if let Some(pending) = self.reset.get_mut().take() {
            pending.abort();
        }
    }
}
