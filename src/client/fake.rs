use std::error::Error as StdError;
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::{BoxFuture, HttpResponse, HttpTransport};

#[derive(Debug, Clone)]
pub(crate) struct FakeTransport {
    state: Arc<Mutex<FakeTransportState>>,
}

#[derive(Debug)]
struct FakeTransportState {
    calls: usize,
    last_url: Option<String>,
    last_body: Option<String>,
    outcome: Result<(u16, String), String>,
    delay: Option<Duration>,
}

impl FakeTransport {
    pub(crate) fn new(response_status: u16, response_body: impl Into<String>) -> Self {
        Self::with_outcome(Ok((response_status, response_body.into())))
    }

    /// A transport that never gets a response and fails with `message`.
    pub(crate) fn failing(message: impl Into<String>) -> Self {
        Self::with_outcome(Err(message.into()))
    }

    fn with_outcome(outcome: Result<(u16, String), String>) -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeTransportState {
                calls: 0,
                last_url: None,
                last_body: None,
                outcome,
                delay: None,
            })),
        }
    }

    /// Hold every response for `delay` (virtual time under a paused runtime).
    pub(crate) fn delayed(self, delay: Duration) -> Self {
        self.state.lock().unwrap().delay = Some(delay);
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.state.lock().unwrap().calls
    }

    pub(crate) fn last_request(&self) -> (Option<String>, Option<String>) {
        let state = self.state.lock().unwrap();
        (state.last_url.clone(), state.last_body.clone())
    }

    /// Decoded `message_body` of the last request.
    pub(crate) fn last_message_body(&self) -> Option<String> {
        let (_, body) = self.last_request();
        let value: serde_json::Value = serde_json::from_str(&body?).unwrap();
        value["message_body"].as_str().map(ToOwned::to_owned)
    }
}

impl HttpTransport for FakeTransport {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let (outcome, delay) = {
                let mut state = self.state.lock().unwrap();
                state.calls += 1;
                state.last_url = Some(url.to_owned());
                state.last_body = Some(body);
                (state.outcome.clone(), state.delay)
            };

            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }

            match outcome {
                Ok((status, body)) => Ok(HttpResponse { status, body }),
                Err(message) => Err(io::Error::other(message).into()),
            }
        })
    }
}
