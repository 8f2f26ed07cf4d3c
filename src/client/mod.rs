//! Client layer: orchestrates transport calls and maps transport ↔ domain.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use tracing::{debug, warn};

use crate::domain::{ApiBase, MessageBody, SendPingResponse, ValidationError};

#[cfg(test)]
pub(crate) mod fake;

/// Shown when a request failed without any usable message.
pub const FALLBACK_ERROR_MESSAGE: &str = "Failed to send.";

pub(crate) type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
pub(crate) struct HttpResponse {
    pub(crate) status: u16,
    pub(crate) body: String,
}

pub(crate) trait HttpTransport: Send + Sync {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = self
                .client
                .post(url)
                .header(CONTENT_TYPE, "application/json")
                .body(body)
                .send()
                .await?;
            let status = response.status().as_u16();
            // The status line already arrived; an unreadable body decodes as `{}`.
            let body = match response.text().await {
                Ok(body) => body,
                Err(err) => {
                    debug!(http_status = status, error = %err, "failed to read response body");
                    String::new()
                }
            };
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`PingClient`].
///
/// This error preserves:
/// - transport failures (no response at all),
/// - HTTP-level failures (non-2xx status),
/// - relay-level failures (2xx but `status != "success"`).
pub enum PingError {
    /// HTTP client / transport failure (DNS, connection refused, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status code returned by the relay.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus {
        status: u16,
        message: Option<String>,
    },

    /// The relay answered 2xx but did not report `"status": "success"`.
    #[error("ping rejected: {status:?} {message:?}")]
    Rejected {
        http_status: u16,
        status: Option<String>,
        message: Option<String>,
    },

    /// The request body could not be serialized.
    #[error("encode error: {0}")]
    Encode(#[source] serde_json::Error),

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl PingError {
    /// Text to show the user for this failure.
    ///
    /// Prefers the relay's `message`, then `HTTP <status>`, then the underlying
    /// error text, then [`FALLBACK_ERROR_MESSAGE`].
    pub fn user_message(&self) -> String {
        match self {
            Self::HttpStatus { status, message }
            | Self::Rejected {
                http_status: status,
                message,
                ..
            } => match message.as_deref().filter(|msg| !msg.is_empty()) {
                Some(msg) => msg.to_owned(),
                None => format!("HTTP {status}"),
            },
            Self::Transport(err) => non_empty_or_fallback(err.to_string()),
            Self::Encode(err) => non_empty_or_fallback(err.to_string()),
            Self::Validation(err) => non_empty_or_fallback(err.to_string()),
        }
    }

    /// HTTP status of the response, if the relay answered at all.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            Self::Rejected { http_status, .. } => Some(*http_status),
            _ => None,
        }
    }
}

fn non_empty_or_fallback(message: String) -> String {
    if message.trim().is_empty() {
        FALLBACK_ERROR_MESSAGE.to_owned()
    } else {
        message
    }
}

#[derive(Debug, Clone)]
/// Builder for [`PingClient`].
///
/// Use this when you need to customize the endpoint, timeout, or user-agent.
pub struct PingClientBuilder {
    api_base: ApiBase,
    endpoint: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl PingClientBuilder {
    /// Create a builder targeting `{api_base}/send-ping` with no timeout/user-agent override.
    pub fn new(api_base: ApiBase) -> Self {
        Self {
            api_base,
            endpoint: None,
            timeout: None,
            user_agent: None,
        }
    }

    /// Override the full `send-ping` URL.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`PingClient`].
    pub fn build(self) -> Result<PingClient, PingError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| PingError::Transport(Box::new(err)))?;

        let endpoint = self
            .endpoint
            .unwrap_or_else(|| self.api_base.send_ping_url());

        Ok(PingClient {
            api_base: self.api_base,
            endpoint,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// Client for the relay's `POST /send-ping` endpoint.
///
/// One call, one request: there are no retries and no authentication.
pub struct PingClient {
    api_base: ApiBase,
    endpoint: String,
    http: Arc<dyn HttpTransport>,
}

impl std::fmt::Debug for PingClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PingClient")
            .field("api_base", &self.api_base)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl PingClient {
    /// Create a client for `{api_base}/send-ping`.
    ///
    /// For more customization, use [`PingClient::builder`].
    pub fn new(api_base: ApiBase) -> Self {
        let endpoint = api_base.send_ping_url();
        Self {
            api_base,
            endpoint,
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(api_base: ApiBase) -> PingClientBuilder {
        PingClientBuilder::new(api_base)
    }

    #[cfg(test)]
    pub(crate) fn with_transport(api_base: ApiBase, http: Arc<dyn HttpTransport>) -> Self {
        let endpoint = api_base.send_ping_url();
        Self {
            api_base,
            endpoint,
            http,
        }
    }

    /// The API base this client was built for.
    pub fn api_base(&self) -> &ApiBase {
        &self.api_base
    }

    /// The URL requests are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Post `body` as `{"message_body": ...}`.
    ///
    /// The response body is decoded leniently: anything that is not a JSON object
    /// is treated as `{}`.
    ///
    /// Errors:
    /// - [`PingError::Transport`] when no response was received,
    /// - [`PingError::HttpStatus`] for non-2xx HTTP responses,
    /// - [`PingError::Rejected`] when a 2xx body does not carry `"status": "success"`.
    pub async fn send_ping(&self, body: &MessageBody) -> Result<SendPingResponse, PingError> {
        let json = crate::transport::encode_send_ping_json(body).map_err(PingError::Encode)?;
        debug!(endpoint = %self.endpoint, chars = body.as_str().chars().count(), "posting ping");

        let response = self
            .http
            .post_json(&self.endpoint, json)
            .await
            .map_err(|err| {
                warn!(endpoint = %self.endpoint, error = %err, "ping transport failed");
                PingError::Transport(err)
            })?;

        let parsed = crate::transport::decode_send_ping_json_response(&response.body);
        debug!(
            http_status = response.status,
            status = ?parsed.status,
            "relay answered"
        );

        if !(200..=299).contains(&response.status) {
            return Err(PingError::HttpStatus {
                status: response.status,
                message: parsed.message,
            });
        }

        if !parsed.is_success() {
            return Err(PingError::Rejected {
                http_status: response.status,
                status: parsed.status,
                message: parsed.message,
            });
        }

        Ok(parsed)
    }
}
