//! Typed Rust client and form controller for a send-ping SMS relay.
//!
//! The relay exposes one endpoint, `POST /send-ping`, that forwards a short text
//! to a fixed phone number. This crate keeps the same split as a larger API
//! client: a domain layer of strong types, a transport layer for the wire
//! format, a client layer that makes the call, and [`PingSender`], the state
//! behind a single-screen "ping me" form.
//!
//! ```rust,no_run
//! use pingme::{Config, PingSender, TracingNotifier};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env(None)?;
//!     let sender = PingSender::new(config.client()?, TracingNotifier);
//!     sender.update_draft("  running late, be there at 7  ");
//!     let _resp = sender.send().await?;
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod config;
pub mod domain;
pub mod sender;
mod transport;

pub use client::{FALLBACK_ERROR_MESSAGE, PingClient, PingClientBuilder, PingError};
pub use config::{Config, ConfigError, DEFAULT_API_BASE, resolve_api_base};
pub use domain::{
    ApiBase, DraftMessage, MessageBody, SendPingResponse, SendStatus, ValidationError,
};
pub use sender::{
    FormView, NotificationKind, Notifier, PingSender, RESET_DELAY, SendError, SubmitControl,
    TracingNotifier,
};
