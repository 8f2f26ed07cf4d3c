//! Startup configuration: where the relay lives and how long to wait for it.

use std::time::Duration;

use crate::client::{PingClient, PingError};
use crate::domain::{ApiBase, ValidationError};

/// Relay address used when nothing else is configured (a LAN development host).
pub const DEFAULT_API_BASE: &str = "http://192.168.1.200:5001";

/// Environment variable consulted after the application-provided value.
pub const API_BASE_ENV: &str = "PINGME_API_BASE";

/// Optional request timeout in whole seconds.
pub const TIMEOUT_ENV: &str = "PINGME_TIMEOUT_SECS";

/// Pick the API base from `sources`, highest priority first.
///
/// The first source that is present and not blank wins; otherwise
/// [`DEFAULT_API_BASE`] is returned.
pub fn resolve_api_base<I, S>(sources: I) -> String
where
    I: IntoIterator<Item = Option<S>>,
    S: AsRef<str>,
{
    sources
        .into_iter()
        .flatten()
        .find_map(|source| {
            let trimmed = source.as_ref().trim();
            (!trimmed.is_empty()).then(|| trimmed.to_owned())
        })
        .unwrap_or_else(|| DEFAULT_API_BASE.to_owned())
}

#[derive(Debug, thiserror::Error)]
/// Errors produced while loading [`Config`].
pub enum ConfigError {
    #[error("PINGME_TIMEOUT_SECS must be a whole number of seconds, got {value:?}")]
    InvalidTimeout { value: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Resolved configuration, computed once at startup.
pub struct Config {
    api_base: ApiBase,
    timeout: Option<Duration>,
}

impl Config {
    /// Load from the process environment.
    ///
    /// `app_value` is the application's own setting (for example a command-line
    /// flag) and takes priority over [`API_BASE_ENV`].
    pub fn from_env(app_value: Option<&str>) -> Result<Self, ConfigError> {
        Self::from_lookup(app_value, |key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(app_value: Option<&str>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_value = lookup(API_BASE_ENV);
        let resolved = resolve_api_base([app_value, env_value.as_deref()]);
        let api_base = ApiBase::parse(&resolved)?;

        let timeout = match lookup(TIMEOUT_ENV) {
            Some(value) if !value.trim().is_empty() => {
                let secs = value
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidTimeout {
                        value: value.clone(),
                    })?;
                Some(Duration::from_secs(secs))
            }
            _ => None,
        };

        Ok(Self { api_base, timeout })
    }

    pub fn api_base(&self) -> &ApiBase {
        &self.api_base
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Build a [`PingClient`] for this configuration.
    pub fn client(&self) -> Result<PingClient, PingError> {
        let mut builder = PingClient::builder(self.api_base.clone());
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }
}
