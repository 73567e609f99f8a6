//! Client settings resolution.
//!
//! Each setting is resolved in order:
//! 1. Value passed to the builder
//! 2. Environment variable
//! 3. Built-in default

use std::time::Duration;

use tracing::warn;

use crate::error::{Error, Result};

/// Production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://chat.stream-io-api.com";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

pub const ENV_API_KEY: &str = "STREAM_KEY";
pub const ENV_API_SECRET: &str = "STREAM_SECRET";
pub const ENV_TIMEOUT: &str = "STREAM_CHAT_TIMEOUT";
pub const ENV_LOCAL_PORT: &str = "STREAM_LOCAL_API_PORT";

/// Base URL variables, checked in this order.
pub const ENV_BASE_URLS: [&str; 3] = ["STREAM_CHAT_URL", "STREAM_BASE_CHAT_URL", "STREAM_BASE_URL"];

/// Settings as passed to the builder; unset fields fall back to the environment.
#[derive(Clone, Default)]
pub struct ClientSettings {
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub base_url: Option<String>,
    pub timeout: Option<Duration>,
}

impl std::fmt::Debug for ClientSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientSettings")
            .field("api_key", &self.api_key)
            .field("api_secret", &self.api_secret.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Fully resolved settings.
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedSettings {
    pub api_key: String,
    pub api_secret: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for ResolvedSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedSettings")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ClientSettings {
    /// Resolve against the process environment.
    pub fn resolve(self) -> Result<ResolvedSettings> {
        self.resolve_with(|name| std::env::var(name).ok())
    }

    /// Resolve against an arbitrary variable lookup.
    pub fn resolve_with<F>(self, lookup: F) -> Result<ResolvedSettings>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let api_key = self.api_key.filter(|k| !k.is_empty()).or_else(|| env(ENV_API_KEY));
        let api_secret = self
            .api_secret
            .filter(|s| !s.is_empty())
            .or_else(|| env(ENV_API_SECRET));
        let (Some(api_key), Some(api_secret)) = (api_key, api_secret) else {
            return Err(Error::Config("API key and secret are required.".to_string()));
        };

        let timeout = match self.timeout {
            Some(timeout) => timeout,
            None => env(ENV_TIMEOUT)
                .and_then(|raw| match parse_timeout(&raw) {
                    Some(timeout) => Some(timeout),
                    None => {
                        warn!(value = %raw, "ignoring invalid {}", ENV_TIMEOUT);
                        None
                    }
                })
                .unwrap_or(DEFAULT_TIMEOUT),
        };

        let base_url = self
            .base_url
            .or_else(|| ENV_BASE_URLS.iter().find_map(|name| env(*name)))
            .or_else(|| env(ENV_LOCAL_PORT).map(|port| format!("http://localhost:{}", port)))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(ResolvedSettings {
            api_key,
            api_secret,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }
}

fn parse_timeout(raw: &str) -> Option<Duration> {
    let secs: f64 = raw.trim().parse().ok()?;
    Duration::try_from_secs_f64(secs).ok().filter(|d| !d.is_zero())
}
