//! Client configuration

use crate::error::{Error, Result};
use std::fmt;
use std::time::Duration;

/// Default API origin
pub const DEFAULT_BASE_URL: &str = "https://api.steampowered.com";

/// Default number of attempts per request
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

const ENV_API_KEY: &str = "STEAM_API_KEY";
const ENV_BASE_URL: &str = "STEAM_API_BASE_URL";
const ENV_MAX_ATTEMPTS: &str = "STEAM_MAX_ATTEMPTS";

/// Steam Web API key, sent as the `key` query parameter
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(Error::MissingApiKey);
        }
        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

/// Construction-time settings for [`SteamClient`](crate::SteamClient)
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API key attached to every request
    pub api_key: ApiKey,
    /// Origin that endpoint paths are appended to
    pub base_url: String,
    /// Header overrides merged over the JSON defaults
    pub default_headers: Vec<(String, String)>,
    /// Attempts per request, including the first
    pub max_attempts: u32,
    /// Per-attempt transport timeout; none by default
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            default_headers: Vec::new(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            timeout: None,
        }
    }

    /// Load configuration from `STEAM_API_KEY`, `STEAM_API_BASE_URL` and
    /// `STEAM_MAX_ATTEMPTS`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(ENV_API_KEY).ok_or(Error::MissingApiKey)?;
        let mut config = Self::new(ApiKey::new(api_key)?);

        if let Some(base_url) = lookup(ENV_BASE_URL) {
            config = config.with_base_url(base_url);
        }

        if let Some(raw) = lookup(ENV_MAX_ATTEMPTS) {
            let attempts = raw
                .trim()
                .parse::<u32>()
                .map_err(|_| Error::invalid_config(ENV_MAX_ATTEMPTS, raw.clone()))?;
            config = config.with_max_attempts(attempts);
        }

        Ok(config)
    }

    /// Set the API origin
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Add a header sent on every request, replacing any default of the same name
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// Set the number of attempts per request
    ///
    /// Values below 1 are treated as 1.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Set a transport timeout applied to each attempt
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
