//! Steam Web API client facade

use crate::config::{ApiKey, ClientConfig};
use crate::error::Result;
use crate::executor::RequestExecutor;
use crate::users::Users;

/// Entry point to the Steam Web API
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct SteamClient {
    executor: RequestExecutor,
}

impl SteamClient {
    /// Create a client with default settings
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(ClientConfig::new(ApiKey::new(api_key)?))
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            executor: RequestExecutor::new(&config)?,
        })
    }

    /// Create a client from `STEAM_API_KEY` and related variables
    pub fn from_env() -> Result<Self> {
        Self::with_config(ClientConfig::from_env()?)
    }

    /// User endpoints
    pub fn users(&self) -> Users<'_> {
        Users::new(&self.executor)
    }

    /// Low-level executor for endpoints without a typed wrapper
    pub fn executor(&self) -> &RequestExecutor {
        &self.executor
    }
}
