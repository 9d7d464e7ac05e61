//! Facade configuration.

use serde::{Deserialize, Serialize};

/// Environment variable read by [`ApiConfig::from_env`].
pub const ENDPOINT_ENV: &str = "SIMPLY_API_ENDPOINT";

/// Configuration applied once when a [`SimplyApi`](crate::api::SimplyApi) is built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Prefixed to every relative URL. Absent means URLs are used as given.
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl ApiConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: Some(endpoint.into()),
        }
    }

    /// Reads the endpoint from `SIMPLY_API_ENDPOINT`; unset or empty means no endpoint.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            endpoint: lookup(ENDPOINT_ENV).filter(|endpoint| !endpoint.is_empty()),
        }
    }
}
