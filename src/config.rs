use std::time::Duration;

use serde::Deserialize;

// =============================================================================
// Time-related constants
// =============================================================================

/// Default connect timeout in milliseconds (10 seconds)
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 10_000;

/// Default read timeout in milliseconds (30 seconds)
///
/// Governs how long a single curation lookup may block before it is
/// abandoned and treated as "no data".
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 30_000;

/// Default expiration for cached curation results in hours (24 hours)
pub const DEFAULT_CACHE_EXPIRATION_HOURS: u64 = 24;

/// Delay between starting each lookup request to avoid rate limiting (10ms)
pub const FETCH_STAGGER_DELAY_MS: u64 = 10;

/// Configuration for a curation provider backend
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ProviderConfig {
    /// Base URL of the curation service
    pub server_url: String,
    pub timeouts: TimeoutConfig,
    pub cache: CacheConfig,
    /// Optional credentials for password-protected endpoints
    pub credentials: Option<Credentials>,
}

/// Timeout-related configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct TimeoutConfig {
    /// Connect timeout in milliseconds
    pub connect_timeout: u64,
    /// Read timeout in milliseconds
    pub read_timeout: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_timeout: DEFAULT_CONNECT_TIMEOUT_MS,
            read_timeout: DEFAULT_READ_TIMEOUT_MS,
        }
    }
}

/// Cache-related configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct CacheConfig {
    /// Expiration for cached curation results in hours
    pub expiration_hours: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            expiration_hours: DEFAULT_CACHE_EXPIRATION_HOURS,
        }
    }
}

/// Credentials for a password-protected curation service
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl ProviderConfig {
    /// Creates a configuration pointing at the given server with default
    /// timeouts and cache expiration.
    pub fn for_server(server_url: &str) -> Self {
        Self {
            server_url: server_url.to_string(),
            ..Self::default()
        }
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.timeouts.connect_timeout)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.timeouts.read_timeout)
    }

    pub fn cache_expiration(&self) -> Duration {
        Duration::from_secs(self.cache.expiration_hours * 3600)
    }
}
