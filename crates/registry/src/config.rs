//! Registry client configuration.

use std::time::Duration;

use locator_core::types::DEFAULT_PAGE_SIZE;

/// Public registry base URL.
pub const DEFAULT_BASE_URL: &str = "https://abitus-api.geia.vip";

/// Upper bound on the total time of one registry request.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Base URL value that selects the in-memory sample registry.
pub const STATIC_BASE_URL: &str = "static:";

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} must be a positive integer, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },

    #[error("{key} must not be empty")]
    Empty { key: &'static str },
}

/// Registry client configuration loaded from environment variables.
///
/// All fields have defaults pointing at the public registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Base URL without trailing slash (default: [`DEFAULT_BASE_URL`]).
    pub base_url: String,
    /// Request timeout (default: 15 s).
    pub timeout: Duration,
    /// Records per list page (default: 10).
    pub page_size: u32,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl RegistryConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                       |
    /// |-------------------------|-------------------------------|
    /// | `REGISTRY_BASE_URL`     | `https://abitus-api.geia.vip` |
    /// | `REGISTRY_TIMEOUT_SECS` | `15`                          |
    /// | `REGISTRY_PAGE_SIZE`    | `10`                          |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let base_url = match lookup("REGISTRY_BASE_URL") {
            Some(url) => {
                let url = url.trim().trim_end_matches('/').to_string();
                if url.is_empty() {
                    return Err(ConfigError::Empty {
                        key: "REGISTRY_BASE_URL",
                    });
                }
                url
            }
            None => defaults.base_url,
        };

        let timeout = match lookup("REGISTRY_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(positive("REGISTRY_TIMEOUT_SECS", &raw)?),
            None => defaults.timeout,
        };

        let page_size = match lookup("REGISTRY_PAGE_SIZE") {
            Some(raw) => {
                let n = positive("REGISTRY_PAGE_SIZE", &raw)?;
                u32::try_from(n).map_err(|_| ConfigError::InvalidNumber {
                    key: "REGISTRY_PAGE_SIZE",
                    value: raw.clone(),
                })?
            }
            None => defaults.page_size,
        };

        Ok(Self {
            base_url,
            timeout,
            page_size,
        })
    }

    /// Whether this configuration selects the in-memory sample registry.
    pub fn is_static(&self) -> bool {
        self.base_url == STATIC_BASE_URL
    }
}

fn positive(key: &'static str, raw: &str) -> Result<u64, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidNumber {
            key,
            value: raw.to_string(),
        }),
    }
}
