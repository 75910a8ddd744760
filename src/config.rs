//! Storage configuration parsed from environment variables.

use crate::error::ConfigError;

pub const DEFAULT_STORAGE_PREFIX: &str = "petSquare_";
pub const DEFAULT_EVENT_CAPACITY: usize = 256;
/// Matches the per-origin `localStorage` budget of mainstream browsers.
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Namespace prefix applied to every logical key.
    pub prefix: String,
    /// Buffered change events per context before a slow reader starts lagging.
    pub event_capacity: usize,
    /// Byte budget for in-memory stores; `None` disables the check.
    pub quota_bytes: Option<usize>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_STORAGE_PREFIX.to_owned(),
            event_capacity: DEFAULT_EVENT_CAPACITY,
            quota_bytes: Some(DEFAULT_QUOTA_BYTES),
        }
    }
}

impl StorageConfig {
    /// Build typed storage config from environment variables.
    ///
    /// Optional:
    /// - `PET_SQUARE_STORAGE_PREFIX`: default `petSquare_`
    /// - `PET_SQUARE_EVENT_CAPACITY`: default 256, must be non-zero
    /// - `PET_SQUARE_QUOTA_BYTES`: default 5 MiB, `0` disables the quota
    pub fn from_env() -> Result<Self, ConfigError> {
        let prefix = match std::env::var("PET_SQUARE_STORAGE_PREFIX") {
            Ok(prefix) if prefix.is_empty() => {
                return Err(ConfigError::Empty { var: "PET_SQUARE_STORAGE_PREFIX" });
            }
            Ok(prefix) => prefix,
            Err(_) => DEFAULT_STORAGE_PREFIX.to_owned(),
        };

        let event_capacity = env_parse_usize("PET_SQUARE_EVENT_CAPACITY", DEFAULT_EVENT_CAPACITY)?;
        if event_capacity == 0 {
            return Err(ConfigError::Zero { var: "PET_SQUARE_EVENT_CAPACITY" });
        }

        let quota_bytes = match env_parse_usize("PET_SQUARE_QUOTA_BYTES", DEFAULT_QUOTA_BYTES)? {
            0 => None,
            limit => Some(limit),
        };

        Ok(Self { prefix, event_capacity, quota_bytes })
    }

    /// Same defaults with a different namespace prefix.
    #[must_use]
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into(), ..Self::default() }
    }
}

fn env_parse_usize(var: &'static str, default: usize) -> Result<usize, ConfigError> {
    match std::env::var(var) {
        Ok(value) => value
            .trim()
            .parse::<usize>()
            .map_err(|_| ConfigError::InvalidNumber { var, value }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
