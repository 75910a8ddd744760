//! Error types for storage areas, configuration and form validation.
//!
//! ERROR HANDLING
//! ==============
//! These errors surface from storage areas and from the fallible gateway
//! entry points (`Storage::try_set`, `FileArea::open`). The gateway's
//! `get`/`set`/`remove`/`clear` absorb them and log instead.

/// Failure reported by a [`StorageArea`](crate::area::StorageArea).
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The write would push the store past its byte quota.
    #[error("storage quota exceeded writing `{key}`: {needed} bytes needed, limit {limit}")]
    QuotaExceeded { key: String, needed: usize, limit: usize },
    /// The store cannot be accessed at all (disabled, poisoned, no window).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    /// Reading or writing a backing file failed.
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    /// A value could not be encoded, or a backing file did not hold a JSON
    /// object of strings.
    #[error("storage json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Invalid value in a `PET_SQUARE_*` environment variable.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be an unsigned integer, got `{value}`")]
    InvalidNumber { var: &'static str, value: String },
    #[error("{var} must be greater than zero")]
    Zero { var: &'static str },
    #[error("{var} must not be empty")]
    Empty { var: &'static str },
}

/// Sign-up form rejected before any state is written.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignUpError {
    #[error("passwords don't match")]
    PasswordMismatch,
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
}
