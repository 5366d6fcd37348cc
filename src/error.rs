//! Error types for session-scope.

use thiserror::Error;

/// Main error type for session operations.
#[derive(Error, Debug)]
pub enum SessionError {
    /// The backing storage is already active.
    ///
    /// Surfaced by [`crate::storage::SessionStorage::activate`] on a
    /// double-start; [`crate::SessionStore::start`] downgrades it to a
    /// warning.
    #[error("session storage already active")]
    AlreadyActive,

    /// The backing storage failed to activate.
    #[error("storage activation failed: {0}")]
    Activation(String),

    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// Convenience Result type for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;
