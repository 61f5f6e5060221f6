//! Storage error types and result alias.
//!
//! All storage backends map their internal failures to [`StorageError`], so
//! the ledger service can treat a failed lookup, write or scan uniformly
//! regardless of which world-state store sits underneath.
//!
//! # Error Types
//!
//! - [`StorageError::Connection`] - The world-state store could not be reached
//!   or refused the operation
//! - [`StorageError::SizeLimitExceeded`] - Key or value rejected by size limits
//!
//! A missing key is not an error at this layer: lookups return `Ok(None)`.
//!
//! # Example
//!
//! ```
//! use points_ledger_storage::{StorageError, StorageResult};
//!
//! fn unreachable_store() -> StorageResult<Vec<u8>> {
//!     Err(StorageError::connection("peer unavailable"))
//! }
//! ```

use thiserror::Error;

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations.
///
/// # Non-exhaustive
///
/// Platform adapters may need further variants. Downstream match
/// expressions must include a wildcard arm (`_ =>`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum StorageError {
    /// The backend could not complete the call against the world-state store.
    #[error("Connection error: {message}")]
    Connection {
        /// What the backend reported.
        message: String,
    },

    /// A key or value exceeded the backend's configured size limit.
    #[error("{kind} size {actual} exceeds limit of {limit} bytes")]
    SizeLimitExceeded {
        /// Which part of the write was rejected (`"key"` or `"value"`).
        kind: &'static str,
        /// Size of the rejected payload in bytes.
        actual: usize,
        /// Configured maximum in bytes.
        limit: usize,
    },
}

impl StorageError {
    /// Creates a new `Connection` error with the given message.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection { message: message.into() }
    }

    /// Creates a new `SizeLimitExceeded` error.
    #[must_use]
    pub fn size_limit_exceeded(kind: &'static str, actual: usize, limit: usize) -> Self {
        Self::SizeLimitExceeded { kind, actual, limit }
    }
}

/// Errors raised while validating configuration values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A numeric setting is below its allowed minimum.
    #[error("{field} must be at least {min}, got {value}")]
    BelowMinimum {
        /// Name of the offending field.
        field: &'static str,
        /// Smallest accepted value.
        min: String,
        /// Value that was supplied.
        value: String,
    },

    /// A setting is structurally invalid.
    #[error("{field} is invalid: {reason}")]
    Invalid {
        /// Name of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

impl ConfigError {
    /// Creates a new `Invalid` error.
    #[must_use]
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid { field, reason: reason.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_message() {
        let err = StorageError::connection("peer unavailable");
        assert_eq!(err.to_string(), "Connection error: peer unavailable");
    }

    #[test]
    fn test_size_limit_message_names_kind() {
        let err = StorageError::size_limit_exceeded("key", 600, 512);
        assert_eq!(err.to_string(), "key size 600 exceeds limit of 512 bytes");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::invalid("scan_end", "must sort after scan_start");
        assert_eq!(err.to_string(), "scan_end is invalid: must sort after scan_start");
    }
}
