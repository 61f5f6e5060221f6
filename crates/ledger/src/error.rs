//! Ledger error types and result alias.
//!
//! Every handler failure maps to a [`LedgerError`]. The service converts it
//! into an error [`Response`](crate::Response) whose message is the error's
//! `Display` text, so the messages here are part of the caller-visible
//! contract.

use points_ledger_storage::StorageError;
use thiserror::Error;

/// Result type alias for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Errors returned by the points ledger service.
///
/// # Non-exhaustive
///
/// New variants may be added without a semver-breaking change. Downstream
/// match expressions must include a wildcard arm (`_ =>`).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LedgerError {
    /// The operation received the wrong number of arguments.
    #[error("Incorrect number of arguments for {operation}. Expecting {expected}, got {actual}")]
    ArgumentCount {
        /// Operation name as invoked.
        operation: &'static str,
        /// Required argument count.
        expected: usize,
        /// Supplied argument count.
        actual: usize,
    },

    /// No record is stored under the key.
    #[error("Could not locate points transaction: {key}")]
    NotFound {
        /// The key that was looked up.
        key: String,
    },

    /// The store failed while reading a record.
    #[error("Failed to read points record {key}")]
    StoreRead {
        /// The key that was being read.
        key: String,
        /// The underlying storage failure.
        #[source]
        source: StorageError,
    },

    /// The store rejected a write.
    #[error("Failed to write points record {key}")]
    StoreWrite {
        /// The key that was being written.
        key: String,
        /// The underlying storage failure.
        #[source]
        source: StorageError,
    },

    /// A range scan failed to open, advance or close. The storage error's
    /// text is part of the message.
    #[error("Failed to scan points records: {source}")]
    StoreScan {
        /// The underlying storage failure.
        #[source]
        source: StorageError,
    },

    /// A record could not be encoded, or stored bytes could not be decoded.
    #[error("Malformed points record {key}")]
    Serialization {
        /// The key of the record being encoded or decoded.
        key: String,
        /// The underlying codec failure.
        #[source]
        source: serde_json::Error,
    },

    /// The function name matches no operation.
    #[error("Invalid function name: {name}")]
    UnknownOperation {
        /// The unrecognized name.
        name: String,
    },

    /// The configured holder policy rejected a transfer target.
    #[error("Holder {holder} is not permitted to receive points")]
    UnauthorizedHolder {
        /// The rejected holder.
        holder: String,
    },
}

impl LedgerError {
    /// Creates a `NotFound` error.
    #[must_use]
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    /// Creates a `StoreRead` error.
    #[must_use]
    pub fn store_read(key: impl Into<String>, source: StorageError) -> Self {
        Self::StoreRead { key: key.into(), source }
    }

    /// Creates a `StoreWrite` error.
    #[must_use]
    pub fn store_write(key: impl Into<String>, source: StorageError) -> Self {
        Self::StoreWrite { key: key.into(), source }
    }

    /// Creates a `Serialization` error.
    #[must_use]
    pub fn serialization(key: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization { key: key.into(), source }
    }

    /// Renders this error followed by each `#[source]` in its chain, joined
    /// by `": "`. A cause already spelled out in the message is not repeated.
    #[must_use]
    pub fn chain(&self) -> String {
        let mut rendered = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            let text = cause.to_string();
            if !rendered.ends_with(&text) {
                rendered.push_str(": ");
                rendered.push_str(&text);
            }
            source = std::error::Error::source(cause);
        }
        rendered
    }

    /// Returns the underlying storage error, if this failure came from the store.
    #[must_use]
    pub fn storage_error(&self) -> Option<&StorageError> {
        match self {
            Self::StoreRead { source, .. }
            | Self::StoreWrite { source, .. }
            | Self::StoreScan { source } => Some(source),
            _ => None,
        }
    }
}

/// Bare storage errors surface as scan failures. Lookups and writes wrap
/// their errors with the key explicitly.
impl From<StorageError> for LedgerError {
    fn from(source: StorageError) -> Self {
        Self::StoreScan { source }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn test_not_found_names_key() {
        let err = LedgerError::not_found("doesnotexist");
        assert_eq!(err.to_string(), "Could not locate points transaction: doesnotexist");
    }

    #[test]
    fn test_store_write_keeps_source_chain() {
        let err = LedgerError::store_write("7", StorageError::connection("peer unavailable"));
        assert_eq!(err.to_string(), "Failed to write points record 7");

        let source = err.source().map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("Connection error: peer unavailable"));
        assert!(matches!(err.storage_error(), Some(StorageError::Connection { .. })));
    }

    #[test]
    fn test_store_scan_message_includes_storage_text() {
        let err = LedgerError::from(StorageError::connection("scan cursor lost"));
        assert_eq!(
            err.to_string(),
            "Failed to scan points records: Connection error: scan cursor lost"
        );
    }

    #[test]
    fn test_chain_appends_sources() {
        let err = LedgerError::store_read("9", StorageError::connection("peer unavailable"));
        assert_eq!(
            err.chain(),
            "Failed to read points record 9: Connection error: peer unavailable"
        );

        let err = LedgerError::not_found("9");
        assert_eq!(err.chain(), err.to_string());

        let err = LedgerError::from(StorageError::connection("scan cursor lost"));
        assert_eq!(err.chain(), err.to_string(), "scan text is not repeated");
    }

    #[test]
    fn test_argument_count_message() {
        let err = LedgerError::ArgumentCount { operation: "queryPoints", expected: 1, actual: 2 };
        assert_eq!(
            err.to_string(),
            "Incorrect number of arguments for queryPoints. Expecting 1, got 2"
        );
        assert!(err.storage_error().is_none());
    }

    #[test]
    fn test_unknown_operation_message() {
        let err = LedgerError::UnknownOperation { name: "burnPoints".into() };
        assert!(err.to_string().to_lowercase().contains("invalid function"));
    }
}
