//! Write limits for ledger keys and encoded records.
//!
//! Ledger keys are short identifiers and records are a handful of short
//! string fields, so the defaults are small. A write that exceeds either
//! limit fails with [`StorageError::SizeLimitExceeded`] naming which part
//! was too large, and nothing is stored.

use crate::{ConfigError, StorageError, StorageResult};

/// Record key limit applied by [`SizeLimits::default`].
pub const DEFAULT_KEY_LIMIT: usize = 64;

/// Encoded record limit applied by [`SizeLimits::default`].
pub const DEFAULT_RECORD_LIMIT: usize = 4 * 1024;

/// Upper bounds on the key and the encoded record of a single write.
///
/// ```
/// use points_ledger_storage::SizeLimits;
///
/// let limits = SizeLimits::new(4, 256).unwrap();
/// assert!(limits.check(b"42", b"{}").is_ok());
/// assert!(limits.check(b"12345", b"{}").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeLimits {
    key: usize,
    record: usize,
}

impl SizeLimits {
    /// Creates limits allowing keys up to `key` bytes and records up to
    /// `record` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::BelowMinimum`] if either limit is zero, since
    /// no ledger write could then succeed.
    pub fn new(key: usize, record: usize) -> Result<Self, ConfigError> {
        for (field, limit) in [("key_limit", key), ("record_limit", record)] {
            if limit == 0 {
                return Err(ConfigError::BelowMinimum {
                    field,
                    min: "1".into(),
                    value: "0".into(),
                });
            }
        }
        Ok(Self { key, record })
    }

    /// Largest accepted key, in bytes.
    #[must_use]
    pub fn key_limit(&self) -> usize {
        self.key
    }

    /// Largest accepted encoded record, in bytes.
    #[must_use]
    pub fn record_limit(&self) -> usize {
        self.record
    }

    /// Checks one write against these limits. The key is checked first.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::SizeLimitExceeded`] with kind `"key"` or
    /// `"value"`.
    pub fn check(&self, key: &[u8], record: &[u8]) -> StorageResult<()> {
        if key.len() > self.key {
            return Err(StorageError::size_limit_exceeded("key", key.len(), self.key));
        }
        if record.len() > self.record {
            return Err(StorageError::size_limit_exceeded("value", record.len(), self.record));
        }
        Ok(())
    }
}

impl Default for SizeLimits {
    fn default() -> Self {
        Self { key: DEFAULT_KEY_LIMIT, record: DEFAULT_RECORD_LIMIT }
    }
}
