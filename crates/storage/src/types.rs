//! Common types used across storage operations.

use bytes::Bytes;

/// Key-value pair yielded by range scans.
///
/// # Examples
///
/// ```
/// use bytes::Bytes;
/// use points_ledger_storage::KeyValue;
///
/// let kv = KeyValue::new(Bytes::from("1"), Bytes::from(r#"{"holder":"Miriam"}"#));
/// assert_eq!(kv.key_str(), "1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    /// The key identifying this entry.
    pub key: Bytes,

    /// The value stored at this key.
    pub value: Bytes,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: Bytes, value: Bytes) -> Self {
        Self { key, value }
    }

    /// Returns the key as text, replacing invalid UTF-8 sequences.
    ///
    /// Ledger keys are always written from strings, so the lossy path only
    /// matters for foreign data placed in the store by other writers.
    #[must_use]
    pub fn key_str(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.key)
    }
}
