//! Storage backend trait definition.
//!
//! This module defines the [`StorageBackend`] trait, the contract the points
//! ledger consumes from its hosting platform's world-state store.
//!
//! # Design Philosophy
//!
//! The trait is deliberately minimal:
//! - **Keys and values are bytes**: No assumptions about serialization format
//! - **Async by default**: Every call into the store is a suspension point
//! - **Absent is not an error**: Lookups of missing keys return `Ok(None)`
//! - **Scans are lazy and scoped**: [`RangeScan`] handles are released on drop
//!
//! Record semantics (serialization, dispatch, seeding) live in the ledger
//! service built on top of this trait, not in the storage backends.
//!
//! # Implementing a Backend
//!
//! 1. Implement the [`StorageBackend`] trait
//! 2. Implement a corresponding [`RangeScan`] type
//! 3. Map backend-specific errors to [`StorageError`](crate::StorageError)
//! 4. Run the [`conformance`](crate::conformance) suite against it
//!
//! See [`MemoryBackend`](crate::MemoryBackend) for a reference implementation.

use async_trait::async_trait;
use bytes::Bytes;

use crate::{error::StorageResult, scan::RangeScan};

/// Abstract world-state store for key-value operations.
///
/// Backends are expected to be thread-safe (`Send + Sync`).
///
/// # Key Operations
///
/// | Method | Description |
/// |--------|-------------|
/// | [`get`](StorageBackend::get) | Retrieve a single value by key |
/// | [`set`](StorageBackend::set) | Store (or overwrite) a key-value pair |
/// | [`range_scan`](StorageBackend::range_scan) | Open an ordered scan over `[start, end)` |
///
/// # Example
///
/// ```
/// use bytes::Bytes;
/// use points_ledger_storage::{MemoryBackend, StorageBackend};
///
/// # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
/// let backend = MemoryBackend::new();
///
/// backend.set(b"1".to_vec(), b"{}".to_vec()).await.unwrap();
/// let value = backend.get(b"1").await.unwrap();
/// assert_eq!(value, Some(Bytes::from("{}")));
/// # });
/// ```
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Retrieves a value by key.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(bytes))` if the key exists
    /// - `Ok(None)` if the key doesn't exist
    /// - `Err(...)` on storage errors
    #[must_use = "storage operations may fail and errors must be handled"]
    async fn get(&self, key: &[u8]) -> StorageResult<Option<Bytes>>;

    /// Stores a key-value pair.
    ///
    /// If the key already exists, its value is overwritten.
    #[must_use = "storage operations may fail and errors must be handled"]
    async fn set(&self, key: Vec<u8>, value: Vec<u8>) -> StorageResult<()>;

    /// Opens a lazy scan over all keys in `[start, end)`.
    ///
    /// Entries are yielded in ascending lexicographic byte order. The range
    /// compares bytes, not numbers: with bounds `"0".."999"`, key `"10"` is
    /// yielded before key `"2"`. A range whose `start` is not below `end`
    /// yields nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend could not open the scan. Failures
    /// while advancing surface from [`RangeScan::next`].
    #[must_use = "storage operations may fail and errors must be handled"]
    async fn range_scan(&self, start: &[u8], end: &[u8]) -> StorageResult<Box<dyn RangeScan>>;
}

#[async_trait]
impl<B> StorageBackend for std::sync::Arc<B>
where
    B: StorageBackend + ?Sized,
{
    async fn get(&self, key: &[u8]) -> StorageResult<Option<Bytes>> {
        (**self).get(key).await
    }

    async fn set(&self, key: Vec<u8>, value: Vec<u8>) -> StorageResult<()> {
        (**self).set(key, value).await
    }

    async fn range_scan(&self, start: &[u8], end: &[u8]) -> StorageResult<Box<dyn RangeScan>> {
        (**self).range_scan(start, end).await
    }
}
