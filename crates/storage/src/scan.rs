//! Range scan handles.
//!
//! A range scan is an ordered, lazy walk over the keys in `[start, end)`.
//! Backends hand out scans as boxed [`RangeScan`] trait objects; the caller
//! pulls entries one at a time and releases the handle when done.
//!
//! # Release
//!
//! Every scan handle holds backend resources (a snapshot, a cursor, a
//! server-side iterator). Release happens on every exit path:
//!
//! - [`RangeScan::close`] releases explicitly and reports release failures.
//! - Dropping the handle releases it silently. This covers early returns via
//!   `?` in the middle of an iteration.
//!
//! ```
//! use points_ledger_storage::{MemoryBackend, StorageBackend, StorageResult};
//!
//! async fn count_keys(backend: &MemoryBackend) -> StorageResult<usize> {
//!     let mut scan = backend.range_scan(b"0", b"999").await?;
//!     let mut count = 0;
//!     while let Some(_entry) = scan.next().await? {
//!         count += 1;
//!     }
//!     scan.close().await?;
//!     Ok(count)
//! }
//! ```

use async_trait::async_trait;

use crate::{error::StorageResult, types::KeyValue};

/// A lazily evaluated, ascending iteration over a key range.
#[async_trait]
pub trait RangeScan: Send {
    /// Advances the scan.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(entry))` for the next key in ascending order
    /// - `Ok(None)` once the range is exhausted (and on every call after)
    /// - `Err(...)` if the backend failed to advance
    #[must_use = "storage operations may fail and errors must be handled"]
    async fn next(&mut self) -> StorageResult<Option<KeyValue>>;

    /// Releases the scan handle.
    ///
    /// Closing before the range is exhausted is allowed.
    #[must_use = "storage operations may fail and errors must be handled"]
    async fn close(self: Box<Self>) -> StorageResult<()>;
}

/// Drains a scan into a vector, closing it afterwards.
///
/// On an advance failure the handle is dropped (and therefore released)
/// before the error is returned.
pub async fn collect_scan(mut scan: Box<dyn RangeScan>) -> StorageResult<Vec<KeyValue>> {
    let mut entries = Vec::new();
    while let Some(entry) = scan.next().await? {
        entries.push(entry);
    }
    scan.close().await?;
    Ok(entries)
}
