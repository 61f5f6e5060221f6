//! In-memory storage backend implementation.
//!
//! This module provides [`MemoryBackend`], an in-memory implementation of
//! [`StorageBackend`] suitable for testing, development, and embedding the
//! ledger service without a hosting platform.
//!
//! # Features
//!
//! - **Thread-safe**: Uses [`parking_lot::RwLock`] for concurrent access
//! - **Ordered storage**: Keys are stored in a [`BTreeMap`] for range scans
//! - **Cursor scans**: Each [`RangeScan::next`] call resumes after the last
//!   yielded key, so scans never hold the lock between steps
//! - **Scan accounting**: [`MemoryBackend::open_scans`] reports unreleased handles
//! - **Size limits**: Optional [`SizeLimits`] enforced on every write
//!
//! # Example
//!
//! ```
//! use points_ledger_storage::{MemoryBackend, StorageBackend};
//!
//! #[tokio::main]
//! async fn main() {
//!     let backend = MemoryBackend::new();
//!
//!     backend.set(b"7".to_vec(), b"record".to_vec()).await.unwrap();
//!     let value = backend.get(b"7").await.unwrap();
//!
//!     assert_eq!(value.unwrap().as_ref(), b"record");
//! }
//! ```
//!
//! # Performance Characteristics
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | get | O(log n) |
//! | set | O(log n) |
//! | scan step | O(log n) |
//!
//! # Limitations
//!
//! - Data is not persisted; all data is lost when the process exits
//! - No versioning: concurrent writers to the same key race, last write wins

use std::{
    collections::BTreeMap,
    ops::Bound,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::RwLock;

use crate::{
    backend::StorageBackend,
    error::{StorageError, StorageResult},
    scan::RangeScan,
    size_limits::SizeLimits,
    types::KeyValue,
};

type Store = Arc<RwLock<BTreeMap<Vec<u8>, Bytes>>>;

/// In-memory storage backend using [`BTreeMap`].
///
/// # Cloning
///
/// `MemoryBackend` is cheaply cloneable via [`Arc`]. All clones share the
/// same underlying data store and the same open-scan counter.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    data: Store,
    open_scans: Arc<AtomicUsize>,
    limits: Option<SizeLimits>,
}

impl MemoryBackend {
    /// Creates a new, empty in-memory backend with no size limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new, empty backend that rejects writes exceeding `limits`.
    ///
    /// # Example
    ///
    /// ```
    /// use points_ledger_storage::{MemoryBackend, SizeLimits, StorageBackend, StorageError};
    ///
    /// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
    /// let backend = MemoryBackend::with_size_limits(SizeLimits::new(4, 8).unwrap());
    /// let result = backend.set(b"12345".to_vec(), b"{}".to_vec()).await;
    /// assert!(matches!(result, Err(StorageError::SizeLimitExceeded { .. })));
    /// # });
    /// ```
    #[must_use]
    pub fn with_size_limits(limits: SizeLimits) -> Self {
        Self { limits: Some(limits), ..Self::default() }
    }

    /// Returns the number of scan handles that have been opened but not yet
    /// closed or dropped.
    #[must_use]
    pub fn open_scans(&self) -> usize {
        self.open_scans.load(Ordering::Acquire)
    }

    /// Returns the number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Returns `true` if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    #[tracing::instrument(skip(self, key), fields(key_len = key.len()))]
    async fn get(&self, key: &[u8]) -> StorageResult<Option<Bytes>> {
        fail::fail_point!("memory-get", |_| Err(StorageError::connection("injected get failure")));

        let data = self.data.read();
        Ok(data.get(key).cloned())
    }

    #[tracing::instrument(skip(self, key, value), fields(key_len = key.len(), value_len = value.len()))]
    async fn set(&self, key: Vec<u8>, value: Vec<u8>) -> StorageResult<()> {
        fail::fail_point!("memory-set", |_| Err(StorageError::connection("injected set failure")));

        if let Some(limits) = &self.limits {
            limits.check(&key, &value)?;
        }

        let mut data = self.data.write();
        data.insert(key, Bytes::from(value));
        Ok(())
    }

    #[tracing::instrument(skip(self, start, end))]
    async fn range_scan(&self, start: &[u8], end: &[u8]) -> StorageResult<Box<dyn RangeScan>> {
        fail::fail_point!("range-scan-open", |_| {
            Err(StorageError::connection("injected range scan open failure"))
        });

        Ok(Box::new(MemoryScan {
            data: Arc::clone(&self.data),
            cursor: Cursor::Start(start.to_vec()),
            end: end.to_vec(),
            lease: ScanLease::acquire(Arc::clone(&self.open_scans)),
        }))
    }
}

/// Position of a [`MemoryScan`] within its range.
#[derive(Debug, Clone)]
enum Cursor {
    /// Nothing yielded yet; the start bound is inclusive.
    Start(Vec<u8>),
    /// Resume strictly after this key.
    After(Vec<u8>),
    /// Range exhausted.
    Done,
}

/// Counts a scan as open until released. Releasing twice is a no-op.
struct ScanLease {
    open_scans: Arc<AtomicUsize>,
    released: bool,
}

impl ScanLease {
    fn acquire(open_scans: Arc<AtomicUsize>) -> Self {
        open_scans.fetch_add(1, Ordering::AcqRel);
        Self { open_scans, released: false }
    }

    fn release(&mut self) {
        if !self.released {
            self.released = true;
            self.open_scans.fetch_sub(1, Ordering::AcqRel);
        }
    }
}

impl Drop for ScanLease {
    fn drop(&mut self) {
        self.release();
    }
}

/// Cursor-based scan over a [`MemoryBackend`].
///
/// The read lock is taken only for the duration of each step, so writes
/// interleaved with a scan are visible if they land ahead of the cursor.
struct MemoryScan {
    data: Store,
    cursor: Cursor,
    end: Vec<u8>,
    lease: ScanLease,
}

impl MemoryScan {
    fn step(&self) -> Option<KeyValue> {
        let lower = match &self.cursor {
            Cursor::Start(key) => Bound::Included(key.as_slice()),
            Cursor::After(key) => Bound::Excluded(key.as_slice()),
            Cursor::Done => return None,
        };

        // BTreeMap::range panics on inverted bounds; an empty window yields nothing.
        let (Bound::Included(from) | Bound::Excluded(from)) = lower else {
            return None;
        };
        if from >= self.end.as_slice() {
            return None;
        }

        let data = self.data.read();
        data.range::<[u8], _>((lower, Bound::Excluded(self.end.as_slice())))
            .next()
            .map(|(k, v)| KeyValue::new(Bytes::copy_from_slice(k), v.clone()))
    }
}

#[async_trait]
impl RangeScan for MemoryScan {
    async fn next(&mut self) -> StorageResult<Option<KeyValue>> {
        fail::fail_point!("range-scan-next", |_| {
            Err(StorageError::connection("injected range scan advance failure"))
        });

        match self.step() {
            Some(entry) => {
                self.cursor = Cursor::After(entry.key.to_vec());
                Ok(Some(entry))
            },
            None => {
                self.cursor = Cursor::Done;
                Ok(None)
            },
        }
    }

    async fn close(mut self: Box<Self>) -> StorageResult<()> {
        self.lease.release();
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::scan::collect_scan;

    async fn keys_in(backend: &MemoryBackend, start: &[u8], end: &[u8]) -> Vec<Bytes> {
        let scan = backend.range_scan(start, end).await.unwrap();
        collect_scan(scan).await.unwrap().into_iter().map(|kv| kv.key).collect()
    }

    #[tokio::test]
    async fn test_basic_operations() {
        let backend = MemoryBackend::new();

        backend.set(b"key1".to_vec(), b"value1".to_vec()).await.unwrap();
        let value = backend.get(b"key1").await.unwrap();
        assert_eq!(value, Some(Bytes::from("value1")));

        assert_eq!(backend.get(b"missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let backend = MemoryBackend::new();

        backend.set(b"1".to_vec(), b"old".to_vec()).await.unwrap();
        backend.set(b"1".to_vec(), b"new".to_vec()).await.unwrap();

        assert_eq!(backend.get(b"1").await.unwrap(), Some(Bytes::from("new")));
        assert_eq!(backend.len(), 1);
    }

    #[tokio::test]
    async fn test_scan_is_lexicographic() {
        let backend = MemoryBackend::new();
        for key in ["2", "10", "1", "100", "9"] {
            backend.set(key.as_bytes().to_vec(), b"v".to_vec()).await.unwrap();
        }

        let keys = keys_in(&backend, b"0", b"999").await;
        assert_eq!(keys, vec!["1", "10", "100", "2", "9"]);
    }

    #[tokio::test]
    async fn test_scan_bounds_are_half_open() {
        let backend = MemoryBackend::new();
        for key in ["0", "5", "999", "9990"] {
            backend.set(key.as_bytes().to_vec(), b"v".to_vec()).await.unwrap();
        }

        let keys = keys_in(&backend, b"0", b"999").await;
        assert_eq!(keys, vec!["0", "5"]);
    }

    #[tokio::test]
    async fn test_inverted_range_is_empty() {
        let backend = MemoryBackend::new();
        backend.set(b"5".to_vec(), b"v".to_vec()).await.unwrap();

        assert!(keys_in(&backend, b"9", b"1").await.is_empty());
        assert!(keys_in(&backend, b"5", b"5").await.is_empty());
    }

    #[tokio::test]
    async fn test_scan_sees_writes_ahead_of_cursor() {
        let backend = MemoryBackend::new();
        backend.set(b"1".to_vec(), b"v".to_vec()).await.unwrap();
        backend.set(b"3".to_vec(), b"v".to_vec()).await.unwrap();

        let mut scan = backend.range_scan(b"0", b"999").await.unwrap();
        assert_eq!(scan.next().await.unwrap().unwrap().key, Bytes::from("1"));

        backend.set(b"2".to_vec(), b"v".to_vec()).await.unwrap();
        assert_eq!(scan.next().await.unwrap().unwrap().key, Bytes::from("2"));
        assert_eq!(scan.next().await.unwrap().unwrap().key, Bytes::from("3"));
        assert!(scan.next().await.unwrap().is_none());
        assert!(scan.next().await.unwrap().is_none(), "exhausted scans stay exhausted");
        scan.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_close_releases_scan() {
        let backend = MemoryBackend::new();
        backend.set(b"1".to_vec(), b"v".to_vec()).await.unwrap();

        let scan = backend.range_scan(b"0", b"999").await.unwrap();
        assert_eq!(backend.open_scans(), 1);

        scan.close().await.unwrap();
        assert_eq!(backend.open_scans(), 0);
    }

    #[tokio::test]
    async fn test_drop_releases_scan() {
        let backend = MemoryBackend::new();
        backend.set(b"1".to_vec(), b"v".to_vec()).await.unwrap();

        let mut scan = backend.range_scan(b"0", b"999").await.unwrap();
        let _ = scan.next().await.unwrap();
        assert_eq!(backend.open_scans(), 1);

        drop(scan);
        assert_eq!(backend.open_scans(), 0);
    }

    #[tokio::test]
    async fn test_size_limits_reject_oversized_value() {
        let backend = MemoryBackend::with_size_limits(SizeLimits::new(8, 4).unwrap());

        let result = backend.set(b"1".to_vec(), b"too long".to_vec()).await;
        assert!(matches!(
            result,
            Err(StorageError::SizeLimitExceeded { kind: "value", actual: 8, limit: 4 })
        ));
        assert!(backend.is_empty(), "rejected writes must not land");
    }

    #[tokio::test]
    async fn test_clone_shares_data() {
        let backend1 = MemoryBackend::new();
        let backend2 = backend1.clone();

        backend1.set(b"key".to_vec(), b"value".to_vec()).await.unwrap();

        let value = backend2.get(b"key").await.unwrap();
        assert_eq!(value, Some(Bytes::from("value")));
    }

    mod proptests {
        use proptest::prelude::*;

        use super::*;

        /// Strategy for short ASCII-digit keys, the shape ledger keys take.
        fn arb_keys() -> impl Strategy<Value = Vec<String>> {
            proptest::collection::vec("[0-9]{1,4}", 0..30)
        }

        proptest! {
            /// Every scanned key falls within `[start, end)`, results are
            /// sorted, and the count matches a direct filter of the inputs.
            #[test]
            fn scan_matches_filtered_sorted_keys(
                keys in arb_keys(),
                a in "[0-9]{1,3}",
                b in "[0-9]{1,3}",
            ) {
                let rt = tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                    .expect("runtime");

                rt.block_on(async {
                    let backend = MemoryBackend::new();
                    for key in &keys {
                        backend.set(key.as_bytes().to_vec(), b"v".to_vec()).await.unwrap();
                    }

                    let scanned: Vec<String> = keys_in(&backend, a.as_bytes(), b.as_bytes())
                        .await
                        .into_iter()
                        .map(|k| String::from_utf8(k.to_vec()).unwrap())
                        .collect();

                    let mut expected: Vec<String> = keys
                        .iter()
                        .filter(|k| k.as_str() >= a.as_str() && k.as_str() < b.as_str())
                        .cloned()
                        .collect();
                    expected.sort();
                    expected.dedup();

                    prop_assert_eq!(scanned, expected);
                    prop_assert_eq!(backend.open_scans(), 0);
                    Ok(())
                })?;
            }
        }
    }
}
