//! Shared test utilities for storage backend testing.
//!
//! This module provides a failure-injecting backend wrapper, helpers for
//! building populated backends, and assertion macros for [`StorageResult`]
//! values. It is feature-gated behind `testutil` to prevent leaking into
//! production builds.
//!
//! # Usage
//!
//! In integration tests, enable the feature in `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! points-ledger-storage = { workspace = true, features = ["testutil"] }
//! ```
//!
//! Then import helpers:
//!
//! ```no_run
//! // Requires the `testutil` feature to be enabled.
//! use points_ledger_storage::testutil::{FailingBackend, populated_backend};
//! ```

use std::{
    collections::HashSet,
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::RwLock;

use crate::{
    StorageBackend,
    error::{StorageError, StorageResult},
    memory::MemoryBackend,
    scan::RangeScan,
    types::KeyValue,
};

/// Sentinel for "never fail while advancing a scan".
const NEVER: usize = usize::MAX;

/// Create a [`MemoryBackend`] pre-populated with the given key/value pairs.
///
/// # Panics
///
/// Panics if any `set` operation fails (should not happen with `MemoryBackend`).
pub async fn populated_backend<'a>(
    entries: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> MemoryBackend {
    let backend = MemoryBackend::new();
    for (key, value) in entries {
        backend
            .set(key.as_bytes().to_vec(), value.as_bytes().to_vec())
            .await
            .expect("populate set failed");
    }
    backend
}

/// A wrapper around any [`StorageBackend`] that injects failures on demand.
///
/// All switches are shared between clones, so a test can hand one clone to
/// the code under test and flip failures on the other.
///
/// | Switch | Effect |
/// |--------|--------|
/// | [`fail_reads`](Self::fail_reads) | every `get` returns `Connection` |
/// | [`fail_writes`](Self::fail_writes) | every `set` returns `Connection` |
/// | [`fail_writes_to`](Self::fail_writes_to) | `set` on that key returns `Connection` |
/// | [`fail_scan_open`](Self::fail_scan_open) | `range_scan` returns `Connection` |
/// | [`fail_scan_after`](Self::fail_scan_after) | the scan fails after yielding `n` entries |
///
/// Injected failures never touch the inner backend.
#[derive(Clone)]
pub struct FailingBackend<B> {
    inner: B,
    reads: Arc<AtomicBool>,
    writes: Arc<AtomicBool>,
    write_keys: Arc<RwLock<HashSet<Vec<u8>>>>,
    scan_open: Arc<AtomicBool>,
    scan_after: Arc<AtomicUsize>,
    write_attempts: Arc<AtomicUsize>,
}

impl<B: StorageBackend> FailingBackend<B> {
    /// Wraps `inner` with all failures switched off.
    pub fn new(inner: B) -> Self {
        Self {
            inner,
            reads: Arc::new(AtomicBool::new(false)),
            writes: Arc::new(AtomicBool::new(false)),
            write_keys: Arc::new(RwLock::new(HashSet::new())),
            scan_open: Arc::new(AtomicBool::new(false)),
            scan_after: Arc::new(AtomicUsize::new(NEVER)),
            write_attempts: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Returns the wrapped backend.
    pub fn inner(&self) -> &B {
        &self.inner
    }

    /// Makes every subsequent `get` fail.
    pub fn fail_reads(&self, enabled: bool) {
        self.reads.store(enabled, Ordering::Release);
    }

    /// Makes every subsequent `set` fail.
    pub fn fail_writes(&self, enabled: bool) {
        self.writes.store(enabled, Ordering::Release);
    }

    /// Makes `set` fail for one specific key.
    pub fn fail_writes_to(&self, key: impl AsRef<[u8]>) {
        self.write_keys.write().insert(key.as_ref().to_vec());
    }

    /// Makes every subsequent `range_scan` call fail to open.
    pub fn fail_scan_open(&self, enabled: bool) {
        self.scan_open.store(enabled, Ordering::Release);
    }

    /// Makes scans opened from now on fail after yielding `entries` entries.
    pub fn fail_scan_after(&self, entries: usize) {
        self.scan_after.store(entries, Ordering::Release);
    }

    /// Returns how many `set` calls were attempted, including failed ones.
    pub fn write_attempts(&self) -> usize {
        self.write_attempts.load(Ordering::Acquire)
    }
}

#[async_trait]
impl<B: StorageBackend> StorageBackend for FailingBackend<B> {
    async fn get(&self, key: &[u8]) -> StorageResult<Option<Bytes>> {
        if self.reads.load(Ordering::Acquire) {
            return Err(StorageError::connection("simulated read failure"));
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: Vec<u8>, value: Vec<u8>) -> StorageResult<()> {
        self.write_attempts.fetch_add(1, Ordering::AcqRel);
        if self.writes.load(Ordering::Acquire) || self.write_keys.read().contains(&key) {
            return Err(StorageError::connection("simulated write failure"));
        }
        self.inner.set(key, value).await
    }

    async fn range_scan(&self, start: &[u8], end: &[u8]) -> StorageResult<Box<dyn RangeScan>> {
        if self.scan_open.load(Ordering::Acquire) {
            return Err(StorageError::connection("simulated scan open failure"));
        }
        let inner = self.inner.range_scan(start, end).await?;
        let remaining = self.scan_after.load(Ordering::Acquire);
        Ok(Box::new(FailingScan { inner, remaining }))
    }
}

/// Scan wrapper that fails once its budget of entries is spent.
struct FailingScan {
    inner: Box<dyn RangeScan>,
    remaining: usize,
}

#[async_trait]
impl RangeScan for FailingScan {
    async fn next(&mut self) -> StorageResult<Option<KeyValue>> {
        if self.remaining == 0 {
            return Err(StorageError::connection("simulated scan advance failure"));
        }
        if self.remaining != NEVER {
            self.remaining -= 1;
        }
        self.inner.next().await
    }

    async fn close(self: Box<Self>) -> StorageResult<()> {
        self.inner.close().await
    }
}

/// Assert that a [`StorageResult`] is a [`StorageError::Connection`].
///
/// # Examples
///
/// ```no_run
/// // Requires the `testutil` feature to be enabled.
/// use points_ledger_storage::assert_connection_error;
/// use points_ledger_storage::{StorageError, StorageResult};
///
/// let result: StorageResult<()> = Err(StorageError::connection("down"));
/// assert_connection_error!(result);
/// ```
#[macro_export]
macro_rules! assert_connection_error {
    ($result:expr) => {
        assert!(
            matches!($result, Err($crate::error::StorageError::Connection { .. })),
            "expected StorageError::Connection, got: {:?}",
            $result,
        );
    };
    ($result:expr, $msg:expr) => {
        assert!(
            matches!($result, Err($crate::error::StorageError::Connection { .. })),
            "{}: expected StorageError::Connection, got: {:?}",
            $msg,
            $result,
        );
    };
}

/// Assert that a [`StorageResult`] is `Ok`.
///
/// Returns the inner value on success, panics with a descriptive message
/// on failure.
#[macro_export]
macro_rules! assert_storage_ok {
    ($result:expr) => {
        match $result {
            Ok(val) => val,
            Err(e) => panic!("expected Ok, got StorageError: {e:?}"),
        }
    };
    ($result:expr, $msg:expr) => {
        match $result {
            Ok(val) => val,
            Err(e) => panic!("{}: expected Ok, got StorageError: {e:?}", $msg),
        }
    };
}

/// Assert that a list of [`KeyValue`]s has exactly the given keys, in order.
///
/// ```no_run
/// // Requires the `testutil` feature to be enabled.
/// use points_ledger_storage::assert_scan_keys;
/// # let entries: Vec<points_ledger_storage::KeyValue> = Vec::new();
/// assert_scan_keys!(entries, ["1", "10", "2"]);
/// ```
#[macro_export]
macro_rules! assert_scan_keys {
    ($entries:expr, [$($key:expr),* $(,)?]) => {{
        let actual: Vec<String> =
            $entries.iter().map(|kv| String::from_utf8_lossy(&kv.key).into_owned()).collect();
        let expected: Vec<String> = vec![$(String::from($key)),*];
        assert_eq!(actual, expected, "scan keys mismatch");
    }};
}
