//! Conformance test suite for [`StorageBackend`] implementations.
//!
//! Each function validates one clause of the backend contract the points
//! ledger relies on. Every backend, whether in-memory or a platform adapter,
//! can run the same suite. Each function expects a fresh, empty backend.
//!
//! # Usage
//!
//! ```no_run
//! use points_ledger_storage::conformance;
//! use points_ledger_storage::MemoryBackend;
//!
//! #[tokio::test]
//! async fn get_returns_none_for_missing_key() {
//!     conformance::get_returns_none_for_missing_key(&MemoryBackend::new()).await;
//! }
//! ```
//!
//! # Test Categories
//!
//! | Category | Contract aspect |
//! |----------|-----------------|
//! | Lookup | absent keys are `Ok(None)`, writes round-trip, overwrite |
//! | Scan | lexicographic order, half-open bounds, empty ranges |
//! | Release | closing a partially consumed scan succeeds |

use bytes::Bytes;

use crate::{backend::StorageBackend, scan::collect_scan};

async fn seed<B: StorageBackend>(backend: &B, keys: &[&str]) {
    for key in keys {
        backend
            .set(key.as_bytes().to_vec(), format!("value-{key}").into_bytes())
            .await
            .expect("seed set should succeed");
    }
}

async fn scanned_keys<B: StorageBackend>(backend: &B, start: &str, end: &str) -> Vec<String> {
    let scan = backend.range_scan(start.as_bytes(), end.as_bytes()).await.expect("open scan");
    collect_scan(scan)
        .await
        .expect("scan should complete")
        .iter()
        .map(|kv| kv.key_str().into_owned())
        .collect()
}

// ============================================================================
// Lookup
// ============================================================================

/// `get` on a nonexistent key returns `Ok(None)`, not an error.
pub async fn get_returns_none_for_missing_key<B: StorageBackend>(backend: &B) {
    let result = backend.get(b"doesnotexist").await;
    assert!(result.is_ok(), "get should not error on missing key: {result:?}");
    assert_eq!(result.expect("checked above"), None, "missing key should return None");
}

/// `set` then `get` returns the exact bytes written.
pub async fn set_then_get_returns_value<B: StorageBackend>(backend: &B) {
    let value = br#"{"schemeid":"923F","holder":"Miriam"}"#.to_vec();
    backend.set(b"1".to_vec(), value.clone()).await.expect("set should succeed");
    let stored = backend.get(b"1").await.expect("get should succeed");
    assert_eq!(stored, Some(Bytes::from(value)));
}

/// `set` on an existing key overwrites the value.
pub async fn set_overwrites_existing<B: StorageBackend>(backend: &B) {
    backend.set(b"1".to_vec(), b"original".to_vec()).await.expect("set");
    backend.set(b"1".to_vec(), b"updated".to_vec()).await.expect("overwrite");
    let stored = backend.get(b"1").await.expect("get");
    assert_eq!(stored, Some(Bytes::from("updated")));
}

// ============================================================================
// Scan
// ============================================================================

/// Scans yield keys in lexicographic byte order, not numeric order.
pub async fn scan_orders_keys_lexicographically<B: StorageBackend>(backend: &B) {
    seed(backend, &["2", "10", "1", "20", "100"]).await;
    let keys = scanned_keys(backend, "0", "999").await;
    assert_eq!(keys, ["1", "10", "100", "2", "20"]);
}

/// The start bound is inclusive and the end bound exclusive.
pub async fn scan_bounds_are_half_open<B: StorageBackend>(backend: &B) {
    seed(backend, &["0", "5", "999", "9990"]).await;
    let keys = scanned_keys(backend, "0", "999").await;
    assert_eq!(keys, ["0", "5"]);
}

/// A range whose start is not below its end yields nothing.
pub async fn scan_of_empty_range_yields_nothing<B: StorageBackend>(backend: &B) {
    seed(backend, &["3", "5", "7"]).await;
    assert!(scanned_keys(backend, "5", "5").await.is_empty(), "start == end should be empty");
    assert!(scanned_keys(backend, "7", "3").await.is_empty(), "start > end should be empty");
}

/// Scanning an empty store completes immediately.
pub async fn scan_of_empty_store_yields_nothing<B: StorageBackend>(backend: &B) {
    assert!(scanned_keys(backend, "0", "999").await.is_empty());
}

/// Scanned values are the bytes stored under each key.
pub async fn scan_yields_stored_values<B: StorageBackend>(backend: &B) {
    seed(backend, &["1", "2"]).await;
    let scan = backend.range_scan(b"0", b"999").await.expect("open scan");
    let entries = collect_scan(scan).await.expect("scan");
    for entry in entries {
        let expected = format!("value-{}", entry.key_str());
        assert_eq!(entry.value, Bytes::from(expected));
    }
}

// ============================================================================
// Release
// ============================================================================

/// A scan closed after partial iteration releases cleanly.
pub async fn close_after_partial_iteration_succeeds<B: StorageBackend>(backend: &B) {
    seed(backend, &["1", "2", "3"]).await;
    let mut scan = backend.range_scan(b"0", b"999").await.expect("open scan");
    let first = scan.next().await.expect("advance").expect("first entry");
    assert_eq!(first.key, Bytes::from("1"));
    scan.close().await.expect("close should succeed mid-range");
}
