#![cfg(feature = "failpoints")]
#![allow(clippy::expect_used, clippy::panic)]
//! Integration tests for fail-point injection.
//!
//! These tests require the `failpoints` feature:
//! ```bash
//! cargo test -p points-ledger-storage --features failpoints --test failpoint_tests
//! ```

use points_ledger_storage::{MemoryBackend, StorageBackend, StorageError};

#[tokio::test]
async fn get_failpoint_returns_error() {
    let scenario = fail::FailScenario::setup();
    fail::cfg("memory-get", "return").expect("failed to configure fail point");

    let backend = MemoryBackend::new();
    let result = backend.get(b"1").await;

    assert!(matches!(result, Err(StorageError::Connection { .. })), "got {result:?}");

    scenario.teardown();
}

#[tokio::test]
async fn set_failpoint_leaves_store_untouched() {
    let scenario = fail::FailScenario::setup();
    fail::cfg("memory-set", "return").expect("failed to configure fail point");

    let backend = MemoryBackend::new();
    let result = backend.set(b"1".to_vec(), b"v".to_vec()).await;

    assert!(result.is_err(), "set should fail when fail point is active");
    assert!(backend.is_empty());

    scenario.teardown();
}

#[tokio::test]
async fn scan_open_failpoint_returns_error() {
    let scenario = fail::FailScenario::setup();
    fail::cfg("range-scan-open", "return").expect("failed to configure fail point");

    let backend = MemoryBackend::new();
    let result = backend.range_scan(b"0", b"999").await;

    assert!(result.is_err(), "scan open should fail when fail point is active");
    assert_eq!(backend.open_scans(), 0);

    scenario.teardown();
}

#[tokio::test]
async fn scan_advance_failpoint_still_releases_handle() {
    let scenario = fail::FailScenario::setup();

    let backend = MemoryBackend::new();
    backend.set(b"1".to_vec(), b"v".to_vec()).await.expect("set");

    fail::cfg("range-scan-next", "return").expect("failed to configure fail point");
    let mut scan = backend.range_scan(b"0", b"999").await.expect("open");
    assert!(scan.next().await.is_err(), "advance should fail when fail point is active");
    drop(scan);

    assert_eq!(backend.open_scans(), 0);

    scenario.teardown();
}

#[tokio::test]
async fn operations_succeed_without_failpoints() {
    let scenario = fail::FailScenario::setup();
    // No fail point configured

    let backend = MemoryBackend::new();
    backend.set(b"1".to_vec(), b"v".to_vec()).await.expect("set");
    assert!(backend.get(b"1").await.expect("get").is_some());
    let mut scan = backend.range_scan(b"0", b"999").await.expect("open");
    assert!(scan.next().await.expect("advance").is_some());

    scenario.teardown();
}
