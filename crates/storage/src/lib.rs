//! World-state store abstraction for the points ledger.
//!
//! This crate provides the [`StorageBackend`] trait and related types that the
//! points ledger service consumes from its hosting platform. The platform owns
//! persistence, versioning and concurrency control; this crate only fixes the
//! contract (point lookup, overwrite, ordered range scan) and ships an
//! in-memory reference implementation.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Points Ledger Service                     │
//! │   dispatch │ record codec │ handlers │ query-all response   │
//! ├─────────────────────────────────────────────────────────────┤
//! │                  points-ledger-storage                      │
//! │          StorageBackend trait │ RangeScan handles           │
//! │                (get, set, range_scan)                       │
//! ├──────────────┬──────────────────────────────────────────────┤
//! │ MemoryBackend│        platform world-state adapter          │
//! │  (embedding) │             (hosting runtime)                │
//! └──────────────┴──────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```
//! use points_ledger_storage::{MemoryBackend, StorageBackend, collect_scan};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = MemoryBackend::new();
//!
//!     backend.set(b"2".to_vec(), b"two".to_vec()).await?;
//!     backend.set(b"10".to_vec(), b"ten".to_vec()).await?;
//!
//!     // Scans are lexicographic: "10" sorts before "2".
//!     let entries = collect_scan(backend.range_scan(b"0", b"999").await?).await?;
//!     assert_eq!(entries[0].key.as_ref(), b"10");
//!
//!     Ok(())
//! }
//! ```
//!
//! # Error Handling
//!
//! All operations return [`StorageResult<T>`]. Backends map their internal
//! errors to [`StorageError`] variants.
//!
//! # Feature Flags
//!
//! - **`testutil`**: Enables the [`testutil`] and [`conformance`] modules (failure-injecting
//!   backend wrapper, assertion macros, backend contract suite).
//! - **`failpoints`**: Compiles the `fail` fail points inside [`MemoryBackend`]: `memory-get`,
//!   `memory-set`, `range-scan-open`, `range-scan-next`.

#![deny(unsafe_code)]

pub mod backend;
#[cfg(any(test, feature = "testutil"))]
#[allow(clippy::expect_used, clippy::panic)]
pub mod conformance;
pub mod error;
pub mod memory;
pub mod scan;
pub mod size_limits;
#[cfg(any(test, feature = "testutil"))]
#[allow(clippy::expect_used, clippy::panic)]
pub mod testutil;
pub mod types;

// Re-export primary types at crate root for convenience
pub use backend::StorageBackend;
pub use error::{ConfigError, StorageError, StorageResult};
pub use memory::MemoryBackend;
pub use scan::{RangeScan, collect_scan};
pub use size_limits::{DEFAULT_KEY_LIMIT, DEFAULT_RECORD_LIMIT, SizeLimits};
pub use types::KeyValue;
