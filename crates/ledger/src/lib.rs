//! Points ledger service.
//!
//! Turns invocation requests (a function name plus ordered string arguments)
//! into reads, writes and range scans against a [`StorageBackend`]. The
//! hosting platform owns transport, ordering and persistence; this crate owns
//! the record model, dispatch and the five operations:
//!
//! | Function | Arguments | Effect |
//! |----------|-----------|--------|
//! | `initLedger` | ignored | writes the seed records under `"1"`..`"N"` |
//! | `queryPoints` | `key` | returns the stored record bytes |
//! | `recordPoints` | `key, schemeID, location, timestamp, holder` | creates or overwrites a record |
//! | `queryAllPoints` | ignored | returns every record in the scan window as a JSON array |
//! | `changePointsHolder` | `key, newHolder` | hands a record to a new holder |
//!
//! # Quick Start
//!
//! ```
//! use points_ledger::{Invocation, PointsLedger, query::parse_query_results};
//! use points_ledger_storage::MemoryBackend;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let ledger = PointsLedger::new(MemoryBackend::new());
//!
//!     ledger.init_ledger().await?;
//!     ledger.change_points_holder("1", "Dave").await?;
//!
//!     let payload = ledger.query_all_points().await?;
//!     let results = parse_query_results(&payload)?;
//!     assert_eq!(results[0].key, "1");
//!     assert_eq!(results[0].record.holder(), "Dave");
//!
//!     // Keys are ordered as strings: "10" sorts before "2".
//!     assert_eq!(results[1].key, "10");
//!
//!     Ok(())
//! }
//! ```
//!
//! # Error Handling
//!
//! Typed entry points return [`LedgerResult<T>`]. [`PointsLedger::invoke`]
//! never fails: errors become an error [`Response`] carrying the error's
//! message, and are logged at `warn`.
//!
//! [`StorageBackend`]: points_ledger_storage::StorageBackend

#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod invocation;
pub mod operation;
pub mod query;
pub mod record;
pub mod seed;
pub mod service;

// Re-export primary types at crate root for convenience
pub use config::{DEFAULT_SCAN_END, DEFAULT_SCAN_START, HolderPolicy, LedgerConfig};
pub use error::{LedgerError, LedgerResult};
pub use invocation::{Invocation, Response, Status};
pub use operation::Operation;
pub use points_ledger_storage::ConfigError;
pub use query::{QueryResult, parse_query_results};
pub use record::PointsRecord;
pub use seed::{DEFAULT_SEED, SeedRow, default_seed, seed_key};
pub use service::PointsLedger;
