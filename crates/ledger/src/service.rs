//! The points ledger service: dispatch and the five handlers.

use bytes::Bytes;
use points_ledger_storage::{ConfigError, StorageBackend};

use crate::{
    config::LedgerConfig,
    error::{LedgerError, LedgerResult},
    invocation::{Invocation, Response},
    operation::Operation,
    query::QueryResultsWriter,
    record::PointsRecord,
    seed::seed_key,
};

/// Points ledger service over a world-state backend.
///
/// Each invocation is independent: the service holds no state between calls
/// beyond its configuration, and never caches, retries or locks. Durability
/// and concurrency control belong to the backend.
///
/// # Example
///
/// ```
/// use points_ledger::{Invocation, PointsLedger};
/// use points_ledger_storage::MemoryBackend;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let ledger = PointsLedger::new(MemoryBackend::new());
///
/// ledger.invoke(&Invocation::new("initLedger", Vec::<String>::new())).await;
/// let response = ledger.invoke(&Invocation::new("queryPoints", ["1"])).await;
///
/// assert!(response.is_success());
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PointsLedger<B> {
    backend: B,
    config: LedgerConfig,
}

impl<B: StorageBackend> PointsLedger<B> {
    /// Creates a service with the default configuration.
    pub fn new(backend: B) -> Self {
        Self { backend, config: LedgerConfig::default() }
    }

    /// Creates a service with `config`, validating it first.
    ///
    /// # Errors
    ///
    /// Returns the first invariant `config` violates.
    pub fn with_config(backend: B, config: LedgerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { backend, config })
    }

    /// Returns the backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Returns the configuration.
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Instantiation hook. Touches no state.
    #[must_use]
    pub fn init(&self) -> Response {
        Response::success(Bytes::new())
    }

    /// Runs one invocation, converting any failure into an error response.
    #[tracing::instrument(
        skip(self, invocation),
        fields(function = %invocation.function(), args = invocation.args().len())
    )]
    pub async fn invoke(&self, invocation: &Invocation) -> Response {
        match self.dispatch(invocation.function(), invocation.args()).await {
            Ok(payload) => Response::success(payload),
            Err(error) => {
                tracing::warn!(error = %error.chain(), "invocation failed");
                Response::error(error.to_string())
            },
        }
    }

    /// Routes `function` to its handler after checking argument arity.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::UnknownOperation`] for unrecognized names,
    /// [`LedgerError::ArgumentCount`] for arity mismatches, and otherwise
    /// whatever the handler returns.
    pub async fn dispatch(&self, function: &str, args: &[String]) -> LedgerResult<Bytes> {
        let operation: Operation = function.parse()?;

        match operation {
            Operation::InitLedger => {
                self.init_ledger().await?;
                Ok(Bytes::new())
            },
            Operation::QueryPoints => {
                let [key] = operation.arguments::<1>(args)?;
                self.query_points(key).await
            },
            Operation::RecordPoints => {
                let [key, scheme_id, location, timestamp, holder] =
                    operation.arguments::<5>(args)?;
                let record = PointsRecord::new(scheme_id, location, timestamp, holder);
                self.record_points(key, &record).await?;
                Ok(Bytes::new())
            },
            Operation::QueryAllPoints => self.query_all_points().await,
            Operation::ChangePointsHolder => {
                let [key, holder] = operation.arguments::<2>(args)?;
                self.change_points_holder(key, holder).await?;
                Ok(Bytes::new())
            },
        }
    }

    /// Writes every configured seed record under keys `"1"`..`"N"` and
    /// returns how many were written.
    ///
    /// Writes are independent. The first failure stops the run; records
    /// already written stay written.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Serialization`] or [`LedgerError::StoreWrite`]
    /// for the first record that could not be stored.
    #[tracing::instrument(skip(self), fields(records = self.config.seed.len()))]
    pub async fn init_ledger(&self) -> LedgerResult<usize> {
        for (index, record) in self.config.seed.iter().enumerate() {
            let key = seed_key(index);
            self.record_points(&key, record).await?;
            tracing::debug!(key = %key, scheme_id = record.scheme_id(), "seeded points record");
        }

        tracing::info!(records = self.config.seed.len(), "ledger seeded");
        Ok(self.config.seed.len())
    }

    /// Returns the raw bytes stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NotFound`] if nothing is stored under `key`,
    /// or [`LedgerError::StoreRead`] if the lookup fails.
    #[tracing::instrument(skip(self))]
    pub async fn query_points(&self, key: &str) -> LedgerResult<Bytes> {
        self.backend
            .get(key.as_bytes())
            .await
            .map_err(|source| LedgerError::store_read(key, source))?
            .ok_or_else(|| LedgerError::not_found(key))
    }

    /// Returns the decoded record stored under `key`.
    ///
    /// # Errors
    ///
    /// As [`query_points`](Self::query_points), plus
    /// [`LedgerError::Serialization`] if the stored bytes are malformed.
    pub async fn query_record(&self, key: &str) -> LedgerResult<PointsRecord> {
        let bytes = self.query_points(key).await?;
        PointsRecord::decode(&bytes).map_err(|source| LedgerError::serialization(key, source))
    }

    /// Stores `record` under `key`, overwriting any existing record.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Serialization`] if encoding fails, or
    /// [`LedgerError::StoreWrite`] if the backend rejects the write.
    #[tracing::instrument(skip(self, record), fields(scheme_id = record.scheme_id()))]
    pub async fn record_points(&self, key: &str, record: &PointsRecord) -> LedgerResult<()> {
        let value = record.encode().map_err(|source| LedgerError::serialization(key, source))?;
        self.backend
            .set(key.as_bytes().to_vec(), value)
            .await
            .map_err(|source| LedgerError::store_write(key, source))
    }

    /// Returns every record in the configured scan window as a JSON array,
    /// in the backend's key order.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::StoreScan`] if the scan fails to open, advance
    /// or close. Partial output is discarded and the scan is released.
    #[tracing::instrument(skip(self))]
    pub async fn query_all_points(&self) -> LedgerResult<Bytes> {
        let mut scan = self
            .backend
            .range_scan(self.config.scan_start.as_bytes(), self.config.scan_end.as_bytes())
            .await?;

        let mut writer = QueryResultsWriter::new();
        while let Some(entry) = scan.next().await? {
            let key = entry.key_str();
            writer
                .push(&key, &entry.value)
                .map_err(|source| LedgerError::serialization(key.into_owned(), source))?;
        }
        scan.close().await?;

        tracing::debug!(records = writer.len(), "scanned points records");
        Ok(writer.finish())
    }

    /// Hands the record under `key` to `holder` and returns the updated
    /// record. Every other field is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NotFound`] if nothing is stored under `key`,
    /// [`LedgerError::UnauthorizedHolder`] if the configured policy rejects
    /// `holder`, and otherwise read, decode or write failures.
    #[tracing::instrument(skip(self))]
    pub async fn change_points_holder(&self, key: &str, holder: &str) -> LedgerResult<PointsRecord> {
        let mut record = self.query_record(key).await?;

        if !self.config.holder_policy.permits(holder) {
            return Err(LedgerError::UnauthorizedHolder { holder: holder.to_owned() });
        }

        record.transfer_to(holder);
        self.record_points(key, &record).await?;
        Ok(record)
    }
}
