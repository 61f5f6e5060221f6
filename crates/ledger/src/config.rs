//! Configuration for the points ledger service.
//!
//! [`LedgerConfig`] carries everything the handlers treat as fixed input: the
//! seed table, the `queryAllPoints` scan window, and the holder policy for
//! transfers. The defaults reproduce the documented baseline behavior.

use std::collections::BTreeSet;

use points_ledger_storage::ConfigError;
use serde::{Deserialize, Serialize};

use crate::{record::PointsRecord, seed::default_seed};

/// Default inclusive start of the `queryAllPoints` scan.
pub const DEFAULT_SCAN_START: &str = "0";

/// Default exclusive end of the `queryAllPoints` scan.
pub const DEFAULT_SCAN_END: &str = "999";

/// Configuration for [`PointsLedger`](crate::PointsLedger).
///
/// # Scan Window
///
/// `queryAllPoints` scans `[scan_start, scan_end)` in lexicographic byte
/// order. With the defaults, key `"100"` sorts before `"20"` and key `"9990"`
/// falls outside the window.
///
/// # Example
///
/// ```
/// use points_ledger::{HolderPolicy, LedgerConfig};
///
/// let config = LedgerConfig::builder()
///     .holder_policy(HolderPolicy::allow_list(["Miriam", "Dave"]))
///     .build()?;
///
/// assert_eq!(config.scan_start(), "0");
/// assert_eq!(config.seed().len(), 10);
/// # Ok::<(), points_ledger::ConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LedgerConfig {
    /// Records written by `initLedger`, stored under keys `"1"`..`"N"`.
    #[serde(default = "default_seed")]
    pub(crate) seed: Vec<PointsRecord>,

    /// Inclusive start key of the `queryAllPoints` scan.
    #[serde(default = "default_scan_start")]
    pub(crate) scan_start: String,

    /// Exclusive end key of the `queryAllPoints` scan.
    #[serde(default = "default_scan_end")]
    pub(crate) scan_end: String,

    /// Who may receive points through `changePointsHolder`.
    #[serde(default)]
    pub(crate) holder_policy: HolderPolicy,
}

fn default_scan_start() -> String {
    DEFAULT_SCAN_START.to_owned()
}

fn default_scan_end() -> String {
    DEFAULT_SCAN_END.to_owned()
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            scan_start: default_scan_start(),
            scan_end: default_scan_end(),
            holder_policy: HolderPolicy::default(),
        }
    }
}

#[bon::bon]
impl LedgerConfig {
    /// Creates a new configuration, validating the scan window and policy.
    ///
    /// # Optional Fields
    ///
    /// * `seed` - Seed records (default: the ten-row sample table).
    /// * `scan_start` - Inclusive scan start (default: `"0"`).
    /// * `scan_end` - Exclusive scan end (default: `"999"`).
    /// * `holder_policy` - Transfer policy (default: [`HolderPolicy::Unchecked`]).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `scan_start` does not sort strictly before `scan_end`
    /// - the holder allow-list is empty
    #[builder]
    pub fn new(
        #[builder(default = default_seed())] seed: Vec<PointsRecord>,
        #[builder(into, default = default_scan_start())] scan_start: String,
        #[builder(into, default = default_scan_end())] scan_end: String,
        #[builder(default)] holder_policy: HolderPolicy,
    ) -> Result<Self, ConfigError> {
        let config = Self { seed, scan_start, scan_end, holder_policy };
        config.validate()?;
        Ok(config)
    }

    /// Checks the invariants `new` enforces. Deserialized configs should be
    /// validated before use.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scan_start.as_bytes() >= self.scan_end.as_bytes() {
            return Err(ConfigError::invalid(
                "scan_end",
                format!("{:?} must sort after scan_start {:?}", self.scan_end, self.scan_start),
            ));
        }

        if let HolderPolicy::AllowList { holders } = &self.holder_policy
            && holders.is_empty()
        {
            return Err(ConfigError::invalid("holder_policy", "allow list cannot be empty"));
        }

        Ok(())
    }

    /// Returns the seed records.
    #[must_use]
    pub fn seed(&self) -> &[PointsRecord] {
        &self.seed
    }

    /// Returns the inclusive scan start key.
    #[must_use]
    pub fn scan_start(&self) -> &str {
        &self.scan_start
    }

    /// Returns the exclusive scan end key.
    #[must_use]
    pub fn scan_end(&self) -> &str {
        &self.scan_end
    }

    /// Returns the holder policy.
    #[must_use]
    pub fn holder_policy(&self) -> &HolderPolicy {
        &self.holder_policy
    }
}

/// Which parties may receive points through a holder transfer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum HolderPolicy {
    /// Any holder is accepted.
    #[default]
    Unchecked,
    /// Only the listed holders are accepted.
    AllowList {
        /// Permitted holder names.
        holders: BTreeSet<String>,
    },
}

impl HolderPolicy {
    /// Builds an allow-list policy.
    pub fn allow_list(holders: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self::AllowList { holders: holders.into_iter().map(Into::into).collect() }
    }

    /// Returns `true` if `holder` may receive points.
    #[must_use]
    pub fn permits(&self, holder: &str) -> bool {
        match self {
            Self::Unchecked => true,
            Self::AllowList { holders } => holders.contains(holder),
        }
    }
}
