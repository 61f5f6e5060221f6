//! Operation names and argument arity.

use std::{fmt, str::FromStr};

use crate::error::{LedgerError, LedgerResult};

/// The five operations the ledger dispatches to.
///
/// Parsing is exact and case-sensitive: the names are part of the invocation
/// contract with the hosting runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Writes the seed records under keys `"1"`..`"N"`.
    InitLedger,
    /// Returns the stored bytes for one key.
    QueryPoints,
    /// Creates or overwrites one record.
    RecordPoints,
    /// Returns every record in the configured scan window.
    QueryAllPoints,
    /// Hands one record to a new holder.
    ChangePointsHolder,
}

impl Operation {
    /// Every operation, in dispatch-table order.
    pub const ALL: [Self; 5] = [
        Self::InitLedger,
        Self::QueryPoints,
        Self::RecordPoints,
        Self::QueryAllPoints,
        Self::ChangePointsHolder,
    ];

    /// The function name callers invoke this operation by.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::InitLedger => "initLedger",
            Self::QueryPoints => "queryPoints",
            Self::RecordPoints => "recordPoints",
            Self::QueryAllPoints => "queryAllPoints",
            Self::ChangePointsHolder => "changePointsHolder",
        }
    }

    /// Required argument count, or `None` when arguments are ignored.
    #[must_use]
    pub const fn expected_args(self) -> Option<usize> {
        match self {
            Self::InitLedger | Self::QueryAllPoints => None,
            Self::QueryPoints => Some(1),
            Self::RecordPoints => Some(5),
            Self::ChangePointsHolder => Some(2),
        }
    }

    /// Borrows `args` as a fixed-size array of exactly `N` elements.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::ArgumentCount`] if `args.len() != N`.
    pub fn arguments<'a, const N: usize>(self, args: &'a [String]) -> LedgerResult<&'a [String; N]> {
        <&[String; N]>::try_from(args).map_err(|_| LedgerError::ArgumentCount {
            operation: self.name(),
            expected: N,
            actual: args.len(),
        })
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = LedgerError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.name() == name)
            .ok_or_else(|| LedgerError::UnknownOperation { name: name.to_owned() })
    }
}
