//! Sample data written by `initLedger`.

use crate::record::PointsRecord;

/// One literal row of seed data, in `recordPoints` argument order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedRow {
    /// Scheme identifier.
    pub scheme_id: &'static str,
    /// Coordinate text.
    pub location: &'static str,
    /// Opaque timestamp.
    pub timestamp: &'static str,
    /// Initial holder.
    pub holder: &'static str,
}

impl SeedRow {
    /// Builds the record this row describes.
    #[must_use]
    pub fn to_record(&self) -> PointsRecord {
        PointsRecord::new(self.scheme_id, self.location, self.timestamp, self.holder)
    }
}

const fn row(
    scheme_id: &'static str,
    location: &'static str,
    timestamp: &'static str,
    holder: &'static str,
) -> SeedRow {
    SeedRow { scheme_id, location, timestamp, holder }
}

/// The ten records a fresh ledger is seeded with. Row `i` is stored under
/// key `i + 1`.
pub const DEFAULT_SEED: [SeedRow; 10] = [
    row("923F", "67.0006, -70.5476", "1504054225", "Miriam"),
    row("M83T", "91.2395, -49.4594", "1504057825", "Dave"),
    row("T012", "58.0148, 59.01391", "1493517025", "Igor"),
    row("P490", "-45.0945, 0.7949", "1496105425", "Amalea"),
    row("S439", "-107.6043, 19.5003", "1493512301", "Rafa"),
    row("J205", "-155.2304, -15.8723", "1494117101", "Shen"),
    row("S22L", "103.8842, 22.1277", "1496104301", "Leila"),
    row("EI89", "-132.3207, -34.0983", "1485066691", "Yuan"),
    row("129R", "153.0054, 12.6429", "1485153091", "Carlo"),
    row("49W4", "51.9435, 8.2735", "1487745091", "Fatima"),
];

/// The default seed table as owned records.
#[must_use]
pub fn default_seed() -> Vec<PointsRecord> {
    DEFAULT_SEED.iter().map(SeedRow::to_record).collect()
}

/// Key for the seed record at zero-based `index`.
#[must_use]
pub fn seed_key(index: usize) -> String {
    (index + 1).to_string()
}
