//! The points record data model and its wire codec.

use serde::{Deserialize, Serialize};

/// A unit of points credit: which scheme it belongs to, where and when it
/// was issued, and who currently holds it.
///
/// Records are addressed by an external key, never by a field inside the
/// record. Only [`holder`](Self::holder) changes after a record is written;
/// the other fields are read-only once constructed.
///
/// # Wire format
///
/// Records serialize as a compact JSON object with exactly four string
/// fields, in this order: `schemeid`, `timestamp`, `location`, `holder`.
/// Existing stored data depends on these names, so they are fixed.
///
/// ```
/// use points_ledger::PointsRecord;
///
/// let record = PointsRecord::builder()
///     .scheme_id("923F")
///     .location("67.0006, -70.5476")
///     .timestamp("1504054225")
///     .holder("Miriam")
///     .build();
///
/// assert_eq!(
///     record.encode().unwrap(),
///     br#"{"schemeid":"923F","timestamp":"1504054225","location":"67.0006, -70.5476","holder":"Miriam"}"#,
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, bon::Builder)]
pub struct PointsRecord {
    #[serde(rename = "schemeid")]
    #[builder(into)]
    scheme_id: String,

    #[builder(into)]
    timestamp: String,

    #[builder(into)]
    location: String,

    #[builder(into)]
    holder: String,
}

impl PointsRecord {
    /// Creates a record, taking fields in `recordPoints` argument order.
    pub fn new(
        scheme_id: impl Into<String>,
        location: impl Into<String>,
        timestamp: impl Into<String>,
        holder: impl Into<String>,
    ) -> Self {
        Self {
            scheme_id: scheme_id.into(),
            timestamp: timestamp.into(),
            location: location.into(),
            holder: holder.into(),
        }
    }

    /// The points scheme this record belongs to.
    #[must_use]
    pub fn scheme_id(&self) -> &str {
        &self.scheme_id
    }

    /// Opaque point-in-time marker. Never parsed.
    #[must_use]
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Free-form coordinate text.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// The party currently holding the points.
    #[must_use]
    pub fn holder(&self) -> &str {
        &self.holder
    }

    /// Hands the points to a new holder. The only in-place mutation a record
    /// supports.
    pub fn transfer_to(&mut self, holder: impl Into<String>) {
        self.holder = holder.into();
    }

    /// Serializes the record to its wire bytes.
    ///
    /// # Errors
    ///
    /// Propagates serializer failures. With four string fields this does not
    /// happen in practice, but the error is surfaced rather than discarded.
    pub fn encode(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Deserializes a record from wire bytes.
    ///
    /// Unknown fields are ignored; all four known fields are required.
    ///
    /// # Errors
    ///
    /// Returns an error if `bytes` is not a JSON object carrying the four
    /// string fields.
    pub fn decode(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn miriam() -> PointsRecord {
        PointsRecord::new("923F", "67.0006, -70.5476", "1504054225", "Miriam")
    }

    #[test]
    fn test_field_order_and_names_are_fixed() {
        let encoded = String::from_utf8(miriam().encode().unwrap()).unwrap();
        assert_eq!(
            encoded,
            r#"{"schemeid":"923F","timestamp":"1504054225","location":"67.0006, -70.5476","holder":"Miriam"}"#
        );
    }

    #[test]
    fn test_new_and_builder_agree() {
        let built = PointsRecord::builder()
            .scheme_id("923F")
            .timestamp("1504054225")
            .location("67.0006, -70.5476")
            .holder("Miriam")
            .build();
        assert_eq!(built, miriam());
    }

    #[test]
    fn test_transfer_only_changes_holder() {
        let mut record = miriam();
        record.transfer_to("Dave");

        assert_eq!(record.holder(), "Dave");
        assert_eq!(record.scheme_id(), "923F");
        assert_eq!(record.location(), "67.0006, -70.5476");
        assert_eq!(record.timestamp(), "1504054225");
    }

    #[test]
    fn test_decode_ignores_unknown_fields() {
        let bytes = br#"{"schemeid":"X1","timestamp":"t","location":"l","holder":"h","docType":"points"}"#;
        let record = PointsRecord::decode(bytes).unwrap();
        assert_eq!(record, PointsRecord::new("X1", "l", "t", "h"));
    }

    #[test]
    fn test_decode_rejects_malformed_bytes() {
        assert!(PointsRecord::decode(b"not json").is_err());
        assert!(PointsRecord::decode(br#"{"schemeid":"X1"}"#).is_err(), "missing fields");
        assert!(PointsRecord::decode(br#"["X1","t","l","h"]"#).is_err(), "wrong shape");
    }

    proptest! {
        /// Any record, including ones with quotes, unicode and control
        /// characters in its fields, decodes back to itself.
        #[test]
        fn encode_decode_round_trip(
            scheme_id in any::<String>(),
            location in any::<String>(),
            timestamp in any::<String>(),
            holder in any::<String>(),
        ) {
            let record = PointsRecord::new(scheme_id, location, timestamp, holder);
            let decoded = PointsRecord::decode(&record.encode().expect("encode")).expect("decode");
            prop_assert_eq!(decoded, record);
        }
    }
}
