//! The `queryAllPoints` response codec.
//!
//! The payload is a JSON array of `{"Key":<key>, "Record":<record>}` objects
//! in scan order. Stored record bytes are embedded verbatim, without
//! re-encoding, and the punctuation is byte-exact with what existing
//! consumers parse:
//!
//! ```text
//! [{"Key":"1", "Record":{...}},{"Key":"10", "Record":{...}}]
//! ```

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::record::PointsRecord;

/// Incrementally assembles a `queryAllPoints` payload.
///
/// ```
/// use points_ledger::query::QueryResultsWriter;
///
/// let mut writer = QueryResultsWriter::new();
/// writer.push("1", br#"{"holder":"Miriam"}"#).unwrap();
/// assert_eq!(writer.finish().as_ref(), br#"[{"Key":"1", "Record":{"holder":"Miriam"}}]"#);
/// ```
#[derive(Debug)]
pub struct QueryResultsWriter {
    buf: Vec<u8>,
    entries: usize,
}

impl Default for QueryResultsWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryResultsWriter {
    /// Starts an empty array.
    #[must_use]
    pub fn new() -> Self {
        let mut buf = Vec::with_capacity(256);
        buf.push(b'[');
        Self { buf, entries: 0 }
    }

    /// Appends one element. `key` is written as a JSON string; `record` is
    /// copied as-is.
    ///
    /// # Errors
    ///
    /// Propagates failures from encoding `key`.
    pub fn push(&mut self, key: &str, record: &[u8]) -> Result<(), serde_json::Error> {
        if self.entries > 0 {
            self.buf.push(b',');
        }
        self.buf.extend_from_slice(b"{\"Key\":");
        serde_json::to_writer(&mut self.buf, key)?;
        self.buf.extend_from_slice(b", \"Record\":");
        self.buf.extend_from_slice(record);
        self.buf.push(b'}');
        self.entries += 1;
        Ok(())
    }

    /// Number of elements pushed so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
    }

    /// Returns `true` if nothing has been pushed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    /// Closes the array and returns the payload.
    #[must_use]
    pub fn finish(mut self) -> Bytes {
        self.buf.push(b']');
        Bytes::from(self.buf)
    }
}

/// One decoded element of a `queryAllPoints` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Store key of the record.
    #[serde(rename = "Key")]
    pub key: String,
    /// The record stored under `key`.
    #[serde(rename = "Record")]
    pub record: PointsRecord,
}

/// Decodes a `queryAllPoints` payload, preserving scan order.
///
/// # Errors
///
/// Returns an error if the payload is not an array of well-formed elements.
pub fn parse_query_results(payload: &[u8]) -> Result<Vec<QueryResult>, serde_json::Error> {
    serde_json::from_slice(payload)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    const MIRIAM: &[u8] = br#"{"schemeid":"923F","timestamp":"1504054225","location":"67.0006, -70.5476","holder":"Miriam"}"#;
    const DAVE: &[u8] = br#"{"schemeid":"M83T","timestamp":"1504057825","location":"91.2395, -49.4594","holder":"Dave"}"#;

    #[test]
    fn test_empty_array() {
        let writer = QueryResultsWriter::new();
        assert!(writer.is_empty());
        assert_eq!(writer.finish().as_ref(), b"[]");
    }

    #[test]
    fn test_exact_punctuation() {
        let mut writer = QueryResultsWriter::new();
        writer.push("1", MIRIAM).unwrap();
        writer.push("2", DAVE).unwrap();
        assert_eq!(writer.len(), 2);

        let payload = String::from_utf8(writer.finish().to_vec()).unwrap();
        let expected = format!(
            "[{{\"Key\":\"1\", \"Record\":{}}},{{\"Key\":\"2\", \"Record\":{}}}]",
            std::str::from_utf8(MIRIAM).unwrap(),
            std::str::from_utf8(DAVE).unwrap(),
        );
        assert_eq!(payload, expected);
    }

    #[test]
    fn test_key_is_escaped() {
        let mut writer = QueryResultsWriter::new();
        writer.push("a\"b", b"{}").unwrap();
        assert_eq!(writer.finish().as_ref(), br#"[{"Key":"a\"b", "Record":{}}]"#);
    }

    #[test]
    fn test_record_bytes_are_verbatim() {
        let raw = br#"{ "holder" : "spaced",  "extra": [1, 2] }"#;
        let mut writer = QueryResultsWriter::new();
        writer.push("7", raw).unwrap();

        let payload = writer.finish();
        let needle = payload.windows(raw.len()).any(|window| window == raw);
        assert!(needle, "record bytes should be copied unchanged");
    }

    #[test]
    fn test_parse_preserves_order() {
        let mut writer = QueryResultsWriter::new();
        writer.push("10", DAVE).unwrap();
        writer.push("2", MIRIAM).unwrap();

        let results = parse_query_results(&writer.finish()).unwrap();
        let keys: Vec<_> = results.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, ["10", "2"]);
        assert_eq!(results[1].record.holder(), "Miriam");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_query_results(b"[{\"Key\":\"1\"}]").is_err());
        assert!(parse_query_results(b"not json").is_err());
    }
}
