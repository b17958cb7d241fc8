//! Raw source document decoding
//!
//! Decoding is total: a malformed document still produces a [`Record`], with
//! the offending field replaced by its zero value, so one bad document never
//! aborts a page.

use crate::domain::{Payload, RawRecord, Record};
use serde_json::Value;

/// Extracts the identifier and text fields from raw source documents
#[derive(Debug, Clone)]
pub struct RecordDecoder {
    id_field: String,
    text_field: String,
}

impl RecordDecoder {
    pub fn new(id_field: impl Into<String>, text_field: impl Into<String>) -> Self {
        Self {
            id_field: id_field.into(),
            text_field: text_field.into(),
        }
    }

    /// Decode a raw document
    ///
    /// # Examples
    ///
    /// ```
    /// use embark::core::transform::RecordDecoder;
    /// use serde_json::json;
    ///
    /// let decoder = RecordDecoder::new("id", "text");
    /// let raw = json!({"id": 7, "text": "hello"}).as_object().unwrap().clone();
    ///
    /// let record = decoder.decode(&raw);
    /// assert_eq!(record.id, 7);
    /// assert_eq!(record.text, "hello");
    /// ```
    pub fn decode(&self, raw: &RawRecord) -> Record {
        let id = raw.get(&self.id_field).map(coerce_id).unwrap_or(0);
        let text = match raw.get(&self.text_field) {
            Some(Value::String(s)) => s.clone(),
            _ => String::new(),
        };
        Record { id, text }
    }

    /// Build the point payload for a decoded record
    pub fn payload(&self, record: &Record) -> Payload {
        let mut payload = Payload::new();
        payload.insert(self.text_field.clone(), Value::String(record.text.clone()));
        payload
    }
}

/// Non-negative numbers are truncated toward zero and saturate at `u64::MAX`.
/// Negative, non-finite and non-numeric values map to 0.
fn coerce_id(value: &Value) -> u64 {
    let Value::Number(number) = value else {
        return 0;
    };

    if let Some(id) = number.as_u64() {
        return id;
    }

    match number.as_f64() {
        Some(f) if f.is_finite() && f >= 0.0 => f as u64,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    fn raw(value: Value) -> RawRecord {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test_case(json!({"id": 42, "text": "hello"}), 42, "hello" ; "well formed")]
    #[test_case(json!({"text": "no id"}), 0, "no id" ; "missing id")]
    #[test_case(json!({"id": "42", "text": "t"}), 0, "t" ; "id as string")]
    #[test_case(json!({"id": -5, "text": "t"}), 0, "t" ; "negative id")]
    #[test_case(json!({"id": 12.9, "text": "t"}), 12, "t" ; "fractional id truncates")]
    #[test_case(json!({"id": 1e30, "text": "t"}), u64::MAX, "t" ; "over range id saturates")]
    #[test_case(json!({"id": null, "text": "t"}), 0, "t" ; "null id")]
    #[test_case(json!({"id": 3}), 3, "" ; "missing text")]
    #[test_case(json!({"id": 3, "text": 99}), 3, "" ; "text as number")]
    #[test_case(json!({"id": 3, "text": ["a"]}), 3, "" ; "text as array")]
    #[test_case(json!({}), 0, "" ; "empty map")]
    fn test_decode(input: Value, expected_id: u64, expected_text: &str) {
        let decoder = RecordDecoder::new("id", "text");
        let record = decoder.decode(&raw(input));
        assert_eq!(record.id, expected_id);
        assert_eq!(record.text, expected_text);
    }

    #[test]
    fn test_decode_u64_max() {
        let decoder = RecordDecoder::new("id", "text");
        let record = decoder.decode(&raw(json!({"id": u64::MAX})));
        assert_eq!(record.id, u64::MAX);
    }

    #[test]
    fn test_decode_custom_field_names() {
        let decoder = RecordDecoder::new("doc_id", "body");
        let record = decoder.decode(&raw(json!({"doc_id": 9, "body": "content", "id": 1})));
        assert_eq!(record, Record::new(9, "content"));
    }

    #[test]
    fn test_payload_uses_text_field_name() {
        let decoder = RecordDecoder::new("id", "body");
        let payload = decoder.payload(&Record::new(1, "abc"));
        assert_eq!(payload.len(), 1);
        assert_eq!(payload["body"], json!("abc"));
    }
}
