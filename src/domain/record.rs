//! Source-side domain types
//!
//! A [`Page`] is what one paginated fetch returns. Its raw records are
//! heterogeneous key-value maps; the decoder turns each one into a [`Record`].

use serde_json::{Map, Value};

/// An undecoded source document (`_source` of a search hit)
pub type RawRecord = Map<String, Value>;

/// A decoded source document
///
/// Decoding never fails, so `id == 0` and `text == ""` are valid degenerate
/// values standing in for missing or mistyped fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    /// Document identifier, used as the point id
    pub id: u64,

    /// Text that gets embedded
    pub text: String,
}

impl Record {
    /// Create a new record
    pub fn new(id: u64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}

/// One bounded slice of the source collection
#[derive(Debug, Clone, Default)]
pub struct Page {
    /// Source-reported number of documents matching the query.
    /// Advisory only: it may drift under concurrent writes.
    pub total_count: u64,

    /// Raw records in source order
    pub records: Vec<RawRecord>,
}

impl Page {
    /// Create a new page
    pub fn new(total_count: u64, records: Vec<RawRecord>) -> Self {
        Self {
            total_count,
            records,
        }
    }

    /// Number of records in this page
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// An empty page is the end-of-collection signal
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_emptiness() {
        let empty = Page::new(10, vec![]);
        assert!(empty.is_empty());
        assert_eq!(empty.total_count, 10);

        let mut raw = RawRecord::new();
        raw.insert("id".to_string(), json!(1));
        let page = Page::new(1, vec![raw]);
        assert!(!page.is_empty());
        assert_eq!(page.len(), 1);
    }

    #[test]
    fn test_record_default_is_degenerate() {
        let record = Record::default();
        assert_eq!(record.id, 0);
        assert!(record.text.is_empty());
        assert_eq!(Record::new(3, "abc"), Record::new(3, "abc".to_string()));
    }
}
