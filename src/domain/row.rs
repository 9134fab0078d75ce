//! Row records
//!
//! A row record is a flat, display-ready projection of one domain entity for
//! inclusion in a report: an ordered list of field name / display value
//! pairs. Rows are produced fresh per request and are never persisted
//! independently of the rendered artifact.

/// Display value used when an optional source field is absent
pub const MISSING_VALUE: &str = "";

/// Display value used when a foreign-key reference cannot be resolved
pub const UNKNOWN_REFERENCE: &str = "Unknown";

/// One flat, display-ready record of a report
///
/// Field order is significant and must match the column schema of the
/// report type that produced the row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowRecord {
    fields: Vec<(String, String)>,
}

impl RowRecord {
    /// Creates an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty row with capacity for `n` fields
    pub fn with_capacity(n: usize) -> Self {
        Self {
            fields: Vec::with_capacity(n),
        }
    }

    /// Appends a field to the row
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push((name.into(), value.into()));
    }

    /// Builder-style append
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(name, value);
        self
    }

    /// Looks up a field value by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    /// Field names in row order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Field values in row order
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(_, value)| value.as_str())
    }

    /// Field (name, value) pairs in row order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the row has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for RowRecord {
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(n, v)| (n.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_get() {
        let mut row = RowRecord::new();
        row.push("id", "123");
        row.push("full_name", "Ada Lovelace");

        assert_eq!(row.get("id"), Some("123"));
        assert_eq!(row.get("full_name"), Some("Ada Lovelace"));
        assert_eq!(row.get("missing"), None);
        assert_eq!(row.len(), 2);
    }

    #[test]
    fn test_field_order_preserved() {
        let row = RowRecord::new()
            .with_field("b", "2")
            .with_field("a", "1")
            .with_field("c", "3");

        let names: Vec<&str> = row.names().collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_from_iterator() {
        let row: RowRecord = vec![("id", "1"), ("status", "active")].into_iter().collect();
        assert_eq!(row.get("status"), Some("active"));
    }
}
