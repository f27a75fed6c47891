//! Row representation shared by every merge stage

/// One row of a source file: an insertion-ordered map from column name to
/// text value.
///
/// Source schemas are not known ahead of time, so a record is a small
/// ordered list of fields rather than a fixed struct. Lookups are linear,
/// which is fine for the handful of columns an extract carries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    /// Create a new empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty record with room for `capacity` fields
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Get a field value by column name
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether the record has a field with this column name
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.iter().any(|(k, _)| k == key)
    }

    /// Set a field. An existing field keeps its position; a new one is
    /// appended. Returns the previous value, if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.fields.push((key, value));
                None
            }
        }
    }

    /// Set a field as the first column, replacing any existing field with
    /// the same name wherever it was.
    pub fn insert_first(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        self.fields.retain(|(k, _)| *k != key);
        self.fields.insert(0, (key, value.into()));
    }

    /// Column names in field order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    /// Values in field order
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(_, v)| v.as_str())
    }

    /// `(column, value)` pairs in field order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_preserves_order() {
        let mut record = Record::new();
        record.insert("b", "2");
        record.insert("a", "1");
        record.insert("c", "3");

        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_insert_overwrites_in_place() {
        let mut record: Record = [("a", "1"), ("b", "2")].into_iter().collect();
        let previous = record.insert("a", "changed");

        assert_eq!(previous, Some("1".to_string()));
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(record.get("a"), Some("changed"));
    }

    #[test]
    fn test_insert_first_moves_existing_key() {
        let mut record: Record = [("Name", "x"), ("Enterprise", "old")].into_iter().collect();
        record.insert_first("Enterprise", "GHEC");

        assert_eq!(
            record.iter().collect::<Vec<_>>(),
            vec![("Enterprise", "GHEC"), ("Name", "x")]
        );
    }
}
