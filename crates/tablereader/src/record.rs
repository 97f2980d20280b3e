//! Ordered field name to value mapping produced per table row.

use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::sources::strip::trim_in_place;

/// Field names bound to a table.
///
/// Each column is mapped once to its slot in a [`Record`]; a repeated name
/// shares the slot of its first occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Fields {
    names: Vec<String>,
    slots: Vec<usize>,
}

impl Fields {
    pub(crate) fn new(names: Vec<String>) -> Self {
        let slots = {
            let mut seen: HashMap<&str, usize> = HashMap::with_capacity(names.len());
            names
                .iter()
                .map(|name| {
                    let next = seen.len();
                    *seen.entry(name.as_str()).or_insert(next)
                })
                .collect()
        };
        Self { names, slots }
    }

    pub(crate) fn names(&self) -> &[String] {
        &self.names
    }
}

/// One table row keyed by field name, in field declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    entries: Vec<(String, String)>,
}

impl Record {
    /// Empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Zip a row against bound field names.
    ///
    /// Extra cells are dropped; field names without a cell are left out.
    pub(crate) fn from_row(fields: &Fields, row: Vec<String>, strip: bool) -> Self {
        let mut entries: Vec<(String, String)> =
            Vec::with_capacity(fields.names.len().min(row.len()));

        for ((name, &slot), mut value) in fields.names.iter().zip(&fields.slots).zip(row) {
            if strip {
                trim_in_place(&mut value);
            }
            // columns arrive in order, so a first occurrence always lands at the end
            if slot == entries.len() {
                entries.push((name.clone(), value));
            } else {
                entries[slot].1 = value;
            }
        }

        Self { entries }
    }

    /// Set a field; a repeated name keeps its first position
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Value of a field
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Whether a field is present
    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the record has no fields
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(name, value)` pairs in field order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Field names in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Values in field order
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, v)| v.as_str())
    }

    /// Owned `(name, value)` pairs in order
    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.entries
    }
}

impl IntoIterator for Record {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (name, value) in iter {
            record.insert(name, value);
        }
        record
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
