//! The tabular value: named sheets of string rows.
//!
//! On the wire (and in scripts) a tabular value is an object whose keys are
//! sheet names and whose values are arrays of rows, each row an array of
//! cell strings:
//!
//! ```text
//! {"Sheet1": [["a", "b"], ["1", "2"]], "Sheet2": []}
//! ```
//!
//! Sheets keep the order they were added in. Serializing writes them in that
//! order, and deserializing keeps the order the encoding presents them.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Rows of cell text. Rows may have different lengths.
pub type Rows = Vec<Vec<String>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    pub name: String,
    pub rows: Rows,
}

impl Sheet {
    pub fn new(name: impl Into<String>, rows: Rows) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }
}

/// An ordered collection of uniquely named sheets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabularValue {
    sheets: Vec<Sheet>,
}

impl TabularValue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sheet, replacing the rows of an existing sheet with the same
    /// name in place.
    pub fn insert(&mut self, sheet: Sheet) {
        match self.sheets.iter_mut().find(|s| s.name == sheet.name) {
            Some(existing) => existing.rows = sheet.rows,
            None => self.sheets.push(sheet),
        }
    }

    pub fn with_sheet(mut self, name: impl Into<String>, rows: Rows) -> Self {
        self.insert(Sheet::new(name, rows));
        self
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    /// Move the named sheets to the front, in the order given. Sheets not
    /// named keep their relative order after them; unknown names are
    /// ignored.
    pub fn order_by<S: AsRef<str>>(&mut self, names: &[S]) {
        let mut ordered = Vec::with_capacity(self.sheets.len());
        for name in names {
            if let Some(pos) = self.sheets.iter().position(|s| s.name == name.as_ref()) {
                ordered.push(self.sheets.remove(pos));
            }
        }
        ordered.append(&mut self.sheets);
        self.sheets = ordered;
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sheet> {
        self.sheets.iter()
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

impl FromIterator<Sheet> for TabularValue {
    fn from_iter<I: IntoIterator<Item = Sheet>>(iter: I) -> Self {
        let mut value = TabularValue::new();
        for sheet in iter {
            value.insert(sheet);
        }
        value
    }
}

impl<'a> IntoIterator for &'a TabularValue {
    type Item = &'a Sheet;
    type IntoIter = std::slice::Iter<'a, Sheet>;

    fn into_iter(self) -> Self::IntoIter {
        self.sheets.iter()
    }
}

impl Serialize for TabularValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.sheets.len()))?;
        for sheet in &self.sheets {
            map.serialize_entry(&sheet.name, &sheet.rows)?;
        }
        map.end()
    }
}

struct TabularVisitor;

impl<'de> Visitor<'de> for TabularVisitor {
    type Value = TabularValue;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an object of sheet names to arrays of string rows")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut value = TabularValue::new();
        while let Some((name, rows)) = access.next_entry::<String, Rows>()? {
            value.insert(Sheet { name, rows });
        }
        Ok(value)
    }
}

impl<'de> Deserialize<'de> for TabularValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(TabularVisitor)
    }
}
