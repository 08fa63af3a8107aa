//! Typed property model
//!
//! Rows coming from a property-bag database carry one loosely typed value per
//! column. They are resolved once into [`PropertyValue`] so the engine can
//! match on the column kind instead of probing value shapes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Kind of a schema column
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Status,
    Select,
    MultiSelect,
    Number,
    Date,
    /// Any kind the engine does not interpret (text, checkbox, formula, ...)
    #[default]
    Unsupported,
}

impl ColumnKind {
    /// Categorical kinds carry labels and can be chart axes
    pub fn is_categorical(&self) -> bool {
        matches!(
            self,
            ColumnKind::Status | ColumnKind::Select | ColumnKind::MultiSelect
        )
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnKind::Status => "status",
            ColumnKind::Select => "select",
            ColumnKind::MultiSelect => "multi-select",
            ColumnKind::Number => "number",
            ColumnKind::Date => "date",
            ColumnKind::Unsupported => "unsupported",
        };
        f.write_str(name)
    }
}

/// A single typed cell value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum PropertyValue {
    Status(String),
    Select(String),
    MultiSelect(Vec<String>),
    Number(f64),
    Date(NaiveDate),
}

impl PropertyValue {
    /// The column kind this value belongs to
    pub fn kind(&self) -> ColumnKind {
        match self {
            PropertyValue::Status(_) => ColumnKind::Status,
            PropertyValue::Select(_) => ColumnKind::Select,
            PropertyValue::MultiSelect(_) => ColumnKind::MultiSelect,
            PropertyValue::Number(_) => ColumnKind::Number,
            PropertyValue::Date(_) => ColumnKind::Date,
        }
    }

    /// Categorical labels carried by the value.
    ///
    /// Status and select values yield one label, multi-select values yield every
    /// label they carry (possibly none). Numbers and dates are not categorical.
    pub fn labels(&self) -> Option<Vec<&str>> {
        match self {
            PropertyValue::Status(label) | PropertyValue::Select(label) => {
                Some(vec![label.as_str()])
            }
            PropertyValue::MultiSelect(labels) => {
                Some(labels.iter().map(String::as_str).collect())
            }
            PropertyValue::Number(_) | PropertyValue::Date(_) => None,
        }
    }

    /// Whether the value counts as empty for `is_empty` filters
    pub fn is_empty(&self) -> bool {
        match self {
            PropertyValue::Status(label) | PropertyValue::Select(label) => label.is_empty(),
            PropertyValue::MultiSelect(labels) => labels.is_empty(),
            PropertyValue::Number(n) => n.is_nan(),
            PropertyValue::Date(_) => false,
        }
    }
}

/// Mapping from column name to column kind, supplied per request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnSchema {
    columns: BTreeMap<String, ColumnKind>,
}

impl ColumnSchema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style column insertion
    pub fn with_column(mut self, name: impl Into<String>, kind: ColumnKind) -> Self {
        self.insert(name, kind);
        self
    }

    /// Insert or replace a column
    pub fn insert(&mut self, name: impl Into<String>, kind: ColumnKind) {
        self.columns.insert(name.into(), kind);
    }

    /// Kind of a column, if present
    pub fn kind(&self, name: &str) -> Option<ColumnKind> {
        self.columns.get(name).copied()
    }

    /// Columns in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, ColumnKind)> {
        self.columns.iter().map(|(name, kind)| (name.as_str(), *kind))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, ColumnKind)> for ColumnSchema {
    fn from_iter<I: IntoIterator<Item = (S, ColumnKind)>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().map(|(n, k)| (n.into(), k)).collect(),
        }
    }
}

/// One database row. A column without an entry holds the null value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    cells: HashMap<String, PropertyValue>,
}

impl Row {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style cell insertion
    pub fn with(mut self, column: impl Into<String>, value: PropertyValue) -> Self {
        self.set(column, value);
        self
    }

    /// Set a cell value
    pub fn set(&mut self, column: impl Into<String>, value: PropertyValue) {
        self.cells.insert(column.into(), value);
    }

    /// Value of a column, `None` when null
    pub fn get(&self, column: &str) -> Option<&PropertyValue> {
        self.cells.get(column)
    }

    /// Labels of a categorical column; empty for null or non-categorical cells
    pub fn labels(&self, column: &str) -> Vec<&str> {
        self.get(column)
            .and_then(PropertyValue::labels)
            .unwrap_or_default()
    }
}
