//! Row filtering
//!
//! Filters arrive as `{column, operation, value}` triples. Operations are parsed
//! into a closed [`FilterOperation`] enum; anything outside the vocabulary becomes
//! [`FilterOperation::Unsupported`], which fails closed and is reported back to
//! the caller as a diagnostic.

use crate::constants::source::DATE_FORMAT;
use crate::data::{ColumnKind, ColumnSchema, PropertyValue, Row};
use crate::error::ChartError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Filter operation vocabulary
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FilterOperation {
    Equals,
    DoesNotEqual,
    Contains,
    DoesNotContain,
    GreaterThan,
    LessThan,
    GreaterThanOrEqualTo,
    LessThanOrEqualTo,
    Before,
    After,
    OnOrBefore,
    OnOrAfter,
    IsEmpty,
    IsNotEmpty,
    /// Operation string outside the vocabulary, kept verbatim for diagnostics
    Unsupported(String),
}

impl FilterOperation {
    pub fn as_str(&self) -> &str {
        match self {
            FilterOperation::Equals => "equals",
            FilterOperation::DoesNotEqual => "does_not_equal",
            FilterOperation::Contains => "contains",
            FilterOperation::DoesNotContain => "does_not_contain",
            FilterOperation::GreaterThan => "greater_than",
            FilterOperation::LessThan => "less_than",
            FilterOperation::GreaterThanOrEqualTo => "greater_than_or_equal_to",
            FilterOperation::LessThanOrEqualTo => "less_than_or_equal_to",
            FilterOperation::Before => "before",
            FilterOperation::After => "after",
            FilterOperation::OnOrBefore => "on_or_before",
            FilterOperation::OnOrAfter => "on_or_after",
            FilterOperation::IsEmpty => "is_empty",
            FilterOperation::IsNotEmpty => "is_not_empty",
            FilterOperation::Unsupported(op) => op,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, FilterOperation::Unsupported(_))
    }
}

impl FromStr for FilterOperation {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let op = match s.trim() {
            "equals" => FilterOperation::Equals,
            "does_not_equal" => FilterOperation::DoesNotEqual,
            "contains" => FilterOperation::Contains,
            "does_not_contain" => FilterOperation::DoesNotContain,
            "greater_than" => FilterOperation::GreaterThan,
            "less_than" => FilterOperation::LessThan,
            "greater_than_or_equal_to" => FilterOperation::GreaterThanOrEqualTo,
            "less_than_or_equal_to" => FilterOperation::LessThanOrEqualTo,
            "before" => FilterOperation::Before,
            "after" => FilterOperation::After,
            "on_or_before" => FilterOperation::OnOrBefore,
            "on_or_after" => FilterOperation::OnOrAfter,
            "is_empty" => FilterOperation::IsEmpty,
            "is_not_empty" => FilterOperation::IsNotEmpty,
            other => FilterOperation::Unsupported(other.to_string()),
        };
        Ok(op)
    }
}

impl From<String> for FilterOperation {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(op) => op,
            Err(never) => match never {},
        }
    }
}

impl From<FilterOperation> for String {
    fn from(op: FilterOperation) -> Self {
        op.as_str().to_string()
    }
}

impl fmt::Display for FilterOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single row predicate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub column: String,
    pub operation: FilterOperation,
    #[serde(default)]
    pub value: String,
}

impl Filter {
    pub fn new(
        column: impl Into<String>,
        operation: FilterOperation,
        value: impl Into<String>,
    ) -> Self {
        Self {
            column: column.into(),
            operation,
            value: value.into(),
        }
    }

    /// Evaluate the predicate against one row.
    ///
    /// Null cells only pass `is_empty`. Kind/operation combinations with no
    /// meaning, unparseable values and unsupported operations all fail.
    pub fn matches(&self, row: &Row) -> bool {
        use FilterOperation as Op;

        let Some(cell) = row.get(&self.column) else {
            return self.operation == Op::IsEmpty;
        };

        match &self.operation {
            Op::IsEmpty => return cell.is_empty(),
            Op::IsNotEmpty => return !cell.is_empty(),
            Op::Unsupported(_) => return false,
            _ => {}
        }

        match cell {
            PropertyValue::Status(label) | PropertyValue::Select(label) => {
                self.match_label(label)
            }
            PropertyValue::MultiSelect(labels) => self.match_labels(labels),
            PropertyValue::Number(n) => self.number_operand().is_some_and(|v| self.compare(*n, v)),
            PropertyValue::Date(d) => self.date_operand().is_some_and(|v| self.compare(*d, v)),
        }
    }

    fn match_label(&self, label: &str) -> bool {
        match self.operation {
            FilterOperation::Equals => label == self.value,
            FilterOperation::DoesNotEqual => label != self.value,
            FilterOperation::Contains => label.contains(self.value.as_str()),
            FilterOperation::DoesNotContain => !label.contains(self.value.as_str()),
            _ => false,
        }
    }

    fn match_labels(&self, labels: &[String]) -> bool {
        let has = labels.iter().any(|l| *l == self.value);
        let exactly = labels.len() == 1 && has;
        match self.operation {
            FilterOperation::Contains => has,
            FilterOperation::DoesNotContain => !has,
            FilterOperation::Equals => exactly,
            FilterOperation::DoesNotEqual => !exactly,
            _ => false,
        }
    }

    fn compare<T: PartialOrd>(&self, cell: T, operand: T) -> bool {
        match self.operation {
            FilterOperation::Equals => cell == operand,
            FilterOperation::DoesNotEqual => cell != operand,
            FilterOperation::GreaterThan | FilterOperation::After => cell > operand,
            FilterOperation::LessThan | FilterOperation::Before => cell < operand,
            FilterOperation::GreaterThanOrEqualTo | FilterOperation::OnOrAfter => cell >= operand,
            FilterOperation::LessThanOrEqualTo | FilterOperation::OnOrBefore => cell <= operand,
            _ => false,
        }
    }

    fn number_operand(&self) -> Option<f64> {
        self.value.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
    }

    fn date_operand(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.value.trim(), DATE_FORMAT).ok()
    }

    /// Problems with this filter worth reporting once per request
    fn diagnose(&self, schema: &ColumnSchema) -> Option<ChartError> {
        if let FilterOperation::Unsupported(operation) = &self.operation {
            return Some(ChartError::UnsupportedFilterOperation {
                column: self.column.clone(),
                operation: operation.clone(),
            });
        }
        let Some(kind) = schema.kind(&self.column) else {
            return Some(ChartError::ColumnNotFound {
                column: self.column.clone(),
            });
        };
        let needs_operand = !matches!(
            self.operation,
            FilterOperation::IsEmpty | FilterOperation::IsNotEmpty
        );
        let bad_operand = match kind {
            ColumnKind::Number => self.number_operand().is_none(),
            ColumnKind::Date => self.date_operand().is_none(),
            _ => false,
        };
        (needs_operand && bad_operand).then(|| ChartError::InvalidFilterValue {
            column: self.column.clone(),
            value: self.value.clone(),
        })
    }
}

/// Keep a row only if every filter passes
pub fn row_matches(row: &Row, filters: &[Filter]) -> bool {
    filters.iter().all(|f| f.matches(row))
}

/// Rows that survived filtering, with the diagnostics gathered on the way
#[derive(Debug)]
pub struct FilteredRows<'a> {
    pub rows: Vec<&'a Row>,
    pub diagnostics: Vec<ChartError>,
}

/// Apply a filter list to a row set.
///
/// Each problematic filter is reported once and rejects every row, including
/// `is_empty` on a column the schema does not know.
pub fn apply_filters<'a>(
    schema: &ColumnSchema,
    rows: &'a [Row],
    filters: &[Filter],
) -> FilteredRows<'a> {
    profiling::scope!("apply_filters");

    let diagnostics: Vec<ChartError> = filters.iter().filter_map(|f| f.diagnose(schema)).collect();
    for diagnostic in &diagnostics {
        tracing::warn!(%diagnostic, "filter fails closed");
    }

    // filters are conjunctive, so one failing filter empties the result
    let rows: Vec<&Row> = if diagnostics.is_empty() {
        rows.iter().filter(|row| row_matches(row, filters)).collect()
    } else {
        Vec::new()
    };
    tracing::debug!(kept = rows.len(), filters = filters.len(), "rows filtered");

    FilteredRows { rows, diagnostics }
}
