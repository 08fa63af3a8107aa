//! Axis classification of schema columns

use crate::constants::series::COUNT_LABEL;
use crate::data::{ColumnKind, ColumnSchema};
use crate::error::{ChartError, Result};
use crate::state::YAxis;
use serde::Serialize;

/// Columns a user may pick for each axis
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AxisOptions {
    /// Categorical columns, in schema name order
    pub x: Vec<String>,
    /// The Count pseudo-column first, then the categorical columns
    pub y: Vec<YAxis>,
}

impl AxisOptions {
    /// Display labels of the Y choices
    pub fn y_labels(&self) -> Vec<&str> {
        self.y
            .iter()
            .map(|choice| match choice {
                YAxis::Count => COUNT_LABEL,
                YAxis::Property(name) => name.as_str(),
            })
            .collect()
    }
}

/// Whether a column kind is exposed as a chart axis.
///
/// Numbers and dates are deliberately not offered, on either axis.
pub fn is_axis_kind(kind: ColumnKind) -> bool {
    kind.is_categorical()
}

/// Bucket a schema's columns into axis-eligible lists
pub fn classify(schema: &ColumnSchema) -> AxisOptions {
    let x: Vec<String> = schema
        .iter()
        .filter(|(_, kind)| is_axis_kind(*kind))
        .map(|(name, _)| name.to_string())
        .collect();

    let y = std::iter::once(YAxis::Count)
        .chain(x.iter().cloned().map(YAxis::Property))
        .collect();

    AxisOptions { x, y }
}

/// Resolve a chosen axis column to its kind, rejecting unusable columns
pub fn resolve_axis(schema: &ColumnSchema, column: &str) -> Result<ColumnKind> {
    let kind = schema.kind(column).ok_or_else(|| ChartError::ColumnNotFound {
        column: column.to_string(),
    })?;
    if !is_axis_kind(kind) {
        return Err(ChartError::UnsupportedColumnKind {
            column: column.to_string(),
            kind,
        });
    }
    Ok(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> ColumnSchema {
        ColumnSchema::new()
            .with_column("Status", ColumnKind::Status)
            .with_column("Priority", ColumnKind::Select)
            .with_column("Tags", ColumnKind::MultiSelect)
            .with_column("Points", ColumnKind::Number)
            .with_column("Due", ColumnKind::Date)
            .with_column("Notes", ColumnKind::Unsupported)
    }

    #[test]
    fn test_classify_buckets() {
        let options = classify(&schema());
        assert_eq!(options.x, vec!["Priority", "Status", "Tags"]);
        assert_eq!(options.y_labels(), vec!["Count", "Priority", "Status", "Tags"]);
        assert_eq!(options.y[0], YAxis::Count);
    }

    #[test]
    fn test_empty_schema_still_offers_count() {
        let options = classify(&ColumnSchema::new());
        assert!(options.x.is_empty());
        assert_eq!(options.y, vec![YAxis::Count]);
    }

    #[test]
    fn test_resolve_axis() {
        let schema = schema();
        assert_eq!(resolve_axis(&schema, "Tags").unwrap(), ColumnKind::MultiSelect);
        assert!(matches!(
            resolve_axis(&schema, "Points"),
            Err(ChartError::UnsupportedColumnKind { kind: ColumnKind::Number, .. })
        ));
        assert!(matches!(
            resolve_axis(&schema, "Due"),
            Err(ChartError::UnsupportedColumnKind { .. })
        ));
        assert!(matches!(
            resolve_axis(&schema, "Nope"),
            Err(ChartError::ColumnNotFound { .. })
        ));
    }
}
