//! Error types for chart-oxide
//!
//! Every failure the engine can report is a variant of [`ChartError`]. Degenerate
//! inputs (no rows, no observations, no axis selected) are not errors; they
//! produce empty or zeroed outputs instead.

use crate::data::ColumnKind;
use thiserror::Error;

/// Main error type for chart-oxide operations
#[derive(Error, Debug)]
pub enum ChartError {
    /// A chosen axis column has a kind that cannot be used as an axis
    #[error("Column '{column}' of kind {kind} cannot be used as a chart axis")]
    UnsupportedColumnKind { column: String, kind: ColumnKind },

    /// A filter names an operation outside the supported vocabulary
    #[error("Unsupported filter operation '{operation}' on column '{column}'")]
    UnsupportedFilterOperation { column: String, operation: String },

    /// A filter value could not be parsed for the column's kind
    #[error("Filter value '{value}' is not valid for column '{column}'")]
    InvalidFilterValue { column: String, value: String },

    /// Column not found in the schema
    #[error("Column '{column}' not found in schema")]
    ColumnNotFound { column: String },

    /// Unsupported file format
    #[error("Unsupported file format: {extension}")]
    UnsupportedFormat { extension: String },

    /// File I/O error
    #[error("Failed to access file: {0}")]
    FileIo(#[from] std::io::Error),

    /// Polars data processing error
    #[error("Data processing error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for chart-oxide operations
pub type Result<T> = std::result::Result<T, ChartError>;

impl ChartError {
    /// Get a user-friendly error message suitable for displaying in UI
    pub fn user_message(&self) -> String {
        match self {
            ChartError::UnsupportedColumnKind { column, kind } => {
                format!("'{}' is a {} column and can't be charted", column, kind)
            }
            ChartError::UnsupportedFilterOperation { column, operation } => {
                format!("Filter on '{}' uses unknown operation '{}'", column, operation)
            }
            ChartError::InvalidFilterValue { column, value } => {
                format!("Filter on '{}' has an invalid value '{}'", column, value)
            }
            ChartError::ColumnNotFound { column } => format!("Column '{}' not found", column),
            ChartError::UnsupportedFormat { extension } => {
                format!("Unsupported file format: '.{}'", extension)
            }
            ChartError::FileIo(e) => format!("File error: {}", e),
            ChartError::Polars(e) => format!("Data error: {}", e),
            ChartError::Json(e) => format!("JSON error: {}", e),
        }
    }

    /// Get a short title for the error (for toast notifications)
    pub fn title(&self) -> &'static str {
        match self {
            ChartError::UnsupportedColumnKind { .. } => "Unsupported Axis",
            ChartError::UnsupportedFilterOperation { .. } => "Unsupported Filter",
            ChartError::InvalidFilterValue { .. } => "Invalid Filter",
            ChartError::ColumnNotFound { .. } => "Column Not Found",
            ChartError::UnsupportedFormat { .. } => "Unsupported Format",
            ChartError::FileIo(_) => "File Error",
            ChartError::Polars(_) => "Data Error",
            ChartError::Json(_) => "JSON Error",
        }
    }

    /// Whether the error rejects the whole chart configuration, as opposed to a
    /// diagnostic reported next to a partial result.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            ChartError::UnsupportedColumnKind { .. } | ChartError::ColumnNotFound { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ChartError::UnsupportedColumnKind {
            column: "Estimate".to_string(),
            kind: ColumnKind::Number,
        };
        assert_eq!(
            err.user_message(),
            "'Estimate' is a number column and can't be charted"
        );
        assert_eq!(err.title(), "Unsupported Axis");
        assert!(err.is_configuration_error());

        let err = ChartError::UnsupportedFilterOperation {
            column: "Status".to_string(),
            operation: "starts_with".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unsupported filter operation 'starts_with' on column 'Status'"
        );
        assert!(!err.is_configuration_error());
    }

    #[test]
    fn test_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let chart_err: ChartError = io_err.into();
        assert!(matches!(chart_err, ChartError::FileIo(_)));

        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let chart_err: ChartError = json_err.into();
        assert_eq!(chart_err.title(), "JSON Error");
    }
}
