//! Chart series configuration

use crate::constants::series::DEFAULT_REVERSE_SERIES_ORDER;
use crate::error::Result;
use crate::series::{Filter, SortSpec};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Y-axis selection: the synthetic row tally or a categorical column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YAxis {
    /// Tally one per row, producing a single "Count" series
    Count,
    /// One series per distinct label of the named column
    Property(String),
}

/// Everything needed to turn rows into one chart's series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Column providing the categories
    pub x_axis: Option<String>,

    /// Column (or Count) providing the series
    pub y_axis: Option<YAxis>,

    /// Ordering of categories
    pub x_sort: SortSpec,

    /// Ordering of series
    pub y_sort: SortSpec,

    /// Row predicates, all of which must pass
    pub filters: Vec<Filter>,

    /// Drop categories whose total is zero
    pub omit_zero: bool,

    /// Replace values with running totals along the category order
    pub cumulative: bool,

    /// Reverse the series order after sorting, whatever the sort spec.
    ///
    /// Reproduces the legacy dashboard's display order for stacked charts.
    pub reverse_series_order: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            x_axis: None,
            y_axis: None,
            x_sort: SortSpec::default(),
            y_sort: SortSpec::default(),
            filters: Vec::new(),
            omit_zero: false,
            cumulative: false,
            reverse_series_order: DEFAULT_REVERSE_SERIES_ORDER,
        }
    }
}

impl ChartConfig {
    /// Load a configuration from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let mut config: Self = serde_json::from_str(&text)?;
        config.validate();
        Ok(config)
    }

    /// Normalize blank selections to "not chosen"
    pub fn validate(&mut self) {
        if let Some(x) = &self.x_axis {
            let trimmed = x.trim();
            self.x_axis = (!trimmed.is_empty()).then(|| trimmed.to_string());
        }
        if let Some(YAxis::Property(y)) = &self.y_axis {
            let trimmed = y.trim();
            self.y_axis = (!trimmed.is_empty()).then(|| YAxis::Property(trimmed.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::FilterOperation;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_defaults() {
        let config = ChartConfig::default();
        assert_eq!(config.x_axis, None);
        assert_eq!(config.y_axis, None);
        assert_eq!(config.x_sort, SortSpec::None);
        assert!(!config.reverse_series_order);
    }

    #[test]
    fn test_validate_blank_axes() {
        let mut config = ChartConfig {
            x_axis: Some("  ".to_string()),
            y_axis: Some(YAxis::Property(" Tags ".to_string())),
            ..ChartConfig::default()
        };
        config.validate();
        assert_eq!(config.x_axis, None);
        assert_eq!(config.y_axis, Some(YAxis::Property("Tags".to_string())));
    }

    #[test]
    fn test_load_from_json_file() {
        let mut file = Builder::new().suffix(".json").tempfile().unwrap();
        writeln!(
            file,
            r#"{{
                "x_axis": "Status",
                "y_axis": "count",
                "x_sort": "numeric_desc",
                "filters": [{{"column": "Tags", "operation": "contains", "value": "Bug"}}],
                "omit_zero": true
            }}"#
        )
        .unwrap();
        file.flush().unwrap();

        let config = ChartConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.x_axis.as_deref(), Some("Status"));
        assert_eq!(config.y_axis, Some(YAxis::Count));
        assert_eq!(config.x_sort, SortSpec::NumericDesc);
        assert_eq!(config.y_sort, SortSpec::None);
        assert_eq!(config.filters[0].operation, FilterOperation::Contains);
        assert!(config.omit_zero);
        assert!(!config.cumulative);
    }
}
