//! # chart-oxide
//!
//! Chart-series aggregation and calendar streak analytics for property-bag
//! databases: typed columns (status, select, multi-select, number, date) and
//! rows of typed values.
//!
//! Two independent engines, both pure and synchronous:
//!
//! - [`series`] turns rows into a category x series matrix: axis
//!   classification, filtering, fan-out aggregation, per-axis sorting, zero
//!   omission and cumulative totals.
//! - [`calendar`] turns dated observations into a week-bucketed heatmap grid,
//!   current/longest streaks over a set of weekdays, and summary statistics.
//!
//! ## Example
//!
//! ```
//! use chart_oxide::data::{ColumnKind, ColumnSchema, PropertyValue, Row};
//! use chart_oxide::series::{SortSpec, build_series};
//! use chart_oxide::state::{ChartConfig, YAxis};
//!
//! let schema = ColumnSchema::new().with_column("Tags", ColumnKind::MultiSelect);
//! let rows = vec![Row::new().with(
//!     "Tags",
//!     PropertyValue::MultiSelect(vec!["Urgent".into(), "Bug".into()]),
//! )];
//! let config = ChartConfig {
//!     x_axis: Some("Tags".into()),
//!     y_axis: Some(YAxis::Count),
//!     x_sort: SortSpec::AlphaAsc,
//!     ..ChartConfig::default()
//! };
//!
//! let output = build_series(&schema, &rows, &config)?;
//! assert_eq!(output.matrix.categories().collect::<Vec<_>>(), ["Bug", "Urgent"]);
//! # Ok::<(), chart_oxide::ChartError>(())
//! ```

pub mod calendar;
pub mod constants;
pub mod data;
pub mod error;
pub mod logging;
pub mod series;
pub mod state;

// Re-export main types for convenience
pub use calendar::{CalendarOutput, build_calendar};
pub use error::{ChartError, Result};
pub use series::{SeriesMatrix, SeriesOutput, build_series};
