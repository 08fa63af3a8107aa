//! Chart-series engine
//!
//! Turns typed rows into a chart-ready [`SeriesMatrix`]:
//! classify axis columns, filter rows, aggregate, sort both axes, then apply
//! the optional zero-omission and cumulative transforms.

mod aggregate;
mod classify;
mod filter;
mod pipeline;
mod post;
mod sort;

pub use aggregate::{CategoryRow, SeriesMatrix, aggregate};
pub use classify::{AxisOptions, classify, is_axis_kind, resolve_axis};
pub use filter::{Filter, FilterOperation, FilteredRows, apply_filters, row_matches};
pub use pipeline::{SeriesOutput, build_series};
pub use post::{accumulate, omit_zero};
pub use sort::{SortSpec, sort_categories, sort_series};
