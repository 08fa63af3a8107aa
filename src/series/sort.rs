//! Category and series ordering

use super::aggregate::SeriesMatrix;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Ordering applied to one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortSpec {
    /// Keep first-seen order
    #[default]
    None,
    AlphaAsc,
    AlphaDesc,
    /// By aggregate magnitude, smallest first
    NumericAsc,
    /// By aggregate magnitude, largest first
    NumericDesc,
}

/// Stable ordering of `(label, magnitude)` keys, returned as a permutation of
/// their indices. Equal keys keep their original relative order.
fn ordering(keys: &[(&str, f64)], spec: SortSpec) -> Vec<usize> {
    let mut order: Vec<usize> = (0..keys.len()).collect();
    let cmp: fn(&(&str, f64), &(&str, f64)) -> Ordering = match spec {
        SortSpec::None => return order,
        SortSpec::AlphaAsc => |a, b| a.0.cmp(b.0),
        SortSpec::AlphaDesc => |a, b| b.0.cmp(a.0),
        SortSpec::NumericAsc => |a, b| a.1.total_cmp(&b.1),
        SortSpec::NumericDesc => |a, b| b.1.total_cmp(&a.1),
    };
    order.sort_by(|&i, &j| cmp(&keys[i], &keys[j]));
    order
}

/// Order categories; numeric specs rank by each category's total across series
pub fn sort_categories(matrix: &mut SeriesMatrix, spec: SortSpec) {
    profiling::scope!("sort_categories");

    let keys: Vec<(&str, f64)> = matrix
        .rows()
        .iter()
        .map(|r| (r.category.as_str(), r.total()))
        .collect();
    let order = ordering(&keys, spec);
    if order.iter().enumerate().all(|(pos, &i)| pos == i) {
        return;
    }

    let mut rows: Vec<_> = std::mem::take(matrix.rows_mut()).into_iter().map(Some).collect();
    *matrix.rows_mut() = order.iter().filter_map(|&i| rows[i].take()).collect();
}

/// Order series; numeric specs rank by each series' total across categories.
///
/// With `reverse` set the resulting order is flipped as a final step, whatever
/// the spec, matching the legacy dashboard's stacking order.
pub fn sort_series(matrix: &mut SeriesMatrix, spec: SortSpec, reverse: bool) {
    profiling::scope!("sort_series");

    let totals: Vec<f64> = (0..matrix.series().len())
        .map(|i| matrix.series_total(i))
        .collect();
    let keys: Vec<(&str, f64)> = matrix
        .series()
        .iter()
        .map(String::as_str)
        .zip(totals)
        .collect();
    let mut order = ordering(&keys, spec);
    if reverse {
        order.reverse();
    }
    matrix.permute_series(&order);
}
