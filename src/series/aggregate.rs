//! Row aggregation into a category x series matrix

use crate::constants::series::COUNT_LABEL;
use crate::data::Row;
use crate::error::Result;
use crate::state::YAxis;
use polars::prelude::{Column, DataFrame, NamedFrom, Series};
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// One category (X value) with a value per series, aligned to the matrix's series
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRow {
    pub category: String,
    pub values: Vec<f64>,
}

impl CategoryRow {
    /// Sum of the row's values across all series
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }
}

/// Chart-ready series: ordered categories, ordered series names, and a value
/// for every (category, series) pair.
///
/// Values live in vectors aligned with `series`, so the matrix is rectangular
/// by construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesMatrix {
    series: Vec<String>,
    rows: Vec<CategoryRow>,
}

impl SeriesMatrix {
    /// Matrix with no categories and no series
    pub fn empty() -> Self {
        Self::default()
    }

    /// Series names in display order
    pub fn series(&self) -> &[String] {
        &self.series
    }

    /// Category rows in display order
    pub fn rows(&self) -> &[CategoryRow] {
        &self.rows
    }

    /// Category labels in display order
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.category.as_str())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Value at a (category, series) pair
    pub fn value(&self, category: &str, series: &str) -> Option<f64> {
        let col = self.series.iter().position(|s| s == series)?;
        let row = self.rows.iter().find(|r| r.category == category)?;
        row.values.get(col).copied()
    }

    /// Sum of a series' values across all categories
    pub fn series_total(&self, index: usize) -> f64 {
        self.rows.iter().filter_map(|r| r.values.get(index)).sum()
    }

    pub(crate) fn rows_mut(&mut self) -> &mut Vec<CategoryRow> {
        &mut self.rows
    }

    /// Reorder series by a permutation of their current indices
    pub(crate) fn permute_series(&mut self, order: &[usize]) {
        self.series = order.iter().map(|&i| self.series[i].clone()).collect();
        for row in &mut self.rows {
            row.values = order.iter().map(|&i| row.values[i]).collect();
        }
    }

    /// Export as a polars DataFrame: a `category` column then one f64 column per series
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let categories: Vec<&str> = self.categories().collect();
        let mut columns: Vec<Column> = Vec::with_capacity(self.series.len() + 1);
        columns.push(Series::new("category".into(), categories).into());
        for (i, name) in self.series.iter().enumerate() {
            let values: Vec<f64> = self.rows.iter().map(|r| r.values[i]).collect();
            columns.push(Series::new(name.as_str().into(), values).into());
        }
        Ok(DataFrame::new(columns)?)
    }
}

impl Serialize for SeriesMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        struct Values<'a>(&'a [String], &'a [f64]);

        impl Serialize for Values<'_> {
            fn serialize<S: Serializer>(
                &self,
                serializer: S,
            ) -> std::result::Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some(self.0.len()))?;
                for (name, value) in self.0.iter().zip(self.1) {
                    map.serialize_entry(name, value)?;
                }
                map.end()
            }
        }

        struct Entry<'a>(&'a [String], &'a CategoryRow);

        impl Serialize for Entry<'_> {
            fn serialize<S: Serializer>(
                &self,
                serializer: S,
            ) -> std::result::Result<S::Ok, S::Error> {
                let mut state = serializer.serialize_struct("CategoryRow", 2)?;
                state.serialize_field("category", &self.1.category)?;
                state.serialize_field("values", &Values(self.0, &self.1.values))?;
                state.end()
            }
        }

        let data: Vec<Entry<'_>> = self.rows.iter().map(|r| Entry(&self.series, r)).collect();
        let mut state = serializer.serialize_struct("SeriesMatrix", 2)?;
        state.serialize_field("series", &self.series)?;
        state.serialize_field("data", &data)?;
        state.end()
    }
}

/// Incremental matrix construction keyed by first-seen labels
#[derive(Debug, Default)]
struct MatrixBuilder {
    matrix: SeriesMatrix,
    category_index: HashMap<String, usize>,
    series_index: HashMap<String, usize>,
}

impl MatrixBuilder {
    fn category(&mut self, label: &str) -> usize {
        if let Some(&i) = self.category_index.get(label) {
            return i;
        }
        let i = self.matrix.rows.len();
        self.matrix.rows.push(CategoryRow {
            category: label.to_string(),
            values: vec![0.0; self.matrix.series.len()],
        });
        self.category_index.insert(label.to_string(), i);
        i
    }

    fn series(&mut self, label: &str) -> usize {
        if let Some(&i) = self.series_index.get(label) {
            return i;
        }
        let i = self.matrix.series.len();
        self.matrix.series.push(label.to_string());
        for row in &mut self.matrix.rows {
            row.values.push(0.0);
        }
        self.series_index.insert(label.to_string(), i);
        i
    }

    fn add(&mut self, category: usize, series: usize, amount: f64) {
        self.matrix.rows[category].values[series] += amount;
    }
}

/// Distinct labels of a cell in first-seen order
fn distinct_labels<'a>(row: &'a Row, column: &str) -> Vec<&'a str> {
    let mut labels = row.labels(column);
    let mut seen = std::collections::HashSet::new();
    labels.retain(|l| seen.insert(*l));
    labels
}

/// Aggregate rows into a matrix with one row per X label and one column per Y label.
///
/// Multi-select cells fan out: a row contributes to every label it carries, on
/// either axis. A row whose Y cell is null still registers its X categories.
/// Output order is first-seen order on both axes.
pub fn aggregate(rows: &[&Row], x_column: &str, y_axis: &YAxis) -> SeriesMatrix {
    profiling::scope!("aggregate_series");

    let mut builder = MatrixBuilder::default();
    let count_series = match y_axis {
        YAxis::Count => Some(builder.series(COUNT_LABEL)),
        YAxis::Property(_) => None,
    };

    for row in rows {
        let x_labels = distinct_labels(row, x_column);
        if x_labels.is_empty() {
            continue;
        }
        let y_series: Vec<usize> = match (y_axis, count_series) {
            (_, Some(count)) => vec![count],
            (YAxis::Property(column), None) => distinct_labels(row, column)
                .into_iter()
                .map(|label| builder.series(label))
                .collect(),
            (YAxis::Count, None) => Vec::new(),
        };
        for x in x_labels {
            let category = builder.category(x);
            for &series in &y_series {
                builder.add(category, series, 1.0);
            }
        }
    }

    tracing::debug!(
        categories = builder.matrix.rows.len(),
        series = builder.matrix.series.len(),
        "series aggregated"
    );
    builder.matrix
}

#[cfg(test)]
pub(crate) fn matrix_from(series: &[&str], rows: &[(&str, &[f64])]) -> SeriesMatrix {
    SeriesMatrix {
        series: series.iter().map(|s| s.to_string()).collect(),
        rows: rows
            .iter()
            .map(|(category, values)| CategoryRow {
                category: category.to_string(),
                values: values.to_vec(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::PropertyValue;
    use pretty_assertions::assert_eq;

    fn row(status: Option<&str>, tags: &[&str]) -> Row {
        let mut row = Row::new().with(
            "Tags",
            PropertyValue::MultiSelect(tags.iter().map(|t| t.to_string()).collect()),
        );
        if let Some(status) = status {
            row.set("Status", PropertyValue::Status(status.to_string()));
        }
        row
    }

    #[test]
    fn test_count_fan_out() {
        let rows = [row(Some("Todo"), &["Urgent", "Bug"])];
        let refs: Vec<&Row> = rows.iter().collect();
        let matrix = aggregate(&refs, "Tags", &YAxis::Count);
        assert_eq!(matrix.series(), &["Count".to_string()]);
        assert_eq!(matrix.categories().collect::<Vec<_>>(), vec!["Urgent", "Bug"]);
        assert_eq!(matrix.value("Urgent", "Count"), Some(1.0));
        assert_eq!(matrix.value("Bug", "Count"), Some(1.0));
    }

    #[test]
    fn test_categorical_series_stay_rectangular() {
        let rows = [
            row(Some("Todo"), &["Bug"]),
            row(Some("Done"), &["Docs"]),
            row(Some("Todo"), &["Bug", "Docs"]),
        ];
        let refs: Vec<&Row> = rows.iter().collect();
        let matrix = aggregate(&refs, "Status", &YAxis::Property("Tags".into()));

        let expected = matrix_from(
            &["Bug", "Docs"],
            &[("Todo", &[2.0, 1.0]), ("Done", &[0.0, 1.0])],
        );
        assert_eq!(matrix, expected);
        for r in matrix.rows() {
            assert_eq!(r.values.len(), matrix.series().len());
        }
    }

    #[test]
    fn test_null_cells() {
        let rows = [row(None, &["Bug"]), row(Some("Todo"), &[])];
        let refs: Vec<&Row> = rows.iter().collect();

        let by_status = aggregate(&refs, "Status", &YAxis::Property("Tags".into()));
        assert_eq!(by_status.categories().collect::<Vec<_>>(), vec!["Todo"]);
        assert!(by_status.series().is_empty());
        assert_eq!(by_status.rows()[0].total(), 0.0);

        let empty = aggregate(&[], "Status", &YAxis::Count);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_repeated_labels_count_once() {
        let rows = [row(Some("Todo"), &["Bug", "Bug"])];
        let refs: Vec<&Row> = rows.iter().collect();
        let matrix = aggregate(&refs, "Tags", &YAxis::Count);
        assert_eq!(matrix.value("Bug", "Count"), Some(1.0));
    }

    #[test]
    fn test_serialized_shape() {
        let matrix = matrix_from(&["B", "A"], &[("x", &[1.0, 2.0])]);
        let json = serde_json::to_string(&matrix).unwrap();
        assert_eq!(
            json,
            r#"{"series":["B","A"],"data":[{"category":"x","values":{"B":1.0,"A":2.0}}]}"#
        );
    }

    #[test]
    fn test_to_dataframe() {
        let matrix = matrix_from(&["Count"], &[("a", &[1.0]), ("b", &[3.0])]);
        let df = matrix.to_dataframe().unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 2);
        let names: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
        assert_eq!(names, vec!["category", "Count"]);
    }
}
