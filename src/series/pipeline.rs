//! End-to-end series computation for one chart

use super::aggregate::{SeriesMatrix, aggregate};
use super::classify::resolve_axis;
use super::filter::apply_filters;
use super::post::{accumulate, omit_zero};
use super::sort::{sort_categories, sort_series};
use crate::data::{ColumnSchema, Row};
use crate::error::{ChartError, Result};
use crate::state::{ChartConfig, YAxis};
use serde::Serialize;

/// Chart-ready series plus the recoverable problems met while computing them
#[derive(Debug, Default, Serialize)]
pub struct SeriesOutput {
    pub matrix: SeriesMatrix,
    #[serde(serialize_with = "serialize_diagnostics")]
    pub diagnostics: Vec<ChartError>,
}

fn serialize_diagnostics<S: serde::Serializer>(
    diagnostics: &[ChartError],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_seq(diagnostics.iter().map(ToString::to_string))
}

/// Compute the series matrix for one chart.
///
/// Stages run in a fixed order: validate axes, filter, aggregate, sort
/// categories, sort series, omit zero categories, accumulate. Axis columns
/// that are missing or not categorical reject the configuration; a missing
/// axis selection yields an empty matrix.
pub fn build_series(
    schema: &ColumnSchema,
    rows: &[Row],
    config: &ChartConfig,
) -> Result<SeriesOutput> {
    profiling::scope!("build_series");

    let (Some(x_column), Some(y_axis)) = (&config.x_axis, &config.y_axis) else {
        tracing::debug!("no axis selected, returning empty series");
        return Ok(SeriesOutput::default());
    };

    resolve_axis(schema, x_column).inspect_err(|e| tracing::warn!(%e, "x axis rejected"))?;
    if let YAxis::Property(y_column) = y_axis {
        resolve_axis(schema, y_column).inspect_err(|e| tracing::warn!(%e, "y axis rejected"))?;
    }

    let filtered = apply_filters(schema, rows, &config.filters);
    let mut matrix = aggregate(&filtered.rows, x_column, y_axis);

    sort_categories(&mut matrix, config.x_sort);
    sort_series(&mut matrix, config.y_sort, config.reverse_series_order);
    if config.omit_zero {
        omit_zero(&mut matrix);
    }
    if config.cumulative {
        accumulate(&mut matrix);
    }

    Ok(SeriesOutput {
        matrix,
        diagnostics: filtered.diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{ColumnKind, PropertyValue};
    use crate::series::{Filter, FilterOperation, SortSpec};
    use pretty_assertions::assert_eq;

    fn schema() -> ColumnSchema {
        ColumnSchema::new()
            .with_column("Status", ColumnKind::Status)
            .with_column("Tags", ColumnKind::MultiSelect)
            .with_column("Points", ColumnKind::Number)
    }

    fn rows() -> Vec<Row> {
        [
            ("Todo", vec!["Bug"]),
            ("Done", vec!["Bug", "Docs"]),
            ("Done", vec!["Docs"]),
            ("Review", vec![]),
        ]
        .into_iter()
        .map(|(status, tags)| {
            Row::new()
                .with("Status", PropertyValue::Status(status.into()))
                .with(
                    "Tags",
                    PropertyValue::MultiSelect(tags.into_iter().map(String::from).collect()),
                )
                .with("Points", PropertyValue::Number(1.0))
        })
        .collect()
    }

    fn config(x: &str, y: YAxis) -> ChartConfig {
        ChartConfig {
            x_axis: Some(x.to_string()),
            y_axis: Some(y),
            ..ChartConfig::default()
        }
    }

    #[test]
    fn test_missing_axis_gives_empty_matrix() {
        let output = build_series(&schema(), &rows(), &ChartConfig::default()).unwrap();
        assert!(output.matrix.is_empty());
        assert!(output.matrix.series().is_empty());
    }

    #[test]
    fn test_numeric_axis_is_rejected() {
        let err = build_series(&schema(), &rows(), &config("Points", YAxis::Count)).unwrap_err();
        assert!(matches!(err, ChartError::UnsupportedColumnKind { .. }));

        let err = build_series(
            &schema(),
            &rows(),
            &config("Status", YAxis::Property("Points".into())),
        )
        .unwrap_err();
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_full_pipeline() {
        let mut cfg = config("Status", YAxis::Property("Tags".into()));
        cfg.x_sort = SortSpec::NumericDesc;
        cfg.y_sort = SortSpec::AlphaDesc;
        cfg.omit_zero = true;

        let output = build_series(&schema(), &rows(), &cfg).unwrap();
        let m = &output.matrix;
        assert_eq!(m.categories().collect::<Vec<_>>(), vec!["Done", "Todo"]);
        assert_eq!(m.series(), &["Docs", "Bug"]);
        assert_eq!(m.value("Done", "Docs"), Some(2.0));
        assert_eq!(m.value("Todo", "Docs"), Some(0.0));
    }

    #[test]
    fn test_cumulative_after_sort() {
        let mut cfg = config("Status", YAxis::Count);
        cfg.x_sort = SortSpec::AlphaAsc;
        cfg.cumulative = true;

        let output = build_series(&schema(), &rows(), &cfg).unwrap();
        let values: Vec<f64> = output.matrix.rows().iter().map(|r| r.values[0]).collect();
        // Done 2, Review 1, Todo 1
        assert_eq!(values, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_filter_diagnostics_are_returned() {
        let mut cfg = config("Status", YAxis::Count);
        cfg.filters = vec![
            Filter::new("Tags", FilterOperation::Contains, "Bug"),
            Filter::new("Status", FilterOperation::Unsupported("regex".into()), ".*"),
        ];
        let output = build_series(&schema(), &rows(), &cfg).unwrap();
        assert!(output.matrix.is_empty());
        assert_eq!(output.diagnostics.len(), 1);

        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(
            json["diagnostics"][0],
            "Unsupported filter operation 'regex' on column 'Status'"
        );
    }
}
