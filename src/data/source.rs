use super::value::{ColumnKind, ColumnSchema, PropertyValue, Row};
use crate::calendar::DatedObservation;
use crate::constants::calendar::DEFAULT_OBSERVATION_COUNT;
use crate::constants::source::{DATE_FORMAT, INFER_SCHEMA_ROWS, MULTI_SELECT_DELIMITER};
use crate::error::{ChartError, Result};
use chrono::{Duration, NaiveDate};
use polars::prelude::{DataFrame, DataType, LazyCsvReader, LazyFileListReader, LazyFrame, Series};
use std::path::Path;

/// Kind overrides for columns whose storage type is ambiguous.
///
/// Text columns load as single-select by default; a hint turns them into status
/// or multi-select (labels separated by `;`) columns.
#[derive(Debug, Clone, Default)]
pub struct ColumnHints {
    pub status: Vec<String>,
    pub multi_select: Vec<String>,
}

impl ColumnHints {
    fn kind_for(&self, name: &str, dtype: &DataType) -> ColumnKind {
        if self.multi_select.iter().any(|c| c == name) {
            return ColumnKind::MultiSelect;
        }
        if self.status.iter().any(|c| c == name) {
            return ColumnKind::Status;
        }
        match dtype {
            DataType::String => ColumnKind::Select,
            DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64 => ColumnKind::Number,
            DataType::Date | DataType::Datetime(_, _) => ColumnKind::Date,
            _ => ColumnKind::Unsupported,
        }
    }
}

/// Tabular rows loaded from CSV/Parquet, the way a database connector would
/// hand them to the engine
pub struct DataSource {
    /// Materialized DataFrame
    materialized: DataFrame,
}

impl DataSource {
    /// Load data from a file (CSV or Parquet)
    pub fn load(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| ChartError::UnsupportedFormat {
                extension: String::new(),
            })?;

        let df = match extension.to_lowercase().as_str() {
            "parquet" => LazyFrame::scan_parquet(path, Default::default())?,
            "csv" => LazyCsvReader::new(path)
                .with_has_header(true)
                .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
                .with_try_parse_dates(true)
                .finish()?,
            ext => {
                return Err(ChartError::UnsupportedFormat {
                    extension: ext.to_string(),
                });
            }
        };

        let materialized = df.collect()?;
        tracing::debug!(
            path = %path.display(),
            rows = materialized.height(),
            columns = materialized.width(),
            "data source loaded"
        );

        Ok(Self { materialized })
    }

    /// Wrap an already-loaded DataFrame
    pub fn from_dataframe(df: DataFrame) -> Self {
        Self { materialized: df }
    }

    /// Get the number of rows
    pub fn height(&self) -> usize {
        self.materialized.height()
    }

    fn column_values(&self, col: &str) -> Result<Series> {
        self.materialized
            .column(col)
            .map(|c| c.as_materialized_series().clone())
            .map_err(|_| ChartError::ColumnNotFound {
                column: col.to_string(),
            })
    }

    /// Classify every column by storage type, applying hints
    pub fn schema(&self, hints: &ColumnHints) -> ColumnSchema {
        self.materialized
            .get_columns()
            .iter()
            .map(|c| (c.name().to_string(), hints.kind_for(c.name(), c.dtype())))
            .collect()
    }

    /// Materialize typed rows. Null cells and unsupported columns are left out.
    pub fn rows(&self, schema: &ColumnSchema) -> Result<Vec<Row>> {
        profiling::scope!("materialize_rows");

        let mut rows = vec![Row::new(); self.height()];
        for (name, kind) in schema.iter() {
            let cells: Vec<Option<PropertyValue>> = match kind {
                ColumnKind::Status | ColumnKind::Select | ColumnKind::MultiSelect => {
                    self.label_cells(name, kind)?
                }
                ColumnKind::Number => self
                    .number_cells(name)?
                    .into_iter()
                    .map(|v| v.map(PropertyValue::Number))
                    .collect(),
                ColumnKind::Date => self
                    .date_cells(name)?
                    .into_iter()
                    .map(|v| v.map(PropertyValue::Date))
                    .collect(),
                ColumnKind::Unsupported => continue,
            };
            for (row, cell) in rows.iter_mut().zip(cells) {
                if let Some(value) = cell {
                    row.set(name, value);
                }
            }
        }
        Ok(rows)
    }

    /// Dated observations from a date column and an optional count column.
    ///
    /// Rows without a date are skipped; a missing count counts as one.
    pub fn observations(
        &self,
        date_column: &str,
        count_column: Option<&str>,
    ) -> Result<Vec<DatedObservation>> {
        let dates = self.date_cells(date_column)?;
        let counts = match count_column {
            Some(col) => self.number_cells(col)?,
            None => vec![None; dates.len()],
        };
        Ok(dates
            .into_iter()
            .zip(counts)
            .filter_map(|(date, count)| {
                Some(DatedObservation::new(
                    date?,
                    count.unwrap_or(DEFAULT_OBSERVATION_COUNT),
                ))
            })
            .collect())
    }

    fn label_cells(&self, col: &str, kind: ColumnKind) -> Result<Vec<Option<PropertyValue>>> {
        let series = self.column_values(col)?.cast(&DataType::String)?;
        let labels = series.str()?;
        Ok(labels
            .into_iter()
            .map(|opt| {
                let text = opt.map(str::trim).filter(|s| !s.is_empty())?;
                Some(match kind {
                    ColumnKind::Status => PropertyValue::Status(text.to_string()),
                    ColumnKind::MultiSelect => PropertyValue::MultiSelect(
                        text.split(MULTI_SELECT_DELIMITER)
                            .map(str::trim)
                            .filter(|s| !s.is_empty())
                            .map(str::to_string)
                            .collect(),
                    ),
                    _ => PropertyValue::Select(text.to_string()),
                })
            })
            .collect())
    }

    fn number_cells(&self, col: &str) -> Result<Vec<Option<f64>>> {
        let series = self.column_values(col)?.cast(&DataType::Float64)?;
        Ok(series
            .f64()?
            .into_iter()
            .map(|opt| opt.filter(|v| !v.is_nan()))
            .collect())
    }

    fn date_cells(&self, col: &str) -> Result<Vec<Option<NaiveDate>>> {
        let series = self.column_values(col)?;
        match series.dtype() {
            DataType::String => Ok(series
                .str()?
                .into_iter()
                .map(|opt| opt.and_then(|s| NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()))
                .collect()),
            _ => {
                // Date is stored as days since the Unix epoch
                let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default();
                let days = series.cast(&DataType::Date)?;
                Ok(days
                    .date()?
                    .into_iter()
                    .map(|opt| opt.map(|d| epoch + Duration::days(i64::from(d))))
                    .collect())
            }
        }
    }
}
