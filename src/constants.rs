//! Application-wide constants and default values
//!
//! This module centralizes the magic values used by the engine and the loader,
//! making them easier to maintain and configure.

/// Chart-series defaults
pub mod series {
    /// Label of the synthetic Y-axis pseudo-column that tallies rows
    pub const COUNT_LABEL: &str = "Count";

    /// Default for reproducing the legacy Y-order reversal
    pub const DEFAULT_REVERSE_SERIES_ORDER: bool = false;
}

/// Calendar and streak defaults
pub mod calendar {
    use chrono::Weekday;

    /// First weekday of every calendar week
    pub const DEFAULT_WEEK_START: Weekday = Weekday::Mon;

    /// Number of slots in a calendar week
    pub const DAYS_PER_WEEK: usize = 7;

    /// Count assumed for an observation row with no count value
    pub const DEFAULT_OBSERVATION_COUNT: f64 = 1.0;

    /// How far past the latest observation a caller-supplied end date may
    /// extend the grid and the streak walk (ten years)
    pub const MAX_TRAILING_DAYS: i64 = 3_660;
}

/// Data loading constants
pub mod source {
    /// Separator between labels inside a multi-select text cell
    pub const MULTI_SELECT_DELIMITER: char = ';';

    /// Rows sampled by the CSV reader for schema inference
    pub const INFER_SCHEMA_ROWS: usize = 100;

    /// Date format accepted for filter values and text date cells
    pub const DATE_FORMAT: &str = "%Y-%m-%d";
}

/// Configuration file paths
pub mod config {
    /// Default chart configuration file name
    pub const CHART_CONFIG_FILE: &str = "chart-oxide.json";

    /// Environment variable controlling the log filter
    pub const LOG_ENV: &str = "RUST_LOG";

    /// Log filter used when the environment does not set one
    pub const DEFAULT_LOG_FILTER: &str = "warn";
}
