//! Calendar-streak analytics
//!
//! One list of dated observations feeds three independent computations: the
//! week-bucketed heatmap grid, current/longest streaks, and summary statistics.

mod bucket;
mod observation;
mod pipeline;
mod stats;
mod streak;

pub use bucket::{CalendarGrid, CalendarWeek, bucketize, slot_of, week_start_of};
pub use observation::{DatedObservation, merge_observations};
pub use pipeline::{CalendarOutput, build_calendar};
pub use stats::{AggregateStats, calculate_stats};
pub use streak::{StreakResult, analyze_streaks};
