//! Calendar view computation

use super::bucket::{CalendarGrid, bucketize};
use super::observation::DatedObservation;
use super::stats::{AggregateStats, calculate_stats};
use super::streak::{StreakResult, analyze_streaks};
use crate::state::CalendarConfig;
use serde::Serialize;

/// Everything the calendar view renders
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CalendarOutput {
    #[serde(flatten)]
    pub grid: CalendarGrid,
    pub streak: StreakResult,
    pub stats: AggregateStats,
}

/// Compute grid, streaks and summary statistics from one observation list.
///
/// The three parts are independent; they only share their input.
pub fn build_calendar(observations: &[DatedObservation], config: &CalendarConfig) -> CalendarOutput {
    profiling::scope!("build_calendar");

    CalendarOutput {
        grid: bucketize(observations, config.week_start, config.end),
        streak: analyze_streaks(observations, config.included_weekdays, config.end),
        stats: calculate_stats(observations),
    }
}
