//! Current and longest streaks of qualifying days

use super::observation::{DatedObservation, range_end};
use crate::state::WeekdaySet;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::HashSet;

/// Streak lengths, in qualifying days
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StreakResult {
    /// Run ending at the most recent tracked date
    pub current: usize,
    /// Longest run anywhere in the range
    pub longest: usize,
}

/// Walk every date from the earliest observation to the latest one (or `end`,
/// when later, within `MAX_TRAILING_DAYS`) and measure runs of qualifying days.
///
/// A day qualifies when it has an observation, whatever its count, and its
/// weekday is included.
/// Days on excluded weekdays are skipped without touching the run; an included
/// day with no observation resets it.
pub fn analyze_streaks(
    observations: &[DatedObservation],
    included: WeekdaySet,
    end: Option<NaiveDate>,
) -> StreakResult {
    profiling::scope!("analyze_streaks");

    let dates: HashSet<NaiveDate> = observations.iter().map(|o| o.date).collect();
    let (Some(&first), Some(&last)) = (dates.iter().min(), dates.iter().max()) else {
        return StreakResult::default();
    };
    let last = range_end(last, end);

    let mut run = 0;
    let mut longest = 0;
    for day in first.iter_days().take_while(|d| *d <= last) {
        if !included.contains(day.weekday()) {
            continue;
        }
        if dates.contains(&day) {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }

    StreakResult {
        current: run,
        longest,
    }
}
