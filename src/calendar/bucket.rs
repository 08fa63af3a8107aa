//! Week-bucketed calendar grid for heatmap rendering

use super::observation::{DatedObservation, merge_observations, range_end};
use crate::constants::calendar::DAYS_PER_WEEK;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::Serialize;

/// Seven consecutive days starting on the configured week start
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarWeek {
    /// Date of the first slot
    pub start: NaiveDate,
    /// One slot per day; `None` means no data for that day
    pub days: [Option<DatedObservation>; DAYS_PER_WEEK],
}

impl CalendarWeek {
    fn new(start: NaiveDate) -> Self {
        Self {
            start,
            days: [None; DAYS_PER_WEEK],
        }
    }

    /// Date of a slot, saturating at the end of the representable range
    pub fn date(&self, slot: usize) -> NaiveDate {
        self.start
            .checked_add_signed(Duration::days(slot as i64))
            .unwrap_or(NaiveDate::MAX)
    }

    /// Number of slots holding an observation
    pub fn filled(&self) -> usize {
        self.days.iter().filter(|d| d.is_some()).count()
    }
}

/// Weeks covering an observation range, plus the largest count for scaling
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CalendarGrid {
    pub weeks: Vec<CalendarWeek>,
    pub max_count: f64,
}

/// Slot of a weekday in a week beginning on `week_start`
pub fn slot_of(day: Weekday, week_start: Weekday) -> usize {
    let offset = 7 + day.num_days_from_monday() - week_start.num_days_from_monday();
    offset as usize % DAYS_PER_WEEK
}

/// First day of the week containing `date`.
///
/// Clamps to `NaiveDate::MIN` when that week begins before the representable range.
pub fn week_start_of(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    date.checked_sub_signed(Duration::days(slot_of(date.weekday(), week_start) as i64))
        .unwrap_or(NaiveDate::MIN)
}

/// Lay observations out in contiguous weeks.
///
/// Weeks run from the one containing the earliest observation to the one
/// containing the latest observation or `end`, whichever is later. An `end`
/// more than `MAX_TRAILING_DAYS` past the latest observation is pulled back to
/// that bound. Same-date observations are merged first, so every date lands in
/// exactly one slot.
pub fn bucketize(
    observations: &[DatedObservation],
    week_start: Weekday,
    end: Option<NaiveDate>,
) -> CalendarGrid {
    profiling::scope!("bucketize_calendar");

    let merged = merge_observations(observations);
    let (Some(first), Some(last)) = (merged.first(), merged.last()) else {
        return CalendarGrid::default();
    };

    let grid_start = week_start_of(first.date, week_start);
    let grid_end = range_end(last.date, end);
    let span = (grid_end - grid_start).num_days() as usize + 1;
    let week_count = span.div_ceil(DAYS_PER_WEEK);

    let mut weeks: Vec<CalendarWeek> = (0..week_count)
        .map(|w| CalendarWeek::new(grid_start + Duration::weeks(w as i64)))
        .collect();

    for obs in &merged {
        let offset = (obs.date - grid_start).num_days() as usize;
        weeks[offset / DAYS_PER_WEEK].days[offset % DAYS_PER_WEEK] = Some(*obs);
    }

    let max_count = merged.iter().map(|o| o.count).fold(0.0, f64::max);
    tracing::debug!(weeks = weeks.len(), observations = merged.len(), "calendar bucketized");

    CalendarGrid { weeks, max_count }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_slot_of() {
        assert_eq!(slot_of(Weekday::Mon, Weekday::Mon), 0);
        assert_eq!(slot_of(Weekday::Sun, Weekday::Mon), 6);
        assert_eq!(slot_of(Weekday::Sun, Weekday::Sun), 0);
        assert_eq!(slot_of(Weekday::Sat, Weekday::Sun), 6);
    }

    #[test]
    fn test_weeks_span_year_boundary() {
        // 2023-12-29 is a Friday, 2024-01-02 a Tuesday
        let obs = [
            DatedObservation::new(date(2023, 12, 29), 2.0),
            DatedObservation::new(date(2024, 1, 2), 7.0),
        ];
        let grid = bucketize(&obs, Weekday::Mon, None);
        assert_eq!(grid.weeks.len(), 2);
        assert_eq!(grid.weeks[0].start, date(2023, 12, 25));
        assert_eq!(grid.weeks[0].days[4], Some(obs[0]));
        assert_eq!(grid.weeks[1].start, date(2024, 1, 1));
        assert_eq!(grid.weeks[1].days[1], Some(obs[1]));
        assert_eq!(grid.weeks[1].date(1), date(2024, 1, 2));
        assert_eq!(grid.max_count, 7.0);
    }

    #[test]
    fn test_empty_days_are_explicit() {
        let obs = [
            DatedObservation::new(date(2024, 1, 1), 1.0),
            DatedObservation::new(date(2024, 1, 20), 1.0),
        ];
        let grid = bucketize(&obs, Weekday::Mon, None);
        assert_eq!(grid.weeks.len(), 3);
        assert_eq!(grid.weeks[1].filled(), 0);
        let filled: usize = grid.weeks.iter().map(CalendarWeek::filled).sum();
        assert_eq!(filled, 2);
    }

    #[test]
    fn test_end_bound_extends_grid() {
        let obs = [DatedObservation::new(date(2024, 1, 3), 1.0)];
        let grid = bucketize(&obs, Weekday::Mon, Some(date(2024, 1, 15)));
        assert_eq!(grid.weeks.len(), 3);

        let earlier = bucketize(&obs, Weekday::Mon, Some(date(2023, 12, 1)));
        assert_eq!(earlier.weeks.len(), 1);
    }

    #[test]
    fn test_sunday_week_start() {
        let obs = [DatedObservation::new(date(2024, 1, 7), 1.0)];
        let grid = bucketize(&obs, Weekday::Sun, None);
        assert_eq!(grid.weeks[0].start, date(2024, 1, 7));
        assert!(grid.weeks[0].days[0].is_some());
    }

    #[test]
    fn test_duplicates_merge_into_one_slot() {
        let obs = [
            DatedObservation::new(date(2024, 1, 3), 1.0),
            DatedObservation::new(date(2024, 1, 3), 2.0),
        ];
        let grid = bucketize(&obs, Weekday::Mon, None);
        assert_eq!(grid.weeks[0].days[2].map(|o| o.count), Some(3.0));
        assert_eq!(grid.max_count, 3.0);
    }

    #[test]
    fn test_far_end_is_capped() {
        use crate::constants::calendar::MAX_TRAILING_DAYS;

        let obs = [DatedObservation::new(date(2024, 1, 1), 1.0)];
        let grid = bucketize(&obs, Weekday::Mon, Some(date(9999, 12, 31)));
        let covered = MAX_TRAILING_DAYS as usize + 1;
        assert_eq!(grid.weeks.len(), covered.div_ceil(DAYS_PER_WEEK));
        assert_eq!(grid.weeks[0].days[0], Some(obs[0]));
    }

    #[test]
    fn test_range_edges_do_not_panic() {
        assert_eq!(week_start_of(NaiveDate::MIN, Weekday::Mon), NaiveDate::MIN);

        let obs = [
            DatedObservation::new(NaiveDate::MIN, 1.0),
            DatedObservation::new(NaiveDate::MIN.succ_opt().unwrap(), 2.0),
        ];
        let grid = bucketize(&obs, Weekday::Mon, None);
        let filled: usize = grid.weeks.iter().map(CalendarWeek::filled).sum();
        assert_eq!(filled, 2);

        let last = [DatedObservation::new(NaiveDate::MAX, 1.0)];
        let grid = bucketize(&last, Weekday::Mon, None);
        assert_eq!(grid.weeks.len(), 1);
        assert_eq!(grid.weeks[0].date(6), NaiveDate::MAX);
    }

    #[test]
    fn test_empty_input() {
        let grid = bucketize(&[], Weekday::Mon, Some(date(2024, 1, 1)));
        assert!(grid.weeks.is_empty());
        assert_eq!(grid.max_count, 0.0);
    }
}
