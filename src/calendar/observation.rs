//! Dated observations

use crate::constants::calendar::MAX_TRAILING_DAYS;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A count recorded on one calendar date
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DatedObservation {
    pub date: NaiveDate,
    pub count: f64,
}

impl DatedObservation {
    pub fn new(date: NaiveDate, count: f64) -> Self {
        Self { date, count }
    }
}

/// Fold same-date observations into one (summing counts), ascending by date
pub fn merge_observations(observations: &[DatedObservation]) -> Vec<DatedObservation> {
    let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for obs in observations {
        *by_date.entry(obs.date).or_insert(0.0) += obs.count;
    }
    by_date
        .into_iter()
        .map(|(date, count)| DatedObservation { date, count })
        .collect()
}

/// Last date covered by the calendar: the latest observation, pushed out to
/// `end` when that is later, but never more than `MAX_TRAILING_DAYS` beyond it
pub(crate) fn range_end(last: NaiveDate, end: Option<NaiveDate>) -> NaiveDate {
    let cap = last
        .checked_add_signed(Duration::days(MAX_TRAILING_DAYS))
        .unwrap_or(NaiveDate::MAX);
    end.map_or(last, |end| end.clamp(last, cap))
}
