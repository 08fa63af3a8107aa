//! Summary statistics over the raw observation list

use super::observation::DatedObservation;
use serde::Serialize;

/// Summary statistics over observation counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AggregateStats {
    pub sum: f64,
    pub average: f64,
    pub count: usize,
}

/// Sum, count and mean of the observations as given (no date merging).
/// The mean of an empty list is 0.
pub fn calculate_stats(observations: &[DatedObservation]) -> AggregateStats {
    let count = observations.len();

    if count == 0 {
        return AggregateStats::default();
    }

    let sum: f64 = observations.iter().map(|o| o.count).sum();

    AggregateStats {
        sum,
        average: sum / count as f64,
        count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_calculate_stats() {
        let counts = [5.0, 0.0, 10.0];
        let observations: Vec<DatedObservation> = counts
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                DatedObservation::new(NaiveDate::from_ymd_opt(2024, 1, i as u32 + 1).unwrap(), c)
            })
            .collect();
        let stats = calculate_stats(&observations);

        assert_eq!(stats.sum, 15.0);
        assert_eq!(stats.count, 3);
        assert_eq!(stats.average, 5.0);
    }

    #[test]
    fn test_empty_observations() {
        let stats = calculate_stats(&[]);

        assert_eq!(stats.sum, 0.0);
        assert_eq!(stats.count, 0);
        assert_eq!(stats.average, 0.0);
        assert!(!stats.average.is_nan());
    }
}
