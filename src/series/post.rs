//! Transforms applied after aggregation and sorting

use super::aggregate::SeriesMatrix;

/// Drop categories whose total across all series is exactly zero
pub fn omit_zero(matrix: &mut SeriesMatrix) {
    profiling::scope!("omit_zero");
    matrix.rows_mut().retain(|row| row.total() != 0.0);
}

/// Replace each value with the running total of its series along the current
/// category order. Accumulating depends on that order, so sort first.
pub fn accumulate(matrix: &mut SeriesMatrix) {
    profiling::scope!("accumulate");

    let mut running = vec![0.0; matrix.series().len()];
    for row in matrix.rows_mut() {
        for (total, value) in running.iter_mut().zip(row.values.iter_mut()) {
            *total += *value;
            *value = *total;
        }
    }
}
