//! Request configuration
//!
//! Chart and calendar settings supplied by the caller for one computation.

mod calendar;
mod chart;

pub use calendar::{CalendarConfig, WeekdaySet};
pub use chart::{ChartConfig, YAxis};
