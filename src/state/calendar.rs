//! Calendar heatmap and streak configuration

use crate::constants::calendar::DEFAULT_WEEK_START;
use crate::error::Result;
use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

const ALL_WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Subset of the seven weekdays, stored as a bitmask indexed from Monday
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Weekday>", into = "Vec<Weekday>")]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    /// No days at all
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Every day of the week
    pub const fn all() -> Self {
        Self(0b111_1111)
    }

    /// Monday through Friday
    pub const fn weekdays() -> Self {
        Self(0b001_1111)
    }

    fn bit(day: Weekday) -> u8 {
        1 << day.num_days_from_monday()
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & Self::bit(day) != 0
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= Self::bit(day);
    }

    pub fn remove(&mut self, day: Weekday) {
        self.0 &= !Self::bit(day);
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Members in Monday-first order
    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        ALL_WEEKDAYS.into_iter().filter(|day| self.contains(*day))
    }
}

impl Default for WeekdaySet {
    fn default() -> Self {
        Self::all()
    }
}

impl fmt::Debug for WeekdaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut set = Self::empty();
        for day in iter {
            set.insert(day);
        }
        set
    }
}

impl From<Vec<Weekday>> for WeekdaySet {
    fn from(days: Vec<Weekday>) -> Self {
        days.into_iter().collect()
    }
}

impl From<WeekdaySet> for Vec<Weekday> {
    fn from(set: WeekdaySet) -> Self {
        set.iter().collect()
    }
}

/// Calendar view configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    /// Days that count toward a streak; the others are skipped
    pub included_weekdays: WeekdaySet,

    /// First slot of every calendar week
    pub week_start: Weekday,

    /// Caller-supplied "today" for a rolling view
    pub end: Option<NaiveDate>,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            included_weekdays: WeekdaySet::all(),
            week_start: DEFAULT_WEEK_START,
            end: None,
        }
    }
}

impl CalendarConfig {
    /// Load a configuration from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Builder-style weekday restriction
    pub fn with_weekdays(mut self, days: WeekdaySet) -> Self {
        self.included_weekdays = days;
        self
    }
}
