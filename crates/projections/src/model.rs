//! Query-side models: periods, category totals and listing rows.

use chrono::{Datelike, NaiveDate};
use common::{CategoryKey, OutcomeKey};
use domain::{Color, Price};
use serde::{Deserialize, Serialize};

use crate::record::OutcomeRecord;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A month of a year, used to bucket outcomes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct MonthPeriod {
    year: i32,
    month: u32,
}

impl MonthPeriod {
    /// Creates a month period. Returns None unless `month` is in 1..=12.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// The year of this period.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The month number, 1-based.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Returns true if the given date falls into this month.
    pub fn contains(&self, when: NaiveDate) -> bool {
        when.year() == self.year && when.month() == self.month
    }
}

impl From<NaiveDate> for MonthPeriod {
    fn from(when: NaiveDate) -> Self {
        Self {
            year: when.year(),
            month: when.month(),
        }
    }
}

impl std::fmt::Display for MonthPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", MONTH_NAMES[self.month as usize - 1], self.year)
    }
}

/// A whole year, used to bucket outcomes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct YearPeriod {
    year: i32,
}

impl YearPeriod {
    /// Creates a year period.
    pub fn new(year: i32) -> Self {
        Self { year }
    }

    /// The year value.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns true if the given date falls into this year.
    pub fn contains(&self, when: NaiveDate) -> bool {
        when.year() == self.year
    }
}

impl From<NaiveDate> for YearPeriod {
    fn from(when: NaiveDate) -> Self {
        Self { year: when.year() }
    }
}

impl std::fmt::Display for YearPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.year)
    }
}

/// Either a month or a whole year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Period {
    Month(MonthPeriod),
    Year(YearPeriod),
}

impl Period {
    /// Returns true if the given date falls into this period.
    pub fn contains(&self, when: NaiveDate) -> bool {
        match self {
            Period::Month(month) => month.contains(when),
            Period::Year(year) => year.contains(when),
        }
    }
}

impl From<MonthPeriod> for Period {
    fn from(month: MonthPeriod) -> Self {
        Period::Month(month)
    }
}

impl From<YearPeriod> for Period {
    fn from(year: YearPeriod) -> Self {
        Period::Year(year)
    }
}

/// A category with the summed default-currency amount of its outcomes
/// within a period. Query-time only, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub key: CategoryKey,
    pub name: String,
    pub description: String,
    pub color: Color,
    pub icon: String,
    pub total: Price,
}

/// One row of an outcome listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeOverview {
    pub key: OutcomeKey,
    pub amount: Price,
    pub when: NaiveDate,
    pub description: String,
    pub categories: Vec<CategoryKey>,
}

impl OutcomeOverview {
    /// Builds a listing row from a stored record.
    pub fn from_record(record: &OutcomeRecord) -> Self {
        Self {
            key: record.key,
            amount: record.amount.clone(),
            when: record.when,
            description: record.description.clone(),
            categories: record.categories().to_vec(),
        }
    }
}
