use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};
use std::fmt;

/// Smallest and largest number of reward categories a slate accepts.
pub const MIN_CATEGORIES: usize = 1;
pub const MAX_CATEGORIES: usize = 3;

/// A roster entry with the two scores that drive allocation. A blank score
/// cell is `None` and never meets a threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Member {
    pub name: String,
    /// Weekly assessment score, compared against the threshold pass minimum.
    pub primary_score: Option<i64>,
    /// Fortress score, compared against the overflow minimum and used for ranking.
    pub secondary_score: Option<i64>,
}

impl Member {
    pub fn new(name: impl Into<String>, primary_score: i64, secondary_score: i64) -> Self {
        Self::with_scores(name, Some(primary_score), Some(secondary_score))
    }

    pub fn with_scores(
        name: impl Into<String>,
        primary_score: Option<i64>,
        secondary_score: Option<i64>,
    ) -> Self {
        Self {
            name: name.into(),
            primary_score,
            secondary_score,
        }
    }

    pub fn meets_primary(&self, minimum: i64) -> bool {
        self.primary_score.is_some_and(|score| score >= minimum)
    }

    pub fn meets_secondary(&self, minimum: i64) -> bool {
        self.secondary_score.is_some_and(|score| score >= minimum)
    }
}

/// Calendar day of a reward, rendered as `YYYY-MM-DD Weekday`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DayLabel {
    date: NaiveDate,
}

impl DayLabel {
    pub const fn new(date: NaiveDate) -> Self {
        Self { date }
    }

    pub const fn date(self) -> NaiveDate {
        self.date
    }

    pub fn weekday_name(self) -> &'static str {
        match self.date.weekday() {
            chrono::Weekday::Mon => "Monday",
            chrono::Weekday::Tue => "Tuesday",
            chrono::Weekday::Wed => "Wednesday",
            chrono::Weekday::Thu => "Thursday",
            chrono::Weekday::Fri => "Friday",
            chrono::Weekday::Sat => "Saturday",
            chrono::Weekday::Sun => "Sunday",
        }
    }
}

impl fmt::Display for DayLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date.format("%Y-%m-%d"), self.weekday_name())
    }
}

impl Serialize for DayLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One unit of reward capacity for a (category, day) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardSlot {
    pub category_index: usize,
    pub day: DayLabel,
    assigned: Option<String>,
}

impl RewardSlot {
    pub(crate) fn new(category_index: usize, day: DayLabel) -> Self {
        Self {
            category_index,
            day,
            assigned: None,
        }
    }

    pub fn assigned(&self) -> Option<&str> {
        self.assigned.as_deref()
    }

    pub fn is_filled(&self) -> bool {
        self.assigned.is_some()
    }

    /// Slots are written once; allocators only ever move forward from the fill cursor.
    pub(crate) fn assign(&mut self, name: &str) {
        debug_assert!(self.assigned.is_none(), "slot reassigned");
        self.assigned = Some(name.to_string());
    }
}

/// Minimum scores for the threshold and overflow passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AllocationThresholds {
    pub minimum_score: i64,
    pub fortress_points: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AllocationError {
    #[error("slot grid: expected between 1 and 3 category names, found {count}")]
    Configuration { count: usize },
    #[error("threshold pass: no members reached the minimum score of {minimum}")]
    NoEligibleMembers { minimum: i64 },
    #[error(
        "overflow pass: {remaining} slots remain unfilled but no members reached {minimum} fortress points"
    )]
    EmptyOverflowPool { remaining: usize, minimum: i64 },
}
