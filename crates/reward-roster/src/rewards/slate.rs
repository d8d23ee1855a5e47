use super::domain::{AllocationError, DayLabel, RewardSlot, MAX_CATEGORIES, MIN_CATEGORIES};
use crate::config::SlateConfig;
use chrono::{Duration, NaiveDate};

/// The fixed, ordered grid of reward slots for one run.
///
/// Slots are laid out category-major, then by day, then by repetition. Both
/// allocation passes write in this order and the report views read it back
/// in the same order.
#[derive(Debug, Clone)]
pub struct RewardSlate {
    categories: Vec<String>,
    days: Vec<DayLabel>,
    slots_per_day: usize,
    slots: Vec<RewardSlot>,
}

impl RewardSlate {
    /// Builds the standard eight-day, five-per-day slate starting at `start`.
    pub fn standard(categories: &[String], start: NaiveDate) -> Result<Self, AllocationError> {
        Self::build(categories, start, SlateConfig::default())
    }

    pub fn build(
        categories: &[String],
        start: NaiveDate,
        shape: SlateConfig,
    ) -> Result<Self, AllocationError> {
        if !(MIN_CATEGORIES..=MAX_CATEGORIES).contains(&categories.len()) {
            return Err(AllocationError::Configuration {
                count: categories.len(),
            });
        }

        let days: Vec<DayLabel> = (0..shape.window_days)
            .map(|offset| DayLabel::new(start + Duration::days(offset as i64)))
            .collect();

        let mut slots =
            Vec::with_capacity(categories.len() * days.len() * shape.slots_per_day);
        for category_index in 0..categories.len() {
            for day in &days {
                for _ in 0..shape.slots_per_day {
                    slots.push(RewardSlot::new(category_index, *day));
                }
            }
        }

        Ok(Self {
            categories: categories.to_vec(),
            days,
            slots_per_day: shape.slots_per_day,
            slots,
        })
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn days(&self) -> &[DayLabel] {
        &self.days
    }

    pub fn slots_per_day(&self) -> usize {
        self.slots_per_day
    }

    pub fn slots(&self) -> &[RewardSlot] {
        &self.slots
    }

    pub(crate) fn slots_mut(&mut self) -> &mut [RewardSlot] {
        &mut self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn unfilled(&self) -> usize {
        self.slots.iter().filter(|slot| !slot.is_filled()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(RewardSlot::is_filled)
    }

    /// First day of the window; used to date-stamp report files.
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.days.first().map(|day| day.date())
    }
}
