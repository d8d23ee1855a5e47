use super::super::domain::{DayLabel, Member};
use super::super::slate::RewardSlate;
use serde::Serialize;
use std::collections::HashMap;

/// Header cell of the first distribution column.
pub const DATE_COLUMN: &str = "date";

/// A rectangular table ready for serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MemberRewardEntry {
    pub name: String,
    pub days: Vec<DayLabel>,
}

/// Reward days for every distinct roster name, in first-appearance order.
#[derive(Debug, Clone, Serialize)]
pub struct MemberRewardsView {
    entries: Vec<MemberRewardEntry>,
}

impl MemberRewardsView {
    pub fn project(slate: &RewardSlate, members: &[Member]) -> Self {
        let mut entries: Vec<MemberRewardEntry> = Vec::with_capacity(members.len());
        let mut index: HashMap<&str, usize> = HashMap::with_capacity(members.len());

        for member in members {
            if !index.contains_key(member.name.as_str()) {
                index.insert(member.name.as_str(), entries.len());
                entries.push(MemberRewardEntry {
                    name: member.name.clone(),
                    days: Vec::new(),
                });
            }
        }

        for slot in slate.slots() {
            let Some(name) = slot.assigned() else {
                continue;
            };
            if let Some(&position) = index.get(name) {
                entries[position].days.push(slot.day);
            }
        }

        Self { entries }
    }

    pub fn entries(&self) -> &[MemberRewardEntry] {
        &self.entries
    }

    pub fn days_for(&self, name: &str) -> Option<&[DayLabel]> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.days.as_slice())
    }

    pub fn total_rewards(&self) -> usize {
        self.entries.iter().map(|entry| entry.days.len()).sum()
    }

    /// One column per member; shorter columns are padded with empty cells.
    pub fn to_table(&self) -> ReportTable {
        let headers = self.entries.iter().map(|entry| entry.name.clone()).collect();
        let depth = self
            .entries
            .iter()
            .map(|entry| entry.days.len())
            .max()
            .unwrap_or(0);

        let rows = (0..depth)
            .map(|row| {
                self.entries
                    .iter()
                    .map(|entry| {
                        entry
                            .days
                            .get(row)
                            .map(ToString::to_string)
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect();

        ReportTable { headers, rows }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DistributionRow {
    pub day: DayLabel,
    /// Winners per category, in slot order.
    pub cells: Vec<Vec<String>>,
}

/// Winners per day and category.
#[derive(Debug, Clone, Serialize)]
pub struct DistributionView {
    categories: Vec<String>,
    rows: Vec<DistributionRow>,
}

impl DistributionView {
    pub fn project(slate: &RewardSlate) -> Self {
        let categories = slate.categories().to_vec();
        let mut rows: Vec<DistributionRow> = slate
            .days()
            .iter()
            .map(|day| DistributionRow {
                day: *day,
                cells: vec![Vec::new(); categories.len()],
            })
            .collect();
        let row_for_day: HashMap<DayLabel, usize> = slate
            .days()
            .iter()
            .enumerate()
            .map(|(position, day)| (*day, position))
            .collect();

        for slot in slate.slots() {
            let Some(name) = slot.assigned() else {
                continue;
            };
            if let Some(&row) = row_for_day.get(&slot.day) {
                rows[row].cells[slot.category_index].push(name.to_string());
            }
        }

        Self { categories, rows }
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn rows(&self) -> &[DistributionRow] {
        &self.rows
    }

    pub fn winners(&self, day: DayLabel, category_index: usize) -> &[String] {
        self.rows
            .iter()
            .find(|row| row.day == day)
            .and_then(|row| row.cells.get(category_index))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn to_table(&self) -> ReportTable {
        let mut headers = Vec::with_capacity(self.categories.len() + 1);
        headers.push(DATE_COLUMN.to_string());
        headers.extend(self.categories.iter().cloned());

        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut cells = Vec::with_capacity(row.cells.len() + 1);
                cells.push(row.day.to_string());
                cells.extend(row.cells.iter().map(|names| names.join(",")));
                cells
            })
            .collect();

        ReportTable { headers, rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SlateConfig;
    use crate::rewards::allocation::RewardAllocator;
    use crate::rewards::domain::AllocationThresholds;
    use chrono::NaiveDate;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).expect("valid start")
    }

    fn allocated(categories: &[&str], shape: SlateConfig, members: &[Member]) -> RewardSlate {
        let categories: Vec<String> = categories.iter().map(|name| name.to_string()).collect();
        let mut slate = RewardSlate::build(&categories, start(), shape).expect("slate builds");
        RewardAllocator::new(AllocationThresholds {
            minimum_score: 50,
            fortress_points: 100,
        })
        .allocate(&mut slate, members)
        .expect("allocation succeeds");
        slate
    }

    fn roster() -> Vec<Member> {
        vec![
            Member::new("ada", 90, 300),
            Member::new("bo", 10, 200),
            Member::new("cy", 10, 0),
        ]
    }

    #[test]
    fn member_view_is_seeded_from_roster() {
        let slate = allocated(&["gold"], SlateConfig::default(), &roster());
        let view = MemberRewardsView::project(&slate, &roster());

        let names: Vec<&str> = view.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["ada", "bo", "cy"]);
        assert_eq!(view.days_for("cy"), Some(&[][..]));
        assert_eq!(view.total_rewards(), slate.len());
        assert!(view.days_for("nobody").is_none());
    }

    #[test]
    fn member_view_collapses_duplicate_names() {
        let members = vec![Member::new("ada", 90, 300), Member::new("ada", 95, 0)];
        let slate = allocated(&["gold"], SlateConfig::default(), &members);
        let view = MemberRewardsView::project(&slate, &members);

        assert_eq!(view.entries().len(), 1);
        assert_eq!(view.total_rewards(), 40);
    }

    #[test]
    fn member_table_pads_ragged_columns() {
        let shape = SlateConfig {
            window_days: 3,
            slots_per_day: 1,
        };
        let slate = allocated(&["gold"], shape, &roster());
        let table = MemberRewardsView::project(&slate, &roster()).to_table();

        assert_eq!(table.headers, vec!["ada", "bo", "cy"]);
        assert_eq!(
            table.rows,
            vec![
                vec![
                    "2026-10-17 Saturday".to_string(),
                    "2026-10-19 Monday".to_string(),
                    String::new(),
                ],
                vec!["2026-10-18 Sunday".to_string(), String::new(), String::new()],
            ]
        );
    }

    #[test]
    fn distribution_cells_join_winners_in_slot_order() {
        let shape = SlateConfig {
            window_days: 2,
            slots_per_day: 3,
        };
        let slate = allocated(&["gold", "gems"], shape, &roster());
        let view = DistributionView::project(&slate);
        let table = view.to_table();

        assert_eq!(table.headers, vec!["date", "gold", "gems"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][0], "2026-10-17 Saturday");
        assert_eq!(table.rows[0][1], "ada,ada,bo");
        assert_eq!(table.rows[1][1], "ada,bo,ada");

        for (category_index, _) in view.categories().iter().enumerate() {
            for day in slate.days() {
                let expected = slate
                    .slots()
                    .iter()
                    .filter(|slot| slot.category_index == category_index && slot.day == *day)
                    .count();
                assert_eq!(view.winners(*day, category_index).len(), expected);
            }
        }
    }
}
