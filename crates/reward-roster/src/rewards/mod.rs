pub mod allocation;
pub mod domain;
pub mod report;
mod slate;

pub use allocation::{AllocationSummary, RewardAllocator};
pub use domain::{AllocationError, AllocationThresholds, DayLabel, Member, RewardSlot};
pub use report::{DistributionView, MemberRewardsView, ReportTable, ReportWriter};
pub use slate::RewardSlate;
