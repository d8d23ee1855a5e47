pub mod views;
mod writer;

pub use views::{
    DistributionRow, DistributionView, MemberRewardEntry, MemberRewardsView, ReportTable,
    DATE_COLUMN,
};
pub use writer::{render, write_table, ReportError, ReportPaths, ReportWriter};
