use chrono::{Local, NaiveDate};
use clap::Args;
use reward_roster::config::AppConfig;
use reward_roster::error::AppError;
use reward_roster::rewards::report::{render, ReportPaths};
use reward_roster::rewards::{
    AllocationSummary, AllocationThresholds, DistributionView, MemberRewardsView, ReportWriter,
    RewardAllocator, RewardSlate,
};
use reward_roster::roster::{RosterColumns, RosterLoader};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct AllocateArgs {
    /// Path to the member roster CSV export
    #[arg(short = 'm', long = "member-csv", alias = "member_csv")]
    pub member_csv: PathBuf,
    /// Weekly assessment score that guarantees one reward
    #[arg(short = 'p', long = "minimum-score", alias = "minimum_score")]
    pub minimum_score: i64,
    /// Fortress points required to join the ranked overflow pool
    #[arg(short = 'f', long = "fortress-points", alias = "fortress_points")]
    pub fortress_points: i64,
    /// Directory for the generated CSV files (defaults to REWARD_OUTPUT_DIR or .)
    #[arg(short = 'o', long = "output-dir", alias = "output_dir")]
    pub output_dir: Option<PathBuf>,
    /// Reward category names, one to three
    #[arg(short = 'n', long = "names", num_args = 0.., required = true)]
    pub names: Vec<String>,
    /// First day of the reward window (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub today: Option<NaiveDate>,
    /// Roster header holding member names
    #[arg(long)]
    pub name_column: Option<String>,
    /// Roster header holding the weekly assessment score
    #[arg(long)]
    pub primary_column: Option<String>,
    /// Roster header holding fortress points
    #[arg(long)]
    pub secondary_column: Option<String>,
    /// Print both tables to stdout instead of writing files
    #[arg(long, conflicts_with = "json")]
    pub dry_run: bool,
    /// Print a JSON run summary to stdout
    #[arg(long)]
    pub json: bool,
}

impl AllocateArgs {
    fn roster_columns(&self) -> RosterColumns {
        let defaults = RosterColumns::default();
        RosterColumns {
            name: self.name_column.clone().unwrap_or(defaults.name),
            primary_score: self
                .primary_column
                .clone()
                .unwrap_or(defaults.primary_score),
            secondary_score: self
                .secondary_column
                .clone()
                .unwrap_or(defaults.secondary_score),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub start_date: NaiveDate,
    pub categories: Vec<String>,
    pub thresholds: AllocationThresholds,
    pub summary: AllocationSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outputs: Option<ReportPaths>,
}

/// Build, allocate, project, then either write the two CSV files or render
/// them into `out` for a dry run. The category count is checked before the
/// roster is read, and nothing is written unless allocation succeeds.
pub fn run_allocation<W: Write>(
    args: &AllocateArgs,
    config: &AppConfig,
    out: W,
) -> Result<RunReport, AppError> {
    let start_date = args
        .today
        .unwrap_or_else(|| Local::now().date_naive());

    let mut slate = RewardSlate::build(&args.names, start_date, config.slate)?;

    let members = RosterLoader::new(args.roster_columns()).load_from_path(&args.member_csv)?;

    let thresholds = AllocationThresholds {
        minimum_score: args.minimum_score,
        fortress_points: args.fortress_points,
    };
    let summary = RewardAllocator::new(thresholds).allocate(&mut slate, &members)?;

    let member_view = MemberRewardsView::project(&slate, &members);
    let distribution = DistributionView::project(&slate);

    let outputs = if args.dry_run {
        render(&member_view, &distribution, out)?;
        None
    } else {
        let directory = args
            .output_dir
            .clone()
            .unwrap_or_else(|| config.output.directory.clone());
        Some(ReportWriter::new(directory, start_date).write(&member_view, &distribution)?)
    };

    info!(
        categories = args.names.len(),
        members = members.len(),
        dry_run = args.dry_run,
        "reward run complete"
    );

    Ok(RunReport {
        start_date,
        categories: args.names.clone(),
        thresholds,
        summary,
        outputs,
    })
}

pub(crate) fn render_run_report(report: &RunReport) {
    let RunReport {
        start_date,
        categories,
        summary,
        outputs,
        ..
    } = report;

    println!(
        "Reward allocation starting {} ({})",
        start_date,
        categories.join(", ")
    );
    println!("  Slots filled: {}", summary.total_slots);
    println!(
        "  Threshold pass: {} of {} eligible members rewarded",
        summary.threshold_assigned, summary.threshold_eligible
    );
    println!(
        "  Overflow pass: {} slots across a pool of {}",
        summary.overflow_assigned, summary.overflow_pool
    );

    if let Some(paths) = outputs {
        println!("  Member rewards: {}", paths.member_rewards.display());
        println!("  Distribution: {}", paths.distribution.display());
    }

    println!("Reward distribution completed successfully.");
}
