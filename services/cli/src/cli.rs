use crate::allocate::{render_run_report, run_allocation, AllocateArgs};
use clap::Parser;
use reward_roster::config::AppConfig;
use reward_roster::error::AppError;
use reward_roster::telemetry;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "reward-roster",
    about = "Allocate a week of member rewards per category from a scored roster",
    version
)]
struct Cli {
    #[command(flatten)]
    allocate: AllocateArgs,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    debug!(?config.environment, ?config.slate, "configuration loaded");

    let args = cli.allocate;
    let report = run_allocation(&args, &config, std::io::stdout().lock())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_run_report(&report);
    }

    Ok(())
}
