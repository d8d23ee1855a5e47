mod allocate;
mod cli;
mod infra;

use reward_roster::error::AppError;

pub use allocate::{run_allocation, AllocateArgs, RunReport};

pub fn run() -> Result<(), AppError> {
    cli::run()
}
