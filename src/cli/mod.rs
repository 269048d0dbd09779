//! Command line interface for release_migrator.

mod args;
mod commands;
mod output;

pub use args::Args;
pub use commands::{execute_migrate, report_error};
pub use output::OutputManager;

use crate::TOKEN_ENV_VAR;
use crate::error::Result;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    let token = std::env::var(TOKEN_ENV_VAR).ok();
    execute_migrate(args, token).await
}
