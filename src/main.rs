//! Release Migrator - recreate GitHub releases in the organization a
//! repository was transferred from.

use env_logger::Env;
use release_migrator::cli;
use std::process;

#[tokio::main]
async fn main() {
    // "info" unless RUST_LOG says otherwise
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    match cli::run().await {
        Ok(exit_code) => {
            process::exit(exit_code);
        }
        Err(e) => {
            cli::report_error(&e);
            process::exit(1);
        }
    }
}
