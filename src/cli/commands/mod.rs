//! Command execution for the migration run.

mod migrate;

pub use migrate::execute_migrate;

use super::OutputManager;
use crate::error::MigrationError;

/// Print a fatal error with its recovery suggestions to stderr
pub fn report_error(error: &MigrationError) {
    let output = OutputManager::new();
    output.error(&format!("Fatal error: {error}"));

    let suggestions = error.recovery_suggestions();
    if !suggestions.is_empty() {
        output.error("Recovery suggestions:");
        for suggestion in suggestions {
            output.error(&format!("  • {suggestion}"));
        }
    }
}
