//! The migration command.

use crate::cli::{Args, OutputManager};
use crate::error::Result;
use crate::github::GitHubClient;
use crate::migrate::{MigrationSummary, Migrator};

/// Run a migration from parsed arguments and the token environment value.
///
/// Argument validation failures are reported here and yield exit code 1;
/// every other failure is returned to the caller.
pub async fn execute_migrate(args: Args, token: Option<String>) -> Result<i32> {
    let output = OutputManager::new();

    if let Err(validation_error) = args.validate() {
        output.error(&format!("Invalid arguments: {validation_error}"));
        return Ok(1);
    }

    // Configuration is checked before any network call
    let config = args.into_config(token)?;
    let client = GitHubClient::new(
        config.api_url.clone(),
        config.upload_url.clone(),
        config.token.clone(),
    )?;

    let _ = output.section(&format!(
        "{}/{} → {}/{}",
        config.source_org, config.repo, config.destination_org, config.repo
    ));
    if config.dry_run {
        let _ = output.warn("Dry run: no release will be created");
    }

    let migrator = Migrator::new(client, config);
    let summary = migrator.run().await?;
    print_summary(&output, &summary);

    Ok(0)
}

fn print_summary(output: &OutputManager, summary: &MigrationSummary) {
    if let Some(backup) = &summary.backup_file {
        let _ = output.println(&format!("Backup: {}", backup.display()));
    }

    if summary.releases_found == 0 {
        let _ = output.warn("No releases found");
        return;
    }

    for outcome in &summary.outcomes {
        match &outcome.html_url {
            Some(url) => {
                let _ = output.success(&format!("{} → {}", outcome.tag_name, url));
            }
            None => {
                let _ = output.println(&format!("• {} (not created)", outcome.tag_name));
            }
        }
        for asset in &outcome.uploaded_assets {
            let _ = output.indent(&format!("uploaded {asset}"));
        }
        if outcome.release_id.is_none() {
            for path in &outcome.staged_assets {
                let _ = output.indent(&format!("staged {}", path.display()));
            }
        }
    }

    let _ = output.println("");
    if summary.dry_run {
        let _ = output.success(&format!(
            "Dry run complete: {} release(s) inspected",
            summary.outcomes.len()
        ));
    } else {
        let _ = output.success(&format!(
            "Migrated {} release(s), {} asset(s)",
            summary.releases_created(),
            summary.assets_uploaded()
        ));
    }
}
