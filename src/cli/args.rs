//! Command line argument parsing and validation.

use crate::error::{ConfigError, Result};
use crate::{
    DEFAULT_API_URL, DEFAULT_BACKUP_ROOT, DEFAULT_SOURCE_ORG, DEFAULT_UPLOAD_URL,
    MigrationConfig, TOKEN_ENV_VAR,
};
use clap::Parser;
use secrecy::SecretString;
use std::path::PathBuf;
use url::Url;

/// Recreate GitHub releases in the organization a repository came from
#[derive(Parser, Debug, Clone)]
#[command(
    name = "release_migrator",
    version,
    about = "Recreate GitHub releases in the organization a repository came from",
    long_about = "Copy every release of <source-org>/<repo> into <destination-org>/<repo>,
oldest first, re-uploading release assets.

The destination access token is read from the GITHUB_TOKEN environment variable.

Usage:
  release_migrator --repo fastqc --destination-org icgc-argo
  release_migrator --repo fastqc --destination-org icgc-argo --source-org my-fork-org --dry-run"
)]
pub struct Args {
    /// Repository name (same in both organizations)
    #[arg(long, value_name = "NAME")]
    pub repo: String,

    /// Organization to recreate the releases in
    #[arg(long = "destination-org", value_name = "ORG")]
    pub destination_org: String,

    /// Organization the releases are read from
    #[arg(long = "source-org", value_name = "ORG", default_value = DEFAULT_SOURCE_ORG)]
    pub source_org: String,

    /// Directory for the release backup and staged assets
    #[arg(long = "backup-dir", value_name = "DIR", default_value = DEFAULT_BACKUP_ROOT)]
    pub backup_dir: PathBuf,

    /// GitHub REST API base URL
    #[arg(long = "api-url", value_name = "URL", default_value = DEFAULT_API_URL)]
    pub api_url: Url,

    /// GitHub asset upload base URL
    #[arg(long = "upload-url", value_name = "URL", default_value = DEFAULT_UPLOAD_URL)]
    pub upload_url: Url,

    /// List, back up and stage assets without creating anything
    #[arg(long)]
    pub dry_run: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        for (flag, value) in [
            ("--repo", &self.repo),
            ("--destination-org", &self.destination_org),
            ("--source-org", &self.source_org),
        ] {
            if value.trim().is_empty() {
                return Err(format!("{flag} must not be empty"));
            }
            if value.contains('/') {
                return Err(format!("{flag} must be a single name, got '{value}'"));
            }
        }
        Ok(())
    }

    /// Build the run configuration from these arguments and the token
    /// environment variable value
    pub fn into_config(self, token: Option<String>) -> Result<MigrationConfig> {
        let token = token
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingToken {
                variable: TOKEN_ENV_VAR.to_string(),
            })?;

        Ok(MigrationConfig {
            source_org: self.source_org,
            destination_org: self.destination_org,
            repo: self.repo,
            token: SecretString::from(token),
            backup_root: self.backup_dir,
            api_url: self.api_url,
            upload_url: self.upload_url,
            dry_run: self.dry_run,
        })
    }
}
