//! # Release Migrator
//!
//! Replays the GitHub releases of a repository that was transferred to another
//! organization and forked back, recreating every release and its assets in the
//! original organization.
//!
//! For each release, oldest first:
//!
//! - package releases (those with assets) have their assets staged locally and
//!   a `* Package URI:` line appended to their body
//! - the release is created in the destination organization
//! - the staged assets are uploaded to the new release
//!
//! The full source release list and a journal of created releases are kept
//! under `releases/<source-org>/<repo>/`.
//!
//! ## Usage
//!
//! ```bash
//! GITHUB_TOKEN=... release_migrator --repo fastqc --destination-org icgc-argo
//! GITHUB_TOKEN=... release_migrator --repo fastqc --destination-org icgc-argo --dry-run
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod backup;
pub mod cli;
pub mod error;
pub mod github;
pub mod migrate;

pub use backup::{BackupStore, MigrationRecord};
pub use cli::Args;
pub use error::{MigrationError, Result};
pub use github::{GitHubClient, ReleaseApi};
pub use migrate::{MigrationSummary, Migrator, PackageIdentity};

use secrecy::SecretString;
use std::path::PathBuf;
use url::Url;

/// Organization the releases are read from unless `--source-org` is given
pub const DEFAULT_SOURCE_ORG: &str = "icgc-argo-workflows";

/// Environment variable holding the destination access token
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Default backup root, relative to the working directory
pub const DEFAULT_BACKUP_ROOT: &str = "releases";

/// GitHub REST API host
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// GitHub release asset upload host
pub const DEFAULT_UPLOAD_URL: &str = "https://uploads.github.com";

/// Configuration for a migration run
#[derive(Debug, Clone)]
pub struct MigrationConfig {
    /// Organization currently holding the releases
    pub source_org: String,
    /// Organization the releases are recreated in
    pub destination_org: String,
    /// Repository name, identical in both organizations
    pub repo: String,
    /// Access token for the destination
    pub token: SecretString,
    /// Root of the backup tree
    pub backup_root: PathBuf,
    /// REST API base URL
    pub api_url: Url,
    /// Asset upload base URL
    pub upload_url: Url,
    /// Skip release creation and uploads
    pub dry_run: bool,
}

impl MigrationConfig {
    /// Configuration with the default source organization, hosts and backup root
    pub fn new(
        destination_org: impl Into<String>,
        repo: impl Into<String>,
        token: SecretString,
    ) -> Result<Self> {
        Ok(Self {
            source_org: DEFAULT_SOURCE_ORG.to_string(),
            destination_org: destination_org.into(),
            repo: repo.into(),
            token,
            backup_root: PathBuf::from(DEFAULT_BACKUP_ROOT),
            api_url: parse_base_url(DEFAULT_API_URL)?,
            upload_url: parse_base_url(DEFAULT_UPLOAD_URL)?,
            dry_run: false,
        })
    }
}

fn parse_base_url(url: &str) -> Result<Url> {
    Url::parse(url).map_err(|e| {
        error::ConfigError::InvalidBaseUrl {
            url: url.to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}
