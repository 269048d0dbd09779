//! Release replay from the source organization into the destination.
//!
//! Releases are listed once, backed up, then replayed oldest first. A release
//! with assets is treated as a package release: its assets are staged in the
//! backup directory, its body gains a package URI line and the staged assets
//! are uploaded once the destination release exists.

mod package;

pub use package::{PACKAGE_URI_MARKER, PackageIdentity, has_package_uri, rewrite_body};

use crate::MigrationConfig;
use crate::backup::{BackupStore, MigrationRecord};
use crate::error::Result;
use crate::github::{CreateReleaseRequest, Release, ReleaseApi};
use std::path::PathBuf;

/// What happened to one source release
#[derive(Debug, Clone)]
pub struct ReleaseOutcome {
    /// Tag of the release
    pub tag_name: String,
    /// Request sent (or that would have been sent) to the destination
    pub request: CreateReleaseRequest,
    /// Destination release id; `None` on a dry run
    pub release_id: Option<u64>,
    /// Destination release page; `None` on a dry run
    pub html_url: Option<String>,
    /// Staged asset files
    pub staged_assets: Vec<PathBuf>,
    /// Names of assets uploaded to the destination
    pub uploaded_assets: Vec<String>,
}

/// Result of a migration run
#[derive(Debug, Clone, Default)]
pub struct MigrationSummary {
    /// Number of releases listed in the source repository
    pub releases_found: usize,
    /// Per-release outcomes in processing order (oldest first)
    pub outcomes: Vec<ReleaseOutcome>,
    /// Location of the release list backup
    pub backup_file: Option<PathBuf>,
    /// Whether destination calls were skipped
    pub dry_run: bool,
}

impl MigrationSummary {
    /// Releases created in the destination
    pub fn releases_created(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.release_id.is_some())
            .count()
    }

    /// Assets uploaded across all releases
    pub fn assets_uploaded(&self) -> usize {
        self.outcomes.iter().map(|o| o.uploaded_assets.len()).sum()
    }
}

/// Replays the releases of one repository
pub struct Migrator<A> {
    api: A,
    config: MigrationConfig,
    store: BackupStore,
}

impl<A: ReleaseApi> Migrator<A> {
    /// Create a migrator that talks to GitHub through `api`
    pub fn new(api: A, config: MigrationConfig) -> Self {
        let store = BackupStore::new(&config.backup_root, &config.source_org, &config.repo);
        Self { api, config, store }
    }

    /// Backup store used by this run
    pub fn store(&self) -> &BackupStore {
        &self.store
    }

    /// The API implementation
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Run the migration, stopping at the first failure
    pub async fn run(&self) -> Result<MigrationSummary> {
        let config = &self.config;
        log::info!(
            "Listing releases of {}/{}",
            config.source_org,
            config.repo
        );
        let releases = self
            .api
            .list_releases(&config.source_org, &config.repo)
            .await?;

        let mut summary = MigrationSummary {
            releases_found: releases.len(),
            dry_run: config.dry_run,
            ..Default::default()
        };
        summary.backup_file = Some(self.store.write_release_list(&releases).await?);

        if releases.is_empty() {
            log::info!("No releases found in {}/{}", config.source_org, config.repo);
            return Ok(summary);
        }

        // The API lists newest first; replay oldest first so the destination
        // history keeps its order.
        for release in releases.iter().rev() {
            let outcome = self.migrate_release(release).await?;
            summary.outcomes.push(outcome);
        }

        Ok(summary)
    }

    /// Replay a single release
    pub async fn migrate_release(&self, release: &Release) -> Result<ReleaseOutcome> {
        let config = &self.config;
        let tag = release.tag_name.as_str();
        log::info!("Migrating release {tag}");

        let mut body = release.body.clone().unwrap_or_default();
        let mut staged_assets = Vec::new();

        if release.is_package_release() {
            let dir = self.store.prepare_tag_dir(tag).await?;
            for asset in &release.assets {
                staged_assets.push(self.api.download_asset(asset, &dir).await?);
            }

            match PackageIdentity::from_tag(tag) {
                Some(identity) => {
                    let uri = identity.uri(&config.destination_org, &config.repo);
                    body = rewrite_body(&body, &uri);
                }
                None => log::warn!("Tag {tag} is not <name>.<version>; body left unchanged"),
            }
        }

        let request = CreateReleaseRequest::from_release(release, body);

        if config.dry_run {
            log::info!(
                "Dry run: would create {tag} in {}/{} with {} asset(s)",
                config.destination_org,
                config.repo,
                staged_assets.len()
            );
            return Ok(ReleaseOutcome {
                tag_name: tag.to_string(),
                request,
                release_id: None,
                html_url: None,
                staged_assets,
                uploaded_assets: Vec::new(),
            });
        }

        let created = self
            .api
            .create_release(&config.destination_org, &config.repo, &request)
            .await?;
        log::info!("Created release {tag} ({})", created.html_url);

        let mut record = MigrationRecord::new(tag, release.id, created.id, &created.html_url);
        let uploaded = self
            .upload_staged(created.id, &staged_assets, &mut record)
            .await;
        // Journal what reached the destination even if an upload failed.
        self.store.record_migration(record.clone()).await?;
        uploaded?;

        Ok(ReleaseOutcome {
            tag_name: tag.to_string(),
            request,
            release_id: Some(created.id),
            html_url: Some(created.html_url),
            staged_assets,
            uploaded_assets: record.assets,
        })
    }

    async fn upload_staged(
        &self,
        release_id: u64,
        staged: &[PathBuf],
        record: &mut MigrationRecord,
    ) -> Result<()> {
        for path in staged {
            let asset = self
                .api
                .upload_asset(&self.config.destination_org, &self.config.repo, release_id, path)
                .await?;
            log::info!("Uploaded {} ({} bytes)", asset.name, asset.size);
            record.assets.push(asset.name);
        }
        Ok(())
    }
}
