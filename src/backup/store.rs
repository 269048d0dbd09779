//! On-disk backup of a migration run.
//!
//! Layout under the backup root:
//!
//! ```text
//! <root>/<source-org>/<repo>/releases.json   full source release list
//! <root>/<source-org>/<repo>/migrated.json   journal of created releases
//! <root>/<source-org>/<repo>/<tag>/          staged assets of one release
//! ```

use super::MigrationRecord;
use crate::error::Result;
use crate::github::Release;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

const RELEASES_FILE: &str = "releases.json";
const JOURNAL_FILE: &str = "migrated.json";

/// Backup directory for one source repository
#[derive(Debug, Clone)]
pub struct BackupStore {
    repo_dir: PathBuf,
}

impl BackupStore {
    /// Backup store for `org/repo` under `root`
    pub fn new(root: impl AsRef<Path>, org: &str, repo: &str) -> Self {
        Self {
            repo_dir: root.as_ref().join(org).join(repo),
        }
    }

    /// Directory holding everything for this repository
    pub fn repo_dir(&self) -> &Path {
        &self.repo_dir
    }

    /// Path of the release list backup
    pub fn releases_file(&self) -> PathBuf {
        self.repo_dir.join(RELEASES_FILE)
    }

    /// Path of the migration journal
    pub fn journal_file(&self) -> PathBuf {
        self.repo_dir.join(JOURNAL_FILE)
    }

    /// Staging directory for the assets of `tag`
    pub fn tag_dir(&self, tag: &str) -> PathBuf {
        self.repo_dir.join(tag)
    }

    /// Write the fetched release list, replacing any previous backup
    pub async fn write_release_list(&self, releases: &[Release]) -> Result<PathBuf> {
        let path = self.releases_file();
        write_json_atomic(&path, &releases).await?;
        log::info!(
            "Backed up {} release(s) to {}",
            releases.len(),
            path.display()
        );
        Ok(path)
    }

    /// Create and return the staging directory for `tag`
    pub async fn prepare_tag_dir(&self, tag: &str) -> Result<PathBuf> {
        let dir = self.tag_dir(tag);
        fs::create_dir_all(&dir).await?;
        Ok(dir)
    }

    /// Read the migration journal; empty when nothing was migrated yet
    pub async fn read_journal(&self) -> Result<Vec<MigrationRecord>> {
        match fs::read(self.journal_file()).await {
            Ok(content) => Ok(serde_json::from_slice(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Append a record to the migration journal
    pub async fn record_migration(&self, record: MigrationRecord) -> Result<()> {
        let mut journal = self.read_journal().await?;
        journal.push(record);
        write_json_atomic(&self.journal_file(), &journal).await
    }
}

/// Serialize to a temporary sibling, then rename over the target
async fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let serialized = serde_json::to_vec_pretty(value)?;
    let temp_path = path.with_extension("json.tmp");
    {
        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(&serialized).await?;
        file.sync_all().await?;
    }
    fs::rename(&temp_path, path).await?;
    Ok(())
}
