//! GitHub integration for release migration

mod client;
mod models;

pub use client::GitHubClient;
pub use models::{
    Asset, CreateReleaseRequest, CreatedRelease, Release, UploadedAsset, is_full_commit_sha,
};

use crate::error::Result;
use std::path::{Path, PathBuf};

/// Release operations the migrator drives, in the order it drives them
#[allow(async_fn_in_trait)]
pub trait ReleaseApi {
    /// List the releases of `org/repo`, newest first (first page only)
    async fn list_releases(&self, org: &str, repo: &str) -> Result<Vec<Release>>;

    /// Stream an asset into `dest_dir`, returning the staged file path
    async fn download_asset(&self, asset: &Asset, dest_dir: &Path) -> Result<PathBuf>;

    /// Create a release in `org/repo`
    async fn create_release(
        &self,
        org: &str,
        repo: &str,
        request: &CreateReleaseRequest,
    ) -> Result<CreatedRelease>;

    /// Upload a staged file to release `release_id` of `org/repo`
    async fn upload_asset(
        &self,
        org: &str,
        repo: &str,
        release_id: u64,
        path: &Path,
    ) -> Result<UploadedAsset>;
}
