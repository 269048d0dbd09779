//! Release payloads exchanged with the GitHub REST API.
//!
//! Only the fields the migration reads are typed. Everything else on a source
//! release is kept in `extra` so the backup file holds the full object.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A release as returned by `GET /repos/{org}/{repo}/releases`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Release {
    /// Release id in the source repository
    pub id: u64,
    /// Git tag the release is attached to
    pub tag_name: String,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Markdown body
    #[serde(default)]
    pub body: Option<String>,
    /// Whether the release is a draft
    #[serde(default)]
    pub draft: bool,
    /// Whether the release is a prerelease
    #[serde(default)]
    pub prerelease: bool,
    /// Commit SHA or branch the release was created from
    #[serde(default)]
    pub target_commitish: String,
    /// Release page
    #[serde(default)]
    pub html_url: String,
    /// Files attached to the release
    #[serde(default)]
    pub assets: Vec<Asset>,
    /// Fields not used by the migration, preserved for the backup
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Release {
    /// Releases carrying assets were produced by a packaging workflow
    pub fn is_package_release(&self) -> bool {
        !self.assets.is_empty()
    }
}

/// A file attached to a release
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    /// Asset id
    pub id: u64,
    /// File name
    pub name: String,
    /// Size in bytes
    #[serde(default)]
    pub size: u64,
    /// MIME type reported by GitHub
    #[serde(default)]
    pub content_type: Option<String>,
    /// Public download location
    pub browser_download_url: String,
    /// Fields not used by the migration, preserved for the backup
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Body of `POST /repos/{org}/{repo}/releases`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateReleaseRequest {
    /// Tag to create the release for
    pub tag_name: String,
    /// Display name
    pub name: String,
    /// Markdown body
    pub body: String,
    /// Create as prerelease
    pub prerelease: bool,
    /// Create as draft
    pub draft: bool,
    /// Commit to anchor a new tag on; the destination branch tip when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_commitish: Option<String>,
}

impl CreateReleaseRequest {
    /// Build the destination request for a source release with the given body.
    ///
    /// The source `target_commitish` is forwarded only when it is a full commit
    /// SHA. Branch names may not exist in the destination repository.
    pub fn from_release(release: &Release, body: impl Into<String>) -> Self {
        let target_commitish = is_full_commit_sha(&release.target_commitish)
            .then(|| release.target_commitish.clone());

        Self {
            tag_name: release.tag_name.clone(),
            name: release
                .name
                .clone()
                .unwrap_or_else(|| release.tag_name.clone()),
            body: body.into(),
            prerelease: release.prerelease,
            draft: release.draft,
            target_commitish,
        }
    }
}

/// The subset of the created release the migration needs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedRelease {
    /// Release id in the destination repository
    pub id: u64,
    /// Release page
    #[serde(default)]
    pub html_url: String,
    /// Hypermedia upload template
    #[serde(default)]
    pub upload_url: String,
}

/// Response of a successful asset upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedAsset {
    /// Asset id in the destination repository
    pub id: u64,
    /// File name
    pub name: String,
    /// Size in bytes
    #[serde(default)]
    pub size: u64,
    /// Public download location
    #[serde(default)]
    pub browser_download_url: String,
}

/// 40 lowercase hexadecimal characters, the form GitHub reports commit SHAs in
pub fn is_full_commit_sha(reference: &str) -> bool {
    reference.len() == 40 && reference.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}
