//! Journal entries written after each migrated release.

use serde::{Deserialize, Serialize};

/// One release that reached the destination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MigrationRecord {
    /// Tag of the release in both repositories
    pub tag_name: String,
    /// Release id in the source repository
    pub source_release_id: u64,
    /// Release id in the destination repository
    pub destination_release_id: u64,
    /// Destination release page
    pub html_url: String,
    /// Names of the assets uploaded to the destination release
    pub assets: Vec<String>,
    /// When the release was created in the destination
    pub migrated_at: chrono::DateTime<chrono::Utc>,
}

impl MigrationRecord {
    /// Record for a freshly created release with no assets yet
    pub fn new(
        tag_name: impl Into<String>,
        source_release_id: u64,
        destination_release_id: u64,
        html_url: impl Into<String>,
    ) -> Self {
        Self {
            tag_name: tag_name.into(),
            source_release_id,
            destination_release_id,
            html_url: html_url.into(),
            assets: Vec::new(),
            migrated_at: chrono::Utc::now(),
        }
    }
}
