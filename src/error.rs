//! Error types for release migration.
//!
//! Every failure aborts the run. The variants carry enough context (status code,
//! response text, tag or asset name) to decide how to recover by hand.

use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for release_migrator operations
pub type Result<T> = std::result::Result<T, MigrationError>;

/// Main error type for all release_migrator operations
#[derive(Error, Debug)]
pub enum MigrationError {
    /// Configuration errors, raised before any network call
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Errors reading from the source repository
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Errors writing to the destination repository
    #[error("Destination error: {0}")]
    Destination(#[from] DestinationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP transport errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Access token environment variable is not set
    #[error("Access token not provided. Set the {variable} environment variable.")]
    MissingToken {
        /// Name of the environment variable
        variable: String,
    },

    /// A base URL cannot be used to build API endpoints
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// The offending URL
        url: String,
        /// Reason for the error
        reason: String,
    },
}

/// Errors reading releases and assets from the source repository
#[derive(Error, Debug)]
pub enum SourceError {
    /// Listing releases returned a non-success status
    #[error("Failed to list releases of {org}/{repo}: {status} {body}")]
    ListFailed {
        /// Source organization
        org: String,
        /// Repository name
        repo: String,
        /// HTTP status returned
        status: StatusCode,
        /// Response text
        body: String,
    },

    /// Downloading an asset returned a non-success status
    #[error("Failed to download asset '{asset}': {status}")]
    DownloadFailed {
        /// Asset file name
        asset: String,
        /// HTTP status returned
        status: StatusCode,
    },

    /// The asset name cannot be used as a local file name
    #[error("Asset name '{asset}' cannot be staged under {dir}")]
    InvalidAssetName {
        /// Asset file name
        asset: String,
        /// Staging directory
        dir: PathBuf,
    },
}

/// Errors writing releases and assets to the destination repository
#[derive(Error, Debug)]
pub enum DestinationError {
    /// Release creation did not return 201 Created
    #[error("Failed to create release '{tag}': {status} {body}")]
    CreateFailed {
        /// Tag of the release being created
        tag: String,
        /// HTTP status returned
        status: StatusCode,
        /// Response text
        body: String,
    },

    /// Asset upload did not return 201 Created
    #[error("Failed to upload asset '{asset}' to release {release_id}: {status} {body}")]
    UploadFailed {
        /// Asset file name
        asset: String,
        /// Destination release id
        release_id: u64,
        /// HTTP status returned
        status: StatusCode,
        /// Response text
        body: String,
    },

    /// A staged asset path has no usable file name
    #[error("Invalid staged asset path: {path:?}")]
    InvalidAssetPath {
        /// Path of the staged file
        path: PathBuf,
    },
}

impl MigrationError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            MigrationError::Config(ConfigError::MissingToken { variable }) => vec![
                format!("Export a personal access token: export {variable}=<token>"),
                "The token needs write access to releases of the destination repository"
                    .to_string(),
            ],
            MigrationError::Source(SourceError::ListFailed { org, repo, .. }) => vec![
                format!("Verify that {org}/{repo} exists and is public"),
                "Use --source-org if the releases live in another organization".to_string(),
            ],
            MigrationError::Destination(DestinationError::CreateFailed { status, .. })
                if *status == StatusCode::UNPROCESSABLE_ENTITY =>
            {
                vec![
                    "The tag may already have a release in the destination repository".to_string(),
                    "Compare migrated.json in the backup directory with the destination releases"
                        .to_string(),
                ]
            }
            MigrationError::Destination(DestinationError::CreateFailed { status, .. })
            | MigrationError::Destination(DestinationError::UploadFailed { status, .. })
                if *status == StatusCode::UNAUTHORIZED || *status == StatusCode::FORBIDDEN =>
            {
                vec![
                    "Check that the access token is valid and has the repo scope".to_string(),
                ]
            }
            MigrationError::Destination(_) => vec![
                "Releases created before the failure were left in place".to_string(),
                "Staged assets and releases.json remain in the backup directory".to_string(),
            ],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }
}
