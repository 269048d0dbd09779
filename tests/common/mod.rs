//! Recording in-memory `ReleaseApi` shared by the integration tests.

#![allow(dead_code)]

pub mod stub_server;

use release_migrator::error::{DestinationError, Result, SourceError};
use release_migrator::github::{
    Asset, CreateReleaseRequest, CreatedRelease, Release, ReleaseApi, UploadedAsset,
};
use release_migrator::{MigrationConfig, Migrator};
use reqwest::StatusCode;
use secrecy::SecretString;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// One call made against the fake API
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List { org: String, repo: String },
    Download { asset: String, dir: PathBuf },
    Create { org: String, repo: String, request: CreateReleaseRequest },
    Upload { org: String, repo: String, release_id: u64, name: String },
}

#[derive(Default)]
pub struct FakeApi {
    pub releases: Vec<Release>,
    pub list_status: Option<StatusCode>,
    pub fail_create_tag: Option<String>,
    pub calls: Mutex<Vec<Call>>,
}

impl FakeApi {
    pub fn with_releases(releases: Vec<Release>) -> Self {
        Self {
            releases,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn created_tags(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Create { request, .. } => Some(request.tag_name),
                _ => None,
            })
            .collect()
    }

    pub fn uploads(&self) -> Vec<(u64, String)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Upload {
                    release_id, name, ..
                } => Some((release_id, name)),
                _ => None,
            })
            .collect()
    }

    pub fn downloads(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Download { asset, .. } => Some(asset),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl ReleaseApi for FakeApi {
    async fn list_releases(&self, org: &str, repo: &str) -> Result<Vec<Release>> {
        self.record(Call::List {
            org: org.to_string(),
            repo: repo.to_string(),
        });
        if let Some(status) = self.list_status {
            return Err(SourceError::ListFailed {
                org: org.to_string(),
                repo: repo.to_string(),
                status,
                body: "{\"message\":\"Not Found\"}".to_string(),
            }
            .into());
        }
        Ok(self.releases.clone())
    }

    async fn download_asset(&self, asset: &Asset, dest_dir: &Path) -> Result<PathBuf> {
        self.record(Call::Download {
            asset: asset.name.clone(),
            dir: dest_dir.to_path_buf(),
        });
        let path = dest_dir.join(&asset.name);
        tokio::fs::write(&path, format!("contents of {}", asset.name)).await?;
        Ok(path)
    }

    async fn create_release(
        &self,
        org: &str,
        repo: &str,
        request: &CreateReleaseRequest,
    ) -> Result<CreatedRelease> {
        let id = 1000 + self.created_tags().len() as u64;
        self.record(Call::Create {
            org: org.to_string(),
            repo: repo.to_string(),
            request: request.clone(),
        });
        if self.fail_create_tag.as_deref() == Some(request.tag_name.as_str()) {
            return Err(DestinationError::CreateFailed {
                tag: request.tag_name.clone(),
                status: StatusCode::UNPROCESSABLE_ENTITY,
                body: "{\"message\":\"Validation Failed\"}".to_string(),
            }
            .into());
        }
        Ok(CreatedRelease {
            id,
            html_url: format!("https://github.com/{org}/{repo}/releases/tag/{}", request.tag_name),
            upload_url: String::new(),
        })
    }

    async fn upload_asset(
        &self,
        org: &str,
        repo: &str,
        release_id: u64,
        path: &Path,
    ) -> Result<UploadedAsset> {
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        let size = std::fs::metadata(path)?.len();
        self.record(Call::Upload {
            org: org.to_string(),
            repo: repo.to_string(),
            release_id,
            name: name.clone(),
        });
        Ok(UploadedAsset {
            id: release_id * 10,
            name,
            size,
            browser_download_url: String::new(),
        })
    }
}

pub fn release(id: u64, tag: &str, body: Option<&str>, assets: &[&str]) -> Release {
    let assets: Vec<_> = assets
        .iter()
        .enumerate()
        .map(|(i, name)| {
            json!({
                "id": id * 100 + i as u64,
                "name": name,
                "size": 10,
                "content_type": "application/gzip",
                "browser_download_url": format!("https://github.com/fork-org/demo/releases/download/{tag}/{name}")
            })
        })
        .collect();

    serde_json::from_value(json!({
        "id": id,
        "tag_name": tag,
        "name": format!("{tag} release"),
        "body": body,
        "draft": false,
        "prerelease": false,
        "target_commitish": "main",
        "html_url": format!("https://github.com/fork-org/demo/releases/tag/{tag}"),
        "assets": assets
    }))
    .unwrap()
}

pub fn config(backup_root: &Path) -> MigrationConfig {
    let mut config =
        MigrationConfig::new("ICGC-ARGO", "demo", SecretString::from("test-token")).unwrap();
    config.source_org = "fork-org".to_string();
    config.backup_root = backup_root.to_path_buf();
    config
}

pub fn migrator(api: FakeApi, backup_root: &Path) -> Migrator<FakeApi> {
    Migrator::new(api, config(backup_root))
}
