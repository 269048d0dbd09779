//! reqwest-backed GitHub REST client

use super::ReleaseApi;
use super::models::{Asset, CreateReleaseRequest, CreatedRelease, Release, UploadedAsset};
use crate::error::{ConfigError, DestinationError, Result, SourceError};
use futures_lite::StreamExt;
use reqwest::{Body, StatusCode};
use reqwest::header::{ACCEPT, CONTENT_LENGTH, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use secrecy::{ExposeSecret, SecretString};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tokio_util::io::{ReaderStream, StreamReader};
use url::Url;

const GITHUB_JSON: &str = "application/vnd.github+json";
const OCTET_STREAM: &str = "application/octet-stream";

/// GitHub REST client.
///
/// Listing and downloading are anonymous; creating releases and uploading
/// assets send the bearer token.
pub struct GitHubClient {
    http: reqwest::Client,
    api_url: Url,
    upload_url: Url,
    token: SecretString,
}

impl GitHubClient {
    /// Create a client against the given API and upload hosts
    pub fn new(api_url: Url, upload_url: Url, token: SecretString) -> Result<Self> {
        for url in [&api_url, &upload_url] {
            if url.cannot_be_a_base() {
                return Err(ConfigError::InvalidBaseUrl {
                    url: url.to_string(),
                    reason: "not a base URL".to_string(),
                }
                .into());
            }
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_JSON));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            )),
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            api_url,
            upload_url,
            token,
        })
    }

    fn releases_endpoint(&self, org: &str, repo: &str) -> String {
        format!(
            "{}/repos/{org}/{repo}/releases",
            self.api_url.as_str().trim_end_matches('/')
        )
    }

    fn assets_endpoint(&self, org: &str, repo: &str, release_id: u64) -> String {
        format!(
            "{}/repos/{org}/{repo}/releases/{release_id}/assets",
            self.upload_url.as_str().trim_end_matches('/')
        )
    }
}

/// Resolve where an asset is staged, rejecting names that would escape `dir`
fn staged_path(asset: &Asset, dir: &Path) -> Result<PathBuf> {
    let name = asset.name.as_str();
    if name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\')
    {
        return Err(SourceError::InvalidAssetName {
            asset: asset.name.clone(),
            dir: dir.to_path_buf(),
        }
        .into());
    }
    Ok(dir.join(name))
}

impl ReleaseApi for GitHubClient {
    async fn list_releases(&self, org: &str, repo: &str) -> Result<Vec<Release>> {
        let url = self.releases_endpoint(org, repo);
        log::debug!("GET {url}");

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::ListFailed {
                org: org.to_string(),
                repo: repo.to_string(),
                status,
                body,
            }
            .into());
        }

        Ok(response.json::<Vec<Release>>().await?)
    }

    async fn download_asset(&self, asset: &Asset, dest_dir: &Path) -> Result<PathBuf> {
        let path = staged_path(asset, dest_dir)?;
        log::debug!("GET {} -> {}", asset.browser_download_url, path.display());

        let response = self
            .http
            .get(&asset.browser_download_url)
            .header(ACCEPT, OCTET_STREAM)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::DownloadFailed {
                asset: asset.name.clone(),
                status,
            }
            .into());
        }

        let stream = response.bytes_stream().map(|chunk| chunk.map_err(std::io::Error::other));
        let reader = StreamReader::new(stream);
        tokio::pin!(reader);

        let mut file = tokio::fs::File::create(&path).await?;
        let written = tokio::io::copy(&mut reader, &mut file).await?;
        file.flush().await?;

        log::info!("Downloaded {} ({} bytes)", asset.name, written);
        Ok(path)
    }

    async fn create_release(
        &self,
        org: &str,
        repo: &str,
        request: &CreateReleaseRequest,
    ) -> Result<CreatedRelease> {
        let url = self.releases_endpoint(org, repo);
        log::debug!("POST {url} (tag {})", request.tag_name);

        let response = self
            .http
            .post(&url)
            .bearer_auth(self.token.expose_secret())
            .json(request)
            .send()
            .await?;
        let status = response.status();
        if status != StatusCode::CREATED {
            let body = response.text().await.unwrap_or_default();
            return Err(DestinationError::CreateFailed {
                tag: request.tag_name.clone(),
                status,
                body,
            }
            .into());
        }

        Ok(response.json::<CreatedRelease>().await?)
    }

    async fn upload_asset(
        &self,
        org: &str,
        repo: &str,
        release_id: u64,
        path: &Path,
    ) -> Result<UploadedAsset> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| DestinationError::InvalidAssetPath {
                path: path.to_path_buf(),
            })?
            .to_string();
        let url = self.assets_endpoint(org, repo, release_id);
        log::debug!("POST {url}?name={name}");

        let file = tokio::fs::File::open(path).await?;
        let length = file.metadata().await?.len();
        let response = self
            .http
            .post(&url)
            .query(&[("name", name.as_str())])
            .bearer_auth(self.token.expose_secret())
            .header(CONTENT_TYPE, OCTET_STREAM)
            .header(CONTENT_LENGTH, length)
            .body(Body::wrap_stream(ReaderStream::new(file)))
            .send()
            .await?;
        let status = response.status();
        if status != StatusCode::CREATED {
            let body = response.text().await.unwrap_or_default();
            return Err(DestinationError::UploadFailed {
                asset: name,
                release_id,
                status,
                body,
            }
            .into());
        }

        Ok(response.json::<UploadedAsset>().await?)
    }
}
