//! Remote contents API client.
//!
//! Every network call the viewer makes goes through `ContentFetcher`:
//! - `list_directory`: one contents call, upstream order preserved
//! - `get_file_metadata`: one contents call for a single path
//! - `get_file_content`: metadata call, then the raw download
//!
//! No retries. Rate-limit responses surface as `AppError::RemoteRateLimited`
//! so the caller can tell the user to wait or configure a token.

use std::fmt;
use std::time::Duration;

use reqwest::header::{HeaderMap, ACCEPT};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{EntryKind, FileMetadata, RepoRef, TreeEntry};

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
const RAW_CONTENT_HOST: &str = "raw.githubusercontent.com";
const API_MEDIA_TYPE: &str = "application/vnd.github.v3+json";

#[derive(Clone)]
pub struct ClientConfig {
    pub api_base: Url,
    pub token: Option<String>,
    pub user_agent: String,
    /// Deadline applied to each outbound request. `None` leaves latency
    /// bounds to the caller.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(api_base: &str) -> Result<Self> {
        let api_base = Url::parse(api_base)
            .map_err(|e| AppError::Internal(format!("Invalid API base URL {}: {}", api_base, e)))?;
        if api_base.cannot_be_a_base() {
            return Err(AppError::Internal(format!("API base URL cannot be a base: {}", api_base)));
        }

        Ok(Self {
            api_base,
            token: None,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: None,
        })
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_base", &self.api_base.as_str())
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// One item of a contents API response.
#[derive(Debug, Deserialize)]
struct ApiEntry {
    name: String,
    #[serde(default)]
    path: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    download_url: Option<String>,
    #[serde(default)]
    size: Option<u64>,
}

/// Directories come back as an array, files as a single object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ContentsResponse {
    Listing(Vec<ApiEntry>),
    Single(ApiEntry),
}

pub struct ContentFetcher {
    client: Client,
    config: ClientConfig,
}

impl ContentFetcher {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        tracing::debug!(config = ?config, "Content fetcher ready");
        Ok(Self { client, config })
    }

    pub async fn list_directory(&self, repo: &RepoRef, path: &str) -> Result<Vec<TreeEntry>> {
        let path = normalize_path(path)?;
        match self.get_contents(repo, &path).await? {
            ContentsResponse::Listing(items) => Ok(items
                .into_iter()
                .map(|item| {
                    let path = if item.path.is_empty() {
                        join_path(&path, &item.name)
                    } else {
                        item.path
                    };
                    TreeEntry {
                        kind: EntryKind::from_api_type(&item.kind),
                        name: item.name,
                        path,
                    }
                })
                .collect()),
            ContentsResponse::Single(_) => {
                Err(AppError::NotADirectory(display_path(&path).to_string()))
            }
        }
    }

    pub async fn get_file_metadata(&self, repo: &RepoRef, path: &str) -> Result<FileMetadata> {
        let path = normalize_path(path)?;
        if path.is_empty() {
            return Err(AppError::NotAFile(display_path(&path).to_string()));
        }

        match self.get_contents(repo, &path).await? {
            ContentsResponse::Listing(_) => Err(AppError::NotAFile(path)),
            ContentsResponse::Single(item) => {
                let kind = EntryKind::from_api_type(&item.kind);
                if kind == EntryKind::Dir {
                    return Err(AppError::NotAFile(path));
                }
                Ok(FileMetadata {
                    kind,
                    download_url: item.download_url,
                    size: item.size,
                })
            }
        }
    }

    pub async fn get_file_content(&self, repo: &RepoRef, path: &str) -> Result<Vec<u8>> {
        let metadata = self.get_file_metadata(repo, path).await?;
        let location = metadata
            .download_url
            .ok_or_else(|| AppError::MissingDownloadUrl(path.to_string()))?;
        let url = Url::parse(&location)
            .map_err(|_| AppError::MissingDownloadUrl(path.to_string()))?;

        tracing::info!(repo = %repo, path = %path, size = ?metadata.size, "Downloading file");
        let mut request = self.client.get(url.clone());
        if self.credential_allowed_for(&url) {
            request = self.authorized(request);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(repo = %repo, path = %path, status = status.as_u16(), "Download failed");
            return Err(AppError::DownloadFailed { status: status.as_u16() });
        }

        Ok(response.bytes().await?.to_vec())
    }

    async fn get_contents(&self, repo: &RepoRef, path: &str) -> Result<ContentsResponse> {
        let url = self.contents_url(repo, path)?;
        tracing::info!(repo = %repo, path = %display_path(path), "Fetching contents");

        let request = self.client.get(url).header(ACCEPT, API_MEDIA_TYPE);
        let response = self.authorized(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            if is_rate_limited(status, response.headers()) {
                tracing::warn!(
                    repo = %repo,
                    status = status.as_u16(),
                    "Remote API rate limit reached"
                );
                return Err(AppError::RemoteRateLimited);
            }
            tracing::warn!(
                repo = %repo,
                path = %display_path(path),
                status = status.as_u16(),
                "Remote API error"
            );
            return Err(AppError::RemoteApi { status: status.as_u16() });
        }

        Ok(response.json::<ContentsResponse>().await?)
    }

    fn contents_url(&self, repo: &RepoRef, path: &str) -> Result<Url> {
        let mut url = self.config.api_base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| AppError::Internal("API base URL cannot be a base".to_string()))?;
            segments
                .pop_if_empty()
                .extend(["repos", repo.owner(), repo.name(), "contents"]);
            if !path.is_empty() {
                segments.extend(path.split('/'));
            }
        }
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// The token only travels to the API host itself and the raw-content host.
    fn credential_allowed_for(&self, url: &Url) -> bool {
        let api = &self.config.api_base;
        let same_origin = url.scheme() == api.scheme()
            && url.host_str() == api.host_str()
            && url.port_or_known_default() == api.port_or_known_default();
        same_origin || (url.scheme() == "https" && url.host_str() == Some(RAW_CONTENT_HOST))
    }
}

fn is_rate_limited(status: StatusCode, headers: &HeaderMap) -> bool {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return true;
    }
    status == StatusCode::FORBIDDEN
        && headers
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.trim() == "0")
}

/// Canonical repository-relative path: no leading, trailing or repeated
/// slashes. `.` and `..` segments are rejected rather than resolved.
pub fn normalize_path(path: &str) -> Result<String> {
    let mut segments = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" => continue,
            "." | ".." => return Err(AppError::InvalidPath(path.to_string())),
            s if s.chars().any(|c| c.is_control()) => {
                return Err(AppError::InvalidPath(path.to_string()));
            }
            s => segments.push(s),
        }
    }
    Ok(segments.join("/"))
}

pub fn join_path(base: &str, name: &str) -> String {
    if base.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", base, name)
    }
}

fn display_path(path: &str) -> &str {
    if path.is_empty() { "(root)" } else { path }
}
