//! Where the raw payload comes from.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::config::FetchConfig;
use crate::error::{FetchError, FetchResult};

/// One attempt at retrieving the payload bytes.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch(&self) -> FetchResult<Vec<u8>>;

    /// Human-readable origin, recorded in the run artifacts.
    fn describe(&self) -> String;
}

/// GET against the leaderboard endpoint.
pub struct HttpSource {
    endpoint: String,
    http_client: reqwest::Client,
}

impl HttpSource {
    pub fn new(config: &FetchConfig) -> FetchResult<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;
        Ok(Self {
            endpoint: config.endpoint.clone(),
            http_client,
        })
    }
}

#[async_trait]
impl RecordSource for HttpSource {
    async fn fetch(&self) -> FetchResult<Vec<u8>> {
        debug!(endpoint = %self.endpoint, "requesting leaderboard");
        let response = self.http_client.get(&self.endpoint).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http(format!("{} returned {}", self.endpoint, status)));
        }
        let body = response.bytes().await?;
        Ok(body.to_vec())
    }

    fn describe(&self) -> String {
        self.endpoint.clone()
    }
}

/// Previously saved payload on disk.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl RecordSource for FileSource {
    async fn fetch(&self) -> FetchResult<Vec<u8>> {
        debug!(path = %self.path.display(), "reading snapshot");
        Ok(tokio::fs::read(&self.path).await?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
