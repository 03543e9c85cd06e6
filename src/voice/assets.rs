//! Clip asset loading
//!
//! Locators are either absolute `http(s)://` / `file://` URLs or paths under
//! the asset root (`/static/audio/x.mp3` resolves to
//! `<asset_root>/static/audio/x.mp3`).

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use mini_moka::sync::Cache;

use crate::{Error, Result};

/// Where a locator points
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSource {
    /// Remote clip fetched over HTTP
    Remote(url::Url),
    /// Clip on the local filesystem
    File(PathBuf),
}

/// Resolves locators to clip bytes, caching recent loads
#[derive(Clone)]
pub struct AssetLoader {
    root: PathBuf,
    client: reqwest::Client,
    cache: Cache<String, Arc<Vec<u8>>>,
}

impl AssetLoader {
    /// Create a loader rooted at `root`
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, cache_ttl: Duration, cache_capacity: u64) -> Self {
        Self {
            root: root.into(),
            client: reqwest::Client::new(),
            cache: Cache::builder()
                .max_capacity(cache_capacity)
                .time_to_live(cache_ttl)
                .build(),
        }
    }

    /// Asset root directory
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Work out where a locator points
    ///
    /// # Errors
    ///
    /// Returns `Error::PlaybackLoad` for empty locators, unsupported URL
    /// schemes, or relative paths that climb out of the asset root
    pub fn resolve(&self, locator: &str) -> Result<AssetSource> {
        if locator.is_empty() {
            return Err(Error::PlaybackLoad("empty asset locator".to_string()));
        }

        if let Ok(url) = url::Url::parse(locator) {
            return match url.scheme() {
                "http" | "https" => Ok(AssetSource::Remote(url)),
                "file" => url.to_file_path().map(AssetSource::File).map_err(|()| {
                    Error::PlaybackLoad(format!("invalid file locator: {locator}"))
                }),
                scheme => Err(Error::PlaybackLoad(format!(
                    "unsupported locator scheme \"{scheme}\": {locator}"
                ))),
            };
        }

        let relative = Path::new(locator.trim_start_matches('/'));
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(Error::PlaybackLoad(format!(
                "locator escapes asset root: {locator}"
            )));
        }

        Ok(AssetSource::File(self.root.join(relative)))
    }

    /// Load the bytes behind a locator
    ///
    /// # Errors
    ///
    /// Returns `Error::PlaybackLoad` if the asset cannot be read or fetched
    pub async fn load(&self, locator: &str) -> Result<Arc<Vec<u8>>> {
        if let Some(bytes) = self.cache.get(&locator.to_string()) {
            tracing::trace!(locator, "clip cache hit");
            return Ok(bytes);
        }

        let bytes = match self.resolve(locator)? {
            AssetSource::Remote(url) => self.fetch(url).await?,
            AssetSource::File(path) => tokio::fs::read(&path).await.map_err(|e| {
                Error::PlaybackLoad(format!("failed to read {}: {e}", path.display()))
            })?,
        };

        tracing::debug!(locator, bytes = bytes.len(), "loaded clip");

        let bytes = Arc::new(bytes);
        self.cache.insert(locator.to_string(), Arc::clone(&bytes));
        Ok(bytes)
    }

    async fn fetch(&self, url: url::Url) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| Error::PlaybackLoad(format!("failed to fetch {url}: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::PlaybackLoad(format!(
                "fetching {url} returned {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::PlaybackLoad(format!("failed to read body of {url}: {e}")))?;

        Ok(bytes.to_vec())
    }
}
