//! Data sources the view controller can load from.
//!
//! A fetch is the only suspension point of a render. Every source applies
//! a timeout so a hung fetch surfaces as a load error instead of blocking
//! the visualization forever.

use crate::utils::config::DEFAULT_FETCH_TIMEOUT;
use crate::utils::error::LoadError;
use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;

/// Anything that can produce the text of a data file
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn fetch_text(&self, location: &str) -> Result<String, LoadError>;
}

/// HTTP(S) data source
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    cache_bust: bool,
}

impl HttpSource {
    /// Create a source with the default timeout
    pub fn new() -> Result<Self, LoadError> {
        Self::with_timeout(DEFAULT_FETCH_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, LoadError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(LoadError::RequestFailed)?;

        Ok(Self {
            client,
            cache_bust: false,
        })
    }

    /// Append a `t=<unix millis>` query parameter to every request
    pub fn with_cache_bust(mut self, cache_bust: bool) -> Self {
        self.cache_bust = cache_bust;
        self
    }
}

#[async_trait]
impl DataSource for HttpSource {
    async fn fetch_text(&self, location: &str) -> Result<String, LoadError> {
        let url = if self.cache_bust {
            cache_busted(location, Utc::now().timestamp_millis())
        } else {
            location.to_string()
        };

        info!("Fetching {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                LoadError::Timeout(url.clone())
            } else {
                LoadError::RequestFailed(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status(status.as_u16()));
        }

        let text = response.text().await.map_err(LoadError::RequestFailed)?;
        debug!("Fetched {} bytes from {}", text.len(), url);
        Ok(text)
    }
}

/// Local file data source
///
/// Locations are plain paths or `file://` URLs, resolved against an
/// optional base directory.
#[derive(Debug, Clone)]
pub struct FileSource {
    base: Option<PathBuf>,
    timeout: Duration,
}

impl Default for FileSource {
    fn default() -> Self {
        Self {
            base: None,
            timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

impl FileSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base(mut self, base: impl Into<PathBuf>) -> Self {
        self.base = Some(base.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn resolve(&self, location: &str) -> PathBuf {
        let path = PathBuf::from(location.strip_prefix("file://").unwrap_or(location));
        match &self.base {
            Some(base) if path.is_relative() => base.join(path),
            _ => path,
        }
    }
}

#[async_trait]
impl DataSource for FileSource {
    async fn fetch_text(&self, location: &str) -> Result<String, LoadError> {
        let path = self.resolve(location);
        debug!("Reading {}", path.display());

        match tokio::time::timeout(self.timeout, tokio::fs::read_to_string(&path)).await {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(source)) => Err(LoadError::Io {
                path: path.display().to_string(),
                source,
            }),
            Err(_) => Err(LoadError::Timeout(path.display().to_string())),
        }
    }
}

/// Source picked by the shape of a location
#[derive(Debug, Clone)]
pub enum AnySource {
    Http(HttpSource),
    File(FileSource),
}

impl AnySource {
    /// HTTP for `http://` / `https://` locations, the file system otherwise
    pub fn for_location(location: &str, timeout: Duration, cache_bust: bool) -> Result<Self, LoadError> {
        if is_http(location) {
            Ok(Self::Http(HttpSource::with_timeout(timeout)?.with_cache_bust(cache_bust)))
        } else {
            Ok(Self::File(FileSource::new().with_timeout(timeout)))
        }
    }
}

#[async_trait]
impl DataSource for AnySource {
    async fn fetch_text(&self, location: &str) -> Result<String, LoadError> {
        match self {
            AnySource::Http(source) => source.fetch_text(location).await,
            AnySource::File(source) => source.fetch_text(location).await,
        }
    }
}

pub fn is_http(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Join a base location (directory or URL prefix) and a file name
pub fn join_location(base: &str, file: &str) -> String {
    if base.is_empty() {
        file.to_string()
    } else if base.ends_with('/') {
        format!("{}{}", base, file)
    } else {
        format!("{}/{}", base, file)
    }
}

/// Add a cache-busting timestamp parameter to a URL
fn cache_busted(url: &str, millis: i64) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{}{}t={}", url, separator, millis)
}
