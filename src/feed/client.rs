//! HTTP client for the snapshot endpoint.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, instrument};

use super::wire::parse_snapshot;
use crate::config::Config;
use crate::error::FeedError;
use crate::metrics;
use crate::orderbook::types::Snapshot;

/// Anything that can produce a full book snapshot on demand.
pub trait SnapshotSource: Send + Sync + 'static {
    /// Fetch the latest snapshot.
    fn fetch(&self) -> impl Future<Output = Result<Snapshot, FeedError>> + Send;
}

/// Polls the backend's `/book` endpoint over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBookFeed {
    /// HTTP client for API requests.
    http: reqwest::Client,
    /// Full snapshot URL.
    url: String,
}

impl HttpBookFeed {
    /// Create a feed client from config.
    pub fn new(config: &Config) -> Result<Self, FeedError> {
        Self::with_timeout(config.book_url.clone(), config.http_timeout())
    }

    /// Create a feed client for an explicit URL and timeout.
    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Result<Self, FeedError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_millis(500)))
            .tcp_nodelay(true)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()?;

        Ok(Self {
            http,
            url: url.into(),
        })
    }

    /// Get the snapshot URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch and parse one snapshot.
    #[instrument(skip(self), fields(url = %self.url))]
    pub async fn get_snapshot(&self) -> Result<Snapshot, FeedError> {
        let _timer = metrics::timer_poll();

        let response = self.http.get(&self.url).send().await?;

        if !response.status().is_success() {
            return Err(FeedError::Status {
                url: self.url.clone(),
                status: response.status().as_u16(),
            });
        }

        let body = response.bytes().await?;
        let snapshot = parse_snapshot(&body)?;

        debug!(
            books = snapshot.books.len(),
            bytes = body.len(),
            "Fetched book snapshot"
        );

        Ok(snapshot)
    }
}

impl SnapshotSource for HttpBookFeed {
    fn fetch(&self) -> impl Future<Output = Result<Snapshot, FeedError>> + Send {
        self.get_snapshot()
    }
}
