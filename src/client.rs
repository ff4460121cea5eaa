//! HTTP access to the IPTV proxy


use crate::{
    error::{AppError, Result},
    executor::ExecutionConfig,
    logging::NetworkLogger,
    types::SourceIndex,
};
use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{BoxStream, StreamExt, TryStreamExt};
use reqwest::{Client, Url};
use std::time::{Duration, Instant};
use tokio::time::timeout;

/// Body of a streaming response, one item per received network chunk
pub type ByteStream = BoxStream<'static, Result<Bytes>>;

/// Proxy operations used by the benchmark runner
#[async_trait]
pub trait ProxyApi: Send + Sync {
    /// Fetch the playlist of one source; non-200 statuses are returned, not raised
    async fn fetch_playlist(&self, index: SourceIndex) -> Result<PlaylistResponse>;

    /// Open a stream path for reading; non-200 statuses are returned, not raised
    async fn open_stream(&self, path: &str) -> Result<StreamResponse>;

    /// Full URL for a stream path
    fn stream_url(&self, path: &str) -> String;
}

/// Playlist answer with the time it took to download
#[derive(Debug, Clone)]
pub struct PlaylistResponse {
    pub status: u16,
    pub body: String,
    pub elapsed: Duration,
}

impl PlaylistResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Stream answer whose body has not been read yet
pub struct StreamResponse {
    pub url: String,
    pub status: u16,
    /// Time until the response headers arrived
    pub connect_time: Duration,
    pub body: ByteStream,
}

impl StreamResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

impl std::fmt::Debug for StreamResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamResponse")
            .field("url", &self.url)
            .field("status", &self.status)
            .field("connect_time", &self.connect_time)
            .finish_non_exhaustive()
    }
}

/// reqwest-backed proxy client
pub struct ProxyClient {
    client: Client,
    proxy_url: String,
    api_key: String,
    playlist_timeout: Duration,
    stream_timeout: Duration,
    network_logger: Option<NetworkLogger>,
}

impl ProxyClient {
    /// Create a new proxy client
    pub fn new(config: &ExecutionConfig) -> Result<Self> {
        // No client-wide timeout: it would also cut the stream body mid-window
        let client = Client::builder()
            .connect_timeout(config.stream_timeout)
            .user_agent(format!("{}/{}", crate::PKG_NAME, crate::VERSION))
            .build()
            .map_err(|e| AppError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            proxy_url: config.proxy_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            playlist_timeout: config.playlist_timeout,
            stream_timeout: config.stream_timeout,
            network_logger: None,
        })
    }

    /// Attach a network logger for request lines
    pub fn with_logger(mut self, logger: NetworkLogger) -> Self {
        self.network_logger = Some(logger);
        self
    }

    /// `{proxy}/playlist?key={api_key}&src={index}`
    pub fn playlist_url(&self, index: SourceIndex) -> Result<Url> {
        let mut url = Url::parse(&format!("{}/playlist", self.proxy_url))?;
        url.query_pairs_mut()
            .append_pair("key", &self.api_key)
            .append_pair("src", &index.to_string());
        Ok(url)
    }

    async fn log_request(&self, url: &str, status: Option<u16>, elapsed: Duration) {
        if let Some(logger) = &self.network_logger {
            logger
                .log_http_request(url, "GET", status, elapsed.as_secs_f64() * 1000.0)
                .await;
        }
    }
}

#[async_trait]
impl ProxyApi for ProxyClient {
    async fn fetch_playlist(&self, index: SourceIndex) -> Result<PlaylistResponse> {
        let url = self.playlist_url(index)?;
        let start = Instant::now();

        let response = match self
            .client
            .get(url.clone())
            .timeout(self.playlist_timeout)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                self.log_request(url.as_str(), None, start.elapsed()).await;
                return Err(e.into());
            }
        };

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::http_request(format!("Failed to read playlist body: {}", e)))?;
        let elapsed = start.elapsed();

        self.log_request(url.as_str(), Some(status), elapsed).await;

        Ok(PlaylistResponse { status, body, elapsed })
    }

    async fn open_stream(&self, path: &str) -> Result<StreamResponse> {
        let url = self.stream_url(path);
        let start = Instant::now();

        let sent = timeout(self.stream_timeout, self.client.get(&url).send()).await;
        let connect_time = start.elapsed();

        let response = match sent {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                self.log_request(&url, None, connect_time).await;
                return Err(e.into());
            }
            Err(_) => {
                self.log_request(&url, None, connect_time).await;
                return Err(AppError::timeout(format!(
                    "Stream connection timed out after {}s",
                    self.stream_timeout.as_secs_f64()
                )));
            }
        };

        let status = response.status().as_u16();
        self.log_request(&url, Some(status), connect_time).await;

        let body = response.bytes_stream().map_err(AppError::from).boxed();

        Ok(StreamResponse {
            url,
            status,
            connect_time,
            body,
        })
    }

    fn stream_url(&self, path: &str) -> String {
        format!("{}{}", self.proxy_url, path)
    }
}
