//! IPTV Source Benchmark
//!
//! Measures the sources exposed behind an IPTV proxy: playlist load time,
//! stream connection time and sustained bitrate over a fixed sampling window.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod executor;
pub mod logging;
pub mod models;
pub mod output;
pub mod playlist;
pub mod stats;
pub mod types;

// Re-export commonly used types
pub use error::{AppError, Result};
pub use executor::{BenchmarkEvent, BenchmarkRunner, EventSink, ExecutionConfig};
pub use models::{Config, RunSummary, SourceOutcome, SourceReport, StreamMetrics};
pub use output::{ColoredFormatter, OutputCoordinator, OutputFormatter, OutputFormatterFactory, PlainFormatter};
pub use types::{QualityThresholds, QualityTier, SourceIndex};

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Default configuration values
pub mod defaults {
    use std::time::Duration;

    pub const DEFAULT_PROXY_URL: &str = "http://152.70.45.91:3005";
    pub const DEFAULT_API_KEY: &str = "sport-zone-secure-v1";
    pub const DEFAULT_SOURCE_COUNT: u32 = 4;
    pub const DEFAULT_TEST_DURATION: Duration = Duration::from_secs(10);
    pub const DEFAULT_PLAYLIST_TIMEOUT: Duration = Duration::from_secs(10);
    pub const DEFAULT_STREAM_TIMEOUT: Duration = Duration::from_secs(15);
    pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(2);
    pub const DEFAULT_ENABLE_COLOR: bool = true;

    /// Size of the chunks the sample window groups received bytes into
    pub const CHUNK_SIZE: usize = 64 * 1024;
    /// Playlist lines starting with this marker are playable stream paths
    pub const STREAM_PATH_PREFIX: &str = "/stream";
    /// Sampling windows shorter than this report a bitrate of zero
    pub const MIN_SAMPLE_ELAPSED: Duration = Duration::from_millis(1);

    pub const HIGH_QUALITY_KBPS: f64 = 2000.0;
    pub const MEDIUM_QUALITY_KBPS: f64 = 800.0;

    /// Console reports truncate the tested stream URL to this many characters
    pub const STREAM_URL_DISPLAY_WIDTH: usize = 60;
}
