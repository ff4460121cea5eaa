//! Per-source measurements and benchmark outcomes

use crate::types::{QualityTier, SourceIndex};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Measurements collected for one successfully connected stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamMetrics {
    /// Full URL of the tested stream
    pub stream_url: String,
    /// Time to download the playlist
    pub playlist_fetch: Duration,
    /// Time until the stream response headers arrived
    pub connect_time: Duration,
    /// Total bytes received during the sampling window
    pub bytes_received: u64,
    /// Number of fixed-size chunks the bytes were grouped into
    pub chunks_received: u64,
    /// Wall-clock length of the sampling window
    pub elapsed: Duration,
    /// Measured throughput in kbps
    pub bitrate_kbps: f64,
    /// Quality tier derived from the bitrate
    pub quality: QualityTier,
}

impl StreamMetrics {
    /// Received data in mebibytes
    pub fn megabytes(&self) -> f64 {
        self.bytes_received as f64 / (1024.0 * 1024.0)
    }

    pub fn playlist_fetch_secs(&self) -> f64 {
        self.playlist_fetch.as_secs_f64()
    }

    pub fn connect_secs(&self) -> f64 {
        self.connect_time.as_secs_f64()
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

/// Tagged result of benchmarking a single source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SourceOutcome {
    /// The sampling window ran to its end (duration reached or body finished)
    Completed(StreamMetrics),
    /// The body read failed mid-window; metrics cover the data received before it
    Partial {
        metrics: StreamMetrics,
        interruption: String,
    },
    /// The playlist endpoint answered with a non-200 status
    PlaylistUnavailable { status: u16 },
    /// The playlist contained no stream path line
    NoChannels,
    /// The stream endpoint answered with a non-200 status
    StreamUnavailable { status: u16 },
    /// Network-level fault before any measurement could be taken
    Critical(String),
}

impl SourceOutcome {
    /// Metrics when the stream was measured, fully or partially
    pub fn metrics(&self) -> Option<&StreamMetrics> {
        match self {
            Self::Completed(metrics) | Self::Partial { metrics, .. } => Some(metrics),
            _ => None,
        }
    }

    /// Check if a bitrate was measured for this source
    pub fn is_measured(&self) -> bool {
        self.metrics().is_some()
    }

    /// Short label for logging
    pub fn label(&self) -> &'static str {
        match self {
            Self::Completed(_) => "completed",
            Self::Partial { .. } => "partial",
            Self::PlaylistUnavailable { .. } => "playlist_unavailable",
            Self::NoChannels => "no_channels",
            Self::StreamUnavailable { .. } => "stream_unavailable",
            Self::Critical(_) => "critical",
        }
    }
}

/// Outcome of one source together with when it was tested
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceReport {
    pub index: SourceIndex,
    pub outcome: SourceOutcome,
    pub started_at: DateTime<Utc>,
}

impl SourceReport {
    pub fn new(index: SourceIndex, outcome: SourceOutcome, started_at: DateTime<Utc>) -> Self {
        Self { index, outcome, started_at }
    }
}

/// Aggregate view over all sources of one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Number of sources attempted
    pub total_sources: u32,
    /// Sources with a measured bitrate (including partial ones)
    pub measured_sources: u32,
    /// Measured sources whose stream was interrupted
    pub partial_sources: u32,
    /// Sources without any measurement
    pub failed_sources: u32,
    /// Highest measured bitrate and the source it belongs to
    pub best_source: Option<(SourceIndex, f64)>,
    /// Mean bitrate over measured sources
    pub mean_bitrate_kbps: Option<f64>,
    /// Wall-clock time of the whole run, cooldowns included
    pub total_duration: Duration,
}
