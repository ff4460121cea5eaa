//! Benchmark execution engine
//!
//! This module contains the sequential benchmark runner:
//! - [`BenchmarkRunner`] walks the configured source indices one by one
//! - [`sampler`] reads a stream body inside a time-bounded sample window
//! - [`BenchmarkEvent`]s report progress to an [`EventSink`] as steps complete

pub mod runner;
pub mod sampler;

pub use runner::{BenchmarkRun, BenchmarkRunner};
pub use sampler::sample_stream;

use crate::{
    models::{Config, RunSummary, StreamMetrics},
    types::{QualityThresholds, SourceIndex},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Runtime settings for the runner and the proxy client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionConfig {
    /// Base URL of the proxy, without trailing slash
    pub proxy_url: String,
    pub api_key: String,
    /// Sources are tested for indices `0..source_count`
    pub source_count: u32,
    /// Length of the sampling window per stream
    pub test_duration: Duration,
    pub playlist_timeout: Duration,
    /// Bounds the stream connection and every body read
    pub stream_timeout: Duration,
    /// Pause between two consecutive sources
    pub cooldown: Duration,
    pub chunk_size: usize,
    pub thresholds: QualityThresholds,
    pub verbose: bool,
    pub debug: bool,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for ExecutionConfig {
    fn from(config: &Config) -> Self {
        Self {
            proxy_url: config.proxy_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            source_count: config.source_count,
            test_duration: config.test_duration(),
            playlist_timeout: config.playlist_timeout(),
            stream_timeout: config.stream_timeout(),
            cooldown: config.cooldown(),
            chunk_size: crate::defaults::CHUNK_SIZE,
            thresholds: config.quality_thresholds(),
            verbose: config.verbose,
            debug: config.debug,
        }
    }
}

/// Progress notifications emitted while a run is in flight
#[derive(Debug, Clone, PartialEq)]
pub enum BenchmarkEvent {
    RunStarted { sources: u32 },
    SourceStarted { index: SourceIndex },
    PlaylistLoaded { index: SourceIndex, elapsed: Duration, channels: usize },
    PlaylistFailed { index: SourceIndex, status: u16 },
    NoChannels { index: SourceIndex },
    StreamTesting { index: SourceIndex, url: String },
    StreamConnected { index: SourceIndex, connect_time: Duration },
    StreamFailed { index: SourceIndex, status: u16 },
    /// The body read failed; the partial data is still measured
    StreamInterrupted { index: SourceIndex, reason: String },
    SourceMeasured { index: SourceIndex, metrics: StreamMetrics },
    CriticalError { index: SourceIndex, message: String },
    Cooldown { after: SourceIndex, pause: Duration },
    RunFinished { summary: RunSummary },
}

#[cfg(test)]
impl BenchmarkEvent {
    /// Source the event belongs to, if any
    pub fn source(&self) -> Option<SourceIndex> {
        match self {
            Self::RunStarted { .. } | Self::RunFinished { .. } => None,
            Self::SourceStarted { index }
            | Self::PlaylistLoaded { index, .. }
            | Self::PlaylistFailed { index, .. }
            | Self::NoChannels { index }
            | Self::StreamTesting { index, .. }
            | Self::StreamConnected { index, .. }
            | Self::StreamFailed { index, .. }
            | Self::StreamInterrupted { index, .. }
            | Self::SourceMeasured { index, .. }
            | Self::CriticalError { index, .. } => Some(*index),
            Self::Cooldown { after, .. } => Some(*after),
        }
    }
}

/// Receiver of progress events
pub trait EventSink: Send + Sync {
    fn emit(&self, event: &BenchmarkEvent);
}

/// Sink that keeps every event in memory
#[cfg(test)]
#[derive(Default)]
pub struct RecordingSink {
    events: std::sync::Mutex<Vec<BenchmarkEvent>>,
}

#[cfg(test)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events received so far
    pub fn events(&self) -> Vec<BenchmarkEvent> {
        self.events.lock().map(|events| events.clone()).unwrap_or_default()
    }

    /// Events belonging to one source
    pub fn events_for(&self, index: SourceIndex) -> Vec<BenchmarkEvent> {
        self.events()
            .into_iter()
            .filter(|event| event.source() == Some(index))
            .collect()
    }
}

#[cfg(test)]
impl EventSink for RecordingSink {
    fn emit(&self, event: &BenchmarkEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
