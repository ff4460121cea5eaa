//! Sequential benchmark runner

use super::{sample_stream, BenchmarkEvent, EventSink, ExecutionConfig};
use crate::{
    client::ProxyApi,
    error::Result,
    logging::{LogLevel, Logger},
    models::{RunSummary, SourceOutcome, SourceReport, StreamMetrics},
    playlist::{count_stream_paths, extract_stream_path},
    stats,
    types::{QualityTier, SourceIndex},
};
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

/// Reports of every source plus the aggregate summary
#[derive(Debug, Clone)]
pub struct BenchmarkRun {
    pub reports: Vec<SourceReport>,
    pub summary: RunSummary,
}

/// Tests proxy sources one after another
pub struct BenchmarkRunner {
    config: ExecutionConfig,
    api: Arc<dyn ProxyApi>,
    sink: Arc<dyn EventSink>,
    logger: Option<Logger>,
}

impl BenchmarkRunner {
    pub fn new(config: ExecutionConfig, api: Arc<dyn ProxyApi>, sink: Arc<dyn EventSink>) -> Self {
        Self {
            config,
            api,
            sink,
            logger: None,
        }
    }

    /// Attach a logger for per-source diagnostics
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Benchmark sources `0..source_count`, pausing between consecutive sources
    pub async fn run(&self) -> BenchmarkRun {
        let started = Instant::now();
        let count = self.config.source_count;
        self.sink.emit(&BenchmarkEvent::RunStarted { sources: count });

        let mut reports = Vec::with_capacity(count as usize);
        for index in 0..count {
            reports.push(self.benchmark_source(index).await);

            if index + 1 < count {
                self.sink.emit(&BenchmarkEvent::Cooldown {
                    after: index,
                    pause: self.config.cooldown,
                });
                tokio::time::sleep(self.config.cooldown).await;
            }
        }

        let summary = stats::summarize(&reports, started.elapsed());
        if let Some(logger) = &self.logger {
            logger.info("Benchmark finished")
                .field("measured", summary.measured_sources)
                .field("failed", summary.failed_sources)
                .field("duration_s", summary.total_duration.as_secs_f64())
                .log()
                .await;
        }
        self.sink.emit(&BenchmarkEvent::RunFinished { summary: summary.clone() });

        BenchmarkRun { reports, summary }
    }

    /// Benchmark one source; faults are folded into the outcome, never raised
    pub async fn benchmark_source(&self, index: SourceIndex) -> SourceReport {
        let started_at = Utc::now();
        let correlation_id = Uuid::new_v4().to_string();
        self.sink.emit(&BenchmarkEvent::SourceStarted { index });

        let outcome = match self.measure_source(index, &correlation_id).await {
            Ok(outcome) => outcome,
            Err(e) => {
                if let Some(logger) = &self.logger {
                    logger.error(&format!("Source {} failed: {}", index, e))
                        .correlation_id(&correlation_id)
                        .field("source", index)
                        .error_info(&e)
                        .log()
                        .await;
                }
                self.sink.emit(&BenchmarkEvent::CriticalError {
                    index,
                    message: e.to_string(),
                });
                SourceOutcome::Critical(e.to_string())
            }
        };

        if let Some(logger) = self.logger.as_ref().filter(|l| l.would_log(LogLevel::Debug)) {
            let mut entry = logger.debug(&format!("Source {} done", index))
                .correlation_id(&correlation_id)
                .field("source", index)
                .field("outcome", outcome.label());
            if let Some(metrics) = outcome.metrics() {
                entry = entry.metrics(metrics);
            }
            entry.log().await;
        }

        SourceReport::new(index, outcome, started_at)
    }

    async fn measure_source(&self, index: SourceIndex, correlation_id: &str) -> Result<SourceOutcome> {
        let playlist = self.api.fetch_playlist(index).await?;
        if !playlist.is_ok() {
            self.sink.emit(&BenchmarkEvent::PlaylistFailed {
                index,
                status: playlist.status,
            });
            return Ok(SourceOutcome::PlaylistUnavailable { status: playlist.status });
        }

        self.sink.emit(&BenchmarkEvent::PlaylistLoaded {
            index,
            elapsed: playlist.elapsed,
            channels: count_stream_paths(&playlist.body),
        });

        let Some(path) = extract_stream_path(&playlist.body) else {
            self.sink.emit(&BenchmarkEvent::NoChannels { index });
            return Ok(SourceOutcome::NoChannels);
        };

        self.sink.emit(&BenchmarkEvent::StreamTesting {
            index,
            url: self.api.stream_url(&path),
        });

        let stream = self.api.open_stream(&path).await?;
        if !stream.is_ok() {
            self.sink.emit(&BenchmarkEvent::StreamFailed {
                index,
                status: stream.status,
            });
            return Ok(SourceOutcome::StreamUnavailable { status: stream.status });
        }

        self.sink.emit(&BenchmarkEvent::StreamConnected {
            index,
            connect_time: stream.connect_time,
        });

        let url = stream.url.clone();
        let connect_time = stream.connect_time;
        let sample = sample_stream(
            stream.body,
            self.config.test_duration,
            self.config.chunk_size,
            self.config.stream_timeout,
        )
        .await;

        if let Some(e) = &sample.interruption {
            if let Some(logger) = &self.logger {
                logger.warn(&format!("Stream interrupted for source {}", index))
                    .correlation_id(correlation_id)
                    .field("source", index)
                    .field("bytes", sample.result.bytes)
                    .error_info(e)
                    .log()
                    .await;
            }
            self.sink.emit(&BenchmarkEvent::StreamInterrupted {
                index,
                reason: e.to_string(),
            });
        }

        let bitrate_kbps = sample.result.bitrate_kbps();
        let metrics = StreamMetrics {
            stream_url: url,
            playlist_fetch: playlist.elapsed,
            connect_time,
            bytes_received: sample.result.bytes,
            chunks_received: sample.result.chunks,
            elapsed: sample.result.elapsed,
            bitrate_kbps,
            quality: QualityTier::from_bitrate(bitrate_kbps, &self.config.thresholds),
        };

        self.sink.emit(&BenchmarkEvent::SourceMeasured {
            index,
            metrics: metrics.clone(),
        });

        Ok(match sample.interruption {
            None => SourceOutcome::Completed(metrics),
            Some(e) => SourceOutcome::Partial {
                metrics,
                interruption: e.to_string(),
            },
        })
    }
}
