//! Throughput calculation and run statistics
//!
//! Bytes read from a stream body are grouped into fixed-size chunks inside a
//! [`SampleWindow`] that is bounded by wall-clock time. Once closed, the window
//! yields a [`SampleResult`] from which the bitrate is derived.

use crate::{
    defaults::MIN_SAMPLE_ELAPSED,
    models::{RunSummary, SourceReport},
};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Throughput in kilobits per second: `bytes * 8 / (elapsed_seconds * 1024)`
///
/// Windows shorter than [`MIN_SAMPLE_ELAPSED`] yield `0.0` instead of an
/// unbounded figure.
pub fn bitrate_kbps(bytes: u64, elapsed: Duration) -> f64 {
    if elapsed < MIN_SAMPLE_ELAPSED {
        return 0.0;
    }
    (bytes as f64 * 8.0) / (elapsed.as_secs_f64() * 1024.0)
}

/// Time-bounded accumulator of received stream bytes
#[derive(Debug)]
pub struct SampleWindow {
    duration: Duration,
    chunk_size: usize,
    started: Instant,
    total_bytes: u64,
    full_chunks: u64,
    pending: usize,
}

/// Totals of a closed sample window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleResult {
    pub bytes: u64,
    pub chunks: u64,
    pub elapsed: Duration,
}

impl SampleResult {
    pub fn bitrate_kbps(&self) -> f64 {
        bitrate_kbps(self.bytes, self.elapsed)
    }
}

impl SampleWindow {
    /// Open a window now
    pub fn open(duration: Duration, chunk_size: usize) -> Self {
        Self {
            duration,
            chunk_size: chunk_size.max(1),
            started: Instant::now(),
            total_bytes: 0,
            full_chunks: 0,
            pending: 0,
        }
    }

    /// Account for `len` newly received bytes, returns the number of full chunks so far
    pub fn record(&mut self, len: usize) -> u64 {
        self.total_bytes += len as u64;
        let buffered = self.pending + len;
        self.full_chunks += (buffered / self.chunk_size) as u64;
        self.pending = buffered % self.chunk_size;
        self.full_chunks
    }

    /// True once more than the configured duration has elapsed
    pub fn is_expired(&self) -> bool {
        self.elapsed() > self.duration
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    /// Close the window; a trailing partial chunk counts as one chunk
    pub fn close(self) -> SampleResult {
        let elapsed = self.elapsed();
        let chunks = self.full_chunks + u64::from(self.pending > 0);
        SampleResult {
            bytes: self.total_bytes,
            chunks,
            elapsed,
        }
    }
}

/// Fold per-source reports into a run summary
pub fn summarize(reports: &[SourceReport], total_duration: Duration) -> RunSummary {
    let measured: Vec<_> = reports
        .iter()
        .filter_map(|r| r.outcome.metrics().map(|m| (r.index, m.bitrate_kbps)))
        .collect();

    let partial_sources = reports
        .iter()
        .filter(|r| matches!(r.outcome, crate::models::SourceOutcome::Partial { .. }))
        .count() as u32;

    let best_source = measured
        .iter()
        .copied()
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    let mean_bitrate_kbps = if measured.is_empty() {
        None
    } else {
        Some(measured.iter().map(|(_, kbps)| kbps).sum::<f64>() / measured.len() as f64)
    };

    RunSummary {
        total_sources: reports.len() as u32,
        measured_sources: measured.len() as u32,
        partial_sources,
        failed_sources: reports.iter().filter(|r| !r.outcome.is_measured()).count() as u32,
        best_source,
        mean_bitrate_kbps,
        total_duration,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SourceOutcome, StreamMetrics};
    use crate::types::QualityTier;
    use chrono::Utc;
    use proptest::prelude::*;

    fn measured(index: u32, kbps: f64) -> SourceReport {
        let metrics = StreamMetrics {
            stream_url: format!("http://proxy/stream/{}/live.m3u8", index),
            playlist_fetch: Duration::from_millis(100),
            connect_time: Duration::from_millis(200),
            bytes_received: 1024,
            chunks_received: 1,
            elapsed: Duration::from_secs(1),
            bitrate_kbps: kbps,
            quality: QualityTier::Low,
        };
        SourceReport::new(index, SourceOutcome::Completed(metrics), Utc::now())
    }

    #[test]
    fn test_two_megabytes_over_eight_seconds() {
        let kbps = bitrate_kbps(2 * 1024 * 1024, Duration::from_secs(8));
        assert!((kbps - 2048.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_elapsed_guard() {
        assert_eq!(bitrate_kbps(1_000_000, Duration::ZERO), 0.0);
        assert_eq!(bitrate_kbps(1_000_000, Duration::from_micros(999)), 0.0);
        assert!(bitrate_kbps(1_000_000, MIN_SAMPLE_ELAPSED) > 0.0);
    }

    #[test]
    fn test_window_groups_fixed_size_chunks() {
        let mut window = SampleWindow::open(Duration::from_secs(60), 64 * 1024);
        assert_eq!(window.record(16 * 1024), 0);
        assert_eq!(window.record(48 * 1024), 1);
        assert_eq!(window.record(100 * 1024), 2);
        assert_eq!(window.total_bytes(), 164 * 1024);

        let result = window.close();
        assert_eq!(result.bytes, 164 * 1024);
        // two full chunks plus the trailing 36 KiB
        assert_eq!(result.chunks, 3);
    }

    #[test]
    fn test_empty_window() {
        let window = SampleWindow::open(Duration::from_secs(1), 64 * 1024);
        let result = window.close();
        assert_eq!(result.bytes, 0);
        assert_eq!(result.chunks, 0);
    }

    #[test]
    fn test_window_expiry() {
        let window = SampleWindow::open(Duration::from_millis(1), 1024);
        std::thread::sleep(Duration::from_millis(5));
        assert!(window.is_expired());

        let window = SampleWindow::open(Duration::from_secs(60), 1024);
        assert!(!window.is_expired());
    }

    #[test]
    fn test_summarize_mixed_run() {
        let reports = vec![
            measured(0, 2048.0),
            SourceReport::new(1, SourceOutcome::NoChannels, Utc::now()),
            SourceReport::new(2, SourceOutcome::PlaylistUnavailable { status: 404 }, Utc::now()),
            measured(3, 1024.0),
        ];

        let summary = summarize(&reports, Duration::from_secs(30));
        assert_eq!(summary.total_sources, 4);
        assert_eq!(summary.measured_sources, 2);
        assert_eq!(summary.failed_sources, 2);
        assert_eq!(summary.partial_sources, 0);
        assert_eq!(summary.best_source, Some((0, 2048.0)));
        assert_eq!(summary.mean_bitrate_kbps, Some(1536.0));
    }

    #[test]
    fn test_summarize_nothing_measured() {
        let reports = vec![SourceReport::new(0, SourceOutcome::Critical("refused".into()), Utc::now())];
        let summary = summarize(&reports, Duration::from_secs(1));
        assert_eq!(summary.best_source, None);
        assert_eq!(summary.mean_bitrate_kbps, None);
        assert_eq!(summary.failed_sources, 1);
    }

    proptest! {
        #[test]
        fn prop_bitrate_matches_formula(bytes in 0u64..1_000_000_000, millis in 1u64..600_000) {
            let elapsed = Duration::from_millis(millis);
            let expected = (bytes as f64 * 8.0) / (elapsed.as_secs_f64() * 1024.0);
            let first = bitrate_kbps(bytes, elapsed);
            prop_assert_eq!(first, expected);
            prop_assert_eq!(first, bitrate_kbps(bytes, elapsed));
        }

        #[test]
        fn prop_tier_is_monotonic(a in 0.0f64..10_000.0, b in 0.0f64..10_000.0) {
            let thresholds = crate::types::QualityThresholds::default();
            let rank = |t: QualityTier| match t {
                QualityTier::Low => 0,
                QualityTier::Medium => 1,
                QualityTier::High => 2,
            };
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(rank(QualityTier::from_bitrate(lo, &thresholds)) <= rank(QualityTier::from_bitrate(hi, &thresholds)));
        }

        #[test]
        fn prop_window_conserves_bytes(sizes in proptest::collection::vec(0usize..200_000, 0..50)) {
            let mut window = SampleWindow::open(Duration::from_secs(60), 64 * 1024);
            for size in &sizes {
                window.record(*size);
            }
            let total: u64 = sizes.iter().map(|s| *s as u64).sum();
            let result = window.close();
            prop_assert_eq!(result.bytes, total);
            prop_assert_eq!(result.chunks, (total + 64 * 1024 - 1) / (64 * 1024));
        }
    }
}
