//! Core formatting trait and the plain text implementation
//!
//! Every formatter renders progress events into console lines. The default
//! [`OutputFormatter::format_event`] dispatches an event to the matching
//! method, so implementations only decide how each line looks.

use crate::{
    error::{AppError, Result},
    executor::BenchmarkEvent,
    models::{RunSummary, StreamMetrics},
    types::SourceIndex,
};
use std::fmt::Write as _;
use std::time::Duration;

/// Trait for rendering benchmark progress
pub trait OutputFormatter: Send + Sync {
    /// Banner printed before the first source
    fn format_banner(&self, sources: u32) -> Result<String>;

    /// Header opening the block of one source
    fn format_source_header(&self, index: SourceIndex) -> Result<String>;

    fn format_playlist_loaded(&self, elapsed: Duration, channels: usize) -> Result<String>;

    /// Stream URL under test, truncated for display
    fn format_stream_testing(&self, url: &str) -> Result<String>;

    fn format_connected(&self, connect_time: Duration) -> Result<String>;

    /// Results block of a measured stream
    fn format_results(&self, index: SourceIndex, metrics: &StreamMetrics) -> Result<String>;

    /// Pause between two sources
    fn format_cooldown(&self, pause: Duration) -> Result<String>;

    fn format_summary(&self, summary: &RunSummary) -> Result<String>;

    /// Closing line of the run
    fn format_finished(&self) -> Result<String>;

    /// A failure that abandons the current source
    fn format_failure(&self, message: &str) -> Result<String>;

    fn format_warning(&self, warning: &str) -> Result<String>;

    /// An unexpected fault caught for one source
    fn format_critical(&self, error: &str) -> Result<String>;

    /// Whether informational extras such as cooldown lines are shown
    fn is_verbose(&self) -> bool {
        false
    }

    /// Render one event; `None` when the event has no console line
    fn format_event(&self, event: &BenchmarkEvent) -> Result<Option<String>> {
        let line = match event {
            BenchmarkEvent::RunStarted { sources } => self.format_banner(*sources)?,
            BenchmarkEvent::SourceStarted { index } => self.format_source_header(*index)?,
            BenchmarkEvent::PlaylistLoaded { elapsed, channels, .. } => {
                self.format_playlist_loaded(*elapsed, *channels)?
            }
            BenchmarkEvent::PlaylistFailed { status, .. } => {
                self.format_failure(&format!("Playlist fetch error (Status {})", status))?
            }
            BenchmarkEvent::NoChannels { .. } => {
                self.format_failure("No channels found in this source.")?
            }
            BenchmarkEvent::StreamTesting { url, .. } => self.format_stream_testing(url)?,
            BenchmarkEvent::StreamConnected { connect_time, .. } => {
                self.format_connected(*connect_time)?
            }
            BenchmarkEvent::StreamFailed { status, .. } => {
                self.format_failure(&format!("Stream connection error (Status {})", status))?
            }
            BenchmarkEvent::StreamInterrupted { reason, .. } => {
                self.format_warning(&format!("Stream interrupted during test: {}", reason))?
            }
            BenchmarkEvent::SourceMeasured { index, metrics } => {
                self.format_results(*index, metrics)?
            }
            BenchmarkEvent::CriticalError { message, .. } => self.format_critical(message)?,
            BenchmarkEvent::Cooldown { pause, .. } => {
                if !self.is_verbose() {
                    return Ok(None);
                }
                self.format_cooldown(*pause)?
            }
            BenchmarkEvent::RunFinished { summary } => {
                let mut output = self.format_summary(summary)?;
                output.push('\n');
                output.push_str(&self.format_finished()?);
                output
            }
        };
        Ok(Some(line))
    }
}

/// Formatting options for output customization
#[derive(Debug, Clone)]
pub struct FormattingOptions {
    pub enable_color: bool,
    pub verbose_mode: bool,
    /// Characters of the stream URL shown before the ellipsis
    pub url_width: usize,
}

impl Default for FormattingOptions {
    fn default() -> Self {
        Self {
            enable_color: true,
            verbose_mode: false,
            url_width: crate::defaults::STREAM_URL_DISPLAY_WIDTH,
        }
    }
}

/// Keep the first `width` characters of a URL and append an ellipsis
pub fn truncate_url(url: &str, width: usize) -> String {
    let head: String = url.chars().take(width).collect();
    format!("{}...", head)
}

pub(crate) fn fmt_err(e: std::fmt::Error) -> AppError {
    AppError::io(format!("Failed to format output: {}", e))
}

/// Plain text formatter implementation
pub struct PlainFormatter {
    options: FormattingOptions,
}

impl PlainFormatter {
    pub fn new(options: FormattingOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &FormattingOptions {
        &self.options
    }
}

impl OutputFormatter for PlainFormatter {
    fn format_banner(&self, sources: u32) -> Result<String> {
        let mut output = String::new();
        writeln!(output, "🚀 IPTV BENCHMARK TOOL").map_err(fmt_err)?;
        write!(output, "---------------------------").map_err(fmt_err)?;
        if self.options.verbose_mode {
            write!(output, "\nTesting {} sources", sources).map_err(fmt_err)?;
        }
        Ok(output)
    }

    fn format_source_header(&self, index: SourceIndex) -> Result<String> {
        Ok(format!("\n--- 🧪 TEST SOURCE #{} ---", index))
    }

    fn format_playlist_loaded(&self, elapsed: Duration, channels: usize) -> Result<String> {
        let mut output = format!("✅ Playlist Load: {:.2}s", elapsed.as_secs_f64());
        if self.options.verbose_mode {
            write!(output, " ({} channels)", channels).map_err(fmt_err)?;
        }
        Ok(output)
    }

    fn format_stream_testing(&self, url: &str) -> Result<String> {
        Ok(format!("📡 Testing Stream: {}", truncate_url(url, self.options.url_width)))
    }

    fn format_connected(&self, connect_time: Duration) -> Result<String> {
        Ok(format!("✅ Connection Speed: {:.2}s (Time to play)", connect_time.as_secs_f64()))
    }

    fn format_results(&self, index: SourceIndex, metrics: &StreamMetrics) -> Result<String> {
        let mut output = String::new();
        writeln!(output, "📊 Results Source #{}:", index).map_err(fmt_err)?;
        writeln!(output, "   - Bitrate: {:.0} kbps", metrics.bitrate_kbps).map_err(fmt_err)?;
        writeln!(
            output,
            "   - Data: {:.2} MB received in {:.1}s",
            metrics.megabytes(),
            metrics.elapsed_secs()
        )
        .map_err(fmt_err)?;
        write!(output, "   - Quality Score: {}", metrics.quality.stars()).map_err(fmt_err)?;
        if self.options.verbose_mode {
            write!(output, "\n   - Chunks: {}", metrics.chunks_received).map_err(fmt_err)?;
        }
        Ok(output)
    }

    fn format_cooldown(&self, pause: Duration) -> Result<String> {
        Ok(format!("⏳ Cooldown: {:.1}s", pause.as_secs_f64()))
    }

    fn format_summary(&self, summary: &RunSummary) -> Result<String> {
        let mut output = String::new();
        writeln!(output, "\n📈 Summary:").map_err(fmt_err)?;
        writeln!(output, "   - Sources tested: {}", summary.total_sources).map_err(fmt_err)?;
        write!(output, "   - Measured: {}", summary.measured_sources).map_err(fmt_err)?;
        if summary.partial_sources > 0 {
            write!(output, " ({} interrupted)", summary.partial_sources).map_err(fmt_err)?;
        }
        writeln!(output).map_err(fmt_err)?;
        writeln!(output, "   - Failed: {}", summary.failed_sources).map_err(fmt_err)?;
        if let Some((index, kbps)) = summary.best_source {
            writeln!(output, "   - Best source: #{} ({:.0} kbps)", index, kbps).map_err(fmt_err)?;
        }
        if let Some(mean) = summary.mean_bitrate_kbps {
            writeln!(output, "   - Mean bitrate: {:.0} kbps", mean).map_err(fmt_err)?;
        }
        write!(output, "   - Total time: {:.1}s", summary.total_duration.as_secs_f64())
            .map_err(fmt_err)?;
        Ok(output)
    }

    fn format_finished(&self) -> Result<String> {
        Ok("\n✅ Benchmark Finished. Check the proxy server logs for stream stability.".to_string())
    }

    fn format_failure(&self, message: &str) -> Result<String> {
        Ok(format!("❌ FAIL: {}", message))
    }

    fn format_warning(&self, warning: &str) -> Result<String> {
        Ok(format!("⚠️ Warning: {}", warning))
    }

    fn format_critical(&self, error: &str) -> Result<String> {
        Ok(format!("❌ CRITICAL ERROR: {}", error))
    }

    fn is_verbose(&self) -> bool {
        self.options.verbose_mode
    }
}
