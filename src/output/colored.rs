//! Colored formatter implementation with terminal color support
//!
//! Renders the same lines as [`PlainFormatter`] with ANSI colors applied to
//! status markers and measured values.

use super::formatter::{fmt_err, truncate_url, FormattingOptions, OutputFormatter, PlainFormatter};
use crate::{
    error::Result,
    models::{RunSummary, StreamMetrics},
    types::{QualityTier, SourceIndex},
};
use colored::*;
use std::fmt::Write as _;
use std::time::Duration;

/// Color scheme configuration
#[derive(Debug, Clone)]
pub struct ColorScheme {
    pub header: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,
    pub highlight: Color,
    pub muted: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            header: Color::Blue,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            info: Color::Cyan,
            highlight: Color::Magenta,
            muted: Color::BrightBlack,
        }
    }
}

impl ColorScheme {
    /// Color used for a quality tier
    pub fn tier_color(&self, tier: QualityTier) -> Color {
        match tier {
            QualityTier::High => self.success,
            QualityTier::Medium => self.warning,
            QualityTier::Low => self.error,
        }
    }
}

/// Colored formatter implementation
pub struct ColoredFormatter {
    plain_formatter: PlainFormatter,
    options: FormattingOptions,
    color_scheme: ColorScheme,
}

impl ColoredFormatter {
    pub fn new(options: FormattingOptions) -> Self {
        Self::with_color_scheme(options, ColorScheme::default())
    }

    /// Create a colored formatter with custom color scheme
    pub fn with_color_scheme(options: FormattingOptions, color_scheme: ColorScheme) -> Self {
        Self {
            plain_formatter: PlainFormatter::new(options.clone()),
            options,
            color_scheme,
        }
    }

    /// Apply color to text if colors are enabled
    fn colorize(&self, text: &str, color: Color) -> ColoredString {
        if self.options.enable_color {
            text.color(color)
        } else {
            text.normal()
        }
    }

    /// Bold and colored, or plain when colors are disabled
    fn strong(&self, text: &str, color: Color) -> ColoredString {
        if self.options.enable_color {
            text.color(color).bold()
        } else {
            text.normal()
        }
    }

    fn bold(&self, text: &str) -> ColoredString {
        if self.options.enable_color {
            text.bold()
        } else {
            text.normal()
        }
    }

    fn dimmed(&self, text: &str) -> ColoredString {
        if self.options.enable_color {
            text.dimmed()
        } else {
            text.normal()
        }
    }
}

impl OutputFormatter for ColoredFormatter {
    fn format_banner(&self, sources: u32) -> Result<String> {
        if !self.options.enable_color {
            return self.plain_formatter.format_banner(sources);
        }
        let mut output = String::new();
        writeln!(output, "🚀 {}", "IPTV BENCHMARK TOOL".bold().color(self.color_scheme.header))
            .map_err(fmt_err)?;
        write!(output, "{}", self.dimmed("---------------------------")).map_err(fmt_err)?;
        if self.options.verbose_mode {
            write!(output, "\n{}", self.dimmed(&format!("Testing {} sources", sources)))
                .map_err(fmt_err)?;
        }
        Ok(output)
    }

    fn format_source_header(&self, index: SourceIndex) -> Result<String> {
        let title = format!("--- 🧪 TEST SOURCE #{} ---", index);
        Ok(format!("\n{}", self.strong(&title, self.color_scheme.header)))
    }

    fn format_playlist_loaded(&self, elapsed: Duration, channels: usize) -> Result<String> {
        let mut output = format!(
            "✅ {} {}",
            self.colorize("Playlist Load:", self.color_scheme.success),
            self.bold(&format!("{:.2}s", elapsed.as_secs_f64()))
        );
        if self.options.verbose_mode {
            write!(output, " {}", self.dimmed(&format!("({} channels)", channels))).map_err(fmt_err)?;
        }
        Ok(output)
    }

    fn format_stream_testing(&self, url: &str) -> Result<String> {
        Ok(format!(
            "📡 Testing Stream: {}",
            self.colorize(&truncate_url(url, self.options.url_width), self.color_scheme.info)
        ))
    }

    fn format_connected(&self, connect_time: Duration) -> Result<String> {
        Ok(format!(
            "✅ {} {} {}",
            self.colorize("Connection Speed:", self.color_scheme.success),
            self.bold(&format!("{:.2}s", connect_time.as_secs_f64())),
            self.dimmed("(Time to play)")
        ))
    }

    fn format_results(&self, index: SourceIndex, metrics: &StreamMetrics) -> Result<String> {
        let tier_color = self.color_scheme.tier_color(metrics.quality);
        let mut output = String::new();
        writeln!(
            output,
            "📊 {}",
            self.strong(&format!("Results Source #{}:", index), self.color_scheme.highlight)
        )
        .map_err(fmt_err)?;
        writeln!(
            output,
            "   - Bitrate: {}",
            self.strong(&format!("{:.0} kbps", metrics.bitrate_kbps), tier_color)
        )
        .map_err(fmt_err)?;
        writeln!(
            output,
            "   - Data: {} received in {}",
            self.bold(&format!("{:.2} MB", metrics.megabytes())),
            self.bold(&format!("{:.1}s", metrics.elapsed_secs()))
        )
        .map_err(fmt_err)?;
        write!(
            output,
            "   - Quality Score: {}",
            self.colorize(metrics.quality.stars(), self.color_scheme.warning)
        )
        .map_err(fmt_err)?;
        if self.options.verbose_mode {
            write!(
                output,
                "\n   - Chunks: {}",
                self.dimmed(&metrics.chunks_received.to_string())
            )
            .map_err(fmt_err)?;
        }
        Ok(output)
    }

    fn format_cooldown(&self, pause: Duration) -> Result<String> {
        Ok(self
            .colorize(&format!("⏳ Cooldown: {:.1}s", pause.as_secs_f64()), self.color_scheme.muted)
            .to_string())
    }

    fn format_summary(&self, summary: &RunSummary) -> Result<String> {
        let mut output = String::new();
        writeln!(output, "\n📈 {}", self.strong("Summary:", self.color_scheme.header))
            .map_err(fmt_err)?;
        writeln!(output, "   - Sources tested: {}", self.bold(&summary.total_sources.to_string()))
            .map_err(fmt_err)?;
        write!(
            output,
            "   - Measured: {}",
            self.colorize(&summary.measured_sources.to_string(), self.color_scheme.success)
        )
        .map_err(fmt_err)?;
        if summary.partial_sources > 0 {
            write!(
                output,
                " {}",
                self.colorize(&format!("({} interrupted)", summary.partial_sources), self.color_scheme.warning)
            )
            .map_err(fmt_err)?;
        }
        writeln!(output).map_err(fmt_err)?;

        let failed_color = if summary.failed_sources > 0 {
            self.color_scheme.error
        } else {
            self.color_scheme.muted
        };
        writeln!(
            output,
            "   - Failed: {}",
            self.colorize(&summary.failed_sources.to_string(), failed_color)
        )
        .map_err(fmt_err)?;

        if let Some((index, kbps)) = summary.best_source {
            writeln!(
                output,
                "   - Best source: {} ({})",
                self.bold(&format!("#{}", index)),
                self.colorize(&format!("{:.0} kbps", kbps), self.color_scheme.success)
            )
            .map_err(fmt_err)?;
        }
        if let Some(mean) = summary.mean_bitrate_kbps {
            writeln!(output, "   - Mean bitrate: {}", self.bold(&format!("{:.0} kbps", mean)))
                .map_err(fmt_err)?;
        }
        write!(
            output,
            "   - Total time: {}",
            self.dimmed(&format!("{:.1}s", summary.total_duration.as_secs_f64()))
        )
        .map_err(fmt_err)?;
        Ok(output)
    }

    fn format_finished(&self) -> Result<String> {
        Ok(format!(
            "\n✅ {}",
            self.strong(
                "Benchmark Finished. Check the proxy server logs for stream stability.",
                self.color_scheme.success
            )
        ))
    }

    fn format_failure(&self, message: &str) -> Result<String> {
        Ok(format!(
            "❌ {} {}",
            self.strong("FAIL:", self.color_scheme.error),
            self.colorize(message, self.color_scheme.error)
        ))
    }

    fn format_warning(&self, warning: &str) -> Result<String> {
        Ok(format!(
            "⚠️ {}",
            self.colorize(&format!("Warning: {}", warning), self.color_scheme.warning)
        ))
    }

    fn format_critical(&self, error: &str) -> Result<String> {
        Ok(format!(
            "❌ {} {}",
            self.strong("CRITICAL ERROR:", self.color_scheme.error),
            error
        ))
    }

    fn is_verbose(&self) -> bool {
        self.options.verbose_mode
    }
}
