//! Output formatting and display system
//!
//! Progress events from the runner are rendered by an [`OutputFormatter`]
//! and written to stdout as they arrive, plain or colored.

mod colored;
mod formatter;

pub use self::colored::{ColorScheme, ColoredFormatter};
pub use formatter::{truncate_url, FormattingOptions, OutputFormatter, PlainFormatter};

use crate::executor::{BenchmarkEvent, EventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Output formatting factory for creating appropriate formatters
pub struct OutputFormatterFactory;

impl OutputFormatterFactory {
    /// Create a formatter based on color support and preferences
    pub fn create_formatter(enable_color: bool, verbose: bool) -> Box<dyn OutputFormatter> {
        let options = FormattingOptions {
            enable_color,
            verbose_mode: verbose,
            ..Default::default()
        };

        if enable_color {
            Box::new(ColoredFormatter::new(options))
        } else {
            Box::new(PlainFormatter::new(options))
        }
    }
}

/// Writes rendered progress events as they arrive
pub struct OutputCoordinator {
    formatter: Box<dyn OutputFormatter>,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl OutputCoordinator {
    /// Coordinator printing to stdout
    pub fn new(formatter: Box<dyn OutputFormatter>) -> Self {
        Self::with_writer(formatter, Box::new(io::stdout()))
    }

    pub fn with_writer(formatter: Box<dyn OutputFormatter>, writer: Box<dyn Write + Send>) -> Self {
        Self {
            formatter,
            writer: Mutex::new(writer),
        }
    }

    /// Render an event without writing it
    pub fn render(&self, event: &BenchmarkEvent) -> Option<String> {
        match self.formatter.format_event(event) {
            Ok(line) => line,
            Err(e) => Some(format!("Output error: {}", e)),
        }
    }
}

impl EventSink for OutputCoordinator {
    fn emit(&self, event: &BenchmarkEvent) {
        let Some(line) = self.render(event) else {
            return;
        };
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}
