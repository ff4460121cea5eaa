//! Structured logging for the benchmark
//!
//! Console output for people lives in [`crate::output`]; this module carries the
//! diagnostic side channel:
//! - Leveled entries with structured fields
//! - Session correlation IDs shared by every logger of a run
//! - Console, compact and JSON line formats
//! - A network logger for proxy requests

use crate::error::{AppError, Result};
use crate::models::{Config, StreamMetrics};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::{self, Write};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Log level enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Fatal = 5,
}

impl LogLevel {
    /// Get log level name as string
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "FATAL",
        }
    }

    /// Get ANSI color code for console output
    pub fn color_code(&self) -> &'static str {
        match self {
            LogLevel::Trace => "\x1b[37m",
            LogLevel::Debug => "\x1b[36m",
            LogLevel::Info => "\x1b[32m",
            LogLevel::Warn => "\x1b[33m",
            LogLevel::Error => "\x1b[31m",
            LogLevel::Fatal => "\x1b[35m",
        }
    }

    pub fn reset_code() -> &'static str {
        "\x1b[0m"
    }
}

impl std::str::FromStr for LogLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "TRACE" => Ok(LogLevel::Trace),
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            "FATAL" => Ok(LogLevel::Fatal),
            _ => Err(AppError::parse(format!("Invalid log level: {}", s))),
        }
    }
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogFormat {
    /// Human-readable console format
    Console,
    /// One JSON object per line
    Json,
    /// Compact single-line format
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "console" => Ok(LogFormat::Console),
            "json" => Ok(LogFormat::Json),
            "compact" => Ok(LogFormat::Compact),
            _ => Err(AppError::parse(format!("Invalid log format: {}", s))),
        }
    }
}

/// Log entry structure for structured logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
    /// Logger name/component
    pub logger: String,
    /// Correlation ID for tracking related events
    pub correlation_id: Option<String>,
    pub fields: HashMap<String, serde_json::Value>,
}

/// Shared logging context for correlation and session tracking
#[derive(Debug, Default)]
struct LogContext {
    session_id: Option<String>,
    context_fields: HashMap<String, serde_json::Value>,
}

/// Logger implementation with multiple output formats
pub struct Logger {
    min_level: LogLevel,
    use_color: bool,
    format: LogFormat,
    name: String,
    context: Arc<RwLock<LogContext>>,
}

impl Logger {
    /// Create a logger with specific configuration
    pub fn with_config(name: String, config: &Config) -> Self {
        let derived = if config.debug {
            LogLevel::Debug
        } else if config.verbose {
            LogLevel::Info
        } else {
            LogLevel::Warn
        };

        Self {
            min_level: config.log_level.unwrap_or(derived),
            use_color: config.enable_color,
            format: config.log_format.unwrap_or(LogFormat::Console),
            name,
            context: Arc::new(RwLock::new(LogContext::default())),
        }
    }

    /// Set session correlation ID
    pub async fn set_session_id(&self, session_id: String) {
        let mut context = self.context.write().await;
        context.session_id = Some(session_id);
    }

    /// Add context field for all subsequent log entries
    pub async fn add_context_field<T: Serialize>(&self, key: String, value: T) {
        if let Ok(json_value) = serde_json::to_value(value) {
            let mut context = self.context.write().await;
            context.context_fields.insert(key, json_value);
        }
    }

    /// Create a log entry builder
    pub fn log(&self, level: LogLevel, message: &str) -> LogEntryBuilder<'_> {
        LogEntryBuilder::new(self, level, message.to_string())
    }

    pub fn debug(&self, message: &str) -> LogEntryBuilder<'_> {
        self.log(LogLevel::Debug, message)
    }

    pub fn info(&self, message: &str) -> LogEntryBuilder<'_> {
        self.log(LogLevel::Info, message)
    }

    pub fn warn(&self, message: &str) -> LogEntryBuilder<'_> {
        self.log(LogLevel::Warn, message)
    }

    pub fn error(&self, message: &str) -> LogEntryBuilder<'_> {
        self.log(LogLevel::Error, message)
    }

    /// Check if a log level would be output
    pub fn would_log(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    async fn write_entry(&self, mut entry: LogEntry) {
        if entry.level < self.min_level {
            return;
        }

        let context = self.context.read().await;
        if let Some(session_id) = &context.session_id {
            entry.fields.insert("session_id".to_string(), serde_json::Value::String(session_id.clone()));
        }
        for (key, value) in &context.context_fields {
            entry.fields.insert(key.clone(), value.clone());
        }
        drop(context);

        let output = match self.format {
            LogFormat::Console => self.format_console(&entry),
            LogFormat::Json => self.format_json(&entry),
            LogFormat::Compact => self.format_compact(&entry),
        };

        // Warnings and errors go to stderr so they never interleave with the report on stdout
        if entry.level >= LogLevel::Warn {
            let _ = writeln!(io::stderr(), "{}", output);
        } else {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }

    fn format_console(&self, entry: &LogEntry) -> String {
        let timestamp = entry.timestamp.format("%Y-%m-%d %H:%M:%S%.3f");
        let level_str = entry.level.as_str();

        let formatted_level = if self.use_color {
            format!("{}{:>5}{}", entry.level.color_code(), level_str, LogLevel::reset_code())
        } else {
            format!("{:>5}", level_str)
        };

        let mut output = format!("{} {} [{}] {}", timestamp, formatted_level, entry.logger, entry.message);

        if let Some(correlation_id) = &entry.correlation_id {
            let short = correlation_id.get(..8).unwrap_or(correlation_id);
            output.push_str(&format!(" [{}]", short));
        }

        if !entry.fields.is_empty() {
            let mut fields: Vec<String> = entry.fields.iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            fields.sort();
            output.push_str(&format!(" {{{}}}", fields.join(", ")));
        }

        output
    }

    fn format_json(&self, entry: &LogEntry) -> String {
        match serde_json::to_string(entry) {
            Ok(json) => json,
            Err(_) => format!("{{\"error\": \"Failed to serialize log entry\", \"message\": \"{}\"}}", entry.message),
        }
    }

    fn format_compact(&self, entry: &LogEntry) -> String {
        let timestamp = entry.timestamp.format("%H:%M:%S");
        format!("{} {} {}: {}",
            timestamp,
            entry.level.as_str().chars().next().unwrap_or('?'),
            entry.logger,
            entry.message
        )
    }
}

/// Builder pattern for creating log entries
pub struct LogEntryBuilder<'a> {
    logger: &'a Logger,
    entry: LogEntry,
}

impl<'a> LogEntryBuilder<'a> {
    fn new(logger: &'a Logger, level: LogLevel, message: String) -> Self {
        Self {
            logger,
            entry: LogEntry {
                timestamp: Utc::now(),
                level,
                message,
                logger: logger.name.clone(),
                correlation_id: None,
                fields: HashMap::new(),
            },
        }
    }

    pub fn correlation_id(mut self, id: &str) -> Self {
        self.entry.correlation_id = Some(id.to_string());
        self
    }

    /// Add a structured field
    pub fn field<T: Serialize>(mut self, key: &str, value: T) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.entry.fields.insert(key.to_string(), json_value);
        }
        self
    }

    /// Add stream measurement fields
    pub fn metrics(self, metrics: &StreamMetrics) -> Self {
        self.field("playlist_ms", metrics.playlist_fetch_secs() * 1000.0)
            .field("connect_ms", metrics.connect_secs() * 1000.0)
            .field("bytes", metrics.bytes_received)
            .field("chunks", metrics.chunks_received)
            .field("elapsed_s", metrics.elapsed_secs())
            .field("bitrate_kbps", metrics.bitrate_kbps)
            .field("quality", metrics.quality.label())
    }

    /// Add error information
    pub fn error_info(self, error: &AppError) -> Self {
        self.field("error_category", error.category())
            .field("error_recoverable", error.is_recoverable())
    }

    /// Finalize and write the log entry
    pub async fn log(self) {
        self.logger.write_entry(self.entry).await;
    }
}

/// Specialized logger for proxy requests
pub struct NetworkLogger {
    logger: Logger,
}

impl NetworkLogger {
    pub fn new(config: &Config) -> Self {
        Self {
            logger: Logger::with_config("NET".to_string(), config),
        }
    }

    /// Log an HTTP request; non-200 answers are expected outcomes and stay at info
    pub async fn log_http_request(&self, url: &str, method: &str, status_code: Option<u16>, duration_ms: f64) {
        let success = status_code == Some(200);
        let level = if success { LogLevel::Debug } else { LogLevel::Info };

        let message = format!("{} {} -> {} in {:.1}ms",
            method, url,
            status_code.map_or("FAILED".to_string(), |c| c.to_string()),
            duration_ms);

        self.logger.log(level, &message)
            .field("url", url)
            .field("method", method)
            .field("status_code", status_code)
            .field("success", success)
            .field("duration_ms", duration_ms)
            .log()
            .await;
    }
}

/// Creates loggers that share one session ID per run
pub struct LoggerFactory {
    config: Config,
    session_id: String,
}

impl LoggerFactory {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            session_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create a logger with a specific name
    pub async fn create_logger(&self, name: &str) -> Logger {
        let logger = Logger::with_config(name.to_string(), &self.config);
        logger.set_session_id(self.session_id.clone()).await;
        logger
    }

    pub async fn create_network_logger(&self) -> NetworkLogger {
        let network = NetworkLogger::new(&self.config);
        network.logger.set_session_id(self.session_id.clone()).await;
        network
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn entry_with_field() -> LogEntry {
        LogEntry {
            timestamp: Utc::now(),
            level: LogLevel::Info,
            message: "Source 0 measured".to_string(),
            logger: "RUN".to_string(),
            correlation_id: Some("0123456789abcdef".to_string()),
            fields: {
                let mut map = HashMap::new();
                map.insert("bitrate_kbps".to_string(), serde_json::json!(2048.0));
                map
            },
        }
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("info").unwrap(), LogLevel::Info);
        assert_eq!(LogLevel::from_str("warning").unwrap(), LogLevel::Warn);
        assert!(LogLevel::from_str("loud").is_err());
    }

    #[test]
    fn test_log_format_parsing() {
        assert_eq!(LogFormat::from_str("json").unwrap(), LogFormat::Json);
        assert_eq!(LogFormat::from_str("Compact").unwrap(), LogFormat::Compact);
        assert!(LogFormat::from_str("xml").is_err());
    }

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Trace < LogLevel::Debug);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Error < LogLevel::Fatal);
    }

    #[test]
    fn test_level_from_config() {
        let quiet = Logger::with_config("T".to_string(), &Config::default());
        assert_eq!(quiet.min_level, LogLevel::Warn);

        let verbose = Logger::with_config("T".to_string(), &Config { verbose: true, ..Default::default() });
        assert_eq!(verbose.min_level, LogLevel::Info);

        let debug = Logger::with_config("T".to_string(), &Config { debug: true, enable_color: false, ..Default::default() });
        assert_eq!(debug.min_level, LogLevel::Debug);
        assert!(!debug.use_color);

        let explicit = Logger::with_config(
            "T".to_string(),
            &Config { debug: true, log_level: Some(LogLevel::Error), ..Default::default() },
        );
        assert_eq!(explicit.min_level, LogLevel::Error);
    }

    #[test]
    fn test_would_log() {
        let logger = Logger::with_config("TEST".to_string(), &Config::default());
        assert!(!logger.would_log(LogLevel::Info));
        assert!(logger.would_log(LogLevel::Warn));
        assert!(logger.would_log(LogLevel::Fatal));
    }

    #[test]
    fn test_log_formats() {
        let entry = entry_with_field();
        let mut logger = Logger::with_config("RUN".to_string(), &Config::default());
        logger.use_color = false;

        let console = logger.format_console(&entry);
        assert!(console.contains(" INFO [RUN] Source 0 measured"));
        assert!(console.contains("[01234567]"));
        assert!(console.contains("bitrate_kbps=2048.0"));

        let json = logger.format_json(&entry);
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["message"], "Source 0 measured");
        assert_eq!(parsed["level"], "Info");

        let compact = logger.format_compact(&entry);
        assert!(compact.contains("I RUN: Source 0 measured"));
    }

    #[test]
    fn test_builder_sets_correlation_id() {
        let logger = Logger::with_config("RUN".to_string(), &Config::default());
        let builder = logger.warn("Stream interrupted").correlation_id("fedcba9876543210");
        assert_eq!(builder.entry.correlation_id.as_deref(), Some("fedcba9876543210"));
        assert_eq!(builder.entry.level, LogLevel::Warn);
    }

    #[tokio::test]
    async fn test_session_and_context_fields() {
        let logger = Logger::with_config("TEST".to_string(), &Config::default());
        logger.set_session_id("session-1".to_string()).await;
        logger.add_context_field("proxy".to_string(), "http://proxy").await;

        let context = logger.context.read().await;
        assert_eq!(context.session_id.as_deref(), Some("session-1"));
        assert!(context.context_fields.contains_key("proxy"));
    }

    #[tokio::test]
    async fn test_factory_shares_session() {
        let factory = LoggerFactory::new(Config::default());
        let runner = factory.create_logger("RUN").await;
        let network = factory.create_network_logger().await;

        let runner_session = runner.context.read().await.session_id.clone();
        let network_session = network.logger.context.read().await.session_id.clone();
        assert_eq!(runner_session.as_deref(), Some(factory.session_id.as_str()));
        assert_eq!(runner_session, network_session);
        assert_eq!(network.logger.name, "NET");
    }

    #[tokio::test]
    async fn test_network_logging_does_not_panic() {
        let network = NetworkLogger::new(&Config::default());
        network.log_http_request("http://proxy/playlist", "GET", Some(200), 12.5).await;
        network.log_http_request("http://proxy/playlist", "GET", Some(404), 8.0).await;
        network.log_http_request("http://proxy/playlist", "GET", None, 10_000.0).await;
    }

    #[test]
    fn test_log_entry_serialization() {
        let entry = entry_with_field();
        let json = serde_json::to_string(&entry).unwrap();
        let back: LogEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back.level, LogLevel::Info);
        assert_eq!(back.logger, "RUN");
    }
}
