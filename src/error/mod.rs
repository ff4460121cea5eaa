//! Error handling for the IPTV source benchmark

use thiserror::Error;

/// Custom error types for the benchmark
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network connectivity errors
    #[error("Network error: {0}")]
    Network(String),

    /// HTTP request errors
    #[error("HTTP request error: {0}")]
    HttpRequest(String),

    /// Timeout errors
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(String),

    /// Parsing errors (URLs, numbers, etc.)
    #[error("Parsing error: {0}")]
    Parse(String),

    /// Errors while reading a stream body
    #[error("Stream error: {0}")]
    Stream(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Create a new network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network(message.into())
    }

    /// Create a new HTTP request error
    pub fn http_request<S: Into<String>>(message: S) -> Self {
        Self::HttpRequest(message.into())
    }

    /// Create a new timeout error
    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Self::Timeout(message.into())
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    /// Create a new I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io(message.into())
    }

    /// Create a new parsing error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse(message.into())
    }

    /// Create a new stream read error
    pub fn stream<S: Into<String>>(message: S) -> Self {
        Self::Stream(message.into())
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Get error category for logging and reporting
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG",
            Self::Network(_) => "NETWORK",
            Self::HttpRequest(_) => "HTTP",
            Self::Timeout(_) => "TIMEOUT",
            Self::Validation(_) => "VALIDATION",
            Self::Io(_) => "IO",
            Self::Parse(_) => "PARSE",
            Self::Stream(_) => "STREAM",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// Check if error is transient (a later run may succeed)
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Network(_) | Self::HttpRequest(_) | Self::Timeout(_) | Self::Stream(_) => true,
            Self::Config(_) | Self::Validation(_) | Self::Parse(_) => false,
            Self::Io(_) | Self::Internal(_) => false,
        }
    }

    /// Get exit code for this error type
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Validation(_) | Self::Parse(_) => 1,
            Self::Network(_) | Self::HttpRequest(_) | Self::Stream(_) => 2,
            Self::Timeout(_) => 3,
            Self::Io(_) => 5,
            Self::Internal(_) => 99,
        }
    }

    /// Format error for console display with color coding
    pub fn format_for_console(&self, use_color: bool) -> String {
        let category = self.category();
        let message = self.to_string();

        if use_color {
            use colored::Colorize;
            match self {
                Self::Config(_) | Self::Validation(_) | Self::Parse(_) => {
                    format!("[{}] {}", category.red().bold(), message.red())
                }
                Self::Network(_) | Self::HttpRequest(_) | Self::Stream(_) => {
                    format!("[{}] {}", category.yellow().bold(), message.yellow())
                }
                Self::Timeout(_) => {
                    format!("[{}] {}", category.blue().bold(), message.blue())
                }
                Self::Io(_) => {
                    format!("[{}] {}", category.cyan().bold(), message.cyan())
                }
                Self::Internal(_) => {
                    format!("[{}] {}", category.bright_red().bold(), message.bright_red())
                }
            }
        } else {
            format!("[{}] {}", category, message)
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::io(error.to_string())
    }
}

impl From<url::ParseError> for AppError {
    fn from(error: url::ParseError) -> Self {
        Self::parse(format!("URL parse error: {}", error))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::timeout(error.to_string())
        } else if error.is_connect() || error.is_request() {
            Self::network(error.to_string())
        } else if error.is_body() || error.is_decode() {
            Self::stream(error.to_string())
        } else {
            Self::http_request(error.to_string())
        }
    }
}

impl From<dotenv::Error> for AppError {
    fn from(error: dotenv::Error) -> Self {
        Self::config(format!("Environment file error: {}", error))
    }
}

impl From<std::num::ParseIntError> for AppError {
    fn from(error: std::num::ParseIntError) -> Self {
        Self::parse(format!("Integer parse error: {}", error))
    }
}

impl From<std::num::ParseFloatError> for AppError {
    fn from(error: std::num::ParseFloatError) -> Self {
        Self::parse(format!("Float parse error: {}", error))
    }
}

impl From<std::str::ParseBoolError> for AppError {
    fn from(error: std::str::ParseBoolError) -> Self {
        Self::parse(format!("Boolean parse error: {}", error))
    }
}

/// Custom Result type for the application
pub type Result<T> = std::result::Result<T, AppError>;

/// Error reporter for top-level failures in the binary
pub struct ErrorReporter {
    pub use_color: bool,
    pub verbose: bool,
}

impl ErrorReporter {
    /// Create a new error reporter
    pub fn new(use_color: bool, verbose: bool) -> Self {
        Self { use_color, verbose }
    }

    /// Reporter following the resolved configuration rather than the raw flags
    pub fn from_config(config: &crate::models::Config) -> Self {
        Self::new(config.enable_color, config.verbose || config.debug)
    }

    /// Report an error to the user
    pub fn report_error(&self, error: &AppError) {
        eprintln!("{}", error.format_for_console(self.use_color));

        if self.verbose {
            eprintln!();
            eprintln!("{}", self.suggestion(error));
        }
    }

    /// Short remediation hint for the error category
    pub fn suggestion(&self, error: &AppError) -> &'static str {
        match error {
            AppError::Config(_) | AppError::Validation(_) | AppError::Parse(_) => {
                "Check your .env file, environment variables or command line arguments."
            }
            AppError::Network(_) | AppError::HttpRequest(_) => {
                "Check that the proxy is reachable and the proxy URL is correct."
            }
            AppError::Timeout(_) => {
                "The proxy did not answer in time. Try --playlist-timeout or --stream-timeout."
            }
            AppError::Stream(_) => "The stream was interrupted. Check the proxy logs for transcoder restarts.",
            AppError::Io(_) => "Check file permissions in the working directory.",
            AppError::Internal(_) => "This is likely a bug. Please report it with the error details.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_error = AppError::config("Invalid proxy URL");
        assert_eq!(config_error.category(), "CONFIG");
        assert!(!config_error.is_recoverable());
        assert_eq!(config_error.exit_code(), 1);

        let stream_error = AppError::stream("connection reset");
        assert_eq!(stream_error.category(), "STREAM");
        assert!(stream_error.is_recoverable());
        assert_eq!(stream_error.exit_code(), 2);
    }

    #[test]
    fn test_error_display() {
        let error = AppError::timeout("playlist request");
        assert_eq!(error.to_string(), "Timeout error: playlist request");
    }

    #[test]
    fn test_console_formatting_without_color() {
        let error = AppError::network("connection refused");
        let formatted = error.format_for_console(false);
        assert_eq!(formatted, "[NETWORK] Network error: connection refused");
    }

    #[test]
    fn test_parse_error_conversions() {
        let err: AppError = "abc".parse::<u32>().unwrap_err().into();
        assert!(matches!(err, AppError::Parse(_)));

        let err: AppError = "maybe".parse::<bool>().unwrap_err().into();
        assert!(matches!(err, AppError::Parse(_)));

        let err: AppError = url::Url::parse("not a url").unwrap_err().into();
        assert!(err.to_string().contains("URL parse error"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing .env");
        let err: AppError = io.into();
        assert_eq!(err.category(), "IO");
        assert_eq!(err.exit_code(), 5);
    }

    #[test]
    fn test_reporter_suggestions() {
        let reporter = ErrorReporter::new(false, true);
        assert!(reporter.suggestion(&AppError::timeout("x")).contains("--stream-timeout"));
        assert!(reporter.suggestion(&AppError::config("x")).contains(".env"));
    }

    #[test]
    fn test_reporter_follows_config_color() {
        let config = crate::models::Config {
            enable_color: false,
            debug: true,
            ..Default::default()
        };
        let reporter = ErrorReporter::from_config(&config);
        assert!(!reporter.use_color);
        assert!(reporter.verbose);

        let reporter = ErrorReporter::from_config(&crate::models::Config::default());
        assert!(reporter.use_color);
        assert!(!reporter.verbose);
    }
}
