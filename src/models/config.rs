//! Configuration data model and validation

use crate::logging::{LogFormat, LogLevel};
use crate::types::{AppError, QualityThresholds, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the IPTV proxy
    #[serde(default = "default_proxy_url")]
    pub proxy_url: String,

    /// API key passed as the `key` query parameter
    #[serde(default = "default_api_key")]
    pub api_key: String,

    /// Number of sources to test, indices `0..source_count`
    #[serde(default = "default_source_count")]
    pub source_count: u32,

    /// Sampling window per stream
    #[serde(default = "default_test_duration_secs")]
    pub test_duration_seconds: u64,

    /// Timeout for the playlist request
    #[serde(default = "default_playlist_timeout_secs")]
    pub playlist_timeout_seconds: u64,

    /// Timeout for the stream connection and for each body read
    #[serde(default = "default_stream_timeout_secs")]
    pub stream_timeout_seconds: u64,

    /// Pause between two sources
    #[serde(default = "default_cooldown_secs")]
    pub cooldown_seconds: u64,

    /// Enable colored terminal output
    #[serde(default = "default_enable_color")]
    pub enable_color: bool,

    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,

    /// Enable debug output
    #[serde(default)]
    pub debug: bool,

    /// Explicit log level, overrides the verbose/debug derived level
    #[serde(default)]
    pub log_level: Option<LogLevel>,

    /// Log line format
    #[serde(default)]
    pub log_format: Option<LogFormat>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            proxy_url: default_proxy_url(),
            api_key: default_api_key(),
            source_count: default_source_count(),
            test_duration_seconds: default_test_duration_secs(),
            playlist_timeout_seconds: default_playlist_timeout_secs(),
            stream_timeout_seconds: default_stream_timeout_secs(),
            cooldown_seconds: default_cooldown_secs(),
            enable_color: default_enable_color(),
            verbose: false,
            debug: false,
            log_level: None,
            log_format: None,
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn test_duration(&self) -> Duration {
        Duration::from_secs(self.test_duration_seconds)
    }

    pub fn playlist_timeout(&self) -> Duration {
        Duration::from_secs(self.playlist_timeout_seconds)
    }

    pub fn stream_timeout(&self) -> Duration {
        Duration::from_secs(self.stream_timeout_seconds)
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_seconds)
    }

    /// Quality thresholds are fixed constants, not configurable per run
    pub fn quality_thresholds(&self) -> QualityThresholds {
        QualityThresholds::default()
    }

    /// Validate the configuration and return the first problem found
    pub fn validate(&self) -> Result<()> {
        if self.proxy_url.is_empty() {
            return Err(AppError::config("Proxy URL cannot be empty"));
        }

        match url::Url::parse(&self.proxy_url) {
            Ok(parsed) => {
                if parsed.scheme() != "http" && parsed.scheme() != "https" {
                    return Err(AppError::config(format!(
                        "Proxy URL must use http or https: {}",
                        self.proxy_url
                    )));
                }
                if parsed.host_str().is_none() {
                    return Err(AppError::config(format!("Proxy URL has no host: {}", self.proxy_url)));
                }
            }
            Err(e) => {
                return Err(AppError::config(format!("Invalid proxy URL '{}': {}", self.proxy_url, e)));
            }
        }

        if self.api_key.trim().is_empty() {
            return Err(AppError::config("API key cannot be empty"));
        }

        if self.source_count == 0 {
            return Err(AppError::config("Source count must be greater than 0"));
        }

        if self.source_count > 64 {
            return Err(AppError::config("Source count cannot exceed 64"));
        }

        if self.test_duration_seconds == 0 {
            return Err(AppError::config("Test duration must be greater than 0"));
        }

        if self.test_duration_seconds > 600 {
            return Err(AppError::config("Test duration cannot exceed 600 seconds"));
        }

        for (name, value) in [
            ("Playlist timeout", self.playlist_timeout_seconds),
            ("Stream timeout", self.stream_timeout_seconds),
        ] {
            if value == 0 {
                return Err(AppError::config(format!("{} must be greater than 0", name)));
            }
            if value > 300 {
                return Err(AppError::config(format!("{} cannot exceed 300 seconds", name)));
            }
        }

        if self.cooldown_seconds > 60 {
            return Err(AppError::config("Cooldown cannot exceed 60 seconds"));
        }

        Ok(())
    }

    /// Merge environment variables into this configuration
    pub fn merge_from_env(&mut self) -> Result<()> {
        self.merge_from_lookup(|key| std::env::var(key).ok())
    }

    /// Merge values from an arbitrary key lookup, using the environment variable names
    pub fn merge_from_lookup<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(proxy_url) = lookup("PROXY_URL") {
            self.proxy_url = proxy_url.trim().trim_end_matches('/').to_string();
        }

        if let Some(api_key) = lookup("API_KEY") {
            self.api_key = api_key.trim().to_string();
        }

        if let Some(count) = lookup("SOURCE_COUNT") {
            self.source_count = count.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid SOURCE_COUNT value '{}': {}", count, e)))?;
        }

        if let Some(duration) = lookup("TEST_DURATION") {
            self.test_duration_seconds = duration.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid TEST_DURATION value '{}': {}", duration, e)))?;
        }

        if let Some(timeout) = lookup("PLAYLIST_TIMEOUT") {
            self.playlist_timeout_seconds = timeout.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid PLAYLIST_TIMEOUT value '{}': {}", timeout, e)))?;
        }

        if let Some(timeout) = lookup("STREAM_TIMEOUT") {
            self.stream_timeout_seconds = timeout.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid STREAM_TIMEOUT value '{}': {}", timeout, e)))?;
        }

        if let Some(cooldown) = lookup("COOLDOWN_SECONDS") {
            self.cooldown_seconds = cooldown.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid COOLDOWN_SECONDS value '{}': {}", cooldown, e)))?;
        }

        if let Some(enable_color) = lookup("ENABLE_COLOR") {
            self.enable_color = enable_color.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid ENABLE_COLOR value '{}': {}", enable_color, e)))?;
        }

        if let Some(level) = lookup("LOG_LEVEL") {
            self.log_level = Some(level.parse()
                .map_err(|e: AppError| AppError::config(format!("Invalid LOG_LEVEL value '{}': {}", level, e)))?);
        }

        if let Some(format) = lookup("LOG_FORMAT") {
            self.log_format = Some(format.parse()
                .map_err(|e: AppError| AppError::config(format!("Invalid LOG_FORMAT value '{}': {}", format, e)))?);
        }

        Ok(())
    }
}

// Default value functions for serde
fn default_proxy_url() -> String {
    crate::defaults::DEFAULT_PROXY_URL.to_string()
}

fn default_api_key() -> String {
    crate::defaults::DEFAULT_API_KEY.to_string()
}

fn default_source_count() -> u32 {
    crate::defaults::DEFAULT_SOURCE_COUNT
}

fn default_test_duration_secs() -> u64 {
    crate::defaults::DEFAULT_TEST_DURATION.as_secs()
}

fn default_playlist_timeout_secs() -> u64 {
    crate::defaults::DEFAULT_PLAYLIST_TIMEOUT.as_secs()
}

fn default_stream_timeout_secs() -> u64 {
    crate::defaults::DEFAULT_STREAM_TIMEOUT.as_secs()
}

fn default_cooldown_secs() -> u64 {
    crate::defaults::DEFAULT_COOLDOWN.as_secs()
}

fn default_enable_color() -> bool {
    crate::defaults::DEFAULT_ENABLE_COLOR
}
