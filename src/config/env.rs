//! Environment variable handling and .env file management

use crate::error::{AppError, Result};
use std::path::Path;

/// Environment variable configuration manager
pub struct EnvManager;

impl EnvManager {
    /// Load a dotenv file; variables already set in the environment win
    pub fn load_env_file_from(path: &Path, debug: bool) -> Result<()> {
        if path.exists() {
            dotenv::from_path(path)
                .map_err(|e| AppError::config(format!("Failed to load {}: {}", path.display(), e)))?;

            if debug {
                println!("Loaded configuration from {}", path.display());
            }
        } else if debug {
            println!("No .env file found, using defaults and CLI arguments");
        }

        Ok(())
    }

    /// Create example .env file content
    pub fn create_example_env_content() -> String {
        r#"# IPTV Source Benchmark Configuration
#
# Values set here are used as defaults and can be overridden by real
# environment variables and by command-line arguments.

# Base URL of the IPTV proxy
# PROXY_URL=http://152.70.45.91:3005

# API key sent as the `key` query parameter
# API_KEY=sport-zone-secure-v1

# Number of sources to test, starting at index 0 (1-64)
# SOURCE_COUNT=4

# Seconds to sample each stream (1-600)
# TEST_DURATION=10

# Playlist and stream timeouts in seconds (1-300)
# PLAYLIST_TIMEOUT=10
# STREAM_TIMEOUT=15

# Pause between two sources in seconds (0-60)
# COOLDOWN_SECONDS=2

# Enable colored output (true/false)
# ENABLE_COLOR=true

# Diagnostic logging (trace, debug, info, warn, error) and format (console, json, compact)
# LOG_LEVEL=warn
# LOG_FORMAT=console
"#
        .to_string()
    }

    /// Save example .env file to disk
    pub fn save_example_env_file(path: &Path) -> Result<()> {
        std::fs::write(path, Self::create_example_env_content())
            .map_err(|e| AppError::config(format!("Failed to write example .env file: {}", e)))?;

        Ok(())
    }

    /// Validate environment variable format before parsing
    pub fn validate_env_var(key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "PROXY_URL" => {
                let parsed = url::Url::parse(value)
                    .map_err(|e| AppError::config(format!("Invalid PROXY_URL '{}': {}", value, e)))?;
                if parsed.scheme() != "http" && parsed.scheme() != "https" {
                    return Err(AppError::config(format!("PROXY_URL must use http or https: {}", value)));
                }
            }
            "API_KEY" => {
                if value.is_empty() {
                    return Err(AppError::config("API_KEY cannot be empty"));
                }
            }
            "SOURCE_COUNT" => Self::validate_range(key, value, 1, 64)?,
            "TEST_DURATION" => Self::validate_range(key, value, 1, 600)?,
            "PLAYLIST_TIMEOUT" | "STREAM_TIMEOUT" => Self::validate_range(key, value, 1, 300)?,
            "COOLDOWN_SECONDS" => Self::validate_range(key, value, 0, 60)?,
            "ENABLE_COLOR" => {
                value.parse::<bool>()
                    .map_err(|e| AppError::config(format!("Invalid ENABLE_COLOR value '{}': {}", value, e)))?;
            }
            "LOG_LEVEL" => {
                value.parse::<crate::logging::LogLevel>()?;
            }
            "LOG_FORMAT" => {
                value.parse::<crate::logging::LogFormat>()?;
            }
            _ => {
                // Unknown environment variable, ignore
            }
        }

        Ok(())
    }

    fn validate_range(key: &str, value: &str, min: u64, max: u64) -> Result<()> {
        let number: u64 = value.parse()
            .map_err(|e| AppError::config(format!("Invalid {} value '{}': {}", key, value, e)))?;
        if number < min || number > max {
            return Err(AppError::config(format!(
                "{} must be between {} and {}, got: {}",
                key, min, max, number
            )));
        }
        Ok(())
    }

    /// Get list of all supported environment variables with descriptions
    pub fn get_supported_env_vars() -> Vec<(&'static str, &'static str, &'static str)> {
        vec![
            ("PROXY_URL", "Base URL of the IPTV proxy", "http://152.70.45.91:3005"),
            ("API_KEY", "API key for playlist requests", "sport-zone-secure-v1"),
            ("SOURCE_COUNT", "Number of sources to test (1-64)", "4"),
            ("TEST_DURATION", "Seconds to sample each stream (1-600)", "10"),
            ("PLAYLIST_TIMEOUT", "Playlist timeout in seconds (1-300)", "10"),
            ("STREAM_TIMEOUT", "Stream timeout in seconds (1-300)", "15"),
            ("COOLDOWN_SECONDS", "Pause between sources in seconds (0-60)", "2"),
            ("ENABLE_COLOR", "Enable colored output", "true"),
            ("LOG_LEVEL", "Diagnostic log level", "warn"),
            ("LOG_FORMAT", "Diagnostic log format (console, json, compact)", "console"),
        ]
    }

    /// Display environment variable help
    pub fn display_env_help() -> String {
        let mut help = String::new();
        help.push_str("Supported Environment Variables:\n\n");

        for (var, description, example) in Self::get_supported_env_vars() {
            help.push_str(&format!("  {:<18} {}\n", var, description));
            help.push_str(&format!("  {:<18} Example: {}\n\n", "", example));
        }

        help.push_str("Configuration Priority (highest to lowest):\n");
        help.push_str("  1. Command-line arguments\n");
        help.push_str("  2. Environment variables\n");
        help.push_str("  3. .env file values\n");
        help.push_str("  4. Default values\n");

        help
    }

    /// Validate all currently set environment variables
    pub fn validate_current_env() -> Vec<String> {
        Self::get_supported_env_vars()
            .into_iter()
            .filter_map(|(var_name, _, _)| {
                let value = std::env::var(var_name).ok()?;
                Self::validate_env_var(var_name, &value)
                    .err()
                    .map(|e| format!("Warning: {}", e))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_create_example_content() {
        let content = EnvManager::create_example_env_content();
        for (var, _, _) in EnvManager::get_supported_env_vars() {
            assert!(content.contains(var), "example is missing {}", var);
        }
    }

    #[test]
    fn test_save_example_file() {
        let temp_file = NamedTempFile::new().unwrap();
        EnvManager::save_example_env_file(temp_file.path()).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(content.contains("IPTV Source Benchmark Configuration"));
    }

    #[test]
    fn test_validate_env_var() {
        assert!(EnvManager::validate_env_var("PROXY_URL", "http://10.0.0.1:3005").is_ok());
        assert!(EnvManager::validate_env_var("PROXY_URL", "ftp://10.0.0.1").is_err());
        assert!(EnvManager::validate_env_var("PROXY_URL", "not a url").is_err());

        assert!(EnvManager::validate_env_var("API_KEY", "abc").is_ok());
        assert!(EnvManager::validate_env_var("API_KEY", "  ").is_err());

        assert!(EnvManager::validate_env_var("SOURCE_COUNT", "4").is_ok());
        assert!(EnvManager::validate_env_var("SOURCE_COUNT", "0").is_err());
        assert!(EnvManager::validate_env_var("SOURCE_COUNT", "65").is_err());

        assert!(EnvManager::validate_env_var("TEST_DURATION", "600").is_ok());
        assert!(EnvManager::validate_env_var("TEST_DURATION", "601").is_err());
        assert!(EnvManager::validate_env_var("STREAM_TIMEOUT", "abc").is_err());

        assert!(EnvManager::validate_env_var("COOLDOWN_SECONDS", "0").is_ok());
        assert!(EnvManager::validate_env_var("COOLDOWN_SECONDS", "61").is_err());

        assert!(EnvManager::validate_env_var("ENABLE_COLOR", "false").is_ok());
        assert!(EnvManager::validate_env_var("ENABLE_COLOR", "maybe").is_err());

        assert!(EnvManager::validate_env_var("LOG_LEVEL", "debug").is_ok());
        assert!(EnvManager::validate_env_var("LOG_FORMAT", "xml").is_err());

        assert!(EnvManager::validate_env_var("UNRELATED", "anything").is_ok());
    }

    #[test]
    fn test_display_env_help() {
        let help = EnvManager::display_env_help();
        assert!(help.contains("PROXY_URL"));
        assert!(help.contains("COOLDOWN_SECONDS"));
        assert!(help.contains("1. Command-line arguments"));
    }

    #[test]
    fn test_missing_env_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join(".env");
        assert!(EnvManager::load_env_file_from(&missing, false).is_ok());
    }
}
