//! Configuration parsing from CLI arguments and environment variables

use crate::{
    cli::Cli,
    config::env::EnvManager,
    error::Result,
    models::Config,
};
use std::path::PathBuf;

/// Configuration parser that layers defaults, .env, environment and CLI
pub struct ConfigParser {
    cli: Cli,
    env_file: PathBuf,
}

impl ConfigParser {
    /// Create a new configuration parser with CLI arguments
    pub fn new(cli: Cli) -> Self {
        Self {
            cli,
            env_file: PathBuf::from(".env"),
        }
    }

    /// Read dotenv values from another file than `./.env`
    pub fn with_env_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.env_file = path.into();
        self
    }

    /// Parse and build the complete configuration
    pub fn parse(&self) -> Result<Config> {
        let mut config = Config::default();

        // dotenv never overrides variables that are already set
        EnvManager::load_env_file_from(&self.env_file, self.cli.debug)?;

        if self.cli.debug {
            for warning in EnvManager::validate_current_env() {
                eprintln!("{}", warning);
            }
        }

        config.merge_from_env()?;

        self.apply_cli_overrides(&mut config);

        config.validate()?;

        Ok(config)
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(&self, config: &mut Config) {
        if let Some(ref proxy_url) = self.cli.proxy_url {
            config.proxy_url = proxy_url.trim().trim_end_matches('/').to_string();
        }

        if let Some(ref api_key) = self.cli.api_key {
            config.api_key = api_key.clone();
        }

        if let Some(sources) = self.cli.sources {
            config.source_count = sources;
        }

        if let Some(duration) = self.cli.duration {
            config.test_duration_seconds = duration;
        }

        if let Some(cooldown) = self.cli.cooldown {
            config.cooldown_seconds = cooldown;
        }

        if let Some(timeout) = self.cli.playlist_timeout {
            config.playlist_timeout_seconds = timeout;
        }

        if let Some(timeout) = self.cli.stream_timeout {
            config.stream_timeout_seconds = timeout;
        }

        if !self.cli.use_colors() {
            config.enable_color = false;
        }

        // CLI-only flags
        config.verbose = self.cli.verbose;
        config.debug = self.cli.debug;

        if config.debug {
            println!("Applied CLI overrides to configuration");
            println!(
                "Final config: sources={}, duration={}s, cooldown={}s, enable_color={}",
                config.source_count, config.test_duration_seconds, config.cooldown_seconds, config.enable_color
            );
        }
    }
}

/// Convenience function to load complete configuration from CLI arguments
pub fn load_config(cli: Cli) -> Result<Config> {
    ConfigParser::new(cli).parse()
}

/// Display configuration summary for debug purposes
pub fn display_config_summary(config: &Config) -> String {
    let summary = [
        format!("Proxy URL: {}", config.proxy_url),
        format!("Sources: 0..{}", config.source_count),
        format!("Test Duration: {}s", config.test_duration_seconds),
        format!("Playlist Timeout: {}s", config.playlist_timeout_seconds),
        format!("Stream Timeout: {}s", config.stream_timeout_seconds),
        format!("Cooldown: {}s", config.cooldown_seconds),
        format!("Color Output: {}", config.enable_color),
        format!("Verbose: {}", config.verbose),
        format!("Debug: {}", config.debug),
    ];

    summary.join("\n")
}
