//! Command-line interface

use clap::Parser;
use std::path::PathBuf;

/// IPTV Source Benchmark - measures playlist, connection and bitrate quality of proxy sources
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "iptv-bench")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the IPTV proxy
    #[arg(long, value_name = "URL")]
    pub proxy_url: Option<String>,

    /// API key sent as the `key` query parameter
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Number of sources to test, starting at index 0
    #[arg(short = 'n', long, value_name = "COUNT")]
    pub sources: Option<u32>,

    /// Seconds to sample each stream
    #[arg(short, long, value_name = "SECS", value_parser = parse_seconds)]
    pub duration: Option<u64>,

    /// Pause in seconds between two sources
    #[arg(long, value_name = "SECS", value_parser = parse_seconds)]
    pub cooldown: Option<u64>,

    /// Playlist request timeout in seconds
    #[arg(long, value_name = "SECS", value_parser = parse_seconds)]
    pub playlist_timeout: Option<u64>,

    /// Stream connection and read timeout in seconds
    #[arg(long, value_name = "SECS", value_parser = parse_seconds)]
    pub stream_timeout: Option<u64>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,

    /// Print the supported environment variables and exit
    #[arg(long)]
    pub env_help: bool,

    /// Write an example .env file and exit
    #[arg(long, value_name = "PATH", num_args = 0..=1, default_missing_value = ".env.example")]
    pub init_env: Option<PathBuf>,
}

impl Cli {
    /// Check if colors should be enabled
    pub fn use_colors(&self) -> bool {
        !self.no_color && supports_color()
    }

    /// Get configuration summary for display
    pub fn get_config_summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("Command-line overrides:\n");
        if let Some(ref proxy_url) = self.proxy_url {
            summary.push_str(&format!("  Proxy URL: {}\n", proxy_url));
        }
        if self.api_key.is_some() {
            summary.push_str("  API key: (set)\n");
        }
        if let Some(sources) = self.sources {
            summary.push_str(&format!("  Sources: {}\n", sources));
        }
        if let Some(duration) = self.duration {
            summary.push_str(&format!("  Test duration: {}s\n", duration));
        }
        if let Some(cooldown) = self.cooldown {
            summary.push_str(&format!("  Cooldown: {}s\n", cooldown));
        }
        summary.push_str(&format!("  Colored output: {}\n", self.use_colors()));
        summary.push_str(&format!("  Verbose mode: {}\n", self.verbose));
        summary.push_str(&format!("  Debug mode: {}\n", self.debug));

        summary
    }
}

/// Parse a whole number of seconds
fn parse_seconds(s: &str) -> Result<u64, String> {
    if s.starts_with('+') || s.starts_with("0x") || s.starts_with("0X") {
        return Err(format!("Invalid number of seconds: {}", s));
    }

    s.parse::<u64>()
        .map_err(|_| format!("Invalid number of seconds: {}", s))
}

/// Check if the terminal supports color output
fn supports_color() -> bool {
    if let Ok(term) = std::env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    #[cfg(target_os = "windows")]
    {
        if std::env::var("ANSICON").is_ok() || std::env::var("ConEmuANSI").is_ok() {
            return true;
        }
    }

    #[cfg(unix)]
    {
        true
    }
    #[cfg(not(unix))]
    {
        false
    }
}
