//! Data models and structures for the IPTV source benchmark

pub mod config;
pub mod metrics;

// Re-export main model types
pub use config::Config;
pub use metrics::{RunSummary, SourceOutcome, SourceReport, StreamMetrics};
