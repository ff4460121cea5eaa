//! Type definitions and aliases

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use crate::error::{AppError, Result};

/// Numeric identifier of a backend source on the proxy (`src` query parameter)
pub type SourceIndex = u32;

/// Bitrate thresholds used to classify a measured stream
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityThresholds {
    /// Minimum bitrate (kbps, inclusive) for the high tier
    pub high_kbps: f64,
    /// Minimum bitrate (kbps, inclusive) for the medium tier
    pub medium_kbps: f64,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            high_kbps: crate::defaults::HIGH_QUALITY_KBPS,
            medium_kbps: crate::defaults::MEDIUM_QUALITY_KBPS,
        }
    }
}

/// Coarse quality classification based on measured bitrate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QualityTier {
    /// At or above the high threshold
    High,
    /// At or above the medium threshold
    Medium,
    /// Below the medium threshold
    Low,
}

impl QualityTier {
    /// Classify a bitrate against the given thresholds
    pub fn from_bitrate(kbps: f64, thresholds: &QualityThresholds) -> Self {
        if kbps >= thresholds.high_kbps {
            Self::High
        } else if kbps >= thresholds.medium_kbps {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Star rating shown in console reports
    pub fn stars(&self) -> &'static str {
        match self {
            Self::High => "⭐⭐⭐⭐⭐",
            Self::Medium => "⭐⭐⭐",
            Self::Low => "⭐",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries_are_inclusive() {
        let thresholds = QualityThresholds::default();
        assert_eq!(QualityTier::from_bitrate(2000.0, &thresholds), QualityTier::High);
        assert_eq!(QualityTier::from_bitrate(1999.9, &thresholds), QualityTier::Medium);
        assert_eq!(QualityTier::from_bitrate(800.0, &thresholds), QualityTier::Medium);
        assert_eq!(QualityTier::from_bitrate(799.0, &thresholds), QualityTier::Low);
        assert_eq!(QualityTier::from_bitrate(0.0, &thresholds), QualityTier::Low);
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = QualityThresholds { high_kbps: 500.0, medium_kbps: 100.0 };
        assert_eq!(QualityTier::from_bitrate(600.0, &thresholds), QualityTier::High);
        assert_eq!(QualityTier::from_bitrate(100.0, &thresholds), QualityTier::Medium);
    }

    #[test]
    fn test_star_ratings() {
        assert_eq!(QualityTier::High.stars().chars().count(), 5);
        assert_eq!(QualityTier::Medium.stars().chars().count(), 3);
        assert_eq!(QualityTier::Low.stars().chars().count(), 1);
    }
}
