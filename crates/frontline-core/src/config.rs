//! Tunable HUD settings.

use serde::{Deserialize, Serialize};

use crate::error::HudError;

/// Settings shared by the widgets. Missing fields fall back to defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HudConfig {
    /// Rows shown while the leaderboard is in "top N" mode.
    pub leaderboard_top_n: usize,
    /// Ticks between leaderboard recomputations.
    pub leaderboard_refresh_ticks: u64,
    /// Minimum wall-clock gap between processed pointer samples.
    pub pointer_sample_interval_ms: f64,
    /// Search radius (world units) for hovering naval units.
    pub unit_search_radius: f64,
    /// Host tick period in the browser client.
    pub tick_interval_ms: u32,
}

impl Default for HudConfig {
    fn default() -> Self {
        Self {
            leaderboard_top_n: 5,
            leaderboard_refresh_ticks: 10,
            pointer_sample_interval_ms: 100.0,
            unit_search_radius: 50.0,
            tick_interval_ms: 100,
        }
    }
}

impl HudConfig {
    pub fn from_json(json: &str) -> Result<Self, HudError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = HudConfig::from_json(r#"{"leaderboard_top_n": 8}"#).unwrap();

        assert_eq!(config.leaderboard_top_n, 8);
        assert_eq!(config.leaderboard_refresh_ticks, 10);
        assert!((config.unit_search_radius - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_malformed_config_is_rejected() {
        let err = HudConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, HudError::InvalidConfig(_)));
    }
}
