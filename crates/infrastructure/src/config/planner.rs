//! Planner behaviour: search debounce and viewport padding.

use std::time::Duration;

use application::PlannerSettings;
use domain::BoundsPadding;
use serde::{Deserialize, Serialize};

/// Planner session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerAppConfig {
    /// Wait after the last keystroke before searching, in milliseconds (default: 500)
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,

    /// Fraction of the route span added around it when fitting the viewport (default: 0.1)
    #[serde(default = "default_padding_fraction")]
    pub padding_fraction: f64,

    /// Minimum viewport margin in degrees (default: 0.002)
    #[serde(default = "default_padding_min_margin")]
    pub padding_min_margin_deg: f64,
}

const fn default_search_debounce_ms() -> u64 {
    500
}

const fn default_padding_fraction() -> f64 {
    0.1
}

const fn default_padding_min_margin() -> f64 {
    0.002
}

impl Default for PlannerAppConfig {
    fn default() -> Self {
        Self {
            search_debounce_ms: default_search_debounce_ms(),
            padding_fraction: default_padding_fraction(),
            padding_min_margin_deg: default_padding_min_margin(),
        }
    }
}

impl PlannerAppConfig {
    /// Convert to the application-layer session settings
    #[must_use]
    pub fn to_settings(&self) -> PlannerSettings {
        PlannerSettings {
            search_debounce: Duration::from_millis(self.search_debounce_ms),
            padding: BoundsPadding {
                fraction: self.padding_fraction,
                min_margin_deg: self.padding_min_margin_deg,
            },
        }
    }

    /// Validate the planner configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.padding_fraction) {
            return Err(format!(
                "planner.padding_fraction must be between 0 and 1, got {}",
                self.padding_fraction
            ));
        }
        if !(0.0..=1.0).contains(&self.padding_min_margin_deg) {
            return Err(format!(
                "planner.padding_min_margin_deg must be between 0 and 1, got {}",
                self.padding_min_margin_deg
            ));
        }
        if self.search_debounce_ms > 10_000 {
            return Err("planner.search_debounce_ms must not exceed 10000".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_convert_to_settings() {
        let settings = PlannerAppConfig::default().to_settings();
        assert_eq!(settings, PlannerSettings::default());
        assert_eq!(settings.search_debounce, Duration::from_millis(500));
    }

    #[test]
    fn padding_fraction_out_of_range() {
        let config = PlannerAppConfig {
            padding_fraction: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_debounce_is_allowed() {
        let config = PlannerAppConfig {
            search_debounce_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert!(config.to_settings().search_debounce.is_zero());
    }
}
