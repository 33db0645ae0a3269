use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{NavigationError, Result};

/// Timing and layout constants for cross-section navigation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavigationConfig {
    /// Height of the fixed header that overlays the top of the viewport
    pub header_offset_px: f64,

    /// Wait before filtering the portfolio and focusing an item
    pub portfolio_settle_ms: u64,

    /// Wait before centering a service card
    pub service_settle_ms: u64,

    /// How long a focused portfolio item stays highlighted
    pub highlight_ms: u64,

    /// Cancel the previous navigation's deferred step when a new one starts
    pub cancel_pending: bool,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            header_offset_px: 80.0,
            portfolio_settle_ms: 500,
            service_settle_ms: 500,
            highlight_ms: 2000,
            cancel_pending: true,
        }
    }
}

impl NavigationConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.header_offset_px.is_finite() || self.header_offset_px < 0.0 {
            return Err(NavigationError::InvalidConfig(format!(
                "header_offset_px must be a non-negative number (got {})",
                self.header_offset_px
            )));
        }
        if self.highlight_ms == 0 {
            return Err(NavigationError::InvalidConfig(
                "highlight_ms must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub const fn portfolio_settle(&self) -> Duration {
        Duration::from_millis(self.portfolio_settle_ms)
    }

    #[must_use]
    pub const fn service_settle(&self) -> Duration {
        Duration::from_millis(self.service_settle_ms)
    }

    #[must_use]
    pub const fn highlight(&self) -> Duration {
        Duration::from_millis(self.highlight_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_valid() {
        assert!(NavigationConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: NavigationConfig = toml::from_str("highlight_ms = 1500").unwrap();
        assert_eq!(config.highlight_ms, 1500);
        assert_eq!(config.portfolio_settle_ms, 500);
        assert!(config.cancel_pending);
    }

    #[test]
    fn config_validation() {
        let mut config = NavigationConfig {
            header_offset_px: -1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        config.header_offset_px = f64::NAN;
        assert!(config.validate().is_err());

        config.header_offset_px = 64.0;
        config.highlight_ms = 0;
        assert!(config.validate().is_err());

        config.highlight_ms = 1;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn unknown_keys_rejected() {
        assert!(toml::from_str::<NavigationConfig>("highlite_ms = 1").is_err());
    }
}
