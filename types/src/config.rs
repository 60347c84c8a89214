//! Dashboard configuration

use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::options::{AreaChartOptions, DonutChartOptions, OptionsError, RadarChartOptions};

/// Backend REST endpoint
#[derive(Tsify, Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(default)]
pub struct SourceConfig {
    /// Project base URL, e.g. `https://xyz.supabase.co`
    pub url: String,
    /// Public (anon) API key sent with every request
    pub anon_key: String,
}

impl SourceConfig {
    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty() && !self.anon_key.trim().is_empty()
    }
}

/// Everything the dashboard needs to fetch and draw
#[derive(Tsify, Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(default)]
pub struct DashboardConfig {
    /// Data source
    pub source: SourceConfig,
    /// Trend chart look
    pub area: AreaChartOptions,
    /// Radar chart look
    pub radar: RadarChartOptions,
    /// Traffic donut look
    pub donut: DonutChartOptions,
}

impl DashboardConfig {
    /// Parse from JSON; missing sections keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Validate every renderer section
    pub fn validate(&self) -> Result<(), OptionsError> {
        self.area.validate()?;
        self.radar.validate()?;
        self.donut.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_is_the_default_config() {
        let config = DashboardConfig::from_json("{}").unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert!(!config.source.is_configured());
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn sections_override_independently() {
        let config = DashboardConfig::from_json(
            r#"{
                "source": {"url": "https://demo.supabase.co", "anon_key": "public"},
                "donut": {"inner_ratio": 0.5}
            }"#,
        )
        .unwrap();
        assert!(config.source.is_configured());
        assert_eq!(config.donut.inner_ratio, 0.5);
        assert_eq!(config.area, AreaChartOptions::default());
    }

    #[test]
    fn invalid_section_fails_validation() {
        let config = DashboardConfig::from_json(r#"{"donut": {"inner_ratio": 1.5}}"#).unwrap();
        assert!(matches!(
            config.validate(),
            Err(OptionsError::Ratio {
                field: "inner_ratio",
                ..
            })
        ));
    }
}
