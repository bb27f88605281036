use serde::{Deserialize, Serialize};

use crate::core::{DEFAULT_WEEKLY_THRESHOLD_DAYS, PlotInsets, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{ThresholdLine, default_thresholds};

pub const DEFAULT_LOOKBACK_YEARS: u32 = 2;
pub const DEFAULT_STRATEGY_PLACEHOLDER: &str = "Unknown";

/// Public engine bootstrap configuration.
///
/// Serializable so hosts can keep chart setup in a JSON file instead of
/// inventing their own format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartEngineConfig {
    pub viewport: Viewport,
    #[serde(default)]
    pub plot_insets: PlotInsets,
    #[serde(default = "default_weekly_threshold_days")]
    pub weekly_threshold_days: f64,
    #[serde(default = "default_thresholds")]
    pub thresholds: Vec<ThresholdLine>,
    #[serde(default = "default_lookback_years")]
    pub default_lookback_years: u32,
    #[serde(default = "default_strategy_placeholder")]
    pub strategy_placeholder: String,
    #[serde(default)]
    pub default_category: Option<String>,
}

impl ChartEngineConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            plot_insets: PlotInsets::default(),
            weekly_threshold_days: default_weekly_threshold_days(),
            thresholds: default_thresholds(),
            default_lookback_years: default_lookback_years(),
            strategy_placeholder: default_strategy_placeholder(),
            default_category: None,
        }
    }

    #[must_use]
    pub fn with_plot_insets(mut self, insets: PlotInsets) -> Self {
        self.plot_insets = insets;
        self
    }

    /// Sets the visible span (days) at or below which ticks become weekly.
    #[must_use]
    pub fn with_weekly_threshold_days(mut self, days: f64) -> Self {
        self.weekly_threshold_days = days;
        self
    }

    #[must_use]
    pub fn with_thresholds(mut self, thresholds: Vec<ThresholdLine>) -> Self {
        self.thresholds = thresholds;
        self
    }

    #[must_use]
    pub fn with_default_lookback_years(mut self, years: u32) -> Self {
        self.default_lookback_years = years;
        self
    }

    #[must_use]
    pub fn with_default_category(mut self, category: impl Into<String>) -> Self {
        self.default_category = Some(category.into());
        self
    }

    #[must_use]
    pub fn with_strategy_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.strategy_placeholder = placeholder.into();
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        let insets = self.plot_insets;
        if [insets.left, insets.top, insets.right, insets.bottom]
            .iter()
            .any(|inset| !inset.is_finite() || *inset < 0.0)
        {
            return Err(ChartError::InvalidData(
                "plot insets must be finite and >= 0".to_owned(),
            ));
        }
        if insets.left + insets.right >= f64::from(self.viewport.width)
            || insets.top + insets.bottom >= f64::from(self.viewport.height)
        {
            return Err(ChartError::InvalidData(
                "plot insets leave no drawable area".to_owned(),
            ));
        }

        if !self.weekly_threshold_days.is_finite() || self.weekly_threshold_days <= 0.0 {
            return Err(ChartError::InvalidData(
                "weekly threshold must be finite and > 0 days".to_owned(),
            ));
        }
        for line in &self.thresholds {
            line.validate()?;
        }
        if self.default_lookback_years == 0 {
            return Err(ChartError::InvalidData(
                "default lookback must be at least one year".to_owned(),
            ));
        }
        Ok(())
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config json: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }
}

fn default_weekly_threshold_days() -> f64 {
    DEFAULT_WEEKLY_THRESHOLD_DAYS
}

fn default_lookback_years() -> u32 {
    DEFAULT_LOOKBACK_YEARS
}

fn default_strategy_placeholder() -> String {
    DEFAULT_STRATEGY_PLACEHOLDER.to_owned()
}
