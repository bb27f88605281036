use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::{Granularity, TimeTick, VisibleWindow, YBounds};
use crate::error::{ChartError, ChartResult};

/// Stroke pattern of a horizontal guide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineStrokeStyle {
    Solid,
    Dashed,
}

/// Fixed horizontal guide at a policy level, independent of the data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdLine {
    pub level: f64,
    pub style: LineStrokeStyle,
}

impl ThresholdLine {
    #[must_use]
    pub const fn new(level: f64, style: LineStrokeStyle) -> Self {
        Self { level, style }
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.level.is_finite() {
            return Err(ChartError::InvalidData(
                "threshold level must be finite".to_owned(),
            ));
        }
        Ok(())
    }
}

#[must_use]
pub fn default_thresholds() -> Vec<ThresholdLine> {
    vec![
        ThresholdLine::new(0.9, LineStrokeStyle::Dashed),
        ThresholdLine::new(0.8, LineStrokeStyle::Solid),
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenePoint {
    pub date: NaiveDate,
    pub time: f64,
    pub value: f64,
    pub tooltip: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSeriesScene {
    pub name: String,
    pub points: Vec<ScenePoint>,
}

impl LineSeriesScene {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            points: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Backend-agnostic content of one chart draw pass.
///
/// Series are never pre-filtered by the visible window; the drawing surface
/// clips. Only the axis bounds, granularity and ticks follow the zoom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartScene {
    pub composite: LineSeriesScene,
    pub moving_average: LineSeriesScene,
    pub thresholds: Vec<ThresholdLine>,
    pub visible_window: VisibleWindow,
    pub x_range: (f64, f64),
    pub y_bounds: YBounds,
    pub granularity: Granularity,
    pub time_ticks: Vec<TimeTick>,
    pub footer: String,
}

impl ChartScene {
    /// Threshold guides whose level lies inside the current Y bounds.
    pub fn visible_thresholds(&self) -> impl Iterator<Item = &ThresholdLine> + '_ {
        self.thresholds
            .iter()
            .filter(|line| self.y_bounds.contains(line.level))
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize scene: {e}")))
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse scene json: {e}")))
    }
}
