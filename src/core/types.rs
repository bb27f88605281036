use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::{date_to_day_number, percent_to_fraction};
use crate::error::ChartResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Pixel margins between the viewport edge and the plotted data area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotInsets {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Default for PlotInsets {
    fn default() -> Self {
        Self {
            left: 60.0,
            top: 24.0,
            right: 16.0,
            bottom: 48.0,
        }
    }
}

impl PlotInsets {
    #[must_use]
    pub const fn uniform(value: f64) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }
}

/// One row as delivered by the series source, in percent units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesRow {
    pub date: NaiveDate,
    pub composite_percent: Option<Decimal>,
    pub moving_average_percent: Option<Decimal>,
}

impl SeriesRow {
    #[must_use]
    pub fn new(
        date: NaiveDate,
        composite_percent: Option<Decimal>,
        moving_average_percent: Option<Decimal>,
    ) -> Self {
        Self {
            date,
            composite_percent,
            moving_average_percent,
        }
    }
}

/// Normalized sample: both values are fractions (`percent / 100`).
///
/// A missing value removes the point from that series only; the timestamp
/// stays valid for the other one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub date: NaiveDate,
    pub composite: Option<f64>,
    pub moving_average: Option<f64>,
}

impl TimeSeriesPoint {
    #[must_use]
    pub fn new(date: NaiveDate, composite: Option<f64>, moving_average: Option<f64>) -> Self {
        Self {
            date,
            composite,
            moving_average,
        }
    }

    pub fn from_row(row: &SeriesRow) -> ChartResult<Self> {
        let composite = row
            .composite_percent
            .map(|value| percent_to_fraction(value, "composite"))
            .transpose()?;
        let moving_average = row
            .moving_average_percent
            .map(|value| percent_to_fraction(value, "moving average"))
            .transpose()?;
        Ok(Self::new(row.date, composite, moving_average))
    }

    /// Data-space X coordinate of this sample.
    #[must_use]
    pub fn time(&self) -> f64 {
        date_to_day_number(self.date)
    }

    /// Non-missing values of this sample, composite first.
    pub fn values(&self) -> impl Iterator<Item = f64> {
        self.composite.into_iter().chain(self.moving_average)
    }
}
