use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::primitives::day_number_to_date;
use crate::core::windowing::ordered_window;
use crate::error::ChartResult;

/// Currently visible sub-range of both axes.
///
/// `None` on an axis means "auto": the full dataset span for X, autoscaled
/// bounds for Y. X values are data-space day numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VisibleWindow {
    pub x_min: Option<f64>,
    pub x_max: Option<f64>,
    pub y_min: Option<f64>,
    pub y_max: Option<f64>,
}

impl VisibleWindow {
    #[must_use]
    pub fn full() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_x_range(mut self, start: f64, end: f64) -> Self {
        let (min, max) = ordered_window(start, end);
        self.x_min = Some(min);
        self.x_max = Some(max);
        self
    }

    #[must_use]
    pub fn with_y_range(mut self, start: f64, end: f64) -> Self {
        let (min, max) = ordered_window(start, end);
        self.y_min = Some(min);
        self.y_max = Some(max);
        self
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.x_min.is_none() && self.x_max.is_none() && self.y_min.is_none() && self.y_max.is_none()
    }

    /// Explicit X range, `None` while the X axis is on auto.
    #[must_use]
    pub fn x_range(&self) -> Option<(f64, f64)> {
        self.x_min.zip(self.x_max)
    }

    /// Explicit Y range, `None` while the Y axis is on auto.
    #[must_use]
    pub fn y_range(&self) -> Option<(f64, f64)> {
        self.y_min.zip(self.y_max)
    }

    /// X range as calendar dates (start truncated to its day).
    pub fn x_dates(&self) -> ChartResult<Option<(NaiveDate, NaiveDate)>> {
        self.x_range()
            .map(|(min, max)| Ok((day_number_to_date(min)?, day_number_to_date(max)?)))
            .transpose()
    }
}
