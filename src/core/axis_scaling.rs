use serde::{Deserialize, Serialize};

use crate::core::windowing::values_in_time_window;
use crate::core::{TimeSeriesDataset, VisibleWindow};

/// Visible X span, in days, at or below which the time axis switches to
/// weekly ticks.
pub const DEFAULT_WEEKLY_THRESHOLD_DAYS: f64 = 120.0;

/// Bounds used when there is nothing to autoscale from.
pub const DEFAULT_Y_BOUNDS: YBounds = YBounds { min: 0.0, max: 1.0 };

const Y_BOUND_STEPS_PER_UNIT: f64 = 10.0;
// Absorbs float noise such as `0.7 * 10.0 == 7.000000000000001`.
const Y_BOUND_SNAP: f64 = 1e9;

/// Time unit used for X-axis tick spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Granularity {
    Monthly,
    Weekly,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YBounds {
    pub min: f64,
    pub max: f64,
}

impl YBounds {
    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Autoscales the Y axis to the values visible inside the window's X range.
///
/// Both series contribute. Bounds are rounded outward to the nearest `0.1`
/// and are never flat: a degenerate result is widened by one step.
#[must_use]
pub fn compute_y_bounds(dataset: &TimeSeriesDataset, window: &VisibleWindow) -> YBounds {
    let values = values_in_time_window(dataset.points(), window.x_range());
    let Some((min, max)) = min_max(&values) else {
        return DEFAULT_Y_BOUNDS;
    };

    let mut min_steps = snap(min * Y_BOUND_STEPS_PER_UNIT).floor();
    let mut max_steps = snap(max * Y_BOUND_STEPS_PER_UNIT).ceil();
    // The snap may pull a value sitting just past a step back onto it.
    if min_steps / Y_BOUND_STEPS_PER_UNIT > min {
        min_steps -= 1.0;
    }
    if max_steps / Y_BOUND_STEPS_PER_UNIT < max {
        max_steps += 1.0;
    }
    if max_steps <= min_steps {
        max_steps = min_steps + 1.0;
    }

    YBounds {
        min: min_steps / Y_BOUND_STEPS_PER_UNIT,
        max: max_steps / Y_BOUND_STEPS_PER_UNIT,
    }
}

/// Y bounds currently in effect: an explicit Y zoom wins over autoscaling.
#[must_use]
pub fn resolve_y_bounds(dataset: &TimeSeriesDataset, window: &VisibleWindow) -> YBounds {
    match window.y_range() {
        Some((min, max)) => YBounds { min, max },
        None => compute_y_bounds(dataset, window),
    }
}

/// X range currently in effect: the explicit zoom, else the dataset span.
#[must_use]
pub fn resolve_x_range(dataset: &TimeSeriesDataset, window: &VisibleWindow) -> Option<(f64, f64)> {
    window.x_range().or_else(|| dataset.time_range())
}

/// Picks tick granularity from the visible X span.
///
/// An empty dataset with an auto X axis has no span and stays monthly.
#[must_use]
pub fn compute_granularity(
    dataset: &TimeSeriesDataset,
    window: &VisibleWindow,
    weekly_threshold_days: f64,
) -> Granularity {
    match resolve_x_range(dataset, window) {
        Some((start, end)) => granularity_for_span(end - start, weekly_threshold_days),
        None => Granularity::Monthly,
    }
}

#[must_use]
pub fn granularity_for_span(span_days: f64, weekly_threshold_days: f64) -> Granularity {
    if span_days.abs() <= weekly_threshold_days {
        Granularity::Weekly
    } else {
        Granularity::Monthly
    }
}

fn snap(value: f64) -> f64 {
    (value * Y_BOUND_SNAP).round() / Y_BOUND_SNAP
}

fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|value| value.is_finite())
        .fold(None, |acc, value| {
            Some(match acc {
                None => (value, value),
                Some((min, max)) => (min.min(value), max.max(value)),
            })
        })
}
