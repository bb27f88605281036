use crate::core::primitives::format_point_label;
use crate::core::{
    Granularity, TimeSeriesDataset, TimeSeriesPoint, VisibleWindow, format_percent,
    resolve_x_range, resolve_y_bounds, time_ticks,
};
use crate::error::{ChartError, ChartResult};

use super::{ChartScene, LineSeriesScene, ScenePoint, ThresholdLine};

pub const COMPOSITE_SERIES_NAME: &str = "Composite";
pub const MOVING_AVERAGE_SERIES_NAME: &str = "Moving Average";
const MISSING_VALUE_TEXT: &str = "N/A";

/// Everything needed to compose one scene.
#[derive(Debug, Clone, Copy)]
pub struct SceneInput<'a> {
    pub dataset: &'a TimeSeriesDataset,
    pub window: &'a VisibleWindow,
    pub granularity: Granularity,
    pub thresholds: &'a [ThresholdLine],
    pub strategy_label: &'a str,
}

/// Composes dataset, axis scaling and threshold guides into a [`ChartScene`].
///
/// Empty datasets are refused; callers keep the previous scene instead.
pub fn build_scene(input: SceneInput<'_>) -> ChartResult<ChartScene> {
    let SceneInput {
        dataset,
        window,
        granularity,
        thresholds,
        strategy_label,
    } = input;

    let Some(x_range) = resolve_x_range(dataset, window) else {
        return Err(ChartError::InvalidData(
            "cannot build a scene from an empty dataset".to_owned(),
        ));
    };
    for line in thresholds {
        line.validate()?;
    }

    let composite = series_scene(
        COMPOSITE_SERIES_NAME,
        dataset.composite_series(),
    );
    let moving_average = series_scene(
        MOVING_AVERAGE_SERIES_NAME,
        dataset.moving_average_series(),
    );

    Ok(ChartScene {
        composite,
        moving_average,
        thresholds: thresholds.to_vec(),
        visible_window: *window,
        x_range,
        y_bounds: resolve_y_bounds(dataset, window),
        granularity,
        time_ticks: time_ticks(x_range, granularity)?,
        footer: footer_text(
            strategy_label,
            dataset.latest_composite(),
            dataset.latest_moving_average(),
        ),
    })
}

/// Two-line footer under the chart.
#[must_use]
pub fn footer_text(
    strategy_label: &str,
    latest_composite: Option<f64>,
    latest_moving_average: Option<f64>,
) -> String {
    format!(
        "Withdrawal Strategy: {strategy_label}\nLatest Composite: {}  Latest Moving Average: {}",
        optional_percent(latest_composite),
        optional_percent(latest_moving_average),
    )
}

fn optional_percent(value: Option<f64>) -> String {
    value.map_or_else(|| MISSING_VALUE_TEXT.to_owned(), format_percent)
}

fn series_scene<'a>(
    name: &str,
    samples: impl Iterator<Item = (&'a TimeSeriesPoint, f64)>,
) -> LineSeriesScene {
    let mut scene = LineSeriesScene::new(name);
    scene.points = samples
        .map(|(point, value)| ScenePoint {
            date: point.date,
            time: point.time(),
            value,
            tooltip: format_point_label(point.date, value),
        })
        .collect();
    scene
}
