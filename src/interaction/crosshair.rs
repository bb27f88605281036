use chrono::NaiveDate;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use crate::core::primitives::{day_number_to_date, format_point_label};
use crate::core::TimeSeriesDataset;
use crate::interaction::PixelTransform;

/// Which series a crosshair sample was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeriesKind {
    Composite,
    MovingAverage,
}

/// Closest data sample to the crosshair's X position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrosshairSample {
    pub series: SeriesKind,
    pub date: NaiveDate,
    pub value: f64,
}

/// Guide-line position exposed to hosts.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CrosshairState {
    pub visible: bool,
    pub pixel_x: f64,
    pub pixel_y: f64,
    pub time: Option<f64>,
    pub value: Option<f64>,
    pub date: Option<NaiveDate>,
    pub label: Option<String>,
    pub nearest: SmallVec<[CrosshairSample; 2]>,
}

/// Maps pointer motion to crosshair guide positions.
///
/// Each event is handled on its own against the transform it is given, so a
/// zoom between events is picked up without any bookkeeping here.
#[derive(Debug, Clone, Default)]
pub struct CrosshairTracker {
    state: CrosshairState,
}

impl CrosshairTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &CrosshairState {
        &self.state
    }

    /// Moves the guides under the pointer. Positions the transform cannot
    /// map hide the crosshair instead of failing.
    ///
    /// Returns `true` while the crosshair is visible.
    pub fn on_pointer_move(
        &mut self,
        pixel_x: f64,
        pixel_y: f64,
        transform: &impl PixelTransform,
        dataset: &TimeSeriesDataset,
    ) -> bool {
        let (time, value) = match transform.pixel_to_data(pixel_x, pixel_y) {
            Ok(mapped) => mapped,
            Err(err) => {
                trace!(error = %err, pixel_x, pixel_y, "suppressing crosshair");
                self.hide();
                return false;
            }
        };

        let date = day_number_to_date(time.round()).ok();
        self.state = CrosshairState {
            visible: true,
            pixel_x,
            pixel_y,
            time: Some(time),
            value: Some(value),
            date,
            label: date.map(|date| format_point_label(date, value)),
            nearest: nearest_samples(dataset, time),
        };
        true
    }

    pub fn on_pointer_leave(&mut self) {
        self.hide();
    }

    fn hide(&mut self) {
        self.state = CrosshairState::default();
    }
}

/// Nearest sample of each series to `time`, composite first.
#[must_use]
pub fn nearest_samples(dataset: &TimeSeriesDataset, time: f64) -> SmallVec<[CrosshairSample; 2]> {
    let composite = dataset
        .composite_series()
        .min_by_key(|(point, _)| OrderedFloat((point.time() - time).abs()))
        .map(|(point, value)| CrosshairSample {
            series: SeriesKind::Composite,
            date: point.date,
            value,
        });
    let moving_average = dataset
        .moving_average_series()
        .min_by_key(|(point, _)| OrderedFloat((point.time() - time).abs()))
        .map(|(point, value)| CrosshairSample {
            series: SeriesKind::MovingAverage,
            date: point.date,
            value,
        });

    composite.into_iter().chain(moving_average).collect()
}
