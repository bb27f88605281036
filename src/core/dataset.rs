use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::core::types::{SeriesRow, TimeSeriesPoint};
use crate::error::ChartResult;

/// Immutable view over one reload's worth of rows.
///
/// Row order is taken as delivered. Duplicate dates are kept and drawn as-is;
/// out-of-order rows are logged but not re-sorted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeriesDataset {
    points: Vec<TimeSeriesPoint>,
    latest_composite: Option<f64>,
    latest_moving_average: Option<f64>,
}

impl TimeSeriesDataset {
    pub fn build(rows: &[SeriesRow]) -> ChartResult<Self> {
        let points = rows
            .iter()
            .map(TimeSeriesPoint::from_row)
            .collect::<ChartResult<Vec<_>>>()?;
        Ok(Self::from_points(points))
    }

    #[must_use]
    pub fn from_points(points: Vec<TimeSeriesPoint>) -> Self {
        let out_of_order = points
            .windows(2)
            .filter(|pair| pair[1].date < pair[0].date)
            .count();
        if out_of_order > 0 {
            warn!(out_of_order, "dataset rows are not in ascending date order");
        }

        let latest = points.last();
        let latest_composite = latest.and_then(|point| point.composite);
        let latest_moving_average = latest.and_then(|point| point.moving_average);
        debug!(count = points.len(), "built time series dataset");

        Self {
            points,
            latest_composite,
            latest_moving_average,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn points(&self) -> &[TimeSeriesPoint] {
        &self.points
    }

    /// Composite value of the last row, if that row had one.
    #[must_use]
    pub fn latest_composite(&self) -> Option<f64> {
        self.latest_composite
    }

    /// Moving average of the last row, if that row had one.
    #[must_use]
    pub fn latest_moving_average(&self) -> Option<f64> {
        self.latest_moving_average
    }

    #[must_use]
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|point| point.date)
    }

    #[must_use]
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|point| point.date)
    }

    /// Full data-space X range `(min, max)`, or `None` for an empty dataset.
    #[must_use]
    pub fn time_range(&self) -> Option<(f64, f64)> {
        self.points.iter().map(TimeSeriesPoint::time).fold(None, |acc, time| {
            Some(match acc {
                None => (time, time),
                Some((min, max)) => (min.min(time), max.max(time)),
            })
        })
    }

    /// `(time, value)` pairs of the composite series, skipping missing values.
    pub fn composite_series(&self) -> impl Iterator<Item = (&TimeSeriesPoint, f64)> + '_ {
        self.points
            .iter()
            .filter_map(|point| point.composite.map(|value| (point, value)))
    }

    /// `(time, value)` pairs of the moving-average series, skipping missing values.
    pub fn moving_average_series(&self) -> impl Iterator<Item = (&TimeSeriesPoint, f64)> + '_ {
        self.points
            .iter()
            .filter_map(|point| point.moving_average.map(|value| (point, value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn latest_values_come_from_last_row_even_when_missing() {
        let rows = vec![
            SeriesRow::new(date(2024, 1, 1), Some(Decimal::new(95, 0)), Some(Decimal::new(93, 0))),
            SeriesRow::new(date(2024, 1, 8), None, Some(Decimal::new(85, 0))),
        ];
        let dataset = TimeSeriesDataset::build(&rows).expect("dataset");

        assert_eq!(dataset.latest_composite(), None);
        assert_eq!(dataset.latest_moving_average(), Some(0.85));
        assert_eq!(dataset.composite_series().count(), 1);
        assert_eq!(dataset.moving_average_series().count(), 2);
    }

    #[test]
    fn duplicate_and_unsorted_dates_are_preserved() {
        let points = vec![
            TimeSeriesPoint::new(date(2024, 3, 1), Some(0.5), None),
            TimeSeriesPoint::new(date(2024, 3, 1), Some(0.6), None),
            TimeSeriesPoint::new(date(2024, 2, 1), Some(0.7), None),
        ];
        let dataset = TimeSeriesDataset::from_points(points.clone());

        assert_eq!(dataset.points(), points.as_slice());
        assert_eq!(dataset.first_date(), Some(date(2024, 3, 1)));
        assert_eq!(dataset.last_date(), Some(date(2024, 2, 1)));
    }

    #[test]
    fn empty_dataset_has_no_range_or_latest_values() {
        let dataset = TimeSeriesDataset::build(&[]).expect("dataset");
        assert!(dataset.is_empty());
        assert_eq!(dataset.time_range(), None);
        assert_eq!(dataset.latest_composite(), None);
    }
}
