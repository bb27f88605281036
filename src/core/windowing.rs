use crate::core::TimeSeriesPoint;

/// Normalizes an inclusive time window so `start <= end`.
#[must_use]
pub fn ordered_window(start: f64, end: f64) -> (f64, f64) {
    if start <= end { (start, end) } else { (end, start) }
}

/// Returns points whose time falls inside an inclusive time window.
pub fn points_in_time_window(
    points: &[TimeSeriesPoint],
    start: f64,
    end: f64,
) -> impl Iterator<Item = &TimeSeriesPoint> + '_ {
    let (min_t, max_t) = ordered_window(start, end);
    points.iter().filter(move |point| {
        let time = point.time();
        time >= min_t && time <= max_t
    })
}

/// Collects every non-missing value (both series) inside an optional time
/// window. `None` means the full dataset.
#[must_use]
pub fn values_in_time_window(points: &[TimeSeriesPoint], window: Option<(f64, f64)>) -> Vec<f64> {
    match window {
        Some((start, end)) => points_in_time_window(points, start, end)
            .flat_map(TimeSeriesPoint::values)
            .collect(),
        None => points.iter().flat_map(TimeSeriesPoint::values).collect(),
    }
}
