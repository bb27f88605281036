use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{ChartError, ChartResult};

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

/// Converts a percent value (`78.5`) to a fraction (`0.785`).
pub fn percent_to_fraction(value: Decimal, field_name: &str) -> ChartResult<f64> {
    let fraction = decimal_to_f64(value / Decimal::ONE_HUNDRED, field_name)?;
    if !fraction.is_finite() {
        return Err(ChartError::InvalidData(format!(
            "{field_name} must be finite"
        )));
    }
    Ok(fraction)
}

// `NaiveDate::default()` is 1970-01-01.
fn unix_epoch_date() -> NaiveDate {
    NaiveDate::default()
}

/// Data-space X coordinate: whole days since 1970-01-01.
#[must_use]
pub fn date_to_day_number(date: NaiveDate) -> f64 {
    date.signed_duration_since(unix_epoch_date()).num_days() as f64
}

/// Inverse of [`date_to_day_number`]. Fractional days are truncated toward
/// the earlier calendar date.
pub fn day_number_to_date(day: f64) -> ChartResult<NaiveDate> {
    if !day.is_finite() {
        return Err(ChartError::InvalidData(
            "day number must be finite".to_owned(),
        ));
    }
    let whole = day.floor();
    let converted = if whole >= 0.0 {
        unix_epoch_date().checked_add_days(Days::new(whole as u64))
    } else {
        unix_epoch_date().checked_sub_days(Days::new((-whole) as u64))
    };
    converted.ok_or_else(|| ChartError::InvalidData(format!("day number {day} is out of range")))
}

#[must_use]
pub fn format_percent(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}

/// Label used by point tooltips and the crosshair readout.
#[must_use]
pub fn format_point_label(date: NaiveDate, value: f64) -> String {
    format!("date: {date}, value: {}", format_percent(value))
}
