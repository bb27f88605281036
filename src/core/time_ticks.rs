use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::core::Granularity;
use crate::core::primitives::{date_to_day_number, day_number_to_date};
use crate::core::windowing::ordered_window;
use crate::error::ChartResult;

/// Upper bound on emitted ticks; protects hosts from runaway spans.
pub const MAX_TIME_TICKS: usize = 512;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeTick {
    pub date: NaiveDate,
    pub time: f64,
    pub label: String,
}

/// Builds X-axis ticks for the given visible range.
///
/// Monthly ticks sit on the first day of each month, weekly ticks on Mondays.
pub fn time_ticks(range: (f64, f64), granularity: Granularity) -> ChartResult<Vec<TimeTick>> {
    let (start, end) = ordered_window(range.0, range.1);
    let first_day = day_number_to_date(start.ceil())?;
    let last_day = day_number_to_date(end.floor())?;

    let mut cursor = match granularity {
        Granularity::Monthly => first_month_start(first_day),
        Granularity::Weekly => first_monday(first_day),
    };

    let mut ticks = Vec::new();
    while let Some(date) = cursor {
        if date > last_day || ticks.len() >= MAX_TIME_TICKS {
            break;
        }
        ticks.push(TimeTick {
            date,
            time: date_to_day_number(date),
            label: tick_label(date, granularity),
        });
        cursor = match granularity {
            Granularity::Monthly => date.checked_add_months(Months::new(1)),
            Granularity::Weekly => date.checked_add_days(Days::new(7)),
        };
    }

    Ok(ticks)
}

#[must_use]
pub fn tick_label(date: NaiveDate, granularity: Granularity) -> String {
    match granularity {
        Granularity::Monthly => date.format("%Y-%m").to_string(),
        Granularity::Weekly => date.format("%Y-%m-%d").to_string(),
    }
}

fn first_month_start(date: NaiveDate) -> Option<NaiveDate> {
    let month_start = date.with_day(1)?;
    if month_start == date {
        Some(date)
    } else {
        month_start.checked_add_months(Months::new(1))
    }
}

fn first_monday(date: NaiveDate) -> Option<NaiveDate> {
    let offset = (7 - date.weekday().num_days_from_monday()) % 7;
    date.checked_add_days(Days::new(u64::from(offset)))
        .filter(|monday| monday.weekday() == Weekday::Mon)
}
