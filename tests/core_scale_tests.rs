use approx::assert_relative_eq;
use chrono::NaiveDate;
use composite_chart::ChartError;
use composite_chart::core::{
    LinearScale, PlotInsets, Viewport, YBounds, date_to_day_number, day_number_to_date,
    format_percent,
};
use composite_chart::interaction::{PixelTransform, PlotTransform};

#[test]
fn scale_round_trip_within_tolerance() {
    let scale = LinearScale::new((19_000.0, 19_365.0), (60.0, 984.0)).expect("valid scale");

    let original = 19_123.5;
    let px = scale.domain_to_pixel(original).expect("to pixel");
    let recovered = scale.pixel_to_domain(px).expect("from pixel");

    assert_relative_eq!(recovered, original, epsilon = 1e-9);
}

#[test]
fn reversed_pixel_range_grows_upward() {
    let scale = LinearScale::new((0.7, 1.0), (500.0, 0.0)).expect("valid scale");

    assert_relative_eq!(scale.domain_to_pixel(0.7).expect("bottom"), 500.0);
    assert_relative_eq!(scale.domain_to_pixel(1.0).expect("top"), 0.0);
    assert!(scale.contains_pixel(250.0));
    assert!(!scale.contains_pixel(-1.0));
}

#[test]
fn flat_or_non_finite_scales_are_rejected() {
    assert!(LinearScale::new((1.0, 1.0), (0.0, 100.0)).is_err());
    assert!(LinearScale::new((0.0, f64::NAN), (0.0, 100.0)).is_err());
    assert!(LinearScale::new((0.0, 1.0), (50.0, 50.0)).is_err());

    let scale = LinearScale::new((0.0, 1.0), (0.0, 100.0)).expect("valid scale");
    assert!(scale.domain_to_pixel(f64::INFINITY).is_err());
    assert!(scale.pixel_to_domain(f64::NAN).is_err());
}

#[test]
fn plot_transform_respects_insets() {
    let insets = PlotInsets {
        left: 50.0,
        top: 10.0,
        right: 50.0,
        bottom: 40.0,
    };
    let transform = PlotTransform::new(
        Viewport::new(1100, 550),
        insets,
        (0.0, 100.0),
        YBounds { min: 0.0, max: 1.0 },
    )
    .expect("transform");

    let (x, y) = transform.data_to_pixel(0.0, 1.0).expect("top-left");
    assert_relative_eq!(x, 50.0);
    assert_relative_eq!(y, 10.0);
    let (x, y) = transform.data_to_pixel(100.0, 0.0).expect("bottom-right");
    assert_relative_eq!(x, 1050.0);
    assert_relative_eq!(y, 510.0);

    let (time, value) = transform.pixel_to_data(550.0, 260.0).expect("center");
    assert_relative_eq!(time, 50.0, epsilon = 1e-9);
    assert_relative_eq!(value, 0.5, epsilon = 1e-9);

    assert_eq!(
        transform.pixel_to_data(20.0, 260.0),
        Err(ChartError::PointerOutsidePlot)
    );
    assert_eq!(transform.clamp_pixel(2000.0, -5.0), (1050.0, 10.0));
}

#[test]
fn single_day_range_is_widened_for_mapping() {
    let transform = PlotTransform::new(
        Viewport::new(200, 100),
        PlotInsets::uniform(0.0),
        (19_000.0, 19_000.0),
        YBounds { min: 0.8, max: 0.8 },
    )
    .expect("transform");

    let (x, y) = transform.data_to_pixel(19_000.0, 0.8).expect("center");
    assert_relative_eq!(x, 100.0, epsilon = 1e-9);
    assert_relative_eq!(y, 50.0, epsilon = 1e-9);
}

#[test]
fn day_numbers_count_from_unix_epoch() {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).expect("valid date");
    let date = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");

    assert_eq!(date_to_day_number(epoch), 0.0);
    assert_eq!(date_to_day_number(date), 19_723.0);
    assert_eq!(day_number_to_date(19_723.9).expect("date"), date);
    assert_eq!(day_number_to_date(-0.5).expect("date"), NaiveDate::from_ymd_opt(1969, 12, 31).expect("valid date"));
    assert!(day_number_to_date(f64::NAN).is_err());
}

#[test]
fn percent_formatting_uses_two_decimals() {
    assert_eq!(format_percent(0.78), "78.00%");
    assert_eq!(format_percent(0.125), "12.50%");
    assert_eq!(format_percent(1.0), "100.00%");
}
