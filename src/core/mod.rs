pub mod axis_scaling;
pub mod dataset;
pub mod primitives;
pub mod scale;
pub mod time_ticks;
pub mod types;
pub mod visible_window;
pub mod windowing;

pub use axis_scaling::{
    DEFAULT_WEEKLY_THRESHOLD_DAYS, DEFAULT_Y_BOUNDS, Granularity, YBounds, compute_granularity,
    compute_y_bounds, granularity_for_span, resolve_x_range, resolve_y_bounds,
};
pub use dataset::TimeSeriesDataset;
pub use primitives::{date_to_day_number, day_number_to_date, format_percent, format_point_label};
pub use scale::LinearScale;
pub use time_ticks::{TimeTick, time_ticks};
pub use types::{PlotInsets, SeriesRow, TimeSeriesPoint, Viewport};
pub use visible_window::VisibleWindow;
