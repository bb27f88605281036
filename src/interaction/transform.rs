use crate::core::{LinearScale, PlotInsets, Viewport, YBounds};
use crate::error::{ChartError, ChartResult};

/// Fallible pixel → data mapping supplied by the presentation layer.
///
/// Implementations must return `Err` instead of extrapolating when the pixel
/// lies outside the plotted data area.
pub trait PixelTransform {
    fn pixel_to_data(&self, x: f64, y: f64) -> ChartResult<(f64, f64)>;
}

/// Axis transform for the plot area inside a viewport.
///
/// X maps day numbers left→right, Y maps fractions bottom→top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotTransform {
    x_scale: LinearScale,
    y_scale: LinearScale,
}

impl PlotTransform {
    pub fn new(
        viewport: Viewport,
        insets: PlotInsets,
        x_range: (f64, f64),
        y_bounds: YBounds,
    ) -> ChartResult<Self> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let left = insets.left;
        let right = f64::from(viewport.width) - insets.right;
        let top = insets.top;
        let bottom = f64::from(viewport.height) - insets.bottom;
        if !(right > left && bottom > top) {
            return Err(ChartError::InvalidData(
                "plot insets leave no drawable area".to_owned(),
            ));
        }

        let x_scale = LinearScale::new(widen_flat_range(x_range, 0.5), (left, right))?;
        let y_scale = LinearScale::new(
            widen_flat_range((y_bounds.min, y_bounds.max), 0.05),
            (bottom, top),
        )?;
        Ok(Self { x_scale, y_scale })
    }

    #[must_use]
    pub fn x_scale(&self) -> LinearScale {
        self.x_scale
    }

    #[must_use]
    pub fn y_scale(&self) -> LinearScale {
        self.y_scale
    }

    pub fn data_to_pixel(&self, time: f64, value: f64) -> ChartResult<(f64, f64)> {
        Ok((
            self.x_scale.domain_to_pixel(time)?,
            self.y_scale.domain_to_pixel(value)?,
        ))
    }

    #[must_use]
    pub fn contains_pixel(&self, x: f64, y: f64) -> bool {
        self.x_scale.contains_pixel(x) && self.y_scale.contains_pixel(y)
    }

    /// Pulls a pixel onto the nearest edge of the plot area.
    #[must_use]
    pub fn clamp_pixel(&self, x: f64, y: f64) -> (f64, f64) {
        (clamp_to_range(x, self.x_scale.range()), clamp_to_range(y, self.y_scale.range()))
    }
}

impl PixelTransform for PlotTransform {
    fn pixel_to_data(&self, x: f64, y: f64) -> ChartResult<(f64, f64)> {
        if !x.is_finite() || !y.is_finite() || !self.contains_pixel(x, y) {
            return Err(ChartError::PointerOutsidePlot);
        }
        Ok((
            self.x_scale.pixel_to_domain(x)?,
            self.y_scale.pixel_to_domain(y)?,
        ))
    }
}

fn widen_flat_range((start, end): (f64, f64), half: f64) -> (f64, f64) {
    if start == end {
        (start - half, end + half)
    } else {
        (start.min(end), start.max(end))
    }
}

fn clamp_to_range(value: f64, (a, b): (f64, f64)) -> f64 {
    value.clamp(a.min(b), a.max(b))
}
