use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::VisibleWindow;
use crate::core::windowing::ordered_window;
use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoomState {
    /// Full view: every axis on auto.
    Idle,
    /// A sub-range of X and/or Y is active.
    Zoomed,
}

/// Axes a drag selection applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoomAxes {
    X,
    Y,
    Both,
}

impl ZoomAxes {
    #[must_use]
    pub fn includes_x(self) -> bool {
        matches!(self, Self::X | Self::Both)
    }

    #[must_use]
    pub fn includes_y(self) -> bool {
        matches!(self, Self::Y | Self::Both)
    }
}

/// Data-space rectangle selected by a drag. An axis left `None` stays on auto.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomRect {
    pub x: Option<(f64, f64)>,
    pub y: Option<(f64, f64)>,
}

impl ZoomRect {
    #[must_use]
    pub fn new(x: Option<(f64, f64)>, y: Option<(f64, f64)>) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        let flat = |range: Option<(f64, f64)>| {
            range.is_some_and(|(start, end)| !(end - start).is_normal())
        };
        (self.x.is_none() && self.y.is_none()) || flat(self.x) || flat(self.y)
    }
}

/// Result of a controller operation, consumed by the engine to decide on
/// autoscale, events and redraw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ZoomTransition {
    Zoomed { window: VisibleWindow },
    Reset { was_zoomed: bool },
    Panned { window: VisibleWindow },
    Unchanged,
}

impl ZoomTransition {
    /// Every transition except `Unchanged` requires autoscale and a redraw.
    #[must_use]
    pub fn requires_redraw(self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Owns the visible window and moves it between `Idle` and `Zoomed`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ZoomPanController {
    window: VisibleWindow,
}

impl ZoomPanController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> ZoomState {
        if self.window.is_full() {
            ZoomState::Idle
        } else {
            ZoomState::Zoomed
        }
    }

    #[must_use]
    pub fn window(&self) -> VisibleWindow {
        self.window
    }

    /// Replaces the visible window with the dragged rectangle.
    ///
    /// Degenerate rectangles are rejected with `DegenerateSelection` and leave
    /// the controller untouched.
    pub fn apply_drag(&mut self, rect: ZoomRect) -> ChartResult<ZoomTransition> {
        if rect.is_degenerate() {
            trace!(?rect, "ignoring degenerate drag selection");
            return Err(ChartError::DegenerateSelection);
        }
        for (start, end) in rect.x.iter().chain(rect.y.iter()) {
            if !start.is_finite() || !end.is_finite() {
                return Err(ChartError::InvalidData(
                    "zoom selection must be finite".to_owned(),
                ));
            }
        }

        let mut window = VisibleWindow::full();
        if let Some((start, end)) = rect.x {
            window = window.with_x_range(start, end);
        }
        if let Some((start, end)) = rect.y {
            window = window.with_y_range(start, end);
        }
        self.window = window;
        debug!(?window, "zoomed visible window");
        Ok(ZoomTransition::Zoomed { window })
    }

    /// Returns to the full view. Always reported, even from `Idle`, so the
    /// caller re-autoscales and redraws.
    pub fn reset(&mut self) -> ZoomTransition {
        let was_zoomed = self.state() == ZoomState::Zoomed;
        self.window = VisibleWindow::full();
        if was_zoomed {
            debug!("reset visible window to full view");
        }
        ZoomTransition::Reset { was_zoomed }
    }

    /// Shifts the explicit ranges by a data-space delta. Axes on auto do not
    /// move.
    pub fn pan_by(&mut self, delta_time: f64, delta_value: f64) -> ChartResult<ZoomTransition> {
        if !delta_time.is_finite() || !delta_value.is_finite() {
            return Err(ChartError::InvalidData(
                "pan delta must be finite".to_owned(),
            ));
        }
        if self.state() == ZoomState::Idle || (delta_time == 0.0 && delta_value == 0.0) {
            return Ok(ZoomTransition::Unchanged);
        }

        let mut window = self.window;
        if let Some((start, end)) = window.x_range() {
            let (start, end) = ordered_window(start + delta_time, end + delta_time);
            window.x_min = Some(start);
            window.x_max = Some(end);
        }
        if let Some((start, end)) = window.y_range() {
            let (start, end) = ordered_window(start + delta_value, end + delta_value);
            window.y_min = Some(start);
            window.y_max = Some(end);
        }
        if window == self.window {
            return Ok(ZoomTransition::Unchanged);
        }
        self.window = window;
        trace!(?window, "panned visible window");
        Ok(ZoomTransition::Panned { window })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_axis_drag_leaves_other_axis_on_auto() {
        let mut controller = ZoomPanController::new();
        controller
            .apply_drag(ZoomRect::new(Some((30.0, 10.0)), None))
            .expect("zoom x");

        let window = controller.window();
        assert_eq!(window.x_range(), Some((10.0, 30.0)));
        assert_eq!(window.y_range(), None);
        assert_eq!(controller.state(), ZoomState::Zoomed);
    }

    #[test]
    fn degenerate_drag_is_rejected_without_state_change() {
        let mut controller = ZoomPanController::new();
        controller
            .apply_drag(ZoomRect::new(Some((0.0, 10.0)), Some((0.2, 0.8))))
            .expect("zoom");
        let before = controller.window();

        let err = controller
            .apply_drag(ZoomRect::new(Some((5.0, 5.0)), Some((0.2, 0.8))))
            .expect_err("flat x");
        assert_eq!(err, ChartError::DegenerateSelection);
        assert_eq!(controller.window(), before);
    }

    #[test]
    fn pan_only_moves_explicit_axes() {
        let mut controller = ZoomPanController::new();
        assert_eq!(controller.pan_by(5.0, 0.0).expect("pan"), ZoomTransition::Unchanged);

        controller
            .apply_drag(ZoomRect::new(Some((0.0, 10.0)), None))
            .expect("zoom");
        controller.pan_by(5.0, 0.3).expect("pan");
        assert_eq!(controller.window().x_range(), Some((5.0, 15.0)));
        assert_eq!(controller.window().y_range(), None);
    }
}
