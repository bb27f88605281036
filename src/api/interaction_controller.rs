use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::error::{ChartError, ChartResult};
use crate::extensions::ChartEvent;
use crate::interaction::{CrosshairState, ZoomAxes, ZoomRect, ZoomTransition};
use crate::render::Renderer;

use super::ChartEngine;

/// Pointer input forwarded by the presentation layer, in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ChartInput {
    PointerMoved { x: f64, y: f64 },
    PointerLeft,
    /// A finished rubber-band drag from `start` to `end`.
    DragSelection {
        start: (f64, f64),
        end: (f64, f64),
        axes: ZoomAxes,
    },
    RightClick { x: f64, y: f64 },
    DoubleClick { x: f64, y: f64 },
    ResetZoom,
}

/// What the host should do after an input was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputResponse {
    None,
    /// A new scene was rendered.
    Redrawn,
    CrosshairUpdated { visible: bool },
    /// The host should show the filter dialog via `open_filter_dialog`.
    FilterDialogRequested,
}

impl<R: Renderer> ChartEngine<R> {
    pub fn handle_input(&mut self, input: ChartInput) -> InputResponse {
        match input {
            ChartInput::PointerMoved { x, y } => InputResponse::CrosshairUpdated {
                visible: self.pointer_move(x, y),
            },
            ChartInput::PointerLeft => {
                self.pointer_leave();
                InputResponse::CrosshairUpdated { visible: false }
            }
            ChartInput::DragSelection { start, end, axes } => {
                match self.zoom_to_pixel_selection(start, end, axes) {
                    Ok(transition) if transition.requires_redraw() => InputResponse::Redrawn,
                    Ok(_) => InputResponse::None,
                    Err(err) => {
                        warn!(error = %err, "drag zoom failed");
                        InputResponse::None
                    }
                }
            }
            ChartInput::RightClick { .. } | ChartInput::ResetZoom => {
                let transition = self.zoom.reset();
                trace!(?transition, "reset requested");
                if self.after_window_change() {
                    InputResponse::Redrawn
                } else {
                    InputResponse::None
                }
            }
            ChartInput::DoubleClick { .. } => InputResponse::FilterDialogRequested,
        }
    }

    #[must_use]
    pub fn crosshair_state(&self) -> &CrosshairState {
        self.crosshair.state()
    }

    /// Moves the crosshair. Returns `false` (crosshair hidden) when the pointer
    /// is outside the plot area or no data is loaded.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        let visible = match self.plot_transform() {
            Ok(transform) => self
                .crosshair
                .on_pointer_move(x, y, &transform, &self.dataset),
            Err(err) => {
                trace!(error = %err, "no axis transform, hiding crosshair");
                self.crosshair.on_pointer_leave();
                false
            }
        };

        let state = self.crosshair.state();
        let event = match (visible, state.time, state.value) {
            (true, Some(time), Some(value)) => ChartEvent::CrosshairMoved { time, value },
            _ => ChartEvent::CrosshairHidden,
        };
        self.emit_event(event);
        visible
    }

    pub fn pointer_leave(&mut self) {
        self.crosshair.on_pointer_leave();
        self.emit_event(ChartEvent::CrosshairHidden);
    }

    /// Zooms to a rubber-band selection given in viewport pixels.
    ///
    /// Both corners are clamped onto the plot area first. Selections that
    /// collapse to zero width or height are ignored.
    pub fn zoom_to_pixel_selection(
        &mut self,
        start: (f64, f64),
        end: (f64, f64),
        axes: ZoomAxes,
    ) -> ChartResult<ZoomTransition> {
        if start == end {
            trace!(?start, "ignoring click-sized drag selection");
            return Ok(ZoomTransition::Unchanged);
        }

        let transform = self.plot_transform()?;
        let (x0, y0) = transform.clamp_pixel(start.0, start.1);
        let (x1, y1) = transform.clamp_pixel(end.0, end.1);
        let (x_scale, y_scale) = (transform.x_scale(), transform.y_scale());

        let x = if axes.includes_x() {
            Some((x_scale.pixel_to_domain(x0)?, x_scale.pixel_to_domain(x1)?))
        } else {
            None
        };
        let y = if axes.includes_y() {
            Some((y_scale.pixel_to_domain(y0)?, y_scale.pixel_to_domain(y1)?))
        } else {
            None
        };
        self.zoom_to(ZoomRect::new(x, y))
    }

    /// Zooms to a data-space rectangle. Degenerate rectangles are a no-op.
    pub fn zoom_to(&mut self, rect: ZoomRect) -> ChartResult<ZoomTransition> {
        match self.zoom.apply_drag(rect) {
            Ok(transition) => {
                self.after_window_change();
                Ok(transition)
            }
            Err(ChartError::DegenerateSelection) => Ok(ZoomTransition::Unchanged),
            Err(err) => Err(err),
        }
    }

    /// Returns to the full view, re-autoscales and re-renders.
    pub fn reset_zoom(&mut self) -> ZoomTransition {
        let transition = self.zoom.reset();
        self.after_window_change();
        transition
    }

    /// Pans explicit axis ranges by a data-space delta.
    pub fn pan_by(&mut self, delta_days: f64, delta_value: f64) -> ChartResult<ZoomTransition> {
        let transition = self.zoom.pan_by(delta_days, delta_value)?;
        if transition.requires_redraw() {
            self.after_window_change();
        }
        Ok(transition)
    }

    /// Returns `true` when a scene was drawn for the new window.
    fn after_window_change(&mut self) -> bool {
        self.emit_event(ChartEvent::VisibleWindowChanged {
            window: self.zoom.window(),
        });
        self.render_or_warn("visible window changed")
    }
}
