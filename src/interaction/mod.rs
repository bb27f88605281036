//! Pointer-driven state: zoom/pan window and crosshair guides.
//!
//! Nothing here draws. Controllers return transitions and the engine decides
//! when to autoscale and re-render.

mod crosshair;
mod transform;
mod zoom;

pub use crosshair::{
    CrosshairSample, CrosshairState, CrosshairTracker, SeriesKind, nearest_samples,
};
pub use transform::{PixelTransform, PlotTransform};
pub use zoom::{ZoomAxes, ZoomPanController, ZoomRect, ZoomState, ZoomTransition};
