mod null_renderer;
mod scene;
mod scene_builder;

pub use null_renderer::NullRenderer;
pub use scene::{
    ChartScene, LineSeriesScene, LineStrokeStyle, ScenePoint, ThresholdLine, default_thresholds,
};
pub use scene_builder::{
    COMPOSITE_SERIES_NAME, MOVING_AVERAGE_SERIES_NAME, SceneInput, build_scene, footer_text,
};

use crate::error::ChartResult;

/// Contract implemented by any presentation backend.
///
/// Backends receive a fully materialized `ChartScene`, so pixel drawing stays
/// isolated from dataset, zoom and interaction logic.
pub trait Renderer {
    fn render(&mut self, scene: &ChartScene) -> ChartResult<()>;
}
