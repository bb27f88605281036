use crate::error::ChartResult;
use crate::render::{ChartScene, Renderer};

/// No-op renderer used by tests and headless engine usage.
///
/// It keeps the last scene so tests can assert on exactly what a backend
/// would have drawn.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub render_count: usize,
    pub last_scene: Option<ChartScene>,
}

impl Renderer for NullRenderer {
    fn render(&mut self, scene: &ChartScene) -> ChartResult<()> {
        self.render_count += 1;
        self.last_scene = Some(scene.clone());
        Ok(())
    }
}
