use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::core::{
    Granularity, TimeSeriesDataset, VisibleWindow, YBounds, compute_granularity,
    resolve_x_range, resolve_y_bounds,
};
use crate::error::{ChartError, ChartResult};
use crate::extensions::{ChartEvent, ChartObserver, ObserverContext};
use crate::interaction::{CrosshairTracker, PlotTransform, ZoomPanController, ZoomState};
use crate::render::{ChartScene, Renderer, SceneInput, build_scene};

use super::{ChartEngineConfig, FilterSession, ReloadCoordinator};

/// Main orchestration facade consumed by host applications.
///
/// `ChartEngine` owns the loaded dataset, the zoom window, the crosshair and
/// the filter selection, and hands finished scenes to its renderer. All
/// state lives on the thread that dispatches pointer events.
pub struct ChartEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: ChartEngineConfig,
    pub(super) dataset: TimeSeriesDataset,
    pub(super) strategy_label: String,
    pub(super) zoom: ZoomPanController,
    pub(super) crosshair: CrosshairTracker,
    pub(super) filter: FilterSession,
    pub(super) reloads: ReloadCoordinator,
    /// Granularity of the last committed scene, kept only to detect
    /// `GranularityChanged`.
    pub(super) granularity: Granularity,
    pub(super) scene: Option<ChartScene>,
    pub(super) notifications: Vec<ChartError>,
    pub(super) observers: IndexMap<String, Box<dyn ChartObserver>>,
}

impl<R: Renderer> ChartEngine<R> {
    /// Creates an engine with no data loaded. Nothing is drawn until the
    /// first reload commits.
    pub fn new(renderer: R, config: ChartEngineConfig) -> ChartResult<Self> {
        config.validate()?;
        let filter = FilterSession::new(
            config.default_lookback_years,
            config.default_category.clone(),
        );
        let strategy_label = config.strategy_placeholder.clone();

        Ok(Self {
            renderer,
            config,
            dataset: TimeSeriesDataset::default(),
            strategy_label,
            zoom: ZoomPanController::new(),
            crosshair: CrosshairTracker::new(),
            filter,
            reloads: ReloadCoordinator::new(),
            granularity: Granularity::Monthly,
            scene: None,
            notifications: Vec::new(),
            observers: IndexMap::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &ChartEngineConfig {
        &self.config
    }

    #[must_use]
    pub fn dataset(&self) -> &TimeSeriesDataset {
        &self.dataset
    }

    #[must_use]
    pub fn strategy_label(&self) -> &str {
        &self.strategy_label
    }

    #[must_use]
    pub fn zoom_state(&self) -> ZoomState {
        self.zoom.state()
    }

    #[must_use]
    pub fn visible_window(&self) -> VisibleWindow {
        self.zoom.window()
    }

    #[must_use]
    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Y bounds in effect for the current window.
    #[must_use]
    pub fn y_bounds(&self) -> YBounds {
        resolve_y_bounds(&self.dataset, &self.zoom.window())
    }

    /// Last scene handed to the renderer.
    #[must_use]
    pub fn scene(&self) -> Option<&ChartScene> {
        self.scene.as_ref()
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Errors raised by reload attempts since the last call, oldest first.
    pub fn take_notifications(&mut self) -> Vec<ChartError> {
        std::mem::take(&mut self.notifications)
    }

    /// Axis transform for the current window, `None` when no data is loaded.
    pub fn plot_transform(&self) -> ChartResult<PlotTransform> {
        let window = self.zoom.window();
        let x_range = resolve_x_range(&self.dataset, &window).ok_or_else(|| {
            ChartError::InvalidData("no data loaded, axes are undefined".to_owned())
        })?;
        PlotTransform::new(
            self.config.viewport,
            self.config.plot_insets,
            x_range,
            resolve_y_bounds(&self.dataset, &window),
        )
    }

    /// Recomputes granularity and Y bounds for the current window and hands a
    /// fresh scene to the renderer.
    ///
    /// Returns `false` when nothing was drawn because no data is loaded.
    pub fn render(&mut self) -> ChartResult<bool> {
        if self.dataset.is_empty() {
            debug!("skipping render, no data loaded");
            return Ok(false);
        }

        let scene = self.compose_scene(&self.dataset, &self.zoom.window(), &self.strategy_label)?;
        self.renderer.render(&scene)?;
        self.commit_scene(scene);
        Ok(true)
    }

    /// Builds the scene `dataset` would show under `window` without touching
    /// engine state.
    pub(super) fn compose_scene(
        &self,
        dataset: &TimeSeriesDataset,
        window: &VisibleWindow,
        strategy_label: &str,
    ) -> ChartResult<ChartScene> {
        build_scene(SceneInput {
            dataset,
            window,
            granularity: compute_granularity(dataset, window, self.config.weekly_threshold_days),
            thresholds: &self.config.thresholds,
            strategy_label,
        })
    }

    /// Records a scene the renderer accepted.
    pub(super) fn commit_scene(&mut self, scene: ChartScene) {
        let granularity = scene.granularity;
        if granularity != self.granularity {
            let from = self.granularity;
            self.granularity = granularity;
            debug!(?from, to = ?granularity, "time axis granularity changed");
            self.emit_event(ChartEvent::GranularityChanged {
                from,
                to: granularity,
            });
        }
        self.scene = Some(scene);
        self.emit_event(ChartEvent::Rendered);
    }

    /// Renders, logging failures. Returns `true` when a scene was drawn.
    pub(super) fn render_or_warn(&mut self, reason: &'static str) -> bool {
        match self.render() {
            Ok(drawn) => drawn,
            Err(err) => {
                warn!(error = %err, reason, "render failed");
                false
            }
        }
    }

    pub(super) fn observer_context(&self) -> ObserverContext {
        ObserverContext {
            zoom_state: self.zoom.state(),
            visible_window: self.zoom.window(),
            granularity: self.granularity,
            points_len: self.dataset.len(),
            reload_pending: self.reloads.is_pending(),
        }
    }

    pub(super) fn emit_event(&mut self, event: ChartEvent) {
        let context = self.observer_context();
        for observer in self.observers.values_mut() {
            observer.on_event(&event, context);
        }
    }
}
