use serde::{Deserialize, Serialize};

use crate::api::FilterSelection;
use crate::core::{Granularity, VisibleWindow};
use crate::interaction::ZoomState;

/// Read-only state snapshot passed to observer hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObserverContext {
    pub zoom_state: ZoomState,
    pub visible_window: VisibleWindow,
    pub granularity: Granularity,
    pub points_len: usize,
    pub reload_pending: bool,
}

/// Event stream exposed to observers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChartEvent {
    FilterSelectionChanged { selection: FilterSelection },
    DatasetReloaded { sequence: u64, points_len: usize },
    ReloadDiscarded { sequence: u64 },
    ReloadFailed { sequence: u64, message: String },
    VisibleWindowChanged { window: VisibleWindow },
    GranularityChanged { from: Granularity, to: Granularity },
    CrosshairMoved { time: f64, value: f64 },
    CrosshairHidden,
    Rendered,
}

/// Hook interface for hosts that react to engine changes (status bars,
/// toasts, logging). Observers cannot mutate engine state.
pub trait ChartObserver {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: &ChartEvent, context: ObserverContext);
}
