//! composite-chart: headless engine for an interactive two-series time chart.
//!
//! The engine plots a composite value and its trailing moving average with
//! fixed threshold guides. It owns dataset reloads, Y autoscaling, drag
//! zoom with weekly/monthly tick switching, and crosshair tracking, and
//! hands finished scenes to a pluggable `Renderer`.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartEngine, ChartEngineConfig};
pub use error::{ChartError, ChartResult};
