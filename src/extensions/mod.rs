//! Optional hooks around the engine.
//!
//! Keep extensions observational and out of the core paths.

pub mod observers;

pub use observers::{ChartEvent, ChartObserver, ObserverContext};
