mod data_source;
mod engine;
mod engine_config;
mod filter_controller;
mod filter_session;
mod interaction_controller;
mod observer_registry;
mod reload;
mod reload_controller;
mod threaded_fetcher;

pub use data_source::{FetchedSeries, SeriesSource};
pub use engine::ChartEngine;
pub use engine_config::{ChartEngineConfig, DEFAULT_LOOKBACK_YEARS, DEFAULT_STRATEGY_PLACEHOLDER};
pub use filter_session::{DialogOutcome, FilterDialog, FilterSelection, FilterSession};
pub use interaction_controller::{ChartInput, InputResponse};
pub use reload::{ReloadCoordinator, ReloadOutcome, ReloadTicket};
pub use threaded_fetcher::{FetchDelivery, ThreadedFetcher};
