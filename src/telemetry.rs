//! Opt-in tracing setup for hosts embedding the chart engine.
//!
//! The engine only emits `tracing` events. Nothing is printed unless the host
//! installs a subscriber, either its own or the one built here behind the
//! `telemetry` feature.

/// Filter applied when `RUST_LOG` is unset: engine debug output, everything
/// else at `warn`.
pub const DEFAULT_LOG_DIRECTIVE: &str = "warn,composite_chart=debug";

/// Installs a compact fmt subscriber filtered by `RUST_LOG`, falling back to
/// [`DEFAULT_LOG_DIRECTIVE`].
///
/// Returns `false` when the `telemetry` feature is off or a global
/// subscriber is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    let directive = std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_DIRECTIVE.to_owned());
    init_tracing_with_directive(&directive)
}

/// Installs a compact fmt subscriber using an explicit filter directive such
/// as `"composite_chart::api=trace"`.
///
/// Returns `false` when the directive does not parse, the feature is off, or
/// a global subscriber is already installed.
#[must_use]
pub fn init_tracing_with_directive(directive: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let Ok(filter) = tracing_subscriber::EnvFilter::try_new(directive) else {
            return false;
        };
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = directive;
        false
    }
}
