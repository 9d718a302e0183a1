//! Structured logging for dp-core.
//!
//! Provides dual-mode logging:
//! - Human-readable console output for interactive use
//! - JSONL for scripted runs
//!
//! stdout is reserved for the report; every log line goes to stderr.

pub mod config;

pub use config::{LogConfig, LogFormat, LogLevel};

use std::io::IsTerminal;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Stable event names carried in the `event` field.
pub mod event_names {
    // Run lifecycle
    pub const RUN_STARTED: &str = "run.started";
    pub const RUN_FINISHED: &str = "run.finished";

    // Configuration
    pub const CONFIG_LOADED: &str = "config.loaded";

    // Selection
    pub const SELECTION_DICE_DEFAULTED: &str = "selection.dice_defaulted";
    pub const SELECTION_DICE_CLAMPED: &str = "selection.dice_clamped";

    // Estimation
    pub const EVIDENCE_SAMPLED: &str = "estimate.evidence_sampled";
    pub const ESTIMATE_STARTED: &str = "estimate.started";
    pub const ESTIMATE_COMPLETED: &str = "estimate.completed";

    // Rendering
    pub const RENDER_PLOT_WRITTEN: &str = "render.plot_written";
}

/// Initialize the logging subsystem.
///
/// Must be called once at startup before any logging occurs. A `RUST_LOG`
/// directive is honoured only when it also decided the level.
pub fn init_logging(config: &LogConfig) {
    let level_filter = || {
        let level = tracing_subscriber::filter::LevelFilter::from(config.level);
        EnvFilter::default().add_directive(level.into())
    };
    let filter = match &config.directive {
        Some(directive) => EnvFilter::try_new(directive).unwrap_or_else(|_| level_filter()),
        None => level_filter(),
    };

    match config.format {
        LogFormat::Human => {
            let use_ansi = std::io::stderr().is_terminal();
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(use_ansi);

            if config.timestamps {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt_layer)
                    .init();
            } else {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt_layer.without_time())
                    .init();
            }
        }
        LogFormat::Jsonl => {
            let json_layer = fmt::layer()
                .json()
                .flatten_event(true)
                .with_current_span(true)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry()
                .with(filter)
                .with(json_layer)
                .init();
        }
    }
}

/// Generate a unique run ID for this invocation.
pub fn generate_run_id() -> String {
    let uuid = uuid::Uuid::new_v4();
    // First 12 hex chars keep it readable
    format!("run-{}", &uuid.simple().to_string()[..12])
}
