//! Tracing subscriber setup.

use super::exporter::{file_tracer_provider, SCOPE_NAME};
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File name of the trace log inside the data directory.
pub const TRACE_FILE: &str = "moviedeck-otlp.json";

/// Installs the global subscriber: `EnvFilter` at the configured level (default `info`)
/// feeding an OpenTelemetry layer that exports to `<data_dir>/moviedeck-otlp.json`.
///
/// Safe to call more than once; only the first call installs anything. Does nothing if
/// the data directory cannot be created.
///
/// # Example
///
/// ```rust
/// use moviedeck::observability::init_tracing;
/// use moviedeck::Config;
///
/// let dir = tempfile::tempdir().unwrap();
/// let config = Config {
///     data_dir: dir.path().to_path_buf(),
///     trace_level: Some("debug".to_string()),
///     ..Config::default()
/// };
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");

    if std::fs::create_dir_all(&config.data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![
        KeyValue::new("service.name", SCOPE_NAME),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);
    let provider = file_tracer_provider(config.data_dir.join(TRACE_FILE), resource);
    let layer = OpenTelemetryLayer::new(provider.tracer(SCOPE_NAME));

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(layer)
        .try_init();
}
